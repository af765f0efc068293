// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! [Brick](https://brickschema.org/schema/Brick)
//! vocabulary, the parts of it that get special treatment.

use crate::named_node;

pub const NS_BASE: &str = "https://brickschema.org/schema/Brick#";
pub const NS_PREFERRED_PREFIX: &str = "brick";

pub const NS_BASE_SHAPE: &str = "https://brickschema.org/schema/BrickShape#";

named_node!(
    HAS_ASSOCIATED_TAG,
    NS_BASE,
    "hasAssociatedTag",
    "The class is associated with the given tag."
);
named_node!(
    VALUE_SHAPE,
    NS_BASE_SHAPE,
    "ValueShape",
    "Super-class of all shapes that only bundle the property shapes of a single (embedded) value."
);
