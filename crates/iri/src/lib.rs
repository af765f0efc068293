// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

mod dtmi;
mod iri;

pub use dtmi::{mint, sanitize_segment, Dtmi, Error, DTMI_SCHEME, DTMI_VERSION};
pub use iri::{local_name, namespace, split};

// This tests rust code in the README with doc-tests.
// Though, It will not appear in the generated documentaton.
#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
