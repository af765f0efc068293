// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Provides ready to use [`NamedNodeRef`](oxrdf::NamedNodeRef)s
//! for the vocabularies read and written by `shacl2dtdl`.

pub mod brick;
pub mod dtdl;
pub mod owl;
pub mod sh;

use git_version::git_version;

// This tests rust code in the README with doc-tests.
// Though, It will not appear in the generated documentation.
#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

pub const VERSION: &str = git_version!(cargo_prefix = "", fallback = "unknown");

#[macro_export]
macro_rules! named_node {
    ($const:ident, $base:expr, $node:literal, $doc:literal) => {
        #[doc=$doc]
        pub const $const: oxrdf::NamedNodeRef<'_> =
            oxrdf::NamedNodeRef::new_unchecked(const_format::concatcp!($base, $node));
    };
}

pub mod basics {
    use oxrdf::NamedNodeRef;

    pub const NS_BASE_XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// Whether the given IRI lies within the XML Schema datatypes namespace.
    #[must_use]
    pub fn is_xsd(node: NamedNodeRef<'_>) -> bool {
        node.as_str().starts_with(NS_BASE_XSD)
    }
}
