// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::io;
use std::path::PathBuf;

use oxrdf::IriParseError;
use shacl2dtdl_iri::Dtmi;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read the ontology: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse the ontology: {0}")]
    Syntax(String),
    #[error("Failed to fetch the ontology: {0}")]
    Http(#[from] reqwest::Error),
    #[error("'{base}' can not be used as base IRI: {source}")]
    InvalidBaseIri {
        base: String,
        source: IriParseError,
    },
}

/// Why a property shape or ontology property
/// could not be turned into a [`Property`](crate::property::Property).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PropertyError {
    #[error("The path '{path}' of property '{shape}' is not a simple predicate")]
    UnsupportedPathKind { shape: String, path: String },
    #[error("The property shape '{shape}' has no sh:path")]
    MissingPath { shape: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("I/O failure while writing output: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Mint(#[from] shacl2dtdl_iri::Error),
    #[error("Both '{first}' and '{second}' mint to the identifier '{dtmi}'")]
    IdentifierCollision {
        dtmi: Dtmi,
        first: String,
        second: String,
    },
    #[error("Both '{first}' and '{second}' would be written to '{}'", path.display())]
    OutputCollision {
        path: PathBuf,
        first: String,
        second: String,
    },
    #[error("The DTDL JSON-LD context is missing or invalid: {0}")]
    MissingContext(String),
    #[error("Failed to (de-)serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error only concerns a single class shape,
    /// so the run may continue with the next one.
    #[must_use]
    pub const fn is_shape_local(&self) -> bool {
        matches!(
            self,
            Self::Mint(_) | Self::IdentifierCollision { .. } | Self::OutputCollision { .. }
        )
    }
}
