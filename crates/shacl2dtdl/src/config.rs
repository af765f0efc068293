// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use url::Url;

/// Where to read the ontology from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OntologySource {
    File(PathBuf),
    Uri(Url),
}

impl fmt::Display for OntologySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Uri(uri) => write!(f, "{uri}"),
        }
    }
}

/// IRI substrings of classes to exclude from translation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IgnoreList(Vec<String>);

impl IgnoreList {
    /// Parses delimited text;
    /// the first `;`-separated field of each line is one entry.
    /// Blank entries are skipped, as they would match everything.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        Self(
            content
                .lines()
                .filter_map(|line| line.split(';').next())
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        )
    }

    /// Reads and parses an ignore file.
    ///
    /// # Errors
    ///
    /// If the file can not be read.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// Whether any entry is a substring of the given IRI.
    #[must_use]
    pub fn matches(&self, iri: &str) -> bool {
        self.0.iter().any(|entry| iri.contains(entry.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /**
     * The ontology to translate,
     * either a local file or a remote resource.
     */
    pub source: OntologySource,
    /**
     * Where to write the DTDL Interface documents to.
     */
    pub out_dir: PathBuf,
    /**
     * Classes whose IRI contains any of these entries are not translated.
     */
    pub ignore: IgnoreList,
    /**
     * Replaces the ontology source part of every minted DTMI,
     * e.g. `digitaltwins:myorg`.
     */
    pub ontology_source: Option<String>,
    /**
     * Do not warn about `owl:imports`, which are never followed.
     */
    pub no_imports: bool,
    /**
     * Write all Interfaces into a single document.
     * Not implemented; only triggers a warning.
     */
    pub merged_output: bool,
}

impl Config {
    /// A configuration with all optional settings at their defaults.
    #[must_use]
    pub const fn new(source: OntologySource, out_dir: PathBuf) -> Self {
        Self {
            source,
            out_dir,
            ignore: IgnoreList(Vec::new()),
            ontology_source: None,
            no_imports: false,
            merged_output: false,
        }
    }
}
