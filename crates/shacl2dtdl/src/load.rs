// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use oxrdf::Triple;
use oxrdfio::{RdfFormat, RdfParseError, RdfParser};
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use url::Url;

use crate::config::OntologySource;
use crate::error::LoadError;
use crate::store::TripleStore;

const ACCEPT_RDF: &str = "text/turtle, application/rdf+xml;q=0.9, \
application/n-triples;q=0.8, application/trig;q=0.7, application/n-quads;q=0.6, \
text/n3;q=0.5";

/// Loads the whole ontology into memory.
///
/// # Errors
///
/// If the source can not be read, fetched or parsed.
pub fn load(source: &OntologySource) -> Result<TripleStore, LoadError> {
    match source {
        OntologySource::File(path) => load_file(path),
        OntologySource::Uri(uri) => load_uri(uri),
    }
}

/// Loads a local RDF file;
/// the format is guessed from the file extension,
/// falling back to Turtle.
///
/// # Errors
///
/// If the file can not be read or parsed.
pub fn load_file(path: &Path) -> Result<TripleStore, LoadError> {
    let format = path
        .extension()
        .and_then(|ext| RdfFormat::from_extension(&ext.to_string_lossy()))
        .unwrap_or(RdfFormat::Turtle);
    let base = Url::from_file_path(fs::canonicalize(path)?)
        .map(String::from)
        .ok();
    tracing::debug!("Parsing '{}' as {format} ...", path.display());
    let reader = BufReader::new(File::open(path)?);
    parse(reader, format, base.as_deref())
}

/// Fetches and loads a remote ontology,
/// bypassing any caches on the way.
///
/// # Errors
///
/// If the request fails, or the response can not be parsed.
pub fn load_uri(uri: &Url) -> Result<TripleStore, LoadError> {
    let response = reqwest::blocking::Client::new()
        .get(uri.as_str())
        .header(ACCEPT, ACCEPT_RDF)
        .header(CACHE_CONTROL, "no-cache")
        .send()?
        .error_for_status()?;
    let format = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .and_then(RdfFormat::from_media_type)
        .or_else(|| {
            Path::new(uri.path())
                .extension()
                .and_then(|ext| RdfFormat::from_extension(&ext.to_string_lossy()))
        })
        .unwrap_or(RdfFormat::Turtle);
    tracing::debug!("Parsing '{uri}' as {format} ...");
    let body = response.bytes()?;
    parse(body.as_ref(), format, Some(uri.as_str()))
}

/// Parses RDF into a fresh store,
/// merging all named graphs into one.
///
/// # Errors
///
/// If `base_iri` is not a valid IRI,
/// or the input is not valid RDF of the given format.
pub fn parse<R: Read>(
    input: R,
    format: RdfFormat,
    base_iri: Option<&str>,
) -> Result<TripleStore, LoadError> {
    let mut parser = RdfParser::from_format(format);
    if let Some(base) = base_iri {
        parser = parser
            .with_base_iri(base)
            .map_err(|source| LoadError::InvalidBaseIri {
                base: base.to_owned(),
                source,
            })?;
    }

    let mut store = TripleStore::new();
    for quad in parser.for_reader(input) {
        let quad = quad.map_err(|err| match err {
            RdfParseError::Io(io_err) => LoadError::Io(io_err),
            RdfParseError::Syntax(syntax_err) => LoadError::Syntax(syntax_err.to_string()),
        })?;
        store.insert(Triple::new(quad.subject, quad.predicate, quad.object));
    }
    tracing::debug!("Loaded {} triples.", store.len());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::vocab::rdf;
    use oxrdf::NamedNodeRef;

    #[test]
    fn turtle_is_parsed() {
        let ttl = r"
            @prefix ex: <http://ex.org/ns#> .
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            ex:A a owl:Class .
            ex:B a owl:Class .
        ";
        let store = parse(ttl.as_bytes(), RdfFormat::Turtle, None).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.contains(
            NamedNodeRef::new_unchecked("http://ex.org/ns#A"),
            rdf::TYPE,
            NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Class"),
        ));
    }

    #[test]
    fn relative_iris_resolve_against_the_base() {
        let ttl = "<A> a <B> .";
        let store = parse(ttl.as_bytes(), RdfFormat::Turtle, Some("http://ex.org/ns/")).unwrap();
        assert!(store.contains(
            NamedNodeRef::new_unchecked("http://ex.org/ns/A"),
            rdf::TYPE,
            NamedNodeRef::new_unchecked("http://ex.org/ns/B"),
        ));
    }

    #[test]
    fn syntax_errors_are_reported() {
        let err = parse("ex:A a".as_bytes(), RdfFormat::Turtle, None).unwrap_err();
        assert!(matches!(err, LoadError::Syntax(_)), "{err:?}");
    }

    #[test]
    fn files_are_loaded_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ont.nt");
        fs::write(
            &path,
            "<http://ex.org/a> <http://ex.org/p> \"x\" .\n",
        )
        .unwrap();
        let store = load_file(&path).unwrap();
        assert_eq!(store.len(), 1);
    }
}
