// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use once_cell::sync::Lazy;
use oxiri::{Iri, IriParseError};
use regex::Regex;

pub const DTMI_SCHEME: &str = "dtmi";
/// The version suffix of every minted DTMI.
pub const DTMI_VERSION: u32 = 1;

pub static NON_SEGMENT_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("The namespace '{namespace}' of '{resource}' is not a valid IRI: {source}")]
    InvalidNamespace {
        resource: String,
        namespace: String,
        source: IriParseError,
    },
}

/// A Digital Twin Model Identifier,
/// e.g. `dtmi:org:brickschema:schema:Brick:AHU;1`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dtmi(String);

impl Dtmi {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The colon separated segments between the scheme and the version.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        let body = self
            .0
            .strip_prefix(DTMI_SCHEME)
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(&self.0);
        let body = body.rsplit_once(';').map_or(body, |(segments, _version)| segments);
        body.split(':')
    }
}

impl fmt::Display for Dtmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Dtmi {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Sanitizes one colon-delimited DTMI segment:
/// drops every character that is not an ASCII alphanumeric or `_`,
/// then trims trailing underscores, then trims leading digits.
///
/// The same rule names enumeration members.
#[must_use]
pub fn sanitize_segment(segment: &str) -> String {
    let stripped = NON_SEGMENT_CHARS.replace_all(segment, "");
    stripped
        .trim_end_matches('_')
        .trim_start_matches(|chr: char| chr.is_ascii_digit())
        .to_owned()
}

fn host(authority: &str) -> &str {
    let without_user = authority
        .rsplit_once('@')
        .map_or(authority, |(_user, host)| host);
    // An IPv6 host contains colons itself; it ends with ']'.
    match without_user.rsplit_once(':') {
        Some((host, port)) if !port.contains(']') => host,
        _ => without_user,
    }
}

/// Mints the DTMI of the resource with the given IRI.
///
/// The namespace of the resource is split into
/// the reversed host labels followed by the path segments.
/// The last of these is the ontology name;
/// the ones before it, colon-joined, form the ontology source,
/// unless `ontology_source` overrides it.
/// The result is `dtmi:{ontologySource}:{ontologyName}:{localName};1`,
/// with every segment passed through [`sanitize_segment`].
/// Segments that end up empty are dropped.
///
/// This is a pure function:
/// the same arguments always produce the same DTMI.
///
/// # Errors
///
/// If the namespace part of `resource` is not a valid IRI.
pub fn mint(resource: &str, ontology_source: Option<&str>) -> Result<Dtmi, Error> {
    let (namespace, local_name) = crate::split(resource);
    let ns_iri = Iri::parse(namespace).map_err(|source| Error::InvalidNamespace {
        resource: resource.to_owned(),
        namespace: namespace.to_owned(),
        source,
    })?;

    let mut components: Vec<&str> = ns_iri
        .authority()
        .map(host)
        .map(|host_name| host_name.split('.').rev().collect())
        .unwrap_or_default();
    components.extend(ns_iri.path().trim_matches(['#', '/']).split('/'));
    components.retain(|component| !component.is_empty());

    let ontology_name = components.pop().unwrap_or_default();
    let ontology_source = ontology_source.map_or_else(|| components.join(":"), str::to_owned);

    let raw = format!("{ontology_source}:{ontology_name}:{local_name}");
    let segments: Vec<String> = raw
        .split(':')
        .map(sanitize_segment)
        .filter(|segment| !segment.is_empty())
        .collect();

    Ok(Dtmi(format!(
        "{DTMI_SCHEME}:{};{DTMI_VERSION}",
        segments.join(":")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mints_brick_style_identifiers() {
        let dtmi = mint("https://brickschema.org/schema/Brick#AHU", None).unwrap();
        assert_eq!(dtmi.as_str(), "dtmi:org:brickschema:schema:Brick:AHU;1");
    }

    #[test]
    fn slash_namespaces_use_the_last_path_segment_as_ontology_name() {
        let dtmi = mint("http://example.com/ont/building/Room", None).unwrap();
        assert_eq!(dtmi.as_str(), "dtmi:com:example:ont:building:Room;1");
    }

    #[test]
    fn override_replaces_the_derived_source() {
        let dtmi = mint(
            "https://brickschema.org/schema/Brick#AHU",
            Some("digitaltwins:my-org"),
        )
        .unwrap();
        assert_eq!(dtmi.as_str(), "dtmi:digitaltwins:myorg:Brick:AHU;1");
    }

    #[test]
    fn ports_and_user_info_are_not_part_of_the_host() {
        let dtmi = mint("http://user@example.org:8080/ns#X", None).unwrap();
        assert_eq!(dtmi.as_str(), "dtmi:org:example:ns:X;1");
    }

    #[test]
    fn minting_is_stable() {
        let iri = "https://w3id.org/rec/core/3.3/Building";
        assert_eq!(mint(iri, None).unwrap(), mint(iri, None).unwrap());
        assert_eq!(
            mint(iri, Some("x")).unwrap(),
            mint(iri, Some("x")).unwrap()
        );
    }

    #[test]
    fn sanitization_strips_and_trims() {
        assert_eq!(sanitize_segment("3.3"), "");
        assert_eq!(sanitize_segment("4th_Floor__"), "th_Floor");
        assert_eq!(sanitize_segment("my-org"), "myorg");
        assert_eq!(sanitize_segment("Air Handler (AHU)"), "AirHandlerAHU");
        assert_eq!(sanitize_segment("1_a"), "_a");
    }

    #[test]
    fn no_segment_has_a_leading_digit_or_trailing_underscore() {
        let iris = [
            "https://w3id.org/rec/core/3.3/Building",
            "http://example.com/9lives/_x_#2Floor_",
            "http://123.example.org/a-b/c_#Ä_1",
        ];
        for iri in iris {
            let dtmi = mint(iri, None).unwrap();
            for segment in dtmi.segments() {
                assert!(!segment.is_empty(), "{dtmi}");
                assert!(!segment.starts_with(|chr: char| chr.is_ascii_digit()), "{dtmi}");
                assert!(!segment.ends_with('_'), "{dtmi}");
            }
        }
    }

    #[test]
    fn version_numbers_in_the_path_are_dropped() {
        let dtmi = mint("https://w3id.org/rec/core/3.3/Building", None).unwrap();
        assert_eq!(dtmi.as_str(), "dtmi:org:w3id:rec:core:Building;1");
    }
}
