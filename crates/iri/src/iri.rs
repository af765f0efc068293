// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Splits an IRI into its namespace (including the trailing delimiter)
/// and its local name.
///
/// The delimiter is the fragment marker `#` if present,
/// else the last `/`, else the last `:`.
///
/// # Examples
///
/// - `https://brickschema.org/schema/Brick#AHU` -> \
///   (`https://brickschema.org/schema/Brick#`, `AHU`)
/// - `http://qudt.org/vocab/unit/DEG_C` -> \
///   (`http://qudt.org/vocab/unit/`, `DEG_C`)
/// - `urn:ex:Thing` -> \
///   (`urn:ex:`, `Thing`)
#[must_use]
pub fn split(iri: &str) -> (&str, &str) {
    let delim_pos = iri
        .find('#')
        .or_else(|| iri.rfind('/'))
        .or_else(|| iri.rfind(':'));
    delim_pos.map_or(("", iri), |pos| iri.split_at(pos + 1))
}

/// The local name of an IRI, see [`split`].
#[must_use]
pub fn local_name(iri: &str) -> &str {
    split(iri).1
}

/// The namespace of an IRI, see [`split`].
#[must_use]
pub fn namespace(iri: &str) -> &str {
    split(iri).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_wins_over_slash() {
        assert_eq!(
            split("https://brickschema.org/schema/Brick#AHU"),
            ("https://brickschema.org/schema/Brick#", "AHU")
        );
        assert_eq!(local_name("https://ex.org/a/b#c/d"), "c/d");
    }

    #[test]
    fn slash_and_colon_fallbacks() {
        assert_eq!(
            split("http://qudt.org/vocab/unit/DEG_C"),
            ("http://qudt.org/vocab/unit/", "DEG_C")
        );
        assert_eq!(namespace("urn:ex:Thing"), "urn:ex:");
        assert_eq!(split("plain"), ("", "plain"));
    }
}
