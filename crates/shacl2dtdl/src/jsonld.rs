// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Serializes Interfaces to compacted DTDL JSON-LD.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use oxrdf::NamedNodeRef;
use regex::Regex;
use serde_json::{json, Map, Value};
use shacl2dtdl_vocab::dtdl;

use crate::error::Error;
use crate::model::{Content, Field, Interface, LangMap, PropertyContent, Schema};

/// The DTDL v3 context, mapping reserved IRIs to their terms.
pub const DTDL_CONTEXT: &str = include_str!("../resources/dtdl.v3.context.json");

/// A fully qualified, reserved DTDL identifier used as a JSON object key.
pub static RESERVED_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""dtmi:dtdl:[A-Za-z0-9]*:([A-Za-z0-9]*);3":"#).unwrap());

const CONTAINER_LANGUAGE: &str = "@language";

/// The term definitions of a JSON-LD context,
/// as far as they are needed for compaction.
#[derive(Clone, Debug, Default)]
pub struct Context {
    iri_to_term: HashMap<String, String>,
    language_maps: HashSet<String>,
}

impl Context {
    /// The embedded DTDL v3 context.
    ///
    /// # Errors
    ///
    /// If the embedded document is not a valid context.
    pub fn dtdl() -> Result<Self, Error> {
        Self::parse(DTDL_CONTEXT)
    }

    /// Reads the term definitions of a JSON-LD context document.
    ///
    /// # Errors
    ///
    /// If the document is not JSON,
    /// or has no `@context` object.
    pub fn parse(document: &str) -> Result<Self, Error> {
        let document: Value =
            serde_json::from_str(document).map_err(|err| Error::MissingContext(err.to_string()))?;
        let definitions = document
            .get("@context")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::MissingContext("no '@context' object".to_owned()))?;

        let mut context = Self::default();
        for (term, definition) in definitions {
            if term.starts_with('@') {
                continue;
            }
            let iri = match definition {
                Value::String(iri) => Some(iri.as_str()),
                Value::Object(expanded) => expanded.get("@id").and_then(Value::as_str),
                _ => None,
            };
            let Some(iri) = iri else {
                tracing::debug!("Ignoring context term '{term}' without an IRI");
                continue;
            };
            if definition.get("@container").and_then(Value::as_str) == Some(CONTAINER_LANGUAGE) {
                context.language_maps.insert(iri.to_owned());
            }
            context.iri_to_term.insert(iri.to_owned(), term.clone());
        }
        if context.iri_to_term.is_empty() {
            return Err(Error::MissingContext("no term definitions".to_owned()));
        }
        Ok(context)
    }

    /// The term for an IRI,
    /// or the IRI itself if the context does not define one.
    #[must_use]
    pub fn compact<'a>(&'a self, iri: &'a str) -> &'a str {
        self.iri_to_term.get(iri).map_or(iri, String::as_str)
    }

    /// Whether the values of this IRI are written as language maps.
    #[must_use]
    pub fn is_language_map(&self, iri: &str) -> bool {
        self.language_maps.contains(iri)
    }
}

/// Replaces fully qualified reserved keys with their local name,
/// e.g. `"dtmi:dtdl:property:initialValue;3":` with `"initialValue":`.
#[must_use]
pub fn compact_reserved_keys(document: &str) -> Cow<'_, str> {
    RESERVED_KEY.replace_all(document, r#""$1":"#)
}

struct Renderer<'c> {
    context: &'c Context,
}

impl Renderer<'_> {
    fn key(&self, iri: NamedNodeRef<'_>) -> String {
        self.context.compact(iri.as_str()).to_owned()
    }

    fn term(&self, iri: NamedNodeRef<'_>) -> Value {
        Value::String(self.key(iri))
    }

    fn insert_texts(&self, object: &mut Map<String, Value>, iri: NamedNodeRef<'_>, texts: &LangMap) {
        if texts.is_empty() {
            return;
        }
        let value = if self.context.is_language_map(iri.as_str()) {
            Value::Object(
                texts
                    .iter()
                    .map(|(language, text)| (language.to_owned(), Value::from(text)))
                    .collect(),
            )
        } else {
            texts
                .get(crate::model::DEFAULT_LANGUAGE)
                .or_else(|| texts.iter().next().map(|(_, text)| text))
                .map_or(Value::Null, Value::from)
        };
        object.insert(self.key(iri), value);
    }

    fn interface(&self, interface: &Interface) -> Value {
        let mut object = Map::new();
        object.insert("@context".to_owned(), json!([dtdl::CONTEXT, dtdl::INITIALIZATION_CONTEXT]));
        object.insert("@id".to_owned(), Value::from(interface.id.as_str()));
        object.insert("@type".to_owned(), self.term(dtdl::INTERFACE));
        self.insert_texts(&mut object, dtdl::DISPLAY_NAME, &interface.display_name);
        self.insert_texts(&mut object, dtdl::DESCRIPTION, &interface.description);
        if !interface.extends.is_empty() {
            object.insert(
                self.key(dtdl::EXTENDS),
                interface.extends.iter().map(|dtmi| Value::from(dtmi.as_str())).collect(),
            );
        }
        object.insert(
            self.key(dtdl::CONTENTS),
            interface.contents.iter().map(|content| self.content(content)).collect(),
        );
        Value::Object(object)
    }

    fn named(&self, typ: Value, name: &str, display_name: &LangMap, description: &LangMap) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert("@type".to_owned(), typ);
        object.insert(self.key(dtdl::NAME), Value::from(name));
        self.insert_texts(&mut object, dtdl::DISPLAY_NAME, display_name);
        self.insert_texts(&mut object, dtdl::DESCRIPTION, description);
        object
    }

    fn property(&self, property: &PropertyContent) -> Value {
        let typ = if property.initial_values.is_empty() {
            self.term(dtdl::PROPERTY)
        } else {
            json!([self.key(dtdl::PROPERTY), self.key(dtdl::INITIALIZED)])
        };
        let mut object = self.named(typ, &property.name, &property.display_name, &property.description);
        object.insert(self.key(dtdl::SCHEMA), self.schema(&property.schema));
        object.insert(self.key(dtdl::WRITABLE), Value::from(property.writable));
        if !property.initial_values.is_empty() {
            object.insert(self.key(dtdl::INITIAL_VALUE), json!(property.initial_values));
        }
        Value::Object(object)
    }

    fn content(&self, content: &Content) -> Value {
        match content {
            Content::Property(property) => self.property(property),
            Content::Relationship(relationship) => {
                let mut object = self.named(
                    self.term(dtdl::RELATIONSHIP),
                    &relationship.name,
                    &relationship.display_name,
                    &relationship.description,
                );
                if let Some(target) = &relationship.target {
                    object.insert(self.key(dtdl::TARGET), Value::from(target.as_str()));
                }
                if let Some(max) = relationship.max_multiplicity {
                    object.insert(self.key(dtdl::MAX_MULTIPLICITY), Value::from(max));
                }
                object.insert(self.key(dtdl::WRITABLE), Value::from(relationship.writable));
                if !relationship.properties.is_empty() {
                    object.insert(
                        self.key(dtdl::PROPERTIES),
                        relationship.properties.iter().map(|property| self.property(property)).collect(),
                    );
                }
                Value::Object(object)
            }
            Content::Component(component) => {
                let mut object = self.named(
                    self.term(dtdl::COMPONENT),
                    &component.name,
                    &component.display_name,
                    &component.description,
                );
                object.insert(self.key(dtdl::SCHEMA), Value::from(component.schema.as_str()));
                Value::Object(object)
            }
        }
    }

    fn field(&self, field: &Field) -> Value {
        let mut object = Map::new();
        object.insert(self.key(dtdl::NAME), Value::from(field.name.as_str()));
        object.insert(self.key(dtdl::SCHEMA), self.schema(&field.schema));
        Value::Object(object)
    }

    fn schema(&self, schema: &Schema) -> Value {
        let mut object = Map::new();
        match schema {
            Schema::Primitive(primitive) => return self.term(primitive.iri()),
            Schema::Enum {
                value_schema,
                values,
            } => {
                object.insert("@type".to_owned(), self.term(dtdl::ENUM));
                object.insert(self.key(dtdl::VALUE_SCHEMA), self.term(value_schema.iri()));
                object.insert(
                    self.key(dtdl::ENUM_VALUES),
                    values
                        .iter()
                        .map(|value| {
                            let mut member = Map::new();
                            member.insert(self.key(dtdl::NAME), Value::from(value.name.as_str()));
                            member.insert(self.key(dtdl::ENUM_VALUE_VALUE), Value::from(value.value.as_str()));
                            Value::Object(member)
                        })
                        .collect(),
                );
            }
            Schema::Object { fields } => {
                object.insert("@type".to_owned(), self.term(dtdl::OBJECT));
                object.insert(
                    self.key(dtdl::FIELDS),
                    fields.iter().map(|field| self.field(field)).collect(),
                );
            }
            Schema::Map { key, value } => {
                object.insert("@type".to_owned(), self.term(dtdl::MAP));
                object.insert(self.key(dtdl::MAP_KEY), self.field(key));
                object.insert(self.key(dtdl::MAP_VALUE), self.field(value));
            }
            Schema::Array { element } => {
                object.insert("@type".to_owned(), self.term(dtdl::ARRAY));
                object.insert(self.key(dtdl::ELEMENT_SCHEMA), self.schema(element));
            }
        }
        Value::Object(object)
    }
}

/// The Interface as a JSON-LD document,
/// with all keys and terms known to the context compacted.
#[must_use]
pub fn to_json_ld(interface: &Interface, context: &Context) -> Value {
    Renderer { context }.interface(interface)
}

/// Renders the final, pretty-printed document of an Interface.
///
/// # Errors
///
/// If (re-)serialization fails.
pub fn render(interface: &Interface, context: &Context) -> Result<String, Error> {
    let document = serde_json::to_string_pretty(&to_json_ld(interface, context))?;
    let compacted = compact_reserved_keys(&document);
    let reparsed: Value = serde_json::from_str(&compacted)?;
    Ok(serde_json::to_string_pretty(&reparsed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumValue, Primitive, RelationshipContent};
    use pretty_assertions::assert_eq;

    fn dtmi(local: &str) -> shacl2dtdl_iri::Dtmi {
        shacl2dtdl_iri::mint(&format!("http://ex.org/ns#{local}"), None).unwrap()
    }

    #[test]
    fn embedded_context_is_valid() {
        let context = Context::dtdl().unwrap();
        assert_eq!(context.compact(dtdl::DISPLAY_NAME.as_str()), "displayName");
        assert_eq!(context.compact(dtdl::STRING.as_str()), "string");
        assert_eq!(
            context.compact(dtdl::INITIAL_VALUE.as_str()),
            dtdl::INITIAL_VALUE.as_str()
        );
        assert!(context.is_language_map(dtdl::DESCRIPTION.as_str()));
        assert!(!context.is_language_map(dtdl::NAME.as_str()));
    }

    #[test]
    fn invalid_contexts_are_rejected() {
        assert!(matches!(Context::parse("{"), Err(Error::MissingContext(_))));
        assert!(matches!(Context::parse("{}"), Err(Error::MissingContext(_))));
        assert!(matches!(
            Context::parse(r#"{"@context": {"@version": 1.1}}"#),
            Err(Error::MissingContext(_))
        ));
    }

    #[test]
    fn reserved_keys_are_compacted() {
        let doc = r#"{"dtmi:dtdl:property:initialValue;3": ["a"], "x": "dtmi:dtdl:class:Enum;3"}"#;
        assert_eq!(
            compact_reserved_keys(doc),
            r#"{"initialValue": ["a"], "x": "dtmi:dtdl:class:Enum;3"}"#
        );
    }

    #[test]
    fn interfaces_render_compacted() {
        let mut interface = Interface::new(dtmi("Pump"));
        interface.display_name = LangMap::english("Pump");
        interface.extends.push(dtmi("Equipment"));
        interface.contents.push(Content::Property(PropertyContent {
            name: "tags".to_owned(),
            display_name: LangMap::english("Tags"),
            description: LangMap::default(),
            schema: Schema::Array {
                element: Box::new(Schema::STRING),
            },
            writable: false,
            initial_values: vec!["Pump".to_owned()],
        }));
        interface.contents.push(Content::Property(PropertyContent::writable(
            "mode",
            "mode",
            Schema::Enum {
                value_schema: Primitive::String,
                values: vec![EnumValue {
                    name: "Auto".to_owned(),
                    value: "Auto".to_owned(),
                }],
            },
        )));
        interface.contents.push(Content::Relationship(RelationshipContent {
            name: "feeds".to_owned(),
            display_name: LangMap::default(),
            description: LangMap::default(),
            target: Some(dtmi("Equipment")),
            max_multiplicity: Some(1),
            writable: true,
            properties: Vec::new(),
        }));

        let rendered: Value =
            serde_json::from_str(&render(&interface, &Context::dtdl().unwrap()).unwrap()).unwrap();
        assert_eq!(
            rendered,
            json!({
                "@context": ["dtmi:dtdl:context;3", "dtmi:dtdl:extension:initialization;1"],
                "@id": "dtmi:org:ex:ns:Pump;1",
                "@type": "Interface",
                "displayName": { "en": "Pump" },
                "extends": ["dtmi:org:ex:ns:Equipment;1"],
                "contents": [
                    {
                        "@type": ["Property", "Initialized"],
                        "name": "tags",
                        "displayName": { "en": "Tags" },
                        "schema": { "@type": "Array", "elementSchema": "string" },
                        "writable": false,
                        "initialValue": ["Pump"]
                    },
                    {
                        "@type": "Property",
                        "name": "mode",
                        "displayName": { "en": "mode" },
                        "schema": {
                            "@type": "Enum",
                            "valueSchema": "string",
                            "enumValues": [{ "name": "Auto", "enumValue": "Auto" }]
                        },
                        "writable": true
                    },
                    {
                        "@type": "Relationship",
                        "name": "feeds",
                        "target": "dtmi:org:ex:ns:Equipment;1",
                        "maxMultiplicity": 1,
                        "writable": true
                    }
                ]
            })
        );
    }
}
