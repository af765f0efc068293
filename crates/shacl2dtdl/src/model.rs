// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The DTDL Interface model, as it gets serialized.

use std::collections::BTreeMap;

use oxrdf::NamedNodeRef;
use shacl2dtdl_iri::Dtmi;
use shacl2dtdl_vocab::dtdl;

use crate::graph::LangString;

pub const MAX_DISPLAY_NAME_CHARS: usize = 64;
pub const MAX_DESCRIPTION_CHARS: usize = 512;
/// DTDL allows no more than this many super-interfaces.
pub const MAX_EXTENDS: usize = 2;
pub const DEFAULT_LANGUAGE: &str = "en";

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Localized texts, one per language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LangMap(BTreeMap<String, String>);

impl LangMap {
    /// Texts without a language are filed under English;
    /// of multiple texts in the same language, the last one wins.
    #[must_use]
    pub fn from_lang_strings(strings: &[LangString], max_chars: usize) -> Self {
        let mut map = BTreeMap::new();
        for string in strings {
            let language = string
                .language
                .as_deref()
                .filter(|language| !language.is_empty())
                .unwrap_or(DEFAULT_LANGUAGE);
            map.insert(language.to_owned(), truncate(&string.value, max_chars));
        }
        Self(map)
    }

    #[must_use]
    pub fn english(text: &str) -> Self {
        Self(BTreeMap::from([(DEFAULT_LANGUAGE.to_owned(), text.to_owned())]))
    }

    #[must_use]
    pub fn get(&self, language: &str) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(language, text)| (language.as_str(), text.as_str()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Primitive {
    Boolean,
    Date,
    DateTime,
    Double,
    Duration,
    Float,
    Integer,
    Long,
    String,
    Polygon,
}

impl Primitive {
    #[must_use]
    pub const fn iri(self) -> NamedNodeRef<'static> {
        match self {
            Self::Boolean => dtdl::BOOLEAN,
            Self::Date => dtdl::DATE,
            Self::DateTime => dtdl::DATE_TIME,
            Self::Double => dtdl::DOUBLE,
            Self::Duration => dtdl::DURATION,
            Self::Float => dtdl::FLOAT,
            Self::Integer => dtdl::INTEGER,
            Self::Long => dtdl::LONG,
            Self::String => dtdl::STRING,
            Self::Polygon => dtdl::POLYGON,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Schema {
    Primitive(Primitive),
    Enum {
        value_schema: Primitive,
        values: Vec<EnumValue>,
    },
    Object {
        fields: Vec<Field>,
    },
    Map {
        key: Box<Field>,
        value: Box<Field>,
    },
    Array {
        element: Box<Schema>,
    },
}

impl Schema {
    pub const STRING: Self = Self::Primitive(Primitive::String);

    /// A map from string keys to string values.
    #[must_use]
    pub fn string_map(key_name: &str, value_name: &str) -> Self {
        Self::Map {
            key: Box::new(Field::new(key_name, Self::STRING)),
            value: Box::new(Field::new(value_name, Self::STRING)),
        }
    }

    /// Sorts all enumeration values by name, recursively.
    pub fn sort(&mut self) {
        match self {
            Self::Primitive(_) => {}
            Self::Enum { values, .. } => values.sort_by(|val_a, val_b| val_a.name.cmp(&val_b.name)),
            Self::Object { fields } => {
                for field in fields {
                    field.schema.sort();
                }
            }
            Self::Map { key, value } => {
                key.schema.sort();
                value.schema.sort();
            }
            Self::Array { element } => element.sort(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyContent {
    pub name: String,
    pub display_name: LangMap,
    pub description: LangMap,
    pub schema: Schema,
    pub writable: bool,
    /// Makes this an `Initialized` content, if not empty.
    pub initial_values: Vec<String>,
}

impl PropertyContent {
    /// A writable property with an English display name and no description.
    #[must_use]
    pub fn writable(name: &str, display_name: &str, schema: Schema) -> Self {
        Self {
            name: name.to_owned(),
            display_name: LangMap::english(display_name),
            description: LangMap::default(),
            schema,
            writable: true,
            initial_values: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationshipContent {
    pub name: String,
    pub display_name: LangMap,
    pub description: LangMap,
    pub target: Option<Dtmi>,
    pub max_multiplicity: Option<u64>,
    pub writable: bool,
    pub properties: Vec<PropertyContent>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentContent {
    pub name: String,
    pub display_name: LangMap,
    pub description: LangMap,
    pub schema: Dtmi,
}

/// The kinds of contents, ordered like their DTDL type names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentKind {
    Component,
    Property,
    Relationship,
}

impl ContentKind {
    #[must_use]
    pub const fn iri(self) -> NamedNodeRef<'static> {
        match self {
            Self::Component => dtdl::COMPONENT,
            Self::Property => dtdl::PROPERTY,
            Self::Relationship => dtdl::RELATIONSHIP,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Property(PropertyContent),
    Relationship(RelationshipContent),
    Component(ComponentContent),
}

impl Content {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Property(content) => &content.name,
            Self::Relationship(content) => &content.name,
            Self::Component(content) => &content.name,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::Property(_) => ContentKind::Property,
            Self::Relationship(_) => ContentKind::Relationship,
            Self::Component(_) => ContentKind::Component,
        }
    }

    fn sort(&mut self) {
        match self {
            Self::Property(content) => content.schema.sort(),
            Self::Relationship(content) => {
                for property in &mut content.properties {
                    property.schema.sort();
                }
            }
            Self::Component(_) => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interface {
    pub id: Dtmi,
    pub display_name: LangMap,
    pub description: LangMap,
    pub extends: Vec<Dtmi>,
    pub contents: Vec<Content>,
}

impl Interface {
    #[must_use]
    pub const fn new(id: Dtmi) -> Self {
        Self {
            id,
            display_name: LangMap(BTreeMap::new()),
            description: LangMap(BTreeMap::new()),
            extends: Vec::new(),
            contents: Vec::new(),
        }
    }

    #[must_use]
    pub fn content(&self, name: &str) -> Option<&Content> {
        self.contents.iter().find(|content| content.name() == name)
    }

    /// Brings the contents into their final order:
    /// by kind, then by name,
    /// with all enumeration values sorted by name.
    pub fn sort(&mut self) {
        for content in &mut self.contents {
            content.sort();
        }
        self.contents.sort_by(|content_a, content_b| {
            (content_a.kind(), content_a.name()).cmp(&(content_b.kind(), content_b.name()))
        });
    }
}
