// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;
use std::fmt;

use oxrdf::{NamedNode, NamedNodeRef, Term, TermRef};
use shacl2dtdl_iri::{local_name, sanitize_segment};

use crate::graph::{ClassShape, ShapeGraph, ShapeKind};
use crate::model::{EnumValue, Field, Primitive, Schema};
use crate::property::{option_strings, Property, PropertySet};

/// Datatypes, by local name, that map to something other than a string.
const PRIMITIVES: [(&str, Primitive); 13] = [
    ("boolean", Primitive::Boolean),
    ("byte", Primitive::Integer),
    ("date", Primitive::Date),
    ("dateTime", Primitive::DateTime),
    ("dateTimeStamp", Primitive::DateTime),
    ("double", Primitive::Double),
    ("duration", Primitive::Duration),
    ("float", Primitive::Float),
    ("int", Primitive::Integer),
    ("integer", Primitive::Integer),
    ("long", Primitive::Long),
    ("string", Primitive::String),
    ("Polygon", Primitive::Polygon),
];

/// The primitive schema of a datatype, looked up by its local name.
#[must_use]
pub fn primitive_for(datatype: NamedNodeRef<'_>) -> Option<Primitive> {
    let name = local_name(datatype.as_str());
    PRIMITIVES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, primitive)| *primitive)
}

/// An enumeration option that did not make it into an `Enum` schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnumWarning {
    /// Nothing is left of the option after sanitization.
    Empty { raw: String },
    /// The option sanitizes to the name of an earlier one.
    Collision { raw: String, name: String },
}

impl fmt::Display for EnumWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { raw } => write!(f, "Enum option '{raw}' is empty after sanitization"),
            Self::Collision { raw, name } => write!(
                f,
                "Enum option '{raw}' sanitizes to '{name}', which is already taken"
            ),
        }
    }
}

/// Builds a string-backed `Enum` from raw option texts.
///
/// Names and values are sanitized like DTMI segments.
/// Options that end up empty or duplicate are left out,
/// and reported in the returned warnings.
#[must_use]
pub fn enum_schema<I>(options: I) -> (Schema, Vec<EnumWarning>)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut names = HashSet::new();
    let mut values = Vec::new();
    let mut warnings = Vec::new();
    for option in options {
        let raw = option.as_ref();
        let name = sanitize_segment(raw);
        if name.is_empty() {
            warnings.push(EnumWarning::Empty {
                raw: raw.to_owned(),
            });
        } else if !names.insert(name.clone()) {
            warnings.push(EnumWarning::Collision {
                raw: raw.to_owned(),
                name,
            });
        } else {
            values.push(EnumValue {
                value: name.clone(),
                name,
            });
        }
    }
    (
        Schema::Enum {
            value_schema: Primitive::String,
            values,
        },
        warnings,
    )
}

fn enumeration<I>(options: I) -> Schema
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let (schema, warnings) = enum_schema(options);
    for warning in warnings {
        tracing::warn!("{warning}");
    }
    schema
}

/// Derives DTDL schemas from datatypes, enumerations and value shapes.
pub struct SchemaSynthesizer<'g> {
    graph: &'g ShapeGraph,
}

impl<'g> SchemaSynthesizer<'g> {
    #[must_use]
    pub const fn new(graph: &'g ShapeGraph) -> Self {
        Self { graph }
    }

    /// The schema of the values of a property.
    ///
    /// An explicit list of options wins over the target;
    /// without either, the values are strings.
    #[must_use]
    pub fn for_property(&self, property: &Property) -> Schema {
        self.property_schema(property, &mut Vec::new())
    }

    /// The schema of the values of a range (datatype or class).
    #[must_use]
    pub fn for_range(&self, range: TermRef<'_>) -> Schema {
        self.range_schema(range, &mut Vec::new())
    }

    fn property_schema(&self, property: &Property, visiting: &mut Vec<NamedNode>) -> Schema {
        if !property.options.is_empty() {
            return enumeration(property.option_strings());
        }
        property.target.as_ref().map_or(Schema::STRING, |target| {
            self.range_schema(target.as_ref().into(), visiting)
        })
    }

    fn range_schema(&self, range: TermRef<'_>, visiting: &mut Vec<NamedNode>) -> Schema {
        if let TermRef::NamedNode(datatype) = range {
            if let Some(primitive) = primitive_for(datatype) {
                return Schema::Primitive(primitive);
            }
        }
        if let Some(values) = self.graph.enumeration_values(range) {
            return enumeration(option_strings(values.into_iter().map(Term::as_ref)));
        }
        if let TermRef::NamedNode(node) = range {
            if let Some(shape) = self.graph.shape(&node.into_owned()) {
                if shape.kind == ShapeKind::ValueShape {
                    return self.value_shape(shape, visiting);
                }
                if shape.kind.is_enumeration() {
                    return enumeration(self.graph.enumeration_members(shape));
                }
            }
        }
        tracing::debug!("No specific schema for range '{range}', using string");
        Schema::STRING
    }

    /// Collapses a value shape: no properties make a string,
    /// a single one makes that property's schema,
    /// more make an object with one field each.
    fn value_shape(&self, shape: &ClassShape, visiting: &mut Vec<NamedNode>) -> Schema {
        if visiting.contains(&shape.iri) {
            tracing::warn!("Value shape '{}' contains itself, using string", shape.iri);
            return Schema::STRING;
        }
        visiting.push(shape.iri.clone());

        let mut properties = PropertySet::new();
        for property_shape in &shape.property_shapes {
            match Property::from_property_shape(self.graph, property_shape) {
                Ok(property) => {
                    properties.insert(property);
                }
                Err(err) => tracing::warn!("Skipping property of value shape '{}': {err}", shape.iri),
            }
        }
        let schema = if properties.len() > 1 {
            Schema::Object {
                fields: properties
                    .iter()
                    .map(|property| {
                        Field::new(property.name(), self.property_schema(property, visiting))
                    })
                    .collect(),
            }
        } else {
            properties
                .iter()
                .next()
                .map_or(Schema::STRING, |property| self.property_schema(property, visiting))
        };

        visiting.pop();
        schema
    }
}
