// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Turns class shapes into DTDL Interfaces.

use oxrdf::{NamedNode, Term};
use shacl2dtdl_iri::{local_name, mint, Dtmi};

use crate::error::Error;
use crate::graph::{AnnotationProperty, ClassShape, LangString, ShapeGraph, ShapeKind};
use crate::model::{
    ComponentContent, Content, Interface, LangMap, PropertyContent, RelationshipContent, Schema,
    MAX_DESCRIPTION_CHARS, MAX_DISPLAY_NAME_CHARS, MAX_EXTENDS,
};
use crate::property::{Property, PropertySet, PropertyType};
use crate::schema::SchemaSynthesizer;

pub const TAGS_NAME: &str = "tags";
pub const TAGS_DISPLAY_NAME: &str = "Tags";
pub const TAGS_DESCRIPTION: &str = "Brick tags associated with this interface.";

fn display_name(labels: &[LangString]) -> LangMap {
    LangMap::from_lang_strings(labels, MAX_DISPLAY_NAME_CHARS)
}

fn description(comments: &[LangString]) -> LangMap {
    LangMap::from_lang_strings(comments, MAX_DESCRIPTION_CHARS)
}

/// The contents every root Interface gets,
/// in place of a common super-interface.
#[must_use]
pub fn root_contents() -> [Content; 3] {
    [
        Content::Property(PropertyContent::writable("name", "name", Schema::STRING)),
        Content::Property(PropertyContent::writable(
            "externalIds",
            "External IDs",
            Schema::string_map("externalIdName", "externalIdValue"),
        )),
        Content::Property(PropertyContent::writable(
            "customTags",
            "Custom Tags",
            Schema::string_map("tagName", "tagValue"),
        )),
    ]
}

/// Synthesizes one Interface per class shape.
///
/// Holds no state between shapes,
/// so every Interface depends only on the graph and the settings.
pub struct Engine<'g> {
    graph: &'g ShapeGraph,
    ontology_source: Option<&'g str>,
    schemas: SchemaSynthesizer<'g>,
}

impl<'g> Engine<'g> {
    #[must_use]
    pub const fn new(graph: &'g ShapeGraph, ontology_source: Option<&'g str>) -> Self {
        Self {
            graph,
            ontology_source,
            schemas: SchemaSynthesizer::new(graph),
        }
    }

    /// Mints the DTMI of a class.
    ///
    /// # Errors
    ///
    /// If the namespace of `iri` is not a valid IRI.
    pub fn mint(&self, iri: &NamedNode) -> Result<Dtmi, Error> {
        Ok(mint(iri.as_str(), self.ontology_source)?)
    }

    /// Synthesizes the (unsorted) Interface of a class shape.
    ///
    /// # Errors
    ///
    /// If the DTMI of the shape or of one of its super-classes can not be minted.
    pub fn interface(&self, shape: &ClassShape) -> Result<Interface, Error> {
        let mut interface = Interface::new(self.mint(&shape.iri)?);
        interface.display_name = display_name(&shape.labels);
        interface.description = description(&shape.comments);

        let named_superclasses = self.graph.named_superclasses(shape);
        if named_superclasses.is_empty() {
            interface.contents.extend(root_contents());
        } else {
            if named_superclasses.len() > MAX_EXTENDS {
                tracing::debug!(
                    "'{}' has {} super-classes; only extending the first {MAX_EXTENDS}",
                    shape.iri,
                    named_superclasses.len()
                );
            }
            for superclass in named_superclasses.into_iter().take(MAX_EXTENDS) {
                interface.extends.push(self.mint(&superclass.iri)?);
            }
        }

        if let Some(tags) = self.tags(shape) {
            interface.contents.push(tags);
        }

        for property in self.properties(shape) {
            if self.is_inherited(shape, property.name()) {
                tracing::debug!(
                    "Skipping '{}' on '{}'; it is defined on an ancestor",
                    property.name(),
                    shape.iri
                );
                continue;
            }
            if property
                .target
                .as_ref()
                .is_some_and(|target| self.graph.is_deprecated(target.as_ref().into()))
            {
                tracing::debug!(
                    "Skipping '{}' on '{}'; its target is deprecated",
                    property.name(),
                    shape.iri
                );
                continue;
            }
            match self.content(&property) {
                Ok(content) => interface.contents.push(content),
                Err(err) => tracing::warn!(
                    "Skipping property '{}' of '{}': {err}",
                    property.predicate,
                    shape.iri
                ),
            }
        }

        Ok(interface)
    }

    /// The read-only list of Brick tags,
    /// unless the direct sub-classes carry tags themselves.
    fn tags(&self, shape: &ClassShape) -> Option<Content> {
        if shape.tags.is_empty() {
            return None;
        }
        if self
            .graph
            .direct_sub_shapes(shape)
            .iter()
            .any(|sub| !sub.tags.is_empty())
        {
            return None;
        }
        Some(Content::Property(PropertyContent {
            name: TAGS_NAME.to_owned(),
            display_name: LangMap::english(TAGS_DISPLAY_NAME),
            description: LangMap::english(TAGS_DESCRIPTION),
            schema: Schema::Array {
                element: Box::new(Schema::STRING),
            },
            writable: false,
            initial_values: shape
                .tags
                .iter()
                .map(|tag| local_name(tag.as_str()).to_owned())
                .collect(),
        }))
    }

    /// The properties of the shape itself, deduplicated;
    /// those from property shapes come first.
    fn properties(&self, shape: &ClassShape) -> PropertySet {
        let mut properties = PropertySet::new();
        for property_shape in &shape.property_shapes {
            match Property::from_property_shape(self.graph, property_shape) {
                Ok(property) => {
                    properties.insert(property);
                }
                Err(err) => tracing::warn!("Skipping a property of '{}': {err}", shape.iri),
            }
        }
        for domain_property in self.graph.domain_properties(shape) {
            match Property::from_ontology_property(self.graph, domain_property) {
                Ok(property) => {
                    properties.insert(property);
                }
                Err(err) => tracing::warn!("Skipping a property of '{}': {err}", shape.iri),
            }
        }
        properties
    }

    /// Whether a property of the given name is defined on any ancestor.
    fn is_inherited(&self, shape: &ClassShape, name: &str) -> bool {
        self.graph.super_shapes(shape).into_iter().any(|ancestor| {
            self.graph
                .property_shape_paths(ancestor)
                .any(|path| local_name(path.as_str()) == name)
                || self
                    .graph
                    .domain_properties(ancestor)
                    .into_iter()
                    .any(|property| {
                        matches!(property, Term::NamedNode(predicate)
                            if local_name(predicate.as_str()) == name)
                    })
        })
    }

    fn content(&self, property: &Property) -> Result<Content, Error> {
        let target_kind = property
            .target
            .as_ref()
            .and_then(|target| self.graph.shape(target))
            .map(|target| target.kind);
        let is_embedded_value = matches!(
            target_kind,
            Some(ShapeKind::ValueShape | ShapeKind::SelfTyped | ShapeKind::EnumerationRoot)
        );

        if property.typ == PropertyType::Data || is_embedded_value {
            return Ok(Content::Property(PropertyContent {
                name: property.name().to_owned(),
                display_name: display_name(&property.labels),
                description: description(&property.comments),
                schema: self.schemas.for_property(property),
                writable: true,
                initial_values: Vec::new(),
            }));
        }

        if let (Some(ShapeKind::Component), Some(target)) = (target_kind, &property.target) {
            return Ok(Content::Component(ComponentContent {
                name: property.name().to_owned(),
                display_name: display_name(&property.labels),
                description: description(&property.comments),
                schema: self.mint(target)?,
            }));
        }

        Ok(Content::Relationship(RelationshipContent {
            name: property.name().to_owned(),
            display_name: display_name(&property.labels),
            description: description(&property.comments),
            target: property
                .target
                .as_ref()
                .map(|target| self.mint(target))
                .transpose()?,
            max_multiplicity: property.max_count,
            writable: true,
            properties: self
                .graph
                .annotation_properties_on(property.predicate.as_ref())
                .map(|annotation| self.annotation(annotation))
                .collect(),
        }))
    }

    /// A property nested in a relationship,
    /// describing the relationship itself.
    fn annotation(&self, annotation: &AnnotationProperty) -> PropertyContent {
        let subject = annotation.iri.as_ref().into();
        let schema = annotation
            .ranges
            .first()
            .map_or(Schema::STRING, |range| self.schemas.for_range(range.as_ref()));
        PropertyContent {
            name: local_name(annotation.iri.as_str())
                .chars()
                .take(MAX_DISPLAY_NAME_CHARS)
                .collect(),
            display_name: display_name(&self.graph.labels(subject)),
            description: description(&self.graph.comments(subject)),
            schema,
            writable: true,
            initial_values: Vec::new(),
        }
    }
}
