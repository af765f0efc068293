// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;

use oxrdf::{NamedNode, Term, TermRef};
use shacl2dtdl_iri::local_name;
use shacl2dtdl_vocab::basics::is_xsd;
use shacl2dtdl_vocab::{owl, sh};

use crate::error::PropertyError;
use crate::graph::{LangString, ShapeGraph};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyType {
    /// The values are literals.
    Data,
    /// The values are resources.
    Object,
}

/// One predicate as used on a class shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub predicate: NamedNode,
    pub labels: Vec<LangString>,
    pub comments: Vec<LangString>,
    pub typ: PropertyType,
    /// A datatype or class, if known
    pub target: Option<NamedNode>,
    /// The allowed values, if they are restricted to a fixed list
    pub options: Vec<Term>,
    pub min_count: Option<u64>,
    pub max_count: Option<u64>,
}

fn named(term: Option<&Term>) -> Option<&NamedNode> {
    if let Some(Term::NamedNode(node)) = term {
        Some(node)
    } else {
        None
    }
}

fn count(term: Option<&Term>) -> Option<u64> {
    if let Some(Term::Literal(literal)) = term {
        literal.value().trim().parse().ok()
    } else {
        None
    }
}

impl Property {
    /// The name of the DTDL content, which is also the deduplication key.
    #[must_use]
    pub fn name(&self) -> &str {
        local_name(self.predicate.as_str())
    }

    /// Resolves a SHACL property shape.
    ///
    /// Names and descriptions given on the shape
    /// take precedence over the labels and comments of the predicate.
    ///
    /// # Errors
    ///
    /// If the shape has no `sh:path`,
    /// or if the path is anything but a single predicate.
    pub fn from_property_shape(graph: &ShapeGraph, shape: &Term) -> Result<Self, PropertyError> {
        let store = graph.store();
        let subject = shape.as_ref();
        let path = store
            .object(subject, sh::PATH)
            .ok_or_else(|| PropertyError::MissingPath {
                shape: shape.to_string(),
            })?;
        let Term::NamedNode(predicate) = path else {
            return Err(PropertyError::UnsupportedPathKind {
                shape: shape.to_string(),
                path: path.to_string(),
            });
        };

        let mut labels = graph.lang_strings(subject, sh::NAME);
        if labels.is_empty() {
            labels = graph.labels(predicate.as_ref().into());
        }
        let mut comments = graph.lang_strings(subject, sh::DESCRIPTION);
        if comments.is_empty() {
            comments = graph.comments(predicate.as_ref().into());
        }

        let datatype = named(store.object(subject, sh::DATA_TYPE));
        let classes: Vec<&NamedNode> = store
            .objects(subject, sh::CLASS)
            .into_iter()
            .filter_map(|term| named(Some(term)))
            .collect();
        // a target is only known if it is unambiguous
        let class = if let [single] = classes.as_slice() {
            Some(*single)
        } else {
            None
        };
        let node_kind = named(store.object(subject, sh::NODE_KIND)).map(NamedNode::as_ref);
        let (typ, target) = if datatype.is_some() || node_kind == Some(sh::LITERAL) {
            (PropertyType::Data, datatype)
        } else if !classes.is_empty() || node_kind == Some(sh::IRI) {
            (PropertyType::Object, class)
        } else {
            (PropertyType::Object, None)
        };

        let options = store
            .object(subject, sh::IN)
            .map(|head| store.list(head.as_ref()).into_iter().cloned().collect())
            .unwrap_or_default();

        Ok(Self {
            predicate: predicate.clone(),
            labels,
            comments,
            typ,
            target: target.cloned(),
            options,
            min_count: count(store.object(subject, sh::MIN_COUNT)),
            max_count: count(store.object(subject, sh::MAX_COUNT)),
        })
    }

    /// Resolves a plain ontology property,
    /// one that names a class as its `rdfs:domain`.
    ///
    /// # Errors
    ///
    /// If `property` is not a named resource.
    pub fn from_ontology_property(
        graph: &ShapeGraph,
        property: &Term,
    ) -> Result<Self, PropertyError> {
        let Term::NamedNode(predicate) = property else {
            return Err(PropertyError::UnsupportedPathKind {
                shape: property.to_string(),
                path: property.to_string(),
            });
        };
        let store = graph.store();
        let subject = predicate.as_ref();

        let mut target = None;
        let mut options = Vec::new();
        if let [range] = store.objects(subject, oxrdf::vocab::rdfs::RANGE).as_slice() {
            target = named(Some(*range)).cloned();
            if let Some(values) = graph.enumeration_values((*range).as_ref()) {
                options = values.into_iter().cloned().collect();
            }
        }

        let types = graph.transitive_types(subject.into());
        let is_datatype_property = types
            .iter()
            .any(|typ| typ.as_ref() == owl::DATATYPE_PROPERTY);
        let has_xsd_range = target
            .as_ref()
            .is_some_and(|range| is_xsd(range.as_ref()));
        let typ = if is_datatype_property || has_xsd_range {
            PropertyType::Data
        } else {
            PropertyType::Object
        };
        let exactly_one = types
            .iter()
            .any(|typ| typ.as_ref() == owl::FUNCTIONAL_PROPERTY)
            .then_some(1);

        Ok(Self {
            predicate: predicate.clone(),
            labels: graph.labels(subject.into()),
            comments: graph.comments(subject.into()),
            typ,
            target,
            options,
            min_count: exactly_one,
            max_count: exactly_one,
        })
    }

    /// The values of [`Self::options`] as plain text:
    /// literal values, and the local names of resources.
    #[must_use]
    pub fn option_strings(&self) -> Vec<String> {
        option_strings(self.options.iter().map(Term::as_ref))
    }
}

/// Literal values, and the local names of named resources;
/// blank nodes are skipped.
pub fn option_strings<'a>(options: impl IntoIterator<Item = TermRef<'a>>) -> Vec<String> {
    options
        .into_iter()
        .filter_map(|option| match option {
            TermRef::Literal(literal) => Some(literal.value().to_owned()),
            TermRef::NamedNode(node) => Some(local_name(node.as_str()).to_owned()),
            _ => None,
        })
        .collect()
}

/// Properties deduplicated by their name,
/// ignoring case; the first one inserted wins.
#[derive(Clone, Debug, Default)]
pub struct PropertySet {
    properties: Vec<Property>,
    keys: HashSet<String>,
}

impl PropertySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the property, unless one of the same name is already contained.
    ///
    /// Returns whether it was added.
    pub fn insert(&mut self, property: Property) -> bool {
        if !self.keys.insert(property.name().to_lowercase()) {
            tracing::debug!("Skipping duplicate property '{}'", property.predicate);
            return false;
        }
        self.properties.push(property);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.properties.iter()
    }
}

impl IntoIterator for PropertySet {
    type Item = Property;
    type IntoIter = std::vec::IntoIter<Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IgnoreList;
    use crate::load::parse;
    use oxrdfio::RdfFormat;
    use pretty_assertions::assert_eq;

    fn graph(body: &str) -> ShapeGraph {
        let ttl = format!(
            r"
            @prefix ex: <http://ex.org/ns#> .
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            @prefix sh: <http://www.w3.org/ns/shacl#> .
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
            {body}
            "
        );
        let store = parse(ttl.as_bytes(), RdfFormat::Turtle, None).unwrap();
        ShapeGraph::new(store, &IgnoreList::default())
    }

    fn property_shapes(graph: &ShapeGraph) -> Vec<Result<Property, PropertyError>> {
        let shape = graph
            .shape(&NamedNode::new_unchecked("http://ex.org/ns#C"))
            .unwrap();
        shape
            .property_shapes
            .iter()
            .map(|property_shape| Property::from_property_shape(graph, property_shape))
            .collect()
    }

    #[test]
    fn shape_classification() {
        let graph = graph(
            r"
            ex:C a owl:Class, sh:NodeShape ;
                sh:property [ sh:path ex:height ; sh:datatype xsd:double ; sh:maxCount 1 ] ;
                sh:property [ sh:path ex:note ; sh:nodeKind sh:Literal ] ;
                sh:property [ sh:path ex:feeds ; sh:class ex:D ; sh:minCount 0 ] ;
                sh:property [ sh:path ex:link ; sh:nodeKind sh:IRI ] ;
                sh:property [ sh:path ex:other ] .
            ",
        );
        let props: Vec<Property> = property_shapes(&graph).into_iter().map(Result::unwrap).collect();
        let summary: Vec<(&str, PropertyType, Option<&str>)> = props
            .iter()
            .map(|prop| (prop.name(), prop.typ, prop.target.as_ref().map(NamedNode::as_str)))
            .collect();
        assert_eq!(
            summary,
            [
                ("height", PropertyType::Data, Some("http://www.w3.org/2001/XMLSchema#double")),
                ("note", PropertyType::Data, None),
                ("feeds", PropertyType::Object, Some("http://ex.org/ns#D")),
                ("link", PropertyType::Object, None),
                ("other", PropertyType::Object, None),
            ]
        );
        assert_eq!(props[0].max_count, Some(1));
        assert_eq!(props[2].min_count, Some(0));
        assert_eq!(props[2].max_count, None);
    }

    #[test]
    fn complex_paths_are_rejected() {
        let graph = graph(
            r"
            ex:C a owl:Class, sh:NodeShape ;
                sh:property [ sh:path ( ex:a ex:b ) ] ;
                sh:property [ sh:datatype xsd:string ] .
            ",
        );
        let results = property_shapes(&graph);
        assert!(matches!(results[0], Err(PropertyError::UnsupportedPathKind { .. })));
        assert!(matches!(results[1], Err(PropertyError::MissingPath { .. })));
    }

    #[test]
    fn shape_names_win_over_predicate_labels() {
        let graph = graph(
            r#"
            ex:height rdfs:label "Height (predicate)" ; rdfs:comment "How tall." .
            ex:C a owl:Class, sh:NodeShape ;
                sh:property [ sh:path ex:height ; sh:name "Height"@en ] .
            "#,
        );
        let prop = property_shapes(&graph).remove(0).unwrap();
        assert_eq!(prop.labels, [LangString::new("Height", Some("en"))]);
        assert_eq!(prop.comments, [LangString::new("How tall.", None)]);
    }

    #[test]
    fn options_come_from_sh_in() {
        let graph = graph(
            r#"
            ex:C a owl:Class, sh:NodeShape ;
                sh:property [ sh:path ex:mode ; sh:in ( "auto" ex:Manual "2nd" ) ] .
            "#,
        );
        let prop = property_shapes(&graph).remove(0).unwrap();
        assert_eq!(prop.option_strings(), ["auto", "Manual", "2nd"]);
    }

    #[test]
    fn ontology_properties() {
        let graph = graph(
            r"
            ex:C a owl:Class, sh:NodeShape .
            ex:serial a owl:DatatypeProperty, owl:FunctionalProperty ; rdfs:domain ex:C .
            ex:built rdfs:domain ex:C ; rdfs:range xsd:date .
            ex:partOf a owl:ObjectProperty ; rdfs:domain ex:C ; rdfs:range ex:C .
            ex:level rdfs:domain ex:C ; rdfs:range ex:Level .
            ex:Level owl:equivalentClass [ owl:oneOf ( ex:Low ex:High ) ] .
            ",
        );
        let shape = graph
            .shape(&NamedNode::new_unchecked("http://ex.org/ns#C"))
            .unwrap();
        let props: Vec<Property> = graph
            .domain_properties(shape)
            .into_iter()
            .map(|prop| Property::from_ontology_property(&graph, prop).unwrap())
            .collect();
        let names: Vec<&str> = props.iter().map(Property::name).collect();
        assert_eq!(names, ["serial", "built", "partOf", "level"]);

        assert_eq!(props[0].typ, PropertyType::Data);
        assert_eq!((props[0].min_count, props[0].max_count), (Some(1), Some(1)));
        assert_eq!(props[1].typ, PropertyType::Data);
        assert_eq!(props[2].typ, PropertyType::Object);
        assert_eq!(props[2].min_count, None);
        assert_eq!(props[3].option_strings(), ["Low", "High"]);
    }

    #[test]
    fn dedup_is_case_insensitive_and_first_wins() {
        let graph = graph(
            r"
            ex:C a owl:Class, sh:NodeShape ;
                sh:property [ sh:path ex:Height ; sh:datatype xsd:double ] ;
                sh:property [ sh:path ex:height ; sh:datatype xsd:string ] .
            ",
        );
        let mut set = PropertySet::new();
        for prop in property_shapes(&graph) {
            set.insert(prop.unwrap());
        }
        let first = set.iter().next().cloned().unwrap();
        assert!(!set.insert(first.clone()));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next(), Some(&first));
        assert_eq!(first.name(), "Height");
    }
}
