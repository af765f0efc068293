// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! A read-only view of the class shapes within an ontology.

use std::collections::{HashMap, HashSet, VecDeque};

use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{NamedNode, NamedNodeRef, Term, TermRef};
use shacl2dtdl_iri::local_name;
use shacl2dtdl_vocab::{brick, owl, sh};

use crate::config::IgnoreList;
use crate::store::TripleStore;

/// Marks a class as being a DTDL Component when contained in one of its types.
const COMPONENT_TYPE_MARKER: &str = "dtmi:dtdl:class:Component";

/// A literal text, with its language tag, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LangString {
    pub value: String,
    pub language: Option<String>,
}

impl LangString {
    #[must_use]
    pub fn new(value: impl Into<String>, language: Option<&str>) -> Self {
        Self {
            value: value.into(),
            language: language.map(ToOwned::to_owned),
        }
    }
}

/// What a class shape is used for.
///
/// Computed once when the view is built.
/// If more than one applies, the first listed here wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// A node shape that only bundles the properties of an embedded value.
    ValueShape,
    /// A class that is an instance of itself.
    SelfTyped,
    /// A class whose instances (or those of its subclasses)
    /// are the members of an enumeration.
    EnumerationRoot,
    /// A class that is embedded as a DTDL Component.
    Component,
    Plain,
}

impl ShapeKind {
    /// Whether shapes of this kind only serve to describe the values of other shapes,
    /// and thus get no Interface of their own.
    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        matches!(self, Self::ValueShape | Self::SelfTyped | Self::EnumerationRoot)
    }

    #[must_use]
    pub const fn is_enumeration(self) -> bool {
        matches!(self, Self::SelfTyped | Self::EnumerationRoot)
    }
}

#[derive(Clone, Debug)]
pub struct ClassShape {
    pub iri: NamedNode,
    pub kind: ShapeKind,
    pub is_class: bool,
    pub is_node_shape: bool,
    pub deprecated: bool,
    pub ignored: bool,
    pub labels: Vec<LangString>,
    pub comments: Vec<LangString>,
    /// Named super-classes, except for the universal top classes
    pub direct_super_shapes: Vec<NamedNode>,
    pub direct_sub_shapes: Vec<NamedNode>,
    /// Objects of `sh:property`
    pub property_shapes: Vec<Term>,
    /// Objects of `brick:hasAssociatedTag`
    pub tags: Vec<NamedNode>,
}

impl ClassShape {
    #[must_use]
    pub fn local_name(&self) -> &str {
        local_name(self.iri.as_str())
    }

    /// Whether an Interface is generated for this shape.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.is_class
            && self.is_node_shape
            && !self.deprecated
            && !self.ignored
            && !self.kind.is_synthetic()
    }
}

/// An `owl:AnnotationProperty` declaration.
#[derive(Clone, Debug)]
pub struct AnnotationProperty {
    pub iri: NamedNode,
    pub domains: Vec<Term>,
    pub ranges: Vec<Term>,
}

pub struct ShapeGraph {
    store: TripleStore,
    shapes: Vec<ClassShape>,
    index: HashMap<NamedNode, usize>,
    annotation_properties: Vec<AnnotationProperty>,
}

fn named(term: &Term) -> Option<&NamedNode> {
    if let Term::NamedNode(node) = term {
        Some(node)
    } else {
        None
    }
}

fn is_top(node: &NamedNode) -> bool {
    node.as_ref() == owl::THING || node.as_ref() == rdfs::RESOURCE
}

fn is_true(term: &Term) -> bool {
    if let Term::Literal(literal) = term {
        matches!(literal.value().to_lowercase().as_str(), "true" | "1")
    } else {
        false
    }
}

fn supers(shape: &ClassShape) -> &[NamedNode] {
    &shape.direct_super_shapes
}

fn subs(shape: &ClassShape) -> &[NamedNode] {
    &shape.direct_sub_shapes
}

impl ShapeGraph {
    /// Discovers all known shapes and classifies them.
    #[must_use]
    pub fn new(store: TripleStore, ignore: &IgnoreList) -> Self {
        let candidates = Self::discover(&store);
        let mut graph = Self {
            store,
            shapes: Vec::with_capacity(candidates.len()),
            index: HashMap::with_capacity(candidates.len()),
            annotation_properties: Vec::new(),
        };
        for iri in candidates {
            let shape = graph.record(iri, ignore);
            graph.index.insert(shape.iri.clone(), graph.shapes.len());
            graph.shapes.push(shape);
        }
        let kinds: Vec<ShapeKind> = graph.shapes.iter().map(|shape| graph.classify(shape)).collect();
        for (shape, kind) in graph.shapes.iter_mut().zip(kinds) {
            shape.kind = kind;
        }
        graph.annotation_properties = graph.collect_annotation_properties();
        tracing::debug!(
            "Discovered {} shapes, {} of them eligible for translation.",
            graph.shapes.len(),
            graph.eligible_shapes().count()
        );
        graph
    }

    /// Collects the IRIs of all classes and shapes, in discovery order.
    fn discover(store: &TripleStore) -> Vec<NamedNode> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        let mut add = |node: &NamedNode| {
            if !is_top(node) && seen.insert(node.clone()) {
                candidates.push(node.clone());
            }
        };
        for subject in store.subjects_in_order() {
            let Some(subject_node) = named(subject) else {
                continue;
            };
            let super_classes = store.objects(subject_node.as_ref(), rdfs::SUB_CLASS_OF);
            let typed = [owl::CLASS, rdfs::CLASS, sh::NODE_SHAPE]
                .into_iter()
                .any(|typ| store.contains(subject_node.as_ref(), rdf::TYPE, typ));
            if typed || !super_classes.is_empty() {
                add(subject_node);
            }
            for super_class in super_classes.into_iter().filter_map(named) {
                add(super_class);
            }
        }
        for predicate in [sh::CLASS, sh::DATA_TYPE, rdfs::RANGE] {
            for target in store.objects_of_predicate(predicate).into_iter().filter_map(named) {
                add(target);
            }
        }
        candidates
    }

    fn record(&self, iri: NamedNode, ignore: &IgnoreList) -> ClassShape {
        let store = &self.store;
        let subject = iri.as_ref();
        let mut direct_super_shapes: Vec<NamedNode> = Vec::new();
        for super_class in store.objects(subject, rdfs::SUB_CLASS_OF).into_iter().filter_map(named) {
            if !is_top(super_class) && !direct_super_shapes.contains(super_class) {
                direct_super_shapes.push(super_class.clone());
            }
        }
        ClassShape {
            kind: ShapeKind::Plain,
            is_class: store.contains(subject, rdf::TYPE, owl::CLASS)
                || store.contains(subject, rdf::TYPE, rdfs::CLASS),
            is_node_shape: store.contains(subject, rdf::TYPE, sh::NODE_SHAPE),
            deprecated: self.is_deprecated(subject.into()),
            ignored: ignore.matches(iri.as_str()),
            labels: self.labels(subject.into()),
            comments: self.comments(subject.into()),
            direct_super_shapes,
            direct_sub_shapes: store
                .subjects(rdfs::SUB_CLASS_OF, subject)
                .into_iter()
                .filter_map(named)
                .cloned()
                .collect(),
            property_shapes: store.objects(subject, sh::PROPERTY).into_iter().cloned().collect(),
            tags: store
                .objects(subject, brick::HAS_ASSOCIATED_TAG)
                .into_iter()
                .filter_map(named)
                .cloned()
                .collect(),
            iri,
        }
    }

    fn classify(&self, shape: &ClassShape) -> ShapeKind {
        let subject = shape.iri.as_ref();
        if shape.is_node_shape
            && self
                .super_shapes(shape)
                .iter()
                .any(|sup| sup.iri.as_ref() == brick::VALUE_SHAPE)
        {
            return ShapeKind::ValueShape;
        }
        if self.store.contains(subject, rdf::TYPE, subject) {
            return ShapeKind::SelfTyped;
        }
        let has_members = |candidate: &ClassShape| {
            !self
                .store
                .subjects(rdf::TYPE, candidate.iri.as_ref())
                .is_empty()
        };
        if has_members(shape) || self.sub_shapes(shape).into_iter().any(has_members) {
            return ShapeKind::EnumerationRoot;
        }
        if self
            .store
            .objects(subject, rdf::TYPE)
            .into_iter()
            .filter_map(named)
            .any(|typ| typ.as_str().contains(COMPONENT_TYPE_MARKER))
        {
            return ShapeKind::Component;
        }
        ShapeKind::Plain
    }

    fn collect_annotation_properties(&self) -> Vec<AnnotationProperty> {
        self.store
            .subjects(rdf::TYPE, owl::ANNOTATION_PROPERTY)
            .into_iter()
            .filter_map(named)
            .map(|iri| AnnotationProperty {
                iri: iri.clone(),
                domains: self.store.objects(iri.as_ref(), rdfs::DOMAIN).into_iter().cloned().collect(),
                ranges: self.store.objects(iri.as_ref(), rdfs::RANGE).into_iter().cloned().collect(),
            })
            .collect()
    }

    #[must_use]
    pub const fn store(&self) -> &TripleStore {
        &self.store
    }

    /// All known shapes, in discovery order.
    #[must_use]
    pub fn shapes(&self) -> &[ClassShape] {
        &self.shapes
    }

    /// The shapes to generate Interfaces for, in discovery order.
    pub fn eligible_shapes(&self) -> impl Iterator<Item = &ClassShape> {
        self.shapes.iter().filter(|shape| shape.is_eligible())
    }

    #[must_use]
    pub fn shape(&self, iri: &NamedNode) -> Option<&ClassShape> {
        self.index.get(iri).and_then(|idx| self.shapes.get(*idx))
    }

    fn resolve<'s>(&'s self, iris: &[NamedNode]) -> Vec<&'s ClassShape> {
        iris.iter().filter_map(|iri| self.shape(iri)).collect()
    }

    #[must_use]
    pub fn direct_super_shapes(&self, shape: &ClassShape) -> Vec<&ClassShape> {
        self.resolve(&shape.direct_super_shapes)
    }

    #[must_use]
    pub fn direct_sub_shapes(&self, shape: &ClassShape) -> Vec<&ClassShape> {
        self.resolve(&shape.direct_sub_shapes)
    }

    /// Breadth-first closure over `step`, excluding `start` itself.
    fn closure<'s>(
        &'s self,
        start: &'s ClassShape,
        step: fn(&ClassShape) -> &[NamedNode],
    ) -> Vec<&'s ClassShape> {
        let mut visited: HashSet<&NamedNode> = HashSet::from([&start.iri]);
        let mut queue = VecDeque::from([start]);
        let mut reached = Vec::new();
        while let Some(current) = queue.pop_front() {
            for next in self.resolve(step(current)) {
                if visited.insert(&next.iri) {
                    reached.push(next);
                    queue.push_back(next);
                }
            }
        }
        reached
    }

    /// All ancestors, nearest first.
    #[must_use]
    pub fn super_shapes<'s>(&'s self, shape: &'s ClassShape) -> Vec<&'s ClassShape> {
        self.closure(shape, supers)
    }

    /// All descendants, nearest first.
    #[must_use]
    pub fn sub_shapes<'s>(&'s self, shape: &'s ClassShape) -> Vec<&'s ClassShape> {
        self.closure(shape, subs)
    }

    /// The direct super-classes an Interface may extend:
    /// all but the deprecated ones.
    #[must_use]
    pub fn named_superclasses(&self, shape: &ClassShape) -> Vec<&ClassShape> {
        self.direct_super_shapes(shape)
            .into_iter()
            .filter(|sup| !sup.deprecated)
            .collect()
    }

    #[must_use]
    pub fn is_root(&self, shape: &ClassShape) -> bool {
        self.named_superclasses(shape).is_empty()
    }

    /// The longest chain of ancestors, root-most first.
    /// Among chains of equal length, the one through
    /// the first discovered super-class wins.
    #[must_use]
    pub fn longest_super_shape_path<'s>(&'s self, shape: &'s ClassShape) -> Vec<&'s ClassShape> {
        let mut visiting = HashSet::new();
        self.longest_path(shape, &mut visiting)
    }

    fn longest_path<'s>(
        &'s self,
        shape: &'s ClassShape,
        visiting: &mut HashSet<&'s NamedNode>,
    ) -> Vec<&'s ClassShape> {
        visiting.insert(&shape.iri);
        let mut longest: Vec<&ClassShape> = Vec::new();
        for parent in self.resolve(&shape.direct_super_shapes) {
            if visiting.contains(&parent.iri) {
                tracing::warn!("Cyclic sub-class hierarchy at '{}'", parent.iri);
                continue;
            }
            let mut path = self.longest_path(parent, visiting);
            path.push(parent);
            if path.len() > longest.len() {
                longest = path;
            }
        }
        visiting.remove(&shape.iri);
        longest
    }

    /// The text values of `predicate` on `subject`.
    #[must_use]
    pub fn lang_strings(&self, subject: TermRef<'_>, predicate: NamedNodeRef<'_>) -> Vec<LangString> {
        self.store
            .objects(subject, predicate)
            .into_iter()
            .filter_map(|term| {
                if let Term::Literal(literal) = term {
                    Some(LangString::new(literal.value(), literal.language()))
                } else {
                    None
                }
            })
            .collect()
    }

    #[must_use]
    pub fn labels(&self, subject: TermRef<'_>) -> Vec<LangString> {
        self.lang_strings(subject, rdfs::LABEL)
    }

    #[must_use]
    pub fn comments(&self, subject: TermRef<'_>) -> Vec<LangString> {
        self.lang_strings(subject, rdfs::COMMENT)
    }

    #[must_use]
    pub fn is_deprecated(&self, subject: TermRef<'_>) -> bool {
        self.store
            .objects(subject, owl::DEPRECATED)
            .into_iter()
            .any(is_true)
    }

    /// Properties declaring the shape as their `rdfs:domain`.
    #[must_use]
    pub fn domain_properties(&self, shape: &ClassShape) -> Vec<&Term> {
        self.store.subjects(rdfs::DOMAIN, shape.iri.as_ref())
    }

    /// The predicates of the property shapes of `shape`.
    pub fn property_shape_paths<'s>(
        &'s self,
        shape: &'s ClassShape,
    ) -> impl Iterator<Item = &'s NamedNode> + 's {
        shape
            .property_shapes
            .iter()
            .filter_map(|property_shape| self.store.object(property_shape.as_ref(), sh::PATH))
            .filter_map(named)
    }

    /// The types of `subject`, and all their super-classes.
    #[must_use]
    pub fn transitive_types(&self, subject: TermRef<'_>) -> Vec<&NamedNode> {
        let mut types: Vec<&NamedNode> = self
            .store
            .objects(subject, rdf::TYPE)
            .into_iter()
            .filter_map(named)
            .collect();
        let mut next = 0;
        while let Some(current) = types.get(next).copied() {
            for super_class in self
                .store
                .objects(current.as_ref(), rdfs::SUB_CLASS_OF)
                .into_iter()
                .filter_map(named)
            {
                if !types.contains(&super_class) {
                    types.push(super_class);
                }
            }
            next += 1;
        }
        types
    }

    /// The members of an `owl:oneOf` enumeration datatype,
    /// declared directly or through `owl:equivalentClass`.
    #[must_use]
    pub fn enumeration_values(&self, range: TermRef<'_>) -> Option<Vec<&Term>> {
        let one_of = self.store.object(range, owl::ONE_OF).or_else(|| {
            self.store
                .objects(range, owl::EQUIVALENT_CLASS)
                .into_iter()
                .find_map(|equivalent| self.store.object(equivalent.as_ref(), owl::ONE_OF))
        })?;
        Some(self.store.list(one_of.as_ref()))
    }

    /// The local names of the instances of `shape` and all its sub-classes.
    #[must_use]
    pub fn enumeration_members(&self, shape: &ClassShape) -> Vec<&str> {
        self.sub_shapes(shape)
            .into_iter()
            .chain([shape])
            .flat_map(|class| self.store.subjects(rdf::TYPE, class.iri.as_ref()))
            .filter_map(named)
            .map(|member| local_name(member.as_str()))
            .collect()
    }

    /// The annotation properties with a single range,
    /// whose domain includes `predicate`.
    pub fn annotation_properties_on<'s>(
        &'s self,
        predicate: NamedNodeRef<'s>,
    ) -> impl Iterator<Item = &'s AnnotationProperty> + 's {
        self.annotation_properties.iter().filter(move |annotation| {
            annotation.ranges.len() == 1
                && annotation
                    .domains
                    .iter()
                    .any(|domain| domain.as_ref() == TermRef::from(predicate))
        })
    }
}
