// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::{HashMap, HashSet};

use oxrdf::vocab::rdf;
use oxrdf::{NamedNode, NamedNodeRef, Term, TermRef, Triple};
use petgraph::graph::{DefaultIx, DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

type NodeIdx = NodeIndex<DefaultIx>;

/// Nodes are the subject and object terms,
/// edges are the predicates.
pub type RdfGraph = DiGraph<Term, NamedNode>;

/// An in-memory set of triples,
/// remembering the order in which they were first inserted.
///
/// All queries return their results in that order,
/// which makes every traversal built on top of this deterministic.
#[derive(Debug, Clone, Default)]
pub struct TripleStore {
    graph: RdfGraph,
    term_to_idx: HashMap<Term, NodeIdx>,
    subjects: Vec<NodeIdx>,
}

impl TripleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&mut self, term: Term) -> NodeIdx {
        if let Some(idx) = self.term_to_idx.get(&term) {
            return *idx;
        }
        let idx = self.graph.add_node(term.clone());
        self.term_to_idx.insert(term, idx);
        idx
    }

    fn idx(&self, term: TermRef<'_>) -> Option<NodeIdx> {
        self.term_to_idx.get(&term.into_owned()).copied()
    }

    /// Adds a triple, unless it is already contained.
    ///
    /// Returns whether the triple was new.
    pub fn insert(&mut self, triple: Triple) -> bool {
        let subj_idx = self.node(triple.subject.into());
        let obj_idx = self.node(triple.object);
        if self
            .graph
            .edges_connecting(subj_idx, obj_idx)
            .any(|edge| *edge.weight() == triple.predicate)
        {
            return false;
        }
        if self
            .graph
            .edges_directed(subj_idx, Direction::Outgoing)
            .next()
            .is_none()
        {
            self.subjects.push(subj_idx);
        }
        self.graph.add_edge(subj_idx, obj_idx, triple.predicate);
        true
    }

    /// The number of (distinct) triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    fn sorted_edges(
        &self,
        idx: NodeIdx,
        direction: Direction,
        predicate: NamedNodeRef<'_>,
    ) -> Vec<EdgeReference<'_, NamedNode>> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, direction)
            .filter(|edge| edge.weight().as_ref() == predicate)
            .collect();
        // petgraph lists the newest edge first
        edges.sort_by_key(|edge| edge.id());
        edges
    }

    /// All subjects, in the order they were first used as such.
    pub fn subjects_in_order(&self) -> impl Iterator<Item = &Term> {
        self.subjects
            .iter()
            .filter_map(|idx| self.graph.node_weight(*idx))
    }

    /// The objects of all triples with the given subject and predicate.
    #[must_use]
    pub fn objects<'a>(
        &self,
        subject: impl Into<TermRef<'a>>,
        predicate: NamedNodeRef<'_>,
    ) -> Vec<&Term> {
        self.idx(subject.into()).map_or_else(Vec::new, |idx| {
            self.sorted_edges(idx, Direction::Outgoing, predicate)
                .into_iter()
                .filter_map(|edge| self.graph.node_weight(edge.target()))
                .collect()
        })
    }

    /// The first of [`Self::objects`].
    #[must_use]
    pub fn object<'a>(
        &self,
        subject: impl Into<TermRef<'a>>,
        predicate: NamedNodeRef<'_>,
    ) -> Option<&Term> {
        self.objects(subject, predicate).into_iter().next()
    }

    /// The subjects of all triples with the given predicate and object.
    #[must_use]
    pub fn subjects<'a>(
        &self,
        predicate: NamedNodeRef<'_>,
        object: impl Into<TermRef<'a>>,
    ) -> Vec<&Term> {
        self.idx(object.into()).map_or_else(Vec::new, |idx| {
            self.sorted_edges(idx, Direction::Incoming, predicate)
                .into_iter()
                .filter_map(|edge| self.graph.node_weight(edge.source()))
                .collect()
        })
    }

    #[must_use]
    pub fn contains<'a, 'b>(
        &self,
        subject: impl Into<TermRef<'a>>,
        predicate: NamedNodeRef<'_>,
        object: impl Into<TermRef<'b>>,
    ) -> bool {
        let object = object.into();
        self.objects(subject, predicate)
            .into_iter()
            .any(|obj| obj.as_ref() == object)
    }

    /// The objects of all triples with the given predicate,
    /// whatever their subject.
    #[must_use]
    pub fn objects_of_predicate(&self, predicate: NamedNodeRef<'_>) -> Vec<&Term> {
        self.graph
            .edge_references()
            .filter(|edge| edge.weight().as_ref() == predicate)
            .filter_map(|edge| self.graph.node_weight(edge.target()))
            .collect()
    }

    /// The members of the RDF collection starting at `head`,
    /// following `rdf:first`/`rdf:rest` until `rdf:nil`.
    ///
    /// Stops silently at a broken or cyclic list.
    #[must_use]
    pub fn list<'a>(&self, head: impl Into<TermRef<'a>>) -> Vec<&Term> {
        let mut members = Vec::new();
        let mut visited = HashSet::new();
        let mut current = head.into().into_owned();
        loop {
            if current.as_ref() == TermRef::from(rdf::NIL) || !visited.insert(current.clone()) {
                break;
            }
            if let Some(first) = self.object(current.as_ref(), rdf::FIRST) {
                members.push(first);
            }
            match self.object(current.as_ref(), rdf::REST) {
                Some(rest) => current = rest.clone(),
                None => break,
            }
        }
        members
    }
}

impl Extend<Triple> for TripleStore {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl FromIterator<Triple> for TripleStore {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
