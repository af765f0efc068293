// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

#![allow(dead_code)]

use oxrdf::NamedNode;
use oxrdfio::RdfFormat;
use serde_json::Value;
use shacl2dtdl::config::IgnoreList;
use shacl2dtdl::engine::Engine;
use shacl2dtdl::graph::{ClassShape, ShapeGraph};
use shacl2dtdl::jsonld::{self, Context};
use shacl2dtdl::load::parse;
use shacl2dtdl::model::Interface;

pub const NS: &str = "http://ex.org/ns#";

pub const PREFIXES: &str = r"
@prefix ex: <http://ex.org/ns#> .
@prefix tag: <https://brickschema.org/schema/BrickTag#> .
@prefix brick: <https://brickschema.org/schema/Brick#> .
@prefix bsh: <https://brickschema.org/schema/BrickShape#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix sh: <http://www.w3.org/ns/shacl#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
";

pub fn turtle(body: &str) -> String {
    format!("{PREFIXES}\n{body}")
}

pub fn graph(body: &str) -> ShapeGraph {
    let store = parse(turtle(body).as_bytes(), RdfFormat::Turtle, None).unwrap();
    ShapeGraph::new(store, &IgnoreList::default())
}

pub fn shape<'g>(graph: &'g ShapeGraph, local: &str) -> &'g ClassShape {
    graph
        .shape(&NamedNode::new_unchecked(format!("{NS}{local}")))
        .unwrap_or_else(|| panic!("no shape '{local}'"))
}

/// The sorted Interface of the shape with the given local name.
pub fn interface(graph: &ShapeGraph, local: &str) -> Interface {
    let mut interface = Engine::new(graph, None)
        .interface(shape(graph, local))
        .unwrap();
    interface.sort();
    interface
}

/// The final document of the shape with the given local name, parsed back.
pub fn document(graph: &ShapeGraph, local: &str) -> Value {
    let context = Context::dtdl().unwrap();
    let rendered = jsonld::render(&interface(graph, local), &context).unwrap();
    serde_json::from_str(&rendered).unwrap()
}

pub fn content_names(interface: &Interface) -> Vec<&str> {
    interface.contents.iter().map(|content| content.name()).collect()
}

pub fn extends(interface: &Interface) -> Vec<&str> {
    interface.extends.iter().map(|dtmi| dtmi.as_str()).collect()
}
