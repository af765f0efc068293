// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use cli_utils as _;

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod jsonld;
pub mod load;
pub mod model;
pub mod output;
pub mod property;
pub mod schema;
pub mod store;

use std::collections::HashMap;
use std::path::PathBuf;

use config::Config;
use engine::Engine;
use error::Error;
use git_version::git_version;
use graph::{ClassShape, ShapeGraph};
use jsonld::Context;
use oxrdf::NamedNode;
use output::DocumentWriter;
use shacl2dtdl_iri::Dtmi;
use shacl2dtdl_vocab::owl;

// This tests rust code in the README with doc-tests.
// Though, It will not appear in the generated documentation.
#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

pub const VERSION: &str = git_version!(cargo_prefix = "", fallback = "unknown");

/// A class shape that got no document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skipped {
    pub shape: NamedNode,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// The documents written, in order
    pub written: Vec<PathBuf>,
    pub skipped: Vec<Skipped>,
}

/// Translates one ontology into one DTDL Interface document per eligible class shape.
///
/// # Errors
///
/// - the ontology cannot be loaded
/// - the DTDL context is invalid
/// - one of the output files cannot be written
pub fn generate(config: &Config) -> Result<RunReport, Error> {
    if config.merged_output {
        tracing::warn!("Merged output is not implemented; writing one document per Interface.");
    }

    tracing::info!("Loading ontology from '{}' ...", config.source);
    let store = load::load(&config.source)?;
    if !config.no_imports {
        for import in store.objects_of_predicate(owl::IMPORTS) {
            tracing::warn!("Not following owl:imports of {import}");
        }
    }
    let graph = ShapeGraph::new(store, &config.ignore);
    let context = Context::dtdl()?;
    let mut writer = DocumentWriter::new(config.out_dir.clone());

    let report = translate(
        &graph,
        &context,
        config.ontology_source.as_deref(),
        &mut writer,
    )?;
    tracing::info!(
        "Wrote {} Interfaces to '{}', skipped {}.",
        report.written.len(),
        config.out_dir.display(),
        report.skipped.len()
    );
    Ok(report)
}

/// Translates all eligible shapes of the graph, one after the other.
///
/// A failure concerning only a single shape skips that shape;
/// the run goes on.
///
/// # Errors
///
/// If a document can not be serialized or written.
pub fn translate(
    graph: &ShapeGraph,
    context: &Context,
    ontology_source: Option<&str>,
    writer: &mut DocumentWriter,
) -> Result<RunReport, Error> {
    let engine = Engine::new(graph, ontology_source);
    let mut minted: HashMap<Dtmi, NamedNode> = HashMap::new();
    let mut report = RunReport::default();

    tracing::info!("Generating DTDL Interfaces:");
    for shape in graph.eligible_shapes() {
        match translate_shape(&engine, graph, context, writer, &mut minted, shape) {
            Ok(path) => report.written.push(path),
            Err(err) if err.is_shape_local() => {
                tracing::error!("Skipping '{}': {err}", shape.iri);
                report.skipped.push(Skipped {
                    shape: shape.iri.clone(),
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }
    Ok(report)
}

fn translate_shape(
    engine: &Engine<'_>,
    graph: &ShapeGraph,
    context: &Context,
    writer: &mut DocumentWriter,
    minted: &mut HashMap<Dtmi, NamedNode>,
    shape: &ClassShape,
) -> Result<PathBuf, Error> {
    let mut interface = engine.interface(shape)?;
    if let Some(first) = minted.get(&interface.id) {
        return Err(Error::IdentifierCollision {
            dtmi: interface.id,
            first: first.as_str().to_owned(),
            second: shape.iri.as_str().to_owned(),
        });
    }
    tracing::info!("\t* {}", interface.id);

    interface.sort();
    let document = jsonld::render(&interface, context)?;
    let path = writer.write(&output::place(graph, shape), &shape.iri, &document)?;
    // Only identifiers of written documents count as taken.
    minted.insert(interface.id, shape.iri.clone());
    Ok(path)
}
