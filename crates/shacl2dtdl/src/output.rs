// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use oxrdf::NamedNode;
use tempfile::NamedTempFile;

use crate::error::Error;
use crate::graph::{ClassShape, ShapeGraph};

pub const FILE_EXTENSION: &str = "json";

/// Turns a local name into a single, plain path component.
///
/// Separators and control characters become '_',
/// as do names consisting of dots only.
fn file_name(local: &str) -> String {
    let name: String = local
        .chars()
        .map(|chr| {
            if matches!(chr, '/' | '\\' | ':') || chr.is_control() {
                '_'
            } else {
                chr
            }
        })
        .collect();
    if name.chars().all(|chr| chr == '.') {
        "_".repeat(name.len().max(1))
    } else {
        name
    }
}

/// The path of the document of a shape, relative to the output directory.
///
/// The directories are the local names along the longest chain of ancestors.
/// A shape with sub-classes gets a directory of its own,
/// next to which the documents of its sub-classes are placed.
/// The result never leaves the output directory.
#[must_use]
pub fn place(graph: &ShapeGraph, shape: &ClassShape) -> PathBuf {
    let mut path: PathBuf = graph
        .longest_super_shape_path(shape)
        .iter()
        .map(|ancestor| file_name(ancestor.local_name()))
        .collect();
    if !shape.direct_sub_shapes.is_empty() {
        path.push(file_name(shape.local_name()));
    }
    path.push(format!("{}.{FILE_EXTENSION}", file_name(shape.local_name())));
    path
}

/// Writes documents below an output directory,
/// never writing two of them to the same file.
#[derive(Debug)]
pub struct DocumentWriter {
    out_dir: PathBuf,
    written: HashMap<PathBuf, NamedNode>,
}

impl DocumentWriter {
    #[must_use]
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            out_dir,
            written: HashMap::new(),
        }
    }

    /// Writes the document of `shape` to `relative_path`,
    /// creating intermediate directories as required.
    ///
    /// The file is first written to a temporary file next to it,
    /// so it either appears complete or not at all.
    ///
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// - The path was already written to by another shape during this run.
    /// - I/O failure
    pub fn write(
        &mut self,
        relative_path: &Path,
        shape: &NamedNode,
        document: &str,
    ) -> Result<PathBuf, Error> {
        if let Some(first) = self.written.get(relative_path) {
            return Err(Error::OutputCollision {
                path: relative_path.to_owned(),
                first: first.as_str().to_owned(),
                second: shape.as_str().to_owned(),
            });
        }
        let target = self.out_dir.join(relative_path);
        let dir = target.parent().unwrap_or(&self.out_dir);
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(document.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.persist(&target).map_err(|err| err.error)?;
        tracing::debug!("Wrote '{}'", target.display());
        self.written.insert(relative_path.to_owned(), shape.clone());
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IgnoreList;
    use crate::load::parse;
    use oxrdfio::RdfFormat;

    fn graph() -> ShapeGraph {
        let ttl = r"
            @prefix ex: <http://ex.org/ns#> .
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            @prefix sh: <http://www.w3.org/ns/shacl#> .
            ex:Equipment a owl:Class, sh:NodeShape .
            ex:HVAC a owl:Class, sh:NodeShape ; rdfs:subClassOf ex:Equipment .
            ex:AHU a owl:Class, sh:NodeShape ; rdfs:subClassOf ex:HVAC .
            ex:Pump a owl:Class, sh:NodeShape ; rdfs:subClassOf ex:Equipment .
        ";
        let store = parse(ttl.as_bytes(), RdfFormat::Turtle, None).unwrap();
        ShapeGraph::new(store, &IgnoreList::default())
    }

    fn placed(graph: &ShapeGraph, local: &str) -> PathBuf {
        let shape = graph
            .shape(&NamedNode::new_unchecked(format!("http://ex.org/ns#{local}")))
            .unwrap();
        place(graph, shape)
    }

    #[test]
    fn placement_follows_the_hierarchy() {
        let graph = graph();
        assert_eq!(placed(&graph, "Equipment"), Path::new("Equipment/Equipment.json"));
        assert_eq!(placed(&graph, "HVAC"), Path::new("Equipment/HVAC/HVAC.json"));
        assert_eq!(placed(&graph, "AHU"), Path::new("Equipment/HVAC/AHU.json"));
        assert_eq!(placed(&graph, "Pump"), Path::new("Equipment/Pump.json"));
    }

    #[test]
    fn local_names_stay_inside_the_output_directory() {
        let ttl = r"
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            @prefix sh: <http://www.w3.org/ns/shacl#> .
            <http://ex.org/ns#..> a owl:Class, sh:NodeShape .
            <http://ex.org/ns#../../etc/passwd> a owl:Class, sh:NodeShape ;
                rdfs:subClassOf <http://ex.org/ns#..> .
            <http://ex.org/ns/> a owl:Class, sh:NodeShape ;
                rdfs:subClassOf <http://ex.org/ns#..> .
        ";
        let store = parse(ttl.as_bytes(), RdfFormat::Turtle, None).unwrap();
        let graph = ShapeGraph::new(store, &IgnoreList::default());

        let placed_iri = |iri: &str| place(&graph, graph.shape(&NamedNode::new_unchecked(iri)).unwrap());
        assert_eq!(placed_iri("http://ex.org/ns#.."), Path::new("__/__.json"));
        assert_eq!(
            placed_iri("http://ex.org/ns#../../etc/passwd"),
            Path::new("__/.._.._etc_passwd.json")
        );
        assert_eq!(placed_iri("http://ex.org/ns/"), Path::new("__/_.json"));
        for shape in graph.shapes() {
            let path = place(&graph, shape);
            assert!(
                path.components().all(|part| matches!(part, std::path::Component::Normal(_))),
                "{}",
                path.display()
            );
        }
    }

    #[test]
    fn documents_are_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = DocumentWriter::new(dir.path().to_owned());
        let first = NamedNode::new_unchecked("http://ex.org/a#X");
        let second = NamedNode::new_unchecked("http://ex.org/b#X");
        let rel = Path::new("A/X.json");

        let written = writer.write(rel, &first, "{}").unwrap();
        assert_eq!(written, dir.path().join(rel));
        assert_eq!(fs::read_to_string(&written).unwrap(), "{}\n");

        let err = writer.write(rel, &second, "[]").unwrap_err();
        assert!(matches!(err, Error::OutputCollision { .. }), "{err:?}");
        assert_eq!(fs::read_to_string(&written).unwrap(), "{}\n");
    }
}
