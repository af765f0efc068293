// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serde_json::Value;
use shacl2dtdl::config::{Config, IgnoreList, OntologySource};
use shacl2dtdl::error::Error;

const ONTOLOGY: &str = r"
<http://ex.org/ns> a owl:Ontology ; owl:imports <http://ex.org/other> .
ex:Equipment a owl:Class, sh:NodeShape .
ex:HVAC a owl:Class, sh:NodeShape ; rdfs:subClassOf ex:Equipment .
ex:AHU a owl:Class, sh:NodeShape ; rdfs:subClassOf ex:HVAC .
ex:Pump a owl:Class, sh:NodeShape ;
    rdfs:subClassOf ex:Equipment ;
    sh:property [ sh:path ex:speed ; sh:datatype xsd:integer ] .
ex:Internal a owl:Class, sh:NodeShape ; rdfs:subClassOf ex:Equipment .
";

fn config(dir: &Path, ontology: &str) -> Config {
    let file = dir.join("ontology.ttl");
    fs::write(&file, common::turtle(ontology)).unwrap();
    Config::new(OntologySource::File(file), dir.join("out"))
}

fn relative(report: &shacl2dtdl::RunReport, out_dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = report
        .written
        .iter()
        .map(|path| path.strip_prefix(out_dir).unwrap().to_owned())
        .collect();
    paths.sort();
    paths
}

#[test]
fn writes_one_document_per_class_shape() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), ONTOLOGY);
    config.ignore = IgnoreList::parse("Internal;not wanted\n");

    let report = shacl2dtdl::generate(&config).unwrap();

    assert!(report.skipped.is_empty());
    assert_eq!(
        relative(&report, &config.out_dir),
        [
            PathBuf::from("Equipment/Equipment.json"),
            PathBuf::from("Equipment/HVAC/AHU.json"),
            PathBuf::from("Equipment/HVAC/HVAC.json"),
            PathBuf::from("Equipment/Pump.json"),
        ]
    );

    let pump = fs::read_to_string(config.out_dir.join("Equipment/Pump.json")).unwrap();
    assert!(pump.ends_with("}\n"));
    let pump: Value = serde_json::from_str(&pump).unwrap();
    assert_eq!(pump["@id"], "dtmi:org:ex:ns:Pump;1");
    assert_eq!(pump["extends"][0], "dtmi:org:ex:ns:Equipment;1");
    assert_eq!(pump["contents"][0]["name"], "speed");
    assert_eq!(pump["contents"][0]["schema"], "integer");
}

#[test]
fn identifier_collisions_skip_the_later_shape() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(
        dir.path(),
        r"
        ex:Pump a owl:Class, sh:NodeShape .
        <http://ex.org/ns/Pump> a owl:Class, sh:NodeShape .
        ex:Tank a owl:Class, sh:NodeShape .
        ",
    );

    let report = shacl2dtdl::generate(&config).unwrap();

    assert_eq!(
        relative(&report, &config.out_dir),
        [PathBuf::from("Pump.json"), PathBuf::from("Tank.json")]
    );
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].shape.as_str(), "http://ex.org/ns/Pump");
    assert!(
        report.skipped[0].reason.contains("dtmi:org:ex:ns:Pump;1"),
        "{}",
        report.skipped[0].reason
    );
}

#[test]
fn identifiers_of_unwritten_documents_stay_available() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(
        dir.path(),
        r"
        ex:Pump a owl:Class, sh:NodeShape .
        <http://ex.org/other#Pump> a owl:Class, sh:NodeShape .
        ex:Tank a owl:Class, sh:NodeShape .
        <http://ex.org/other/Pump> a owl:Class, sh:NodeShape ; rdfs:subClassOf ex:Tank .
        ",
    );

    let report = shacl2dtdl::generate(&config).unwrap();

    assert_eq!(
        relative(&report, &config.out_dir),
        [
            PathBuf::from("Pump.json"),
            PathBuf::from("Tank/Pump.json"),
            PathBuf::from("Tank/Tank.json"),
        ]
    );
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].shape.as_str(), "http://ex.org/other#Pump");
    assert!(
        report.skipped[0].reason.contains("would be written to"),
        "{}",
        report.skipped[0].reason
    );

    let pump = fs::read_to_string(config.out_dir.join("Tank/Pump.json")).unwrap();
    let pump: Value = serde_json::from_str(&pump).unwrap();
    assert_eq!(pump["@id"], "dtmi:org:ex:other:Pump;1");
}

#[test]
fn unreadable_ontologies_abort_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), "ex:Pump a owl:Class, sh:NodeShape");

    let err = shacl2dtdl::generate(&config).unwrap_err();

    assert!(matches!(err, Error::Load(_)), "{err:?}");
    assert!(!config.out_dir.exists());
}
