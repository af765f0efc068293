// SPDX-FileCopyrightText: 2023 - 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! [Web Ontology Language (OWL)](
//! http://www.w3.org/2002/07/owl)
//! vocabulary.

use crate::named_node;

pub const NS_BASE: &str = "http://www.w3.org/2002/07/owl#";
pub const NS_PREFERRED_PREFIX: &str = "owl";

named_node!(
    ANNOTATION_PROPERTY,
    NS_BASE,
    "AnnotationProperty",
    "The class of annotation properties."
);
named_node!(CLASS, NS_BASE, "Class", "The class of OWL classes.");
named_node!(
    DATATYPE_PROPERTY,
    NS_BASE,
    "DatatypeProperty",
    "The class of data properties."
);
named_node!(
    DEPRECATED,
    NS_BASE,
    "deprecated",
    "The annotation property that indicates that a given entity has been deprecated."
);
named_node!(
    EQUIVALENT_CLASS,
    NS_BASE,
    "equivalentClass",
    "The property that determines that two given classes are equivalent."
);
named_node!(
    FUNCTIONAL_PROPERTY,
    NS_BASE,
    "FunctionalProperty",
    "The class of functional properties."
);
named_node!(
    IMPORTS,
    NS_BASE,
    "imports",
    "The property that is used for importing other ontologies into a given ontology."
);
named_node!(
    ONE_OF,
    NS_BASE,
    "oneOf",
    "The property that determines the collection of individuals or data values that build an enumeration."
);
named_node!(
    THING,
    NS_BASE,
    "Thing",
    "The class of OWL individuals."
);
