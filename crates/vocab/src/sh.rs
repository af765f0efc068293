// SPDX-FileCopyrightText: 2023 - 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! [SHACL](http://www.w3.org/ns/shacl) vocabulary.

use crate::named_node;

pub const NS_BASE: &str = "http://www.w3.org/ns/shacl#";
pub const NS_PREFERRED_PREFIX: &str = "sh";

named_node!(NODE_SHAPE, NS_BASE, "NodeShape", "A node shape is a shape that specifies constraint that need to be met with respect to focus nodes.");
named_node!(
    PROPERTY,
    NS_BASE,
    "property",
    "Links a shape to its property shapes."
);
named_node!(
    PATH,
    NS_BASE,
    "path",
    "Specifies the property path of a property shape."
);
named_node!(
    MAX_COUNT,
    NS_BASE,
    "maxCount",
    "Specifies the maximum number of values in the set of value nodes."
);
named_node!(
    MIN_COUNT,
    NS_BASE,
    "minCount",
    "Specifies the minimum number of values in the set of value nodes."
);
named_node!(
    CLASS,
    NS_BASE,
    "class",
    "The type that all value nodes must have."
);
named_node!(
    DATA_TYPE,
    NS_BASE,
    "datatype",
    "Specifies an RDF datatype that all value nodes must have."
);
named_node!(
    IN,
    NS_BASE,
    "in",
    "Specifies a list of allowed values so that each value node must be among the members of the given list."
);
named_node!(
    NODE_KIND,
    NS_BASE,
    "nodeKind",
    "Specifies the node kind (e.g. IRI or literal) each value node."
);
named_node!(
    IRI,
    NS_BASE,
    "IRI",
    "The node kind of all IRIs."
);
named_node!(
    LITERAL,
    NS_BASE,
    "Literal",
    "The node kind of all literals."
);
named_node!(
    NAME,
    NS_BASE,
    "name",
    "Human-readable labels for the property in the context of the surrounding shape."
);
named_node!(
    DESCRIPTION,
    NS_BASE,
    "description",
    "Human-readable descriptions for the property in the context of the surrounding shape."
);
