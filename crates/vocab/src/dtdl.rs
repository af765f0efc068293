// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! [Digital Twins Definition Language (DTDL) v3](
//! https://azure.github.io/opendigitaltwins-dtdl/DTDL/v3/DTDL.v3.html)
//! reserved identifiers.
//!
//! These are DTMIs, not HTTP IRIs,
//! but they are valid IRIs (scheme `dtmi`),
//! and the JSON-LD context maps them to their compact terms.

use crate::named_node;

pub const NS_BASE: &str = "dtmi:dtdl:";
pub const NS_BASE_GEOSPATIAL: &str = "dtmi:standard:schema:geospatial:";

/// The DTDL v3 language context.
pub const CONTEXT: &str = "dtmi:dtdl:context;3";
/// The context of the initialization extension,
/// which provides `Initialized` and `initialValue`.
pub const INITIALIZATION_CONTEXT: &str = "dtmi:dtdl:extension:initialization;1";

// Classes
named_node!(INTERFACE, NS_BASE, "class:Interface;3", "A DTDL Interface.");
named_node!(PROPERTY, NS_BASE, "class:Property;3", "A DTDL Property content.");
named_node!(
    RELATIONSHIP,
    NS_BASE,
    "class:Relationship;3",
    "A DTDL Relationship content."
);
named_node!(
    COMPONENT,
    NS_BASE,
    "class:Component;3",
    "A DTDL Component content."
);
named_node!(ENUM, NS_BASE, "class:Enum;3", "An enumeration schema.");
named_node!(MAP, NS_BASE, "class:Map;3", "A map schema.");
named_node!(OBJECT, NS_BASE, "class:Object;3", "An object schema.");
named_node!(ARRAY, NS_BASE, "class:Array;3", "An array schema.");
named_node!(
    INITIALIZED,
    NS_BASE,
    "class:Initialized;3",
    "Co-type of contents that carry initial values."
);

// Properties
named_node!(CONTENTS, NS_BASE, "property:contents;3", "The contents of an Interface.");
named_node!(NAME, NS_BASE, "property:name;3", "The programming name of an element.");
named_node!(
    DISPLAY_NAME,
    NS_BASE,
    "property:displayName;3",
    "A localizable name for display."
);
named_node!(
    DESCRIPTION,
    NS_BASE,
    "property:description;3",
    "A localizable description for display."
);
named_node!(
    EXTENDS,
    NS_BASE,
    "property:extends;3",
    "The Interfaces this Interface inherits from."
);
named_node!(
    SCHEMA,
    NS_BASE,
    "property:schema;3",
    "The data type of a Property, or the Interface of a Component."
);
named_node!(
    WRITABLE,
    NS_BASE,
    "property:writable;3",
    "Whether the Property or Relationship is writable by an external source."
);
named_node!(
    TARGET,
    NS_BASE,
    "property:target;3",
    "The Interface of the Relationship's target."
);
named_node!(
    MAX_MULTIPLICITY,
    NS_BASE,
    "property:maxMultiplicity;3",
    "The maximum number of instances of a Relationship."
);
named_node!(
    PROPERTIES,
    NS_BASE,
    "property:properties;3",
    "The Properties of a Relationship."
);
named_node!(
    VALUE_SCHEMA,
    NS_BASE,
    "property:valueSchema;3",
    "The data type of the values of an Enum."
);
named_node!(
    ENUM_VALUES,
    NS_BASE,
    "property:enumValues;3",
    "The members of an Enum."
);
named_node!(
    ENUM_VALUE_VALUE,
    NS_BASE,
    "property:enumValue;3",
    "The on-the-wire value of an Enum member."
);
named_node!(FIELDS, NS_BASE, "property:fields;3", "The fields of an Object.");
named_node!(MAP_KEY, NS_BASE, "property:mapKey;3", "The key of a Map.");
named_node!(MAP_VALUE, NS_BASE, "property:mapValue;3", "The value of a Map.");
named_node!(
    ELEMENT_SCHEMA,
    NS_BASE,
    "property:elementSchema;3",
    "The data type of the elements of an Array."
);
named_node!(
    INITIAL_VALUE,
    NS_BASE,
    "property:initialValue;3",
    "The initial value(s) of an initialized content (initialization extension)."
);

// Primitive schemas
named_node!(BOOLEAN, NS_BASE, "instance:Schema:boolean;3", "");
named_node!(DATE, NS_BASE, "instance:Schema:date;3", "");
named_node!(DATE_TIME, NS_BASE, "instance:Schema:dateTime;3", "");
named_node!(DOUBLE, NS_BASE, "instance:Schema:double;3", "");
named_node!(DURATION, NS_BASE, "instance:Schema:duration;3", "");
named_node!(FLOAT, NS_BASE, "instance:Schema:float;3", "");
named_node!(INTEGER, NS_BASE, "instance:Schema:integer;3", "");
named_node!(LONG, NS_BASE, "instance:Schema:long;3", "");
named_node!(STRING, NS_BASE, "instance:Schema:string;3", "");
named_node!(POLYGON, NS_BASE_GEOSPATIAL, "polygon;3", "");
