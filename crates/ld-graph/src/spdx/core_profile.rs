//! SPDX 3 Core profile.

use crate::model::{instantiate, DateTime, FieldDescriptor, ObjectRef, Record, TypeDescriptor};

macro_rules! core_iri {
    ($name:literal) => {
        concat!("https://spdx.org/rdf/3.0.0/terms/Core/", $name)
    };
}

macro_rules! record {
    ($ty:ident, $descriptor:ident) => {
        impl Record for $ty {
            fn descriptor(&self) -> &'static TypeDescriptor {
                &$descriptor
            }
        }
    };
}

pub(super) use record;

pub(crate) const SPDX_ID: &str = "spdxId";

// =============================================================================
// ELEMENT
// =============================================================================

/// Fields shared by every SPDX element.
#[derive(Debug, Default)]
pub struct Element {
    pub name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub creation_info: Option<ObjectRef>,
    pub external_identifier: Vec<ObjectRef>,
}

crate::impl_properties!(Element {
    "name" => Scalar(name),
    "summary" => Scalar(summary),
    "description" => Scalar(description),
    "comment" => Scalar(comment),
    "creationInfo" => Ref(creation_info),
    "externalIdentifier" => Refs(external_identifier),
});

pub(crate) const ELEMENT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::scalar("name", core_iri!("name")),
    FieldDescriptor::scalar("summary", core_iri!("summary")),
    FieldDescriptor::scalar("description", core_iri!("description")),
    FieldDescriptor::scalar("comment", core_iri!("comment")),
    FieldDescriptor::reference("creationInfo", core_iri!("creationInfo"), "CreationInfo"),
    FieldDescriptor::references(
        "externalIdentifier",
        core_iri!("externalIdentifier"),
        "ExternalIdentifier",
    ),
];

// =============================================================================
// AGENTS AND TOOLS
// =============================================================================

/// Fields shared by persons, organizations and software agents.
#[derive(Debug, Default)]
pub struct Agent {
    pub element: Element,
}

crate::impl_properties!(Agent {} extends element);

#[derive(Debug, Default)]
pub struct Person {
    pub agent: Agent,
}

crate::impl_properties!(Person {} extends agent);

#[derive(Debug, Default)]
pub struct Organization {
    pub agent: Agent,
}

crate::impl_properties!(Organization {} extends agent);

#[derive(Debug, Default)]
pub struct SoftwareAgent {
    pub agent: Agent,
}

crate::impl_properties!(SoftwareAgent {} extends agent);

#[derive(Debug, Default)]
pub struct Tool {
    pub element: Element,
}

crate::impl_properties!(Tool {} extends element);

const AGENT_SUPERCLASSES: &[&str] = &["Agent", "Element"];

pub static PERSON: TypeDescriptor = TypeDescriptor {
    iri: core_iri!("Person"),
    compact: "Person",
    id_property: Some(SPDX_ID),
    superclasses: AGENT_SUPERCLASSES,
    fields: &[ELEMENT_FIELDS],
    new: instantiate::<Person>,
};

pub static ORGANIZATION: TypeDescriptor = TypeDescriptor {
    iri: core_iri!("Organization"),
    compact: "Organization",
    id_property: Some(SPDX_ID),
    superclasses: AGENT_SUPERCLASSES,
    fields: &[ELEMENT_FIELDS],
    new: instantiate::<Organization>,
};

pub static SOFTWARE_AGENT: TypeDescriptor = TypeDescriptor {
    iri: core_iri!("SoftwareAgent"),
    compact: "SoftwareAgent",
    id_property: Some(SPDX_ID),
    superclasses: AGENT_SUPERCLASSES,
    fields: &[ELEMENT_FIELDS],
    new: instantiate::<SoftwareAgent>,
};

pub static TOOL: TypeDescriptor = TypeDescriptor {
    iri: core_iri!("Tool"),
    compact: "Tool",
    id_property: Some(SPDX_ID),
    superclasses: &["Element"],
    fields: &[ELEMENT_FIELDS],
    new: instantiate::<Tool>,
};

record!(Person, PERSON);
record!(Organization, ORGANIZATION);
record!(SoftwareAgent, SOFTWARE_AGENT);
record!(Tool, TOOL);

// =============================================================================
// CREATION INFO AND IDENTIFIERS
// =============================================================================

/// Provenance shared by many elements, usually a single blank node.
#[derive(Debug, Default)]
pub struct CreationInfo {
    pub spec_version: Option<String>,
    pub comment: Option<String>,
    pub created: Option<DateTime>,
    pub created_by: Vec<ObjectRef>,
    pub created_using: Vec<ObjectRef>,
}

crate::impl_properties!(CreationInfo {
    "specVersion" => Scalar(spec_version),
    "comment" => Scalar(comment),
    "created" => Scalar(created),
    "createdBy" => Refs(created_by),
    "createdUsing" => Refs(created_using),
});

pub static CREATION_INFO: TypeDescriptor = TypeDescriptor {
    iri: core_iri!("CreationInfo"),
    compact: "CreationInfo",
    id_property: None,
    superclasses: &[],
    fields: &[&[
        FieldDescriptor::scalar("specVersion", core_iri!("specVersion")),
        FieldDescriptor::scalar("comment", core_iri!("comment")),
        FieldDescriptor::scalar("created", core_iri!("created")),
        FieldDescriptor::references("createdBy", core_iri!("createdBy"), "Agent"),
        FieldDescriptor::references("createdUsing", core_iri!("createdUsing"), "Tool"),
    ]],
    new: instantiate::<CreationInfo>,
};

record!(CreationInfo, CREATION_INFO);

#[derive(Debug, Default)]
pub struct ExternalIdentifier {
    pub external_identifier_type: Option<String>,
    pub identifier: Option<String>,
    pub identifier_locator: Vec<String>,
    pub issuing_authority: Option<String>,
    pub comment: Option<String>,
}

crate::impl_properties!(ExternalIdentifier {
    "externalIdentifierType" => Scalar(external_identifier_type),
    "identifier" => Scalar(identifier),
    "identifierLocator" => Scalars(identifier_locator),
    "issuingAuthority" => Scalar(issuing_authority),
    "comment" => Scalar(comment),
});

pub static EXTERNAL_IDENTIFIER: TypeDescriptor = TypeDescriptor {
    iri: core_iri!("ExternalIdentifier"),
    compact: "ExternalIdentifier",
    id_property: None,
    superclasses: &[],
    fields: &[&[
        FieldDescriptor::scalar("externalIdentifierType", core_iri!("externalIdentifierType")),
        FieldDescriptor::scalar("identifier", core_iri!("identifier")),
        FieldDescriptor::scalars("identifierLocator", core_iri!("identifierLocator")),
        FieldDescriptor::scalar("issuingAuthority", core_iri!("issuingAuthority")),
        FieldDescriptor::scalar("comment", core_iri!("comment")),
    ]],
    new: instantiate::<ExternalIdentifier>,
};

record!(ExternalIdentifier, EXTERNAL_IDENTIFIER);

// =============================================================================
// COLLECTIONS
// =============================================================================

/// Fields shared by documents, bundles and BOMs.
#[derive(Debug, Default)]
pub struct ElementCollection {
    pub element: Element,
    pub elements: Vec<ObjectRef>,
    pub root_element: Vec<ObjectRef>,
    pub profile_conformance: Vec<String>,
}

crate::impl_properties!(ElementCollection {
    "element" => Refs(elements),
    "rootElement" => Refs(root_element),
    "profileConformance" => Scalars(profile_conformance),
} extends element);

pub(crate) const COLLECTION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::references("element", core_iri!("element"), "Element"),
    FieldDescriptor::references("rootElement", core_iri!("rootElement"), "Element"),
    FieldDescriptor::scalars("profileConformance", core_iri!("profileConformance")),
];

#[derive(Debug, Default)]
pub struct SpdxDocument {
    pub collection: ElementCollection,
    pub data_license: Option<String>,
}

crate::impl_properties!(SpdxDocument {
    "dataLicense" => Scalar(data_license),
} extends collection);

pub static SPDX_DOCUMENT: TypeDescriptor = TypeDescriptor {
    iri: core_iri!("SpdxDocument"),
    compact: "SpdxDocument",
    id_property: Some(SPDX_ID),
    superclasses: &["ElementCollection", "Element"],
    fields: &[
        ELEMENT_FIELDS,
        COLLECTION_FIELDS,
        &[FieldDescriptor::scalar("dataLicense", core_iri!("dataLicense"))],
    ],
    new: instantiate::<SpdxDocument>,
};

record!(SpdxDocument, SPDX_DOCUMENT);

// =============================================================================
// RELATIONSHIPS
// =============================================================================

/// A typed edge from one element to one or more others.
#[derive(Debug, Default)]
pub struct Relationship {
    pub element: Element,
    pub from: Option<ObjectRef>,
    pub to: Vec<ObjectRef>,
    pub relationship_type: Option<String>,
    pub completeness: Option<String>,
    pub start_time: Option<DateTime>,
    pub end_time: Option<DateTime>,
}

crate::impl_properties!(Relationship {
    "from" => Ref(from),
    "to" => Refs(to),
    "relationshipType" => Scalar(relationship_type),
    "completeness" => Scalar(completeness),
    "startTime" => Scalar(start_time),
    "endTime" => Scalar(end_time),
} extends element);

pub static RELATIONSHIP: TypeDescriptor = TypeDescriptor {
    iri: core_iri!("Relationship"),
    compact: "Relationship",
    id_property: Some(SPDX_ID),
    superclasses: &["Element"],
    fields: &[
        ELEMENT_FIELDS,
        &[
            FieldDescriptor::reference("from", core_iri!("from"), "Element"),
            FieldDescriptor::references("to", core_iri!("to"), "Element"),
            FieldDescriptor::scalar("relationshipType", core_iri!("relationshipType")),
            FieldDescriptor::scalar("completeness", core_iri!("completeness")),
            FieldDescriptor::scalar("startTime", core_iri!("startTime")),
            FieldDescriptor::scalar("endTime", core_iri!("endTime")),
        ],
    ],
    new: instantiate::<Relationship>,
};

record!(Relationship, RELATIONSHIP);

// =============================================================================
// ARTIFACTS
// =============================================================================

/// Fields shared by every artifact (packages, files, ...).
#[derive(Debug, Default)]
pub struct Artifact {
    pub element: Element,
    pub originated_by: Vec<ObjectRef>,
    pub supplied_by: Option<ObjectRef>,
    pub built_time: Option<DateTime>,
    pub release_time: Option<DateTime>,
    pub valid_until_time: Option<DateTime>,
    pub standard_name: Vec<String>,
}

crate::impl_properties!(Artifact {
    "originatedBy" => Refs(originated_by),
    "suppliedBy" => Ref(supplied_by),
    "builtTime" => Scalar(built_time),
    "releaseTime" => Scalar(release_time),
    "validUntilTime" => Scalar(valid_until_time),
    "standardName" => Scalars(standard_name),
} extends element);

pub(crate) const ARTIFACT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::references("originatedBy", core_iri!("originatedBy"), "Agent"),
    FieldDescriptor::reference("suppliedBy", core_iri!("suppliedBy"), "Agent"),
    FieldDescriptor::scalar("builtTime", core_iri!("builtTime")),
    FieldDescriptor::scalar("releaseTime", core_iri!("releaseTime")),
    FieldDescriptor::scalar("validUntilTime", core_iri!("validUntilTime")),
    FieldDescriptor::scalars("standardName", core_iri!("standardName")),
];
