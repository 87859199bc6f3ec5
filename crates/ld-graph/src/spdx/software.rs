//! SPDX 3 Software profile.
//!
//! Compact names in this profile carry a `software_` prefix, both for types
//! (`software_Package`) and properties (`software_packageVersion`).

use super::core_profile::{
    record, Artifact, ElementCollection, ARTIFACT_FIELDS, COLLECTION_FIELDS, ELEMENT_FIELDS, SPDX_ID,
};
use crate::model::{instantiate, FieldDescriptor, Record, TypeDescriptor};

macro_rules! software_iri {
    ($name:literal) => {
        concat!("https://spdx.org/rdf/3.0.0/terms/Software/", $name)
    };
}

/// Fields shared by packages, files and snippets.
#[derive(Debug, Default)]
pub struct SoftwareArtifact {
    pub artifact: Artifact,
    pub primary_purpose: Option<String>,
    pub additional_purpose: Vec<String>,
    pub copyright_text: Option<String>,
    pub attribution_text: Vec<String>,
}

crate::impl_properties!(SoftwareArtifact {
    "software_primaryPurpose" => Scalar(primary_purpose),
    "software_additionalPurpose" => Scalars(additional_purpose),
    "software_copyrightText" => Scalar(copyright_text),
    "software_attributionText" => Scalars(attribution_text),
} extends artifact);

const SOFTWARE_ARTIFACT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::scalar("software_primaryPurpose", software_iri!("primaryPurpose")),
    FieldDescriptor::scalars("software_additionalPurpose", software_iri!("additionalPurpose")),
    FieldDescriptor::scalar("software_copyrightText", software_iri!("copyrightText")),
    FieldDescriptor::scalars("software_attributionText", software_iri!("attributionText")),
];

const SOFTWARE_ARTIFACT_SUPERCLASSES: &[&str] =
    &["software_SoftwareArtifact", "Artifact", "Element"];

#[derive(Debug, Default)]
pub struct Package {
    pub software: SoftwareArtifact,
    pub package_version: Option<String>,
    pub download_location: Option<String>,
    pub package_url: Option<String>,
    pub home_page: Option<String>,
    pub source_info: Option<String>,
}

crate::impl_properties!(Package {
    "software_packageVersion" => Scalar(package_version),
    "software_downloadLocation" => Scalar(download_location),
    "software_packageUrl" => Scalar(package_url),
    "software_homePage" => Scalar(home_page),
    "software_sourceInfo" => Scalar(source_info),
} extends software);

pub static PACKAGE: TypeDescriptor = TypeDescriptor {
    iri: software_iri!("Package"),
    compact: "software_Package",
    id_property: Some(SPDX_ID),
    superclasses: SOFTWARE_ARTIFACT_SUPERCLASSES,
    fields: &[
        ELEMENT_FIELDS,
        ARTIFACT_FIELDS,
        SOFTWARE_ARTIFACT_FIELDS,
        &[
            FieldDescriptor::scalar("software_packageVersion", software_iri!("packageVersion")),
            FieldDescriptor::scalar("software_downloadLocation", software_iri!("downloadLocation")),
            FieldDescriptor::scalar("software_packageUrl", software_iri!("packageUrl")),
            FieldDescriptor::scalar("software_homePage", software_iri!("homePage")),
            FieldDescriptor::scalar("software_sourceInfo", software_iri!("sourceInfo")),
        ],
    ],
    new: instantiate::<Package>,
};

record!(Package, PACKAGE);

#[derive(Debug, Default)]
pub struct File {
    pub software: SoftwareArtifact,
    pub file_kind: Option<String>,
    pub content_type: Option<String>,
}

crate::impl_properties!(File {
    "software_fileKind" => Scalar(file_kind),
    "contentType" => Scalar(content_type),
} extends software);

pub static FILE: TypeDescriptor = TypeDescriptor {
    iri: software_iri!("File"),
    compact: "software_File",
    id_property: Some(SPDX_ID),
    superclasses: SOFTWARE_ARTIFACT_SUPERCLASSES,
    fields: &[
        ELEMENT_FIELDS,
        ARTIFACT_FIELDS,
        SOFTWARE_ARTIFACT_FIELDS,
        &[
            FieldDescriptor::scalar("software_fileKind", software_iri!("fileKind")),
            FieldDescriptor::scalar(
                "contentType",
                "https://spdx.org/rdf/3.0.0/terms/Core/contentType",
            ),
        ],
    ],
    new: instantiate::<File>,
};

record!(File, FILE);

/// A software bill of materials.
#[derive(Debug, Default)]
pub struct Sbom {
    pub collection: ElementCollection,
    pub sbom_type: Vec<String>,
}

crate::impl_properties!(Sbom {
    "software_sbomType" => Scalars(sbom_type),
} extends collection);

pub static SBOM: TypeDescriptor = TypeDescriptor {
    iri: software_iri!("Sbom"),
    compact: "software_Sbom",
    id_property: Some(SPDX_ID),
    superclasses: &["Bom", "Bundle", "ElementCollection", "Element"],
    fields: &[
        ELEMENT_FIELDS,
        COLLECTION_FIELDS,
        &[FieldDescriptor::scalars("software_sbomType", software_iri!("sbomType"))],
    ],
    new: instantiate::<Sbom>,
};

record!(Sbom, SBOM);
