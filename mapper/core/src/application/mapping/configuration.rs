// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Configuration submodels
//!
//! Both configuration submodels need the measuring range of the asset. When
//! either bound is missing from the specifications the mapping fails with a
//! precondition error (404) instead of producing a submodel without bounds.

use std::collections::HashSet;

use super::elements::{
    collection, file, present, property, range, reference_element, sanitize_id_short, submodel,
};
use super::semantics as sem;
use crate::domain::aas::{Reference, Submodel, SubmodelElement};
use crate::domain::error::MapperError;
use crate::domain::identifiers::{submodel_id, SubmodelName};
use crate::domain::netilion::{NetilionAsset, NetilionDocument, NetilionSpecification};

pub const LOWER_RANGE_KEY: &str = "anfangswert_des_messbereiches";
pub const UPPER_RANGE_KEY: &str = "endwert_des_messbereiches";

fn spec_value(specification: &NetilionSpecification, key: &str) -> Option<String> {
    specification.get(key).and_then(|entry| entry.value_text())
}

/// Whether both measuring range bounds are present
pub fn has_measuring_range(specification: &NetilionSpecification) -> bool {
    spec_value(specification, LOWER_RANGE_KEY).is_some()
        && spec_value(specification, UPPER_RANGE_KEY).is_some()
}

fn measuring_range(asset_id: u64, specification: &NetilionSpecification) -> Result<SubmodelElement, MapperError> {
    let missing: Vec<&str> = [LOWER_RANGE_KEY, UPPER_RANGE_KEY]
        .into_iter()
        .filter(|key| spec_value(specification, key).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(MapperError::precondition(format!(
            "Required specification missing for asset {}: {}",
            asset_id,
            missing.join(", ")
        )));
    }

    let lower = spec_value(specification, LOWER_RANGE_KEY);
    let upper = spec_value(specification, UPPER_RANGE_KEY);
    let unit = specification
        .get(LOWER_RANGE_KEY)
        .and_then(|e| present(e.unit.as_deref()))
        .or_else(|| specification.get(UPPER_RANGE_KEY).and_then(|e| present(e.unit.as_deref())));

    collection(
        "MeasuringRange",
        sem::MEASURING_RANGE,
        [
            range("Range", sem::MEASURING_RANGE_VALUES, lower.as_deref(), upper.as_deref()),
            property("Unit", sem::MEASURING_RANGE_UNIT, unit),
        ],
    )
    .ok_or_else(|| MapperError::precondition(format!("Measuring range of asset {} is empty", asset_id)))
}

/// Every specification entry except the measuring range bounds
fn specifications(specification: &NetilionSpecification) -> Option<SubmodelElement> {
    let mut seen = HashSet::new();
    let entries = specification
        .iter()
        .filter(|(key, _)| key.as_str() != LOWER_RANGE_KEY && key.as_str() != UPPER_RANGE_KEY)
        .map(|(key, entry)| {
            let mut id_short = sanitize_id_short(key);
            while !seen.insert(id_short.clone()) {
                id_short.push('_');
            }
            let value = entry.value_text().map(|v| match present(entry.unit.as_deref()) {
                Some(unit) => format!("{} {}", v, unit),
                None => v,
            });
            property(&id_short, sem::SPECIFICATIONS, value.as_deref())
        })
        .collect::<Vec<_>>();

    collection("Specifications", sem::SPECIFICATIONS, entries)
}

fn documents(documents: &[NetilionDocument]) -> Option<SubmodelElement> {
    collection(
        "Documents",
        sem::DOCUMENTS,
        documents.iter().map(|doc| {
            let files = doc.attachments.iter().enumerate().map(|(i, attachment)| {
                file(
                    &format!("File{:02}", i + 1),
                    sem::DOCUMENT_FILE,
                    attachment.content_type.as_deref(),
                    attachment.download_href.as_deref(),
                )
            });
            collection(
                &format!("Document_{}", doc.id),
                sem::DOCUMENT,
                [
                    property("DocumentName", sem::DOCUMENT_NAME, doc.name.as_deref()),
                    property("DocumentNumber", sem::DOCUMENT_NUMBER, doc.document_number.as_deref()),
                    property("Version", sem::DOCUMENT_VERSION, doc.version.as_deref()),
                ]
                .into_iter()
                .chain(files),
            )
        }),
    )
}

pub fn configuration_as_built_submodel(
    server_root: &str,
    asset: &NetilionAsset,
    specification: &NetilionSpecification,
) -> Result<Submodel, MapperError> {
    let elements = [Some(measuring_range(asset.id, specification)?), specifications(specification)]
        .into_iter()
        .flatten()
        .collect();

    Ok(submodel(
        submodel_id(server_root, asset.id, SubmodelName::ConfigurationAsBuilt),
        SubmodelName::ConfigurationAsBuilt.as_str(),
        sem::CONFIGURATION_AS_BUILT,
        elements,
    ))
}

pub fn configuration_as_documented_submodel(
    server_root: &str,
    asset: &NetilionAsset,
    specification: &NetilionSpecification,
    asset_documents: &[NetilionDocument],
) -> Result<Submodel, MapperError> {
    let as_built = Reference::submodel(submodel_id(server_root, asset.id, SubmodelName::ConfigurationAsBuilt));
    let elements = [
        Some(measuring_range(asset.id, specification)?),
        documents(asset_documents),
        reference_element("AsBuiltConfiguration", sem::AS_BUILT_REFERENCE, as_built),
    ]
    .into_iter()
    .flatten()
    .collect();

    Ok(submodel(
        submodel_id(server_root, asset.id, SubmodelName::ConfigurationAsDocumented),
        SubmodelName::ConfigurationAsDocumented.as_str(),
        sem::CONFIGURATION_AS_DOCUMENTED,
        elements,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aas::DataTypeDefXsd;
    use crate::domain::netilion::{NetilionAttachment, SpecificationEntry};
    use serde_json::json;

    fn asset() -> NetilionAsset {
        serde_json::from_value(json!({"id": 77, "serial_number": "S77"})).unwrap()
    }

    fn specification(entries: serde_json::Value) -> NetilionSpecification {
        serde_json::from_value(entries).unwrap()
    }

    #[test]
    fn test_missing_lower_bound_is_precondition_error() {
        let spec = specification(json!({"endwert_des_messbereiches": {"value": "10", "unit": "bar"}}));

        let err = configuration_as_built_submodel("http://localhost", &asset(), &spec).unwrap_err();
        assert_eq!(err.http_status, 404);
        assert!(err.message.contains("anfangswert_des_messbereiches"));
        assert!(!has_measuring_range(&spec));

        let err = configuration_as_documented_submodel("http://localhost", &asset(), &spec, &[]).unwrap_err();
        assert_eq!(err.http_status, 404);
    }

    #[test]
    fn test_as_built_contains_range_and_remaining_specifications() {
        let spec = specification(json!({
            "anfangswert_des_messbereiches": {"value": 0, "unit": "bar"},
            "endwert_des_messbereiches": {"value": 16, "unit": "bar"},
            "messstoff": {"value": "Wasser"},
            "leer": {"value": ""}
        }));
        assert!(has_measuring_range(&spec));

        let submodel = configuration_as_built_submodel("http://localhost", &asset(), &spec).unwrap();
        assert_eq!(submodel.id(), "http://localhost/mapper/shells/77/submodels/configuration_as_built");

        let range = submodel.element("MeasuringRange").and_then(|e| e.as_collection()).unwrap();
        match range.element("Range") {
            Some(SubmodelElement::Range(r)) => {
                assert_eq!(r.min.as_deref(), Some("0"));
                assert_eq!(r.max.as_deref(), Some("16"));
                assert_eq!(r.value_type, DataTypeDefXsd::Double);
            }
            other => panic!("expected Range, got {:?}", other),
        }
        assert!(range.element("Unit").is_some());

        let specs = submodel.element("Specifications").and_then(|e| e.as_collection()).unwrap();
        assert_eq!(specs.value.len(), 1);
        assert!(specs.element("messstoff").is_some());
        assert!(specs.element("leer").is_none());
    }

    #[test]
    fn test_as_documented_lists_documents() {
        let mut spec = NetilionSpecification::new();
        for key in [LOWER_RANGE_KEY, UPPER_RANGE_KEY] {
            spec.insert(key.to_string(), SpecificationEntry { value: Some(json!("1")), unit: None });
        }
        let docs = vec![
            NetilionDocument {
                id: 4,
                name: Some("Calibration certificate".to_string()),
                document_number: None,
                version: Some("1".to_string()),
                attachments: vec![NetilionAttachment {
                    file_name: Some("cert.pdf".to_string()),
                    content_type: Some("application/pdf".to_string()),
                    download_href: Some("https://files.example/cert.pdf".to_string()),
                }],
            },
            NetilionDocument { id: 5, name: None, document_number: None, version: None, attachments: vec![] },
        ];

        let submodel = configuration_as_documented_submodel("http://localhost", &asset(), &spec, &docs).unwrap();

        let documents = submodel.element("Documents").and_then(|e| e.as_collection()).unwrap();
        assert_eq!(documents.value.len(), 1);
        let doc = documents.element("Document_4").and_then(|e| e.as_collection()).unwrap();
        assert!(doc.element("DocumentNumber").is_none());
        assert!(matches!(doc.element("File01"), Some(SubmodelElement::File(_))));
        assert!(matches!(
            submodel.element("AsBuiltConfiguration"),
            Some(SubmodelElement::ReferenceElement(_))
        ));
        assert!(submodel.element("Specifications").is_none());
    }
}
