// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Element constructors with presence gating.
//!
//! Every constructor returns `None` when its source value is absent (missing,
//! blank) so builders can assemble element lists with `flatten()` and never
//! emit a field with a null placeholder. Collections without children are
//! absent as well.

use crate::domain::aas::{
    DataTypeDefXsd, ElementMeta, File, Identity, LangString, ModellingKind, MultiLanguageProperty,
    Property, Range, Reference, ReferenceElement, Submodel, SubmodelElement,
    SubmodelElementCollection,
};

/// Trimmed value, or `None` for missing and blank strings
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn meta(id_short: &str, semantic_id: &str) -> ElementMeta {
    ElementMeta::new(id_short).with_semantic_id(Some(Reference::global(semantic_id)))
}

pub fn property(id_short: &str, semantic_id: &str, value: Option<&str>) -> Option<SubmodelElement> {
    typed_property(id_short, semantic_id, DataTypeDefXsd::String, value)
}

pub fn typed_property(
    id_short: &str,
    semantic_id: &str,
    value_type: DataTypeDefXsd,
    value: Option<&str>,
) -> Option<SubmodelElement> {
    let value = present(value)?;
    Some(SubmodelElement::Property(Property {
        meta: meta(id_short, semantic_id),
        value_type,
        value: Some(value.to_string()),
    }))
}

/// English-tagged multi-language property
pub fn ml_property(id_short: &str, semantic_id: &str, value: Option<&str>) -> Option<SubmodelElement> {
    let value = present(value)?;
    Some(SubmodelElement::MultiLanguageProperty(MultiLanguageProperty {
        meta: meta(id_short, semantic_id),
        value: vec![LangString::en(value)],
    }))
}

pub fn collection<I>(id_short: &str, semantic_id: &str, children: I) -> Option<SubmodelElement>
where
    I: IntoIterator<Item = Option<SubmodelElement>>,
{
    let value: Vec<SubmodelElement> = children.into_iter().flatten().collect();
    if value.is_empty() {
        return None;
    }
    Some(SubmodelElement::SubmodelElementCollection(SubmodelElementCollection {
        meta: meta(id_short, semantic_id),
        value,
    }))
}

pub fn file(
    id_short: &str,
    semantic_id: &str,
    content_type: Option<&str>,
    path: Option<&str>,
) -> Option<SubmodelElement> {
    let path = present(path)?;
    Some(SubmodelElement::File(File {
        meta: meta(id_short, semantic_id),
        content_type: present(content_type).unwrap_or("application/octet-stream").to_string(),
        value: Some(path.to_string()),
    }))
}

pub fn range(
    id_short: &str,
    semantic_id: &str,
    min: Option<&str>,
    max: Option<&str>,
) -> Option<SubmodelElement> {
    let (min, max) = (present(min), present(max));
    if min.is_none() && max.is_none() {
        return None;
    }
    let numeric = [min, max].iter().flatten().all(|v| v.parse::<f64>().is_ok());
    Some(SubmodelElement::Range(Range {
        meta: meta(id_short, semantic_id),
        value_type: if numeric { DataTypeDefXsd::Double } else { DataTypeDefXsd::String },
        min: min.map(str::to_string),
        max: max.map(str::to_string),
    }))
}

pub fn reference_element(id_short: &str, semantic_id: &str, target: Reference) -> Option<SubmodelElement> {
    if !target.is_valid() {
        return None;
    }
    Some(SubmodelElement::ReferenceElement(ReferenceElement {
        meta: meta(id_short, semantic_id),
        value: Some(target),
    }))
}

/// Instance submodel with a global semanticId
pub fn submodel(id: String, id_short: &str, semantic_id: &str, elements: Vec<SubmodelElement>) -> Submodel {
    Submodel {
        identity: Identity::new(id, id_short),
        kind: Some(ModellingKind::Instance),
        semantic_id: Some(Reference::global(semantic_id)),
        submodel_elements: elements,
    }
}

/// Turn free text into a valid idShort (`[A-Za-z][A-Za-z0-9_]*`)
pub fn sanitize_id_short(raw: &str) -> String {
    let mut out: String = raw
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if !out.starts_with(|c: char| c.is_ascii_alphabetic()) {
        out.insert_str(0, "Id_");
    }
    out
}
