// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Asset Administration Shell Metamodel
//!
//! Value objects of the AAS metamodel, serialized exactly as the AAS JSON
//! schema expects (`modelType` tags, camelCase field names).
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Shells, submodels and the submodel element sum type
//!
//! Shared attributes are composed rather than inherited: identifiables embed
//! [`Identity`], submodel elements embed [`ElementMeta`]. Both are flattened
//! into the owning JSON object.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// References
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceType {
    GlobalReference,
    ModelReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    GlobalReference,
    FragmentReference,
    AssetAdministrationShell,
    Submodel,
    ConceptDescription,
    Identifiable,
    Referable,
    SubmodelElement,
    SubmodelElementCollection,
    SubmodelElementList,
    AnnotatedRelationshipElement,
    BasicEventElement,
    Blob,
    Capability,
    DataElement,
    Entity,
    EventElement,
    File,
    MultiLanguageProperty,
    Operation,
    Property,
    Range,
    ReferenceElement,
    RelationshipElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    #[serde(rename = "type")]
    pub key_type: KeyType,
    pub value: String,
}

/// Typed pointer to another entity.
///
/// `keys` should never be empty. An empty reference is logged at construction
/// but still returned, so callers that care must check [`Reference::is_valid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type")]
    pub reference_type: ReferenceType,
    pub keys: Vec<Key>,
}

impl Reference {
    pub fn new(reference_type: ReferenceType, keys: Vec<Key>) -> Self {
        if keys.is_empty() {
            tracing::error!(?reference_type, "Reference constructed without keys");
        }
        Self { reference_type, keys }
    }

    /// External dictionary entry (ECLASS IRDI, IEC CDD, IRI)
    pub fn global(value: impl Into<String>) -> Self {
        Self::new(
            ReferenceType::GlobalReference,
            vec![Key {
                key_type: KeyType::GlobalReference,
                value: value.into(),
            }],
        )
    }

    pub fn model(key_type: KeyType, value: impl Into<String>) -> Self {
        Self::new(
            ReferenceType::ModelReference,
            vec![Key {
                key_type,
                value: value.into(),
            }],
        )
    }

    /// ModelReference to a submodel by id
    pub fn submodel(submodel_id: impl Into<String>) -> Self {
        Self::model(KeyType::Submodel, submodel_id)
    }

    pub fn is_valid(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Value of the first key, i.e. the referenced id for single-key references
    pub fn first_value(&self) -> Option<&str> {
        self.keys.first().map(|k| k.value.as_str())
    }
}

// ============================================================================
// Shared attribute groups
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangString {
    pub language: String,
    pub text: String,
}

impl LangString {
    pub fn en(text: impl Into<String>) -> Self {
        Self {
            language: "en".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdministrativeInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModellingKind {
    Instance,
    Template,
}

/// Attributes of every identifiable (shell, submodel)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Globally unique identifier (IRI, IRDI or custom string)
    pub id: String,

    /// Local name, not guaranteed to be unique
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub display_name: Vec<LangString>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<LangString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administration: Option<AdministrativeInformation>,
}

impl Identity {
    pub fn new(id: impl Into<String>, id_short: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            id_short: Some(id_short.into()),
            ..Default::default()
        }
    }
}

// ============================================================================
// Shell
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    Instance,
    Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificAssetId {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInformation {
    pub asset_kind: AssetKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_asset_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific_asset_ids: Vec<SpecificAssetId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "modelType", rename_all = "camelCase")]
pub struct AssetAdministrationShell {
    #[serde(flatten)]
    pub identity: Identity,

    pub asset_information: AssetInformation,

    /// ModelReferences to the submodels of this shell. Resolution against
    /// real submodel ids is the caller's responsibility.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submodels: Vec<Reference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<Reference>,
}

/// Anything with a global `id`; used to label batch items
pub trait Identifiable {
    fn identifier(&self) -> &str;
}

impl Identifiable for AssetAdministrationShell {
    fn identifier(&self) -> &str {
        &self.identity.id
    }
}

impl Identifiable for Submodel {
    fn identifier(&self) -> &str {
        &self.identity.id
    }
}

impl AssetAdministrationShell {
    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn id_short(&self) -> Option<&str> {
        self.identity.id_short.as_deref()
    }

    /// Ids of all referenced submodels, skipping keyless references
    pub fn submodel_ids(&self) -> Vec<String> {
        self.submodels
            .iter()
            .filter_map(|r| r.first_value().map(str::to_string))
            .collect()
    }
}

// ============================================================================
// Submodel
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "modelType", rename_all = "camelCase")]
pub struct Submodel {
    #[serde(flatten)]
    pub identity: Identity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ModellingKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submodel_elements: Vec<SubmodelElement>,
}

impl Submodel {
    pub fn id(&self) -> &str {
        &self.identity.id
    }

    /// Top-level element lookup by idShort
    pub fn element(&self, id_short: &str) -> Option<&SubmodelElement> {
        self.submodel_elements.iter().find(|e| e.id_short() == id_short)
    }

    /// Structural problems: keyless references and duplicate sibling idShorts
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Some(semantic_id) = &self.semantic_id {
            if !semantic_id.is_valid() {
                problems.push(format!("{}: semanticId has no keys", self.id()));
            }
        }
        collect_problems(self.id(), &self.submodel_elements, &mut problems);
        problems
    }
}

fn collect_problems(path: &str, elements: &[SubmodelElement], problems: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for element in elements {
        let id_short = element.id_short();
        if !seen.insert(id_short) {
            problems.push(format!("{}: duplicate idShort '{}'", path, id_short));
        }
        if let Some(semantic_id) = &element.meta().semantic_id {
            if !semantic_id.is_valid() {
                problems.push(format!("{}/{}: semanticId has no keys", path, id_short));
            }
        }
        let children = element.children();
        if !children.is_empty() {
            collect_problems(&format!("{}/{}", path, id_short), children, problems);
        }
    }
}

// ============================================================================
// Submodel elements
// ============================================================================

/// Attributes shared by every submodel element variant
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMeta {
    /// Required, unique among siblings
    pub id_short: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<LangString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ElementMeta {
    pub fn new(id_short: impl Into<String>) -> Self {
        Self {
            id_short: id_short.into(),
            ..Default::default()
        }
    }

    pub fn with_semantic_id(mut self, semantic_id: Option<Reference>) -> Self {
        self.semantic_id = semantic_id;
        self
    }
}

/// XSD value types used by properties and ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataTypeDefXsd {
    #[serde(rename = "xs:string")]
    String,
    #[serde(rename = "xs:boolean")]
    Boolean,
    #[serde(rename = "xs:int")]
    Int,
    #[serde(rename = "xs:long")]
    Long,
    #[serde(rename = "xs:double")]
    Double,
    #[serde(rename = "xs:date")]
    Date,
    #[serde(rename = "xs:dateTime")]
    DateTime,
    #[serde(rename = "xs:anyURI")]
    AnyUri,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(flatten)]
    pub meta: ElementMeta,
    pub value_type: DataTypeDefXsd,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiLanguageProperty {
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<LangString>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    #[serde(flatten)]
    pub meta: ElementMeta,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceElement {
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmodelElementCollection {
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<SubmodelElement>,
}

impl SubmodelElementCollection {
    pub fn element(&self, id_short: &str) -> Option<&SubmodelElement> {
        self.value.iter().find(|e| e.id_short() == id_short)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityType {
    CoManagedEntity,
    SelfManagedEntity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(flatten)]
    pub meta: ElementMeta,
    pub entity_type: EntityType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statements: Vec<SubmodelElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_asset_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationVariable {
    pub value: SubmodelElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_variables: Vec<OperationVariable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_variables: Vec<OperationVariable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inoutput_variables: Vec<OperationVariable>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateOfEvent {
    On,
    Off,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicEventElement {
    #[serde(flatten)]
    pub meta: ElementMeta,
    pub observed: Reference,
    pub direction: Direction,
    pub state: StateOfEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    #[serde(flatten)]
    pub meta: ElementMeta,
    pub value_type: DataTypeDefXsd,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipElement {
    #[serde(flatten)]
    pub meta: ElementMeta,
    pub first: Reference,
    pub second: Reference,
}

/// Submodel element sum type, discriminated by `modelType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "modelType")]
pub enum SubmodelElement {
    Property(Property),
    MultiLanguageProperty(MultiLanguageProperty),
    File(File),
    ReferenceElement(ReferenceElement),
    SubmodelElementCollection(SubmodelElementCollection),
    Entity(Entity),
    Operation(Operation),
    BasicEventElement(BasicEventElement),
    Range(Range),
    RelationshipElement(RelationshipElement),
}

impl SubmodelElement {
    pub fn meta(&self) -> &ElementMeta {
        match self {
            SubmodelElement::Property(e) => &e.meta,
            SubmodelElement::MultiLanguageProperty(e) => &e.meta,
            SubmodelElement::File(e) => &e.meta,
            SubmodelElement::ReferenceElement(e) => &e.meta,
            SubmodelElement::SubmodelElementCollection(e) => &e.meta,
            SubmodelElement::Entity(e) => &e.meta,
            SubmodelElement::Operation(e) => &e.meta,
            SubmodelElement::BasicEventElement(e) => &e.meta,
            SubmodelElement::Range(e) => &e.meta,
            SubmodelElement::RelationshipElement(e) => &e.meta,
        }
    }

    pub fn id_short(&self) -> &str {
        &self.meta().id_short
    }

    pub fn model_type(&self) -> &'static str {
        match self {
            SubmodelElement::Property(_) => "Property",
            SubmodelElement::MultiLanguageProperty(_) => "MultiLanguageProperty",
            SubmodelElement::File(_) => "File",
            SubmodelElement::ReferenceElement(_) => "ReferenceElement",
            SubmodelElement::SubmodelElementCollection(_) => "SubmodelElementCollection",
            SubmodelElement::Entity(_) => "Entity",
            SubmodelElement::Operation(_) => "Operation",
            SubmodelElement::BasicEventElement(_) => "BasicEventElement",
            SubmodelElement::Range(_) => "Range",
            SubmodelElement::RelationshipElement(_) => "RelationshipElement",
        }
    }

    /// Directly nested elements (collection values, entity statements)
    pub fn children(&self) -> &[SubmodelElement] {
        match self {
            SubmodelElement::SubmodelElementCollection(c) => &c.value,
            SubmodelElement::Entity(e) => &e.statements,
            _ => &[],
        }
    }

    pub fn as_collection(&self) -> Option<&SubmodelElementCollection> {
        match self {
            SubmodelElement::SubmodelElementCollection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&Property> {
        match self {
            SubmodelElement::Property(p) => Some(p),
            _ => None,
        }
    }
}
