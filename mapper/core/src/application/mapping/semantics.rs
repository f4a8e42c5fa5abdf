// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Semantic identifiers per field. Static per field identity, never derived
// from instance data.

// Digital Nameplate (ZVEI)
pub const NAMEPLATE: &str = "https://admin-shell.io/zvei/nameplate/2/0/Nameplate";
pub const URI_OF_THE_PRODUCT: &str = "0173-1#02-AAY811#001";
pub const MANUFACTURER_NAME: &str = "0173-1#02-AAO677#002";
pub const MANUFACTURER_PRODUCT_DESIGNATION: &str = "0173-1#02-AAW338#001";
pub const MANUFACTURER_PRODUCT_FAMILY: &str = "0173-1#02-AAU731#001";
pub const MANUFACTURER_PRODUCT_TYPE: &str = "0173-1#02-AAO057#002";
pub const ORDER_CODE_OF_MANUFACTURER: &str = "0173-1#02-AAO227#002";
pub const SERIAL_NUMBER: &str = "0173-1#02-AAM556#002";
pub const DATE_OF_MANUFACTURE: &str = "0173-1#02-AAR972#002";
pub const FIRMWARE_VERSION: &str = "0173-1#02-AAM985#002";
pub const SOFTWARE_VERSION: &str = "0173-1#02-AAM737#002";

pub const CONTACT_INFORMATION: &str =
    "https://admin-shell.io/zvei/nameplate/1/0/ContactInformations/ContactInformation";
pub const STREET: &str = "0173-1#02-AAO128#002";
pub const ZIPCODE: &str = "0173-1#02-AAO129#002";
pub const CITY_TOWN: &str = "0173-1#02-AAO132#002";
pub const NATIONAL_CODE: &str = "0173-1#02-AAO134#002";
pub const PHONE: &str =
    "https://admin-shell.io/zvei/nameplate/1/0/ContactInformations/ContactInformation/Phone";
pub const TELEPHONE_NUMBER: &str = "0173-1#02-AAO136#002";
pub const EMAIL: &str =
    "https://admin-shell.io/zvei/nameplate/1/0/ContactInformations/ContactInformation/Email";
pub const EMAIL_ADDRESS: &str = "0173-1#02-AAO198#002";

// Configuration submodels
pub const CONFIGURATION_AS_BUILT: &str = "urn:netilion-aas-mapper:submodel:ConfigurationAsBuilt:1:0";
pub const CONFIGURATION_AS_DOCUMENTED: &str =
    "urn:netilion-aas-mapper:submodel:ConfigurationAsDocumented:1:0";
pub const MEASURING_RANGE: &str = "urn:netilion-aas-mapper:concept:MeasuringRange";
pub const MEASURING_RANGE_VALUES: &str = "urn:netilion-aas-mapper:concept:MeasuringRange:Range";
pub const MEASURING_RANGE_UNIT: &str = "urn:netilion-aas-mapper:concept:MeasuringRange:Unit";
pub const SPECIFICATIONS: &str = "urn:netilion-aas-mapper:concept:Specifications";
pub const DOCUMENTS: &str = "urn:netilion-aas-mapper:concept:Documents";
pub const DOCUMENT: &str = "urn:netilion-aas-mapper:concept:Document";
pub const DOCUMENT_NAME: &str = "urn:netilion-aas-mapper:concept:Document:Name";
pub const DOCUMENT_NUMBER: &str = "urn:netilion-aas-mapper:concept:Document:Number";
pub const DOCUMENT_VERSION: &str = "urn:netilion-aas-mapper:concept:Document:Version";
pub const DOCUMENT_FILE: &str = "urn:netilion-aas-mapper:concept:Document:File";
pub const AS_BUILT_REFERENCE: &str = "urn:netilion-aas-mapper:concept:AsBuiltConfiguration";
