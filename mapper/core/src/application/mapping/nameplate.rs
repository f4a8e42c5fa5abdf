// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Digital Nameplate submodel
//!
//! Built from the asset plus its product, manufacturer, installed software
//! and product categories. Every field is optional and omitted when the
//! source value is missing.

use super::elements::{collection, ml_property, present, property, submodel, typed_property};
use super::semantics as sem;
use crate::domain::aas::{DataTypeDefXsd, Submodel, SubmodelElement};
use crate::domain::identifiers::{submodel_id, SubmodelName};
use crate::domain::netilion::{
    NetilionAsset, NetilionCategory, NetilionManufacturer, NetilionProduct, NetilionSoftware,
};

/// Pre-fetched inputs of the nameplate mapping
#[derive(Debug, Clone, Copy)]
pub struct NameplateSource<'a> {
    pub asset: &'a NetilionAsset,
    pub product: Option<&'a NetilionProduct>,
    pub manufacturer: Option<&'a NetilionManufacturer>,
    pub softwares: &'a [NetilionSoftware],
    pub categories: &'a [NetilionCategory],
}

pub fn nameplate_submodel(server_root: &str, source: &NameplateSource<'_>) -> Submodel {
    let asset = source.asset;
    let product = source.product;
    let manufacturer = source.manufacturer;

    let firmware = source
        .softwares
        .iter()
        .find(|s| s.is_firmware())
        .and_then(|s| s.version_number.as_deref());
    let software = source
        .softwares
        .iter()
        .find(|s| !s.is_firmware())
        .and_then(|s| s.version_number.as_deref());
    let family = source.categories.iter().find_map(|c| present(c.name.as_deref()));

    let elements: Vec<SubmodelElement> = [
        property(
            "URIOfTheProduct",
            sem::URI_OF_THE_PRODUCT,
            product.and_then(|p| p.href.as_deref()),
        ),
        ml_property(
            "ManufacturerName",
            sem::MANUFACTURER_NAME,
            manufacturer.and_then(|m| m.name.as_deref()),
        ),
        ml_property(
            "ManufacturerProductDesignation",
            sem::MANUFACTURER_PRODUCT_DESIGNATION,
            product.and_then(|p| p.name.as_deref()),
        ),
        manufacturer.and_then(contact_information),
        ml_property("ManufacturerProductFamily", sem::MANUFACTURER_PRODUCT_FAMILY, family),
        property(
            "ManufacturerProductType",
            sem::MANUFACTURER_PRODUCT_TYPE,
            product.and_then(|p| p.product_code.as_deref()),
        ),
        property(
            "OrderCodeOfManufacturer",
            sem::ORDER_CODE_OF_MANUFACTURER,
            product.and_then(|p| p.product_code.as_deref()),
        ),
        property("SerialNumber", sem::SERIAL_NUMBER, asset.serial_number.as_deref()),
        typed_property(
            "DateOfManufacture",
            sem::DATE_OF_MANUFACTURE,
            DataTypeDefXsd::Date,
            asset.production_date.as_deref().map(date_part),
        ),
        ml_property("FirmwareVersion", sem::FIRMWARE_VERSION, firmware),
        ml_property("SoftwareVersion", sem::SOFTWARE_VERSION, software),
    ]
    .into_iter()
    .flatten()
    .collect();

    submodel(
        submodel_id(server_root, asset.id, SubmodelName::Nameplate),
        SubmodelName::Nameplate.as_str(),
        sem::NAMEPLATE,
        elements,
    )
}

/// ContactInformation with nested Phone and Email collections
fn contact_information(manufacturer: &NetilionManufacturer) -> Option<SubmodelElement> {
    let street = match (present(manufacturer.street.as_deref()), present(manufacturer.street_number.as_deref())) {
        (Some(street), Some(number)) => Some(format!("{} {}", street, number)),
        (Some(street), None) => Some(street.to_string()),
        _ => None,
    };

    collection(
        "ContactInformation",
        sem::CONTACT_INFORMATION,
        [
            ml_property("Street", sem::STREET, street.as_deref()),
            ml_property("Zipcode", sem::ZIPCODE, manufacturer.zip_code.as_deref()),
            ml_property("CityTown", sem::CITY_TOWN, manufacturer.city.as_deref()),
            ml_property("NationalCode", sem::NATIONAL_CODE, manufacturer.country_code.as_deref()),
            collection(
                "Phone",
                sem::PHONE,
                [ml_property("TelephoneNumber", sem::TELEPHONE_NUMBER, manufacturer.phone.as_deref())],
            ),
            collection(
                "Email",
                sem::EMAIL,
                [property("EmailAddress", sem::EMAIL_ADDRESS, manufacturer.email.as_deref())],
            ),
        ],
    )
}

/// Netilion sends timestamps; xs:date wants the date only
fn date_part(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::netilion::{NetilionRef, NetilionSoftwareType};

    fn asset() -> NetilionAsset {
        NetilionAsset {
            id: 12,
            serial_number: Some("K1000A01".to_string()),
            production_date: Some("2021-03-04T00:00:00Z".to_string()),
            description: None,
            last_seen_at: None,
            status: None,
            product: Some(NetilionRef { id: 5, href: None }),
        }
    }

    fn manufacturer() -> NetilionManufacturer {
        NetilionManufacturer {
            id: 3,
            name: Some("Endress+Hauser".to_string()),
            street: Some("Hauptstrasse".to_string()),
            street_number: Some("1".to_string()),
            zip_code: Some("79689".to_string()),
            city: Some("Maulburg".to_string()),
            country_code: Some("DE".to_string()),
            phone: None,
            email: Some("info@example.com".to_string()),
        }
    }

    #[test]
    fn test_missing_production_date_omits_date_of_manufacture() {
        let mut asset = asset();
        asset.production_date = None;
        let source = NameplateSource {
            asset: &asset,
            product: None,
            manufacturer: None,
            softwares: &[],
            categories: &[],
        };

        let submodel = nameplate_submodel("http://localhost:8080", &source);

        assert!(submodel.element("DateOfManufacture").is_none());
        assert!(submodel.element("SerialNumber").is_some());
        let json = serde_json::to_value(&submodel).unwrap();
        assert!(!json.to_string().contains("DateOfManufacture"));
    }

    #[test]
    fn test_full_nameplate() {
        let asset = asset();
        let product = NetilionProduct {
            id: 5,
            product_code: Some("PMC51".to_string()),
            name: Some("Cerabar M".to_string()),
            description: None,
            manufacturer: Some(NetilionRef { id: 3, href: None }),
            href: Some("https://api.netilion.endress.com/v1/products/5".to_string()),
        };
        let manufacturer = manufacturer();
        let softwares = vec![NetilionSoftware {
            id: 8,
            version_number: Some("01.00.zz".to_string()),
            software_type: Some(NetilionSoftwareType { id: 1, name: Some("Firmware".to_string()) }),
        }];
        let categories = vec![NetilionCategory { id: 9, name: Some("Pressure".to_string()), parent: None }];

        let submodel = nameplate_submodel(
            "http://localhost:8080/",
            &NameplateSource {
                asset: &asset,
                product: Some(&product),
                manufacturer: Some(&manufacturer),
                softwares: &softwares,
                categories: &categories,
            },
        );

        assert_eq!(submodel.id(), "http://localhost:8080/mapper/shells/12/submodels/nameplate");
        assert_eq!(submodel.identity.id_short.as_deref(), Some("Nameplate"));
        assert!(submodel.element("FirmwareVersion").is_some());
        assert!(submodel.element("SoftwareVersion").is_none());
        assert!(submodel.element("ManufacturerProductFamily").is_some());
        assert!(submodel.validate().is_empty());

        let date = submodel.element("DateOfManufacture").and_then(|e| e.as_property()).unwrap();
        assert_eq!(date.value.as_deref(), Some("2021-03-04"));
        assert_eq!(date.value_type, DataTypeDefXsd::Date);
    }

    #[test]
    fn test_contact_information_nesting_is_presence_gated() {
        let contact = contact_information(&manufacturer()).unwrap();
        let contact = contact.as_collection().unwrap();

        assert!(contact.element("Phone").is_none());
        let email = contact.element("Email").and_then(|e| e.as_collection()).unwrap();
        assert!(email.element("EmailAddress").is_some());
        let street = contact.element("Street").unwrap();
        assert_eq!(
            serde_json::to_value(street).unwrap()["value"][0]["text"],
            "Hauptstrasse 1"
        );

        let empty = NetilionManufacturer {
            id: 1,
            name: Some("Only a name".to_string()),
            street: None,
            street_number: None,
            zip_code: None,
            city: None,
            country_code: None,
            phone: None,
            email: None,
        };
        assert!(contact_information(&empty).is_none());
    }
}
