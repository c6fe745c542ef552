use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::de;

/// A media contract snapshot (`MediaContractSnapshot`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Contract {
    #[serde(rename = "MediaContractID", deserialize_with = "de::number")]
    pub id: i64,
    /// `Active` or `Inactive`.
    #[serde(rename = "MediaContractStatus")]
    pub status: String,
    #[serde(rename = "DateTimeCreatedUtc", deserialize_with = "de::timestamp")]
    pub created_utc: Option<DateTime<Utc>>,
    #[serde(rename = "RealtorID", deserialize_with = "de::number")]
    pub realtor_id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "AddressLine1")]
    pub address: String,
    #[serde(rename = "PostalCode")]
    pub postal_code: String,
    #[serde(rename = "CityName")]
    pub city: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "SubRegion")]
    pub sub_region: String,
    #[serde(rename = "CountryCode")]
    pub country: String,
    #[serde(rename = "PhoneNumber")]
    pub phone: String,
    #[serde(rename = "FaxNumber")]
    pub fax: String,
    #[serde(rename = "EmailAddress")]
    pub email: String,
    #[serde(rename = "WebAddress")]
    pub website: String,
}

impl Contract {
    pub const STATUS_ACTIVE: &'static str = "Active";

    /// Whether the remote reports the contract as `Active`. Case-sensitive.
    pub fn is_active(&self) -> bool {
        self.status == Self::STATUS_ACTIVE
    }
}

/// A property summary (`RealEstatePropertySummarySnapshot`).
///
/// The remote spells the id and status elements `RealEstatePropery...`;
/// those names are what it actually sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Summary {
    #[serde(rename = "RealEstateProperyID", deserialize_with = "de::number")]
    pub id: i64,
    #[serde(rename = "RealtorID", deserialize_with = "de::number")]
    pub realtor_id: i64,
    #[serde(rename = "ModificationDateTimeUtc", deserialize_with = "de::timestamp")]
    pub updated_utc: Option<DateTime<Utc>>,
    #[serde(rename = "AddressSummary")]
    pub address: String,
    #[serde(rename = "RealEstateProperyStatus")]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(status: &str) -> Contract {
        Contract {
            status: status.to_string(),
            ..Contract::default()
        }
    }

    #[test]
    fn active_only_for_exact_status() {
        assert!(contract("Active").is_active());
        assert!(!contract("active").is_active());
        assert!(!contract("ACTIVE").is_active());
        assert!(!contract("Inactive").is_active());
        assert!(!contract("").is_active());
    }

    #[test]
    fn decodes_contract_fields() {
        let xml = r#"<MediaContractSnapshot>
            <MediaContractID>12</MediaContractID>
            <MediaContractStatus>Inactive</MediaContractStatus>
            <DateTimeCreatedUtc>2016-05-04T08:00:00</DateTimeCreatedUtc>
            <RealtorID>77</RealtorID>
            <Name>Makelaardij Zuid</Name>
            <AddressLine1>Kerkstraat 1</AddressLine1>
            <PostalCode>1234 AB</PostalCode>
            <CityName>Utrecht</CityName>
            <Region>Utrecht</Region>
            <SubRegion>Centrum</SubRegion>
            <CountryCode>NL</CountryCode>
            <PhoneNumber>030-1234567</PhoneNumber>
            <FaxNumber/>
            <EmailAddress>info@zuid.example</EmailAddress>
            <WebAddress>https://zuid.example</WebAddress>
        </MediaContractSnapshot>"#;
        let c: Contract = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(c.id, 12);
        assert_eq!(c.realtor_id, 77);
        assert!(!c.is_active());
        assert_eq!(c.created_utc.unwrap().to_rfc3339(), "2016-05-04T08:00:00+00:00");
        assert_eq!(c.address, "Kerkstraat 1");
        assert_eq!(c.city, "Utrecht");
        assert_eq!(c.sub_region, "Centrum");
        assert_eq!(c.country, "NL");
        assert_eq!(c.fax, "");
        assert_eq!(c.website, "https://zuid.example");
    }

    #[test]
    fn decodes_summary_with_remote_spelling() {
        let xml = r#"<RealEstatePropertySummarySnapshot>
            <RealEstateProperyID>4001</RealEstateProperyID>
            <RealtorID>7</RealtorID>
            <ModificationDateTimeUtc>2017-01-02T03:04:05</ModificationDateTimeUtc>
            <AddressSummary>Dorpsweg 3, Ede</AddressSummary>
            <RealEstateProperyStatus>AVAILABLE</RealEstateProperyStatus>
        </RealEstatePropertySummarySnapshot>"#;
        let s: Summary = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(s.id, 4001);
        assert_eq!(s.realtor_id, 7);
        assert!(s.updated_utc.is_some());
        assert_eq!(s.address, "Dorpsweg 3, Ede");
        assert_eq!(s.status, "AVAILABLE");
    }
}
