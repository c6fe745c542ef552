//! Full property record (`RealEstateProperty`) and its sub-records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::codes::{
    Acceptance, AttachmentType, FileType, PriceCode, PropertyStatus, PurchaseCondition,
    PurchaseSpecification, RentSpecification, RentType,
};
use crate::de;

wrapped_list!(attachment_list, "Attachment", Attachment);
wrapped_list!(translations, "Translation", Translation);
wrapped_list!(specification_list, "Specification", String);

/// Text of the first `Translation` child, or empty.
fn first_translation<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let all = translations(deserializer)?;
    Ok(all.into_iter().next().map(|t| t.text).unwrap_or_default())
}

/// Rent inclusions in document order, repeats dropped.
fn rent_specifications<'de, D>(deserializer: D) -> Result<Vec<RentSpecification>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut specs: Vec<RentSpecification> = Vec::new();
    for raw in specification_list(deserializer)? {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let spec = RentSpecification::from(raw);
        if !specs.contains(&spec) {
            specs.push(spec);
        }
    }
    Ok(specs)
}

/// One language variant of a text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Translation {
    #[serde(rename = "@Language")]
    pub language: String,
    #[serde(rename = "$text")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Attachment {
    #[serde(rename = "CreationDateTime", deserialize_with = "de::timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "Hash")]
    pub hash: String,
    #[serde(rename = "FileType", deserialize_with = "de::code")]
    pub file_type: Option<FileType>,
    #[serde(rename = "ModificationDateTime", deserialize_with = "de::timestamp")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(rename = "URLNormalizedFile")]
    pub url: String,
    #[serde(rename = "Title", deserialize_with = "first_translation")]
    pub title: String,
    #[serde(rename = "Type", deserialize_with = "de::code")]
    pub kind: Option<AttachmentType>,
}

/// The listing agency (`Contact>Agency`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Agency {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "LogoURL")]
    pub logo_url: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "WebsiteURL")]
    pub website_url: String,
}

/// Financial data (`Financials`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Price {
    #[serde(rename = "RentPrice", deserialize_with = "de::number")]
    pub rent_price: i64,
    #[serde(rename = "RentPriceType", deserialize_with = "de::code")]
    pub rent_type: Option<RentType>,
    #[serde(rename = "PurchasePrice", deserialize_with = "de::number")]
    pub purchase_price: i64,
    #[serde(rename = "PurchaseCondition", deserialize_with = "de::code")]
    pub purchase_condition: Option<PurchaseCondition>,
    #[serde(rename = "PurchaseSpecification", deserialize_with = "de::code")]
    pub purchase_specification: Option<PurchaseSpecification>,
    #[serde(rename = "PriceCode", deserialize_with = "de::code")]
    pub price_code: Option<PriceCode>,
    #[serde(rename = "RentSpecification", deserialize_with = "rent_specifications")]
    pub rent_specification: Vec<RentSpecification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Offer {
    #[serde(rename = "Acceptance", deserialize_with = "de::code")]
    pub acceptance: Option<Acceptance>,
    #[serde(rename = "AcceptanceDate", deserialize_with = "de::timestamp")]
    pub acceptance_date: Option<DateTime<Utc>>,
    #[serde(rename = "IsForRent", deserialize_with = "de::flag")]
    pub is_for_rent: bool,
    #[serde(rename = "IsForSale", deserialize_with = "de::flag")]
    pub is_for_sale: bool,
    #[serde(rename = "IsSpecial", deserialize_with = "de::flag")]
    pub is_special: bool,
    #[serde(rename = "IsTopper", deserialize_with = "de::flag")]
    pub is_topper: bool,
    #[serde(rename = "AvailableFromDate", deserialize_with = "de::timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "AvailableUntilDate", deserialize_with = "de::timestamp")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Postal location (`Location>Address`).
///
/// Street and city names are translatable on the remote; the first
/// translation is used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(rename = "Streetname", deserialize_with = "first_translation")]
    pub street: String,
    #[serde(rename = "HouseNumber")]
    pub number: String,
    #[serde(rename = "HouseNumberPostfix")]
    pub addition: String,
    #[serde(rename = "PostalCode")]
    pub postal_code: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "CityName", deserialize_with = "first_translation")]
    pub city: String,
    #[serde(rename = "CountryCode")]
    pub country: String,
    #[serde(rename = "Latitude", deserialize_with = "de::number")]
    pub lat: f64,
    #[serde(rename = "Longitude", deserialize_with = "de::number")]
    pub lng: f64,
}

/// Bookkeeping data (`PropertyInfo`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Info {
    #[serde(rename = "ID", deserialize_with = "de::number")]
    pub id: i64,
    #[serde(rename = "ForeignID")]
    pub foreign_id: String,
    #[serde(rename = "CreationDateTime", deserialize_with = "de::timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "ModificationDateTime", deserialize_with = "de::timestamp")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(rename = "MandateDate", deserialize_with = "de::timestamp")]
    pub mandate_date: Option<DateTime<Utc>>,
    #[serde(rename = "Status", deserialize_with = "de::code")]
    pub status: Option<PropertyStatus>,
}

/// Free-text descriptions, each in every language the remote has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Descriptions {
    #[serde(rename = "Title", deserialize_with = "translations")]
    pub title: Vec<Translation>,
    #[serde(rename = "AdText", deserialize_with = "translations")]
    pub ad: Vec<Translation>,
    #[serde(rename = "GroundFloorDescription", deserialize_with = "translations")]
    pub ground_floor: Vec<Translation>,
    #[serde(rename = "FirstFloorDescription", deserialize_with = "translations")]
    pub first_floor: Vec<Translation>,
    #[serde(rename = "SecondFloorDescription", deserialize_with = "translations")]
    pub second_floor: Vec<Translation>,
    #[serde(rename = "OtherFloorDescription", deserialize_with = "translations")]
    pub other_floor: Vec<Translation>,
    #[serde(rename = "GardenDescription", deserialize_with = "translations")]
    pub garden: Vec<Translation>,
    #[serde(rename = "BalconyDescription", deserialize_with = "translations")]
    pub balcony: Vec<Translation>,
    #[serde(rename = "DetailsDescription", deserialize_with = "translations")]
    pub details: Vec<Translation>,
}

impl Descriptions {
    /// Title text in `language`, if the remote sent one.
    pub fn title_in(&self, language: &str) -> Option<&str> {
        self.title
            .iter()
            .find(|t| t.language.eq_ignore_ascii_case(language))
            .map(|t| t.text.as_str())
    }
}

/// A property listing. Any sub-record the remote leaves out is `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "PropertyXml")]
pub struct Property {
    pub area_total_effective: i64,
    pub bedroom_count: i64,
    pub room_count: i64,
    /// In the order the remote lists them.
    pub attachments: Vec<Attachment>,
    pub agency: Option<Agency>,
    pub price: Option<Price>,
    pub location: Option<Location>,
    pub offer: Option<Offer>,
    pub info: Option<Info>,
    pub descriptions: Option<Descriptions>,
}

impl Property {
    pub fn photos(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments
            .iter()
            .filter(|a| a.kind == Some(AttachmentType::Photo))
    }
}

// Wire shape of `RealEstateProperty`. Several fields sit one level down
// (`Counts>CountOfRooms`, `Location>Address`) and share a parent element, so
// they are read into these intermediates and flattened by `From`.

#[derive(Default, Deserialize)]
#[serde(default)]
struct PropertyXml {
    #[serde(rename = "AreaTotals")]
    area_totals: AreaTotals,
    #[serde(rename = "Counts")]
    counts: Counts,
    #[serde(rename = "Attachments", deserialize_with = "attachment_list")]
    attachments: Vec<Attachment>,
    #[serde(rename = "Contact")]
    contact: Contact,
    #[serde(rename = "Financials")]
    financials: Option<Price>,
    #[serde(rename = "Location")]
    location: LocationXml,
    #[serde(rename = "Offer")]
    offer: Option<Offer>,
    #[serde(rename = "PropertyInfo")]
    info: Option<Info>,
    #[serde(rename = "Descriptions")]
    descriptions: Option<Descriptions>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct AreaTotals {
    #[serde(rename = "EffectiveArea", deserialize_with = "de::number")]
    effective: i64,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct Counts {
    #[serde(rename = "CountOfBedrooms", deserialize_with = "de::number")]
    bedrooms: i64,
    #[serde(rename = "CountOfRooms", deserialize_with = "de::number")]
    rooms: i64,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct Contact {
    #[serde(rename = "Agency")]
    agency: Option<Agency>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct LocationXml {
    #[serde(rename = "Address")]
    address: Option<Location>,
}

impl From<PropertyXml> for Property {
    fn from(raw: PropertyXml) -> Self {
        Self {
            area_total_effective: raw.area_totals.effective,
            bedroom_count: raw.counts.bedrooms,
            room_count: raw.counts.rooms,
            attachments: raw.attachments,
            agency: raw.contact.agency,
            price: raw.financials,
            location: raw.location.address,
            offer: raw.offer,
            info: raw.info,
            descriptions: raw.descriptions,
        }
    }
}
