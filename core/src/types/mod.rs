//! Domain records decoded from the remote's XML.
//!
//! # Design
//! The mapping from element paths to fields is declared with serde
//! attributes and decoded by quick-xml. Element names are matched by local
//! name, so namespace prefixes on the wire don't matter. Every record is
//! `#[serde(default)]`: an absent element leaves its field at the zero value,
//! and absent sub-trees become `None` or an empty `Vec`.
//!
//! Paths with an intermediate wrapper element (`ArrayOfX>X`, `Title>Translation`)
//! are unwrapped by the helpers generated with `wrapped_list!`.

/// Generates a `deserialize_with` helper that reads `<Wrapper><Child/>...</Wrapper>`
/// into a `Vec` of the children.
macro_rules! wrapped_list {
    ($fn_name:ident, $child:tt, $item:ty) => {
        pub(crate) fn $fn_name<'de, D>(deserializer: D) -> Result<Vec<$item>, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            #[derive(serde::Deserialize)]
            struct Wrapper {
                #[serde(rename = $child, default)]
                items: Vec<$item>,
            }
            <Wrapper as serde::Deserialize>::deserialize(deserializer).map(|w| w.items)
        }
    };
}

mod codes;
mod contract;
mod property;

use serde::{Deserialize, Deserializer};

pub use codes::{
    Acceptance, AttachmentType, FileType, PriceCode, PropertyStatus, PurchaseCondition,
    PurchaseSpecification, RentSpecification, RentType,
};
pub use contract::{Contract, Summary};
pub use property::{
    Agency, Attachment, Descriptions, Info, Location, Offer, Price, Property, Translation,
};

use crate::de;

wrapped_list!(contract_list, "MediaContractSnapshot", Contract);
wrapped_list!(summary_list, "RealEstatePropertySummarySnapshot", Summary);

/// The `<Result>` envelope every endpoint answers with.
///
/// Which payload is filled in depends on the endpoint; the others stay empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Response {
    #[serde(rename = "IsSuccess", deserialize_with = "de::flag")]
    pub success: bool,

    /// Only meaningful when `success` is false.
    #[serde(rename = "ErrorMessage", deserialize_with = "trimmed")]
    pub error_message: String,

    #[serde(rename = "ArrayOfMediaContractSnapshot", deserialize_with = "contract_list")]
    pub contracts: Vec<Contract>,

    #[serde(
        rename = "ArrayOfRealEstatePropertySummarySnapshot",
        deserialize_with = "summary_list"
    )]
    pub summaries: Vec<Summary>,

    #[serde(rename = "RealEstateProperty")]
    pub property: Option<Property>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.success
    }
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}
