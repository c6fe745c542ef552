//! Enumerated values used by property records.
//!
//! The remote documents a closed set for each of these, but new values do
//! show up. Anything unrecognised lands in `Unknown` with the original text, so
//! decoding never fails on an enum and `as_str` always gives back exactly
//! what was sent.

use std::fmt;

macro_rules! remote_code {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:tt),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            /// A value outside the documented set, verbatim.
            Unknown(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Unknown(raw) => raw,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Unknown(_))
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($wire => $name::$variant,)+
                    _ => $name::Unknown(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                $name::from(raw.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

remote_code! {
    /// Availability of a listing.
    PropertyStatus {
        Available => "AVAILABLE",
        SoldUnderConditions => "SOLD_UNDER_CONDITIONS",
        RentedUnderConditions => "RENTED_UNDER_CONDITIONS",
        Sold => "SOLD",
        Rented => "RENTED",
        Withdrawn => "WITHDRAWN",
    }
}

remote_code! {
    /// Period or unit the rent price refers to.
    RentType {
        PricePerMonth => "PRICE_PER_MONTH",
        PricePerYear => "PRICE_PER_YEAR",
        PricePerQuarter => "PRICE_PER_QUARTER",
        PricePerHalfYear => "PRICE_PER_HALF_YEAR",
        PricePerContract => "PRICE_PER_CONTRACT",
        M2PerMonth => "M2_PER_MONTH",
        M2PerYear => "M2_PER_YEAR",
    }
}

remote_code! {
    PurchaseCondition {
        CostsBuyer => "COSTS_BUYER",
        FreeOnName => "FREE_ON_NAME",
    }
}

remote_code! {
    PurchaseSpecification {
        ExclusiveInterimInterest => "EXCLUSIVE_INTERIM_INTEREST",
        VatFiscaled => "VAT_FISCALED",
        VatInclusive => "VAT_INCLUSIVE",
        Indexed => "INDEXED",
    }
}

remote_code! {
    /// How the asking price is to be read.
    PriceCode {
        HigherBudget => "HIGHER_BUDGET",
        PublicAuction => "PUBLIC_AUCTION",
        PriceInConsultation => "PRICE_IN_CONSULTATION",
        PriceToBeNegotiated => "PRICE_TO_BE_NEGOTIATED",
        PriceOnRequest => "PRICE_ON_REQUEST",
        AnyPlausibleBid => "ANY_PLAUSIBLE_BID",
        FixedPrice => "FIXED_PRICE",
        ByTender => "BY_TENDER",
        AskingPrice => "ASKING_PRICE",
    }
}

remote_code! {
    /// What the rent price includes.
    RentSpecification {
        InclVat => "INCL_VAT",
        Indexed => "INDEXED",
        InclServiceCosts => "INCL_SERVICE_COSTS",
        InclGas => "INCL_GAS",
        InclElectricity => "INCL_ELECTRICITY",
        InclWater => "INCL_WATER",
        InclFurniture => "INCL_FURNITURE",
    }
}

remote_code! {
    /// How offers on the listing are accepted.
    Acceptance {
        InConcert => "IN_CONCERT",
        ByDate => "BY_DATE",
        Direct => "DIRECT",
    }
}

remote_code! {
    FileType {
        Avi => "AVI",
        Bmp => "BMP",
        Csv => "CSV",
        Doc => "DOC",
        Docx => "DOCX",
        Flv => "FLV",
        Gif => "GIF",
        Jpg => "JPG",
        Mov => "MOV",
        Mp3 => "MP3",
        Mpg => "MPG",
        Msg => "MSG",
        Pdf => "PDF",
        Png => "PNG",
        Pps => "PPS",
        Ppsx => "PPSX",
        Ppt => "PPT",
        Pptx => "PPTX",
        Rtf => "RTF",
        Spd => "SPD",
        Tif => "TIF",
        Txt => "TXT",
        Wmv => "WMV",
        Xls => "XLS",
        Xlsx => "XLSX",
        Xml => "XML",
        Youtube => "YOUTUBE",
        Zip => "ZIP",
    }
}

remote_code! {
    /// Role of an attachment within the listing.
    AttachmentType {
        Photo => "PHOTO",
        Floorplan => "FLOORPLAN",
        Brochure => "BROCHURE",
        EnergyCertificate => "ENERGY_CERTIFICATE",
        CadastralMessage => "CADASTRAL_MESSAGE",
        CadastralMap => "CADASTRAL_MAP",
        Video => "VIDEO",
        Other => "OTHER",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values_map_to_variants() {
        assert_eq!(PropertyStatus::from("SOLD"), PropertyStatus::Sold);
        assert_eq!(RentType::from("M2_PER_YEAR"), RentType::M2PerYear);
        assert_eq!(FileType::from("YOUTUBE"), FileType::Youtube);
        assert!(PriceCode::from("BY_TENDER").is_known());
    }

    #[test]
    fn unknown_values_are_preserved() {
        let status = PropertyStatus::from("UNDER_OFFER");
        assert_eq!(status, PropertyStatus::Unknown("UNDER_OFFER".to_string()));
        assert_eq!(status.as_str(), "UNDER_OFFER");
        assert!(!status.is_known());
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(
            Acceptance::from("direct"),
            Acceptance::Unknown("direct".to_string())
        );
    }

    #[test]
    fn documented_other_is_distinct_from_unknown() {
        assert_eq!(AttachmentType::from("OTHER"), AttachmentType::Other);
        assert_eq!(AttachmentType::Other.as_str(), "OTHER");
        assert_eq!(AttachmentType::from("PANORAMA").to_string(), "PANORAMA");
    }
}
