//! Marketplace identifiers
//!
//! Ids are opaque to the API, so [`MarketplaceId::new`] accepts anything
//! non-empty. [`MarketplaceId::known`] restricts to the storefronts below.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::credentials::Region;
use crate::errors::{Result, SpApiError};

/// (country code, marketplace id, region)
const CATALOG: &[(&str, &str, Region)] = &[
    ("US", "ATVPDKIKX0DER", Region::NorthAmerica),
    ("CA", "A2EUQ1WTGCTBG2", Region::NorthAmerica),
    ("MX", "A1AM78C64UM0Y8", Region::NorthAmerica),
    ("BR", "A2Q3Y263D00KWC", Region::NorthAmerica),
    ("DE", "A1PA6795UKMFR9", Region::Europe),
    ("FR", "A13V1IB3VIYZZH", Region::Europe),
    ("GB", "A1F83G8C2ARO7P", Region::Europe),
    ("IT", "APJ6JRA9NG5V4", Region::Europe),
    ("ES", "A1RKKUPIHCS9HS", Region::Europe),
    ("NL", "A1805IZSGTT6HS", Region::Europe),
    ("IN", "A21TJRUUN4KGV", Region::Europe),
    ("JP", "A1VC38T7YXB528", Region::FarEast),
    ("AU", "A39IBJ37TRP1C6", Region::FarEast),
    ("SG", "A19VAU5U5O7RUS", Region::FarEast),
];

/// Identifier of a regional storefront.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketplaceId(String);

impl MarketplaceId {
    /// Wrap any non-empty id.
    ///
    /// # Errors
    /// Returns `SpApiError::Config` for a blank id.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(SpApiError::Config("marketplace id must not be empty".into()));
        }
        Ok(Self(id))
    }

    /// Accept only ids from the known storefront catalog.
    ///
    /// # Errors
    /// Returns `SpApiError::Config` for an id outside the catalog.
    pub fn known(id: &str) -> Result<Self> {
        CATALOG
            .iter()
            .find(|(_, known, _)| *known == id.trim())
            .map(|(_, known, _)| Self((*known).to_string()))
            .ok_or_else(|| SpApiError::Config(format!("unknown marketplace id: {id}")))
    }

    /// Look up a storefront by ISO country code (`"DE"`, `"jp"`, ...).
    pub fn from_country_code(code: &str) -> Option<Self> {
        CATALOG
            .iter()
            .find(|(country, _, _)| country.eq_ignore_ascii_case(code.trim()))
            .map(|(_, id, _)| Self((*id).to_string()))
    }

    /// Every storefront in the catalog.
    pub fn all_known() -> Vec<Self> {
        CATALOG.iter().map(|(_, id, _)| Self((*id).to_string())).collect()
    }

    /// Country code of a catalogued storefront.
    pub fn country_code(&self) -> Option<&'static str> {
        self.entry().map(|(country, _, _)| *country)
    }

    /// API region serving a catalogued storefront.
    pub fn region(&self) -> Option<Region> {
        self.entry().map(|(_, _, region)| *region)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn entry(&self) -> Option<&'static (&'static str, &'static str, Region)> {
        CATALOG.iter().find(|(_, id, _)| *id == self.0)
    }
}

impl fmt::Display for MarketplaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MarketplaceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_lookup_round_trips() {
        let us = MarketplaceId::from_country_code("us").unwrap();
        assert_eq!(us.as_str(), "ATVPDKIKX0DER");
        assert_eq!(us.country_code(), Some("US"));
        assert_eq!(us.region(), Some(Region::NorthAmerica));

        let jp = MarketplaceId::from_country_code("JP").unwrap();
        assert_eq!(jp.region(), Some(Region::FarEast));
        assert!(MarketplaceId::from_country_code("ZZ").is_none());
    }

    #[test]
    fn strict_and_permissive_constructors() {
        assert!(MarketplaceId::known("A1PA6795UKMFR9").is_ok());
        assert!(MarketplaceId::known("AXXXXXXXXXX").is_err());

        let custom = MarketplaceId::new("AXXXXXXXXXX").unwrap();
        assert_eq!(custom.country_code(), None);
        assert!(MarketplaceId::new("  ").is_err());
    }

    #[test]
    fn catalog_has_fourteen_storefronts() {
        assert_eq!(MarketplaceId::all_known().len(), 14);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = MarketplaceId::new("ATVPDKIKX0DER").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""ATVPDKIKX0DER""#);
    }
}
