//! Marketplace participations of the authorized seller

use serde::{Deserialize, Serialize};

/// A marketplace the seller can sell in, with its participation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceParticipation {
    pub marketplace: Marketplace,
    pub participation: Participation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marketplace {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub default_currency_code: String,
    #[serde(default)]
    pub default_language_code: String,
    #[serde(default)]
    pub domain_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub is_participating: bool,
    #[serde(default)]
    pub has_suspended_listings: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn participation_reads_platform_shape() {
        let entry: MarketplaceParticipation = serde_json::from_value(json!({
            "marketplace": {
                "id": "ATVPDKIKX0DER",
                "name": "Amazon.com",
                "countryCode": "US",
                "defaultCurrencyCode": "USD",
                "defaultLanguageCode": "en_US",
                "domainName": "www.amazon.com"
            },
            "participation": {"isParticipating": true, "hasSuspendedListings": false}
        }))
        .unwrap();

        assert_eq!(entry.marketplace.country_code, "US");
        assert!(entry.participation.is_participating);
    }
}
