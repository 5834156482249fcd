//! Command-line argument definitions.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `check` | Validate credentials and test the connection |
//! | `report` | Run a report and print its rows |
//! | `inventory` | List FBA inventory summaries |
//! | `orders` | List orders created after a timestamp |
//! | `marketplaces` | List marketplace participations |
//!
//! Marketplaces may be given as an id (`ATVPDKIKX0DER`) or a country code
//! (`US`, `DE`). Configuration comes from `SPGATE_*` variables or
//! `spgate.{json,toml}`.

use clap::{Parser, Subcommand};
use spgate_domain::MarketplaceId;

/// Selling-partner API client
#[derive(Debug, Parser)]
#[command(name = "spgate", version, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Validate credentials and test the connection
    Check,
    /// Run a report and print its rows
    Report {
        /// Report type, e.g. GET_AFN_INVENTORY_DATA
        report_type: String,
        /// Marketplace ids or country codes
        #[arg(required = true, value_parser = parse_marketplace)]
        marketplace_ids: Vec<MarketplaceId>,
        /// Read the document as tab-separated instead of comma-separated
        #[arg(long)]
        tab: bool,
    },
    /// List FBA inventory summaries
    Inventory {
        #[arg(value_parser = parse_marketplace)]
        marketplace_id: MarketplaceId,
    },
    /// List orders created after a timestamp
    Orders {
        #[arg(value_parser = parse_marketplace)]
        marketplace_id: MarketplaceId,
        /// ISO-8601 timestamp
        created_after: String,
    },
    /// List marketplace participations
    Marketplaces,
}

/// Accepts a marketplace id or a two-letter country code.
fn parse_marketplace(arg: &str) -> Result<MarketplaceId, String> {
    if let Some(id) = MarketplaceId::from_country_code(arg) {
        return Ok(id);
    }
    MarketplaceId::new(arg).map_err(|e| format!("invalid marketplace id '{arg}': {e}"))
}
