//! Command execution.

use anyhow::Context;
use serde_json::json;
use spgate_core::{DelimitedTextParser, ResultSink};
use spgate_domain::{InventoryQuery, OrdersQuery};
use spgate_infra::{config, SpApi};
use tracing::info;

use crate::cli::Command;
use crate::sink::JsonLinesSink;

/// Execute `command`; `Ok(false)` signals a failed check.
pub async fn run(command: Command) -> anyhow::Result<bool> {
    let config = config::load().context("failed to load configuration")?;
    let api = SpApi::from_config(&config).context("failed to build client")?;
    let sink = JsonLinesSink::new(std::io::stdout());

    match command {
        Command::Check => {
            let credentials_valid = api.validate_credentials().await;
            let connection_ok = credentials_valid && api.test_connection().await;
            let summary = json!({
                "credentials_valid": credentials_valid,
                "connection_ok": connection_ok,
            });
            ResultSink::<serde_json::Value>::write_batch(&sink, &[summary]).await?;
            ResultSink::<serde_json::Value>::finish(&sink).await?;
            return Ok(credentials_valid && connection_ok);
        }
        Command::Report { report_type, marketplace_ids, tab } => {
            let api = if tab { api.with_parser(DelimitedTextParser::tab()) } else { api };
            let rows = api.run_full_cycle(&report_type, &marketplace_ids).await?;
            info!(rows = rows.len(), report_type = %report_type, "Report finished");
            sink.write_batch(&rows[..]).await?;
            ResultSink::<spgate_domain::Row>::finish(&sink).await?;
        }
        Command::Inventory { marketplace_id } => {
            let summaries = api.inventory_summaries(&InventoryQuery::new(marketplace_id)).await?;
            sink.write_batch(&summaries[..]).await?;
            ResultSink::<spgate_domain::InventorySummary>::finish(&sink).await?;
        }
        Command::Orders { marketplace_id, created_after } => {
            let query = OrdersQuery::created_after(vec![marketplace_id], created_after);
            let orders = api.orders(&query).await?;
            sink.write_batch(&orders[..]).await?;
            ResultSink::<spgate_domain::Order>::finish(&sink).await?;
        }
        Command::Marketplaces => {
            let participations = api.marketplace_participations().await?;
            sink.write_batch(&participations[..]).await?;
            ResultSink::<spgate_domain::MarketplaceParticipation>::finish(&sink).await?;
        }
    }

    Ok(true)
}
