//! Domain types and models

pub mod credentials;
pub mod inventory;
pub mod marketplace;
pub mod orders;
pub mod page;
pub mod report;
pub mod row;
pub mod sellers;

pub use credentials::{Credentials, Endpoints, Environment, Region, LWA_TOKEN_URL};
pub use inventory::{
    InventoryDetails, InventoryQuery, InventorySummary, ReservedQuantity, UnfulfillableQuantity,
};
pub use marketplace::MarketplaceId;
pub use orders::{Money, Order, OrdersQuery};
pub use page::Page;
pub use report::{CreateReportSpec, ProcessingStatus, ReportDocument, ReportJob};
pub use row::Row;
pub use sellers::{Marketplace, MarketplaceParticipation, Participation};
