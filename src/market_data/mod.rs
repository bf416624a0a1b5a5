pub mod mock;
pub mod service;

// Re-export the service types for convenient access
// (e.g. `use crate::market_data::MarketDataService`).
pub use mock::MockMarket;
pub use service::MarketDataService;
