// =============================================================================
// Central Application State — StockLens dashboard backend
// =============================================================================
//
// The single source of truth for the service.  Handlers hold an
// `Arc<AppState>` and reach every subsystem through it.
//
// Thread safety:
//   - parking_lot::RwLock around the runtime config.
//   - The market-data service manages its own interior mutability (the mock
//     cache); the favorites store likewise.

use parking_lot::RwLock;

use crate::favorites::FavoritesStore;
use crate::market_data::{MarketDataService, MockMarket};
use crate::runtime_config::RuntimeConfig;

pub struct AppState {
    pub runtime_config: RwLock<RuntimeConfig>,
    pub market: MarketDataService,
    pub favorites: FavoritesStore,
}

impl AppState {
    pub fn new(config: RuntimeConfig) -> Self {
        let mock = MockMarket::new(config.mock_history_days, config.mock_sample_step);
        let market = MarketDataService::new(mock, config.remote_base_url.clone());
        let favorites = FavoritesStore::open(&config.favorites_path);
        Self {
            runtime_config: RwLock::new(config),
            market,
            favorites,
        }
    }
}
