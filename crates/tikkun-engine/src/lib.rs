//! tikkun-engine
//!
//! The correction engine: an append-only ledger of accepted fixes,
//! aggregated views over it, similar-fix discovery across a collection,
//! and bulk application of one fix to many locations.

pub mod aggregate;
pub mod audit;
pub mod bulk;
pub mod config;
pub mod error;
pub mod ledger;
pub mod similar;

use std::sync::Arc;

use tikkun_match::BoundaryMatcher;
use tikkun_storage::{CorrectionStore, LocationStore};

pub use aggregate::{AggregationFilter, Aggregator, StatsFilter, deduplicate_sessions};
pub use bulk::{BulkFixApplier, BulkFixRequest};
pub use config::EngineConfig;
pub use error::EngineError;
pub use ledger::{CorrectionLedger, RecordCorrectionInput};
pub use similar::SimilarFixFinder;

/// Every engine component wired to one store.
pub struct Engine<S> {
    pub ledger: CorrectionLedger<S>,
    pub aggregator: Aggregator<S>,
    pub finder: SimilarFixFinder<S>,
    pub bulk: BulkFixApplier<S>,
    pub config: EngineConfig,
}

impl<S: LocationStore + CorrectionStore> Engine<S> {
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        let matcher = BoundaryMatcher::new(config.match_options);
        Self {
            ledger: CorrectionLedger::new(Arc::clone(&store)),
            aggregator: Aggregator::new(Arc::clone(&store), config.session_window()),
            finder: SimilarFixFinder::new(Arc::clone(&store), matcher),
            bulk: BulkFixApplier::new(store, matcher),
            config,
        }
    }

    /// Top corrections using the configured default size.
    pub async fn top_corrections(
        &self,
    ) -> Result<Vec<tikkun_core::models::aggregation::TopCorrection>, EngineError> {
        self.aggregator
            .get_top_corrections(self.config.top_corrections_default)
            .await
    }
}
