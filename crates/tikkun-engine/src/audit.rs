use serde::Serialize;
use tracing::info;

/// A structured record of a ledger mutation, emitted through `tracing`.
#[derive(Debug, Clone, Serialize)]
pub struct CorrectionEvent {
    pub action: String,
    pub collection_id: String,
    pub location_id: String,
    pub original_word: String,
    pub corrected_word: String,
    pub details: Option<serde_json::Value>,
}

impl CorrectionEvent {
    pub fn new(
        action: impl Into<String>,
        collection_id: impl Into<String>,
        location_id: impl Into<String>,
        original_word: impl Into<String>,
        corrected_word: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            collection_id: collection_id.into(),
            location_id: location_id.into(),
            original_word: original_word.into(),
            corrected_word: corrected_word.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.collection_id = %self.collection_id,
            audit.location_id = %self.location_id,
            audit.original_word = %self.original_word,
            audit.corrected_word = %self.corrected_word,
            audit.details = %details,
            "correction event"
        );
    }
}
