//! Read-only views over the ledger: grouped corrections, drill-down,
//! summary stats, and a most-frequent list.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use serde::Deserialize;

use tikkun_core::models::aggregation::{
    AggregatedCorrection, AggregationKey, CorrectionStats, FixTypeCount, TopCorrection,
};
use tikkun_core::models::correction::{CorrectionRecord, FixType};
use tikkun_storage::{CorrectionStore, RecordQuery};

use crate::error::EngineError;

/// Filter for [`Aggregator::find_aggregated_corrections`]. Word filters
/// match substrings; time bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AggregationFilter {
    #[serde(default)]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub original_word: Option<String>,
    #[serde(default)]
    pub corrected_word: Option<String>,
    #[serde(default)]
    pub fix_type: Option<FixType>,
    #[serde(default)]
    pub created_from: Option<Timestamp>,
    #[serde(default)]
    pub created_to: Option<Timestamp>,
    /// Drop groups whose deduplicated count is below this.
    #[serde(default)]
    pub min_occurrences: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsFilter {
    #[serde(default)]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub created_from: Option<Timestamp>,
    #[serde(default)]
    pub created_to: Option<Timestamp>,
}

pub struct Aggregator<S> {
    store: Arc<S>,
    session_window: SignedDuration,
}

impl<S> Clone for Aggregator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            session_window: self.session_window,
        }
    }
}

impl<S: CorrectionStore> Aggregator<S> {
    pub fn new(store: Arc<S>, session_window: SignedDuration) -> Self {
        Self {
            store,
            session_window,
        }
    }

    /// Group records by aggregation key, counting each editing session at a
    /// location once. Sorted by count, then recency.
    pub async fn find_aggregated_corrections(
        &self,
        filter: &AggregationFilter,
    ) -> Result<Vec<AggregatedCorrection>, EngineError> {
        let records = self
            .store
            .query(&RecordQuery {
                collection_id: filter.collection_id.clone(),
                original_word: filter.original_word.clone(),
                corrected_word: filter.corrected_word.clone(),
                fix_type: filter.fix_type,
                created_from: filter.created_from,
                created_to: filter.created_to,
                ..Default::default()
            })
            .await?;

        let mut groups: BTreeMap<String, Vec<CorrectionRecord>> = BTreeMap::new();
        for record in records {
            groups
                .entry(record.aggregation_key.clone())
                .or_default()
                .push(record);
        }

        let min = filter.min_occurrences.unwrap_or(0);
        let mut rows: Vec<AggregatedCorrection> = groups
            .into_iter()
            .filter_map(|(key, group)| self.summarize(key, group))
            .filter(|row| row.fix_count >= min)
            .collect();

        rows.sort_by(|a, b| {
            b.fix_count
                .cmp(&a.fix_count)
                .then_with(|| b.latest_correction.cmp(&a.latest_correction))
                .then_with(|| a.aggregation_key.cmp(&b.aggregation_key))
        });
        if let Some(limit) = filter.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    /// The records behind one aggregated row, newest first.
    pub async fn find_corrections_by_aggregation_key(
        &self,
        aggregation_key: &str,
        collection_id: Option<&str>,
    ) -> Result<Vec<CorrectionRecord>, EngineError> {
        AggregationKey::parse(aggregation_key)
            .map_err(|e| EngineError::Validation(e.to_string()))?;

        let records = self
            .store
            .query(&RecordQuery {
                collection_id: collection_id.map(str::to_string),
                aggregation_key: Some(aggregation_key.to_string()),
                ..Default::default()
            })
            .await?;

        let mut kept = deduplicate_sessions(records, self.session_window);
        kept.reverse();
        Ok(kept)
    }

    pub async fn get_stats(&self, filter: &StatsFilter) -> Result<CorrectionStats, EngineError> {
        let records = self
            .store
            .query(&RecordQuery {
                collection_id: filter.collection_id.clone(),
                created_from: filter.created_from,
                created_to: filter.created_to,
                ..Default::default()
            })
            .await?;

        let unique_words: HashSet<&str> =
            records.iter().map(|r| r.original_word.as_str()).collect();

        let mut counts: HashMap<FixType, usize> = HashMap::new();
        for record in &records {
            *counts.entry(record.fix_type).or_default() += 1;
        }
        let fix_type_breakdown = FixType::ALL
            .into_iter()
            .filter_map(|fix_type| {
                counts
                    .get(&fix_type)
                    .map(|&count| FixTypeCount { fix_type, count })
            })
            .collect();

        Ok(CorrectionStats {
            total_corrections: records.len(),
            unique_words: unique_words.len(),
            fix_type_breakdown,
        })
    }

    /// Most frequent corrections by raw record count.
    pub async fn get_top_corrections(
        &self,
        take: usize,
    ) -> Result<Vec<TopCorrection>, EngineError> {
        let records = self.store.query(&RecordQuery::default()).await?;

        // Records arrive oldest first, so the last write per key carries the
        // most recent fix type.
        let mut groups: HashMap<String, TopCorrection> = HashMap::new();
        for record in records {
            groups
                .entry(record.aggregation_key.clone())
                .and_modify(|top| {
                    top.count += 1;
                    top.fix_type = record.fix_type;
                })
                .or_insert_with(|| TopCorrection {
                    original_word: record.original_word.clone(),
                    corrected_word: record.corrected_word.clone(),
                    fix_type: record.fix_type,
                    count: 1,
                });
        }

        let mut top: Vec<TopCorrection> = groups.into_values().collect();
        top.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.original_word.cmp(&b.original_word))
                .then_with(|| a.corrected_word.cmp(&b.corrected_word))
        });
        top.truncate(take);
        Ok(top)
    }

    fn summarize(
        &self,
        aggregation_key: String,
        group: Vec<CorrectionRecord>,
    ) -> Option<AggregatedCorrection> {
        // Representative fields come from the newest raw record, counted or not.
        let newest = group
            .iter()
            .max_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.fix_sequence.cmp(&b.fix_sequence))
            })?
            .clone();

        let kept = deduplicate_sessions(group, self.session_window);
        let mut location_ids: Vec<String> = Vec::new();
        for record in &kept {
            if !location_ids.contains(&record.location_id) {
                location_ids.push(record.location_id.clone());
            }
        }

        Some(AggregatedCorrection {
            aggregation_key,
            original_word: newest.original_word,
            corrected_word: newest.corrected_word,
            fix_type: newest.fix_type,
            fix_count: kept.len(),
            latest_correction: newest.created_at,
            location_ids,
        })
    }
}

/// Drop records that repeat a kept record at the same location within
/// `window`. Returns the survivors oldest first.
pub fn deduplicate_sessions(
    mut records: Vec<CorrectionRecord>,
    window: SignedDuration,
) -> Vec<CorrectionRecord> {
    records.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.fix_sequence.cmp(&b.fix_sequence))
    });

    let window_ms = window.as_millis();
    let mut kept: Vec<CorrectionRecord> = Vec::with_capacity(records.len());
    for record in records {
        let repeat = kept.iter().any(|k| {
            k.location_id == record.location_id
                && i128::from(record.created_at.as_millisecond() - k.created_at.as_millisecond())
                    .abs()
                    <= window_ms
        });
        if !repeat {
            kept.push(record);
        }
    }
    kept
}
