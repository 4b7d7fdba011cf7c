use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};

use tikkun_core::models::correction::FixType;
use tikkun_engine::{
    AggregationFilter, Aggregator, CorrectionLedger, EngineError, RecordCorrectionInput,
    StatsFilter,
};
use tikkun_storage::MemoryStore;

const FIVE_MINUTES: SignedDuration = SignedDuration::from_secs(300);

fn at(minutes: i64) -> Timestamp {
    Timestamp::from_second(1_700_000_000 + minutes * 60).unwrap()
}

struct Fixture {
    ledger: CorrectionLedger<MemoryStore>,
    aggregator: Aggregator<MemoryStore>,
}

impl Fixture {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            ledger: CorrectionLedger::new(Arc::clone(&store)),
            aggregator: Aggregator::new(store, FIVE_MINUTES),
        }
    }

    async fn record(&self, location_id: &str, original: &str, corrected: &str, minute: i64) {
        self.ledger
            .record_correction_at(
                RecordCorrectionInput {
                    collection_id: "book-1".to_string(),
                    location_id: location_id.to_string(),
                    original_word: original.to_string(),
                    corrected_word: corrected.to_string(),
                    ..Default::default()
                },
                at(minute),
            )
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn same_location_within_window_counts_once() {
    let f = Fixture::new();
    f.record("p1", "אות", "אוֹת", 0).await;
    f.record("p1", "אות", "אוֹת", 2).await;

    let rows = f
        .aggregator
        .find_aggregated_corrections(&AggregationFilter::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].fix_count, 1);
    assert_eq!(rows[0].aggregation_key, "אות|אוֹת");
    assert_eq!(rows[0].latest_correction, at(2));
    assert_eq!(rows[0].location_ids, vec!["p1"]);
}

#[tokio::test]
async fn different_locations_outside_window_both_count() {
    let f = Fixture::new();
    f.record("p1", "אות", "אוֹת", 0).await;
    f.record("p2", "אות", "אוֹת", 10).await;

    let rows = f
        .aggregator
        .find_aggregated_corrections(&AggregationFilter::default())
        .await
        .unwrap();
    assert_eq!(rows[0].fix_count, 2);
    assert_eq!(rows[0].location_ids, vec!["p1", "p2"]);
}

#[tokio::test]
async fn different_locations_inside_window_both_count() {
    let f = Fixture::new();
    f.record("p1", "אות", "אוֹת", 0).await;
    f.record("p2", "אות", "אוֹת", 1).await;

    let rows = f
        .aggregator
        .find_aggregated_corrections(&AggregationFilter::default())
        .await
        .unwrap();
    assert_eq!(rows[0].fix_count, 2);
}

#[tokio::test]
async fn same_location_outside_window_counts_twice() {
    let f = Fixture::new();
    f.record("p1", "אות", "אוֹת", 0).await;
    f.record("p1", "אות", "אוֹת", 10).await;

    let rows = f
        .aggregator
        .find_aggregated_corrections(&AggregationFilter::default())
        .await
        .unwrap();
    assert_eq!(rows[0].fix_count, 2);
}

#[tokio::test]
async fn rows_sort_by_count_then_recency_and_respect_floor_and_limit() {
    let f = Fixture::new();
    f.record("p1", "אות", "אוֹת", 0).await;
    f.record("p2", "אות", "אוֹת", 10).await;
    f.record("p3", "אות", "אוֹת", 20).await;
    f.record("p1", "2", "שתי", 30).await;
    f.record("p4", "2", "שתי", 40).await;
    f.record("p5", "ספר", "סֵפֶר", 50).await;

    let rows = f
        .aggregator
        .find_aggregated_corrections(&AggregationFilter::default())
        .await
        .unwrap();
    let keys: Vec<&str> = rows.iter().map(|r| r.aggregation_key.as_str()).collect();
    assert_eq!(keys, vec!["אות|אוֹת", "2|שתי", "ספר|סֵפֶר"]);

    let floored = f
        .aggregator
        .find_aggregated_corrections(&AggregationFilter {
            min_occurrences: Some(2),
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(floored.len(), 1);
    assert_eq!(floored[0].aggregation_key, "אות|אוֹת");

    let expansions = f
        .aggregator
        .find_aggregated_corrections(&AggregationFilter {
            fix_type: Some(FixType::Expansion),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(expansions.len(), 1);
    assert_eq!(expansions[0].fix_count, 2);
}

#[tokio::test]
async fn drill_down_matches_the_aggregated_count() {
    let f = Fixture::new();
    f.record("p1", "אות", "אוֹת", 0).await;
    f.record("p1", "אות", "אוֹת", 2).await;
    f.record("p2", "אות", "אוֹת", 10).await;

    let rows = f
        .aggregator
        .find_aggregated_corrections(&AggregationFilter::default())
        .await
        .unwrap();
    let records = f
        .aggregator
        .find_corrections_by_aggregation_key("אות|אוֹת", Some("book-1"))
        .await
        .unwrap();

    assert_eq!(records.len(), rows[0].fix_count);
    let times: Vec<Timestamp> = records.iter().map(|r| r.created_at).collect();
    assert_eq!(times, vec![at(10), at(0)]);
}

#[tokio::test]
async fn drill_down_rejects_malformed_key() {
    let f = Fixture::new();
    let err = f
        .aggregator
        .find_corrections_by_aggregation_key("no separator", None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn stats_breakdown_sums_to_total() {
    let f = Fixture::new();
    f.record("p1", "אות", "אוֹת", 0).await;
    f.record("p2", "אות", "אוֹת", 1).await;
    f.record("p1", "2", "שתי", 2).await;
    f.record("p3", "ספר", "ספד", 3).await;

    let stats = f.aggregator.get_stats(&StatsFilter::default()).await.unwrap();
    assert_eq!(stats.total_corrections, 4);
    assert_eq!(stats.unique_words, 3);
    let sum: usize = stats.fix_type_breakdown.iter().map(|b| b.count).sum();
    assert_eq!(sum, stats.total_corrections);
    assert_eq!(stats.fix_type_breakdown[0].fix_type, FixType::Vowelization);
    assert_eq!(stats.fix_type_breakdown[0].count, 2);

    let windowed = f
        .aggregator
        .get_stats(&StatsFilter {
            created_from: Some(at(2)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(windowed.total_corrections, 2);
}

#[tokio::test]
async fn top_corrections_use_raw_counts() {
    let f = Fixture::new();
    f.record("p1", "אות", "אוֹת", 0).await;
    f.record("p1", "אות", "אוֹת", 1).await;
    f.record("p1", "2", "שתי", 2).await;

    let top = f.aggregator.get_top_corrections(1).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].original_word, "אות");
    assert_eq!(top[0].count, 2);
}
