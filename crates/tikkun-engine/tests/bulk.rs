use std::sync::Arc;

use tikkun_core::models::correction::FixType;
use tikkun_core::models::location::Location;
use tikkun_core::models::suggestion::{BulkOutcome, SkipReason};
use tikkun_engine::{
    AggregationFilter, BulkFixRequest, Engine, EngineConfig, EngineError, RecordCorrectionInput,
};
use tikkun_storage::{LocationStore, MemoryStore};

fn location(id: &str, collection_id: &str, completed: bool, text: &str) -> Location {
    Location {
        id: id.to_string(),
        collection_id: collection_id.to_string(),
        ordering_index: 0,
        page_id: None,
        page_number: None,
        completed,
        text: text.to_string(),
    }
}

async fn engine() -> (Arc<MemoryStore>, Engine<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    for l in [
        location("a", "book-1", false, "כל אות חשובה."),
        location("b", "book-1", false, "אות ועוד אות. אותיות לא."),
        location("c", "book-1", true, "כל אות"),
        location("d", "book-1", false, "אותיות בלבד"),
        location("x", "book-2", false, "כל אות"),
    ] {
        store.put_location(l).await.unwrap();
    }
    let engine = Engine::new(Arc::clone(&store), EngineConfig::default());
    (store, engine)
}

fn request(location_ids: &[&str]) -> BulkFixRequest {
    BulkFixRequest {
        collection_id: "book-1".to_string(),
        original_word: "אות".to_string(),
        corrected_word: "אוֹת".to_string(),
        location_ids: location_ids.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn applies_and_reports_each_location() {
    let (store, engine) = engine().await;

    let outcomes = engine
        .bulk
        .apply(&request(&["b", "c", "d", "x", "missing"]))
        .await
        .unwrap();
    assert_eq!(
        outcomes,
        vec![
            BulkOutcome::Applied {
                location_id: "b".to_string(),
                replacements: 2
            },
            BulkOutcome::Skipped {
                location_id: "c".to_string(),
                reason: SkipReason::Completed
            },
            BulkOutcome::Skipped {
                location_id: "d".to_string(),
                reason: SkipReason::NoOccurrences
            },
            BulkOutcome::Skipped {
                location_id: "x".to_string(),
                reason: SkipReason::OtherCollection
            },
            BulkOutcome::Skipped {
                location_id: "missing".to_string(),
                reason: SkipReason::NotFound
            },
        ]
    );

    let b = store.get_location("b").await.unwrap().unwrap();
    assert_eq!(b.text, "אוֹת ועוד אוֹת. אותיות לא.");
    assert_eq!(store.get_location("c").await.unwrap().unwrap().text, "כל אות");

    let record = engine
        .ledger
        .find_latest_fix_for_word("b", "אות")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.fix_type, FixType::Vowelization);
    assert_eq!(record.sentence_context, "אות ועוד אות.");
}

#[tokio::test]
async fn manual_edit_followed_by_bulk_counts_once() {
    let (_, engine) = engine().await;

    engine
        .ledger
        .record_correction(RecordCorrectionInput {
            collection_id: "book-1".to_string(),
            location_id: "a".to_string(),
            original_word: "אות".to_string(),
            corrected_word: "אוֹת".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    // Propagating back onto the edited location lands in the same session.
    engine.bulk.apply(&request(&["a", "b"])).await.unwrap();

    let rows = engine
        .aggregator
        .find_aggregated_corrections(&AggregationFilter::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].fix_count, 2);
    assert_eq!(rows[0].location_ids, vec!["a", "b"]);

    let chain = engine.ledger.get_fix_history_for_word("a", "אות").await.unwrap();
    assert_eq!(chain.len(), 2);
}

#[tokio::test]
async fn noop_request_is_rejected() {
    let (_, engine) = engine().await;
    let mut same = request(&["b"]);
    same.corrected_word = "אות".to_string();
    assert!(matches!(
        engine.bulk.apply(&same).await,
        Err(EngineError::Validation(_))
    ));
}

#[tokio::test]
async fn suggestions_feed_bulk_apply() {
    let (store, engine) = engine().await;

    let suggestions = engine
        .finder
        .find_similar_fixes_in_book(
            "book-1",
            "a",
            &[tikkun_core::models::change::WordChange::new("אות", "אוֹת")],
        )
        .await
        .unwrap();
    let ids: Vec<&str> = suggestions[0]
        .locations
        .iter()
        .map(|l| l.location_id.as_str())
        .collect();
    assert_eq!(ids, vec!["b"]);

    engine.bulk.apply(&request(&ids)).await.unwrap();
    let rerun = engine
        .finder
        .find_similar_fixes_in_book(
            "book-1",
            "a",
            &[tikkun_core::models::change::WordChange::new("אות", "אוֹת")],
        )
        .await
        .unwrap();
    assert!(rerun[0].locations.is_empty());
    assert!(store.get_location("b").await.unwrap().unwrap().text.starts_with("אוֹת"));
}

#[tokio::test]
async fn abbreviation_is_left_intact() {
    let (store, engine) = engine().await;
    store
        .put_location(location("g", "book-1", false, "ראה מס׳ 5 בעמוד"))
        .await
        .unwrap();

    let outcomes = engine
        .bulk
        .apply(&BulkFixRequest {
            collection_id: "book-1".to_string(),
            original_word: "מס".to_string(),
            corrected_word: "מספר".to_string(),
            location_ids: vec!["g".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        outcomes,
        vec![BulkOutcome::Skipped {
            location_id: "g".to_string(),
            reason: SkipReason::NoOccurrences
        }]
    );
    assert_eq!(
        store.get_location("g").await.unwrap().unwrap().text,
        "ראה מס׳ 5 בעמוד"
    );
}
