use std::io::Read;

use serde::Serialize;
use uuid::Uuid;

use tikkun_core::models::change::WordChange;
use tikkun_engine::{
    AggregationFilter, BulkFixRequest, Engine, EngineConfig, RecordCorrectionInput, StatsFilter,
};
use tikkun_match::BoundaryMatcher;
use tikkun_storage::MemoryStore;

fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn classify(original: &str, corrected: &str) -> eyre::Result<()> {
    print_json(&tikkun_rules::classify(original, corrected))
}

#[derive(Serialize)]
struct MatchOutput {
    count: usize,
    positions: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replaced: Option<String>,
}

pub fn match_word(
    config: &EngineConfig,
    word: &str,
    text: Option<String>,
    replacement: Option<&str>,
) -> eyre::Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let matcher = BoundaryMatcher::new(config.match_options);
    let positions = matcher.positions(&text, word);
    print_json(&MatchOutput {
        count: positions.len(),
        positions,
        replaced: replacement.map(|r| matcher.replace(&text, word, r)),
    })
}

pub async fn suggest(
    engine: &Engine<MemoryStore>,
    collection: &str,
    location: &str,
    original: String,
    corrected: String,
) -> eyre::Result<()> {
    let suggestions = engine
        .finder
        .find_similar_fixes_in_book(collection, location, &[WordChange::new(original, corrected)])
        .await?;
    print_json(&suggestions)
}

pub async fn record(
    engine: &Engine<MemoryStore>,
    collection_id: String,
    location_id: String,
    original_word: String,
    corrected_word: String,
    current_word: Option<String>,
    sentence_context: String,
) -> eyre::Result<()> {
    let record = engine
        .ledger
        .record_correction(RecordCorrectionInput {
            collection_id,
            location_id,
            original_word,
            current_word,
            corrected_word,
            sentence_context,
            ..Default::default()
        })
        .await?;
    print_json(&record)
}

pub async fn apply(
    engine: &Engine<MemoryStore>,
    collection_id: String,
    original_word: String,
    corrected_word: String,
    location_ids: Vec<String>,
) -> eyre::Result<()> {
    let outcomes = engine
        .bulk
        .apply(&BulkFixRequest {
            collection_id,
            original_word,
            corrected_word,
            location_ids,
            ..Default::default()
        })
        .await?;
    print_json(&outcomes)
}

pub async fn delete(engine: &Engine<MemoryStore>, id: Uuid) -> eyre::Result<()> {
    print_json(&engine.ledger.delete_correction(id).await?)
}

pub async fn history(
    engine: &Engine<MemoryStore>,
    location: &str,
    word: Option<&str>,
) -> eyre::Result<()> {
    let records = match word {
        Some(word) => engine.ledger.get_fix_history_for_word(location, word).await?,
        None => engine.ledger.history_for_location(location).await?,
    };
    print_json(&records)
}

pub async fn aggregate(
    engine: &Engine<MemoryStore>,
    collection_id: Option<String>,
    min_occurrences: Option<usize>,
    limit: Option<usize>,
) -> eyre::Result<()> {
    let rows = engine
        .aggregator
        .find_aggregated_corrections(&AggregationFilter {
            collection_id,
            min_occurrences,
            limit,
            ..Default::default()
        })
        .await?;
    print_json(&rows)
}

pub async fn stats(engine: &Engine<MemoryStore>, collection_id: Option<String>) -> eyre::Result<()> {
    let stats = engine
        .aggregator
        .get_stats(&StatsFilter {
            collection_id,
            ..Default::default()
        })
        .await?;
    print_json(&stats)
}

pub async fn top(engine: &Engine<MemoryStore>, take: Option<usize>) -> eyre::Result<()> {
    let top = match take {
        Some(take) => engine.aggregator.get_top_corrections(take).await?,
        None => engine.top_corrections().await?,
    };
    print_json(&top)
}
