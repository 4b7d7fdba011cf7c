use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use tikkun_engine::{Engine, EngineConfig};
use tikkun_storage::MemoryStore;

mod commands;

#[derive(Parser)]
#[command(
    name = "tikkun",
    version,
    about = "Track and propagate Hebrew text corrections"
)]
struct Cli {
    /// Store snapshot to read and, for writing commands, update.
    /// Defaults to $TIKKUN_SNAPSHOT, then ./tikkun.json
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Engine config. Defaults to $TIKKUN_CONFIG, then the platform config dir.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single correction.
    Classify { original: String, corrected: String },
    /// Find or replace standalone occurrences of a word. Reads stdin when
    /// no text is given.
    Match {
        word: String,
        text: Option<String>,
        #[arg(long, value_name = "WORD")]
        replace: Option<String>,
    },
    /// Locations elsewhere in a collection that still hold the original word.
    Suggest {
        collection: String,
        location: String,
        original: String,
        corrected: String,
    },
    /// Record an accepted correction.
    Record {
        collection: String,
        location: String,
        original: String,
        corrected: String,
        /// The word as it stands now, when it already differs from the original.
        #[arg(long)]
        current: Option<String>,
        #[arg(long, default_value = "")]
        context: String,
    },
    /// Apply a correction to the given locations and record each one.
    Apply {
        collection: String,
        original: String,
        corrected: String,
        #[arg(required = true)]
        locations: Vec<String>,
    },
    /// Delete one correction record.
    Delete { id: Uuid },
    /// Fix history of a location, or of one word at it.
    History {
        location: String,
        #[arg(long)]
        word: Option<String>,
    },
    /// Corrections grouped across locations.
    Aggregate {
        #[arg(long)]
        collection: Option<String>,
        #[arg(long)]
        min: Option<usize>,
        #[arg(long)]
        limit: Option<usize>,
    },
    Stats {
        #[arg(long)]
        collection: Option<String>,
    },
    Top {
        #[arg(long)]
        take: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config)?;
    let snapshot = cli
        .snapshot
        .or_else(|| env::var_os("TIKKUN_SNAPSHOT").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("tikkun.json"));

    // Pure commands never touch the store.
    match cli.command {
        Commands::Classify {
            original,
            corrected,
        } => return commands::classify(&original, &corrected),
        Commands::Match {
            word,
            text,
            replace,
        } => return commands::match_word(&config, &word, text, replace.as_deref()),
        _ => {}
    }

    let store = if snapshot.exists() {
        MemoryStore::load_snapshot(&snapshot).await?
    } else {
        tracing::info!(path = %snapshot.display(), "no snapshot found, starting empty");
        MemoryStore::new()
    };
    let store = Arc::new(store);
    let engine = Engine::new(Arc::clone(&store), config);

    let dirty = match cli.command {
        Commands::Classify { .. } | Commands::Match { .. } => false,
        Commands::Suggest {
            collection,
            location,
            original,
            corrected,
        } => {
            commands::suggest(&engine, &collection, &location, original, corrected).await?;
            false
        }
        Commands::Record {
            collection,
            location,
            original,
            corrected,
            current,
            context,
        } => {
            commands::record(
                &engine, collection, location, original, corrected, current, context,
            )
            .await?;
            true
        }
        Commands::Apply {
            collection,
            original,
            corrected,
            locations,
        } => {
            commands::apply(&engine, collection, original, corrected, locations).await?;
            true
        }
        Commands::Delete { id } => {
            commands::delete(&engine, id).await?;
            true
        }
        Commands::History { location, word } => {
            commands::history(&engine, &location, word.as_deref()).await?;
            false
        }
        Commands::Aggregate {
            collection,
            min,
            limit,
        } => {
            commands::aggregate(&engine, collection, min, limit).await?;
            false
        }
        Commands::Stats { collection } => {
            commands::stats(&engine, collection).await?;
            false
        }
        Commands::Top { take } => {
            commands::top(&engine, take).await?;
            false
        }
    };

    if dirty {
        store.save_snapshot(&snapshot).await?;
    }
    Ok(())
}

/// Logs go to stderr so command output on stdout stays machine-readable.
/// `TIKKUN_LOG_JSON=1` switches to structured JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if env::var("TIKKUN_LOG_JSON").is_ok_and(|v| v == "1") {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(explicit: Option<PathBuf>) -> eyre::Result<EngineConfig> {
    let path = match explicit.or_else(|| env::var_os("TIKKUN_CONFIG").map(PathBuf::from)) {
        Some(path) => path,
        None => {
            let base =
                dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
            base.join("tikkun").join("config.json")
        }
    };
    let config = EngineConfig::load_or_default(&path)?;
    tracing::debug!(path = %path.display(), ?config, "config loaded");
    Ok(config)
}
