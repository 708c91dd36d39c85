//! Redis Basic - demo client
//!
//! Stores each command-line argument through the instrumented store, reads
//! it back, then replays the recorded `Cache.store` history.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_basic::instrument::replay;
use redis_basic::{Cache, Config, Operation, Value};

/// Values stored when no arguments are given.
const SAMPLE_VALUES: [&str; 3] = ["foo", "bar", "42"];

/// Main entry point for the demo client.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load connection settings from environment variables
/// 3. Connect and create the cache (flushes the selected database)
/// 4. Store and read back each value through the instrumented store
/// 5. Print the replay of `Cache.store`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_basic=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: host={}, port={}, db={}",
        config.host, config.port, config.db
    );

    let cache = Cache::connect(&config)
        .await
        .with_context(|| format!("failed to connect to {}", config.redis_url()))?;
    info!("Cache ready on {}", cache.backend().url());

    let mut values: Vec<String> = std::env::args().skip(1).collect();
    if values.is_empty() {
        values = SAMPLE_VALUES.iter().map(|v| v.to_string()).collect();
    }

    let store = cache.instrumented_store();
    for value in values {
        let key = store.call((Value::from(value.as_str()),)).await?;
        let read_back = cache.get_str(&key).await?;
        println!("{} -> {:?}", key, read_back);
    }

    replay(&store).await?;
    info!("{} calls counted", store.calls().await?);

    Ok(())
}
