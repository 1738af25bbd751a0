//! History persistence across engine instances, using the file store.
//!
//! Run twice to see the second run pick up where the first left off:
//! cargo run --example persistent_history

use tallypad::engine::Engine;
use tallypad::store::FileStore;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let dir = std::env::temp_dir().join("tallypad-demo");
    println!("history record lives under {}", dir.display());

    let mut engine = Engine::new(FileStore::new(&dir));
    println!("restored {} entries from the last run", engine.history().len());

    for expression in ["1+2", "7x8", "9/2"] {
        engine.clear();
        for token in expression.chars() {
            engine.append_token(token);
        }
        engine.evaluate();
        println!("{expression} -> {}", engine.buffer());
    }

    println!("\nhistory now holds {} entries:", engine.history().len());
    for entry in engine.history().entries() {
        println!("  {} = {} (at {})", entry.expression, entry.result, entry.timestamp);
    }
}
