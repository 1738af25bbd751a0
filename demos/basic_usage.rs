//! Drive the engine the way a button grid would, one token at a time.
//!
//! Run with: cargo run --example basic_usage

use tallypad::engine::Engine;
use tallypad::store::MemoryStore;

fn main() {
    let mut engine = Engine::new(MemoryStore::new());

    // 1 + 2 =
    for token in "1+2".chars() {
        engine.append_token(token);
    }
    engine.evaluate();
    println!("1+2 -> {}", engine.buffer());

    // continue from the result: x 4 =
    for token in "x4".chars() {
        engine.append_token(token);
    }
    engine.evaluate();
    println!("3x4 -> {}", engine.buffer());

    // a fat-fingered operator is corrected, not stacked
    engine.clear();
    for token in "6+x7".chars() {
        engine.append_token(token);
    }
    engine.evaluate();
    println!("6+x7 -> {}", engine.buffer());

    // division by zero is a value, not an error
    engine.clear();
    for token in "8/0".chars() {
        engine.append_token(token);
    }
    engine.evaluate();
    println!("8/0 -> {}", engine.buffer());

    println!("\nhistory (most recent first):");
    for entry in engine.history().entries() {
        println!("  {} = {}", entry.expression, entry.result);
    }
}
