//! The calculator engine.
//!
//! One engine instance owns the expression buffer, the bounded
//! evaluation history, and the history-view visibility flag. Every
//! operation runs to completion synchronously and never returns an
//! error: evaluation failures land in the buffer as the error marker,
//! persistence failures are logged and absorbed.

use crate::eval;
use crate::history::{History, HistoryEntry};
use crate::store::{HistoryStore, HISTORY_KEY};
use crate::token;
use chrono::Utc;
use tracing::{error, warn};

/// The buffer text displayed after a failed evaluation.
pub const ERROR_MARKER: &str = "Error";

/// The buffer's default (and reset) text. The buffer is never empty.
const DEFAULT_BUFFER: &str = "0";

/// Calculator input/evaluation engine.
///
/// The buffer acts as the implicit state: normal entry, or the error
/// marker after a failed evaluation. Successful evaluations are
/// recorded into the history and persisted through the injected store.
///
/// # Example
///
/// ```rust
/// use tallypad::engine::Engine;
/// use tallypad::store::MemoryStore;
///
/// let mut engine = Engine::new(MemoryStore::new());
/// engine.append_token('1');
/// engine.append_token('+');
/// engine.append_token('2');
/// engine.evaluate();
///
/// assert_eq!(engine.buffer(), "3");
/// assert_eq!(engine.history().newest().unwrap().expression, "1+2");
/// ```
pub struct Engine<S: HistoryStore> {
    buffer: String,
    history: History,
    show_history: bool,
    store: S,
}

impl<S: HistoryStore> Engine<S> {
    /// Create an engine, restoring any persisted history from the store.
    ///
    /// A missing, unreadable, or undecodable record falls back to an
    /// empty history; the failure is logged, never propagated.
    pub fn new(store: S) -> Self {
        let history = match store.load(HISTORY_KEY) {
            Ok(Some(payload)) => match History::from_json(&payload) {
                Ok(history) => history,
                Err(err) => {
                    error!(%err, "failed to decode persisted history, starting empty");
                    History::new()
                }
            },
            Ok(None) => History::new(),
            Err(err) => {
                error!(%err, "failed to load persisted history, starting empty");
                History::new()
            }
        };
        Self {
            buffer: DEFAULT_BUFFER.to_string(),
            history,
            show_history: false,
            store,
        }
    }

    /// The current expression text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The evaluation history, most recent first.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether the history view is visible.
    pub fn show_history(&self) -> bool {
        self.show_history
    }

    /// Consume the engine and hand back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Append one input token to the buffer.
    ///
    /// An operator entered directly after another operator replaces it
    /// (last operator wins, no stacking). Otherwise the token replaces
    /// a buffer that still reads `"0"`, or is appended. A buffer
    /// holding the error marker is ordinary text here: tokens append
    /// onto it until the user clears.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tallypad::engine::Engine;
    /// use tallypad::store::MemoryStore;
    ///
    /// let mut engine = Engine::new(MemoryStore::new());
    /// engine.append_token('7');
    /// assert_eq!(engine.buffer(), "7"); // replaced "0", not "07"
    ///
    /// engine.append_token('+');
    /// engine.append_token('x');
    /// assert_eq!(engine.buffer(), "7x"); // collapsed, not "7+x"
    /// ```
    pub fn append_token(&mut self, token: char) {
        let trailing_operator = self.buffer.chars().last().is_some_and(token::is_operator);
        if token::is_operator(token) && trailing_operator {
            self.buffer.pop();
            self.buffer.push(token);
        } else if self.buffer == DEFAULT_BUFFER {
            self.buffer.clear();
            self.buffer.push(token);
        } else {
            self.buffer.push(token);
        }
    }

    /// Remove the last character; a single-character buffer resets to `"0"`.
    pub fn backspace(&mut self) {
        if self.buffer.chars().count() <= 1 {
            self.buffer = DEFAULT_BUFFER.to_string();
        } else {
            self.buffer.pop();
        }
    }

    /// Reset the buffer to `"0"`. History is untouched.
    pub fn clear(&mut self) {
        self.buffer = DEFAULT_BUFFER.to_string();
    }

    /// Evaluate the buffer, record the result, and display it.
    ///
    /// No-op when the buffer ends with an operator (dangling-operator
    /// guard), contains the error marker, or holds no binary operator
    /// at all (so a displayed result is not re-recorded on repeated
    /// presses). On success the prior buffer text and the formatted
    /// result are prepended to the history, the capped history is
    /// persisted, and the buffer becomes the result. On failure the
    /// buffer becomes [`ERROR_MARKER`]; nothing is recorded and no
    /// error reaches the caller.
    pub fn evaluate(&mut self) {
        if self.buffer.chars().last().is_some_and(token::is_operator) {
            return;
        }
        if self.buffer.contains(ERROR_MARKER) {
            return;
        }
        // Only the first character may be a sign; an operator anywhere
        // past it makes this a computable expression.
        if !self.buffer.chars().skip(1).any(token::is_operator) {
            return;
        }

        match eval::evaluate(&self.buffer) {
            Ok(value) => {
                let result = eval::format_result(value);
                self.history = self.history.record(HistoryEntry {
                    expression: self.buffer.clone(),
                    result: result.clone(),
                    timestamp: Utc::now().timestamp_millis(),
                });
                self.persist_history();
                self.buffer = result;
            }
            Err(err) => {
                error!(%err, buffer = %self.buffer, "failed to evaluate expression");
                self.buffer = ERROR_MARKER.to_string();
            }
        }
    }

    /// Recall a past result into the buffer and close the history view.
    pub fn use_history_item(&mut self, entry: &HistoryEntry) {
        self.buffer = entry.result.clone();
        self.show_history = false;
    }

    /// Empty the history and delete its persisted record.
    pub fn clear_history(&mut self) {
        self.history = History::new();
        if let Err(err) = self.store.remove(HISTORY_KEY) {
            warn!(%err, "failed to remove persisted history");
        }
    }

    /// Show or hide the history view.
    pub fn set_show_history(&mut self, show: bool) {
        self.show_history = show;
    }

    fn persist_history(&mut self) {
        let payload = match self.history.to_json() {
            Ok(payload) => payload,
            Err(err) => {
                error!(%err, "failed to encode history");
                return;
            }
        };
        if let Err(err) = self.store.store(HISTORY_KEY, &payload) {
            warn!(%err, "failed to persist history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn engine() -> Engine<MemoryStore> {
        Engine::new(MemoryStore::new())
    }

    fn type_all(engine: &mut Engine<MemoryStore>, tokens: &str) {
        for token in tokens.chars() {
            engine.append_token(token);
        }
    }

    #[test]
    fn starts_with_zero_buffer_and_empty_history() {
        let engine = engine();
        assert_eq!(engine.buffer(), "0");
        assert!(engine.history().is_empty());
        assert!(!engine.show_history());
    }

    #[test]
    fn first_digit_replaces_the_zero_buffer() {
        let mut engine = engine();
        engine.append_token('7');
        assert_eq!(engine.buffer(), "7");
        engine.append_token('7');
        assert_eq!(engine.buffer(), "77");
    }

    #[test]
    fn zero_token_on_zero_buffer_stays_zero() {
        let mut engine = engine();
        engine.append_token('0');
        assert_eq!(engine.buffer(), "0");
    }

    #[test]
    fn operator_on_zero_buffer_replaces_it() {
        // reachable leading minus: "0" -> "-" -> "-5"
        let mut engine = engine();
        type_all(&mut engine, "-5");
        assert_eq!(engine.buffer(), "-5");
    }

    #[test]
    fn leading_plus_buffer_evaluates() {
        // "+" on the "0" buffer replaces it, so "+5+2" is reachable
        let mut engine = engine();
        type_all(&mut engine, "+5+2");
        assert_eq!(engine.buffer(), "+5+2");

        engine.evaluate();
        assert_eq!(engine.buffer(), "7");
        assert_eq!(engine.history().newest().unwrap().expression, "+5+2");
    }

    #[test]
    fn consecutive_operators_collapse_to_the_last() {
        let mut engine = engine();
        type_all(&mut engine, "1++");
        assert_eq!(engine.buffer(), "1+");

        type_all(&mut engine, "x/");
        assert_eq!(engine.buffer(), "1/");
    }

    #[test]
    fn backspace_trims_and_bottoms_out_at_zero() {
        let mut engine = engine();
        type_all(&mut engine, "12");
        engine.backspace();
        assert_eq!(engine.buffer(), "1");
        engine.backspace();
        assert_eq!(engine.buffer(), "0");
        engine.backspace();
        assert_eq!(engine.buffer(), "0");
    }

    #[test]
    fn backspace_handles_multibyte_operators() {
        let mut engine = engine();
        type_all(&mut engine, "7×");
        engine.backspace();
        assert_eq!(engine.buffer(), "7");
    }

    #[test]
    fn clear_resets_buffer_but_not_history() {
        let mut engine = engine();
        type_all(&mut engine, "1+2");
        engine.evaluate();
        engine.clear();

        assert_eq!(engine.buffer(), "0");
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn evaluate_replaces_buffer_and_records() {
        let mut engine = engine();
        type_all(&mut engine, "1+2");
        engine.evaluate();

        assert_eq!(engine.buffer(), "3");
        let entry = engine.history().newest().unwrap();
        assert_eq!(entry.expression, "1+2");
        assert_eq!(entry.result, "3");
    }

    #[test]
    fn evaluate_with_trailing_operator_is_a_noop() {
        let mut engine = engine();
        type_all(&mut engine, "8x");
        engine.evaluate();

        assert_eq!(engine.buffer(), "8x");
        assert!(engine.history().is_empty());
    }

    #[test]
    fn evaluate_without_an_operator_is_a_noop() {
        let mut engine = engine();
        engine.append_token('5');
        engine.evaluate();
        engine.evaluate();

        assert_eq!(engine.buffer(), "5");
        assert!(engine.history().is_empty());
    }

    #[test]
    fn evaluate_result_is_not_rerecorded() {
        let mut engine = engine();
        type_all(&mut engine, "1+2");
        engine.evaluate();
        engine.evaluate();

        assert_eq!(engine.buffer(), "3");
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn malformed_expression_displays_the_error_marker() {
        let mut engine = engine();
        type_all(&mut engine, "1.2.3+1");
        engine.evaluate();

        assert_eq!(engine.buffer(), ERROR_MARKER);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn error_marker_buffer_ignores_evaluate() {
        let mut engine = engine();
        type_all(&mut engine, "1.2.3+1");
        engine.evaluate();
        engine.evaluate();
        assert_eq!(engine.buffer(), ERROR_MARKER);
    }

    // Observed quirk: digits append onto the marker text until the
    // user clears.
    #[test]
    fn digits_append_onto_the_error_marker() {
        let mut engine = engine();
        type_all(&mut engine, "1.2.3+1");
        engine.evaluate();
        engine.append_token('4');

        assert_eq!(engine.buffer(), "Error4");
        engine.evaluate();
        assert_eq!(engine.buffer(), "Error4");

        engine.clear();
        assert_eq!(engine.buffer(), "0");
    }

    #[test]
    fn division_by_zero_displays_infinity() {
        let mut engine = engine();
        type_all(&mut engine, "8/0");
        engine.evaluate();

        assert_eq!(engine.buffer(), "Infinity");
        assert_eq!(engine.history().newest().unwrap().result, "Infinity");
    }

    #[test]
    fn use_history_item_recalls_result_and_hides_history() {
        let mut engine = engine();
        type_all(&mut engine, "7x8");
        engine.evaluate();
        engine.clear();
        engine.set_show_history(true);

        let entry = engine.history().newest().unwrap().clone();
        engine.use_history_item(&entry);

        assert_eq!(engine.buffer(), "56");
        assert!(!engine.show_history());
    }

    #[test]
    fn clear_history_empties_and_removes_persisted_record() {
        let mut engine = engine();
        type_all(&mut engine, "1+2");
        engine.evaluate();
        engine.clear_history();

        assert!(engine.history().is_empty());
        let store = engine.into_store();
        assert_eq!(store.load(HISTORY_KEY).unwrap(), None);
    }

    #[test]
    fn evaluation_persists_immediately() {
        let mut engine = engine();
        type_all(&mut engine, "1+2");
        engine.evaluate();

        let store = engine.into_store();
        let payload = store.load(HISTORY_KEY).unwrap().unwrap();
        let restored = History::from_json(&payload).unwrap();
        assert_eq!(restored.newest().unwrap().result, "3");
    }

    #[test]
    fn fresh_engine_restores_persisted_history() {
        let mut engine = engine();
        type_all(&mut engine, "1+2");
        engine.evaluate();
        engine.clear();
        type_all(&mut engine, "7x8");
        engine.evaluate();

        let reopened = Engine::new(engine.into_store());
        let results: Vec<_> = reopened
            .history()
            .entries()
            .iter()
            .map(|e| e.result.as_str())
            .collect();
        assert_eq!(results, ["56", "3"]);
    }

    #[test]
    fn malformed_persisted_history_falls_back_to_empty() {
        let mut store = MemoryStore::new();
        store.store(HISTORY_KEY, "definitely not json").unwrap();

        let engine = Engine::new(store);
        assert!(engine.history().is_empty());
        assert_eq!(engine.buffer(), "0");
    }

    #[test]
    fn history_caps_at_twenty_entries() {
        let mut engine = engine();
        for n in 1..22 {
            engine.clear();
            type_all(&mut engine, &format!("{n}+1"));
            engine.evaluate();
        }

        assert_eq!(engine.history().len(), 20);
        // the 21st evaluation evicted "1+1"
        assert_eq!(engine.history().newest().unwrap().expression, "21+1");
        assert_eq!(engine.history().entries()[19].expression, "2+1");
    }
}
