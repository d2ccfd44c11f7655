//! Step and answer rendering for the terminal and for `--json` output.

use conclave::{FinalAnswer, StepSnapshot};
use serde_json::{json, Value};

/// Truncates to at most `max` chars, ending in `...` when cut. `0` means no limit.
pub(crate) fn truncate_display(s: &str, max: usize) -> String {
    const SUFFIX: &str = "...";
    if max == 0 || s.chars().count() <= max {
        return s.to_string();
    }
    if max <= SUFFIX.len() {
        return s.chars().take(max).collect();
    }
    let mut out: String = s.chars().take(max - SUFFIX.len()).collect();
    out.push_str(SUFFIX);
    out
}

/// Human trace line for stderr.
pub(crate) fn format_step(snapshot: &StepSnapshot, max_len: usize) -> String {
    truncate_display(&snapshot.to_trace_line(), max_len)
}

/// One NDJSON event per step: `{"type":"step","step":n,"node":..,"update":{..}}`.
pub(crate) fn step_event(snapshot: &StepSnapshot) -> Value {
    json!({
        "type": "step",
        "step": snapshot.step,
        "node": snapshot.node,
        "update": snapshot.update,
    })
}

/// Final NDJSON line. `answered` is false when the sentinel is shown.
pub(crate) fn answer_event(answer: &FinalAnswer) -> Value {
    json!({
        "type": "answer",
        "answer": answer.text(),
        "answered": answer.is_answer(),
    })
}
