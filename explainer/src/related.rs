//! Recovers follow-up questions from free-form model output.
//!
//! The model is asked for a bare JSON array but routinely wraps it in code
//! fences or commentary, or ignores the format entirely. Extraction is
//! tolerant and never fails loudly: anything unrecoverable yields `None`.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// Upper bound on returned questions.
pub const MAX_RELATED: usize = 5;

const FENCE: &str = "```";

/// A run of 3+ characters with no sentence terminator or newline, ending at `?`.
fn question_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\n?.!]{3,}?\?").expect("static regex compiles"))
}

/// Extracts up to [`MAX_RELATED`] unique questions, in first-seen order.
pub fn extract_related(raw: &str) -> Option<Vec<String>> {
    let body = narrow_to_brackets(strip_fences(raw.trim()));

    let candidates = match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Ok(_) => Vec::new(),
        Err(_) => question_sentences(body),
    };

    let mut uniq: Vec<String> = Vec::new();
    for q in candidates {
        let q = q.trim();
        if q.is_empty() || uniq.iter().any(|u| u == q) {
            continue;
        }
        uniq.push(q.to_string());
    }

    if uniq.is_empty() {
        return None;
    }
    uniq.truncate(MAX_RELATED);
    Some(uniq)
}

/// With at least one complete fence pair, keeps the first fenced body.
/// A body opening with a `json` tag is skipped in favor of the segment after
/// the closing fence.
fn strip_fences(s: &str) -> &str {
    if !s.contains(FENCE) {
        return s;
    }
    let segs: Vec<&str> = s.split(FENCE).collect();
    let picked = if segs.len() >= 3 {
        if segs[1].to_lowercase().starts_with("json") {
            segs[2]
        } else {
            segs[1]
        }
    } else {
        s
    };
    picked.trim()
}

/// Narrows to the span from the first `[` to the last `]`, when ordered.
fn narrow_to_brackets(s: &str) -> &str {
    match (s.find('['), s.rfind(']')) {
        (Some(start), Some(end)) if end > start => &s[start..=end],
        _ => s,
    }
}

/// Strings and numbers become trimmed strings; everything else is dropped.
fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string().trim().to_string()),
        _ => None,
    }
}

fn question_sentences(s: &str) -> Vec<String> {
    question_re()
        .find_iter(s)
        .map(|m| {
            m.as_str()
                .trim()
                .trim_matches(|c| matches!(c, '"' | '\'' | '`'))
                .trim()
                .to_string()
        })
        .collect()
}
