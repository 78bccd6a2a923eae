//! Local answer used when the model produced nothing usable.

use crate::api_types::Length;

/// Voice matched to the reader's age band.
pub fn tone_for_age(age: u8) -> &'static str {
    match age {
        0..=7 => "like you're 5",
        8..=12 => "like you're 10",
        _ => "like you're 15",
    }
}

pub fn detail_for_length(length: Length) -> &'static str {
    match length {
        Length::Short => "in a tiny nutshell",
        Length::Medium => "with a bit more detail",
        Length::Detailed => "with lots of friendly detail",
    }
}

/// Deterministic template answer.
pub fn template_answer(question: &str, age: u8, length: Length) -> String {
    format!(
        "Explaining {}, {}: {}. Think of it as a simple story with easy words and clear steps.",
        tone_for_age(age),
        detail_for_length(length),
        question.trim()
    )
}
