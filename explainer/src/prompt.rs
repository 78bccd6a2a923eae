//! Prompt texts sent to the model. Pure functions; identical inputs produce
//! byte-identical output.

use crate::api_types::{Language, Length};

/// Prompt for the main explanation. The question is embedded as given.
pub fn build_explain_prompt(question: &str, age: u8, length: Length) -> String {
    format!(
        "Explain this to a child aged {age}.\n\
         Style: friendly, clear, simple words.\n\
         Length: {length}. {guide}\n\
         Topic / Question: {question}",
        guide = length.profile().guide,
    )
}

/// Prompt asking for a translation of an already generated explanation.
pub fn build_translate_prompt(text: &str, language: Language) -> String {
    format!(
        "Translate this explanation into the target language. Keep the meaning and friendly tone, use simple words for children.\n\
         Target language code: {code}\n\
         Text: {text}",
        code = language.code(),
    )
}

/// Prompt asking for 3 to 5 follow-up questions as a bare JSON array.
pub fn build_related_prompt(question: &str, age: u8, length: Length, language: Language) -> String {
    [
        "You are helping a child learn. Based on the user's question, propose 3 to 5 contextually relevant follow-up questions the child might ask next.".to_string(),
        format!("User's question: {question}"),
        format!("Child age: {age}. Detail level requested: {length}."),
        "Requirements:".to_string(),
        "- Each must be a natural question, curious and child-friendly.".to_string(),
        "- Focus on deeper or related aspects of the SAME topic, not templates.".to_string(),
        "- Do NOT repeat or rephrase the original question.".to_string(),
        "- Ensure they explore connected ideas (history, importance, impact, examples).".to_string(),
        "- No numbering, no explanations, no prose.".to_string(),
        format!("- Write them in language code: {}.", language.code()),
        "Return EXACTLY a JSON array of strings with 3 to 5 items. No code fences.".to_string(),
    ]
    .join("\n")
}
