use explainer::api_types::{DomainError, ExplainRequest, Language, Length, MIN_AGE};
use serde::Deserialize;

use crate::{core::http::response_envelope::ApiErrorDetail, error_handler::AppError};

/// Request payload for /explain.
#[derive(Debug, Deserialize)]
pub struct ExplainBody {
    /// Topic or question, non-empty after trimming.
    pub question: String,
    /// Reader age, 5..=18. Whole-valued floats such as `6.0` are accepted.
    pub age: f64,
    /// `Short`, `Medium` or `Detailed`.
    pub length: String,
    /// Language code; `en` when omitted.
    #[serde(default)]
    pub language: Option<String>,
}

impl ExplainBody {
    /// Checks every field and reports all violations at once.
    ///
    /// # Errors
    /// [`AppError::Validation`] listing each offending field.
    pub fn validate(self) -> Result<ExplainRequest, AppError> {
        let mut details = Vec::new();

        let (age, age_problem) = match whole_number(self.age) {
            Some(age) => (age, None),
            None => (
                i64::from(MIN_AGE),
                Some(ApiErrorDetail::field(
                    "age",
                    format!("age must be a whole number, got {}", self.age),
                )),
            ),
        };

        let length = self
            .length
            .parse::<Length>()
            .map_err(|e| details.push(detail_for(&e)))
            .ok();

        let language = match self.language.as_deref() {
            None => Some(Language::default()),
            Some(code) => code
                .parse::<Language>()
                .map_err(|e| details.push(detail_for(&e)))
                .ok(),
        };

        let checked = ExplainRequest::new(
            self.question,
            age,
            length.unwrap_or(Length::Short),
            language.unwrap_or_default(),
        );

        // Question and age come first; only one of them is reported.
        let leading = match checked {
            Ok(req) if details.is_empty() && age_problem.is_none() => return Ok(req),
            Ok(_) => age_problem,
            Err(e) => Some(detail_for(&e)),
        };
        if let Some(detail) = leading {
            details.insert(0, detail);
        }
        Err(invalid(details))
    }
}

fn whole_number(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

fn invalid(details: Vec<ApiErrorDetail>) -> AppError {
    AppError::validation("Request validation failed.", details)
}

fn detail_for(err: &DomainError) -> ApiErrorDetail {
    let path = match err {
        DomainError::EmptyQuestion => "question",
        DomainError::AgeOutOfRange(_) => "age",
        DomainError::UnknownLength(_) => "length",
        DomainError::UnknownLanguage(_) => "language",
    };
    ApiErrorDetail::field(path, err.to_string())
}
