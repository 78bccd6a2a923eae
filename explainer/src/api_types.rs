//! Domain types crossing the explainer boundary.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Youngest supported reader.
pub const MIN_AGE: u8 = 5;
/// Oldest supported reader.
pub const MAX_AGE: u8 = 18;

/// Reasons an [`ExplainRequest`] cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("age must be between 5 and 18, got {0}")]
    AgeOutOfRange(i64),

    #[error("unknown length '{0}', expected Short, Medium or Detailed")]
    UnknownLength(String),

    #[error("unsupported language code '{0}'")]
    UnknownLanguage(String),
}

/* ------------------------------------------------------------------------- */
/* Length                                                                    */
/* ------------------------------------------------------------------------- */

/// Requested explanation size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Length {
    Short,
    Medium,
    Detailed,
}

/// Output bound and prompt guide derived from a [`Length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthProfile {
    pub max_output_tokens: u32,
    pub guide: &'static str,
}

impl Length {
    pub const ALL: [Length; 3] = [Length::Short, Length::Medium, Length::Detailed];

    pub fn as_str(self) -> &'static str {
        match self {
            Length::Short => "Short",
            Length::Medium => "Medium",
            Length::Detailed => "Detailed",
        }
    }

    pub fn profile(self) -> LengthProfile {
        match self {
            Length::Short => LengthProfile {
                max_output_tokens: 180,
                guide: "Keep it very brief (2-3 sentences).",
            },
            Length::Medium => LengthProfile {
                max_output_tokens: 400,
                guide: "Keep it concise (1 short paragraph).",
            },
            Length::Detailed => LengthProfile {
                max_output_tokens: 800,
                guide: "Give more detail (2 short paragraphs).",
            },
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Length {
    type Err = DomainError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Length::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| DomainError::UnknownLength(s.to_string()))
    }
}

/* ------------------------------------------------------------------------- */
/* Language                                                                  */
/* ------------------------------------------------------------------------- */

/// Output language of the explanation and follow-up questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Kn,
    Ta,
    Te,
    Ml,
    Bn,
    Gu,
    Mr,
    Ur,
}

impl Language {
    pub const ALL: [Language; 10] = [
        Language::En,
        Language::Hi,
        Language::Kn,
        Language::Ta,
        Language::Te,
        Language::Ml,
        Language::Bn,
        Language::Gu,
        Language::Mr,
        Language::Ur,
    ];

    /// Two-letter code, as sent to the model.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Kn => "kn",
            Language::Ta => "ta",
            Language::Te => "te",
            Language::Ml => "ml",
            Language::Bn => "bn",
            Language::Gu => "gu",
            Language::Mr => "mr",
            Language::Ur => "ur",
        }
    }

    pub fn is_english(self) -> bool {
        self == Language::En
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or_else(|| DomainError::UnknownLanguage(s.to_string()))
    }
}

/* ------------------------------------------------------------------------- */
/* Request / result                                                          */
/* ------------------------------------------------------------------------- */

/// A validated explanation request. Fields are private so an instance can
/// only exist with every value in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainRequest {
    question: String,
    age: u8,
    length: Length,
    language: Language,
}

impl ExplainRequest {
    /// Validates and builds a request. The question is stored verbatim.
    ///
    /// # Errors
    /// - [`DomainError::EmptyQuestion`] if the question is blank
    /// - [`DomainError::AgeOutOfRange`] if age is outside 5..=18
    pub fn new(
        question: impl Into<String>,
        age: i64,
        length: Length,
        language: Language,
    ) -> Result<Self, DomainError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(DomainError::EmptyQuestion);
        }
        let age = u8::try_from(age)
            .ok()
            .filter(|a| (MIN_AGE..=MAX_AGE).contains(a))
            .ok_or(DomainError::AgeOutOfRange(age))?;

        Ok(Self {
            question,
            age,
            length,
            language,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn length(&self) -> Length {
        self.length
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// What the pipeline hands back for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplainResult {
    pub answer: String,
    pub related: Vec<String>,
}
