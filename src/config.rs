//! Game configuration supplied by the config provider
//!
//! The store accepts any [`GameConfig`] verbatim; well-formedness is the
//! provider's responsibility. The helpers here let a provider parse the
//! JSON configuration format and validate it before handing it over.

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

/// A single question with its ordered list of answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Question {
    /// The display text of the question
    #[garde(length(max = constants::question::MAX_TEXT_LENGTH))]
    pub text: String,

    /// The answers, in the order of their reveal slots
    #[garde(
        length(max = constants::question::MAX_ANSWER_COUNT),
        inner(length(max = constants::question::MAX_ANSWER_LENGTH))
    )]
    pub answers: Vec<String>,
}

impl Question {
    /// Creates a question from its text and answers
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(text: S, answers: I) -> Self {
        Self {
            text: text.into(),
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

/// A complete game configuration
///
/// Immutable once loaded into the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Countdown budget for each question, in seconds; fractions allowed
    #[garde(range(
        min = constants::game::MIN_TIMER_DURATION,
        max = constants::game::MAX_TIMER_DURATION
    ))]
    pub timer_duration: f64,

    /// The questions, in play order
    #[garde(length(min = 1, max = constants::game::MAX_QUESTION_COUNT), dive)]
    pub questions: Vec<Question>,
}

/// Errors produced while loading a configuration
#[derive(Error, Debug)]
pub enum Error {
    /// The input is not a well-formed configuration document
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration parsed but violates a limit
    #[error("invalid configuration: {0}")]
    Invalid(#[from] garde::Report),
}

impl GameConfig {
    /// Creates a configuration from a timer duration and questions
    pub fn new(timer_duration: f64, questions: Vec<Question>) -> Self {
        Self {
            timer_duration,
            questions,
        }
    }

    /// Parses and validates a JSON configuration document
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the document is not valid JSON of the
    /// expected shape, or [`Error::Invalid`] if a limit is violated.
    pub fn from_json(input: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the number of questions in this configuration
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Checks if this configuration contains any questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "timerDuration": 30,
        "questions": [
            { "text": "Name a fruit", "answers": ["Apple", "Banana", "Cherry"] },
            { "text": "Name a colour", "answers": ["Red", "Blue"] }
        ]
    }"#;

    #[test]
    fn test_from_json_valid() {
        let config = GameConfig::from_json(SAMPLE).unwrap();

        assert!((config.timer_duration - 30.0).abs() < f64::EPSILON);
        assert_eq!(config.len(), 2);
        assert_eq!(config.questions[0].text, "Name a fruit");
        assert_eq!(config.questions[1].answers, vec!["Red", "Blue"]);
    }

    #[test]
    fn test_from_json_malformed() {
        let result = GameConfig::from_json("{ \"timerDuration\": 30 }");
        assert!(matches!(result, Err(Error::Parse(_))));

        let result = GameConfig::from_json("not json");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_from_json_empty_questions() {
        let result = GameConfig::from_json(r#"{ "timerDuration": 30, "questions": [] }"#);
        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn test_validate_timer_duration() {
        let questions = vec![Question::new("Q", ["A"])];

        assert!(GameConfig::new(0.0, questions.clone()).validate().is_err());
        assert!(GameConfig::new(0.5, questions.clone()).validate().is_err());
        assert!(GameConfig::new(1.0, questions.clone()).validate().is_ok());
        assert!(
            GameConfig::new(constants::game::MAX_TIMER_DURATION + 1.0, questions)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_validate_too_many_answers() {
        let answers = (0..=constants::question::MAX_ANSWER_COUNT).map(|i| format!("answer {i}"));
        let config = GameConfig::new(30.0, vec![Question::new("Q".to_string(), answers)]);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_max_answers_allowed() {
        let answers = (0..constants::question::MAX_ANSWER_COUNT).map(|i| format!("answer {i}"));
        let config = GameConfig::new(30.0, vec![Question::new("Q".to_string(), answers)]);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fractional_timer_duration() {
        let config = GameConfig::from_json(
            r#"{ "timerDuration": 12.5, "questions": [{ "text": "Q", "answers": ["A"] }] }"#,
        )
        .unwrap();

        assert!((config.timer_duration - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_negative_timer_duration() {
        let result = GameConfig::from_json(
            r#"{ "timerDuration": -3, "questions": [{ "text": "Q", "answers": ["A"] }] }"#,
        );
        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let config = GameConfig::new(45.0, vec![Question::new("Q", ["A", "B"])]);
        let json = serde_json::to_string(&config).unwrap();

        assert!(json.contains("\"timerDuration\":45.0"));
        assert!(!json.contains("timer_duration"));

        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
