//! Configuration constants for the Shout Out game
//!
//! This module contains the fixed sizes and validation limits shared by
//! the config provider helpers and the state store.

/// Reveal slot configuration constants
pub mod reveal {
    /// Number of reveal slots tracked for every question, regardless of
    /// how many answers the question actually has
    pub const SLOT_COUNT: usize = 10;
}

/// Question configuration constants
pub mod question {
    /// Maximum length of a question's display text in characters
    pub const MAX_TEXT_LENGTH: usize = 500;
    /// Maximum number of answers a question may carry
    pub const MAX_ANSWER_COUNT: usize = super::reveal::SLOT_COUNT;
    /// Maximum length of a single answer in characters
    pub const MAX_ANSWER_LENGTH: usize = 200;
}

/// Game configuration constants
pub mod game {
    /// Maximum number of questions in a single game
    pub const MAX_QUESTION_COUNT: usize = 200;
    /// Minimum countdown duration in seconds
    pub const MIN_TIMER_DURATION: f64 = 1.0;
    /// Maximum countdown duration in seconds
    pub const MAX_TIMER_DURATION: f64 = 3600.0;
}
