//! # Shout Out Game Library
//!
//! This library provides the client-side state container for a turn-based
//! "Shout Out" trivia presentation. It tracks question progression, which
//! answers have been revealed, whether the countdown ran out, and optional
//! team scoring, and it broadcasts every resulting snapshot to subscribers.
//!
//! The presentation layer owns a [`store::GameStateStore`], subscribes to
//! it, and calls its named operations in response to user input. The
//! countdown itself runs outside the store and reports expiry through
//! [`store::GameStateStore::set_timer_expired`].

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod config;
pub mod constants;
pub mod observer;
pub mod state;
pub mod store;

pub use config::{GameConfig, Question};
pub use state::{GameSessionState, Options, Phase, Team};
pub use store::GameStateStore;
