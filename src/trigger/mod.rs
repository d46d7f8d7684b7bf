//! Trigger vocabulary, matching, and dispatch debouncing.

pub mod debounce;
pub mod dictionary;
pub mod matcher;

pub use debounce::DebounceDispatcher;
pub use dictionary::{TriggerDictionary, TriggerGroup};
pub use matcher::{MatchSpan, TriggerMatcher, normalize};
