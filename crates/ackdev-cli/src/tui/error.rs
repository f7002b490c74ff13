use std::fmt;

/// Broken navigation invariants. These abort the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The transition table has no entry for this (screen, intent) pair
    InvalidTransition { from: &'static str, intent: String },

    /// More deferred intents were pending than the loop allows
    QueueOverflow { capacity: usize },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::InvalidTransition { from, intent } => {
                write!(f, "No transition from {} on intent {}", from, intent)
            }
            NavigationError::QueueOverflow { capacity } => {
                write!(f, "Intent queue overflow (capacity {})", capacity)
            }
        }
    }
}

impl std::error::Error for NavigationError {}

/// A key name in the settings file that cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapError {
    pub action: &'static str,
    pub key: String,
}

impl fmt::Display for KeymapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown key '{}' bound to action '{}' in settings",
            self.key, self.action
        )
    }
}

impl std::error::Error for KeymapError {}

pub type Result<T> = std::result::Result<T, NavigationError>;
