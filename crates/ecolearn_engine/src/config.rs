//! Session configuration.
//!
//! Everything that distinguishes one game from another lives here: item
//! count, timer scope, retry rule, scoring weights, and the sampling
//! filter. The engine itself carries no game-specific constants.

use crate::clock::TimerScope;
use crate::content::ItemFilter;
use crate::scoring::ScoringPolicy;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Error raised when a configuration cannot describe a playable session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    /// A session needs at least one item.
    #[display("Session must draw at least one item")]
    ZeroItems,
}

/// Declarative description of one game's session shape.
///
/// Defaults describe a short untimed practice run; presets for real games
/// override what they need through the `with_` setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
pub struct SessionConfig {
    /// Number of items drawn at start.
    pub item_count: usize,
    /// Countdown scope.
    pub timer_scope: TimerScope,
    /// Whether an incorrect submission leaves the item open for another
    /// try instead of resolving it.
    pub allow_retry: bool,
    /// Scoring weights and penalties.
    pub policy: ScoringPolicy,
    /// Optional restriction on which items may be drawn.
    pub filter: Option<ItemFilter>,
    /// Score the session starts from.
    pub initial_score: i64,
    /// Hints accepted per item; requests beyond the cap are no-ops.
    pub max_hints_per_item: u32,
    /// Display window the host should leave between a resolution and the
    /// advance to the next item.
    pub resolve_display_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            item_count: 5,
            timer_scope: TimerScope::Untimed,
            allow_retry: false,
            policy: ScoringPolicy::default(),
            filter: None,
            initial_score: 0,
            max_hints_per_item: 1,
            resolve_display_ms: 2_000,
        }
    }
}

impl SessionConfig {
    /// Checks that the configuration describes a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_count == 0 {
            return Err(ConfigError::ZeroItems);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_an_untimed_practice_shape() {
        let config = SessionConfig::default();
        assert_eq!(config.item_count, 5);
        assert_eq!(config.timer_scope, TimerScope::Untimed);
        assert!(!config.allow_retry);
        assert_eq!(config.max_hints_per_item, 1);
        assert_eq!(config.initial_score, 0);
    }

    #[test]
    fn test_zero_item_sessions_are_rejected() {
        let config = SessionConfig::default().with_item_count(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroItems));
    }

    #[test]
    fn test_setters_chain() {
        let config = SessionConfig::default()
            .with_item_count(4)
            .with_timer_scope(TimerScope::PerSession { seconds: 900 })
            .with_allow_retry(true)
            .with_initial_score(1_000);
        assert_eq!(config.item_count, 4);
        assert_eq!(config.timer_scope, TimerScope::PerSession { seconds: 900 });
        assert!(config.allow_retry);
        assert_eq!(config.initial_score, 1_000);
        assert!(config.validate().is_ok());
    }
}
