//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a session engine.
///
/// The defaults reproduce the party game's stock settings: two-minute
/// rounds, one impostor, one-second countdown ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Round length shown before any round is configured, and after a reset.
    pub default_round_time_secs: u32,

    /// Impostor count shown before any round is configured.
    pub default_imposter_count: usize,

    /// Delay before a fresh or reset session clears `is_loading`.
    pub loading_delay: Duration,

    /// Period of the discussion countdown.
    pub tick_period: Duration,

    /// Capacity of the session actor's command channel.
    pub channel_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_round_time_secs: 120,
            default_imposter_count: 1,
            loading_delay: Duration::from_millis(100),
            tick_period: Duration::from_secs(1),
            channel_size: 64,
        }
    }
}

impl EngineConfig {
    /// Fix values that would make the session unusable.
    ///
    /// - `channel_size` is at least 1 (Tokio rejects empty channels).
    /// - `default_imposter_count` is at least 1.
    pub fn validated(mut self) -> Self {
        if self.channel_size == 0 {
            tracing::warn!("channel_size must be positive, using 1");
            self.channel_size = 1;
        }
        if self.default_imposter_count == 0 {
            tracing::warn!("default_imposter_count must be positive, using 1");
            self.default_imposter_count = 1;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();
        assert_eq!(config.default_round_time_secs, 120);
        assert_eq!(config.default_imposter_count, 1);
        assert_eq!(config.loading_delay, Duration::from_millis(100));
        assert_eq!(config.tick_period, Duration::from_secs(1));
    }

    #[test]
    fn test_validated_fixes_zero_values() {
        let config = EngineConfig {
            channel_size: 0,
            default_imposter_count: 0,
            ..EngineConfig::default()
        }
        .validated();
        assert_eq!(config.channel_size, 1);
        assert_eq!(config.default_imposter_count, 1);
    }
}
