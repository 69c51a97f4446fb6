//! Runtime configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `SCENE_TICK_MS` | 50 | Scheduler interval in milliseconds |
//! | `SCENE_MARKER_LIFETIME` | 100 | Marker lifetime in ticks |
//! | `SCENE_ROTATION_SPEED` | 10 | Square rotation in degrees per tick |
//! | `SCENE_SQUARE_SIZE` | 2 | Square half-width in cells |
//! | `SCENE_TIME_SPEED` | 1 | Initial time speed (1..=100) |
//! | `SCENE_MAX_WIDTH` / `SCENE_MAX_HEIGHT` | unset | Cap on the drawn area |
//! | `SCENE_LOG_PATH` | unset | Write tracing output to this file |
//! | `SCENE_HEADLESS_TICKS` | unset | Run this many ticks off-screen, then exit |
//!
//! Missing or unparsable values fall back to the default; [`SceneConfig::validate`]
//! catches values that parse but make no sense.

use std::time::Duration;

use crate::core::{SceneSettings, TimeSpeed};
use crate::error::ConfigError;
use crate::types::{
    DEFAULT_ROTATION_SPEED, DEFAULT_SQUARE_SIZE, MARKER_LIFETIME_TICKS, MAX_SQUARE_SIZE,
    MIN_SQUARE_SIZE, TICK_MS, TIME_SPEED_MAX, TIME_SPEED_MIN,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneConfig {
    pub tick_ms: u64,
    pub marker_lifetime: u64,
    pub rotation_speed: i32,
    pub square_size: i32,
    pub time_speed: u32,
    pub max_width: Option<u16>,
    pub max_height: Option<u16>,
    pub log_path: Option<String>,
    pub headless_ticks: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            marker_lifetime: MARKER_LIFETIME_TICKS,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            square_size: DEFAULT_SQUARE_SIZE,
            time_speed: TIME_SPEED_MIN,
            max_width: None,
            max_height: None,
            log_path: None,
            headless_ticks: None,
        }
    }
}

impl SceneConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();

        let log_path = lookup("SCENE_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            tick_ms: parsed(&lookup, "SCENE_TICK_MS").unwrap_or(defaults.tick_ms),
            marker_lifetime: parsed(&lookup, "SCENE_MARKER_LIFETIME")
                .unwrap_or(defaults.marker_lifetime),
            rotation_speed: parsed(&lookup, "SCENE_ROTATION_SPEED")
                .unwrap_or(defaults.rotation_speed),
            square_size: parsed(&lookup, "SCENE_SQUARE_SIZE").unwrap_or(defaults.square_size),
            time_speed: parsed(&lookup, "SCENE_TIME_SPEED").unwrap_or(defaults.time_speed),
            max_width: parsed(&lookup, "SCENE_MAX_WIDTH"),
            max_height: parsed(&lookup, "SCENE_MAX_HEIGHT"),
            log_path,
            headless_ticks: parsed(&lookup, "SCENE_HEADLESS_TICKS"),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.marker_lifetime == 0 {
            return Err(ConfigError::ZeroMarkerLifetime);
        }
        if !(MIN_SQUARE_SIZE..=MAX_SQUARE_SIZE).contains(&self.square_size) {
            return Err(ConfigError::SquareSize {
                value: self.square_size,
                min: MIN_SQUARE_SIZE,
                max: MAX_SQUARE_SIZE,
            });
        }
        if !(TIME_SPEED_MIN..=TIME_SPEED_MAX).contains(&self.time_speed) {
            return Err(ConfigError::TimeSpeed {
                value: self.time_speed,
                min: TIME_SPEED_MIN,
                max: TIME_SPEED_MAX,
            });
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Settings for a fresh [`crate::core::SceneState`].
    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            marker_lifetime: self.marker_lifetime,
            square_size: self.square_size,
            rotation_speed: self.rotation_speed,
            time_speed: TimeSpeed::new(self.time_speed),
            ..SceneSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = SceneConfig::from_lookup(|_| None);
        assert_eq!(cfg, SceneConfig::default());
        assert_eq!(cfg.tick_interval(), Duration::from_millis(50));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn values_are_parsed_and_trimmed() {
        let cfg = SceneConfig::from_lookup(lookup_from(&[
            ("SCENE_TICK_MS", " 16 "),
            ("SCENE_ROTATION_SPEED", "-15"),
            ("SCENE_MAX_WIDTH", "50"),
            ("SCENE_LOG_PATH", "  /tmp/scene.log "),
            ("SCENE_HEADLESS_TICKS", "200"),
        ]));
        assert_eq!(cfg.tick_ms, 16);
        assert_eq!(cfg.rotation_speed, -15);
        assert_eq!(cfg.max_width, Some(50));
        assert_eq!(cfg.max_height, None);
        assert_eq!(cfg.log_path.as_deref(), Some("/tmp/scene.log"));
        assert_eq!(cfg.headless_ticks, Some(200));
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let cfg = SceneConfig::from_lookup(lookup_from(&[
            ("SCENE_TICK_MS", "fast"),
            ("SCENE_LOG_PATH", "   "),
        ]));
        assert_eq!(cfg.tick_ms, TICK_MS);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn validate_rejects_nonsense() {
        let zero_tick = SceneConfig {
            tick_ms: 0,
            ..SceneConfig::default()
        };
        assert_eq!(zero_tick.validate(), Err(ConfigError::ZeroInterval));

        let tiny = SceneConfig {
            square_size: 0,
            ..SceneConfig::default()
        };
        assert!(matches!(
            tiny.validate(),
            Err(ConfigError::SquareSize { value: 0, .. })
        ));

        let too_fast = SceneConfig {
            time_speed: 101,
            ..SceneConfig::default()
        };
        assert!(matches!(
            too_fast.validate(),
            Err(ConfigError::TimeSpeed { value: 101, .. })
        ));
    }

    #[test]
    fn oversized_square_is_rejected() {
        let cfg = SceneConfig::from_lookup(lookup_from(&[("SCENE_SQUARE_SIZE", "2147483647")]));
        assert_eq!(cfg.square_size, i32::MAX);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::SquareSize {
                value: i32::MAX,
                min: MIN_SQUARE_SIZE,
                max: MAX_SQUARE_SIZE,
            })
        );

        let largest = SceneConfig {
            square_size: MAX_SQUARE_SIZE,
            ..SceneConfig::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn scene_settings_carry_overrides() {
        let cfg = SceneConfig {
            marker_lifetime: 30,
            time_speed: 7,
            ..SceneConfig::default()
        };
        let settings = cfg.scene_settings();
        assert_eq!(settings.marker_lifetime, 30);
        assert_eq!(settings.time_speed.get(), 7);
    }
}
