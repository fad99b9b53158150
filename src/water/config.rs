//! Wave configuration for the water surface.
//!
//! A `WaveConfig` fully describes a surface: up to [`MAX_WAVES`] directional
//! sine components plus an optional Perlin detail layer. Configs are plain
//! serde data so they can live in RON save files and be tuned without
//! recompiling.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;
use thiserror::Error;

/// Maximum number of sine components in one configuration.
pub const MAX_WAVES: usize = 4;

/// Failure to load a wave configuration from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read wave config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse wave config: {0}")]
    Parse(#[from] ron::de::Error),
}

/// Parameters for a single directional sine wave.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaveParams {
    /// Travel direction in the XZ plane (normalized)
    pub direction: Vec2,
    /// Crest height above the rest level (world units)
    pub amplitude: f32,
    /// Wavelength in world units
    pub wavelength: f32,
    /// Phase speed multiplier
    pub speed: f32,
}

impl WaveParams {
    pub fn new(direction: Vec2, amplitude: f32, wavelength: f32, speed: f32) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            amplitude,
            wavelength: wavelength.max(0.1),
            speed,
        }
    }

    /// Wave number (k = 2π / wavelength)
    #[inline(always)]
    pub fn wave_number(&self) -> f32 {
        2.0 * PI / self.wavelength
    }

    /// Angular frequency (ω = k * speed)
    #[inline(always)]
    pub fn frequency(&self) -> f32 {
        self.wave_number() * self.speed
    }
}

impl Default for WaveParams {
    fn default() -> Self {
        Self::new(Vec2::X, 0.1, 4.0, 1.0)
    }
}

/// Perlin detail layer stacked on top of the sine components.
///
/// The noise input drifts along X over time ("walk") so the detail pattern
/// keeps moving even on an otherwise still surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Height contribution of the noise layer (world units)
    pub strength: f32,
    /// Drift speed of the noise input along X
    pub walk_speed: f32,
    /// Horizontal frequency of the noise input
    pub scale: f32,
    /// Seed for the Perlin generator
    pub seed: u32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            strength: 0.1,
            walk_speed: 1.0,
            scale: 0.1,
            seed: 0,
        }
    }
}

/// Complete description of a water surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Sine components (fixed capacity, `num_waves` are active)
    pub waves: [WaveParams; MAX_WAVES],
    /// Number of active sine components (0-4)
    pub num_waves: u32,
    /// Rest level of the surface (world Y)
    pub base_level: f32,
    /// Optional Perlin detail layer
    pub noise: Option<NoiseParams>,
}

impl WaveConfig {
    /// Create a flat config with no active waves.
    pub fn new(base_level: f32) -> Self {
        Self {
            waves: [WaveParams::default(); MAX_WAVES],
            num_waves: 0,
            base_level,
            noise: None,
        }
    }

    /// Add a sine component. Returns false if capacity is reached.
    pub fn add_wave(&mut self, params: WaveParams) -> bool {
        if (self.num_waves as usize) < MAX_WAVES {
            self.waves[self.num_waves as usize] = params;
            self.num_waves += 1;
            true
        } else {
            false
        }
    }

    /// Iterator over the active sine components only.
    pub fn active_waves(&self) -> impl Iterator<Item = &WaveParams> {
        self.waves.iter().take(self.num_waves as usize)
    }

    /// Parse a config from RON text.
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(ron::de::from_str(contents)?)
    }

    /// Load a config from a RON file.
    pub fn from_ron_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }
}

/// Preset surfaces for common water types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub enum WavePreset {
    /// Completely still water (no waves, no noise)
    Still,
    /// Barely moving surface
    Calm,
    /// Lake with gentle waves
    Lake,
    /// Standard ocean swell
    #[default]
    Ocean,
    /// Stormy ocean with large waves
    Storm,
}

impl WavePreset {
    /// Build a `WaveConfig` from this preset at the given rest level.
    pub fn to_config(self, base_level: f32) -> WaveConfig {
        let mut config = WaveConfig::new(base_level);

        match self {
            WavePreset::Still => {
                // No waves
            }
            WavePreset::Calm => {
                config.add_wave(WaveParams::new(Vec2::new(1.0, 0.2), 0.05, 6.0, 0.5));
                config.noise = Some(NoiseParams {
                    strength: 0.05,
                    ..NoiseParams::default()
                });
            }
            WavePreset::Lake => {
                config.add_wave(WaveParams::new(Vec2::new(1.0, 0.0), 0.1, 4.0, 0.8));
                config.add_wave(WaveParams::new(Vec2::new(0.3, 1.0), 0.06, 2.5, 1.0));
                config.noise = Some(NoiseParams::default());
            }
            WavePreset::Ocean => {
                config.add_wave(WaveParams::new(Vec2::new(0.0, 1.0), 0.1, 1.0, 1.0));
                config.add_wave(WaveParams::new(Vec2::new(1.0, 0.3), 0.25, 8.0, 1.5));
                config.add_wave(WaveParams::new(Vec2::new(-0.7, 1.0), 0.15, 5.0, 1.8));
                config.noise = Some(NoiseParams {
                    strength: 1.0,
                    ..NoiseParams::default()
                });
            }
            WavePreset::Storm => {
                config.add_wave(WaveParams::new(Vec2::new(1.0, 0.2), 0.8, 12.0, 2.0));
                config.add_wave(WaveParams::new(Vec2::new(-0.5, 1.0), 0.5, 8.0, 2.5));
                config.add_wave(WaveParams::new(Vec2::new(0.7, -0.7), 0.3, 5.0, 3.0));
                config.add_wave(WaveParams::new(Vec2::new(-1.0, -0.3), 0.2, 3.0, 3.5));
                config.noise = Some(NoiseParams {
                    strength: 1.5,
                    walk_speed: 2.0,
                    ..NoiseParams::default()
                });
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_wave_counts() {
        assert_eq!(WavePreset::Still.to_config(0.0).num_waves, 0);
        assert_eq!(WavePreset::Calm.to_config(0.0).num_waves, 1);
        assert_eq!(WavePreset::Lake.to_config(0.0).num_waves, 2);
        assert_eq!(WavePreset::Ocean.to_config(0.0).num_waves, 3);
        assert_eq!(WavePreset::Storm.to_config(0.0).num_waves, 4);
    }

    #[test]
    fn test_directions_are_normalized() {
        let params = WaveParams::new(Vec2::new(3.0, 4.0), 0.5, 2.0, 1.0);
        assert!((params.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_wave_capacity() {
        let mut config = WaveConfig::new(0.0);
        for _ in 0..MAX_WAVES {
            assert!(config.add_wave(WaveParams::default()));
        }
        assert!(!config.add_wave(WaveParams::default()));
        assert_eq!(config.num_waves as usize, MAX_WAVES);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = WavePreset::Ocean.to_config(62.0);
        let text = ron::ser::to_string(&config).expect("serialize");
        let parsed = WaveConfig::from_ron_str(&text).expect("parse");
        assert_eq!(parsed.num_waves, config.num_waves);
        assert_eq!(parsed.base_level, config.base_level);
        assert!(parsed.noise.is_some());
    }

    #[test]
    fn test_bad_ron_is_an_error() {
        assert!(matches!(
            WaveConfig::from_ron_str("not a config"),
            Err(ConfigError::Parse(_))
        ));
    }
}
