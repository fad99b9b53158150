//! Water surface height sampling.
//!
//! [`HeightField`] is the one contract the buoyancy core consumes: a pure
//! function of horizontal position and time. Two calls with identical
//! arguments must return identical results within one frame, and sampling
//! must be callable concurrently for read-only queries.

use std::sync::Arc;

use bevy::math::{Vec2, Vec3};
use bevy_ecs::resource::Resource;
use noise::{NoiseFn, Perlin};

use super::config::{WaveConfig, MAX_WAVES};

/// A water surface elevation function.
pub trait HeightField: Send + Sync {
    /// Surface elevation at a horizontal position.
    fn height(&self, position: Vec2, time: f32) -> f32;

    /// Signed vertical distance from a point to the surface.
    /// Positive is above water, negative below.
    fn distance_to_surface(&self, point: Vec3, time: f32) -> f32 {
        point.y - self.height(Vec2::new(point.x, point.z), time)
    }

    /// True when the point lies below the surface.
    fn is_underwater(&self, point: Vec3, time: f32) -> bool {
        self.distance_to_surface(point, time) < 0.0
    }

    /// Sample many points into a caller-owned buffer.
    /// The buffer is cleared first; one height per input point.
    fn sample_heights(&self, points: &[Vec2], time: f32, heights: &mut Vec<f32>) {
        heights.clear();
        heights.extend(points.iter().map(|point| self.height(*point, time)));
    }
}

/// Flat water at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct StillWater {
    pub level: f32,
}

impl HeightField for StillWater {
    fn height(&self, _position: Vec2, _time: f32) -> f32 {
        self.level
    }
}

/// Precomputed constants for one sine component.
#[derive(Clone, Copy, Default)]
struct WaveConstants {
    /// Wave number k = 2π / wavelength
    k: f32,
    /// Angular frequency ω = k * speed
    omega: f32,
    amplitude: f32,
    direction: Vec2,
}

/// A moving water surface built from a [`WaveConfig`].
///
/// Wave constants are computed once at construction so per-sample work is a
/// handful of multiply-adds per component. The Perlin generator is seeded
/// from the config, so two fields built from the same config sample
/// identically.
#[derive(Clone)]
pub struct WaveField {
    config: WaveConfig,
    constants: [WaveConstants; MAX_WAVES],
    noise: Option<Perlin>,
}

impl WaveField {
    pub fn new(config: WaveConfig) -> Self {
        let mut constants = [WaveConstants::default(); MAX_WAVES];
        for (i, wave) in config.active_waves().enumerate() {
            constants[i] = WaveConstants {
                k: wave.wave_number(),
                omega: wave.frequency(),
                amplitude: wave.amplitude,
                direction: wave.direction,
            };
        }

        let noise = config.noise.map(|params| Perlin::new(params.seed));

        Self {
            config,
            constants,
            noise,
        }
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }
}

impl HeightField for WaveField {
    fn height(&self, position: Vec2, time: f32) -> f32 {
        let mut height = self.config.base_level;

        for i in 0..self.config.num_waves as usize {
            let wave = &self.constants[i];
            // Phase = k * (dir · pos) - ω * t
            let phase = wave.k * wave.direction.dot(position) - wave.omega * time;
            height += wave.amplitude * phase.sin();
        }

        if let (Some(perlin), Some(params)) = (&self.noise, &self.config.noise) {
            let x = (position.x * params.scale + params.walk_speed * time) as f64;
            let z = (position.y * params.scale) as f64;
            height += perlin.get([x, z]) as f32 * params.strength;
        }

        height
    }
}

/// The simulation's water surface, injected once at startup.
///
/// Systems receive the surface through this resource rather than any global
/// lookup; cloning shares the underlying field.
#[derive(Resource, Clone)]
pub struct Water {
    field: Arc<dyn HeightField>,
}

impl Water {
    pub fn new(field: impl HeightField + 'static) -> Self {
        Self {
            field: Arc::new(field),
        }
    }

    /// Flat water at the given level.
    pub fn still(level: f32) -> Self {
        Self::new(StillWater { level })
    }

    pub fn field(&self) -> &dyn HeightField {
        self.field.as_ref()
    }

    /// Shared handle for handing the field to a background task.
    pub fn shared_field(&self) -> Arc<dyn HeightField> {
        Arc::clone(&self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::water::config::WavePreset;

    #[test]
    fn test_still_water_height() {
        let field = StillWater { level: 10.0 };
        assert_eq!(field.height(Vec2::ZERO, 0.0), 10.0);
        assert_eq!(field.height(Vec2::new(100.0, -42.0), 5.0), 10.0);
    }

    #[test]
    fn test_still_preset_is_flat() {
        let field = WaveField::new(WavePreset::Still.to_config(3.0));
        assert_eq!(field.height(Vec2::ZERO, 0.0), 3.0);
        assert_eq!(field.height(Vec2::new(50.0, 50.0), 9.0), 3.0);
    }

    #[test]
    fn test_ocean_heights_vary() {
        let field = WaveField::new(WavePreset::Ocean.to_config(0.0));
        let h1 = field.height(Vec2::ZERO, 0.0);
        let h2 = field.height(Vec2::ZERO, 1.0);
        let h3 = field.height(Vec2::new(5.0, 5.0), 0.0);
        assert_ne!(h1, h2, "height should vary over time");
        assert_ne!(h1, h3, "height should vary over space");
    }

    #[test]
    fn test_identical_configs_sample_identically() {
        let config = WavePreset::Ocean.to_config(0.0);
        let a = WaveField::new(config.clone());
        let b = WaveField::new(config);
        let position = Vec2::new(12.5, -3.0);
        assert_eq!(a.height(position, 7.25), b.height(position, 7.25));
    }

    #[test]
    fn test_signed_distance_convention() {
        let field = StillWater { level: 2.0 };
        assert_eq!(field.distance_to_surface(Vec3::new(0.0, 5.0, 0.0), 0.0), 3.0);
        assert_eq!(
            field.distance_to_surface(Vec3::new(0.0, -1.0, 0.0), 0.0),
            -3.0
        );
        assert!(field.is_underwater(Vec3::new(0.0, 1.0, 0.0), 0.0));
        assert!(!field.is_underwater(Vec3::new(0.0, 3.0, 0.0), 0.0));
    }

    #[test]
    fn test_batch_sampling_matches_single() {
        let field = WaveField::new(WavePreset::Lake.to_config(1.0));
        let points = [Vec2::ZERO, Vec2::new(3.0, 4.0), Vec2::new(-8.0, 2.5)];
        let mut heights = vec![999.0];
        field.sample_heights(&points, 2.0, &mut heights);
        assert_eq!(heights.len(), points.len());
        for (point, height) in points.iter().zip(&heights) {
            assert_eq!(*height, field.height(*point, 2.0));
        }
    }
}
