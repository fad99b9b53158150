//! Water surface model: configuration, height sampling, and tiling.
//!
//! The physics core only ever talks to the surface through the
//! [`HeightField`] trait, a pure function of horizontal position and time.
//! Everything else in this module exists around that contract:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   WaveConfig (serde/RON)                  │
//! │  directional sine components + Perlin detail + base level │
//! └───────────────────────────┬──────────────────────────────┘
//!                             ▼
//!                     WaveField: HeightField
//!              ┌──────────────┴──────────────┐
//!              ▼                             ▼
//!      physics sampling               tiling sampler
//!   (synchronous, per step)     (background task, published
//!                                as a complete buffer)
//! ```
//!
//! The tiling sampler only produces display geometry. The buoyancy path
//! samples the field directly and synchronously inside the physics step.

pub mod config;
pub mod field;
pub mod tiling;

pub use config::{NoiseParams, WaveConfig, WaveParams, WavePreset};
pub use field::{HeightField, StillWater, Water, WaveField};
pub use tiling::{SurfaceGeometry, TileLayout, WaterSurfacePlugin, WaterTracked};
