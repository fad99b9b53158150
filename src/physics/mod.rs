//! Physics-engine integration for floating bodies.

pub mod rapier;

pub use rapier::{
    apply_buoyancy_forces, update_submerged_meshes, BuoyancyConfig, BuoyancyPlugin, FloatingBody,
    FloatingBodyBundle,
};
