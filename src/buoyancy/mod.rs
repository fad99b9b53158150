//! Submerged-hull extraction and hydrostatic force integration.
//!
//! [`SubmergedMesh`] clips a body's hull against the water surface every
//! physics step, producing the exact set of [`SubmergedTriangle`]s below the
//! waterline. [`hydrostatic_forces`] turns that set into one
//! (force, application point) pair per triangle for the rigid-body solver.

pub mod forces;
pub mod mesh;
pub mod triangle;

pub use forces::{buoyancy_force, hydrostatic_forces, BuoyancyForce};
pub use mesh::{HullMesh, MeshError, SubmergedMesh};
pub use triangle::SubmergedTriangle;
