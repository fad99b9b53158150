//! Rigid-body buoyancy over a dynamic water surface.
//!
//! Every physics step, the hull mesh of a floating body is clipped against
//! the water height field, producing the exact set of triangles below the
//! surface. Hydrostatic pressure is then integrated over that set, one force
//! per triangle, applied at the triangle centroid so the body also receives
//! the correct torque.
//!
//! ## Architecture
//!
//! ```text
//! body Transform + HullMesh ──► SubmergedMesh (clipper) ──► [SubmergedTriangle]
//!                                                               │
//!          HeightField (waves) ───────────────────────────────► │
//!                                                               ▼
//!                                        hydrostatic_forces ──► [(force, point)]
//!                                                               ▼
//!                                        bevy_rapier3d ExternalForce::at_point
//! ```
//!
//! - [`water`] — the `HeightField` contract, wave configuration, and the
//!   endless tiling manager for display geometry.
//! - [`buoyancy`] — the submerged-mesh clipper and the hydrostatic force
//!   integration over its output.
//! - [`physics`] — the rapier integration: `FloatingBody`, bundle, plugin.

pub mod buoyancy;
pub mod constants;
pub mod physics;
pub mod water;

pub use constants::*;
