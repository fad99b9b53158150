//! Hydrostatic force integration over the submerged hull.

use bevy::math::Vec3;

use super::triangle::SubmergedTriangle;

/// One force contribution: a force vector and its world application point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuoyancyForce {
    pub force: Vec3,
    pub point: Vec3,
}

/// Hydrostatic force on a single submerged triangle.
///
/// F = ρ · g_y · depth · area · normal. The horizontal components are
/// zeroed: over a closed submerged surface they cancel, only the vertical
/// component contributes lift.
pub fn buoyancy_force(density: f32, gravity_y: f32, triangle: &SubmergedTriangle) -> Vec3 {
    let force = density * gravity_y * triangle.depth * triangle.area * triangle.normal;
    Vec3::new(0.0, force.y, 0.0)
}

/// Force/application-point pairs for a submerged triangle set.
///
/// One pair per triangle, applied at that triangle's centroid; summing the
/// forces before applying them would lose the torque.
pub fn hydrostatic_forces(
    triangles: &[SubmergedTriangle],
    density: f32,
    gravity_y: f32,
) -> impl Iterator<Item = BuoyancyForce> + '_ {
    triangles.iter().map(move |triangle| BuoyancyForce {
        force: buoyancy_force(density, gravity_y, triangle),
        point: triangle.center,
    })
}
