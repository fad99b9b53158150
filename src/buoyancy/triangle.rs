//! The submerged-triangle value type.

use bevy::math::Vec3;

use crate::water::HeightField;

/// One triangle of the submerged hull surface, in world space.
///
/// All derived quantities are computed by the factory and frozen; the type
/// has no mutators. `depth` is the vertical distance from the centroid to
/// the water surface and is never negative.
#[derive(Debug, Clone, Copy)]
pub struct SubmergedTriangle {
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
    /// Centroid of the three corners
    pub center: Vec3,
    /// Unit normal from the corner winding (zero when degenerate)
    pub normal: Vec3,
    /// Surface area, never negative
    pub area: f32,
    /// Distance from the centroid down to the water surface, >= 0
    pub depth: f32,
}

impl SubmergedTriangle {
    /// Build a triangle and freeze its derived quantities.
    ///
    /// `water` supplies the surface height above the centroid at `time`.
    pub fn new<H: HeightField + ?Sized>(
        p1: Vec3,
        p2: Vec3,
        p3: Vec3,
        water: &H,
        time: f32,
    ) -> Self {
        let center = (p1 + p2 + p3) / 3.0;
        let cross = (p2 - p1).cross(p3 - p1);
        let normal = cross.normalize_or_zero();
        let area = cross.length() / 2.0;
        let depth = water.distance_to_surface(center, time).abs();

        Self {
            p1,
            p2,
            p3,
            center,
            normal,
            area,
            depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::water::StillWater;

    const WATER: StillWater = StillWater { level: 0.0 };

    #[test]
    fn test_derived_quantities() {
        let triangle = SubmergedTriangle::new(
            Vec3::new(0.0, -2.0, 0.0),
            Vec3::new(0.0, -2.0, 1.0),
            Vec3::new(1.0, -2.0, 0.0),
            &WATER,
            0.0,
        );

        assert_eq!(triangle.center, Vec3::new(1.0 / 3.0, -2.0, 1.0 / 3.0));
        assert_eq!(triangle.normal, Vec3::Y);
        assert!((triangle.area - 0.5).abs() < 1e-6);
        assert_eq!(triangle.depth, 2.0);
    }

    #[test]
    fn test_depth_is_never_negative() {
        // Centroid above the surface still yields a non-negative depth.
        let triangle = SubmergedTriangle::new(
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(1.0, 3.0, 0.0),
            Vec3::new(0.0, 3.0, 1.0),
            &WATER,
            0.0,
        );
        assert_eq!(triangle.depth, 3.0);
    }

    #[test]
    fn test_degenerate_triangle_is_zero_valued() {
        // Collinear corners: no area, no usable normal.
        let triangle = SubmergedTriangle::new(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(2.0, -1.0, 0.0),
            &WATER,
            0.0,
        );
        assert_eq!(triangle.area, 0.0);
        assert_eq!(triangle.normal, Vec3::ZERO);
    }
}
