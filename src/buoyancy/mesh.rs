//! Submerged-hull extraction.
//!
//! [`SubmergedMesh`] clips a hull mesh against the water surface: every
//! physics step each hull triangle is classified by the signed distances of
//! its corners to the water and the portion below the waterline is emitted
//! as one or two output triangles. The three mixed-sign shapes (one corner
//! above, two above, corner exactly on the surface) each have a fixed,
//! winding-preserving construction so the output normals always agree with
//! the hull's.
//!
//! The clipper owns its per-frame buffers and reuses the backing storage
//! across steps; a rebuild is pure in (transform, water, time) and has no
//! other side effects.

use bevy::math::Vec3;
use bevy::prelude::Transform;
use thiserror::Error;

use super::triangle::SubmergedTriangle;
use crate::water::HeightField;

/// Validation failure for hull mesh input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("hull mesh has no vertices")]
    NoVertices,
    #[error("index count {count} is not a multiple of 3")]
    IndexCountNotTriangles { count: usize },
    #[error("index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },
}

/// A validated triangle mesh in body-local space.
///
/// Immutable for the lifetime of the body; winding of each index triple
/// determines the outward normal.
#[derive(Debug, Clone)]
pub struct HullMesh {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
}

impl HullMesh {
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if vertices.is_empty() {
            return Err(MeshError::NoVertices);
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotTriangles {
                count: indices.len(),
            });
        }
        if let Some(&index) = indices.iter().find(|i| **i as usize >= vertices.len()) {
            return Err(MeshError::IndexOutOfBounds {
                index,
                vertex_count: vertices.len(),
            });
        }

        Ok(Self { vertices, indices })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Per-vertex sample for one frame: world position + signed distance to
/// water (positive above the surface).
#[derive(Debug, Clone, Copy)]
struct VertexSample {
    position: Vec3,
    distance: f32,
}

/// The per-frame clipper for one hull.
///
/// Holds the hull plus the transient buffers of one rebuild: world-space
/// vertex positions, signed distances (each hull vertex is transformed and
/// sampled exactly once, however many triangles share it), and the output
/// triangle list. Buffers are cleared and refilled every call.
pub struct SubmergedMesh {
    hull: HullMesh,
    world_vertices: Vec<Vec3>,
    distances: Vec<f32>,
    triangles: Vec<SubmergedTriangle>,
}

impl SubmergedMesh {
    pub fn new(hull: HullMesh) -> Self {
        let vertex_count = hull.vertices().len();
        Self {
            hull,
            world_vertices: vec![Vec3::ZERO; vertex_count],
            distances: vec![0.0; vertex_count],
            triangles: Vec::new(),
        }
    }

    pub fn hull(&self) -> &HullMesh {
        &self.hull
    }

    /// The submerged triangles of the most recent rebuild.
    pub fn triangles(&self) -> &[SubmergedTriangle] {
        &self.triangles
    }

    /// Total area of the submerged triangles of the most recent rebuild.
    pub fn submerged_area(&self) -> f32 {
        self.triangles.iter().map(|triangle| triangle.area).sum()
    }

    /// Rebuild the submerged triangle list for this instant.
    ///
    /// Valid only for the given transform/time; callers must not retain the
    /// output across steps.
    pub fn rebuild<H: HeightField + ?Sized>(
        &mut self,
        transform: &Transform,
        water: &H,
        time: f32,
    ) {
        self.triangles.clear();

        for (index, local) in self.hull.vertices().iter().enumerate() {
            let position = transform.transform_point(*local);
            let distance = water.distance_to_surface(position, time);
            debug_assert!(
                distance.is_finite(),
                "height field returned a non-finite sample at {position:?}"
            );
            self.world_vertices[index] = position;
            self.distances[index] = distance;
        }

        for triple in self.hull.indices().chunks_exact(3) {
            let corners = [
                self.sample(triple[0]),
                self.sample(triple[1]),
                self.sample(triple[2]),
            ];
            clip_triangle(&corners, water, time, &mut self.triangles);
        }
    }

    /// Re-express the current submerged triangles in body-local space.
    ///
    /// Returns flat vertex positions plus indices, suitable for building a
    /// display mesh of the underwater hull portion.
    pub fn local_mesh(&self, transform: &Transform) -> (Vec<Vec3>, Vec<u32>) {
        let inverse = transform.compute_affine().inverse();
        let mut vertices = Vec::with_capacity(self.triangles.len() * 3);
        let mut indices = Vec::with_capacity(self.triangles.len() * 3);

        for triangle in &self.triangles {
            for corner in [triangle.p1, triangle.p2, triangle.p3] {
                vertices.push(inverse.transform_point3(corner));
                indices.push(vertices.len() as u32 - 1);
            }
        }

        (vertices, indices)
    }

    fn sample(&self, index: u32) -> VertexSample {
        VertexSample {
            position: self.world_vertices[index as usize],
            distance: self.distances[index as usize],
        }
    }
}

/// Classify one triangle by the signs of its corner distances and emit the
/// submerged portion.
///
/// The comparisons are strict: a corner exactly on the surface counts as
/// above water, and a triangle that touches the surface without any corner
/// strictly above contributes nothing this frame.
fn clip_triangle<H: HeightField + ?Sized>(
    corners: &[VertexSample; 3],
    water: &H,
    time: f32,
    out: &mut Vec<SubmergedTriangle>,
) {
    let above = corners.iter().filter(|c| c.distance > 0.0).count();
    let below = corners.iter().filter(|c| c.distance < 0.0).count();

    if above == 3 {
        return;
    }

    if below == 3 {
        push_triangle(
            corners[0].position,
            corners[1].position,
            corners[2].position,
            water,
            time,
            out,
        );
        return;
    }

    match (above, below) {
        (1, 2) => clip_one_above(corners, water, time, out),
        (2, 1) => clip_two_above(corners, water, time, out),
        // A corner sits exactly on the surface; the strict sign tests drop
        // the triangle for this instant.
        _ => {}
    }
}

/// One corner above water: the submerged quad splits into two triangles.
fn clip_one_above<H: HeightField + ?Sized>(
    corners: &[VertexSample; 3],
    water: &H,
    time: f32,
    out: &mut Vec<SubmergedTriangle>,
) {
    // H is the lone corner above water; M precedes it in winding order and
    // L follows it, which keeps the output winding aligned with the hull's.
    let Some(h_slot) = corners.iter().position(|c| c.distance > 0.0) else {
        return;
    };
    let h = corners[h_slot];
    let m = corners[(h_slot + 2) % 3];
    let l = corners[(h_slot + 1) % 3];

    let i_m = surface_crossing(m, h);
    let i_l = surface_crossing(l, h);

    push_triangle(m.position, i_m, i_l, water, time, out);
    push_triangle(m.position, i_l, l.position, water, time, out);
}

/// Two corners above water: only the tip around the submerged corner
/// remains.
fn clip_two_above<H: HeightField + ?Sized>(
    corners: &[VertexSample; 3],
    water: &H,
    time: f32,
    out: &mut Vec<SubmergedTriangle>,
) {
    // L is the lone submerged corner; H follows it in winding order.
    let Some(l_slot) = corners.iter().position(|c| c.distance < 0.0) else {
        return;
    };
    let l = corners[l_slot];
    let h = corners[(l_slot + 1) % 3];
    let m = corners[(l_slot + 2) % 3];

    let j_h = surface_crossing(l, h);
    let j_m = surface_crossing(l, m);

    push_triangle(l.position, j_h, j_m, water, time, out);
}

/// Point where the edge from `a` (below water) to `b` (above water) crosses
/// the surface, by linear interpolation on signed distance.
fn surface_crossing(a: VertexSample, b: VertexSample) -> Vec3 {
    let t = -a.distance / (b.distance - a.distance);
    a.position + t * (b.position - a.position)
}

/// Construct and store an output triangle, dropping degenerate slivers.
fn push_triangle<H: HeightField + ?Sized>(
    p1: Vec3,
    p2: Vec3,
    p3: Vec3,
    water: &H,
    time: f32,
    out: &mut Vec<SubmergedTriangle>,
) {
    let triangle = SubmergedTriangle::new(p1, p2, p3, water, time);
    if triangle.area > f32::EPSILON {
        out.push(triangle);
    }
}
