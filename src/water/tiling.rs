//! Endless water tiling with background surface sampling.
//!
//! One fine tile sits under the tracked body with a ring of eight coarse
//! tiles around it; the whole layout follows the body across the world in
//! steps of the fine tile's vertex spacing, so tile vertices never slide
//! between samples.
//!
//! Vertex heights are display geometry only. They are produced by a single
//! background task per pass and published as one complete
//! [`SurfaceGeometry`] buffer: readers either see the previous pass or the
//! new one, never a half-written set. The buoyancy path does not read these
//! buffers; it samples the height field synchronously inside the physics
//! step.

use std::sync::Arc;

use bevy::math::{Vec2, Vec3};
use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_log::debug;
use futures_lite::future;

use super::field::{HeightField, Water};
use crate::constants::{
    INNER_TILE_RESOLUTION, OUTER_TILE_RESOLUTION, RING_TILE_SEAM_DROP, TILE_WIDTH,
};

/// Marker for the entity the water layout follows.
#[derive(Component, Default)]
pub struct WaterTracked;

/// One water tile: a regular XZ vertex grid around a center offset.
#[derive(Debug, Clone)]
pub struct WaterTile {
    /// Offset of the tile center from the layout anchor
    pub center_offset: Vec3,
    /// Vertex spacing
    pub spacing: f32,
    /// Vertices per side
    pub side: usize,
    /// Vertex positions relative to the tile center, at rest height
    pub local_vertices: Vec<Vec3>,
}

impl WaterTile {
    fn new(center_offset: Vec3, width: f32, spacing: f32) -> Self {
        let side = (width / spacing) as usize + 1;
        let half = width / 2.0;
        let mut local_vertices = Vec::with_capacity(side * side);
        for zi in 0..side {
            for xi in 0..side {
                local_vertices.push(Vec3::new(
                    xi as f32 * spacing - half,
                    0.0,
                    zi as f32 * spacing - half,
                ));
            }
        }
        Self {
            center_offset,
            spacing,
            side,
            local_vertices,
        }
    }

    /// Triangle indices for re-meshing this tile's vertex grid.
    pub fn grid_indices(&self) -> Vec<u32> {
        let side = self.side as u32;
        let mut indices = Vec::with_capacity(((side - 1) * (side - 1) * 6) as usize);
        for zi in 0..side - 1 {
            for xi in 0..side - 1 {
                let i = zi * side + xi;
                indices.extend_from_slice(&[i, i + side, i + side + 1]);
                indices.extend_from_slice(&[i, i + side + 1, i + 1]);
            }
        }
        indices
    }
}

/// The 3×3 endless-water layout around a moving anchor.
#[derive(Resource)]
pub struct TileLayout {
    /// Shared with in-flight sampling tasks
    tiles: Arc<Vec<WaterTile>>,
    /// Grid-snapped world position the layout is centered on
    pub anchor: Vec3,
    /// Anchor step size (the fine tile's vertex spacing)
    pub inner_resolution: f32,
}

impl TileLayout {
    /// Build the layout: a fine center tile and eight coarse ring tiles.
    /// Ring tiles rest slightly lower to hide the resolution seam.
    pub fn new(width: f32, inner_resolution: f32, outer_resolution: f32) -> Self {
        let mut tiles = Vec::with_capacity(9);
        tiles.push(WaterTile::new(Vec3::ZERO, width, inner_resolution));

        for x in -1..=1 {
            for z in -1..=1 {
                if x == 0 && z == 0 {
                    continue;
                }
                let offset = Vec3::new(x as f32 * width, RING_TILE_SEAM_DROP, z as f32 * width);
                tiles.push(WaterTile::new(offset, width, outer_resolution));
            }
        }

        Self {
            tiles: Arc::new(tiles),
            anchor: Vec3::ZERO,
            inner_resolution,
        }
    }

    pub fn tiles(&self) -> &[WaterTile] {
        &self.tiles
    }

    fn shared_tiles(&self) -> Arc<Vec<WaterTile>> {
        Arc::clone(&self.tiles)
    }

    /// Step the anchor toward `target` in inner-resolution increments.
    /// Returns true when the anchor moved.
    pub fn follow(&mut self, target: Vec3) -> bool {
        let x = self.inner_resolution * (target.x / self.inner_resolution).round();
        let z = self.inner_resolution * (target.z / self.inner_resolution).round();
        if self.anchor.x != x || self.anchor.z != z {
            self.anchor = Vec3::new(x, self.anchor.y, z);
            true
        } else {
            false
        }
    }
}

impl Default for TileLayout {
    fn default() -> Self {
        Self::new(TILE_WIDTH, INNER_TILE_RESOLUTION, OUTER_TILE_RESOLUTION)
    }
}

/// A complete surface-height sample set for the whole layout.
///
/// Replaced wholesale by [`publish_surface_samples`]; a set read from this
/// resource is always internally consistent (one anchor, one time).
#[derive(Resource, Debug, Clone, Default)]
pub struct SurfaceGeometry {
    /// Heights per tile, one per tile vertex, in layout order
    pub heights: Vec<Vec<f32>>,
    /// Anchor the pass was sampled around
    pub anchor: Vec3,
    /// Simulation time of the pass
    pub sampled_at: f32,
}

/// The in-flight sampling task, if any. At most one per layout.
#[derive(Resource, Default)]
pub struct SurfaceSampleTask(Option<Task<SurfaceGeometry>>);

/// Keep the layout anchored under the tracked entity.
pub fn follow_tracked_body(
    mut layout: ResMut<TileLayout>,
    tracked: Query<&Transform, With<WaterTracked>>,
) {
    let Ok(transform) = tracked.single() else {
        return;
    };
    if layout.follow(transform.translation) {
        debug!("water layout moved to {:?}", layout.anchor);
    }
}

/// Publish a finished sample pass and start the next one.
///
/// The swap is all-or-nothing: the published resource is replaced with the
/// task's complete buffer in one move. While a pass is still running the
/// previous published set stays visible unchanged.
pub fn publish_surface_samples(
    time: Res<Time>,
    water: Option<Res<Water>>,
    layout: Res<TileLayout>,
    mut geometry: ResMut<SurfaceGeometry>,
    mut task: ResMut<SurfaceSampleTask>,
) {
    let Some(water) = water else {
        return;
    };

    if let Some(running) = task.0.as_mut() {
        match future::block_on(future::poll_once(running)) {
            Some(finished) => {
                *geometry = finished;
                task.0 = None;
            }
            None => return,
        }
    }

    let tiles = layout.shared_tiles();
    let anchor = layout.anchor;
    let sample_time = time.elapsed_secs();
    let field = water.shared_field();

    task.0 = Some(
        AsyncComputeTaskPool::get()
            .spawn(async move { sample_pass(&tiles, anchor, sample_time, field.as_ref()) }),
    );
}

/// Sample every tile vertex for one (anchor, time) snapshot.
fn sample_pass(
    tiles: &[WaterTile],
    anchor: Vec3,
    time: f32,
    field: &dyn HeightField,
) -> SurfaceGeometry {
    let heights = tiles
        .iter()
        .map(|tile| {
            tile.local_vertices
                .iter()
                .map(|vertex| {
                    let world = *vertex + tile.center_offset + anchor;
                    field.height(Vec2::new(world.x, world.z), time)
                })
                .collect()
        })
        .collect();

    SurfaceGeometry {
        heights,
        anchor,
        sampled_at: time,
    }
}

/// Plugin for the endless water surface.
///
/// Requires the [`Water`] resource (inserted by `BuoyancyPlugin`, or
/// manually); until it exists no sampling happens.
pub struct WaterSurfacePlugin;

impl Plugin for WaterSurfacePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceGeometry>()
            .init_resource::<SurfaceSampleTask>()
            .insert_resource(TileLayout::default())
            .add_systems(
                Update,
                (follow_tracked_body, publish_surface_samples).chain(),
            );
    }
}
