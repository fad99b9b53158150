pub const DEFAULT_WATER_LEVEL: f32 = 0.0;
pub const TILE_WIDTH: f32 = 800.0;
pub const INNER_TILE_RESOLUTION: f32 = 5.0;
pub const OUTER_TILE_RESOLUTION: f32 = 25.0;
pub const RING_TILE_SEAM_DROP: f32 = -0.5;
