//! Rapier integration for floating bodies.
//!
//! Two chained FixedUpdate systems drive every [`FloatingBody`]: the first
//! rebuilds the submerged hull from the body's current transform, the second
//! folds one buoyancy force per submerged triangle into the body's
//! `ExternalForce`, each applied at its triangle's centroid so the body also
//! receives the correct torque. Both run synchronously inside the physics
//! step; forces are always consistent with the transform of the step that
//! produced them.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use log::debug;

use crate::buoyancy::{hydrostatic_forces, HullMesh, SubmergedMesh};
use crate::constants::DEFAULT_WATER_LEVEL;
use crate::water::{Water, WaveField, WavePreset};

/// Physics constants for buoyancy.
pub mod constants {
    /// Density of ocean water (kg/m³)
    pub const WATER_DENSITY: f32 = 1027.0;
    /// Vertical gravity component (m/s²) - negative for downward
    pub const GRAVITY_Y: f32 = -9.81;
}

/// Runtime buoyancy configuration resource.
#[derive(Resource, Clone, Debug, Reflect)]
#[reflect(Resource)]
pub struct BuoyancyConfig {
    /// Fluid density (kg/m³)
    pub fluid_density: f32,
    /// Signed vertical gravity component (m/s²)
    pub gravity_y: f32,
    /// Master switch for the buoyancy systems
    pub enabled: bool,
}

impl Default for BuoyancyConfig {
    fn default() -> Self {
        Self {
            fluid_density: constants::WATER_DENSITY,
            gravity_y: constants::GRAVITY_Y,
            enabled: true,
        }
    }
}

/// Component marking an entity as a floating rigid body.
///
/// Owns the per-frame clipper state for the entity's hull mesh.
#[derive(Component)]
pub struct FloatingBody {
    /// Clipper state; rebuilt every physics step
    pub submerged: SubmergedMesh,
    /// Per-body fluid density override (kg/m³); falls back to the config
    pub fluid_density: Option<f32>,
}

impl FloatingBody {
    pub fn new(hull: HullMesh) -> Self {
        Self {
            submerged: SubmergedMesh::new(hull),
            fluid_density: None,
        }
    }

    pub fn with_fluid_density(mut self, density: f32) -> Self {
        self.fluid_density = Some(density);
        self
    }
}

/// Bundle for spawning a buoyant dynamic rigid body.
#[derive(Bundle)]
pub struct FloatingBodyBundle {
    pub body: RigidBody,
    pub collider: Collider,
    pub external_force: ExternalForce,
    pub mass_properties: ReadMassProperties,
    pub floating: FloatingBody,
}

impl FloatingBodyBundle {
    /// Create a floating body from its hull mesh and a collider.
    ///
    /// The collider is used by rapier for contacts and mass properties; the
    /// hull mesh is what gets clipped against the water.
    pub fn new(hull: HullMesh, collider: Collider) -> Self {
        Self {
            body: RigidBody::Dynamic,
            collider,
            external_force: ExternalForce::default(),
            mass_properties: ReadMassProperties::default(),
            floating: FloatingBody::new(hull),
        }
    }
}

/// Rebuild every floating body's submerged hull for the current step.
pub fn update_submerged_meshes(
    time: Res<Time<Fixed>>,
    water: Res<Water>,
    config: Res<BuoyancyConfig>,
    mut bodies: Query<(&Transform, &mut FloatingBody)>,
) {
    if !config.enabled {
        return;
    }

    let elapsed = time.elapsed_secs();
    for (transform, mut body) in bodies.iter_mut() {
        body.submerged.rebuild(transform, water.field(), elapsed);
    }
}

/// Apply each submerged triangle's buoyancy at its centroid.
///
/// The body's `ExternalForce` is overwritten every step; buoyancy owns that
/// component on floating bodies.
pub fn apply_buoyancy_forces(
    config: Res<BuoyancyConfig>,
    mut bodies: Query<(
        &Transform,
        &FloatingBody,
        &ReadMassProperties,
        &mut ExternalForce,
    )>,
) {
    if !config.enabled {
        return;
    }

    for (transform, body, mass_properties, mut external_force) in bodies.iter_mut() {
        let density = body.fluid_density.unwrap_or(config.fluid_density);
        let center_of_mass = transform.transform_point(mass_properties.get().local_center_of_mass);

        let mut total = ExternalForce::default();
        for pair in hydrostatic_forces(body.submerged.triangles(), density, config.gravity_y) {
            let contribution = ExternalForce::at_point(pair.force, pair.point, center_of_mass);
            total.force += contribution.force;
            total.torque += contribution.torque;
        }

        *external_force = total;
    }
}

/// Plugin that drives buoyancy for all floating bodies.
///
/// The water surface is injected here, once, and reaches every system
/// through the [`Water`] resource; nothing looks the surface up globally.
pub struct BuoyancyPlugin {
    water: Water,
}

impl BuoyancyPlugin {
    /// Use the given surface for the whole simulation.
    pub fn with_water(water: Water) -> Self {
        Self { water }
    }
}

impl Default for BuoyancyPlugin {
    fn default() -> Self {
        Self {
            water: Water::new(WaveField::new(
                WavePreset::Ocean.to_config(DEFAULT_WATER_LEVEL),
            )),
        }
    }
}

impl Plugin for BuoyancyPlugin {
    fn build(&self, app: &mut App) {
        debug!("installing buoyancy systems");
        app.insert_resource(self.water.clone())
            .insert_resource(BuoyancyConfig::default())
            .register_type::<BuoyancyConfig>()
            .add_systems(
                FixedUpdate,
                (update_submerged_meshes, apply_buoyancy_forces).chain(),
            );
    }
}
