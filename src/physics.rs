// src/physics.rs

use rapier3d::prelude::*;
use std::collections::HashMap;

use crate::ground_contact::sample_ground_percent;
use crate::kart::input::{aggregate, InputSource};
use crate::kart::stats::BASE_STATS;
use crate::kart::{drive_tick, local_speed_fraction, BodyState, Stats, TickInputs, Vec2};

const GROUP_GROUND: Group = Group::from_bits_truncate(0b0001);
const GROUP_CHASSIS: Group = Group::from_bits_truncate(0b0010);

/// Per-kart chassis + wheel layout. Stats ride along so a host can author a
/// whole kart as one blob.
#[derive(Debug, Clone, Copy)]
pub struct KartConfig {
    pub mass: f32,                      // kg
    pub chassis_half_extents: [f32; 3], // [hx, hy, hz] meters
    pub chassis_com_offset: [f32; 3],   // local offset from collider center
    pub wheel_anchors: [[f32; 3]; 4],   // wheel positions in chassis local space
    pub raycast_dist: f32,              // ground probe length below each anchor (m)
    pub stats: Stats,
}

pub const ROADSTER: KartConfig = KartConfig {
    mass: 150.0,                          // kart-class, not car-class
    chassis_half_extents: [0.7, 0.3, 1.0],
    chassis_com_offset: [0.0, -0.2, 0.0], // low COM keeps it flat in corners
    wheel_anchors: [
        [-0.6, -0.25, 0.75],  // FL
        [0.6, -0.25, 0.75],   // FR
        [-0.6, -0.25, -0.75], // RL
        [0.6, -0.25, -0.75],  // RR
    ],
    raycast_dist: 0.3,
    stats: BASE_STATS,
};

/// The network-fed input source for one kart: last axes received from the
/// client, polled by the aggregator every tick.
#[derive(Debug, Default)]
pub struct NetworkInput {
    pub axes: Vec2, // [turn, throttle]
}

impl InputSource for NetworkInput {
    fn poll(&self) -> Vec2 {
        self.axes
    }
}

pub struct Kart {
    pub body: RigidBodyHandle,     // the chassis body
    pub config: KartConfig,        // chassis + wheel layout
    pub stats: Stats,              // finalized tuning (grip/suspension clamped)
    pub anchors: Vec<Point<Real>>, // wheel anchors, chassis local
    pub net_input: NetworkInput,   // fed by net.rs
    pub input: Vec2,               // last aggregated input
    pub ground_percent: f32,       // last sampled grounded fraction
    pub can_move: bool,
}

impl Kart {
    pub fn air_percent(&self) -> f32 {
        1.0 - self.ground_percent
    }

    pub fn set_can_move(&mut self, can_move: bool) {
        self.can_move = can_move;
    }

    /// Signed speed fraction for UI/animation (throttle passthrough while
    /// immobilized).
    pub fn local_speed(&self, bodies: &RigidBodySet) -> f32 {
        let Some(body) = bodies.get(self.body) else {
            return 0.0;
        };
        let forward = body.position().rotation * vector![0.0, 0.0, 1.0];

        local_speed_fraction(
            self.can_move,
            self.input[1],
            v3(*body.linvel()),
            v3(forward),
            &self.stats,
        )
    }
}

#[inline]
fn v3(v: Vector<Real>) -> [f32; 3] {
    [v.x, v.y, v.z]
}

pub struct PhysicsWorld {
    pub gravity: Vector<Real>,
    pub pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub joints: ImpulseJointSet,
    pub multibody_joints: MultibodyJointSet,
    pub ccd: CCDSolver,
    pub query_pipeline: QueryPipeline, // for the wheel raycasts
    pub karts: HashMap<String, Kart>,  // playerId → kart
    pub body_to_player: HashMap<RigidBodyHandle, String>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        let gravity = vector![0.0, -9.81, 0.0];

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        // Static ground slab, top surface exactly at y = 0.
        let ground_rb = RigidBodyBuilder::fixed()
            .translation(vector![0.0, -0.1, 0.0])
            .build();

        let ground_handle = bodies.insert(ground_rb);

        let ground_collider = ColliderBuilder::cuboid(500.0, 0.1, 500.0)
            .collision_groups(InteractionGroups::new(GROUP_GROUND, GROUP_CHASSIS))
            .friction(1.0)
            .restitution(0.0)
            .build();

        colliders.insert_with_parent(ground_collider, ground_handle, &mut bodies);

        println!(
            "🌎 Ground inserted. Bodies = {}, Colliders = {}",
            bodies.len(),
            colliders.len()
        );

        Self {
            gravity,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            karts: HashMap::new(),
            body_to_player: HashMap::new(),
        }
    }

    /// Store the latest normalized axes for a player's kart. Actual motion is
    /// applied in `step`.
    pub fn apply_player_input(&mut self, player_id: &str, turn: f32, throttle: f32) {
        if let Some(kart) = self.karts.get_mut(player_id) {
            kart.net_input.axes = [turn.clamp(-1.0, 1.0), throttle.clamp(-1.0, 1.0)];
        }
    }

    /// Spawn a kart for this player:
    /// - Dynamic rigid body with a box collider (zero collider friction: the
    ///   drive model's grip owns lateral behavior).
    /// - COM offset applied through the collider translation.
    pub fn spawn_kart_for_player(&mut self, id: String, position: [f32; 3]) {
        let config = ROADSTER;
        let [hx, hy, hz] = config.chassis_half_extents;
        let [cx, cy, cz] = config.chassis_com_offset;

        let volume = (2.0 * hx) * (2.0 * hy) * (2.0 * hz);
        let density = config.mass / volume;

        let rb = RigidBodyBuilder::dynamic()
            .translation(vector![position[0], position[1], position[2]])
            .ccd_enabled(true)
            .build();

        let collider = ColliderBuilder::cuboid(hx, hy, hz)
            .translation(vector![cx, cy, cz]) // COM offset
            .collision_groups(InteractionGroups::new(GROUP_CHASSIS, GROUP_GROUND))
            .density(density)
            .friction(0.0)
            .restitution(0.0)
            .build();

        let handle = self.bodies.insert(rb);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self.body_to_player.insert(handle, id.clone());

        let anchors = config
            .wheel_anchors
            .iter()
            .map(|&[x, y, z]| point![x, y, z])
            .collect();

        self.karts.insert(
            id.clone(),
            Kart {
                body: handle,
                config,
                stats: config.stats.finalize(),
                anchors,
                net_input: NetworkInput::default(),
                input: [0.0, 0.0],
                ground_percent: 0.0,
                can_move: true,
            },
        );

        println!(
            "🏎️ Spawned kart for player {} at {:?} (body = {:?})",
            id, position, handle
        );
    }

    /// Remove a player's kart and its body (disconnect path).
    pub fn remove_kart(&mut self, player_id: &str) {
        if let Some(kart) = self.karts.remove(player_id) {
            self.body_to_player.remove(&kart.body);
            self.bodies.remove(
                kart.body,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.joints,
                &mut self.multibody_joints,
                true,
            );
        }
    }

    /// One fixed step: per kart, aggregate input → sample ground → drive tick
    /// → write velocity/angular velocity back, then step the rapier pipeline.
    pub fn step(&mut self, dt: Real) {
        self.query_pipeline.update(&self.colliders);

        for kart in self.karts.values_mut() {
            // ordered sources; a second device would simply go after this one
            kart.input = aggregate(&[&kart.net_input as &dyn InputSource]);

            let Some(body) = self.bodies.get(kart.body) else { continue };

            kart.ground_percent = sample_ground_percent(
                &kart.anchors,
                kart.config.raycast_dist,
                body,
                kart.body,
                &self.query_pipeline,
                &self.bodies,
                &self.colliders,
            );

            if !kart.can_move {
                continue; // coasts under the integrator's own forces only
            }

            let rot = body.position().rotation;
            let state = BodyState {
                velocity: v3(*body.linvel()),
                angular_velocity: v3(*body.angvel()),
                forward: v3(rot * vector![0.0, 0.0, 1.0]),
                up: v3(rot * vector![0.0, 1.0, 0.0]),
            };
            let inputs = TickInputs {
                turn: kart.input[0],
                throttle: kart.input[1],
                ground_percent: kart.ground_percent,
            };

            let out = drive_tick(&kart.stats, inputs, &state, dt);

            let Some(body) = self.bodies.get_mut(kart.body) else { continue };
            let [vx, vy, vz] = out.velocity;
            let [wx, wy, wz] = out.angular_velocity;
            body.set_linvel(vector![vx, vy, vz], true);
            body.set_angvel(vector![wx, wy, wz], true);
        }

        let hooks = ();
        let events = ();

        self.pipeline.step(
            &self.gravity,
            &IntegrationParameters {
                dt,
                ..IntegrationParameters::default()
            },
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            Some(&mut self.query_pipeline),
            &hooks,
            &events,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Settle a spawned kart onto the ground, then drive it: forward speed
    /// must build up and the wheels must report contact.
    #[test]
    fn spawned_kart_drives_forward_under_full_throttle() {
        let mut world = PhysicsWorld::new();
        world.spawn_kart_for_player("p1".into(), [0.0, 0.6, 0.0]);

        let dt = 1.0 / 50.0;

        // let it settle onto the slab
        for _ in 0..100 {
            world.step(dt);
        }

        world.apply_player_input("p1", 0.0, 1.0);
        for _ in 0..50 {
            world.step(dt);
        }

        let kart = world.karts.get("p1").unwrap();
        assert!(kart.ground_percent > 0.0);

        let body = world.bodies.get(kart.body).unwrap();
        let forward = body.position().rotation * vector![0.0, 0.0, 1.0];
        let forward_speed = body.linvel().dot(&forward);
        assert!(
            forward_speed > 1.0,
            "expected forward motion, got {forward_speed}"
        );
    }

    #[test]
    fn immobilized_kart_does_not_drive() {
        let mut world = PhysicsWorld::new();
        world.spawn_kart_for_player("p1".into(), [0.0, 0.6, 0.0]);

        let dt = 1.0 / 50.0;
        for _ in 0..100 {
            world.step(dt);
        }

        world.karts.get_mut("p1").unwrap().set_can_move(false);
        world.apply_player_input("p1", 0.0, 1.0);
        for _ in 0..50 {
            world.step(dt);
        }

        let kart = world.karts.get("p1").unwrap();
        let body = world.bodies.get(kart.body).unwrap();
        let forward = body.position().rotation * vector![0.0, 0.0, 1.0];
        assert!(body.linvel().dot(&forward).abs() < 0.1);

        // speed report falls back to driver intent
        assert_eq!(kart.local_speed(&world.bodies), 1.0);
    }
}
