//! Frame driver
//!
//! Advances one world by a clamped frame delta: locomotion, collection, camera,
//! occlusion, progress glow and ambient motion all run off the same tick.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ambient::{self, COMETS, FireflySwarm, OrbPose, OrbitPose};
use super::camera::{CameraRig, CameraTransform};
use super::layout::{self, Category, LayoutSet, OrbitDescriptor, Placement, presets};
use super::locomotion::{AvatarPose, Intent, LocomotionConfig, LocomotionController};
use super::occlusion::Occluder;
use super::progress::{Feedback, ProgressMapper};
use super::rng::Mulberry32;
use super::state::{Collectible, GameEvent, GamePhase, GameState};
use crate::consts::MAX_FRAME_DT;
use crate::normalize_angle;

/// Which world variant is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldKind {
    #[default]
    Forest,
    Space,
}

impl WorldKind {
    /// Scenery category that hides when it blocks the sightline
    pub fn occluding_category(&self) -> Category {
        match self {
            WorldKind::Forest => Category::Tree,
            WorldKind::Space => Category::AlienPlant,
        }
    }

    pub fn occluder(&self) -> Occluder {
        match self {
            WorldKind::Forest => Occluder::new(1.6),
            WorldKind::Space => Occluder::new(1.8),
        }
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub intent: Intent,
    /// Demo mode: an autopilot steers toward the nearest orb
    pub idle_mode: bool,
}

/// Everything the renderer needs after a frame
#[derive(Debug, Clone)]
pub struct FrameOutput<'a> {
    pub camera: CameraTransform,
    pub pose: AvatarPose,
    pub feedback: Feedback,
    /// One flag per occluding scenery instance, in layout order
    pub visibility: &'a [bool],
    pub orbs: &'a [OrbPose],
    /// Empty outside the space world
    pub asteroids: &'a [OrbitPose],
    pub comets: &'a [OrbitPose],
    pub fireflies: &'a [Vec3],
    /// (opacity, point size)
    pub firefly_material: (f32, f32),
    pub events: Vec<GameEvent>,
}

/// One loaded world and the session running in it
#[derive(Debug, Clone)]
pub struct World {
    pub kind: WorldKind,
    pub state: GameState,
    pub scenery: LayoutSet,
    orbits: Vec<OrbitDescriptor>,
    controller: LocomotionController,
    rig: CameraRig,
    occluder: Occluder,
    progress: ProgressMapper,
    swarm: FireflySwarm,
    occluders: Vec<Vec3>,
    visibility: Vec<bool>,
    orb_spin: Vec<f32>,
    orbs: Vec<OrbPose>,
    asteroids: Vec<OrbitPose>,
    comets: Vec<OrbitPose>,
    fireflies: Vec<Vec3>,
}

impl World {
    /// Build a world. Layouts come from the fixed preset seeds; `ambient_seed`
    /// only affects decoration (fireflies, bob phase).
    pub fn new(kind: WorldKind, firefly_count: usize, ambient_seed: u64) -> Self {
        let coins = layout::generate(presets::COIN_SEED, &presets::coin_field());
        let (scenery, orbits) = match kind {
            WorldKind::Forest => (
                layout::generate(presets::FOREST_SEED, &presets::forest()),
                Vec::new(),
            ),
            WorldKind::Space => {
                let mut rng = Mulberry32::new(presets::SPACE_SEED);
                let scenery = layout::generate_with(&mut rng, &presets::space_garden());
                let orbits = layout::generate_orbits(&mut rng, presets::ASTEROID_COUNT);
                (scenery, orbits)
            }
        };

        let occluders: Vec<Vec3> = scenery
            .of_category(kind.occluding_category())
            .map(|p: &Placement| p.position)
            .collect();

        let mut ambient_rng = Pcg32::seed_from_u64(ambient_seed);
        let bob_phase = ambient_rng.random::<f32>() * TAU;
        let swarm = FireflySwarm::new(firefly_count, &mut ambient_rng);

        let state = GameState::new(Collectible::from_layout(&coins));
        log::info!(
            "{:?} world: {} orbs, {} scenery placements, {} occluders",
            kind,
            state.total_count(),
            scenery.len(),
            occluders.len()
        );

        Self {
            kind,
            orb_spin: vec![0.0; state.total_count()],
            visibility: vec![true; occluders.len()],
            state,
            scenery,
            orbits,
            controller: LocomotionController::new(LocomotionConfig::default(), bob_phase),
            rig: CameraRig::default(),
            occluder: kind.occluder(),
            progress: ProgressMapper::default(),
            swarm,
            occluders,
            orbs: Vec::new(),
            asteroids: Vec::new(),
            comets: Vec::new(),
            fireflies: Vec::new(),
        }
    }

    pub fn controller(&self) -> &LocomotionController {
        &self.controller
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn visibility(&self) -> &[bool] {
        &self.visibility
    }

    pub fn orbits(&self) -> &[OrbitDescriptor] {
        &self.orbits
    }

    pub fn play(&mut self) {
        self.state.play();
        log::info!("session started");
    }

    pub fn begin(&mut self) {
        self.state.begin();
        if self.state.phase == GamePhase::Playing {
            log::info!("intro dismissed, controls enabled");
        }
    }

    /// Advance by `dt` seconds. Non-finite or negative deltas count as 0 and
    /// long frames are capped at [`MAX_FRAME_DT`].
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> FrameOutput<'_> {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.state.elapsed += f64::from(dt);
        let time = self.state.elapsed;
        let enabled = self.state.controls_enabled();

        let intent = if input.idle_mode && enabled {
            self.autopilot()
        } else {
            input.intent
        };
        self.controller.step(intent, enabled, dt);

        // Pickup runs whatever the phase; a locked creature still collects
        // the orb it is hovering over
        let mut events = Vec::new();
        let hits: Vec<u32> = self
            .controller
            .touching(&self.state.coins, |id| self.state.is_collected(id))
            .collect();
        for id in hits {
            if self.state.collect(id) {
                log::debug!("collected orb {id}");
                events.push(GameEvent::Collected { id });
            }
        }
        if self.state.take_completion() {
            log::info!("all {} orbs collected", self.state.total_count());
            events.push(GameEvent::AllCollected);
        }

        let player = self.controller.position();
        let camera = self.rig.update(player, self.controller.heading(), dt);
        self.occluder
            .update(camera.position, player, &self.occluders, &mut self.visibility);

        let feedback = self.progress.update(
            self.state.collected_count(),
            self.state.total_count(),
            dt,
        );

        self.animate(time, dt);

        FrameOutput {
            camera,
            pose: self.controller.pose(),
            feedback,
            visibility: &self.visibility,
            orbs: &self.orbs,
            asteroids: &self.asteroids,
            comets: &self.comets,
            fireflies: &self.fireflies,
            firefly_material: FireflySwarm::material(time),
            events,
        }
    }

    fn animate(&mut self, time: f64, dt: f32) {
        self.orbs.clear();
        for (coin, spin) in self.state.coins.iter().zip(self.orb_spin.iter_mut()) {
            let collected = self.state.is_collected(coin.id);
            *spin += ambient::orb_spin_rate(collected) * dt;
            self.orbs
                .push(ambient::orb_pose(coin, collected, time, *spin));
        }

        self.asteroids.clear();
        self.asteroids
            .extend(self.orbits.iter().map(|o| ambient::asteroid_pose(o, time)));

        self.comets.clear();
        if self.kind == WorldKind::Space {
            self.comets.extend(COMETS.iter().map(|c| c.pose(time)));
        }

        self.swarm.positions(time, &mut self.fireflies);
    }

    /// Uncollected orbs the player can still get to. Procedural orbs may land
    /// outside the movement bound.
    pub fn reachable_remaining(&self) -> usize {
        self.state
            .coins
            .iter()
            .filter(|c| !self.state.is_collected(c.id) && self.controller.can_reach(c.position))
            .count()
    }

    /// Steer toward the nearest reachable uncollected orb
    fn autopilot(&self) -> Intent {
        let player = self.controller.position();
        let nearest = self
            .state
            .coins
            .iter()
            .filter(|c| !self.state.is_collected(c.id) && self.controller.can_reach(c.position))
            .min_by(|a, b| {
                a.position
                    .distance_squared(player)
                    .partial_cmp(&b.position.distance_squared(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some(coin) = nearest else {
            return Intent::IDLE;
        };
        let to_coin = coin.position - player;
        let desired = to_coin.x.atan2(to_coin.z);
        let error = normalize_angle(desired - self.controller.heading());
        Intent {
            move_axis: if error.abs() < 1.2 { 1.0 } else { 0.3 },
            turn_axis: (error * 2.0).clamp(-1.0, 1.0),
            jump: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn playing(kind: WorldKind) -> World {
        let mut w = World::new(kind, 16, 1);
        w.play();
        w.begin();
        w
    }

    fn forward() -> TickInput {
        TickInput {
            intent: Intent {
                move_axis: 1.0,
                ..Intent::IDLE
            },
            idle_mode: false,
        }
    }

    #[test]
    fn test_forest_world_shapes() {
        let mut w = World::new(WorldKind::Forest, 16, 1);
        assert_eq!(w.state.total_count(), 30);
        assert_eq!(w.visibility().len(), 26);
        assert!(w.orbits().is_empty());
        let out = w.frame(&TickInput::default(), DT);
        assert_eq!(out.orbs.len(), 30);
        assert_eq!(out.fireflies.len(), 16);
        assert!(out.comets.is_empty());
    }

    #[test]
    fn test_space_world_shapes() {
        let mut w = World::new(WorldKind::Space, 0, 1);
        assert_eq!(w.visibility().len(), 18);
        assert_eq!(w.orbits().len(), 26);
        let out = w.frame(&TickInput::default(), DT);
        assert_eq!(out.asteroids.len(), 26);
        assert_eq!(out.comets.len(), 3);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut w = playing(WorldKind::Forest);
        w.frame(&forward(), 5.0);
        assert!((w.state.elapsed - f64::from(MAX_FRAME_DT)).abs() < 1e-9);
        w.frame(&forward(), f32::NAN);
        w.frame(&forward(), -1.0);
        assert!((w.state.elapsed - f64::from(MAX_FRAME_DT)).abs() < 1e-9);
    }

    #[test]
    fn test_clock_keeps_ticking_in_long_sessions() {
        let mut w = playing(WorldKind::Space);
        w.state.elapsed = 1.0e6;
        let before: Vec<Vec3> = w.frame(&TickInput::default(), DT).fireflies.to_vec();
        let after: Vec<Vec3> = w.frame(&TickInput::default(), DT).fireflies.to_vec();
        assert!((w.state.elapsed - 1.0e6 - 2.0 * f64::from(DT)).abs() < 1e-6);
        assert_ne!(before, after);
    }

    #[test]
    fn test_intro_still_collects() {
        let mut w = World::new(WorldKind::Forest, 0, 1);
        w.play();
        let coin = w.state.coins[3].position;
        w.state.coins[3].position = Vec3::new(0.0, coin.y, 0.0);

        let mut events = Vec::new();
        for _ in 0..10 {
            events.extend(w.frame(&forward(), DT).events);
        }
        assert_eq!(w.state.phase, GamePhase::Intro);
        assert_eq!(events, vec![GameEvent::Collected { id: 3 }]);
        assert_eq!(w.state.collected_count(), 1);
        assert_eq!(w.controller().position().z, 0.0);
    }

    #[test]
    fn test_intro_locks_controls() {
        let mut w = World::new(WorldKind::Forest, 0, 1);
        w.play();
        for _ in 0..60 {
            w.frame(&forward(), DT);
        }
        assert_eq!(w.controller().position().z, 0.0);

        w.begin();
        for _ in 0..60 {
            w.frame(&forward(), DT);
        }
        assert!(w.controller().position().z > 0.0);
    }

    #[test]
    fn test_walking_the_path_collects_first_orb() {
        let mut w = playing(WorldKind::Forest);
        let backward = TickInput {
            intent: Intent {
                move_axis: -1.0,
                ..Intent::IDLE
            },
            idle_mode: false,
        };
        let mut events = Vec::new();
        for _ in 0..240 {
            events.extend(w.frame(&backward, DT).events);
        }
        assert!(events.contains(&GameEvent::Collected { id: 0 }));
        let count = events
            .iter()
            .filter(|e| **e == GameEvent::Collected { id: 0 })
            .count();
        assert_eq!(count, 1);
        assert!(w.state.is_collected(0));
    }

    #[test]
    fn test_all_collected_fires_once() {
        let mut w = playing(WorldKind::Forest);
        for id in 0..29 {
            w.state.collect(id);
        }
        let coin = w.state.coins[29].position;
        w.state.coins[29].position = Vec3::new(0.0, coin.y, 0.0);

        let first = w.frame(&TickInput::default(), DT).events;
        assert_eq!(
            first,
            vec![GameEvent::Collected { id: 29 }, GameEvent::AllCollected]
        );
        let second = w.frame(&TickInput::default(), DT).events;
        assert!(second.is_empty());
    }

    #[test]
    fn test_collected_orbs_hide() {
        let mut w = playing(WorldKind::Forest);
        w.state.collect(4);
        let out = w.frame(&TickInput::default(), DT);
        assert!(!out.orbs[4].visible);
        assert!(out.orbs[5].visible);
    }

    #[test]
    fn test_autopilot_collects() {
        let mut w = playing(WorldKind::Forest);
        let input = TickInput {
            idle_mode: true,
            ..TickInput::default()
        };
        for _ in 0..60 * 30 {
            w.frame(&input, DT);
        }
        assert!(w.state.collected_count() >= 3);
        assert_eq!(
            w.reachable_remaining() + w.state.collected_count() + 7,
            w.state.total_count()
        );
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut w = playing(WorldKind::Space);
            let mut last = None;
            for i in 0..300 {
                let input = TickInput {
                    intent: Intent {
                        move_axis: 1.0,
                        turn_axis: if i % 90 < 30 { 1.0 } else { 0.0 },
                        jump: false,
                    },
                    idle_mode: false,
                };
                let out = w.frame(&input, DT);
                last = Some((out.camera, out.pose, out.visibility.to_vec()));
            }
            last
        };
        assert_eq!(run(), run());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_progress_tracks_collected(
            ids in proptest::collection::btree_set(0u32..30, 0..30)
        ) {
            let mut w = playing(WorldKind::Forest);
            for id in &ids {
                w.state.collect(*id);
            }
            let mut eased = 0.0;
            for _ in 0..600 {
                eased = w.frame(&TickInput::default(), DT).feedback.eased;
            }
            let ratio = ids.len() as f32 / 30.0;
            prop_assert!((eased - (1.0 - (1.0 - ratio) * (1.0 - ratio))).abs() < 1e-3);
        }
    }
}
