//! Procedural layout generation
//!
//! Placements are produced by rejection sampling over a rectangular extent on
//! the XZ plane, driven by a single [`Mulberry32`] stream. Rules run in order
//! and share the stream, so the rule list is part of the seed contract.
//!
//! Rejection sampling only stops on an explicit attempt cap. Tight spacing plus
//! exclusion zones can make a target count infeasible; the generator then
//! returns fewer placements instead of spinning.

use std::f64::consts::TAU;

use glam::{Vec2, Vec3};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::rng::Mulberry32;

/// Default attempt budget per requested placement
pub const ATTEMPTS_PER_TARGET: u32 = 64;

/// Axis-aligned rectangle on the XZ plane (`y` holds world z)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(min_x: f32, min_z: f32, max_x: f32, max_z: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_z),
            max: Vec2::new(max_x, max_z),
        }
    }

    /// Square centered on the origin
    pub const fn square(half: f32) -> Self {
        Self::new(-half, -half, half, half)
    }

    /// Strict containment (points on the edge are outside)
    #[inline]
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x > self.min.x && x < self.max.x && z > self.min.y && z < self.max.y
    }

    fn sample(&self, rng: &mut Mulberry32) -> (f32, f32) {
        let x = self.min.x as f64 + rng.next_f64() * (self.max.x - self.min.x) as f64;
        let z = self.min.y as f64 + rng.next_f64() * (self.max.y - self.min.y) as f64;
        (x as f32, z as f32)
    }
}

/// Region where procedural placement is disallowed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    pub zone: Rect,
    /// Probability that a candidate inside the zone is rejected. At 1.0 every
    /// candidate inside is rejected without consuming a draw.
    pub reject_chance: f64,
}

impl Exclusion {
    pub const fn hard(zone: Rect) -> Self {
        Self {
            zone,
            reject_chance: 1.0,
        }
    }

    pub const fn soft(zone: Rect, reject_chance: f64) -> Self {
        Self {
            zone,
            reject_chance,
        }
    }

    fn rejects(&self, x: f32, z: f32, rng: &mut Mulberry32) -> bool {
        if !self.zone.contains(x, z) {
            return false;
        }
        self.reject_chance >= 1.0 || rng.next_f64() < self.reject_chance
    }
}

/// How candidates are drawn for a category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sampling {
    /// Draw until `target` accepted or `max_attempts` candidates tried.
    /// A zero `min_spacing` disables the spacing check.
    Rejection { min_spacing: f32, max_attempts: u32 },
    /// One candidate per slot; excluded slots are dropped, never retried
    Scatter,
}

/// Tree species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeVariant {
    Pine,
    Oak,
    Birch,
}

impl TreeVariant {
    fn from_roll(roll: f64) -> Self {
        if roll < 0.45 {
            TreeVariant::Pine
        } else if roll < 0.8 {
            TreeVariant::Oak
        } else {
            TreeVariant::Birch
        }
    }

    /// (min, max) scale for this species
    pub fn scale_range(&self) -> (f64, f64) {
        match self {
            TreeVariant::Pine => (1.8, 2.4),
            TreeVariant::Oak => (1.4, 1.9),
            TreeVariant::Birch => (1.2, 1.6),
        }
    }

    /// Bark and leaf colors (0xRRGGBB)
    pub fn palette(&self) -> (u32, u32) {
        match self {
            TreeVariant::Pine => (0x3a2a1a, 0x1f4f33),
            TreeVariant::Oak => (0x3b2d1f, 0x2a6c36),
            TreeVariant::Birch => (0xd8dfe8, 0x35724b),
        }
    }
}

/// Placement category (what a rule generates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Collectible,
    Tree,
    Shrub,
    Grass,
    AlienPlant,
    Sprout,
}

/// Category plus the attributes derived for it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlacementKind {
    Collectible,
    Tree(TreeVariant),
    Shrub,
    Grass,
    /// `scale` of the placement is the stalk scale
    AlienPlant { hue: f32, bulb_scale: f32 },
    Sprout { hue: f32 },
}

impl PlacementKind {
    pub fn category(&self) -> Category {
        match self {
            PlacementKind::Collectible => Category::Collectible,
            PlacementKind::Tree(_) => Category::Tree,
            PlacementKind::Shrub => Category::Shrub,
            PlacementKind::Grass => Category::Grass,
            PlacementKind::AlienPlant { .. } => Category::AlienPlant,
            PlacementKind::Sprout { .. } => Category::Sprout,
        }
    }
}

/// A generated transform for scenery or collectible geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    /// Yaw in radians
    pub rotation: f32,
    pub scale: f32,
    pub kind: PlacementKind,
}

impl Placement {
    /// Hand-authored collectible
    pub fn collectible(position: Vec3) -> Self {
        Self {
            position,
            rotation: 0.0,
            scale: 1.0,
            kind: PlacementKind::Collectible,
        }
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    #[inline]
    fn xz_distance_sq(&self, x: f32, z: f32) -> f32 {
        let dx = self.position.x - x;
        let dz = self.position.z - z;
        dx * dx + dz * dz
    }
}

/// Generation rule for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub target: u32,
    pub extent: Rect,
    pub exclusion: Option<Exclusion>,
    pub sampling: Sampling,
}

/// Ordered rules plus hand-authored placements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutRules {
    /// Inserted before any procedural draw; procedural placements keep their
    /// spacing against these too
    pub preplaced: Vec<Placement>,
    pub rules: Vec<CategoryRule>,
}

impl LayoutRules {
    /// Default attempt cap for a target count
    pub fn attempts_for(target: u32) -> u32 {
        target.saturating_mul(ATTEMPTS_PER_TARGET)
    }
}

/// Output of [`generate`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSet {
    /// Insertion order: preplaced first, then acceptance order per rule
    pub placements: Vec<Placement>,
}

impl LayoutSet {
    pub fn of_category(&self, category: Category) -> impl Iterator<Item = &Placement> + '_ {
        self.placements
            .iter()
            .filter(move |p| p.category() == category)
    }

    pub fn count(&self, category: Category) -> usize {
        self.of_category(category).count()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Generate a layout. Pure for a fixed seed and rule set.
pub fn generate(seed: u32, rules: &LayoutRules) -> LayoutSet {
    let mut rng = Mulberry32::new(seed);
    generate_with(&mut rng, rules)
}

/// Generate from an existing stream, leaving it positioned after the last draw
pub fn generate_with(rng: &mut Mulberry32, rules: &LayoutRules) -> LayoutSet {
    let mut placements = rules.preplaced.clone();
    for rule in &rules.rules {
        apply_rule(rng, rule, &mut placements);
    }
    LayoutSet { placements }
}

fn apply_rule(rng: &mut Mulberry32, rule: &CategoryRule, placements: &mut Vec<Placement>) {
    let before = placements
        .iter()
        .filter(|p| p.category() == rule.category)
        .count();
    let target = rule.target as usize;
    let mut accepted = 0usize;

    match rule.sampling {
        Sampling::Rejection {
            min_spacing,
            max_attempts,
        } => {
            let min_spacing_sq = min_spacing * min_spacing;
            let mut attempts = 0u32;
            while accepted < target && attempts < max_attempts {
                attempts += 1;
                let (x, z) = rule.extent.sample(rng);
                if rule.exclusion.is_some_and(|e| e.rejects(x, z, rng)) {
                    continue;
                }
                if min_spacing_sq > 0.0
                    && placements.iter().any(|p| {
                        p.category() == rule.category && p.xz_distance_sq(x, z) < min_spacing_sq
                    })
                {
                    continue;
                }
                placements.push(derive(rule.category, x, z, rng));
                accepted += 1;
            }
            if accepted < target {
                warn!(
                    "{:?}: placed {}/{} after {} attempts",
                    rule.category, accepted, target, attempts
                );
            }
        }
        Sampling::Scatter => {
            for _ in 0..target {
                let (x, z) = rule.extent.sample(rng);
                if rule.exclusion.is_some_and(|e| e.rejects(x, z, rng)) {
                    continue;
                }
                placements.push(derive(rule.category, x, z, rng));
                accepted += 1;
            }
        }
    }

    debug!(
        "{:?}: {} procedural + {} preplaced",
        rule.category, accepted, before
    );
}

/// Draw the derived attributes of an accepted candidate
fn derive(category: Category, x: f32, z: f32, rng: &mut Mulberry32) -> Placement {
    let on_ground = |rotation: f64, scale: f64, kind| Placement {
        position: Vec3::new(x, 0.0, z),
        rotation: rotation as f32,
        scale: scale as f32,
        kind,
    };

    match category {
        Category::Collectible => {
            let y = 0.55 + rng.next_f64() * 0.25;
            Placement::collectible(Vec3::new(x, y as f32, z))
        }
        Category::Tree => {
            let variant = TreeVariant::from_roll(rng.next_f64());
            let (min, max) = variant.scale_range();
            let scale = rng.next_range(min, max);
            let rotation = rng.next_f64() * TAU;
            on_ground(rotation, scale, PlacementKind::Tree(variant))
        }
        Category::Shrub => {
            let rotation = rng.next_f64() * TAU;
            let scale = 0.7 + rng.next_f64() * 0.8;
            on_ground(rotation, scale, PlacementKind::Shrub)
        }
        Category::Grass => {
            let rotation = rng.next_f64() * TAU;
            let scale = 0.6 + rng.next_f64() * 0.8;
            on_ground(rotation, scale, PlacementKind::Grass)
        }
        Category::AlienPlant => {
            let hue = 0.55 + rng.next_f64() * 0.18;
            let stalk_scale = 1.5 + rng.next_f64() * 2.4;
            let bulb_scale = 1.0 + rng.next_f64() * 1.6;
            let rotation = rng.next_f64() * TAU;
            on_ground(
                rotation,
                stalk_scale,
                PlacementKind::AlienPlant {
                    hue: hue as f32,
                    bulb_scale: bulb_scale as f32,
                },
            )
        }
        Category::Sprout => {
            let hue = 0.48 + rng.next_f64() * 0.22;
            let rotation = rng.next_f64() * TAU;
            let scale = 0.4 + rng.next_f64() * 1.1;
            on_ground(rotation, scale, PlacementKind::Sprout { hue: hue as f32 })
        }
    }
}

/// Parameters of an asteroid circling the play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitDescriptor {
    pub radius: f32,
    pub offset: f32,
    pub speed: f32,
    pub tilt: f32,
    pub scale: f32,
}

/// Draw `count` asteroid orbits from the stream
pub fn generate_orbits(rng: &mut Mulberry32, count: usize) -> Vec<OrbitDescriptor> {
    (0..count)
        .map(|_| OrbitDescriptor {
            radius: (24.0 + rng.next_f64() * 52.0) as f32,
            offset: (rng.next_f64() * TAU) as f32,
            speed: (0.08 + rng.next_f64() * 0.18) as f32,
            tilt: (rng.next_f64() * std::f64::consts::PI * 0.7) as f32,
            scale: (0.6 + rng.next_f64() * 2.2) as f32,
        })
        .collect()
}

/// Built-in worlds
pub mod presets {
    use super::*;

    pub const COIN_SEED: u32 = 2024;
    pub const FOREST_SEED: u32 = 2025;
    pub const SPACE_SEED: u32 = 2077;

    pub const COIN_TOTAL: u32 = 30;
    pub const COIN_SPACING: f32 = 3.4;
    pub const ASTEROID_COUNT: usize = 26;

    /// Hand-placed orbs leading down the starting corridor
    pub const PATH_COINS: [[f32; 3]; 5] = [
        [0.3, 0.6, -2.5],
        [-0.6, 0.62, 1.5],
        [0.8, 0.58, 4.2],
        [-1.1, 0.64, 7.6],
        [0.4, 0.6, 11.3],
    ];

    /// Orb field: the path plus procedural orbs up to [`COIN_TOTAL`]
    pub fn coin_field() -> LayoutRules {
        let procedural = COIN_TOTAL - PATH_COINS.len() as u32;
        LayoutRules {
            preplaced: PATH_COINS
                .iter()
                .map(|p| Placement::collectible(Vec3::from_array(*p)))
                .collect(),
            rules: vec![CategoryRule {
                category: Category::Collectible,
                target: procedural,
                extent: Rect::new(-24.0, -14.0, 24.0, 30.0),
                exclusion: Some(Exclusion::hard(Rect::new(-1.4, -4.0, 1.4, 16.0))),
                sampling: Sampling::Rejection {
                    min_spacing: COIN_SPACING,
                    max_attempts: LayoutRules::attempts_for(procedural),
                },
            }],
        }
    }

    pub fn forest() -> LayoutRules {
        LayoutRules {
            preplaced: Vec::new(),
            rules: vec![
                CategoryRule {
                    category: Category::Tree,
                    target: 26,
                    extent: Rect::square(110.0),
                    exclusion: Some(Exclusion::hard(Rect::new(-5.0, -10.0, 5.0, 24.0))),
                    sampling: Sampling::Rejection {
                        min_spacing: 6.5,
                        max_attempts: 1600,
                    },
                },
                CategoryRule {
                    category: Category::Shrub,
                    target: 34,
                    extent: Rect::square(100.0),
                    exclusion: Some(Exclusion::hard(Rect::new(-3.0, -9.0, 3.0, 22.0))),
                    sampling: Sampling::Scatter,
                },
                CategoryRule {
                    category: Category::Grass,
                    target: 140,
                    extent: Rect::new(-115.0, -110.0, 115.0, 110.0),
                    exclusion: Some(Exclusion::soft(Rect::new(-3.0, -8.0, 3.0, 20.0), 0.6)),
                    sampling: Sampling::Scatter,
                },
            ],
        }
    }

    pub fn space_garden() -> LayoutRules {
        LayoutRules {
            preplaced: Vec::new(),
            rules: vec![
                CategoryRule {
                    category: Category::AlienPlant,
                    target: 18,
                    extent: Rect::square(130.0),
                    exclusion: Some(Exclusion::hard(Rect::new(-4.0, -12.0, 4.0, 18.0))),
                    sampling: Sampling::Rejection {
                        min_spacing: 7.5,
                        max_attempts: 2000,
                    },
                },
                CategoryRule {
                    category: Category::Sprout,
                    target: 120,
                    extent: Rect::new(-140.0, -130.0, 140.0, 130.0),
                    exclusion: Some(Exclusion::soft(Rect::new(-3.0, -10.0, 3.0, 20.0), 0.7)),
                    sampling: Sampling::Scatter,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::presets::*;
    use super::*;
    use proptest::prelude::*;

    fn min_pairwise_sq(placements: &[&Placement]) -> f32 {
        let mut min = f32::INFINITY;
        for (i, a) in placements.iter().enumerate() {
            for b in &placements[i + 1..] {
                min = min.min(a.xz_distance_sq(b.position.x, b.position.z));
            }
        }
        min
    }

    #[test]
    fn test_coin_field_fills_exactly() {
        let layout = generate(COIN_SEED, &coin_field());
        assert_eq!(layout.len(), COIN_TOTAL as usize);

        // The hand-placed path is denser than the spacing; procedural orbs
        // keep their distance from everything placed before them
        let min_sq = COIN_SPACING * COIN_SPACING;
        for (i, p) in layout.placements.iter().enumerate().skip(PATH_COINS.len()) {
            for earlier in &layout.placements[..i] {
                assert!(earlier.xz_distance_sq(p.position.x, p.position.z) >= min_sq);
            }
        }

        for (p, expected) in layout.placements.iter().zip(PATH_COINS.iter()) {
            assert_eq!(p.position, Vec3::from_array(*expected));
        }
        for p in &layout.placements[PATH_COINS.len()..] {
            assert!(!Rect::new(-1.4, -4.0, 1.4, 16.0).contains(p.position.x, p.position.z));
            assert!((0.55..=0.8).contains(&p.position.y));
            assert!(p.position.x >= -24.0 && p.position.x <= 24.0);
            assert!(p.position.z >= -14.0 && p.position.z <= 30.0);
        }
    }

    #[test]
    fn test_determinism() {
        let a = generate(FOREST_SEED, &forest());
        let b = generate(FOREST_SEED, &forest());
        assert_eq!(a.len(), b.len());
        for (p, q) in a.placements.iter().zip(&b.placements) {
            assert_eq!(p.position.x.to_bits(), q.position.x.to_bits());
            assert_eq!(p.position.z.to_bits(), q.position.z.to_bits());
            assert_eq!(p.rotation.to_bits(), q.rotation.to_bits());
            assert_eq!(p.scale.to_bits(), q.scale.to_bits());
            assert_eq!(p.kind, q.kind);
        }
    }

    #[test]
    fn test_forest_counts() {
        let layout = generate(FOREST_SEED, &forest());
        assert_eq!(layout.count(Category::Tree), 26);
        assert_eq!(layout.count(Category::Shrub), 34);
        assert_eq!(layout.count(Category::Grass), 140);

        for tree in layout.of_category(Category::Tree) {
            let PlacementKind::Tree(variant) = tree.kind else {
                panic!("tree placement with kind {:?}", tree.kind);
            };
            let (min, max) = variant.scale_range();
            assert!(tree.scale >= min as f32 && tree.scale <= max as f32);
            assert_eq!(tree.position.y, 0.0);
        }
    }

    #[test]
    fn test_space_garden_counts() {
        let layout = generate(SPACE_SEED, &space_garden());
        assert_eq!(layout.count(Category::AlienPlant), 18);
        assert_eq!(layout.count(Category::Sprout), 120);

        let plants: Vec<_> = layout.of_category(Category::AlienPlant).collect();
        assert!(min_pairwise_sq(&plants) >= 7.5 * 7.5);
    }

    #[test]
    fn test_attempt_cap_terminates_short() {
        // 100 placements 10 apart cannot fit in a 20x20 square
        let rules = LayoutRules {
            preplaced: Vec::new(),
            rules: vec![CategoryRule {
                category: Category::Tree,
                target: 100,
                extent: Rect::square(10.0),
                exclusion: None,
                sampling: Sampling::Rejection {
                    min_spacing: 10.0,
                    max_attempts: 500,
                },
            }],
        };
        let layout = generate(1, &rules);
        assert!(layout.len() < 100);
        assert!(!layout.is_empty());
    }

    #[test]
    fn test_fully_excluded_extent_yields_nothing() {
        let extent = Rect::square(5.0);
        let rules = LayoutRules {
            preplaced: Vec::new(),
            rules: vec![CategoryRule {
                category: Category::Shrub,
                target: 10,
                extent,
                exclusion: Some(Exclusion::hard(Rect::square(6.0))),
                sampling: Sampling::Rejection {
                    min_spacing: 0.0,
                    max_attempts: 50,
                },
            }],
        };
        assert!(generate(3, &rules).is_empty());
    }

    #[test]
    fn test_spacing_respects_preplaced() {
        let anchor = Placement::collectible(Vec3::new(0.0, 0.6, 0.0));
        let rules = LayoutRules {
            preplaced: vec![anchor],
            rules: vec![CategoryRule {
                category: Category::Collectible,
                target: 20,
                extent: Rect::square(8.0),
                exclusion: None,
                sampling: Sampling::Rejection {
                    min_spacing: 2.0,
                    max_attempts: LayoutRules::attempts_for(20),
                },
            }],
        };
        let layout = generate(11, &rules);
        assert_eq!(layout.placements[0], anchor);
        for p in &layout.placements[1..] {
            assert!(p.xz_distance_sq(0.0, 0.0) >= 4.0);
        }
    }

    #[test]
    fn test_spacing_is_per_category() {
        let rules = LayoutRules {
            preplaced: vec![Placement::collectible(Vec3::ZERO)],
            rules: vec![CategoryRule {
                category: Category::Tree,
                target: 1,
                extent: Rect::new(-0.01, -0.01, 0.01, 0.01),
                exclusion: None,
                sampling: Sampling::Rejection {
                    min_spacing: 5.0,
                    max_attempts: 4,
                },
            }],
        };
        // The orb at the origin does not push trees away
        assert_eq!(generate(8, &rules).count(Category::Tree), 1);
    }

    /// 200 grass slots drawn entirely inside a (possibly soft) exclusion zone
    fn grass_inside_zone(exclusion: Exclusion) -> LayoutRules {
        LayoutRules {
            preplaced: Vec::new(),
            rules: vec![CategoryRule {
                category: Category::Grass,
                target: 200,
                extent: Rect::square(5.0),
                exclusion: Some(exclusion),
                sampling: Sampling::Scatter,
            }],
        }
    }

    #[test]
    fn test_scatter_drops_excluded_slots() {
        let zone = Rect::square(10.0);
        let mut rng = Mulberry32::new(4);
        let layout = generate_with(&mut rng, &grass_inside_zone(Exclusion::hard(zone)));
        assert!(layout.is_empty());

        // Two draws per slot, no retries and no rejection roll
        let mut reference = Mulberry32::new(4);
        for _ in 0..400 {
            reference.next_u32();
        }
        assert_eq!(rng.state(), reference.state());

        let never = generate(4, &grass_inside_zone(Exclusion::soft(zone, 0.0)));
        assert_eq!(never.count(Category::Grass), 200);
    }

    #[test]
    fn test_soft_exclusion_draw_order() {
        let layout = generate(4, &grass_inside_zone(Exclusion::soft(Rect::square(10.0), 0.6)));
        let kept = layout.count(Category::Grass);
        assert!(kept > 0 && kept < 200, "kept {kept}");

        // Per slot: x, z, rejection roll, then rotation and scale when kept
        let mut rng = Mulberry32::new(4);
        let mut expected = Vec::new();
        for _ in 0..200 {
            let x = (-5.0 + rng.next_f64() * 10.0) as f32;
            let z = (-5.0 + rng.next_f64() * 10.0) as f32;
            if rng.next_f64() < 0.6 {
                continue;
            }
            let rotation = (rng.next_f64() * TAU) as f32;
            let scale = (0.6 + rng.next_f64() * 0.8) as f32;
            expected.push((x, z, rotation, scale));
        }
        let actual: Vec<_> = layout
            .placements
            .iter()
            .map(|p| (p.position.x, p.position.z, p.rotation, p.scale))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_orbits_in_range() {
        let mut rng = Mulberry32::new(SPACE_SEED);
        let orbits = generate_orbits(&mut rng, ASTEROID_COUNT);
        assert_eq!(orbits.len(), ASTEROID_COUNT);
        for o in &orbits {
            assert!(o.radius >= 24.0 && o.radius <= 76.0);
            assert!(o.speed >= 0.08 && o.speed <= 0.26);
            assert!(o.scale >= 0.6 && o.scale <= 2.8);
        }
    }

    proptest! {
        #[test]
        fn prop_spacing_and_exclusion_hold(seed in any::<u32>(), spacing in 0.5f32..6.0) {
            let corridor = Rect::new(-2.0, -5.0, 2.0, 15.0);
            let rules = LayoutRules {
                preplaced: Vec::new(),
                rules: vec![CategoryRule {
                    category: Category::Tree,
                    target: 40,
                    extent: Rect::square(30.0),
                    exclusion: Some(Exclusion::hard(corridor)),
                    sampling: Sampling::Rejection {
                        min_spacing: spacing,
                        max_attempts: LayoutRules::attempts_for(40),
                    },
                }],
            };
            let layout = generate(seed, &rules);
            let trees: Vec<_> = layout.placements.iter().collect();
            prop_assert!(trees.len() <= 40);
            prop_assert!(min_pairwise_sq(&trees) >= spacing * spacing);
            for t in &trees {
                prop_assert!(!corridor.contains(t.position.x, t.position.z));
            }
        }

        #[test]
        fn prop_same_seed_same_layout(seed in any::<u32>()) {
            prop_assert_eq!(generate(seed, &coin_field()), generate(seed, &coin_field()));
        }
    }
}
