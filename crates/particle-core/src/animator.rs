//! Per-frame particle morphing.
//!
//! The animator owns two independent particle groups: the gold `accent`
//! group that forms the star and the red `background` group that forms the
//! field around it. Every group carries one precomputed target set per shape
//! it can reach, and each tick blends the live positions a fixed fraction of
//! the way toward the set selected by the current gesture state.

use crate::config::{ConfigError, SceneConfig};
use crate::constants::*;
use crate::gesture::{hand_rotation, Classification, GestureState};
use crate::photos::{Banners, PhotoRing};
use crate::shapes::{ShapeId, ShapeTargetGenerator, ShapeTargetSet, StarSilhouette};
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

/// One convex-combination step from `current` toward `target`.
#[inline]
pub fn blend_toward(current: Vec3, target: Vec3, rate: f32) -> Vec3 {
    current + (target - current) * rate
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupRole {
    Accent,
    Background,
}

impl GroupRole {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupRole::Accent => "accent",
            GroupRole::Background => "background",
        }
    }
}

/// Whole-group transform applied on top of the particle positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupTransform {
    pub rotation_y: f32,
    pub rotation_z: f32,
    pub scale: f32,
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self {
            rotation_y: 0.0,
            rotation_z: 0.0,
            scale: 1.0,
        }
    }
}

impl GroupTransform {
    /// Model matrix: rotate about y, then z, after uniform scaling.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
            * Mat4::from_rotation_z(self.rotation_z)
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

/// Live buffers plus per-shape targets for one particle group.
///
/// Buffer lengths are fixed at construction; only values change afterwards.
#[derive(Clone, Debug)]
pub struct ParticleGroup {
    role: GroupRole,
    positions: Vec<Vec3>,
    colors: Vec<[f32; 3]>,
    sizes: Vec<f32>,
    phases: Vec<f32>,
    base_size: f32,
    flag_shape: ShapeId,
    active_shape: ShapeId,
    targets: FnvHashMap<ShapeId, ShapeTargetSet>,
    transform: GroupTransform,
}

impl ParticleGroup {
    #[allow(clippy::too_many_arguments)]
    fn new<R: Rng + ?Sized>(
        role: GroupRole,
        count: usize,
        base_size: f32,
        tint: [f32; 3],
        flag_shape: ShapeId,
        generator: &ShapeTargetGenerator,
        scatter_extent: f32,
        rng: &mut R,
    ) -> Self {
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    (rng.gen::<f32>() - 0.5) * scatter_extent,
                    (rng.gen::<f32>() - 0.5) * scatter_extent,
                    (rng.gen::<f32>() - 0.5) * scatter_extent,
                )
            })
            .collect::<Vec<_>>();
        let phases = (0..count).map(|_| rng.gen::<f32>() * TAU).collect();

        let mut targets = FnvHashMap::default();
        for shape in [flag_shape, ShapeId::Heart, ShapeId::SphereExplode] {
            targets.insert(shape, generator.generate(shape, count, tint, rng));
        }
        let colors = targets[&flag_shape].colors.clone();

        log::debug!(
            "[scene] {} group: {} particles, flag shape {:?}",
            role.as_str(),
            count,
            flag_shape
        );
        Self {
            role,
            positions,
            colors,
            sizes: vec![base_size; count],
            phases,
            base_size,
            flag_shape,
            active_shape: flag_shape,
            targets,
            transform: GroupTransform::default(),
        }
    }

    pub fn role(&self) -> GroupRole {
        self.role
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn phases(&self) -> &[f32] {
        &self.phases
    }

    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    pub fn transform(&self) -> GroupTransform {
        self.transform
    }

    pub fn active_shape(&self) -> ShapeId {
        self.active_shape
    }

    /// Target set for `shape`, if this group can reach it.
    pub fn targets(&self, shape: ShapeId) -> Option<&ShapeTargetSet> {
        self.targets.get(&shape)
    }

    /// Shape this group forms in `state`.
    pub fn shape_for(&self, state: GestureState) -> ShapeId {
        match state {
            GestureState::Flag | GestureState::None => self.flag_shape,
            GestureState::Heart => ShapeId::Heart,
            GestureState::Explode | GestureState::Photo => ShapeId::SphereExplode,
        }
    }

    fn retarget(&mut self, state: GestureState) {
        let shape = self.shape_for(state);
        if shape == self.active_shape {
            return;
        }
        let set = &self.targets[&shape];
        debug_assert_eq!(set.len(), self.positions.len());
        self.colors.copy_from_slice(&set.colors);
        self.active_shape = shape;
    }

    fn blend(&mut self, rate: f32) {
        let targets = &self.targets[&self.active_shape].positions;
        debug_assert_eq!(targets.len(), self.positions.len());
        for (p, t) in self.positions.iter_mut().zip(targets) {
            *p = blend_toward(*p, *t, rate);
        }
    }

    fn animate(&mut self, state: GestureState, time: f32, hand_rot_y: f32) {
        let tr = &mut self.transform;
        match state {
            GestureState::Flag | GestureState::None => {
                tr.rotation_y = 0.0;
                tr.scale = 1.0;
                for (size, phase) in self.sizes.iter_mut().zip(&self.phases) {
                    *size = self.base_size * (0.8 + 0.4 * (time * SHIMMER_SPEED + phase).sin());
                }
                tr.rotation_z = time.sin() * FLAG_SWAY_AMPLITUDE;
            }
            GestureState::Heart => {
                tr.scale = 1.0 + (time * HEART_BEAT_SPEED).sin().abs() * HEART_BEAT_AMPLITUDE;
                tr.rotation_y = 0.0;
            }
            GestureState::Explode | GestureState::Photo => {
                tr.scale = 1.0;
                tr.rotation_y += (hand_rot_y - tr.rotation_y) * ROTATION_FOLLOW_RATE;
                tr.rotation_z = 0.0;
            }
        }
    }
}

/// Owns the particle groups, photo ring and banners, and advances them once
/// per render tick.
#[derive(Clone, Debug)]
pub struct SceneAnimator {
    config: SceneConfig,
    accent: ParticleGroup,
    background: ParticleGroup,
    state: GestureState,
    hand_x: f32,
    photos: PhotoRing,
    banners: Banners,
}

impl SceneAnimator {
    /// Validate `config` and generate every group's target sets from `seed`.
    pub fn new(config: SceneConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let generator = ShapeTargetGenerator::new(
            StarSilhouette::new(config.star_radii),
            config.rectangle_size,
            config.heart_scale,
            config.heart_offset_y,
            config.explode_max_radius,
        );
        let accent = ParticleGroup::new(
            GroupRole::Accent,
            config.group_sizes.accent,
            config.accent_point_size,
            config.accent_color,
            ShapeId::Star,
            &generator,
            config.scatter_extent,
            &mut rng,
        );
        let background = ParticleGroup::new(
            GroupRole::Background,
            config.group_sizes.background,
            config.background_point_size,
            config.background_color,
            ShapeId::Rectangle,
            &generator,
            config.scatter_extent,
            &mut rng,
        );
        let photos = PhotoRing::new(config.photo_count, config.orbit_radius);
        log::info!(
            "[scene] mounted: accent={} background={} photos={}",
            accent.len(),
            background.len(),
            config.photo_count
        );
        Ok(Self {
            config,
            accent,
            background,
            state: GestureState::Flag,
            hand_x: DEFAULT_HAND_X,
            photos,
            banners: Banners::default(),
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn hand_x(&self) -> f32 {
        self.hand_x
    }

    pub fn accent(&self) -> &ParticleGroup {
        &self.accent
    }

    pub fn background(&self) -> &ParticleGroup {
        &self.background
    }

    pub fn groups(&self) -> [&ParticleGroup; 2] {
        [&self.accent, &self.background]
    }

    pub fn photos(&self) -> &PhotoRing {
        &self.photos
    }

    pub fn banners(&self) -> &Banners {
        &self.banners
    }

    /// Switch to `state`; groups start heading for the new targets on the next tick.
    pub fn set_state(&mut self, state: GestureState) {
        if state == self.state {
            return;
        }
        log::info!("[scene] {} -> {}", self.state.as_str(), state.as_str());
        self.state = state;
        self.accent.retarget(state);
        self.background.retarget(state);
    }

    /// Apply a classifier result: update the state and, if reported, the hand position.
    /// A non-finite hand position is dropped so the previous one stays in effect.
    pub fn apply(&mut self, c: Classification) {
        if let Some(x) = c.hand_x.filter(|x| x.is_finite()) {
            self.hand_x = x;
        }
        self.set_state(c.state);
    }

    /// Advance one frame. `time` is elapsed wall-clock seconds since mount.
    pub fn tick(&mut self, time: f32) {
        let rate = self.config.blend_rate;
        let hand_rot_y = hand_rotation(self.hand_x, HAND_ROTATION_GAIN);
        for group in [&mut self.accent, &mut self.background] {
            group.blend(rate);
            group.animate(self.state, time, hand_rot_y);
        }
        self.photos
            .update(self.state, self.accent.transform.rotation_y, time);
        self.banners.update(self.state, time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> SceneAnimator {
        SceneAnimator::new(SceneConfig::default().with_group_sizes(50, 80), 7).expect("valid")
    }

    #[test]
    fn blend_is_a_convex_step() {
        let p = blend_toward(Vec3::ZERO, Vec3::new(10.0, -10.0, 0.0), 0.25);
        assert_eq!(p, Vec3::new(2.5, -2.5, 0.0));
    }

    #[test]
    fn groups_have_every_reachable_target() {
        let a = small();
        for g in a.groups() {
            for s in GestureState::ALL {
                let set = g.targets(g.shape_for(s)).expect("target set");
                assert_eq!(set.len(), g.len());
                assert_eq!(set.colors.len(), g.len());
            }
        }
        assert_eq!(a.accent().shape_for(GestureState::Flag), ShapeId::Star);
        assert_eq!(
            a.background().shape_for(GestureState::None),
            ShapeId::Rectangle
        );
    }

    #[test]
    fn retarget_rewrites_colors_in_place() {
        let mut a = small();
        a.set_state(GestureState::Explode);
        let g = a.background();
        assert_eq!(g.active_shape(), ShapeId::SphereExplode);
        assert_eq!(g.colors(), &g.targets(ShapeId::SphereExplode).unwrap().colors[..]);
    }

    #[test]
    fn flag_shimmer_stays_in_band() {
        let mut a = small();
        a.tick(1.234);
        for g in a.groups() {
            for s in g.sizes() {
                assert!(*s >= g.base_size() * 0.8 - 1e-4 && *s <= g.base_size() * 1.2 + 1e-4);
            }
        }
    }

    #[test]
    fn explode_rotation_follows_hand() {
        let mut a = small();
        a.apply(Classification {
            state: GestureState::Explode,
            hand_x: Some(1.0),
        });
        for i in 0..200 {
            a.tick(i as f32 / 60.0);
        }
        let expected = hand_rotation(1.0, HAND_ROTATION_GAIN);
        assert!((a.accent().transform().rotation_y - expected).abs() < 1e-3);
        // hand_x survives a heart frame that carries no position
        a.apply(Classification {
            state: GestureState::Heart,
            hand_x: None,
        });
        assert_eq!(a.hand_x(), 1.0);
    }

    #[test]
    fn heart_beat_scales_group() {
        let mut a = small();
        a.set_state(GestureState::Heart);
        a.tick(0.5);
        let s = a.accent().transform().scale;
        let expected = 1.0 + (0.5f32 * HEART_BEAT_SPEED).sin().abs() * HEART_BEAT_AMPLITUDE;
        assert!((s - expected).abs() < 1e-6);
    }
}
