//! Photo planes that orbit the exploded cloud and fly to the front on a pinch.

use crate::constants::*;
use crate::gesture::GestureState;
use glam::Vec3;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoPlane {
    pub position: Vec3,
    pub scale: f32,
    pub visible: bool,
}

impl Default for PhotoPlane {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 0.0,
            visible: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PhotoRing {
    planes: Vec<PhotoPlane>,
    orbit_radius: f32,
    focused: usize,
}

impl PhotoRing {
    pub fn new(count: usize, orbit_radius: f32) -> Self {
        debug_assert!(count > 0);
        Self {
            planes: vec![PhotoPlane::default(); count],
            orbit_radius,
            focused: 0,
        }
    }

    pub fn planes(&self) -> &[PhotoPlane] {
        &self.planes
    }

    /// Index of the plane nearest the camera during the last orbit update.
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Advance one frame. `base_angle` is the particle groups' y rotation so
    /// the ring turns with the cloud.
    pub fn update(&mut self, state: GestureState, base_angle: f32, time: f32) {
        match state {
            GestureState::Flag | GestureState::None => {
                for p in &mut self.planes {
                    p.scale = lerp(p.scale, 0.0, PHOTO_LERP_RATE);
                    p.visible = false;
                }
            }
            GestureState::Heart => {
                for p in &mut self.planes {
                    p.visible = false;
                }
            }
            GestureState::Explode => self.orbit(base_angle, time),
            GestureState::Photo => {
                let focus_pos = Vec3::new(0.0, 0.0, PHOTO_FOCUS_Z);
                for (i, p) in self.planes.iter_mut().enumerate() {
                    if i == self.focused {
                        p.visible = true;
                        p.position = p.position.lerp(focus_pos, PHOTO_LERP_RATE);
                        p.scale = lerp(p.scale, PHOTO_FOCUS_SCALE, PHOTO_LERP_RATE);
                    } else {
                        p.scale = lerp(p.scale, 0.0, PHOTO_LERP_RATE);
                    }
                }
            }
        }
    }

    fn orbit(&mut self, base_angle: f32, time: f32) {
        let step = TAU / self.planes.len() as f32;
        let r = self.orbit_radius;
        let mut best = 0usize;
        let mut best_z = f32::NEG_INFINITY;
        for (i, p) in self.planes.iter_mut().enumerate() {
            p.visible = true;
            let angle = base_angle + i as f32 * step;
            let target = Vec3::new(
                angle.sin() * r,
                (time + i as f32).sin() * PHOTO_BOB_AMPLITUDE,
                angle.cos() * r,
            );
            p.position = p.position.lerp(target, PHOTO_LERP_RATE);
            if target.z > best_z {
                best_z = target.z;
                best = i;
            }
            let goal = if target.z > PHOTO_FRONT_Z {
                1.0 + (target.z / r) * PHOTO_FRONT_GROWTH
            } else {
                PHOTO_BACK_SCALE
            };
            p.scale = lerp(p.scale, goal, PHOTO_LERP_RATE);
        }
        self.focused = best;
    }
}

/// A text plane that is shown in one state and pulses or settles there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Banner {
    pub position: Vec3,
    pub scale: f32,
    pub visible: bool,
}

/// The "VIET NAM" title above the flag and the heart-mode love banner.
#[derive(Clone, Copy, Debug)]
pub struct Banners {
    pub title: Banner,
    pub love: Banner,
}

impl Default for Banners {
    fn default() -> Self {
        Self {
            title: Banner {
                position: Vec3::new(0.0, TITLE_Y, 0.0),
                scale: 1.0,
                visible: true,
            },
            love: Banner {
                position: Vec3::new(0.0, 0.0, LOVE_BANNER_Z),
                scale: 1.0,
                visible: false,
            },
        }
    }
}

impl Banners {
    pub fn update(&mut self, state: GestureState, time: f32) {
        let state = state.resolved();
        self.title.visible = state == GestureState::Flag;
        self.love.visible = state == GestureState::Heart;
        match state {
            GestureState::Flag => {
                self.title.scale = lerp(self.title.scale, 1.0, BANNER_LERP_RATE);
            }
            GestureState::Heart => {
                self.love.scale =
                    1.0 + (time * HEART_BEAT_SPEED).sin().abs() * LOVE_BEAT_AMPLITUDE;
            }
            _ => {}
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
