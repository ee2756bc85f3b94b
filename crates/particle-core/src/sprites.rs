//! GPU-ready sprite instances shared by the web and native renderers.

use crate::animator::SceneAnimator;
use crate::constants::{CAMERA_FOVY_DEG, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR, PHOTO_PANEL_COLORS};
use crate::constants::{PHOTO_PLANE_SIZE, PHOTO_SOURCES, POINT_WORLD_SCALE};
use glam::{Mat4, Vec3};

pub const SPRITE_GLOW: f32 = 0.0;
pub const SPRITE_PANEL: f32 = 1.0;

/// One camera-facing quad. Layout matches `POINTS_WGSL` instance attributes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub pos: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
    pub kind: f32,
    /// Photo texture layer for panels; unused by glow sprites.
    pub layer: f32,
    pub _pad: [f32; 2],
}

/// Per-frame camera uniforms. Layout matches `POINTS_WGSL`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub cam_right: [f32; 4],
    pub cam_up: [f32; 4],
}

impl SceneUniforms {
    /// Fixed camera on +z looking at the origin.
    pub fn for_aspect(aspect: f32) -> Self {
        let proj = Mat4::perspective_rh(
            CAMERA_FOVY_DEG.to_radians(),
            aspect.max(1e-3),
            CAMERA_ZNEAR,
            CAMERA_ZFAR,
        );
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, CAMERA_Z), Vec3::ZERO, Vec3::Y);
        Self {
            view_proj: (proj * view).to_cols_array_2d(),
            cam_right: [1.0, 0.0, 0.0, 0.0],
            cam_up: [0.0, 1.0, 0.0, 0.0],
        }
    }
}

/// Texture array layers a renderer needs for the photo panels: one per plane.
pub fn photo_layer_count(animator: &SceneAnimator) -> u32 {
    animator.photos().planes().len().max(1) as u32
}

/// Source image for photo layer `layer`; sources repeat when there are more planes than images.
pub fn photo_source(layer: usize) -> &'static str {
    PHOTO_SOURCES[layer % PHOTO_SOURCES.len()]
}

/// Upper bound on sprites a scene emits, for sizing instance buffers.
pub fn sprite_capacity(animator: &SceneAnimator) -> usize {
    animator.groups().iter().map(|g| g.len()).sum::<usize>() + animator.photos().planes().len()
}

impl SceneAnimator {
    /// Append this frame's sprites to `out` (cleared first): every particle of
    /// every group in world space, then the visible photo panels.
    pub fn write_sprites(&self, out: &mut Vec<SpriteInstance>) {
        out.clear();
        for group in self.groups() {
            let tr = group.transform();
            let model = tr.matrix();
            let size_scale = POINT_WORLD_SCALE * tr.scale;
            for ((p, c), s) in group
                .positions()
                .iter()
                .zip(group.colors())
                .zip(group.sizes())
            {
                out.push(SpriteInstance {
                    pos: model.transform_point3(*p).to_array(),
                    size: s * size_scale,
                    color: [c[0], c[1], c[2], 1.0],
                    kind: SPRITE_GLOW,
                    layer: 0.0,
                    _pad: [0.0; 2],
                });
            }
        }
        for (i, plane) in self.photos().planes().iter().enumerate() {
            if !plane.visible || plane.scale <= 1e-3 {
                continue;
            }
            let c = PHOTO_PANEL_COLORS[i % PHOTO_PANEL_COLORS.len()];
            out.push(SpriteInstance {
                pos: plane.position.to_array(),
                size: PHOTO_PLANE_SIZE * plane.scale,
                color: [c[0], c[1], c[2], 1.0],
                kind: SPRITE_PANEL,
                layer: i as f32,
                _pad: [0.0; 2],
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::gesture::GestureState;

    #[test]
    fn sprite_layout_is_48_bytes() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 48);
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 96);
    }

    #[test]
    fn flag_frame_emits_one_sprite_per_particle() {
        let mut a = SceneAnimator::new(SceneConfig::default().with_group_sizes(30, 40), 3)
            .expect("valid");
        a.tick(0.0);
        let mut out = Vec::new();
        a.write_sprites(&mut out);
        assert_eq!(out.len(), 70);
        assert!(out.len() <= sprite_capacity(&a));
        assert!(out.iter().all(|s| s.kind == SPRITE_GLOW && s.size > 0.0));
    }

    #[test]
    fn panels_carry_their_plane_as_texture_layer() {
        let mut a = SceneAnimator::new(SceneConfig::default().with_group_sizes(10, 10), 5)
            .expect("valid");
        a.set_state(GestureState::Explode);
        for i in 0..20 {
            a.tick(i as f32 / 60.0);
        }
        let mut out = Vec::new();
        a.write_sprites(&mut out);
        let layers: Vec<f32> = out
            .iter()
            .filter(|s| s.kind == SPRITE_PANEL)
            .map(|s| s.layer)
            .collect();
        assert_eq!(layers, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(photo_layer_count(&a), 5);
        assert_eq!(photo_source(6), "/image2.jpeg");
    }
}
