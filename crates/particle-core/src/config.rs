//! Scene configuration.
//!
//! A `SceneConfig` is built once when the scene mounts (usually from
//! `Default`, optionally tweaked by the frontend) and validated before any
//! geometry is generated. It is never mutated afterwards.

use crate::constants::*;
use crate::shapes::StarSilhouette;
use thiserror::Error;

/// Particle counts for the two independent groups.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupSizes {
    pub accent: usize,
    pub background: usize,
}

/// Circumscribed (`outer`) and inscribed (`inner`) radius of the star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarRadii {
    pub outer: f32,
    pub inner: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangleSize {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

/// Distances in normalized landmark space used by the gesture classifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureThresholds {
    pub heart_index: f32,
    pub heart_thumb: f32,
    pub fist_openness: f32,
    pub pinch: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            heart_index: HEART_INDEX_THRESHOLD,
            heart_thumb: HEART_THUMB_THRESHOLD,
            fist_openness: FIST_OPENNESS_THRESHOLD,
            pinch: PINCH_THRESHOLD,
        }
    }
}

/// Immutable scene configuration.
///
/// Fields:
/// - `group_sizes`: particle counts for the accent (star) and background (field) groups
/// - `blend_rate`: per-frame convex blend factor toward the active targets, in (0, 1]
/// - `star_radii`, `rectangle_size`: flag geometry
/// - `heart_scale`, `heart_offset_y`: heart curve scale and vertical shift
/// - `explode_max_radius`: radius of the explosion sphere
/// - `orbit_radius`, `photo_count`: photo ring layout
/// - `scatter_extent`: edge of the cube particles are scattered in at mount
/// - `thresholds`: gesture classifier thresholds
/// - `stable_samples`: samples a new gesture must persist before it is applied (1 = immediate)
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub group_sizes: GroupSizes,
    pub blend_rate: f32,
    pub star_radii: StarRadii,
    pub rectangle_size: RectangleSize,
    pub heart_scale: f32,
    pub heart_offset_y: f32,
    pub explode_max_radius: f32,
    pub orbit_radius: f32,
    pub photo_count: usize,
    pub scatter_extent: f32,
    pub accent_point_size: f32,
    pub background_point_size: f32,
    pub accent_color: [f32; 3],
    pub background_color: [f32; 3],
    pub thresholds: GestureThresholds,
    pub stable_samples: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            group_sizes: GroupSizes {
                accent: ACCENT_COUNT,
                background: BACKGROUND_COUNT,
            },
            blend_rate: BLEND_RATE,
            star_radii: StarRadii {
                outer: STAR_OUTER_RADIUS,
                inner: STAR_OUTER_RADIUS * STAR_INNER_RATIO,
            },
            rectangle_size: RectangleSize {
                width: FLAG_WIDTH,
                height: FLAG_HEIGHT,
                depth: FLAG_DEPTH,
            },
            heart_scale: HEART_SCALE,
            heart_offset_y: HEART_OFFSET_Y,
            explode_max_radius: EXPLODE_MAX_RADIUS,
            orbit_radius: PHOTO_ORBIT_RADIUS,
            photo_count: PHOTO_COUNT,
            scatter_extent: SCATTER_EXTENT,
            accent_point_size: ACCENT_POINT_SIZE,
            background_point_size: BACKGROUND_POINT_SIZE,
            accent_color: ACCENT_COLOR,
            background_color: BACKGROUND_COLOR,
            thresholds: GestureThresholds::default(),
            stable_samples: 1,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{group} group must contain at least one particle")]
    EmptyGroup { group: &'static str },
    #[error("blend rate {0} must be in (0, 1]")]
    BlendRate(f32),
    #[error("star radii must satisfy outer > inner > 0 (outer={outer}, inner={inner})")]
    StarRadii { outer: f32, inner: f32 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("photo ring needs at least one plane")]
    NoPhotos,
    #[error("a {width}x{height} rectangle lies entirely inside the star")]
    RectangleCovered { width: f32, height: f32 },
}

impl SceneConfig {
    /// Override both group sizes, keeping everything else.
    pub fn with_group_sizes(mut self, accent: usize, background: usize) -> Self {
        self.group_sizes = GroupSizes { accent, background };
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_sizes.accent == 0 {
            return Err(ConfigError::EmptyGroup { group: "accent" });
        }
        if self.group_sizes.background == 0 {
            return Err(ConfigError::EmptyGroup { group: "background" });
        }
        if !(self.blend_rate > 0.0 && self.blend_rate <= 1.0) {
            return Err(ConfigError::BlendRate(self.blend_rate));
        }
        let StarRadii { outer, inner } = self.star_radii;
        if !(inner > 0.0 && outer > inner) {
            return Err(ConfigError::StarRadii { outer, inner });
        }
        if self.photo_count == 0 {
            return Err(ConfigError::NoPhotos);
        }
        let t = &self.thresholds;
        let positive = [
            ("rectangle width", self.rectangle_size.width),
            ("rectangle height", self.rectangle_size.height),
            ("rectangle depth", self.rectangle_size.depth),
            ("heart scale", self.heart_scale),
            ("explode radius", self.explode_max_radius),
            ("orbit radius", self.orbit_radius),
            ("scatter extent", self.scatter_extent),
            ("accent point size", self.accent_point_size),
            ("background point size", self.background_point_size),
            ("heart index threshold", t.heart_index),
            ("heart thumb threshold", t.heart_thumb),
            ("fist openness threshold", t.fist_openness),
            ("pinch threshold", t.pinch),
        ];
        for (field, value) in positive {
            // NaN fails this comparison too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        let RectangleSize { width, height, .. } = self.rectangle_size;
        if StarSilhouette::new(self.star_radii)
            .uncovered_corner(width, height)
            .is_none()
        {
            return Err(ConfigError::RectangleCovered { width, height });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SceneConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_degenerate_star() {
        let mut cfg = SceneConfig::default();
        cfg.star_radii.inner = cfg.star_radii.outer;
        assert!(matches!(cfg.validate(), Err(ConfigError::StarRadii { .. })));
    }

    #[test]
    fn rejects_zero_blend_and_empty_groups() {
        let mut cfg = SceneConfig::default();
        cfg.blend_rate = 0.0;
        assert_eq!(cfg.validate(), Err(ConfigError::BlendRate(0.0)));

        let cfg = SceneConfig::default().with_group_sizes(10, 0);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::EmptyGroup {
                group: "background"
            })
        );
    }

    #[test]
    fn rejects_rectangle_hidden_by_the_star() {
        let mut cfg = SceneConfig::default();
        cfg.rectangle_size.width = 10.0;
        cfg.rectangle_size.height = 10.0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::RectangleCovered {
                width: 10.0,
                height: 10.0
            })
        );
        // a thin strip still pokes out between the lower tips
        cfg.rectangle_size.width = 16.0;
        cfg.rectangle_size.height = 4.0;
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn rejects_nan_dimensions() {
        let mut cfg = SceneConfig::default();
        cfg.heart_scale = f32::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                field: "heart scale",
                ..
            })
        ));
    }
}
