//! Procedural target clouds for the morphing particle groups.
//!
//! Each shape produces `count` target positions plus a parallel color buffer.
//! Positions are random draws with a fixed silhouette: callers pass the RNG,
//! so a seeded `StdRng` reproduces a cloud exactly.

use crate::config::{RectangleSize, StarRadii};
use crate::constants::{HEART_FILL_EXPONENT, REJECTION_RETRY_CAP};
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Shapes a particle group can morph into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeId {
    Star,
    Rectangle,
    Heart,
    SphereExplode,
}

impl ShapeId {
    pub const ALL: [ShapeId; 4] = [
        ShapeId::Star,
        ShapeId::Rectangle,
        ShapeId::Heart,
        ShapeId::SphereExplode,
    ];

    fn color_rule(self) -> ColorRule {
        match self {
            ShapeId::Star | ShapeId::Heart => ColorRule::RadialBands,
            ShapeId::Rectangle | ShapeId::SphereExplode => ColorRule::Solid,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum ColorRule {
    Solid,
    RadialBands,
}

/// Fraction of the way toward white for the inner, middle and outer band.
const BAND_HIGHLIGHT: [f32; 3] = [0.6, 0.3, 0.0];

fn band_color(tint: [f32; 3], normalized_dist: f32) -> [f32; 3] {
    let d = normalized_dist.clamp(0.0, 1.0);
    let band = ((d * BAND_HIGHLIGHT.len() as f32) as usize).min(BAND_HIGHLIGHT.len() - 1);
    let k = BAND_HIGHLIGHT[band];
    [
        tint[0] + (1.0 - tint[0]) * k,
        tint[1] + (1.0 - tint[1]) * k,
        tint[2] + (1.0 - tint[2]) * k,
    ]
}

/// Five-pointed star silhouette in the XY plane with one tip pointing up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarSilhouette {
    pub center: Vec2,
    pub outer: f32,
    pub inner: f32,
}

impl StarSilhouette {
    pub fn new(radii: StarRadii) -> Self {
        Self {
            center: Vec2::ZERO,
            outer: radii.outer,
            inner: radii.inner,
        }
    }

    /// Point-in-star test.
    ///
    /// The angle around the centre is rotated so that 0 falls half a sector
    /// before the top tip, reduced into its 72° sector, and measured as the
    /// deviation `alpha` from the sector's tip direction. Inside the inner
    /// radius everything is accepted; between the radii the point must lie
    /// below the edge running from the tip `(0, R)` to the inner vertex.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let p = Vec2::new(x, y) - self.center;
        let dist = p.length();
        if dist > self.outer {
            return false;
        }
        if dist < self.inner {
            return true;
        }

        let sector = TAU / 5.0;
        let ang = (p.y.atan2(p.x) - PI / 2.0 + PI / 5.0).rem_euclid(TAU);
        let alpha = ((ang % sector) - sector / 2.0).abs();

        let (sin36, cos36) = (PI / 5.0).sin_cos();
        let slope = (self.inner * cos36 - self.outer) / (self.inner * sin36);
        let local_x = dist * alpha.sin();
        let local_y = dist * alpha.cos();
        local_y <= slope * local_x + self.outer
    }

    /// First corner of the centred `width x height` box that lies outside the
    /// star, starting at `(+w/2, +h/2)` and going counter-clockwise. `None`
    /// means the star covers every corner and a rectangle of that size has
    /// nowhere reliable to put its particles.
    pub fn uncovered_corner(&self, width: f32, height: f32) -> Option<Vec2> {
        let (hw, hh) = (width * 0.5, height * 0.5);
        [
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
        ]
        .into_iter()
        .find(|c| !self.contains(c.x, c.y))
    }
}

/// Target positions and colors for one shape, one entry per particle.
#[derive(Clone, Debug, Default)]
pub struct ShapeTargetSet {
    pub positions: Vec<Vec3>,
    pub colors: Vec<[f32; 3]>,
}

impl ShapeTargetSet {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Geometry parameters shared by every shape a scene generates.
#[derive(Clone, Copy, Debug)]
pub struct ShapeTargetGenerator {
    pub star: StarSilhouette,
    pub rectangle: RectangleSize,
    pub heart_scale: f32,
    pub heart_offset_y: f32,
    pub explode_max_radius: f32,
    pub retry_cap: u32,
}

impl ShapeTargetGenerator {
    pub fn new(
        star: StarSilhouette,
        rectangle: RectangleSize,
        heart_scale: f32,
        heart_offset_y: f32,
        explode_max_radius: f32,
    ) -> Self {
        Self {
            star,
            rectangle,
            heart_scale,
            heart_offset_y,
            explode_max_radius,
            retry_cap: REJECTION_RETRY_CAP,
        }
    }

    /// Generate `count` targets for `shape`, colored from `tint`.
    ///
    /// Panics if `count` is zero.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        shape: ShapeId,
        count: usize,
        tint: [f32; 3],
        rng: &mut R,
    ) -> ShapeTargetSet {
        assert!(count > 0, "shape target count must be positive");
        let rule = shape.color_rule();
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        let mut capped = 0usize;

        for _ in 0..count {
            let (pos, dist) = match shape {
                ShapeId::Star => {
                    let (p, ok) = self.star_point(rng);
                    capped += usize::from(!ok);
                    (p, (p.truncate() - self.star.center).length() / self.star.outer)
                }
                ShapeId::Rectangle => {
                    let (p, ok) = self.rectangle_point(rng);
                    capped += usize::from(!ok);
                    (p, 0.0)
                }
                ShapeId::Heart => self.heart_point(rng),
                ShapeId::SphereExplode => (self.sphere_point(rng), 0.0),
            };
            positions.push(pos);
            colors.push(match rule {
                ColorRule::Solid => tint,
                ColorRule::RadialBands => band_color(tint, dist),
            });
        }

        if capped > 0 {
            log::warn!(
                "[shapes] {:?}: {} of {} draws hit the retry cap of {}",
                shape,
                capped,
                count,
                self.retry_cap
            );
        }
        log::debug!("[shapes] generated {:?} x{}", shape, count);
        ShapeTargetSet { positions, colors }
    }

    /// Uniform draw inside the star. The flag is `false` when the retry cap
    /// was hit and the centroid was used instead.
    fn star_point<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vec3, bool) {
        let r = self.star.outer;
        for _ in 0..self.retry_cap {
            let x = (rng.gen::<f32>() - 0.5) * 2.0 * r + self.star.center.x;
            let y = (rng.gen::<f32>() - 0.5) * 2.0 * r + self.star.center.y;
            if self.star.contains(x, y) {
                return (Vec3::new(x, y, 0.0), true);
            }
        }
        (self.star.center.extend(0.0), false)
    }

    /// Uniform draw inside the flag box, outside the star. When the retry cap
    /// is hit the point falls back to a box corner outside the star.
    fn rectangle_point<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vec3, bool) {
        let RectangleSize {
            width,
            height,
            depth,
        } = self.rectangle;
        for _ in 0..self.retry_cap {
            let x = (rng.gen::<f32>() - 0.5) * width;
            let y = (rng.gen::<f32>() - 0.5) * height;
            let z = (rng.gen::<f32>() - 0.5) * depth;
            if !self.star.contains(x, y) {
                return (Vec3::new(x, y, z), true);
            }
        }
        let corner = self
            .star
            .uncovered_corner(width, height)
            .unwrap_or(Vec2::new(width * 0.5, height * 0.5));
        (corner.extend(0.0), false)
    }

    /// Heart curve point and its fill fraction (0 at the centre, 1 on the curve).
    fn heart_point<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vec3, f32) {
        let t = rng.gen::<f32>() * TAU;
        let fill = rng.gen::<f32>().powf(HEART_FILL_EXPONENT);
        let hx = 16.0 * t.sin().powi(3);
        let hy = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
        let s = self.heart_scale;
        (
            Vec3::new(hx * fill * s, hy * fill * s + self.heart_offset_y, 0.0),
            fill,
        )
    }

    /// Uniform volumetric draw inside the explosion sphere.
    fn sphere_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let u = rng.gen::<f32>();
        let v = rng.gen::<f32>();
        let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
        let lam = TAU * u;
        let rad = self.explode_max_radius * rng.gen::<f32>().cbrt();
        Vec3::new(
            rad * phi.sin() * lam.cos(),
            rad * phi.sin() * lam.sin(),
            rad * phi.cos(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn star() -> StarSilhouette {
        StarSilhouette::new(StarRadii {
            outer: 20.0,
            inner: 20.0 * 0.382,
        })
    }

    #[test]
    fn star_contains_tips_and_rejects_notches() {
        let s = star();
        // top tip and centre
        assert!(s.contains(0.0, 19.5));
        assert!(s.contains(0.0, 0.0));
        // straight down is a notch between the two lower tips
        assert!(!s.contains(0.0, -15.0));
        // outside the circumscribed circle
        assert!(!s.contains(0.0, 20.5));
        // the five tips
        for k in 0..5 {
            let a = PI / 2.0 + k as f32 * TAU / 5.0;
            assert!(s.contains(19.0 * a.cos(), 19.0 * a.sin()), "tip {k}");
        }
    }

    #[test]
    fn uncovered_corner_skips_corners_inside_the_star() {
        let s = star();
        // (8, 2) sits in the right tip, (-8, 2) in the left one
        let corner = s.uncovered_corner(16.0, 4.0).expect("a lower corner is exposed");
        assert_eq!(corner, Vec2::new(-8.0, -2.0));
        assert!(!s.contains(corner.x, corner.y));
        assert_eq!(s.uncovered_corner(10.0, 10.0), None);
        assert_eq!(s.uncovered_corner(80.0, 50.0), Some(Vec2::new(40.0, 25.0)));
    }

    #[test]
    fn band_color_brightens_toward_centre() {
        let tint = [1.0, 0.5, 0.0];
        let inner = band_color(tint, 0.1);
        let outer = band_color(tint, 0.95);
        assert_eq!(outer, tint);
        assert!(inner[1] > outer[1] && inner[2] > outer[2]);
    }

    #[test]
    #[should_panic]
    fn zero_count_is_a_contract_violation() {
        let g = ShapeTargetGenerator::new(
            star(),
            RectangleSize {
                width: 80.0,
                height: 50.0,
                depth: 1.0,
            },
            2.2,
            5.0,
            100.0,
        );
        let mut rng = StdRng::seed_from_u64(1);
        g.generate(ShapeId::Heart, 0, [1.0; 3], &mut rng);
    }
}
