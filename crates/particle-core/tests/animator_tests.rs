// Host-side tests for the scene animator.

use glam::Vec3;
use particle_core::*;

fn scene(seed: u64) -> SceneAnimator {
    SceneAnimator::new(SceneConfig::default().with_group_sizes(120, 200), seed)
        .expect("default config is valid")
}

fn distances(group: &ParticleGroup) -> Vec<f32> {
    let targets = group
        .targets(group.active_shape())
        .expect("active target set");
    group
        .positions()
        .iter()
        .zip(&targets.positions)
        .map(|(p, t)| p.distance(*t))
        .collect()
}

fn run(a: &mut SceneAnimator, frames: usize, t0: f32) -> f32 {
    let mut t = t0;
    for _ in 0..frames {
        t += 1.0 / 60.0;
        a.tick(t);
    }
    t
}

#[test]
fn blending_converges_without_overshoot() {
    let mut a = scene(21);
    let targets = a
        .accent()
        .targets(ShapeId::Star)
        .expect("star targets")
        .positions
        .clone();
    let mut prev = a.accent().positions().to_vec();
    for frame in 0..60 {
        a.tick(frame as f32 / 60.0);
        let now = a.accent().positions();
        for ((p0, p1), t) in prev.iter().zip(now).zip(&targets) {
            let before = p0.distance(*t);
            let after = p1.distance(*t);
            if before > 1e-3 {
                assert!(after < before, "frame {frame}: {after} >= {before}");
            }
            // still on the same side of the target
            assert!((*t - *p1).dot(*t - *p0) >= 0.0);
        }
        prev = now.to_vec();
    }
}

#[test]
fn each_frame_moves_a_fixed_fraction_of_the_remaining_distance() {
    let mut a = scene(4);
    let rate = a.config().blend_rate;
    let before = distances(a.background());
    a.tick(0.0);
    let after = distances(a.background());
    for (b, c) in before.iter().zip(&after) {
        assert!((c - b * (1.0 - rate)).abs() <= 1e-3 * b.max(1.0));
    }
}

#[test]
fn switching_to_heart_never_jumps_and_settles() {
    let mut a = scene(8);
    let mut t = run(&mut a, 600, 0.0);
    for g in a.groups() {
        assert!(distances(g).iter().all(|d| *d < 1e-3), "flag did not settle");
    }

    a.set_state(GestureState::Heart);
    let rate = a.config().blend_rate;
    for g in a.groups() {
        assert_eq!(g.active_shape(), ShapeId::Heart);
    }
    let initial: Vec<Vec<f32>> = a.groups().iter().map(|g| distances(g)).collect();

    for _ in 0..400 {
        let prev: Vec<Vec<Vec3>> = a.groups().iter().map(|g| g.positions().to_vec()).collect();
        t += 1.0 / 60.0;
        a.tick(t);
        for ((g, prev), d0) in a.groups().iter().zip(&prev).zip(&initial) {
            for ((p, q), d) in g.positions().iter().zip(prev).zip(d0) {
                assert!(p.distance(*q) <= rate * d + 1e-4);
            }
        }
    }
    for g in a.groups() {
        assert!(distances(g).iter().all(|d| *d < 1e-3), "heart did not settle");
    }
}

#[test]
fn explode_and_photo_share_the_sphere() {
    let mut a = scene(2);
    a.set_state(GestureState::Explode);
    let sphere = a.accent().positions().to_vec();
    a.set_state(GestureState::Photo);
    assert_eq!(a.accent().active_shape(), ShapeId::SphereExplode);
    assert_eq!(a.accent().positions(), &sphere[..]);
}

#[test]
fn none_renders_like_flag() {
    let mut a = scene(3);
    a.set_state(GestureState::Explode);
    a.set_state(GestureState::None);
    assert_eq!(a.accent().active_shape(), ShapeId::Star);
    assert_eq!(a.background().active_shape(), ShapeId::Rectangle);
    a.tick(2.0);
    assert!(a.banners().title.visible);
}

#[test]
fn buffer_lengths_never_change() {
    let mut a = scene(5);
    let lens: Vec<usize> = a.groups().iter().map(|g| g.len()).collect();
    let mut t = 0.0;
    for state in GestureState::ALL {
        a.set_state(state);
        t = run(&mut a, 5, t);
        for (g, n) in a.groups().iter().zip(&lens) {
            assert_eq!(g.positions().len(), *n);
            assert_eq!(g.colors().len(), *n);
            assert_eq!(g.sizes().len(), *n);
        }
    }
}

#[test]
fn same_seed_builds_the_same_scene() {
    let a = scene(77);
    let b = scene(77);
    assert_eq!(a.accent().positions(), b.accent().positions());
    assert_eq!(
        a.background().targets(ShapeId::Heart).map(|s| &s.positions),
        b.background().targets(ShapeId::Heart).map(|s| &s.positions)
    );
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = SceneConfig::default();
    cfg.blend_rate = 0.0;
    assert!(matches!(
        SceneAnimator::new(cfg, 1),
        Err(ConfigError::BlendRate(_))
    ));
    let cfg = SceneConfig::default().with_group_sizes(0, 10);
    assert!(SceneAnimator::new(cfg, 1).is_err());
}

#[test]
fn photo_ring_orbits_only_while_exploded() {
    let mut a = scene(6);
    run(&mut a, 10, 0.0);
    assert!(a.photos().planes().iter().all(|p| !p.visible));
    a.set_state(GestureState::Explode);
    run(&mut a, 10, 1.0);
    assert!(a.photos().planes().iter().all(|p| p.visible));
    assert_eq!(a.photos().planes().len(), a.config().photo_count);
}
