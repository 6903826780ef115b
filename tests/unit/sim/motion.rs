use super::*;

fn point(x: f64, y: f64, angle: f64, speed: f64) -> DriftPoint {
    DriftPoint {
        id: 0,
        x,
        y,
        new_x: 0.0,
        new_y: 0.0,
        angle,
        speed_x: speed,
        speed_y: speed,
    }
}

#[test]
fn reflection_formulas_for_sample_angles() {
    let cases = [
        (0.0, 180.0, 0.0),
        (45.0, 135.0, 315.0),
        (90.0, 90.0, 270.0),
        (135.0, 45.0, 225.0),
        (225.0, 315.0, 135.0),
        (315.0, 225.0, 45.0),
    ];
    for (a, off_x, off_y) in cases {
        assert_eq!(reflect_off_x_bound(a), off_x, "x-bound reflection of {a}");
        assert_eq!(reflect_off_y_bound(a), off_y, "y-bound reflection of {a}");
    }
}

#[test]
fn reflections_stay_in_range() {
    for i in 0..720 {
        let a = f64::from(i) * 0.5;
        assert!((0.0..360.0).contains(&reflect_off_x_bound(a)));
        assert!((0.0..360.0).contains(&reflect_off_y_bound(a)));
    }
}

#[test]
fn speed_y_floor_holds_for_every_heading() {
    let motion = MotionParams::default();
    for i in 0..3600 {
        let angle = f64::from(i) * 0.1;
        for speed in [0.0, 0.1, 0.3, 0.30001, 1.0, 9.0] {
            let out = damp_speed_y(speed, angle, &motion);
            assert!(out >= 0.3, "angle {angle} speed {speed} -> {out}");
        }
    }
}

#[test]
fn speed_y_bands() {
    let motion = MotionParams::default();
    assert!((damp_speed_y(1.0, 90.0, &motion) - 1.01).abs() < 1e-12);
    assert!((damp_speed_y(1.0, 270.0, &motion) - 0.99).abs() < 1e-12);
    assert_eq!(damp_speed_y(1.0, 0.0, &motion), 1.0);
    assert_eq!(damp_speed_y(1.0, 180.0, &motion), 1.0);
    assert_eq!(damp_speed_y(1.0, 10.0, &motion), 1.0);
    assert_eq!(damp_speed_y(1.0, 350.0, &motion), 1.0);
}

#[test]
fn drift_moves_along_heading() {
    let motion = MotionParams::default();
    let vp = Viewport::new(100.0, 100.0);
    let mut p = point(50.0, 50.0, 0.0, 2.0);
    let bounce = drift_step(&mut p, vp, &motion);
    assert!(!bounce.any());
    assert!((p.x - 52.0).abs() < 1e-12);
    assert!((p.y - 50.0).abs() < 1e-12);
}

#[test]
fn drift_bounces_off_right_edge_and_clamps() {
    let motion = MotionParams::default();
    let vp = Viewport::new(100.0, 100.0);
    let mut p = point(99.0, 50.0, 0.0, 5.0);
    let bounce = drift_step(&mut p, vp, &motion);
    assert_eq!(bounce, Bounce { x: true, y: false });
    assert_eq!(p.angle, 180.0);
    assert_eq!(p.x, 100.0);
}

#[test]
fn drift_bounces_off_top_edge_and_clamps() {
    let motion = MotionParams::default();
    let vp = Viewport::new(100.0, 100.0);
    let mut p = point(50.0, 1.0, 270.0, 5.0);
    let bounce = drift_step(&mut p, vp, &motion);
    assert_eq!(bounce, Bounce { x: false, y: true });
    assert_eq!(p.angle, 90.0);
    assert_eq!(p.y, 0.0);
}

#[test]
fn corner_hit_uses_the_top_bottom_reflection() {
    let motion = MotionParams::default();
    let vp = Viewport::new(100.0, 100.0);
    let mut p = point(99.0, 99.0, 45.0, 5.0);
    let bounce = drift_step(&mut p, vp, &motion);
    assert_eq!(bounce, Bounce { x: true, y: true });
    assert_eq!(p.angle, 315.0);
    assert_eq!((p.x, p.y), (100.0, 100.0));

    let mut p = point(1.0, 1.0, 225.0, 5.0);
    drift_step(&mut p, vp, &motion);
    assert_eq!(p.angle, 135.0);
    assert_eq!((p.x, p.y), (0.0, 0.0));
}

#[test]
fn drift_stays_in_bounds_after_any_bounce() {
    let motion = MotionParams::default();
    let vp = Viewport::new(80.0, 60.0);
    for i in 0..72 {
        let angle = f64::from(i) * 5.0;
        for (x, y) in [(0.5, 0.5), (79.5, 0.5), (0.5, 59.5), (79.5, 59.5), (40.0, 30.0)] {
            let mut p = point(x, y, angle, 9.5);
            for _ in 0..50 {
                drift_step(&mut p, vp, &motion);
                assert!(vp.contains(p.pos()), "{p:?} escaped");
            }
        }
    }
}

#[test]
fn shrinking_viewport_pulls_points_inside() {
    let motion = MotionParams::default();
    let mut p = point(500.0, 400.0, 180.0, 1.0);
    drift_step(&mut p, Viewport::new(200.0, 100.0), &motion);
    assert_eq!((p.x, p.y), (200.0, 100.0));
}

#[test]
fn ease_step_closes_a_fifth_and_snaps() {
    let motion = MotionParams::default();
    let mut p = point(0.0, 0.0, 0.0, 1.0);
    p.new_x = 100.0;
    p.new_y = 50.0;
    assert!(!ease_step(&mut p, &motion));
    assert!((p.x - 20.0).abs() < 1e-12);
    assert!((p.y - 10.0).abs() < 1e-12);

    p.x = 99.5;
    p.y = 49.0;
    // after easing: x 99.6, y 49.2 -> both within 1px
    assert!(ease_step(&mut p, &motion));
    assert_eq!((p.x, p.y), (100.0, 50.0));
}

#[test]
fn ease_distance_is_non_increasing() {
    let motion = MotionParams::default();
    let mut p = point(3.0, 720.0, 0.0, 1.0);
    p.new_x = 1913.0;
    p.new_y = 4.0;
    let mut last = p.remaining();
    for _ in 0..200 {
        ease_step(&mut p, &motion);
        let now = p.remaining();
        assert!(now.0 <= last.0 && now.1 <= last.1);
        last = now;
    }
    assert_eq!(last, (0.0, 0.0));
}

#[test]
fn retarget_draws_in_documented_order() {
    let motion = MotionParams::default();
    let mut p = point(1.0, 1.0, 0.0, 1.0);
    let mut rng = crate::random::source::SequenceRandom::new(vec![0.5, 0.25, 0.5, 0.05, 0.2]);
    retarget(&mut p, Viewport::new(200.0, 100.0), &motion, &mut rng);
    assert_eq!((p.new_x, p.new_y), (100.0, 25.0));
    assert_eq!(p.angle, 180.0);
    assert_eq!((p.speed_x, p.speed_y), (2.0, 2.0));
    assert_eq!((p.x, p.y), (1.0, 1.0));
}
