use super::*;
use crate::random::source::seeded;

#[test]
fn trace_has_one_entry_per_frame() {
    let cfg = EffectConfig::default();
    let trace = record_trace(&cfg, Viewport::new(400.0, 300.0), seeded(1), 25).unwrap();
    assert_eq!(trace.frames.len(), 25);
    for (i, f) in trace.frames.iter().enumerate() {
        assert_eq!(f.frame, FrameIndex(i as u64));
        assert_eq!(f.points.len(), trace.frames[0].points.len());
    }
    assert_eq!(trace.frames[0].motion, Motion::FreeDrift { frames: 0 });
    assert_eq!(trace.frames[24].motion, Motion::FreeDrift { frames: 24 });
}

#[test]
fn same_seed_gives_identical_trace() {
    let cfg = EffectConfig::default();
    let vp = Viewport::new(800.0, 600.0);
    let a = record_trace(&cfg, vp, seeded(42), 300).unwrap();
    let b = record_trace(&cfg, vp, seeded(42), 300).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.max_deviation(&b).unwrap(), 0.0);
}

#[test]
fn json_roundtrip() {
    let cfg = EffectConfig::default();
    let trace = record_trace(&cfg, Viewport::new(200.0, 200.0), seeded(3), 5).unwrap();
    let json = trace.to_json_pretty().unwrap();
    let back: Trace = serde_json::from_str(&json).unwrap();
    assert_eq!(back, trace);
}

#[test]
fn json_roundtrip_is_bit_exact_over_a_long_run() {
    let cfg = EffectConfig::default();
    let trace = record_trace(&cfg, Viewport::new(1920.0, 1080.0), seeded(7), 400).unwrap();
    let back: Trace = serde_json::from_str(&trace.to_json_pretty().unwrap()).unwrap();
    for (a, b) in trace.frames.iter().zip(&back.frames) {
        for (p, q) in a.points.iter().zip(&b.points) {
            assert_eq!(p.x.to_bits(), q.x.to_bits(), "frame {:?}", a.frame);
            assert_eq!(p.y.to_bits(), q.y.to_bits(), "frame {:?}", a.frame);
        }
    }
    assert_eq!(back.max_deviation(&trace).unwrap(), 0.0);
}

#[test]
fn last_digit_floats_survive_json() {
    // Shortest repr whose neighbour is one ulp away.
    let x = 110.06580663732153_f64;
    let back: f64 = serde_json::from_str(&serde_json::to_string(&x).unwrap()).unwrap();
    assert_eq!(back.to_bits(), x.to_bits());
}

#[test]
fn deviation_rejects_mismatched_shapes() {
    let cfg = EffectConfig::default();
    let vp = Viewport::new(200.0, 200.0);
    let a = record_trace(&cfg, vp, seeded(3), 5).unwrap();
    let b = record_trace(&cfg, vp, seeded(3), 4).unwrap();
    assert!(a.max_deviation(&b).is_err());

    let mut c = a.clone();
    c.frames[2].points[0].x += 0.25;
    assert_eq!(a.max_deviation(&c).unwrap(), 0.25);
}
