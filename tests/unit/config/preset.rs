use super::*;

#[test]
fn presets_match_device_classes() {
    let desktop = EffectConfig::for_device(DeviceClass::Desktop);
    assert_eq!(desktop.point_count_range(), 4..=20);
    assert_eq!(desktop.canvas.width, 6000);
    assert_eq!(desktop.canvas.height, 5000);
    assert_eq!(desktop.font_size_px, 10.0);
    assert_eq!(desktop.strokes.curve, 2.8);

    let mobile = EffectConfig::for_device(DeviceClass::from_is_mobile(true));
    assert_eq!(mobile.device, DeviceClass::Mobile);
    assert_eq!(mobile.point_count_range(), 4..=14);
    assert_eq!(mobile.point_radius, 1.2);
    assert_eq!(mobile.ring_radius, 3.8);
    assert_eq!(mobile.font_size_px, 8.0);
}

#[test]
fn presets_validate() {
    EffectConfig::for_device(DeviceClass::Desktop)
        .validate()
        .unwrap();
    EffectConfig::for_device(DeviceClass::Mobile)
        .validate()
        .unwrap();
}

#[test]
fn json_roundtrip_keeps_values() {
    let cfg = EffectConfig::for_device(DeviceClass::Mobile);
    let s = serde_json::to_string(&cfg).unwrap();
    let back: EffectConfig = serde_json::from_str(&s).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn missing_motion_and_palette_fall_back_to_defaults() {
    let json = r#"{
        "device": "desktop",
        "max_extra_points": 6,
        "canvas": {"width": 320, "height": 200},
        "point_radius": 2.0,
        "ring_radius": 4.0,
        "strokes": {"ring": 0.5, "guide": 0.5, "curve": 3.0},
        "font_size_px": 9.0
    }"#;
    let cfg: EffectConfig = serde_json::from_str(json).unwrap();
    assert_eq!(cfg.motion, MotionParams::default());
    assert_eq!(cfg.palette, Palette::default());
    assert_eq!(cfg.point_count_range(), 4..=10);
    cfg.validate().unwrap();
}

#[test]
fn validation_rejects_bad_values() {
    let mut cfg = EffectConfig::default();
    cfg.strokes.curve = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = EffectConfig::default();
    cfg.motion.ease_divisor = 1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = EffectConfig::default();
    cfg.motion.settle_epsilon_px = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = EffectConfig::default();
    cfg.motion.reshuffle_odds = 1;
    assert!(cfg.validate().is_err());

    let mut cfg = EffectConfig::default();
    cfg.canvas.width = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn max_extra_points_is_capped() {
    let mut cfg = EffectConfig::default();
    cfg.max_extra_points = MAX_EXTRA_POINTS;
    cfg.validate().unwrap();

    for too_many in [MAX_EXTRA_POINTS + 1, u32::MAX] {
        cfg.max_extra_points = too_many;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("max_extra_points"), "{err}");
    }

    let json = r#"{
        "device": "desktop",
        "max_extra_points": 4294967295,
        "canvas": {"width": 320, "height": 200},
        "point_radius": 2.0,
        "ring_radius": 4.0,
        "strokes": {"ring": 0.5, "guide": 0.5, "curve": 3.0},
        "font_size_px": 9.0
    }"#;
    let cfg: EffectConfig = serde_json::from_str(json).unwrap();
    assert!(cfg.validate().is_err());
}

#[test]
fn from_json_path_reports_missing_file() {
    let err = EffectConfig::from_json_path(std::path::Path::new("does/not/exist.json"))
        .unwrap_err();
    assert!(err.to_string().contains("open config"));
}
