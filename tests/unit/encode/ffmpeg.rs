use super::*;
use crate::foundation::core::Fps;

#[test]
fn premul_transparent_pixel_becomes_background() {
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg(&mut dst, &[0, 0, 0, 0], [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn premul_opaque_pixel_is_kept() {
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg(&mut dst, &[68, 68, 68, 255], [255, 255, 255, 255]).unwrap();
    assert_eq!(dst, vec![68, 68, 68, 255]);
}

#[test]
fn premul_and_straight_agree_on_the_secondary_grey() {
    let bg = [255, 255, 255, 255];
    let mut a = vec![0u8; 4];
    let mut b = vec![0u8; 4];
    flatten_premul_over_bg(&mut a, &[27, 27, 27, 102], bg).unwrap();
    flatten_straight_over_bg(&mut b, &[68, 68, 68, 102], bg).unwrap();
    for c in 0..3 {
        assert!(a[c].abs_diff(b[c]) <= 1, "{a:?} vs {b:?}");
    }
    assert_eq!(a[3], 255);
}

#[test]
fn mismatched_buffers_are_rejected() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_premul_over_bg(&mut dst, &[0, 0, 0, 0], [0, 0, 0, 255]).is_err());
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(
        std::env::temp_dir().join("curvedrift_odd.mp4"),
    ));
    let err = sink
        .begin(SinkConfig {
            width: 101,
            height: 100,
            fps: Fps::new(60, 1).unwrap(),
        })
        .unwrap_err();
    assert!(matches!(err, CurveError::Validation(_)));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
}
