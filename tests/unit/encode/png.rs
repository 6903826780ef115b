use super::*;
use crate::foundation::core::Fps;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "curvedrift_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn frame(w: u32, h: u32) -> FrameRGBA {
    let mut data = vec![0u8; (w * h * 4) as usize];
    // one half-transparent grey pixel, premultiplied
    data[0..4].copy_from_slice(&[27, 27, 27, 102]);
    FrameRGBA {
        width: w,
        height: h,
        data,
        premultiplied: true,
    }
}

#[test]
fn writes_one_straight_alpha_png_per_frame() {
    let dir = temp_dir("png_seq");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 3,
        height: 2,
        fps: Fps::new(60, 1).unwrap(),
    })
    .unwrap();
    sink.push_frame(FrameIndex(0), &frame(3, 2)).unwrap();
    sink.push_frame(FrameIndex(1), &frame(3, 2)).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    assert_eq!(
        sink.written()[1].file_name().unwrap().to_str().unwrap(),
        "frame_00001.png"
    );
    let img = image::open(&sink.written()[0]).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(0, 0).0, [68, 68, 68, 102]);
    assert_eq!(img.get_pixel(2, 1).0, [0, 0, 0, 0]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn rejects_frames_of_the_wrong_size_or_before_begin() {
    let dir = temp_dir("png_mismatch");
    let mut sink = PngSequenceSink::new(&dir).with_prefix("x");
    assert!(sink.push_frame(FrameIndex(0), &frame(2, 2)).is_err());
    sink.begin(SinkConfig {
        width: 4,
        height: 4,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    assert!(sink.push_frame(FrameIndex(0), &frame(2, 2)).is_err());
    assert!(sink.written().is_empty());
    std::fs::remove_dir_all(&dir).ok();
}
