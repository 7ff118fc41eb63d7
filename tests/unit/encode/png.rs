use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("inkwarp_png_{}_{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn saved_png_decodes_to_same_pixels() {
    let dir = scratch_dir("roundtrip");
    let path = dir.join("nested").join("out.png");
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 0, 128, 255, 64],
    };
    save_png(&path, &frame).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.into_raw(), frame.data);
    assert!(!partial_path(&path).exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn malformed_frames_write_nothing() {
    let dir = scratch_dir("malformed");
    let path = dir.join("bad.png");
    let frame = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 3],
    };
    assert!(save_png(&path, &frame).is_err());
    assert!(!path.exists());
}

#[test]
fn partial_path_is_a_sibling() {
    let p = Path::new("a/b/still.png");
    assert_eq!(partial_path(p), PathBuf::from("a/b/still.png.partial"));
}
