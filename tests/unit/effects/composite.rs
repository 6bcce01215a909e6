use super::*;

#[test]
fn all_modes_are_listed_once() {
    assert_eq!(BlendMode::ALL.len(), 9);
    for (i, a) in BlendMode::ALL.iter().enumerate() {
        for b in &BlendMode::ALL[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(BlendMode::default(), BlendMode::Normal);
}

#[test]
fn serde_names_are_snake_case() {
    let s = serde_json::to_string(&BlendMode::ColorDodge).unwrap();
    assert_eq!(s, "\"color_dodge\"");
    let back: BlendMode = serde_json::from_str("\"multiply\"").unwrap();
    assert_eq!(back, BlendMode::Multiply);
}

#[test]
fn normal_opaque_source_replaces() {
    let dst = Rgba8::opaque(10, 20, 30);
    let src = Rgba8::opaque(200, 100, 50);
    assert_eq!(blend_px(dst, src, BlendMode::Normal, 1.0), src);
}

#[test]
fn zero_effective_alpha_keeps_destination() {
    let dst = Rgba8::opaque(10, 20, 30);
    let src = Rgba8::opaque(200, 100, 50);
    assert_eq!(blend_px(dst, src, BlendMode::Normal, 0.0), dst);
    assert_eq!(blend_px(dst, src.with_alpha(0), BlendMode::Normal, 1.0), dst);
}

#[test]
fn add_clamps_at_white() {
    let dst = Rgba8::opaque(200, 200, 200);
    let src = Rgba8::opaque(200, 200, 200);
    let out = blend_px(dst, src, BlendMode::Add, 1.0);
    assert_eq!((out.r, out.g, out.b), (255, 255, 255));
}

#[test]
fn multiply_with_white_is_identity() {
    let dst = Rgba8::opaque(37, 142, 200);
    let out = blend_px(dst, Rgba8::WHITE, BlendMode::Multiply, 1.0);
    assert_eq!(out, dst);
}

#[test]
fn screen_with_black_is_identity() {
    let dst = Rgba8::opaque(37, 142, 200);
    let out = blend_px(dst, Rgba8::BLACK, BlendMode::Screen, 1.0);
    assert_eq!(out, dst);
}

#[test]
fn difference_of_equal_colors_is_black() {
    let c = Rgba8::opaque(120, 80, 40);
    let out = blend_px(c, c, BlendMode::Difference, 1.0);
    assert_eq!((out.r, out.g, out.b), (0, 0, 0));
}

#[test]
fn transparent_backdrop_takes_plain_source() {
    // With nothing beneath, every mode degrades to source placement.
    let src = Rgba8::opaque(90, 60, 30);
    for mode in BlendMode::ALL {
        let out = blend_px(Rgba8::TRANSPARENT, src, mode, 1.0);
        assert_eq!(out, src, "mode {mode:?}");
    }
}

#[test]
fn coverage_follows_source_over() {
    let dst = Rgba8::new(0, 0, 0, 128);
    let src = Rgba8::new(255, 255, 255, 128);
    let out = blend_px(dst, src, BlendMode::Normal, 1.0);
    // out_a = sa + da * (1 - sa)
    let expect = 128.0 / 255.0 + 128.0 / 255.0 * (1.0 - 128.0 / 255.0);
    assert!((f32::from(out.a) / 255.0 - expect).abs() < 0.01);
}

#[test]
fn opacity_scales_contribution() {
    let dst = Rgba8::opaque(0, 0, 0);
    let src = Rgba8::opaque(255, 255, 255);
    let out = blend_px(dst, src, BlendMode::Normal, 0.5);
    assert!(out.r > 100 && out.r < 156, "r = {}", out.r);
}
