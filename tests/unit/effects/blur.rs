use super::*;

use crate::foundation::core::Rgba8;

#[test]
fn radius_zero_is_identity() {
    let mut s = Surface::new(4, 4).unwrap();
    s.set_pixel(1, 1, Rgba8::opaque(200, 10, 10));
    let before = s.clone();
    blur(&mut s, 0.0);
    blur(&mut s, -3.0);
    blur(&mut s, f32::NAN);
    assert_eq!(s, before);
}

#[test]
fn constant_image_is_a_fixed_point() {
    let mut s = Surface::new(8, 6).unwrap();
    s.fill(Rgba8::new(10, 20, 30, 40));
    let before = s.clone();
    blur(&mut s, 4.0);
    assert_eq!(s, before);
}

#[test]
fn energy_spreads_from_a_single_pixel() {
    let mut s = Surface::new(7, 7).unwrap();
    s.set_pixel(3, 3, Rgba8::WHITE);
    blur(&mut s, 2.0);

    let nonzero = s.data().chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    // Alpha mass is approximately conserved away from edges.
    let sum_a: u32 = s.data().chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4, "sum_a = {sum_a}");
    // The center is still the brightest sample.
    let center = s.get_pixel(3, 3).a;
    assert!(s.data().chunks_exact(4).all(|px| px[3] <= center));
}

#[test]
fn blur_is_symmetric_for_symmetric_input() {
    let mut s = Surface::new(9, 9).unwrap();
    s.set_pixel(4, 4, Rgba8::WHITE);
    blur(&mut s, 3.0);
    for d in 1..4 {
        assert_eq!(s.get_pixel(4 - d, 4), s.get_pixel(4 + d, 4));
        assert_eq!(s.get_pixel(4, 4 - d), s.get_pixel(4, 4 + d));
    }
}

#[test]
fn region_blur_leaves_outside_untouched() {
    let mut s = Surface::new(12, 12).unwrap();
    for y in 0..12 {
        for x in 0..12 {
            let v = ((x * 21 + y * 13) % 256) as u8;
            s.set_pixel(x, y, Rgba8::opaque(v, v, v));
        }
    }
    let before = s.clone();
    blur_region(&mut s, 3, 3, 5, 5, 2.0);

    for y in 0..12 {
        for x in 0..12 {
            let inside = (3..8).contains(&x) && (3..8).contains(&y);
            if !inside {
                assert_eq!(s.get_pixel(x, y), before.get_pixel(x, y), "({x}, {y})");
            }
        }
    }
    assert_ne!(s, before);
}

#[test]
fn region_clips_to_surface() {
    let mut s = Surface::new(4, 4).unwrap();
    s.fill(Rgba8::WHITE);
    // Degenerate and out-of-range regions are no-ops, not panics.
    blur_region(&mut s, -10, -10, 5, 5, 2.0);
    blur_region(&mut s, 10, 10, 5, 5, 2.0);
    blur_region(&mut s, 0, 0, 0, 0, 2.0);
}

#[test]
fn radius_above_max_is_clamped() {
    let mut a = Surface::new(6, 6).unwrap();
    a.set_pixel(3, 3, Rgba8::WHITE);
    let mut b = a.clone();
    blur(&mut a, MAX_BLUR_RADIUS);
    blur(&mut b, MAX_BLUR_RADIUS * 10.0);
    assert_eq!(a, b);
}
