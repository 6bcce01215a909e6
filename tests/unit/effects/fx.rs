use super::*;

#[test]
fn linear_gradient_runs_along_the_axis() {
    let mut s = Surface::new(16, 4).unwrap();
    let red = Rgba8::opaque(255, 0, 0);
    let blue = Rgba8::opaque(0, 0, 255);
    linear_gradient(&mut s, Point::new(0.0, 0.0), Point::new(16.0, 0.0), red, blue);

    let left = s.get_pixel(0, 2);
    let right = s.get_pixel(15, 2);
    assert!(left.r > 220 && left.b < 35);
    assert!(right.b > 220 && right.r < 35);
    // Same column, different row: identical (axis is horizontal).
    assert_eq!(s.get_pixel(7, 0), s.get_pixel(7, 3));
}

#[test]
fn degenerate_gradient_axis_fills_with_start_color() {
    let mut s = Surface::new(4, 4).unwrap();
    let red = Rgba8::opaque(255, 0, 0);
    linear_gradient(&mut s, Point::new(2.0, 2.0), Point::new(2.0, 2.0), red, Rgba8::BLACK);
    assert_eq!(s.get_pixel(0, 0), red);
    assert_eq!(s.get_pixel(3, 3), red);
}

#[test]
fn radial_gradient_centers_inner_color() {
    let mut s = Surface::new(21, 21).unwrap();
    let inner = Rgba8::opaque(250, 250, 250);
    let outer = Rgba8::opaque(10, 10, 10);
    radial_gradient(&mut s, 10.5, 10.5, 10.0, inner, outer);
    assert!(s.get_pixel(10, 10).r > 230);
    assert!(s.get_pixel(0, 0).r < 30);
}

#[test]
fn noise_is_deterministic_per_seed() {
    let mut a = Surface::new(8, 8).unwrap();
    a.fill(Rgba8::opaque(128, 128, 128));
    let mut b = a.clone();
    let mut c = a.clone();
    noise(&mut a, 0.5, 42);
    noise(&mut b, 0.5, 42);
    noise(&mut c, 0.5, 43);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn noise_touches_color_not_alpha() {
    let mut s = Surface::new(8, 8).unwrap();
    s.fill(Rgba8::new(100, 100, 100, 77));
    noise(&mut s, 1.0, 7);
    assert!(s.data().chunks_exact(4).all(|px| px[3] == 77));
    assert!(s.data().chunks_exact(4).any(|px| px[0] != 100));
}

#[test]
fn zero_intensity_noise_is_identity() {
    let mut s = Surface::new(4, 4).unwrap();
    s.fill(Rgba8::opaque(50, 60, 70));
    let before = s.clone();
    noise(&mut s, 0.0, 1);
    assert_eq!(s, before);
}

#[test]
fn zero_amplitude_ripple_is_identity() {
    let mut s = Surface::new(8, 8).unwrap();
    s.set_pixel(2, 2, Rgba8::WHITE);
    let before = s.clone();
    ripple(&mut s, 4.0, 4.0, 0.0, 10.0, 0.0);
    assert_eq!(s, before);
}

#[test]
fn ripple_displaces_pixels() {
    let mut s = Surface::new(16, 16).unwrap();
    for x in 0..16 {
        s.set_pixel(x, 8, Rgba8::WHITE);
    }
    let before = s.clone();
    ripple(&mut s, 8.0, 8.0, 3.0, 6.0, 0.0);
    assert_ne!(s, before);
}

#[test]
fn brightness_zero_blacks_out_color_only() {
    let mut s = Surface::new(2, 2).unwrap();
    s.fill(Rgba8::new(200, 100, 50, 90));
    brightness(&mut s, 0.0);
    assert_eq!(s.get_pixel(0, 0), Rgba8::new(0, 0, 0, 90));
}

#[test]
fn saturation_zero_equals_grayscale() {
    let mut a = Surface::new(4, 4).unwrap();
    a.fill(Rgba8::opaque(200, 50, 120));
    let mut b = a.clone();
    saturation(&mut a, 0.0);
    grayscale(&mut b);
    assert_eq!(a, b);
    let px = a.get_pixel(0, 0);
    assert_eq!(px.r, px.g);
    assert_eq!(px.g, px.b);
}

#[test]
fn invert_twice_is_identity() {
    let mut s = Surface::new(4, 4).unwrap();
    s.fill(Rgba8::new(12, 200, 77, 130));
    let before = s.clone();
    invert(&mut s);
    assert_ne!(s, before);
    invert(&mut s);
    assert_eq!(s, before);
}

#[test]
fn frosted_glass_softens_and_desaturates() {
    let mut s = Surface::new(16, 16).unwrap();
    s.fill(Rgba8::opaque(30, 30, 30));
    s.fill_rect(6, 6, 4, 4, Rgba8::opaque(255, 0, 0));
    frosted_glass(&mut s, 4.0, 0.0, 0);
    let edge = s.get_pixel(5, 8);
    // Blur bleeds the red square outward.
    assert!(edge.r > 30);
}
