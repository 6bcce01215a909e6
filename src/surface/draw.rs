//! Shape primitives: lines, rects, circles, rounded rects, pills, squircles.
//!
//! Every primitive clips silently. Primitives with curved edges come in
//! anti-aliased and hard-edged variants, dispatched on the surface's
//! anti-aliasing flag. The anti-aliased paths use signed-distance coverage
//! with a one-pixel ramp.

use crate::foundation::core::Rgba8;
use crate::surface::Surface;

fn fpart(x: f32) -> f32 {
    x - x.floor()
}

fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

impl Surface {
    /// Draw a one-pixel line between two points.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba8) {
        if self.anti_alias() {
            self.draw_line_aa(x1, y1, x2, y2, color);
        } else {
            self.draw_line_hard(x1, y1, x2, y2, color);
        }
    }

    /// Outline a rectangle.
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba8) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.draw_line(x, y, x + w - 1, y, color);
        self.draw_line(x, y + h - 1, x + w - 1, y + h - 1, color);
        self.draw_line(x, y, x, y + h - 1, color);
        self.draw_line(x + w - 1, y, x + w - 1, y + h - 1, color);
    }

    /// Outline a circle.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba8) {
        if radius < 0 {
            return;
        }
        if self.anti_alias() {
            self.draw_circle_aa(cx, cy, radius, color);
        } else {
            self.draw_circle_hard(cx, cy, radius, color);
        }
    }

    /// Fill a circle.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba8) {
        if radius < 0 {
            return;
        }
        if self.anti_alias() {
            self.fill_circle_aa(cx, cy, radius, color);
        } else {
            self.fill_circle_hard(cx, cy, radius, color);
        }
    }

    fn draw_line_hard(&mut self, mut x1: i32, mut y1: i32, x2: i32, y2: i32, color: Rgba8) {
        // Bresenham
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx - dy;
        loop {
            self.set_pixel(x1, y1, color);
            if x1 == x2 && y1 == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x1 += sx;
            }
            if e2 < dx {
                err += dx;
                y1 += sy;
            }
        }
    }

    fn draw_line_aa(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba8) {
        // Xiaolin Wu
        let steep = (y2 - y1).abs() > (x2 - x1).abs();
        let (mut x1, mut y1, mut x2, mut y2) = if steep { (y1, x1, y2, x2) } else { (x1, y1, x2, y2) };
        if x1 > x2 {
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut y1, &mut y2);
        }
        let dx = (x2 - x1) as f32;
        let dy = (y2 - y1) as f32;
        let gradient = if dx == 0.0 { 1.0 } else { dy / dx };

        let mut plot = |s: &mut Self, x: i32, y: i32, c: f32| {
            if steep {
                s.plot_coverage(y, x, color, c);
            } else {
                s.plot_coverage(x, y, color, c);
            }
        };

        let xend = x1 as f32;
        let mut yend = y1 as f32 + gradient * (xend - x1 as f32);
        let xgap = rfpart(x1 as f32 + 0.5);
        let xpxl1 = x1;
        let ypxl1 = yend.floor() as i32;
        plot(self, xpxl1, ypxl1, rfpart(yend) * xgap);
        plot(self, xpxl1, ypxl1 + 1, fpart(yend) * xgap);
        let mut intery = yend + gradient;

        let xend2 = x2 as f32;
        yend = y2 as f32 + gradient * (xend2 - x2 as f32);
        let xgap2 = fpart(x2 as f32 + 0.5);
        let xpxl2 = x2;
        let ypxl2 = yend.floor() as i32;
        plot(self, xpxl2, ypxl2, rfpart(yend) * xgap2);
        plot(self, xpxl2, ypxl2 + 1, fpart(yend) * xgap2);

        for x in (xpxl1 + 1)..xpxl2 {
            let ipart = intery.floor() as i32;
            let f = fpart(intery);
            plot(self, x, ipart, 1.0 - f);
            plot(self, x, ipart + 1, f);
            intery += gradient;
        }
    }

    fn draw_circle_hard(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba8) {
        // Midpoint circle
        let mut x = radius;
        let mut y = 0;
        let mut err = 0;
        while x >= y {
            for (px, py) in [
                (cx + x, cy + y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx - x, cy + y),
                (cx - x, cy - y),
                (cx - y, cy - x),
                (cx + y, cy - x),
                (cx + x, cy - y),
            ] {
                self.set_pixel(px, py, color);
            }
            y += 1;
            if err <= 0 {
                err += 2 * y + 1;
            }
            if err > 0 {
                x -= 1;
                err -= 2 * x + 1;
            }
        }
    }

    fn draw_circle_aa(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba8) {
        let r = radius as f32;
        for y in -radius - 1..=radius + 1 {
            for x in -radius - 1..=radius + 1 {
                let dist = ((x * x + y * y) as f32).sqrt();
                let diff = (dist - r).abs();
                if diff < 1.5 {
                    self.plot_coverage(cx + x, cy + y, color, (1.0 - diff).clamp(0.0, 1.0));
                }
            }
        }
    }

    fn fill_circle_hard(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba8) {
        for y in -radius..=radius {
            for x in -radius..=radius {
                if x * x + y * y <= radius * radius {
                    self.set_pixel(cx + x, cy + y, color);
                }
            }
        }
    }

    fn fill_circle_aa(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba8) {
        let r = radius as f32;
        for y in -radius - 1..=radius + 1 {
            for x in -radius - 1..=radius + 1 {
                let dist = ((x * x + y * y) as f32).sqrt();
                if dist <= r - 1.0 {
                    self.blend_pixel(cx + x, cy + y, color);
                } else if dist <= r + 1.0 {
                    let coverage = ((r + 1.0 - dist) / 2.0).clamp(0.0, 1.0);
                    self.plot_coverage(cx + x, cy + y, color, coverage);
                }
            }
        }
    }

    /// Outline a rounded rectangle; `radius` is clamped to half the short edge.
    pub fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: Rgba8) {
        if w <= 0 || h <= 0 {
            return;
        }
        let radius = radius.clamp(0, w.min(h) / 2);
        if radius == 0 {
            self.draw_rect(x, y, w, h, color);
            return;
        }
        self.draw_line(x + radius, y, x + w - radius, y, color);
        self.draw_line(x + radius, y + h - 1, x + w - radius, y + h - 1, color);
        self.draw_line(x, y + radius, x, y + h - radius, color);
        self.draw_line(x + w - 1, y + radius, x + w - 1, y + h - radius, color);

        // Corner quadrants, midpoint walk.
        let mut quadrant = |s: &mut Self, ccx: i32, ccy: i32, q: u8| {
            let mut qx = 0;
            let mut qy = radius;
            let mut d = 3 - 2 * radius;
            while qy >= qx {
                for (px, py) in [(qx, qy), (qy, qx)] {
                    match q {
                        0 => s.blend_pixel(ccx + px, ccy - py, color),
                        1 => s.blend_pixel(ccx + px, ccy + py, color),
                        2 => s.blend_pixel(ccx - px, ccy + py, color),
                        _ => s.blend_pixel(ccx - px, ccy - py, color),
                    }
                }
                if d < 0 {
                    d += 4 * qx + 6;
                } else {
                    d += 4 * (qx - qy) + 10;
                    qy -= 1;
                }
                qx += 1;
            }
        };
        quadrant(self, x + w - radius - 1, y + radius, 0);
        quadrant(self, x + w - radius - 1, y + h - radius - 1, 1);
        quadrant(self, x + radius, y + h - radius - 1, 2);
        quadrant(self, x + radius, y + radius, 3);
    }

    /// Fill a rounded rectangle; `radius` is clamped to half the short edge.
    pub fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: Rgba8) {
        if w <= 0 || h <= 0 {
            return;
        }
        let radius = radius.clamp(0, w.min(h) / 2);
        if radius == 0 {
            self.fill_rect(x, y, w, h, color);
            return;
        }
        // Rounded-box SDF keeps corner and edge coverage consistent
        // without overdraw.
        let r = radius as f32;
        let half_w = w as f32 * 0.5;
        let half_h = h as f32 * 0.5;
        let cx = x as f32 + half_w;
        let cy = y as f32 + half_h;
        let box_w = half_w - r;
        let box_h = half_h - r;
        let aa = self.anti_alias();

        let min_x = (x - 1).max(0);
        let max_x = (x + w + 1).min(self.width() as i32);
        let min_y = (y - 1).max(0);
        let max_y = (y + h + 1).min(self.height() as i32);

        for py in min_y..max_y {
            for px in min_x..max_x {
                let rel_x = (px as f32 - cx + 0.5).abs();
                let rel_y = (py as f32 - cy + 0.5).abs();
                let qx = rel_x - box_w;
                let qy = rel_y - box_h;
                let d = qx.max(qy).min(0.0) + (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt() - r;
                if d <= -0.5 {
                    self.blend_pixel(px, py, color);
                } else if aa && d < 0.5 {
                    self.plot_coverage(px, py, color, (0.5 - d).clamp(0.0, 1.0));
                }
            }
        }
    }

    /// Fill a capsule (rounded rect with maximal corner radius).
    pub fn fill_pill(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba8) {
        self.fill_round_rect(x, y, w, h, w.min(h) / 2, color);
    }

    /// Outline a capsule.
    pub fn draw_pill(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba8) {
        self.draw_round_rect(x, y, w, h, w.min(h) / 2, color);
    }

    /// Fill a squircle (superellipse `|x/a|^4 + |y/b|^4 <= 1`).
    pub fn fill_squircle(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba8) {
        if w <= 0 || h <= 0 {
            return;
        }
        let a = w as f32 * 0.5;
        let b = h as f32 * 0.5;
        let cx = x as f32 + a;
        let cy = y as f32 + b;
        if self.anti_alias() {
            let min_x = (x - 1).max(0);
            let max_x = (x + w + 1).min(self.width() as i32);
            let min_y = (y - 1).max(0);
            let max_y = (y + h + 1).min(self.height() as i32);
            for py in min_y..max_y {
                for px in min_x..max_x {
                    let d = squircle_distance(px, py, cx, cy, a, b);
                    if d <= -0.5 {
                        self.blend_pixel(px, py, color);
                    } else if d < 0.5 {
                        self.plot_coverage(px, py, color, (0.5 - d).clamp(0.0, 1.0));
                    }
                }
            }
        } else {
            // Scanline against the implicit superellipse.
            let min_y = y.max(0);
            let max_y = (y + h).min(self.height() as i32);
            let min_x = x.max(0);
            let max_x = (x + w).min(self.width() as i32);
            for py in min_y..max_y {
                let dy = (py as f32 - cy + 0.5).abs();
                if dy >= b {
                    continue;
                }
                let y_term = (dy / b).powi(4).min(1.0);
                let dx = a * (1.0 - y_term).powf(0.25);
                let start = ((cx - dx).floor() as i32).clamp(min_x, max_x);
                let end = ((cx + dx).ceil() as i32).clamp(min_x, max_x);
                for px in start..end {
                    self.set_pixel(px, py, color);
                }
            }
        }
    }

    /// Outline a squircle.
    pub fn draw_squircle(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba8) {
        if w <= 0 || h <= 0 {
            return;
        }
        let a = w as f32 * 0.5;
        let b = h as f32 * 0.5;
        let cx = x as f32 + a;
        let cy = y as f32 + b;
        for py in (y - 1)..(y + h + 1) {
            for px in (x - 1)..(x + w + 1) {
                let d = squircle_distance(px, py, cx, cy, a, b).abs();
                if d < 1.0 {
                    self.plot_coverage(px, py, color, 1.0 - d);
                }
            }
        }
    }
}

/// Approximate signed distance to the superellipse boundary, in pixels.
fn squircle_distance(px: i32, py: i32, cx: f32, cy: f32, a: f32, b: f32) -> f32 {
    let dx = (px as f32 - cx + 0.5).abs();
    let dy = (py as f32 - cy + 0.5).abs();
    let x_term = dx / a;
    let y_term = dy / b;
    let p = x_term.powi(4) + y_term.powi(4);
    // First-order distance estimate: (P - 1) / |grad P|.
    let gx = 4.0 * x_term.powi(3) / a;
    let gy = 4.0 * y_term.powi(3) / b;
    let grad_len = (gx * gx + gy * gy).sqrt();
    (p - 1.0) / (grad_len + 1e-6)
}

#[cfg(test)]
#[path = "../../tests/unit/surface/draw.rs"]
mod tests;
