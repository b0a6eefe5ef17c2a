//! CPU render surface shared by games, transitions, and the host loop.

use glam::{Affine2, Vec2};
use image::{Rgba, RgbaImage};

/// RGBA color with straight (non-premultiplied) alpha, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Same color with its alpha multiplied by `factor`.
    pub fn with_alpha(self, factor: f32) -> Self {
        Self {
            a: self.a * factor.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([to_u8(c.r), to_u8(c.g), to_u8(c.b), to_u8(c.a)])
    }
}

/// An RGBA8 pixel buffer.
///
/// Games draw into an offscreen canvas sized by their layout; the host loop
/// then composes it onto a window-sized canvas for presentation.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Reallocate to a new size. Contents are cleared when the size changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.size() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.fill(Color::TRANSPARENT);
    }

    /// Overwrite every pixel with `color`, no blending.
    pub fn fill(&mut self, color: Color) {
        let px: Rgba<u8> = color.into();
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    /// Blend a rectangle over the canvas. Parts outside the canvas are clipped.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x as i64 + width as i64).clamp(0, self.width() as i64) as u32;
        let y1 = (y as i64 + height as i64).clamp(0, self.height() as i64) as u32;

        for py in y0..y1 {
            for px in x0..x1 {
                let dst = self.image.get_pixel_mut(px, py);
                *dst = blend(*dst, color);
            }
        }
    }

    /// Blend `color` over the whole canvas at the given opacity.
    pub fn overlay(&mut self, color: Color, alpha: f32) {
        let color = color.with_alpha(alpha);
        if color.a <= 0.0 {
            return;
        }
        for p in self.image.pixels_mut() {
            *p = blend(*p, color);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Raw RGBA8 bytes, row-major, suitable for texture upload.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }
}

/// Source-over blend of `color` onto `dst`.
fn blend(dst: Rgba<u8>, color: Color) -> Rgba<u8> {
    let a = color.a.clamp(0.0, 1.0);
    let inv = 1.0 - a;
    let mix = |d: u8, s: f32| {
        let d = d as f32 / 255.0;
        ((s.clamp(0.0, 1.0) * a + d * inv) * 255.0).round() as u8
    };
    let out_a = a + (dst[3] as f32 / 255.0) * inv;
    Rgba([
        mix(dst[0], color.r),
        mix(dst[1], color.g),
        mix(dst[2], color.b),
        (out_a.clamp(0.0, 1.0) * 255.0).round() as u8,
    ])
}

/// Plain composition of the offscreen frame onto the final screen.
///
/// The screen is cleared, then each screen pixel samples the offscreen pixel
/// it maps back to through `transform` (nearest neighbour). An identity
/// transform is a straight copy.
pub fn draw_final_screen_default(screen: &mut Canvas, offscreen: &Canvas, transform: Affine2) {
    screen.clear();

    if transform.abs_diff_eq(Affine2::IDENTITY, 1e-6) {
        image::imageops::replace(&mut screen.image, &offscreen.image, 0, 0);
        return;
    }

    if transform.matrix2.determinant().abs() <= f32::EPSILON {
        return;
    }

    let inverse = transform.inverse();
    let (src_w, src_h) = offscreen.size();
    let (dst_w, dst_h) = screen.size();

    for y in 0..dst_h {
        for x in 0..dst_w {
            let src = inverse.transform_point2(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
            if src.x < 0.0 || src.y < 0.0 {
                continue;
            }
            let (sx, sy) = (src.x as u32, src.y as u32);
            if sx < src_w && sy < src_h {
                screen
                    .image
                    .put_pixel(x, y, *offscreen.image.get_pixel(sx, sy));
            }
        }
    }
}

/// Uniform scale that fits `src` inside `dst`, centered.
pub fn fit_transform(src: (u32, u32), dst: (u32, u32)) -> Affine2 {
    let (sw, sh) = (src.0.max(1) as f32, src.1.max(1) as f32);
    let (dw, dh) = (dst.0 as f32, dst.1 as f32);
    let scale = (dw / sw).min(dh / sh);
    let offset = Vec2::new((dw - sw * scale) * 0.5, (dh - sh * scale) * 0.5);
    Affine2::from_scale_angle_translation(Vec2::splat(scale), 0.0, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_converts_to_bytes() {
        let px: Rgba<u8> = Color::rgba(1.0, 0.5, 0.0, 2.0).into();
        assert_eq!(px, Rgba([255, 128, 0, 255]));
    }

    #[test]
    fn fill_rect_clips_to_canvas() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(-2, 2, 4, 10, Color::WHITE);

        assert_eq!(canvas.pixel(0, 2), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(canvas.pixel(1, 3), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(canvas.pixel(2, 2), Some(Rgba([0, 0, 0, 0])));
        assert_eq!(canvas.pixel(0, 1), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn overlay_blends_toward_color() {
        let mut canvas = Canvas::new(1, 1);
        canvas.fill(Color::WHITE);
        canvas.overlay(Color::BLACK, 0.5);
        assert_eq!(canvas.pixel(0, 0), Some(Rgba([128, 128, 128, 255])));

        canvas.overlay(Color::BLACK, 1.0);
        assert_eq!(canvas.pixel(0, 0), Some(Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn resize_keeps_contents_when_unchanged() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill(Color::WHITE);
        canvas.resize(2, 2);
        assert_eq!(canvas.pixel(1, 1), Some(Rgba([255, 255, 255, 255])));

        canvas.resize(3, 1);
        assert_eq!(canvas.size(), (3, 1));
        assert_eq!(canvas.pixel(0, 0), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn default_final_screen_copies_with_identity() {
        let mut offscreen = Canvas::new(2, 2);
        offscreen.fill(Color::WHITE);
        let mut screen = Canvas::new(3, 3);
        screen.fill(Color::BLACK);

        draw_final_screen_default(&mut screen, &offscreen, Affine2::IDENTITY);

        assert_eq!(screen.pixel(1, 1), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(screen.pixel(2, 2), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn default_final_screen_scales_through_transform() {
        let mut offscreen = Canvas::new(2, 1);
        offscreen.fill_rect(1, 0, 1, 1, Color::WHITE);
        let mut screen = Canvas::new(4, 2);

        draw_final_screen_default(&mut screen, &offscreen, Affine2::from_scale(Vec2::splat(2.0)));

        assert_eq!(screen.pixel(0, 0), Some(Rgba([0, 0, 0, 0])));
        assert_eq!(screen.pixel(2, 1), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(screen.pixel(3, 0), Some(Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn fit_transform_letterboxes() {
        let t = fit_transform((320, 240), (800, 400));
        let origin = t.transform_point2(Vec2::ZERO);
        let corner = t.transform_point2(Vec2::new(320.0, 240.0));
        assert!((origin.x - 133.333).abs() < 0.01);
        assert!(origin.y.abs() < 0.001);
        assert!((corner.y - 400.0).abs() < 0.001);
    }
}
