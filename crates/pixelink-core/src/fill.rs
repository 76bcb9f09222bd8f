//! Seeded 4-connected flood fill.

use crate::geometry::PixelPoint;
use crate::shapes::Rgb;
use std::collections::VecDeque;

/// A readable and writable grid of RGB pixels.
///
/// Implementations that support clipping return `None` from `get_pixel` for
/// pixels outside the clip and ignore writes there.
pub trait PixelSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Color at `(x, y)`, `None` when out of bounds or clipped.
    fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb>;
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb);
}

/// Replace the 4-connected region of the seed's color with `new_color`.
///
/// Returns the number of pixels written. Nothing happens when the seed is
/// unreadable or already has `new_color`.
pub fn flood_fill<S: PixelSurface + ?Sized>(surface: &mut S, seed: PixelPoint, new_color: Rgb) -> usize {
    let Some(target) = surface.get_pixel(seed.x, seed.y) else {
        return 0;
    };
    if target == new_color {
        return 0;
    }

    let mut written = 0;
    let mut queue = VecDeque::new();
    queue.push_back(seed);

    while let Some(p) = queue.pop_front() {
        if surface.get_pixel(p.x, p.y) != Some(target) {
            continue;
        }
        surface.set_pixel(p.x, p.y, new_color);
        written += 1;

        queue.push_back(p.offset(1, 0));
        queue.push_back(p.offset(-1, 0));
        queue.push_back(p.offset(0, 1));
        queue.push_back(p.offset(0, -1));
    }

    log::debug!("flood fill at ({}, {}) wrote {} pixels", seed.x, seed.y, written);
    written
}
