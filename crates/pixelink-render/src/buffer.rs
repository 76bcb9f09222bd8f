//! Off-screen pixel buffers.

use crate::renderer::{RenderResult, RendererError};
use pixelink_core::fill::PixelSurface;
use pixelink_core::geometry::{PixelRect, PixelSize};
use pixelink_core::shapes::Rgb;
use tiny_skia::{FillRule, Mask, PathBuilder, Pixmap, Transform};

/// The display frame handed to the host. Same layout as the canvas buffer.
pub type Frame = CanvasBuffer;

/// An opaque RGB pixel surface backed by a tiny-skia pixmap.
///
/// An optional clip rectangle restricts both reads and writes through
/// [`PixelSurface`] as well as every tiny-skia draw made via [`Self::draw`].
#[derive(Clone)]
pub struct CanvasBuffer {
    pixmap: Pixmap,
    clip: Option<PixelRect>,
}

impl std::fmt::Debug for CanvasBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasBuffer")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("clip", &self.clip)
            .finish()
    }
}

impl CanvasBuffer {
    /// Allocate a buffer. Fails for a zero-size canvas or when memory runs out.
    pub fn new(size: PixelSize) -> RenderResult<Self> {
        let pixmap = Pixmap::new(size.width, size.height).ok_or_else(|| {
            RendererError::Allocation(format!("cannot allocate {}x{} buffer", size.width, size.height))
        })?;
        Ok(Self { pixmap, clip: None })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width(), self.height())
    }

    /// Fill the whole buffer, ignoring the clip.
    pub fn clear(&mut self, color: Rgb) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255));
    }

    pub fn clip(&self) -> Option<PixelRect> {
        self.clip
    }

    /// Install or remove the clip rectangle.
    pub fn set_clip(&mut self, clip: Option<PixelRect>) {
        self.clip = clip;
    }

    /// Run `f` with `clip` installed, restoring the previous clip afterwards.
    pub fn with_clip<R>(&mut self, clip: Option<PixelRect>, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = std::mem::replace(&mut self.clip, clip);
        let result = f(self);
        self.clip = previous;
        result
    }

    /// Pixel color regardless of the clip.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.offset_of(x, y).map(|i| {
            let data = self.pixmap.data();
            Rgb::new(data[i], data[i + 1], data[i + 2])
        })
    }

    fn offset_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return None;
        }
        Some((y as usize * self.width() as usize + x as usize) * 4)
    }

    fn clip_allows(&self, x: i32, y: i32) -> bool {
        self.clip.is_none_or(|c| c.contains_pixel(x, y))
    }

    /// Draw onto the pixmap through the current clip.
    ///
    /// A clip that covers no pixels suppresses the draw entirely.
    pub fn draw(&mut self, f: impl FnOnce(&mut Pixmap, Option<&Mask>)) {
        match self.clip {
            None => f(&mut self.pixmap, None),
            Some(clip) => {
                let Some(mask) = clip_mask(self.size(), clip) else {
                    return;
                };
                f(&mut self.pixmap, Some(&mask));
            }
        }
    }

    /// Overwrite this buffer with another of the same size.
    pub fn copy_from(&mut self, other: &CanvasBuffer) {
        if self.size() == other.size() {
            self.pixmap.data_mut().copy_from_slice(other.pixmap.data());
        } else {
            self.pixmap = other.pixmap.clone();
        }
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Raw RGBA bytes, row-major, fully opaque.
    pub fn rgba_data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// RGB bytes, row-major.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixmap
            .data()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    /// Number of pixels with exactly this color.
    pub fn count_color(&self, color: Rgb) -> usize {
        self.pixmap
            .data()
            .chunks_exact(4)
            .filter(|px| px[0] == color.r && px[1] == color.g && px[2] == color.b)
            .count()
    }

    pub(crate) fn put(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.offset_of(x, y) {
            self.pixmap.data_mut()[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }
}

impl PixelSurface for CanvasBuffer {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        if !self.clip_allows(x, y) {
            return None;
        }
        self.pixel(x, y)
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if self.clip_allows(x, y) {
            self.put(x, y, color);
        }
    }
}

/// Mask covering `clip` on a surface of `size`.
fn clip_mask(size: PixelSize, clip: PixelRect) -> Option<Mask> {
    let visible = clip.intersect(size.bounds())?;
    let rect = tiny_skia::Rect::from_ltrb(
        visible.left as f32,
        visible.top as f32,
        visible.right as f32,
        visible.bottom as f32,
    )?;
    let mut mask = Mask::new(size.width, size.height)?;
    mask.fill_path(
        &PathBuilder::from_rect(rect),
        FillRule::Winding,
        false,
        Transform::identity(),
    );
    Some(mask)
}
