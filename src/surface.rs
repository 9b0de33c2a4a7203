use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::{atlas::Rect, color::Color};

/// Anything glyphs can be copied onto. [Surface] implements this for
/// software compositing; a renderer-backed target can implement it to
/// turn the same draw loop into texture copies.
pub trait BlitTarget {
    fn blit(&mut self, src: &Surface, src_rect: Rect, dst_x: i32, dst_y: i32, color: Color);
}

/// A plain RGBA8 pixel buffer.
pub struct Surface {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let img = image::open(&path)
            .with_context(|| format!("loading image {:?}", path.as_ref()))?
            .to_rgba8();
        Ok(Self {
            width: img.width(),
            height: img.height(),
            data: img.into_raw(),
        })
    }

    pub fn from_memory(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|err| anyhow!(err))?
            .to_rgba8();
        Ok(Self {
            width: img.width(),
            height: img.height(),
            data: img.into_raw(),
        })
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        image::save_buffer(
            &path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
        .with_context(|| format!("writing image {:?}", path.as_ref()))
    }

    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    pub fn put(&mut self, x: u32, y: u32, pixel: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.data[i..i + 4].copy_from_slice(&pixel);
    }
}

// (a * b) / 255 with rounding
fn mul(a: u8, b: u8) -> u8 {
    ((a as u16 * b as u16 + 127) / 255) as u8
}

impl BlitTarget for Surface {
    /// Source-over blend of `src_rect` onto this surface, tinting the source
    /// by `color` on the way. Pixels falling outside the destination are
    /// clipped rather than treated as an error.
    fn blit(&mut self, src: &Surface, src_rect: Rect, dst_x: i32, dst_y: i32, color: Color) {
        let [mr, mg, mb] = color.to_rgb8();
        for sy in 0..src_rect.h {
            for sx in 0..src_rect.w {
                let dx = dst_x + sx;
                let dy = dst_y + sy;
                if dx < 0 || dy < 0 || dx >= self.width as i32 || dy >= self.height as i32 {
                    continue;
                }
                let Some(s) = src.get((src_rect.x + sx) as u32, (src_rect.y + sy) as u32) else {
                    continue;
                };
                let sa = s[3];
                if sa == 0 {
                    continue;
                }
                let d = self.get(dx as u32, dy as u32).unwrap_or([0; 4]);
                let tinted = [mul(s[0], mr), mul(s[1], mg), mul(s[2], mb)];
                let na = 255 - sa;
                let out = [
                    mul(tinted[0], sa) + mul(d[0], na),
                    mul(tinted[1], sa) + mul(d[1], na),
                    mul(tinted[2], sa) + mul(d[2], na),
                    sa + mul(d[3], na),
                ];
                self.put(dx as u32, dy as u32, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_square(size: u32) -> Surface {
        let mut s = Surface::new(size, size);
        for y in 0..size {
            for x in 0..size {
                s.put(x, y, [255, 255, 255, 255]);
            }
        }
        s
    }

    #[test]
    fn new_surface_is_transparent() {
        let s = Surface::new(4, 2);
        assert_eq!(s.data.len(), 4 * 2 * 4);
        assert!(s.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn blit_applies_color_modulation() {
        let src = white_square(2);
        let mut dst = Surface::new(4, 4);
        let rect = Rect { x: 0, y: 0, w: 2, h: 2 };
        dst.blit(&src, rect, 1, 1, Color::new(0.0, 0.5, 1.0));
        assert_eq!(dst.get(1, 1), Some([0, 127, 255, 255]));
        // outside the blitted rect stays untouched
        assert_eq!(dst.get(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn blit_clips_at_edges() {
        let src = white_square(3);
        let mut dst = Surface::new(2, 2);
        let rect = Rect { x: 0, y: 0, w: 3, h: 3 };
        // partially off every edge, must not panic
        dst.blit(&src, rect, -1, -1, Color::WHITE);
        dst.blit(&src, rect, 1, 1, Color::WHITE);
        assert_eq!(dst.get(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(dst.get(1, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn blit_skips_transparent_source_pixels() {
        let src = Surface::new(2, 2);
        let mut dst = Surface::new(2, 2);
        dst.put(0, 0, [9, 9, 9, 255]);
        let rect = Rect { x: 0, y: 0, w: 2, h: 2 };
        dst.blit(&src, rect, 0, 0, Color::WHITE);
        assert_eq!(dst.get(0, 0), Some([9, 9, 9, 255]));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Surface::from_path("no/such/image.png").is_err());
    }
}
