use std::path::Path;

use anyhow::{anyhow, Result};

use crate::surface::Surface;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const ZERO: Self = Self { x: 0, y: 0, w: 0, h: 0 };

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// A glyph sheet: one image holding every glyph in a regular grid of
/// `cell_w` x `cell_h` cells, row-major from the top left, with a one pixel
/// separator between cells on both axes. The layout is baked into the image
/// at authoring time, so unlike a runtime packer there is nothing to place -
/// a cell index maps straight to a rect.
pub struct Atlas {
    pub surface: Surface,
    pub grid_width: usize,
    pub cell_w: u32,
    pub cell_h: u32,
}

impl Atlas {
    pub fn new(surface: Surface, grid_width: usize, cell: (u32, u32)) -> Result<Self> {
        if grid_width == 0 {
            return Err(anyhow!("atlas grid width must be at least one cell"));
        }
        Ok(Self {
            surface,
            grid_width,
            cell_w: cell.0,
            cell_h: cell.1,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P, grid_width: usize, cell: (u32, u32)) -> Result<Self> {
        let surface = Surface::from_path(path)?;
        log::debug!("loaded {}x{} atlas", surface.width, surface.height);
        Self::new(surface, grid_width, cell)
    }

    pub fn from_memory(bytes: &[u8], grid_width: usize, cell: (u32, u32)) -> Result<Self> {
        Self::new(Surface::from_memory(bytes)?, grid_width, cell)
    }

    /// Rect covering the glyph in cell `index`, cropped to the glyph's own
    /// width. The +1 skips the separator pixel between cells.
    pub fn cell_rect(&self, index: usize, glyph_w: u32) -> Rect {
        Rect {
            x: ((index % self.grid_width) as u32 * (self.cell_w + 1)) as i32,
            y: ((index / self.grid_width) as u32 * (self.cell_h + 1)) as i32,
            w: glyph_w as i32,
            h: self.cell_h as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas() -> Atlas {
        Atlas::new(Surface::new(60, 120), 10, (5, 11)).unwrap()
    }

    #[test]
    fn first_row_cells() {
        let a = atlas();
        assert_eq!(a.cell_rect(0, 3), Rect { x: 0, y: 0, w: 3, h: 11 });
        assert_eq!(a.cell_rect(1, 5), Rect { x: 6, y: 0, w: 5, h: 11 });
        assert_eq!(a.cell_rect(9, 5), Rect { x: 54, y: 0, w: 5, h: 11 });
    }

    #[test]
    fn wraps_to_next_row() {
        let a = atlas();
        assert_eq!(a.cell_rect(10, 5), Rect { x: 0, y: 12, w: 5, h: 11 });
        assert_eq!(a.cell_rect(23, 4), Rect { x: 18, y: 24, w: 4, h: 11 });
    }

    #[test]
    fn rejects_zero_grid_width() {
        assert!(Atlas::new(Surface::new(1, 1), 0, (5, 11)).is_err());
    }
}
