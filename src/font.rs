use std::{collections::HashMap, path::Path};

use anyhow::{anyhow, Result};
use log::warn;

use crate::{
    atlas::{Atlas, Rect},
    color::Color,
    surface::{BlitTarget, Surface},
};

/// Bitmap font over a glyph [Atlas].
///
/// The character set is an ordered sequence of unique characters; a
/// character's position in it is its cell index in the atlas grid and its
/// index into the advance-width table. Immutable once constructed - color
/// is a per-draw parameter, so rendering only ever needs `&self`.
pub struct Font {
    pub atlas: Atlas,
    chars: Vec<char>,
    widths: Vec<u32>,
    index: HashMap<char, usize>,
    /// extra horizontal padding after each character
    pub letter_pad: u32,
    /// extra vertical padding between lines
    pub line_pad: u32,
}

impl Font {
    pub fn new(atlas: Atlas, charset: &str, widths: Vec<u32>) -> Result<Self> {
        let chars: Vec<char> = charset.chars().collect();
        if chars.len() != widths.len() {
            return Err(anyhow!(
                "charset has {} characters but the width table has {} entries",
                chars.len(),
                widths.len()
            ));
        }
        let mut index = HashMap::new();
        for (i, &c) in chars.iter().enumerate() {
            if index.insert(c, i).is_some() {
                // a duplicate would leave one width table entry unreachable
                return Err(anyhow!("duplicate character {:?} in charset", c));
            }
        }
        Ok(Self {
            atlas,
            chars,
            widths,
            index,
            letter_pad: 1,
            line_pad: 5,
        })
    }

    pub fn from_path<P: AsRef<Path>>(
        path: P,
        grid_width: usize,
        cell: (u32, u32),
        charset: &str,
        widths: Vec<u32>,
    ) -> Result<Self> {
        Self::new(Atlas::from_path(path, grid_width, cell)?, charset, widths)
    }

    /// The bundled font: 10 cells per row, 5x11 cells, 95 printable
    /// Latin characters. The atlas bytes are compiled in, so this only
    /// fails if the embedded image is corrupt.
    pub fn default_font() -> Result<Self> {
        let atlas = Atlas::from_memory(DEFAULT_ATLAS, DEFAULT_GRID_WIDTH, DEFAULT_CELL)?;
        Self::new(atlas, DEFAULT_CHARSET, DEFAULT_WIDTHS.to_vec())
    }

    pub fn with_letter_pad(mut self, pad: u32) -> Self {
        self.letter_pad = pad;
        self
    }

    pub fn with_line_pad(mut self, pad: u32) -> Self {
        self.line_pad = pad;
        self
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Advance width for a character, if the font knows it.
    pub fn advance(&self, c: char) -> Option<u32> {
        self.index.get(&c).map(|&i| self.widths[i])
    }

    /// Source rect for a character's glyph in atlas pixel space. Unknown
    /// characters get a warning and the zero rect; callers skip zero-area
    /// rects instead of failing the whole string.
    pub fn glyph_rect(&self, c: char) -> Rect {
        let Some(&i) = self.index.get(&c) else {
            warn!("character {:?} not in font charset", c);
            return Rect::ZERO;
        };
        self.atlas.cell_rect(i, self.widths[i])
    }

    /// Rendered size of `text` in pixels: widest line by total line height.
    /// Unknown characters take no space here, matching the draw loop, so
    /// the measurement always agrees with what rendering produces.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let mut max_width = 0;
        let mut lines = 0;
        for line in text.split('\n') {
            lines += 1;
            let width = line
                .chars()
                .filter_map(|c| self.advance(c))
                .map(|w| w + self.letter_pad)
                .sum();
            max_width = max_width.max(width);
        }
        let height = lines * self.atlas.cell_h + (lines - 1) * self.line_pad;
        (max_width, height)
    }

    /// Immediate mode: copy glyphs onto `target` starting at (x, y),
    /// tinted by `color`. Newlines reset the cursor to the starting x and
    /// drop it one line; unknown characters are skipped without advancing.
    /// Best effort - this never fails, it renders what it can.
    pub fn draw<T: BlitTarget>(&self, target: &mut T, x: i32, y: i32, text: &str, color: Color) {
        let mut cursor_x = x;
        let mut cursor_y = y;
        for c in text.chars() {
            if c == '\n' {
                cursor_x = x;
                cursor_y += (self.atlas.cell_h + self.line_pad) as i32;
                continue;
            }
            let src = self.glyph_rect(c);
            if src.is_empty() {
                // unknown character, already logged by glyph_rect
                continue;
            }
            target.blit(&self.atlas.surface, src, cursor_x, cursor_y, color);
            cursor_x += (src.w as u32 + self.letter_pad) as i32;
        }
    }

    /// Surface mode: render `text` onto a fresh transparent surface sized
    /// by [Self::measure] and hand it back for the caller to place or
    /// composite. The height covers every line of a multi-line string.
    pub fn render(&self, text: &str, color: Color) -> Surface {
        let (w, h) = self.measure(text);
        let mut surface = Surface::new(w, h);
        self.draw(&mut surface, 0, 0, text, color);
        surface
    }
}

const DEFAULT_GRID_WIDTH: usize = 10;
// most glyphs are 5x7, some dip below the baseline into the 11px cell
const DEFAULT_CELL: (u32, u32) = (5, 11);

static DEFAULT_ATLAS: &[u8] = include_bytes!("../assets/font_atlas.png");

const DEFAULT_CHARSET: &str =
    " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[]\\^_`abcdefghijklmnopqrstuvwxyz{}|~";

#[rustfmt::skip]
const DEFAULT_WIDTHS: [u32; 95] = [
    // space through /
    3, 1, 3, 5, 5, 5, 5, 1, 2, 2, 3, 3, 1, 3, 1, 5,
    // 0-9
    5, 3, 5, 5, 5, 5, 5, 5, 5, 5,
    // : through @
    1, 1, 3, 3, 3, 4, 5,
    // A-Z
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 4, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    // [ ] \ ^ _ `
    2, 2, 5, 3, 3, 2,
    // a-z
    5, 5, 4, 5, 5, 4, 5, 5, 1, 4, 4, 3, 5, 4, 4, 5, 5, 4, 4, 4, 5, 3, 5, 3, 4, 4,
    // { } | ~
    3, 3, 1, 4,
];
