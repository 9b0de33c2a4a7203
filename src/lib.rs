pub mod atlas;
pub mod color;
pub mod font;
pub mod surface;

// keep it simple:
// - glyphs are pre-rasterized into a fixed-grid atlas image
// - a font is that atlas plus an ordered charset and a matching advance
//   width table (charset position == atlas cell == width table index)
// - drawing is a cursor walk blitting one source rect per character,
//   either straight onto a caller's surface or onto a fresh one we return
