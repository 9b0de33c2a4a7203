/// Draw color with normalized channels (0.0 to 1.0).
/// Gets scaled to 0-255 right before the blit, so the atlas pixels
/// (white on transparent) come out tinted by a straight multiply.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let scale = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
        [scale(self.r), scale(self.g), scale(self.b)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_to_bytes() {
        assert_eq!(Color::WHITE.to_rgb8(), [255, 255, 255]);
        assert_eq!(Color::new(0.0, 0.5, 1.0).to_rgb8(), [0, 127, 255]);
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(Color::new(-1.0, 2.0, 0.0).to_rgb8(), [0, 255, 0]);
    }
}
