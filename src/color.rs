// Simple color struct, created from an unsigned 32 representing RRGGBBAA
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    /// Css string for the 2d context, with `alpha` replacing our own
    /// alpha channel.
    pub fn css_with_alpha(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn from_u32_unpacks_channels() {
        let color = Color::from_u32(0x00D4FFFF);
        assert_eq!(color.r, 0);
        assert_eq!(color.g, 212);
        assert_eq!(color.b, 255);
        assert_eq!(color.a, 255);
    }

    #[test]
    fn css_uses_the_given_alpha() {
        let color = Color::from_u32(0x00D4FFFF);
        assert_eq!(color.css_with_alpha(0.5), "rgba(0, 212, 255, 0.5)");
    }
}
