//! Typography - Font Sizes

/// Typography constants
pub struct Typography;

impl Typography {
    // Font sizes
    pub const TEXT_XS: f32 = 12.0;
    pub const TEXT_SM: f32 = 14.0;
    pub const TEXT_BASE: f32 = 16.0;
    pub const TEXT_XL: f32 = 20.0;

    /// Average glyph advance relative to the font size, used where text
    /// width must be estimated before layout (chip fitting).
    pub const AVG_CHAR_ADVANCE: f32 = 0.6;

    /// Estimated width of `text` rendered at `font_size`
    pub fn estimate_width(text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * Self::AVG_CHAR_ADVANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_scales_with_length_and_size() {
        let short = Typography::estimate_width("ab", Typography::TEXT_SM);
        let long = Typography::estimate_width("abcd", Typography::TEXT_SM);
        assert!(long > short);
        let big = Typography::estimate_width("ab", Typography::TEXT_XL);
        assert!(big > short);
    }
}
