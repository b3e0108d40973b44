// Color handling - packed RGBA8888 values
//
// Colors are stored as a single u32 with red in the most significant byte:
// bits 31-24 red, 23-16 green, 15-8 blue, 7-0 alpha.

/// A color split into its four 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Decode a packed RGBA8888 value
    ///
    /// # Arguments
    /// * `packed` - 32-bit color (0xRRGGBBAA)
    #[inline]
    pub fn from_packed(packed: u32) -> Self {
        Self {
            r: ((packed >> 24) & 0xFF) as u8,
            g: ((packed >> 16) & 0xFF) as u8,
            b: ((packed >> 8) & 0xFF) as u8,
            a: (packed & 0xFF) as u8,
        }
    }

    /// Pack the channels back into 0xRRGGBBAA
    #[inline]
    pub fn to_packed(self) -> u32 {
        u32::from_be_bytes(self.to_bytes())
    }

    /// Channels in the byte order expected by the pixels frame buffer
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<u32> for Rgba {
    fn from(packed: u32) -> Self {
        Self::from_packed(packed)
    }
}

/// Parse a color written as `#RRGGBBAA`, `0xRRGGBBAA` or plain hex digits
///
/// Six digit values are treated as opaque (`RRGGBB` gets alpha 0xFF).
pub fn parse_color(text: &str) -> Result<u32, String> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Invalid color '{}': not a hex number", text));
    }
    let value = u32::from_str_radix(digits, 16)
        .map_err(|e| format!("Invalid color '{}': {}", text, e))?;

    match digits.len() {
        8 => Ok(value),
        6 => Ok((value << 8) | 0xFF),
        _ => Err(format!(
            "Invalid color '{}': expected 6 or 8 hex digits",
            text
        )),
    }
}
