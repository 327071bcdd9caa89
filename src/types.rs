//! Core types for folio-tui.
//!
//! Colors and text attributes that flow through the page builder and the
//! terminal writer. Everything above this layer speaks `Rgba` + `Attr`.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Special values: r=-1 means "terminal default" (let terminal pick),
/// r=-2 means "ANSI palette index" (stored in g).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);

    /// Create an ANSI palette color (0-255).
    ///
    /// - 0-7: Standard colors
    /// - 8-15: Bright colors
    /// - 16-231: 6x6x6 RGB cube
    /// - 232-255: Grayscale
    pub const fn ansi(index: u8) -> Self {
        Self {
            r: -2,
            g: index as i16,
            b: 0,
            a: 255,
        }
    }

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Check if this is an ANSI palette color.
    #[inline]
    pub const fn is_ansi(&self) -> bool {
        self.r == -2
    }

    /// Get ANSI palette index (only valid if is_ansi() returns true).
    #[inline]
    pub const fn ansi_index(&self) -> u8 {
        self.g as u8
    }

    /// Create color from an RGB integer (0xRRGGBB).
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Parse hex color string (#RGB, #RRGGBB, #RRGGBBAA).
    ///
    /// Returns None for invalid format.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            // #RGB -> expand to #RRGGBB
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            // #RRGGBB
            6 => {
                let r = hex_byte(bytes, 0)?;
                let g = hex_byte(bytes, 2)?;
                let b = hex_byte(bytes, 4)?;
                Some(Self::rgb(r, g, b))
            }
            // #RRGGBBAA
            8 => {
                let r = hex_byte(bytes, 0)?;
                let g = hex_byte(bytes, 2)?;
                let b = hex_byte(bytes, 4)?;
                let a = hex_byte(bytes, 6)?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Linear interpolation between two colors.
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self {
            r: ((a.r as f32 * inv_t) + (b.r as f32 * t)) as i16,
            g: ((a.g as f32 * inv_t) + (b.g as f32 * t)) as i16,
            b: ((a.b as f32 * inv_t) + (b.b as f32 * t)) as i16,
            a: ((a.a as f32 * inv_t) + (b.a as f32 * t)) as i16,
        }
    }

    /// Dim the color by a factor (0.0 = black, 1.0 = unchanged).
    ///
    /// Terminal-default dims to gray; ANSI colors cannot be dimmed.
    #[inline]
    pub fn dim(self, factor: f32) -> Self {
        if self.is_terminal_default() {
            return Self::GRAY;
        }
        if self.is_ansi() {
            return self;
        }
        Self {
            r: (self.r as f32 * factor).clamp(0.0, 255.0) as i16,
            g: (self.g as f32 * factor).clamp(0.0, 255.0) as i16,
            b: (self.b as f32 * factor).clamp(0.0, 255.0) as i16,
            a: self.a,
        }
    }
}

// =============================================================================
// Text Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 4;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_construction() {
        let c = Rgba::rgb(40, 42, 54);
        assert_eq!((c.r, c.g, c.b, c.a), (40, 42, 54, 255));
        assert!(!c.is_terminal_default());
        assert!(!c.is_ansi());
    }

    #[test]
    fn test_terminal_default_marker() {
        assert!(Rgba::TERMINAL_DEFAULT.is_terminal_default());
        assert!(!Rgba::TERMINAL_DEFAULT.is_ansi());
    }

    #[test]
    fn test_ansi_marker() {
        let c = Rgba::ansi(12);
        assert!(c.is_ansi());
        assert_eq!(c.ansi_index(), 12);
    }

    #[test]
    fn test_from_rgb_int() {
        assert_eq!(Rgba::from_rgb_int(0xff0000), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::from_rgb_int(0x282a36), Rgba::rgb(40, 42, 54));
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex("#ff0000"), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(Rgba::from_hex("fff"), Some(Rgba::rgb(255, 255, 255)));
        assert_eq!(Rgba::from_hex("#ff000080"), Some(Rgba::new(255, 0, 0, 128)));
        assert_eq!(Rgba::from_hex("#gg0000"), None);
        assert_eq!(Rgba::from_hex("nope"), None);
    }

    #[test]
    fn test_dim() {
        let c = Rgba::rgb(100, 200, 50).dim(0.5);
        assert_eq!((c.r, c.g, c.b), (50, 100, 25));
        // Terminal default dims to gray, ANSI passes through
        assert_eq!(Rgba::TERMINAL_DEFAULT.dim(0.5), Rgba::GRAY);
        assert_eq!(Rgba::ansi(3).dim(0.5), Rgba::ansi(3));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgba::rgb(0, 0, 0);
        let b = Rgba::rgb(255, 255, 255);
        assert_eq!(Rgba::lerp(a, b, 0.0), a);
        assert_eq!(Rgba::lerp(a, b, 1.0), b);
    }

    #[test]
    fn test_attr_flags() {
        let attrs = Attr::BOLD | Attr::ITALIC;
        assert!(attrs.contains(Attr::BOLD));
        assert!(attrs.contains(Attr::ITALIC));
        assert!(!attrs.contains(Attr::UNDERLINE));
    }
}
