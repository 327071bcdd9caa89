//! The two theme presets.
//!
//! Palettes follow the site's custom-property scheme: a deep slate dark
//! mode and a paper-white light mode sharing the same indigo/cyan brand
//! pair.

use super::{Theme, ThemeColor};

/// Dark mode (the default).
pub fn dark() -> Theme {
    Theme {
        name: "dark".to_string(),
        primary: ThemeColor::from(0x818cf8u32),       // indigo 400
        accent: ThemeColor::from(0x22d3eeu32),        // cyan 400
        text: ThemeColor::from(0xe2e8f0u32),          // slate 200
        text_muted: ThemeColor::from(0x94a3b8u32),    // slate 400
        background: ThemeColor::from(0x0b1020u32),
        surface: ThemeColor::from(0x151c33u32),
        border: ThemeColor::from(0x1e293bu32),        // slate 800
        border_active: ThemeColor::from(0x818cf8u32),
    }
}

/// Light mode.
pub fn light() -> Theme {
    Theme {
        name: "light".to_string(),
        primary: ThemeColor::from(0x4f46e5u32),       // indigo 600
        accent: ThemeColor::from(0x0891b2u32),        // cyan 600
        text: ThemeColor::from(0x0f172au32),          // slate 900
        text_muted: ThemeColor::from(0x64748bu32),    // slate 500
        background: ThemeColor::from(0xf8fafcu32),    // slate 50
        surface: ThemeColor::from(0xffffffu32),
        border: ThemeColor::from(0xe2e8f0u32),        // slate 200
        border_active: ThemeColor::from(0x6366f1u32),
    }
}
