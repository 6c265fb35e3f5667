//! The four-color flat palette
//!
//! Fill colors pair one-to-one with a darker border shade. A dot's fill is
//! purely a function of its popped state; everything else on screen uses
//! White (background) and Black (HUD text).

use serde::{Deserialize, Serialize};

/// Fill colors (0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
    Green,
    Red,
}

/// Darker companion shades for borders and bold text (0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shade {
    White,
    Black,
    Green,
    Red,
}

impl Color {
    pub fn rgb(self) -> u32 {
        match self {
            Color::White => 0xecf0f1,
            Color::Black => 0x34495e,
            Color::Green => 0x2ecc71,
            Color::Red => 0xe74c3c,
        }
    }

    /// The border shade paired with this fill
    pub fn shade(self) -> Shade {
        match self {
            Color::White => Shade::White,
            Color::Black => Shade::Black,
            Color::Green => Shade::Green,
            Color::Red => Shade::Red,
        }
    }

    /// `#rrggbb` string for canvas fill styles
    pub fn css_string(self) -> String {
        css_hex(self.rgb())
    }
}

impl Shade {
    pub fn rgb(self) -> u32 {
        match self {
            Shade::White => 0xbdc3c7,
            Shade::Black => 0x2c3e50,
            Shade::Green => 0x27ae60,
            Shade::Red => 0xc0392b,
        }
    }

    /// `#rrggbb` string for canvas fill styles
    pub fn css_string(self) -> String {
        css_hex(self.rgb())
    }
}

fn css_hex(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0x00ff_ffff)
}
