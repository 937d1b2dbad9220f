//! Built-in palette presets.
//!
//! Each preset has five colors per mode: the empty level followed by four
//! intensities, tuned to read well on light and dark backgrounds.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Light or dark variant of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    /// Palette for light backgrounds.
    #[default]
    Light,
    /// Palette for dark backgrounds.
    Dark,
}

/// A named pair of five-level palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreset {
    /// Display name.
    pub name: &'static str,
    /// Lookup key (lowercase).
    pub key: &'static str,
    /// Light-mode colors, empty level first.
    pub light: [Rgba; 5],
    /// Dark-mode colors, empty level first.
    pub dark: [Rgba; 5],
}

const fn hex(v: u32) -> Rgba {
    Rgba::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

const LIGHT_EMPTY: Rgba = hex(0xe5e7eb);
const DARK_EMPTY: Rgba = hex(0x262626);

/// Every built-in preset.
pub const PRESETS: [ThemePreset; 8] = [
    ThemePreset {
        name: "Blue",
        key: "blue",
        light: [LIGHT_EMPTY, hex(0xdbeafe), hex(0x93c5fd), hex(0x3b82f6), hex(0x1d4ed8)],
        dark: [DARK_EMPTY, hex(0x0b1220), hex(0x1e3a8a), hex(0x2563eb), hex(0x93c5fd)],
    },
    ThemePreset {
        name: "Green",
        key: "green",
        light: [LIGHT_EMPTY, hex(0xdcfce7), hex(0x86efac), hex(0x22c55e), hex(0x166534)],
        dark: [DARK_EMPTY, hex(0x052e16), hex(0x14532d), hex(0x22c55e), hex(0x86efac)],
    },
    ThemePreset {
        name: "Default",
        key: "default",
        light: [LIGHT_EMPTY, hex(0xd1fae5), hex(0x86efac), hex(0x22c55e), hex(0x166534)],
        dark: [DARK_EMPTY, hex(0x052e16), hex(0x14532d), hex(0x22c55e), hex(0x86efac)],
    },
    ThemePreset {
        name: "Orange",
        key: "orange",
        light: [LIGHT_EMPTY, hex(0xffedd5), hex(0xfdba74), hex(0xf97316), hex(0x9a3412)],
        dark: [DARK_EMPTY, hex(0x2b1305), hex(0x7c2d12), hex(0xf97316), hex(0xfdba74)],
    },
    ThemePreset {
        name: "Red",
        key: "red",
        light: [LIGHT_EMPTY, hex(0xfee2e2), hex(0xfca5a5), hex(0xef4444), hex(0x991b1b)],
        dark: [DARK_EMPTY, hex(0x2b0b0b), hex(0x7f1d1d), hex(0xef4444), hex(0xfca5a5)],
    },
    ThemePreset {
        name: "Rose",
        key: "rose",
        light: [LIGHT_EMPTY, hex(0xffe4e6), hex(0xfda4af), hex(0xf43f5e), hex(0x9f1239)],
        dark: [DARK_EMPTY, hex(0x2b0b16), hex(0x881337), hex(0xf43f5e), hex(0xfda4af)],
    },
    ThemePreset {
        name: "Violet",
        key: "violet",
        light: [LIGHT_EMPTY, hex(0xede9fe), hex(0xc4b5fd), hex(0x8b5cf6), hex(0x5b21b6)],
        dark: [DARK_EMPTY, hex(0x130b2b), hex(0x4c1d95), hex(0x8b5cf6), hex(0xc4b5fd)],
    },
    ThemePreset {
        name: "Yellow",
        key: "yellow",
        light: [LIGHT_EMPTY, hex(0xfef9c3), hex(0xfde047), hex(0xf59e0b), hex(0x92400e)],
        dark: [DARK_EMPTY, hex(0x241a04), hex(0x78350f), hex(0xf59e0b), hex(0xfde047)],
    },
];

/// Key of the preset used when none is configured.
pub const DEFAULT_PRESET: &str = "default";

impl ThemePreset {
    /// Look up a preset by key or name, ignoring case.
    #[must_use]
    pub fn find(name: &str) -> Option<&'static Self> {
        let name = name.trim();
        PRESETS
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(name) || p.name.eq_ignore_ascii_case(name))
    }

    /// The five colors for `mode`.
    #[must_use]
    pub const fn colors(&self, mode: ThemeMode) -> &[Rgba; 5] {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    /// A palette with `levels` entries (at least 2).
    ///
    /// Five levels return the preset as-is. Other counts keep the empty color
    /// and resample the four intensities piecewise-linearly.
    #[must_use]
    pub fn palette(&self, mode: ThemeMode, levels: u8) -> Vec<Rgba> {
        let colors = self.colors(mode);
        if levels == 5 {
            return colors.to_vec();
        }

        let ramp = &colors[1..];
        let steps = usize::from(levels.max(2)) - 1;
        let mut palette = Vec::with_capacity(steps + 1);
        palette.push(colors[0]);
        for k in 0..steps {
            let t = if steps == 1 { 1.0 } else { k as f32 / (steps - 1) as f32 };
            let pos = t * (ramp.len() - 1) as f32;
            let i = (pos.floor() as usize).min(ramp.len() - 2);
            palette.push(ramp[i].lerp(ramp[i + 1], pos - i as f32));
        }
        palette
    }
}
