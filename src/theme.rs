// 🌗 Theme - dark/light preference, persisted apart from the financial data

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// RGB colours used by the charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: (u8, u8, u8),
    pub grid: (u8, u8, u8),
    pub accent: (u8, u8, u8),
    pub income: (u8, u8, u8),
    pub expense: (u8, u8, u8),
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "☀️",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                text: (0x94, 0xa3, 0xb8),
                grid: (0x33, 0x3a, 0x45),
                accent: (0x00, 0xf2, 0xff),
                income: (0x10, 0xb9, 0x81),
                expense: (0xf4, 0x3f, 0x5e),
            },
            Theme::Light => Palette {
                text: (0x64, 0x74, 0x8b),
                grid: (0xd4, 0xd4, 0xd8),
                accent: (0x02, 0x84, 0xc7),
                income: (0x10, 0xb9, 0x81),
                expense: (0xf4, 0x3f, 0x5e),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!(" dark ".parse::<Theme>(), Ok(Theme::Dark));
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_palettes_differ_in_accent() {
        assert_ne!(Theme::Dark.palette().accent, Theme::Light.palette().accent);
        assert_eq!(Theme::Dark.palette().income, Theme::Light.palette().income);
    }
}
