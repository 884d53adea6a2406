//! Day and night colour themes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Day,
    Night,
}

/// An RGB triple
pub type Rgb = (u8, u8, u8);

const INK: Rgb = (10, 10, 20);
const PAPER: Rgb = (255, 255, 255);

/// Colours behind the `--color-dark` and `--color-light` variables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub dark: Rgb,
    pub light: Rgb,
}

impl ThemePalette {
    /// CSS custom properties for the page root
    pub fn css_variables(&self) -> String {
        format!(
            "--color-dark: {}; --color-light: {};",
            rgb_list(self.dark),
            rgb_list(self.light)
        )
    }
}

fn rgb_list((r, g, b): Rgb) -> String {
    format!("{r}, {g}, {b}")
}

impl Theme {
    /// Night when the system prefers dark colours
    pub fn from_preference(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Night
        } else {
            Theme::Day
        }
    }

    pub fn palette(&self) -> ThemePalette {
        match self {
            Theme::Day => ThemePalette {
                dark: INK,
                light: PAPER,
            },
            Theme::Night => ThemePalette {
                dark: PAPER,
                light: INK,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Theme::Day),
            "night" => Ok(Theme::Night),
            other => Err(format!("Unknown theme: {other} (expected day or night)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_palettes_are_inverse() {
        let day = Theme::Day.palette();
        let night = Theme::Night.palette();
        assert_eq!(day.dark, night.light);
        assert_eq!(day.light, night.dark);
    }

    #[test]
    fn test_css_variables() {
        assert_eq!(
            Theme::Night.palette().css_variables(),
            "--color-dark: 255, 255, 255; --color-light: 10, 10, 20;"
        );
    }

    #[test]
    fn test_parse_and_preference() {
        assert_eq!("Night".parse::<Theme>(), Ok(Theme::Night));
        assert!("dusk".parse::<Theme>().is_err());
        assert_eq!(Theme::from_preference(true), Theme::Night);
        assert_eq!(Theme::from_preference(false), Theme::Day);
    }
}
