use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cosmetic presentation variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
    #[default]
    Minimalist,
    Brutalist,
    Terminal,
    Modern,
}

impl DisplayStyle {
    pub const ALL: [DisplayStyle; 4] = [
        DisplayStyle::Minimalist,
        DisplayStyle::Brutalist,
        DisplayStyle::Terminal,
        DisplayStyle::Modern,
    ];

    /// Glyph repeated to draw the box
    pub fn border(self) -> &'static str {
        match self {
            DisplayStyle::Minimalist => "▓",
            DisplayStyle::Brutalist => "▓▓",
            DisplayStyle::Terminal => "░▒▓",
            DisplayStyle::Modern => "▫",
        }
    }

    pub fn font(self) -> &'static str {
        match self {
            DisplayStyle::Minimalist => "SF Mono",
            DisplayStyle::Brutalist => "Helvetica",
            DisplayStyle::Terminal => "Courier",
            DisplayStyle::Modern => "Inter",
        }
    }

    pub fn weight(self) -> u16 {
        match self {
            DisplayStyle::Brutalist => 700,
            DisplayStyle::Modern => 300,
            DisplayStyle::Minimalist | DisplayStyle::Terminal => 400,
        }
    }
}

impl fmt::Display for DisplayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayStyle::Minimalist => write!(f, "minimalist"),
            DisplayStyle::Brutalist => write!(f, "brutalist"),
            DisplayStyle::Terminal => write!(f, "terminal"),
            DisplayStyle::Modern => write!(f, "modern"),
        }
    }
}

impl FromStr for DisplayStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayStyle::ALL
            .into_iter()
            .find(|style| style.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown style '{}', expected one of: minimalist, brutalist, terminal, modern",
                    s
                )
            })
    }
}
