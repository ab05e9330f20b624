//! Light/dark theme flag, its palette, and the store that persists and publishes it.

pub mod prefs;
pub mod store;

use std::collections::BTreeMap;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{FolioError, FolioResult};

/// The site-wide colour scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
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

    pub fn parse(s: &str) -> FolioResult<Self> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(FolioError::validation(format!(
                "unknown theme '{other}' (expected 'dark' or 'light')"
            ))),
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                bg_primary: Rgba8::opaque(0x00, 0x00, 0x00),
                bg_secondary: Rgba8::opaque(0x11, 0x11, 0x11),
                text_primary: Rgba8::opaque(0xff, 0xff, 0xff),
                text_secondary: Rgba8::opaque(0xa3, 0xa3, 0xa3),
                border: Rgba8::opaque(0x26, 0x26, 0x26),
            },
            Theme::Light => Palette {
                bg_primary: Rgba8::opaque(0xff, 0xff, 0xff),
                bg_secondary: Rgba8::opaque(0xf5, 0xf5, 0xf5),
                text_primary: Rgba8::opaque(0x00, 0x00, 0x00),
                text_secondary: Rgba8::opaque(0x52, 0x52, 0x52),
                border: Rgba8::opaque(0xe5, 0xe5, 0xe5),
            },
        }
    }
}

/// Colours the page chrome reads through CSS variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg_primary: Rgba8,
    pub bg_secondary: Rgba8,
    pub text_primary: Rgba8,
    pub text_secondary: Rgba8,
    pub border: Rgba8,
}

impl Palette {
    /// Variable names without the `--` prefix mapped to CSS colour strings.
    pub fn css_variables(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("bg-primary", self.bg_primary.to_css()),
            ("bg-secondary", self.bg_secondary.to_css()),
            ("text-primary", self.text_primary.to_css()),
            ("text-secondary", self.text_secondary.to_css()),
            ("border-color", self.border.to_css()),
        ])
    }
}
