//! Dashboard colour theme shared between the CLI and the theme store.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Light or dark presentation theme.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[clap(rename_all = "lower")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    /// Light background.
    Light,
    /// Dark background, the default.
    #[default]
    Dark,
}

impl Theme {
    /// Returns the opposite theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// CSS-style class name for the theme, e.g. `theme-dark`.
    pub fn class_name(self) -> String {
        format!("theme-{}", self)
    }
}
