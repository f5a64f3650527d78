//! Color theme signal
//!
//! The active theme belongs to the page, not the scene. The scene only reads it,
//! once per drawn frame, so a theme switch shows up on the next frame without
//! touching simulation state.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Page color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn from_is_dark(is_dark: bool) -> Self {
        if is_dark { Theme::Dark } else { Theme::Light }
    }

    /// The other theme (what a toggle button switches to)
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Read-only view of the current theme
pub trait ThemeSource {
    fn theme(&self) -> Theme;
}

impl ThemeSource for Theme {
    fn theme(&self) -> Theme {
        *self
    }
}

/// Shared theme slot: the page writes, the scene reads at draw time
#[derive(Debug, Clone, Default)]
pub struct ThemeCell(Rc<Cell<Theme>>);

impl ThemeCell {
    pub fn new(theme: Theme) -> Self {
        Self(Rc::new(Cell::new(theme)))
    }

    pub fn set(&self, theme: Theme) {
        self.0.set(theme);
    }

    /// Flip the theme, returning the new value
    pub fn toggle(&self) -> Theme {
        let next = self.0.get().toggled();
        self.0.set(next);
        next
    }
}

impl ThemeSource for ThemeCell {
    fn theme(&self) -> Theme {
        self.0.get()
    }
}
