//! Theming capability.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::registry::Capability;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }
}

/// Theme operations shared code may perform.
pub trait Theme: Send + Sync {
    /// The active color scheme.
    fn scheme(&self) -> ColorScheme;

    /// Value of a design token (e.g. `background`) in the active scheme.
    fn token(&self, name: &str) -> Option<String>;

    /// Switch between light and dark.
    fn toggle(&self);
}

impl Capability for dyn Theme {
    const NAME: &'static str = "theme";
}

/// Theme backed by two token tables.
#[derive(Debug)]
pub struct PaletteTheme {
    scheme: Mutex<ColorScheme>,
    light: BTreeMap<String, String>,
    dark: BTreeMap<String, String>,
}

impl PaletteTheme {
    pub fn new(scheme: ColorScheme) -> Self {
        PaletteTheme {
            scheme: Mutex::new(scheme),
            light: BTreeMap::new(),
            dark: BTreeMap::new(),
        }
    }

    /// Set `name` to `light` / `dark` values.
    pub fn with_token(
        mut self,
        name: impl Into<String>,
        light: impl Into<String>,
        dark: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.light.insert(name.clone(), light.into());
        self.dark.insert(name, dark.into());
        self
    }
}

impl Theme for PaletteTheme {
    fn scheme(&self) -> ColorScheme {
        *self.scheme.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn token(&self, name: &str) -> Option<String> {
        let table = match self.scheme() {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        };
        table.get(name).cloned()
    }

    fn toggle(&self) {
        let mut scheme = self.scheme.lock().unwrap_or_else(PoisonError::into_inner);
        *scheme = scheme.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_follow_scheme() {
        let theme = PaletteTheme::new(ColorScheme::Light).with_token("background", "#fff", "#000");
        assert_eq!(theme.token("background").as_deref(), Some("#fff"));

        theme.toggle();
        assert_eq!(theme.scheme(), ColorScheme::Dark);
        assert_eq!(theme.token("background").as_deref(), Some("#000"));
        assert_eq!(theme.token("missing"), None);
    }
}
