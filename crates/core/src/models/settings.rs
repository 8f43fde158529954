use serde::{Deserialize, Serialize};

/// Colour scheme of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "Dark"),
            Theme::Light => write!(f, "Light"),
        }
    }
}

/// User preferences, persisted next to the seen-achievement set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The currency in which values are displayed (e.g., "AUD", "USD", "EUR").
    pub currency: String,

    /// Whether achievement unlocks play a sound.
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,

    #[serde(default)]
    pub theme: Theme,
}

fn default_sound_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "AUD".to_string(),
            sound_enabled: true,
            theme: Theme::Dark,
        }
    }
}
