//! Domain model for process-wide application preferences.

use serde::{Deserialize, Serialize};

/// How occurrences still in `Unset` state count toward the attendance
/// percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsetClassesPolicy {
    ConsiderPresent,
    ConsiderAbsent,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeConfig {
    FollowSystem,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DarkThemeVariant {
    Tinted,
    PureBlack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeTab {
    Today,
    Overall,
}

/// Persisted application preferences. Independent of course data,
/// process-wide, read through an in-memory snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    pub theme: ThemeConfig,
    pub dark_theme_variant: DarkThemeVariant,
    pub follow_system_colors: bool,
    /// Seed color for the generated color scheme, as 0xAARRGGBB
    pub color_scheme_seed: u32,
    pub unset_classes_policy: UnsetClassesPolicy,
    /// strftime pattern used to render dates
    pub date_format: String,
    /// strftime pattern used to render times
    pub time_format: String,
    pub default_home_tab: HomeTab,
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            theme: ThemeConfig::FollowSystem,
            dark_theme_variant: DarkThemeVariant::Tinted,
            follow_system_colors: true,
            color_scheme_seed: 0xFF3F51B5,
            unset_classes_policy: UnsetClassesPolicy::Ignore,
            date_format: "%d %b %Y".to_string(),
            time_format: "%I:%M %p".to_string(),
            default_home_tab: HomeTab::Today,
        }
    }
}
