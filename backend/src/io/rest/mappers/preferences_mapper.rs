//! Mapper between shared preference DTOs and the domain preference model.

use crate::domain::commands::preferences::UpdatePreferencesCommand;
use crate::domain::models::preferences::{
    AppPreferences, DarkThemeVariant as DomainVariant, HomeTab as DomainTab,
    ThemeConfig as DomainTheme, UnsetClassesPolicy as DomainPolicy,
};
use shared::{
    DarkThemeVariant, HomeTab, Preferences, ThemeConfig, UnsetClassesPolicy,
    UpdatePreferencesRequest,
};

pub struct PreferencesMapper;

impl PreferencesMapper {
    pub fn theme_to_domain(theme: ThemeConfig) -> DomainTheme {
        match theme {
            ThemeConfig::FollowSystem => DomainTheme::FollowSystem,
            ThemeConfig::Light => DomainTheme::Light,
            ThemeConfig::Dark => DomainTheme::Dark,
        }
    }

    pub fn theme_to_dto(theme: DomainTheme) -> ThemeConfig {
        match theme {
            DomainTheme::FollowSystem => ThemeConfig::FollowSystem,
            DomainTheme::Light => ThemeConfig::Light,
            DomainTheme::Dark => ThemeConfig::Dark,
        }
    }

    pub fn variant_to_domain(variant: DarkThemeVariant) -> DomainVariant {
        match variant {
            DarkThemeVariant::Tinted => DomainVariant::Tinted,
            DarkThemeVariant::PureBlack => DomainVariant::PureBlack,
        }
    }

    pub fn variant_to_dto(variant: DomainVariant) -> DarkThemeVariant {
        match variant {
            DomainVariant::Tinted => DarkThemeVariant::Tinted,
            DomainVariant::PureBlack => DarkThemeVariant::PureBlack,
        }
    }

    pub fn policy_to_domain(policy: UnsetClassesPolicy) -> DomainPolicy {
        match policy {
            UnsetClassesPolicy::ConsiderPresent => DomainPolicy::ConsiderPresent,
            UnsetClassesPolicy::ConsiderAbsent => DomainPolicy::ConsiderAbsent,
            UnsetClassesPolicy::Ignore => DomainPolicy::Ignore,
        }
    }

    pub fn policy_to_dto(policy: DomainPolicy) -> UnsetClassesPolicy {
        match policy {
            DomainPolicy::ConsiderPresent => UnsetClassesPolicy::ConsiderPresent,
            DomainPolicy::ConsiderAbsent => UnsetClassesPolicy::ConsiderAbsent,
            DomainPolicy::Ignore => UnsetClassesPolicy::Ignore,
        }
    }

    pub fn tab_to_domain(tab: HomeTab) -> DomainTab {
        match tab {
            HomeTab::Today => DomainTab::Today,
            HomeTab::Overall => DomainTab::Overall,
        }
    }

    pub fn tab_to_dto(tab: DomainTab) -> HomeTab {
        match tab {
            DomainTab::Today => HomeTab::Today,
            DomainTab::Overall => HomeTab::Overall,
        }
    }

    /// Converts the domain preference model to its DTO.
    pub fn to_dto(preferences: AppPreferences) -> Preferences {
        Preferences {
            theme: Self::theme_to_dto(preferences.theme),
            dark_theme_variant: Self::variant_to_dto(preferences.dark_theme_variant),
            follow_system_colors: preferences.follow_system_colors,
            color_scheme_seed: preferences.color_scheme_seed,
            unset_classes_policy: Self::policy_to_dto(preferences.unset_classes_policy),
            date_format: preferences.date_format,
            time_format: preferences.time_format,
            default_home_tab: Self::tab_to_dto(preferences.default_home_tab),
        }
    }

    /// Converts an update request DTO to the domain command.
    pub fn to_update_command(request: UpdatePreferencesRequest) -> UpdatePreferencesCommand {
        UpdatePreferencesCommand {
            theme: request.theme.map(Self::theme_to_domain),
            dark_theme_variant: request.dark_theme_variant.map(Self::variant_to_domain),
            follow_system_colors: request.follow_system_colors,
            color_scheme_seed: request.color_scheme_seed,
            unset_classes_policy: request.unset_classes_policy.map(Self::policy_to_domain),
            date_format: request.date_format,
            time_format: request.time_format,
            default_home_tab: request.default_home_tab.map(Self::tab_to_domain),
        }
    }
}
