use anyhow::Result;
use chrono::format::{Item, StrftimeItems};
use log::info;
use std::sync::{Arc, RwLock};

use crate::domain::commands::preferences::UpdatePreferencesCommand;
use crate::domain::models::preferences::AppPreferences;
use crate::storage::traits::PreferenceStorage;
use crate::storage::PreferencesRepository;

/// Service for the process-wide application preferences.
///
/// Reads go through an in-memory snapshot so every consumer sees updates
/// without re-reading the file; writes persist first and then refresh the
/// snapshot.
#[derive(Clone)]
pub struct PreferencesService {
    preferences_repository: PreferencesRepository,
    snapshot: Arc<RwLock<AppPreferences>>,
}

impl PreferencesService {
    /// Create a new PreferencesService, loading (or creating) the stored
    /// preferences
    pub fn new(preferences_repository: PreferencesRepository) -> Result<Self> {
        let current = preferences_repository.load_preferences()?;
        Ok(Self {
            preferences_repository,
            snapshot: Arc::new(RwLock::new(current)),
        })
    }

    /// Current preferences
    pub fn snapshot(&self) -> AppPreferences {
        self.snapshot
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Apply a partial update; only the provided fields change
    pub fn update(&self, command: UpdatePreferencesCommand) -> Result<AppPreferences> {
        info!("Updating preferences: {:?}", command);

        let mut preferences = self.snapshot();

        if let Some(theme) = command.theme {
            preferences.theme = theme;
        }
        if let Some(variant) = command.dark_theme_variant {
            preferences.dark_theme_variant = variant;
        }
        if let Some(follow) = command.follow_system_colors {
            preferences.follow_system_colors = follow;
        }
        if let Some(seed) = command.color_scheme_seed {
            preferences.color_scheme_seed = seed;
        }
        if let Some(policy) = command.unset_classes_policy {
            preferences.unset_classes_policy = policy;
        }
        if let Some(date_format) = command.date_format {
            Self::validate_format(&date_format)?;
            preferences.date_format = date_format;
        }
        if let Some(time_format) = command.time_format {
            Self::validate_format(&time_format)?;
            preferences.time_format = time_format;
        }
        if let Some(tab) = command.default_home_tab {
            preferences.default_home_tab = tab;
        }

        self.preferences_repository.save_preferences(&preferences)?;

        if let Ok(mut guard) = self.snapshot.write() {
            *guard = preferences.clone();
        }

        info!("Preferences updated");
        Ok(preferences)
    }

    /// Reject strftime patterns chrono cannot format
    fn validate_format(pattern: &str) -> Result<()> {
        if pattern.trim().is_empty() {
            return Err(anyhow::anyhow!("Format pattern cannot be empty"));
        }
        let has_error = StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
        if has_error {
            return Err(anyhow::anyhow!("Invalid format pattern: {}", pattern));
        }
        Ok(())
    }
}
