//! # Preferences Repository
//!
//! File-based storage for application preferences using a single YAML file
//! `preferences.yaml` in the data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! theme: FollowSystem
//! dark_theme_variant: Tinted
//! follow_system_colors: true
//! color_scheme_seed: 4282339765
//! unset_classes_policy: Ignore
//! date_format: "%d %b %Y"
//! time_format: "%I:%M %p"
//! default_home_tab: Today
//! ```
//!
//! Writes are atomic (temp file + rename). A missing or unreadable file
//! falls back to defaults, so the store is always loadable.

use anyhow::Result;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::models::preferences::AppPreferences;
use crate::storage::traits::PreferenceStorage;

const PREFERENCES_FILE: &str = "preferences.yaml";

/// YAML-file preference repository
#[derive(Clone)]
pub struct PreferencesRepository {
    base_directory: PathBuf,
}

impl PreferencesRepository {
    /// Create a new preferences repository rooted at a data directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {:?}", base_path);
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    fn preferences_path(&self) -> PathBuf {
        self.base_directory.join(PREFERENCES_FILE)
    }
}

impl PreferenceStorage for PreferencesRepository {
    fn load_preferences(&self) -> Result<AppPreferences> {
        let path = self.preferences_path();

        if !path.exists() {
            let defaults = AppPreferences::default();
            self.save_preferences(&defaults)?;
            info!("Created default preferences at {:?}", path);
            return Ok(defaults);
        }

        let yaml_content = fs::read_to_string(&path)?;
        match serde_yaml::from_str::<AppPreferences>(&yaml_content) {
            Ok(preferences) => {
                debug!("Loaded preferences from {:?}", path);
                Ok(preferences)
            }
            Err(e) => {
                warn!("Unreadable preferences file ({}), falling back to defaults", e);
                Ok(AppPreferences::default())
            }
        }
    }

    fn save_preferences(&self, preferences: &AppPreferences) -> Result<()> {
        let path = self.preferences_path();
        let yaml_content = serde_yaml::to_string(preferences)?;

        // Atomic write: temp file, then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved preferences to {:?}", path);
        Ok(())
    }
}
