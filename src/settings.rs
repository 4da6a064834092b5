use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bevy::prelude::*;
use directories::ProjectDirs;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use compass_core::prelude::CompassSettings;
use compass_input::Keybinds;

/// Degrees per second the viewer turns while a turn key is held.
#[derive(Resource, Clone, Copy, Debug, Deref)]
pub struct TurnSpeed(pub f32);

/// Everything stored in `settings.ron`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub compass: CompassSettings,
    pub keybinds: Keybinds,
    pub turn_speed: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            compass: CompassSettings::default(),
            keybinds: Keybinds::default(),
            turn_speed: 90.0,
        }
    }
}

impl AppSettings {
    /// Read settings from `path`, writing the defaults there first if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save(path)?;
            return Ok(settings);
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        ron::from_str(&text)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let text = ron::ser::to_string_pretty(self, PrettyConfig::default())?;
        fs::write(path, text)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }
}

pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "compass_hud").map(|dirs| dirs.config_dir().join("settings.ron"))
}

fn load_system(mut commands: Commands) {
    let settings = match settings_path() {
        Some(path) => match AppSettings::load(&path) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                error!("{e:#}. Using default settings.");
                AppSettings::default()
            }
        },
        None => {
            warn!("No config directory found. Using default settings.");
            AppSettings::default()
        }
    };

    commands.insert_resource(settings.compass);
    commands.insert_resource(settings.keybinds);
    commands.insert_resource(TurnSpeed(settings.turn_speed));
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(TurnSpeed(AppSettings::default().turn_speed));
        app.add_systems(PreStartup, load_system);
    }
}
