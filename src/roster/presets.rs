use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

use crate::follower::{ConfigError, FollowerOptions};

const PRESETS_JSON: &str = include_str!("../../assets/presets.json");

/// A named follower skin
#[derive(Debug, Clone, Deserialize)]
pub struct Preset {
    /// Lookup key, e.g. `"ghost13"`
    pub name: String,
    /// Human-readable name for logs
    pub label: String,
    /// Options merged with the defaults for every follower of this preset
    pub follower: FollowerOptions,
}

/// Error types for preset loading
#[derive(Debug)]
pub enum PresetError {
    Parse(serde_json::Error),
    Empty,
    DuplicateName(String),
    InvalidConfig { name: String, error: ConfigError },
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::Parse(e) => write!(f, "Preset data is not valid JSON: {}", e),
            PresetError::Empty => write!(f, "No presets defined"),
            PresetError::DuplicateName(name) => write!(f, "Preset `{}` defined twice", name),
            PresetError::InvalidConfig { name, error } => {
                write!(f, "Preset `{}` is misconfigured: {}", name, error)
            }
        }
    }
}

impl std::error::Error for PresetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PresetError::Parse(e) => Some(e),
            PresetError::InvalidConfig { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PresetError {
    fn from(e: serde_json::Error) -> Self {
        PresetError::Parse(e)
    }
}

/// Resource holding every preset, in file order
#[derive(Resource, Debug, Clone)]
pub struct PresetLibrary {
    presets: Vec<Preset>,
}

impl PresetLibrary {
    /// Load the presets embedded in the binary
    pub fn load() -> Result<Self, PresetError> {
        Self::from_json(PRESETS_JSON)
    }

    /// Parse and validate a JSON array of presets
    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        let presets: Vec<Preset> = serde_json::from_str(json)?;

        if presets.is_empty() {
            return Err(PresetError::Empty);
        }

        let mut seen = HashSet::new();
        for preset in &presets {
            if !seen.insert(preset.name.as_str()) {
                return Err(PresetError::DuplicateName(preset.name.clone()));
            }

            preset
                .follower
                .resolve()
                .validate()
                .map_err(|error| PresetError::InvalidConfig {
                    name: preset.name.clone(),
                    error,
                })?;
        }

        Ok(PresetLibrary { presets })
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Preset at a position in file order (keyboard slot)
    pub fn by_index(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    pub fn first(&self) -> &Preset {
        // from_json rejects an empty list
        &self.presets[0]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }
}

/// System to load the preset library
/// This should run in Startup, before followers are spawned
pub fn setup_preset_library(mut commands: Commands) {
    match PresetLibrary::load() {
        Ok(library) => {
            info!("✓ Loaded {} follower presets:", library.len());
            for name in library.names() {
                info!("  - {}", name);
            }
            commands.insert_resource(library);
        }
        Err(e) => {
            error!("Failed to load follower presets: {}", e);
            panic!("Cannot continue without preset data");
        }
    }
}
