// roster/mod.rs

pub mod presets;

use bevy::prelude::*;

pub use presets::{Preset, PresetError, PresetLibrary, setup_preset_library};

/// How many followers each preset spawns
pub const FOLLOWERS_PER_PRESET: usize = 2;

/// Requests coming from the keyboard (or any other selection UI)
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum RosterCommand {
    /// Switch to the preset at this position in the library
    Select(usize),
    /// Hide every follower, or show them again
    ToggleVisibility,
    /// Stop every follower, or start them again
    TogglePaused,
}

/// What the visual layer must do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterChange {
    /// Tear down every follower and spawn the active preset
    Respawn,
    /// Hide (`false`) or show (`true`) every follower
    Visibility(bool),
    /// Stop (`false`) or start (`true`) every follower
    Running(bool),
    Unchanged,
}

/// Resource: which preset is on screen and how the followers are toggled
#[derive(Resource, Debug, Clone)]
pub struct Roster {
    active: String,
    count: usize,
    hidden: bool,
    paused: bool,
}

impl Roster {
    pub fn new(active: impl Into<String>, count: usize) -> Self {
        Roster {
            active: active.into(),
            count,
            hidden: false,
            paused: false,
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn count(&self) -> usize {
        self.count
    }

    #[cfg(test)]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Update the roster for a command
    pub fn apply(&mut self, command: &RosterCommand, library: &PresetLibrary) -> RosterChange {
        match command {
            RosterCommand::Select(index) => {
                let Some(preset) = library.by_index(*index) else {
                    return RosterChange::Unchanged;
                };
                // A fresh set of followers always starts visible and running
                self.active = preset.name.clone();
                self.hidden = false;
                self.paused = false;
                RosterChange::Respawn
            }
            RosterCommand::ToggleVisibility => {
                self.hidden = !self.hidden;
                if !self.hidden {
                    // Showing also starts the animation
                    self.paused = false;
                }
                RosterChange::Visibility(!self.hidden)
            }
            RosterCommand::TogglePaused => {
                // Hidden followers stay stopped until shown
                if self.hidden {
                    return RosterChange::Unchanged;
                }
                self.paused = !self.paused;
                RosterChange::Running(!self.paused)
            }
        }
    }
}

/// System: create the roster on the first preset
pub fn setup_roster(mut commands: Commands, library: Res<PresetLibrary>) {
    let roster = Roster::new(library.first().name.clone(), FOLLOWERS_PER_PRESET);
    info!(
        "Starting with preset '{}' x{}",
        roster.active(),
        roster.count()
    );
    commands.insert_resource(roster);
}
