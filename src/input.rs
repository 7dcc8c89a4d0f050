use bevy::prelude::*;
use bevy::window::CursorMoved;

use crate::follower::PointerSignal;
use crate::roster::RosterCommand;

/// Number keys 1..=N select presets in library order
const PRESET_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Pointer>()
            .add_message::<RosterCommand>()
            .add_systems(Update, (track_pointer, collect_roster_commands));
    }
}

/// Resource: the shared pointer register read by every follower
///
/// Window (logical) coordinates: pixels from top-left, y down
#[derive(Resource, Default, Debug, Clone, Copy, Deref, DerefMut)]
pub struct Pointer(pub PointerSignal);

/// System: sole writer of the pointer register
pub fn track_pointer(mut ev_cursor: MessageReader<CursorMoved>, mut pointer: ResMut<Pointer>) {
    for e in ev_cursor.read() {
        // last event wins
        pointer.set(e.position);
    }
}

fn collect_roster_commands(keys: Res<ButtonInput<KeyCode>>, mut out: MessageWriter<RosterCommand>) {
    for (index, key) in PRESET_KEYS.iter().enumerate() {
        if keys.just_pressed(*key) {
            out.write(RosterCommand::Select(index));
        }
    }

    if keys.just_pressed(KeyCode::KeyH) {
        out.write(RosterCommand::ToggleVisibility);
    }

    if keys.just_pressed(KeyCode::KeyP) {
        out.write(RosterCommand::TogglePaused);
    }
}
