use crate::input::track_pointer;
use crate::roster::{setup_preset_library, setup_roster};
use crate::visual::frames::{FrameRequests, advance_frame_requests, drive_followers};
use crate::visual::nodes::{apply_roster_commands, spawn_initial_followers, sync_follower_nodes};
use bevy::prelude::*;

pub struct FollowerPlugin;

impl Plugin for FollowerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameRequests>()
            // Load presets first, then pick the active one and spawn it
            .add_systems(
                Startup,
                (setup_preset_library, setup_roster, spawn_initial_followers).chain(),
            )
            .add_systems(
                Update,
                (
                    // One tick per follower that asked during the previous frame
                    drive_followers,
                    // Preset switching and hide/show, stop/start
                    apply_roster_commands,
                    // Visual updates
                    sync_follower_nodes,
                )
                    .chain()
                    .after(track_pointer),
            )
            .add_systems(Last, advance_frame_requests);
    }
}
