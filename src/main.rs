use bevy::prelude::*;

mod camera;
mod follower;
mod input;
mod roster;
mod visual;

use camera::CameraPlugin;
use input::InputPlugin;

use crate::visual::plugin::FollowerPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Cursor Followers".into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.08, 0.08, 0.1)))
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(FollowerPlugin);

    app.run();
}
