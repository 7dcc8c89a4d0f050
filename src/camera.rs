use bevy::camera::ScalingMode;
use bevy::prelude::*;

/// Camera height above the follower plane
const CAMERA_Z: f32 = 500.0;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, update_viewport);
    }
}

/// Logical size of the window, used to map page coordinates into the world
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Page coordinates (origin top-left, y down) to world coordinates
    /// (origin at the window center, y up, one unit per logical pixel)
    pub fn page_to_world(&self, page: Vec2) -> Vec2 {
        Vec2::new(page.x - self.width * 0.5, self.height * 0.5 - page.y)
    }
}

/// Orthographic camera looking down -Z at the XY plane
///
/// ```text
///        Y (up on screen)
///        ↑
///        |
///   -----+----→ X (right on screen)
///       /
///      ↙ Z (toward the viewer)
/// ```
///
/// Followers are flat quads in the XY plane; their z orders them.
fn setup_camera(mut commands: Commands) {
    let projection = Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::WindowSize,
        near: 0.0,
        far: 1000.0,
        ..OrthographicProjection::default_3d()
    });
    commands.spawn((
        Camera3d::default(),
        projection,
        Transform::from_xyz(0.0, 0.0, CAMERA_Z).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Update viewport resource when window is resized
fn update_viewport(mut viewport: ResMut<Viewport>, windows: Query<&Window>) {
    if let Ok(window) = windows.single() {
        let size = Viewport::new(window.width(), window.height());

        // Only update if the size changed
        if size != *viewport {
            *viewport = size;
            info!("Viewport resized: {}x{}", size.width, size.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_origin_is_top_left_corner() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.page_to_world(Vec2::ZERO), Vec2::new(-400.0, 300.0));
    }

    #[test]
    fn test_page_center_is_world_origin() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.page_to_world(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn test_page_y_grows_downward() {
        let viewport = Viewport::new(800.0, 600.0);
        let upper = viewport.page_to_world(Vec2::new(0.0, 10.0));
        let lower = viewport.page_to_world(Vec2::new(0.0, 20.0));
        assert!(lower.y < upper.y);
    }
}
