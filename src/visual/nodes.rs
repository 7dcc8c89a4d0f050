use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::camera::Viewport;
use crate::follower::{Follower, FollowerConfig, FollowerFrame};
use crate::input::Pointer;
use crate::roster::{Preset, PresetLibrary, Roster, RosterChange, RosterCommand};
use crate::visual::frames::FrameRequests;

/// World z per unit of `z_index`
const Z_PER_INDEX: f32 = 0.1;
/// Extra z per follower so siblings never z-fight
const Z_PER_SLOT: f32 = 0.01;
/// Eyes sit just in front of their body
const EYES_Z: f32 = 0.005;

/// A follower and the entity drawing its eyes
#[derive(Component, Debug)]
pub struct FollowerNode {
    pub follower: Follower,
    pub eyes: Entity,
    /// Spawn order within the roster
    pub slot: usize,
}

/// Marker for the eyes quad, a child of its follower
#[derive(Component)]
pub struct EyesNode;

/// Textured quad material; `None` for an empty image path (nothing drawn)
fn quad_material(
    asset_server: &AssetServer,
    image: &str,
    opacity: f32,
) -> Option<StandardMaterial> {
    if image.is_empty() {
        return None;
    }

    Some(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, opacity),
        base_color_texture: Some(asset_server.load(image.to_string())),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        // Mirroring is a negative scale, which flips the winding
        cull_mode: None,
        double_sided: true,
        ..default()
    })
}

/// Everything a system needs to create and start followers
#[derive(SystemParam)]
pub struct FollowerSpawner<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    asset_server: Res<'w, AssetServer>,
    pointer: Res<'w, Pointer>,
    requests: ResMut<'w, FrameRequests>,
}

impl FollowerSpawner<'_, '_> {
    /// Spawn the body and eyes entities for one started follower
    fn spawn_follower(&mut self, follower: Follower, slot: usize) -> Entity {
        let config = follower.config().clone();

        let mut eyes = self.commands.spawn((
            EyesNode,
            Transform::from_xyz(0.0, 0.0, EYES_Z),
            Visibility::Inherited,
        ));
        match &config.eyes {
            Some(eyes_config) => {
                if let Some(material) = quad_material(
                    &self.asset_server,
                    &eyes_config.background_image,
                    eyes_config.opacity,
                ) {
                    eyes.insert((
                        Mesh3d(
                            self.meshes
                                .add(Rectangle::new(eyes_config.width, eyes_config.height)),
                        ),
                        MeshMaterial3d(self.materials.add(material)),
                    ));
                }
            }
            None => {
                eyes.insert(Visibility::Hidden);
            }
        }
        let eyes = eyes.id();

        let mut body = self.commands.spawn((
            FollowerNode {
                follower,
                eyes,
                slot,
            },
            Transform::default(),
            // Shown by the first sync once a frame exists
            Visibility::Hidden,
        ));
        if let Some(material) =
            quad_material(&self.asset_server, &config.background_image, config.opacity)
        {
            body.insert((
                Mesh3d(self.meshes.add(Rectangle::new(config.width, config.height))),
                MeshMaterial3d(self.materials.add(material)),
            ));
        }
        body.add_child(eyes);

        body.id()
    }

    /// Create, start and spawn `count` followers of a preset
    pub fn spawn_preset(&mut self, preset: &Preset, count: usize) {
        for slot in 0..count {
            let mut follower = match Follower::from_options(&preset.follower) {
                Ok(follower) => follower,
                Err(e) => {
                    // One bad follower must not take the others down
                    warn!("Skipping follower for preset '{}': {}", preset.name, e);
                    continue;
                }
            };
            follower.start(&self.pointer.0, &mut self.requests.queue);
            self.spawn_follower(follower, slot);
        }

        info!("Spawned {} x '{}' ({})", count, preset.name, preset.label);
    }

    fn despawn(&mut self, entity: Entity) {
        self.commands.entity(entity).despawn();
    }
}

/// Body transform in world space: box center, mirrored by negative scale
pub fn body_transform(
    frame: &FollowerFrame,
    config: &FollowerConfig,
    viewport: &Viewport,
    slot: usize,
) -> Transform {
    let size = Vec2::new(config.width, config.height);
    let center = viewport.page_to_world(frame.translation + size * 0.5);
    let z = config.z_index as f32 * Z_PER_INDEX + slot as f32 * Z_PER_SLOT;

    Transform {
        translation: center.extend(z),
        scale: Vec3::new(
            if frame.flip_x { -1.0 } else { 1.0 },
            if frame.flip_y { -1.0 } else { 1.0 },
            1.0,
        ),
        ..default()
    }
}

/// Eyes position relative to the body center, y up
pub fn eyes_local_translation(eyes_offset: Vec2, config: &FollowerConfig) -> Option<Vec3> {
    let eyes = config.eyes.as_ref()?;
    let body_half = Vec2::new(config.width, config.height) * 0.5;
    let eyes_half = Vec2::new(eyes.width, eyes.height) * 0.5;
    let local = eyes_offset + eyes_half - body_half;

    Some(Vec3::new(local.x, -local.y, EYES_Z))
}

/// System: spawn the active preset at startup
pub fn spawn_initial_followers(
    mut spawner: FollowerSpawner,
    library: Res<PresetLibrary>,
    roster: Res<Roster>,
) {
    let Some(preset) = library.get(roster.active()) else {
        warn!("Active preset '{}' not found", roster.active());
        return;
    };

    spawner.spawn_preset(preset, roster.count());
}

/// System: switch presets and toggle hide/show or stop/start
pub fn apply_roster_commands(
    mut incoming: MessageReader<RosterCommand>,
    mut spawner: FollowerSpawner,
    library: Res<PresetLibrary>,
    mut roster: ResMut<Roster>,
    mut nodes: Query<(Entity, &mut FollowerNode)>,
) {
    let mut respawn = false;

    for command in incoming.read() {
        match roster.apply(command, &library) {
            // Several switches in one frame collapse into a single respawn
            RosterChange::Respawn => respawn = true,
            RosterChange::Visibility(true) => {
                for (_, mut node) in &mut nodes {
                    node.follower
                        .show(&spawner.pointer.0, &mut spawner.requests.queue);
                }
                info!("Followers shown");
            }
            RosterChange::Visibility(false) => {
                for (_, mut node) in &mut nodes {
                    node.follower.hide();
                }
                info!("Followers hidden");
            }
            RosterChange::Running(true) => {
                for (_, mut node) in &mut nodes {
                    node.follower
                        .start(&spawner.pointer.0, &mut spawner.requests.queue);
                }
                info!("Followers started");
            }
            RosterChange::Running(false) => {
                for (_, mut node) in &mut nodes {
                    node.follower.stop();
                }
                info!("Followers stopped");
            }
            RosterChange::Unchanged => {}
        }
    }

    if !respawn {
        return;
    }

    for (entity, _) in &nodes {
        spawner.despawn(entity);
    }

    let Some(preset) = library.get(roster.active()) else {
        warn!("Active preset '{}' not found", roster.active());
        return;
    };
    spawner.spawn_preset(preset, roster.count());
}

/// System: copy each follower's last frame onto its entities
pub fn sync_follower_nodes(
    viewport: Res<Viewport>,
    mut bodies: Query<(&FollowerNode, &mut Transform, &mut Visibility), Without<EyesNode>>,
    mut eyes: Query<&mut Transform, With<EyesNode>>,
) {
    for (node, mut transform, mut visibility) in &mut bodies {
        let follower = &node.follower;
        let Some(frame) = follower.last_frame() else {
            continue;
        };

        *visibility = if follower.is_visible() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        *transform = body_transform(frame, follower.config(), &viewport, node.slot);
        trace!(
            "follower {}: {} eyes {:?}",
            follower.id(),
            frame.body_transform(),
            frame.eyes_transform()
        );

        let local = frame
            .eyes
            .and_then(|offset| eyes_local_translation(offset, follower.config()));
        if let (Some(local), Ok(mut eyes_transform)) = (local, eyes.get_mut(node.eyes)) {
            eyes_transform.translation = local;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(translation: Vec2, flip_x: bool, flip_y: bool) -> FollowerFrame {
        FollowerFrame {
            translation,
            flip_x,
            flip_y,
            eyes: None,
        }
    }

    #[test]
    fn test_body_transform_centers_box() {
        let config = FollowerConfig::default();
        let viewport = Viewport::new(800.0, 600.0);

        // Box top-left at page (375, 275): center is the page center
        let transform = body_transform(
            &frame(Vec2::new(375.0, 275.0), false, false),
            &config,
            &viewport,
            0,
        );

        assert_eq!(transform.translation.truncate(), Vec2::ZERO);
        assert_eq!(transform.translation.z, 1000.0 * Z_PER_INDEX);
        assert_eq!(transform.scale, Vec3::ONE);
    }

    #[test]
    fn test_body_transform_mirrors_with_negative_scale() {
        let config = FollowerConfig::default();
        let viewport = Viewport::default();

        let transform = body_transform(&frame(Vec2::ZERO, true, false), &config, &viewport, 0);
        assert_eq!(transform.scale, Vec3::new(-1.0, 1.0, 1.0));

        let transform = body_transform(&frame(Vec2::ZERO, false, true), &config, &viewport, 0);
        assert_eq!(transform.scale, Vec3::new(1.0, -1.0, 1.0));
    }

    #[test]
    fn test_slots_stack_in_z() {
        let config = FollowerConfig::default();
        let viewport = Viewport::default();
        let f = frame(Vec2::ZERO, false, false);

        let first = body_transform(&f, &config, &viewport, 0);
        let second = body_transform(&f, &config, &viewport, 1);
        assert!(second.translation.z > first.translation.z);
    }

    #[test]
    fn test_centered_eyes_sit_on_body_center() {
        let config = FollowerConfig::default();

        // (19, 17) centers 12x16 eyes in a 50x50 body
        let local = eyes_local_translation(Vec2::new(19.0, 17.0), &config).unwrap();
        assert_eq!(local, Vec3::new(0.0, 0.0, EYES_Z));
    }

    #[test]
    fn test_eyes_looking_down_move_down_in_world() {
        let config = FollowerConfig::default();

        let local = eyes_local_translation(Vec2::new(19.0, 22.0), &config).unwrap();
        assert_eq!(local.x, 0.0);
        assert_eq!(local.y, -5.0);
    }

    #[test]
    fn test_disabled_eyes_have_no_translation() {
        let config = FollowerConfig {
            eyes: None,
            ..Default::default()
        };
        assert!(eyes_local_translation(Vec2::ZERO, &config).is_none());
    }
}
