//! Hollowblade - Entry Point
//!
//! A single test room: one enemy of every archetype, a slowing hazard and a
//! player that swings on a fixed rhythm so the combat loop runs unattended.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use hollowblade::combat::{Player, PlayerCombat, PlayerSwingEvent, ShakeAnchor};
use hollowblade::core::{Facing, GameState, Tint};
use hollowblade::enemies::{HazardZone, SpawnPoint};

const PLAYER_SIZE: Vec2 = Vec2::new(16.0, 28.0);
const FLOOR_Y: f32 = -120.0;

/// Time between the demo player's swings.
#[derive(Resource)]
struct SwingRhythm(Timer);

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Hollowblade".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(32.0))

        // Our game plugin
        .add_plugins(hollowblade::HollowbladePlugin)

        .insert_resource(SwingRhythm(Timer::from_seconds(0.8, TimerMode::Repeating)))
        .add_systems(Startup, setup_room)
        .add_systems(Update, swing_on_rhythm.run_if(in_state(GameState::InGame)))
        .run();
}

fn setup_room(mut commands: Commands) {
    commands.spawn((Camera2d, Transform::default(), ShakeAnchor::default()));

    // Floor and the two walls bounding the room
    for (center, size) in [
        (Vec2::new(0.0, FLOOR_Y - 10.0), Vec2::new(1200.0, 20.0)),
        (Vec2::new(-610.0, 60.0), Vec2::new(20.0, 380.0)),
        (Vec2::new(610.0, 60.0), Vec2::new(20.0, 380.0)),
        // Raised ledge for patrol edge turns
        (Vec2::new(-330.0, -30.0), Vec2::new(180.0, 16.0)),
    ] {
        commands.spawn((
            Sprite::from_color(Color::srgb(0.25, 0.25, 0.3), size),
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Fixed,
            Collider::cuboid(size.x * 0.5, size.y * 0.5),
        ));
    }

    let hazard = Rect::from_center_size(Vec2::new(180.0, FLOOR_Y + 40.0), Vec2::new(140.0, 80.0));
    commands.spawn((
        HazardZone {
            area: hazard,
            multiplier: 0.4,
        },
        Sprite::from_color(Color::srgba(0.3, 0.6, 0.3, 0.35), hazard.size()),
        Transform::from_translation(hazard.center().extend(1.0)),
    ));

    commands.spawn((
        Player,
        PlayerCombat::new(12, PLAYER_SIZE),
        Sprite::from_color(Tint::Normal.color(), PLAYER_SIZE),
        Transform::from_translation(Vec3::new(0.0, FLOOR_Y + PLAYER_SIZE.y * 0.5, 2.0)),
        RigidBody::Dynamic,
        Collider::cuboid(PLAYER_SIZE.x * 0.5, PLAYER_SIZE.y * 0.5),
        LockedAxes::ROTATION_LOCKED,
        Velocity::zero(),
    ));

    for (archetype, x, y) in [
        ("charger", -200.0, FLOOR_Y + 20.0),
        ("brute", 220.0, FLOOR_Y + 30.0),
        ("warden", 460.0, FLOOR_Y + 40.0),
        ("scuttler", -330.0, 0.0),
        ("drifter", -480.0, FLOOR_Y + 20.0),
    ] {
        commands.spawn((
            SpawnPoint::new(archetype),
            Transform::from_translation(Vec3::new(x, y, 0.0)),
        ));
    }
}

/// Swing every beat, alternating sides.
fn swing_on_rhythm(
    time: Res<Time>,
    mut rhythm: ResMut<SwingRhythm>,
    player_query: Query<&Transform, With<Player>>,
    mut swings: EventWriter<PlayerSwingEvent>,
    mut facing: Local<Option<Facing>>,
) {
    if !rhythm.0.tick(time.delta()).just_finished() {
        return;
    }
    if player_query.get_single().is_err() {
        return;
    }

    let next = facing.map_or(Facing::Right, Facing::flipped);
    *facing = Some(next);
    swings.send(PlayerSwingEvent {
        facing: next,
        damage: 3,
    });
}
