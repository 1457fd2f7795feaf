//! Enemy systems - sensing, ticking and presentation playback.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{ExpireEffect, HazardZone, ImpactBurst};
use super::enemy::{Enemy, TickContext};
use crate::combat::{Player, ScreenShake};
use crate::core::{
    EffectKind, Facing, FrameClock, FrameWorld, PlayerView, PresentationQueue,
    PresentationRequest, Scheduler, Sensors, SpawnEvent,
};

/// Thickness of the contact probes around an enemy's bounds.
const SKIN: f32 = 2.0;
/// Ticks an impact burst stays on screen.
const EFFECT_TICKS: u64 = 12;

/// Does any fixed, non-sensor collider overlap `area`?
pub fn overlaps_fixed(context: &RapierContext, area: Rect) -> bool {
    if area.is_empty() {
        return false;
    }
    let half = area.half_size();
    context
        .intersection_with_shape(
            area.center(),
            0.0,
            &Collider::cuboid(half.x, half.y),
            QueryFilter::only_fixed().exclude_sensors(),
        )
        .is_some()
}

/// Ground and wall contact around `bounds`.
pub fn sample_sensors(context: &RapierContext, bounds: Rect) -> Sensors {
    let feet = Rect::new(
        bounds.min.x + SKIN,
        bounds.min.y - SKIN,
        bounds.max.x - SKIN,
        bounds.min.y,
    );
    let left = Rect::new(
        bounds.min.x - SKIN,
        bounds.min.y + SKIN,
        bounds.min.x,
        bounds.max.y - SKIN,
    );
    let right = Rect::new(
        bounds.max.x,
        bounds.min.y + SKIN,
        bounds.max.x + SKIN,
        bounds.max.y - SKIN,
    );

    Sensors {
        grounded: overlaps_fixed(context, feet),
        wall_left: overlaps_fixed(context, left),
        wall_right: overlaps_fixed(context, right),
    }
}

/// Slow enemies standing in a hazard zone.
pub fn apply_hazard_zones(
    zones: Query<&HazardZone>,
    mut enemies: Query<(&Transform, &mut Enemy)>,
) {
    for (transform, mut enemy) in enemies.iter_mut() {
        let position = transform.translation.truncate();
        let multiplier = zones
            .iter()
            .find(|zone| zone.contains(position))
            .map(|zone| zone.multiplier);
        enemy.set_hazard(multiplier);
    }
}

/// Run one AI tick for every enemy and play back what it asked for.
#[allow(clippy::too_many_arguments)]
pub fn tick_enemies(
    mut commands: Commands,
    time: Res<Time>,
    clock: Res<FrameClock>,
    mut effects: ResMut<Scheduler<ExpireEffect>>,
    mut screen_shake: ResMut<ScreenShake>,
    rapier_context: Query<&RapierContext>,
    player_query: Query<&Transform, With<Player>>,
    mut enemies: Query<(Entity, &Transform, &mut Velocity, &mut Enemy), Without<Player>>,
    mut spawn_events: EventWriter<SpawnEvent>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let player = PlayerView {
        position: player_transform.translation.truncate(),
    };
    let solid = |area: Rect| overlaps_fixed(context, area);

    for (entity, transform, mut velocity, mut enemy) in enemies.iter_mut() {
        enemy.sync_body(transform.translation.truncate(), velocity.linvel);

        let sensors = if enemy.collision_enabled() {
            sample_sensors(context, enemy.bounds())
        } else {
            Sensors::default()
        };
        let mut world = FrameWorld::new(sensors, &solid);
        let mut presentation = PresentationQueue::default();

        enemy.tick(&mut TickContext {
            delta: time.delta_secs(),
            player,
            world: &mut world,
            presentation: &mut presentation,
        });
        velocity.linvel = enemy.velocity();

        for spawn in world.take_spawns() {
            spawn_events.send(SpawnEvent(spawn));
        }
        if world.collision_change() == Some(false) {
            commands.entity(entity).insert(ColliderDisabled);
        }

        for request in presentation.drain() {
            match request {
                // Sprite colour follows the derived appearance.
                PresentationRequest::Tint(_) => {}
                PresentationRequest::Shake {
                    intensity,
                    duration,
                } => screen_shake.shake(intensity, duration),
                PresentationRequest::Effect { kind, at } => {
                    let burst = spawn_impact(&mut commands, kind, at);
                    effects.schedule_in(clock.now(), EFFECT_TICKS, ExpireEffect(burst));
                }
            }
        }
    }
}

fn spawn_impact(commands: &mut Commands, kind: EffectKind, at: Vec2) -> Entity {
    let (color, size) = match kind {
        EffectKind::GroundImpact => (Color::srgba(0.8, 0.7, 0.5, 0.8), Vec2::new(26.0, 6.0)),
        EffectKind::WallImpact => (Color::srgba(1.0, 1.0, 1.0, 0.8), Vec2::new(6.0, 22.0)),
    };
    commands
        .spawn((
            ImpactBurst,
            Sprite::from_color(color, size),
            Transform::from_translation(at.extend(3.0)),
        ))
        .id()
}

/// Remove impact bursts whose time is up.
pub fn expire_effects(
    mut commands: Commands,
    clock: Res<FrameClock>,
    mut effects: ResMut<Scheduler<ExpireEffect>>,
    bursts: Query<(), With<ImpactBurst>>,
) {
    for ExpireEffect(entity) in effects.drain_due(clock.now()) {
        if bursts.get(entity).is_ok() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Copy each enemy's derived appearance onto its sprite.
pub fn sync_enemy_appearance(mut enemies: Query<(&Enemy, &mut Sprite, &mut Transform)>) {
    for (enemy, mut sprite, mut transform) in enemies.iter_mut() {
        let appearance = enemy.appearance();
        sprite.color = appearance.tint.color().with_alpha(appearance.opacity);
        sprite.flip_x = appearance.facing == Facing::Left;
        transform.scale = Vec3::splat(appearance.scale.max(0.01));
    }
}

/// Remove enemies whose death sequence has finished.
pub fn despawn_finished_enemies(mut commands: Commands, enemies: Query<(Entity, &Enemy)>) {
    for (entity, enemy) in enemies.iter() {
        if enemy.is_removable() {
            debug!("Removing {}", enemy.name());
            commands.entity(entity).despawn_recursive();
        }
    }
}
