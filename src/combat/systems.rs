//! Combat systems - attack sources, damage resolution and feedback.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::hit::{order_pending_hits, Hit, SwingIdAllocator};
use crate::core::{
    CombatRng, DamageEvent, DeathEvent, DynamicSpawn, FrameWorld, GameState, Sensors, SpawnEvent,
};
use crate::enemies::Enemy;

/// Horizontal reach of a player swing, measured from the player's centre.
const SWING_REACH: f32 = 22.0;
const SWING_SIZE: Vec2 = Vec2::new(28.0, 24.0);
/// How long a swing hitbox stays active, in seconds.
const SWING_LIFETIME: f32 = 0.12;

const PROJECTILE_RADIUS: f32 = 4.0;
const PROJECTILE_LIFETIME: f32 = 3.0;

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Attack sources come into being.
    Input,
    /// Overlaps become queued hits.
    Detect,
    /// Queued hits are sorted and applied.
    Damage,
    Feedback,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // Resources
        .init_resource::<ScreenShake>()
        .init_resource::<SwingIdAllocator>()

        // Events
        .add_event::<PlayerSwingEvent>()

        // System ordering
        .configure_sets(
            Update,
            (
                CombatSet::Input,
                CombatSet::Detect,
                CombatSet::Damage,
                CombatSet::Feedback,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        )

        // Input systems
        .add_systems(
            Update,
            (start_player_swings, spawn_projectiles, tick_player_timers)
                .in_set(CombatSet::Input),
        )

        // Detection systems
        .add_systems(
            Update,
            (swing_hits, projectile_hits, contact_hits).in_set(CombatSet::Detect),
        )

        // Damage systems
        .add_systems(
            Update,
            (resolve_damage, check_player_death)
                .chain()
                .in_set(CombatSet::Damage),
        )

        // Feedback systems
        .add_systems(
            Update,
            (update_screen_shake, sync_player_flash).in_set(CombatSet::Feedback),
        );
}

/// Turn swing requests into short-lived hitboxes with fresh swing ids.
fn start_player_swings(
    mut commands: Commands,
    mut swings: EventReader<PlayerSwingEvent>,
    mut allocator: ResMut<SwingIdAllocator>,
    player_query: Query<(&Transform, &PlayerCombat), With<Player>>,
) {
    let Ok((transform, combat)) = player_query.get_single() else {
        swings.clear();
        return;
    };

    for swing in swings.read() {
        if combat.actor.is_dead() || combat.is_stunned() {
            continue;
        }

        let id = allocator.next();
        let center = transform.translation.truncate() + Vec2::new(swing.facing.sign() * SWING_REACH, 0.0);
        debug!("Player swing {:?} facing {:?}", id, swing.facing);

        commands.spawn((
            SwingHitbox {
                swing: id,
                damage: swing.damage,
                size: SWING_SIZE,
                lifetime: SWING_LIFETIME,
            },
            Transform::from_translation(center.extend(5.0)),
        ));
    }
}

/// Spawn the projectiles enemies asked for, one swing id each.
fn spawn_projectiles(
    mut commands: Commands,
    mut spawns: EventReader<SpawnEvent>,
    mut allocator: ResMut<SwingIdAllocator>,
) {
    for SpawnEvent(spawn) in spawns.read() {
        let DynamicSpawn::Projectile {
            position,
            velocity,
            damage,
        } = *spawn
        else {
            continue;
        };

        commands.spawn((
            Projectile {
                swing: allocator.next(),
                damage,
                radius: PROJECTILE_RADIUS,
                lifetime: PROJECTILE_LIFETIME,
            },
            Sprite::from_color(
                Color::srgb(0.9, 0.4, 1.0),
                Vec2::splat(PROJECTILE_RADIUS * 2.0),
            ),
            Transform::from_translation(position.extend(4.0)),
            RigidBody::KinematicVelocityBased,
            Velocity::linear(velocity),
            Collider::ball(PROJECTILE_RADIUS),
            Sensor,
        ));
    }
}

fn tick_player_timers(time: Res<Time>, mut player_query: Query<&mut PlayerCombat, With<Player>>) {
    for mut combat in player_query.iter_mut() {
        combat.timers.tick(time.delta_secs());
    }
}

/// Queue a hit for every enemy a live hitbox overlaps.
fn swing_hits(
    mut commands: Commands,
    time: Res<Time>,
    mut hitboxes: Query<(Entity, &Transform, &mut SwingHitbox)>,
    player_query: Query<&Transform, With<Player>>,
    enemy_query: Query<(Entity, &Enemy)>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let source_x = player_query
        .get_single()
        .map(|transform| transform.translation.x)
        .unwrap_or_default();

    for (hitbox_entity, transform, mut hitbox) in hitboxes.iter_mut() {
        let area = Rect::from_center_size(transform.translation.truncate(), hitbox.size);

        for (enemy_entity, enemy) in enemy_query.iter() {
            if enemy.is_dead() || area.intersect(enemy.bounds()).is_empty() {
                continue;
            }
            damage_events.send(DamageEvent {
                target: enemy_entity,
                hit: Hit::new(hitbox.damage, source_x, hitbox.swing),
            });
        }

        hitbox.lifetime -= time.delta_secs();
        if hitbox.lifetime <= 0.0 {
            commands.entity(hitbox_entity).despawn_recursive();
        }
    }
}

/// Projectiles hurt the player on contact and vanish on level geometry.
fn projectile_hits(
    mut commands: Commands,
    time: Res<Time>,
    mut projectiles: Query<(Entity, &Transform, &mut Projectile)>,
    player_query: Query<(Entity, &Transform, &PlayerCombat), With<Player>>,
    rapier_context: Query<&RapierContext>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let player = player_query.get_single().ok();
    let context = rapier_context.get_single().ok();

    for (entity, transform, mut projectile) in projectiles.iter_mut() {
        let position = transform.translation.truncate();

        if let Some((player_entity, player_transform, combat)) = player {
            let bounds = combat.bounds(player_transform.translation.truncate());
            let nearest = position.clamp(bounds.min, bounds.max);
            if nearest.distance(position) <= projectile.radius {
                damage_events.send(DamageEvent {
                    target: player_entity,
                    hit: Hit::new(projectile.damage, position.x, projectile.swing),
                });
                commands.entity(entity).despawn_recursive();
                continue;
            }
        }

        let hit_wall = context.is_some_and(|context| {
            context
                .intersection_with_shape(
                    position,
                    0.0,
                    &Collider::ball(projectile.radius),
                    QueryFilter::only_fixed().exclude_sensors(),
                )
                .is_some()
        });

        projectile.lifetime -= time.delta_secs();
        if hit_wall || projectile.lifetime <= 0.0 {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Enemy bodies hurt the player while overlapping.
fn contact_hits(
    player_query: Query<(Entity, &Transform, &PlayerCombat), With<Player>>,
    enemy_query: Query<&Enemy>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok((player_entity, transform, combat)) = player_query.get_single() else {
        return;
    };
    let bounds = combat.bounds(transform.translation.truncate());

    for enemy in enemy_query.iter() {
        let Some(hit) = enemy.contact_hit() else {
            continue;
        };
        if !bounds.intersect(enemy.bounds()).is_empty() {
            damage_events.send(DamageEvent {
                target: player_entity,
                hit,
            });
        }
    }
}

/// Apply every hit queued this frame in swing-id order.
#[allow(clippy::too_many_arguments)]
fn resolve_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut enemy_query: Query<(&mut Enemy, &mut Velocity), Without<Player>>,
    mut player_query: Query<(&Transform, &mut PlayerCombat, &mut Velocity), With<Player>>,
    mut rng: ResMut<CombatRng>,
    mut screen_shake: ResMut<ScreenShake>,
    mut spawn_events: EventWriter<SpawnEvent>,
    mut death_events: EventWriter<DeathEvent>,
) {
    let mut pending: Vec<_> = damage_events
        .read()
        .map(|event| (event.target, event.hit))
        .collect();
    if pending.is_empty() {
        return;
    }
    order_pending_hits(&mut pending);

    let no_solid = |_: Rect| false;

    for (target, hit) in pending {
        if let Ok((mut enemy, mut velocity)) = enemy_query.get_mut(target) {
            let was_dead = enemy.is_dead();
            let position = enemy.position();
            enemy.sync_body(position, velocity.linvel);

            let mut world = FrameWorld::new(Sensors::default(), &no_solid);
            if !enemy.apply_damage(&hit, &mut world, &mut rng.rng) {
                continue;
            }
            velocity.linvel = enemy.velocity();
            screen_shake.shake(1.5, 0.1);

            for spawn in world.take_spawns() {
                spawn_events.send(SpawnEvent(spawn));
            }
            if world.collision_change() == Some(false) {
                commands
                    .entity(target)
                    .insert((ColliderDisabled, RigidBody::Fixed));
            }

            if !was_dead && enemy.is_dead() {
                death_events.send(DeathEvent {
                    entity: target,
                    position: enemy.position(),
                    name: enemy.name().to_string(),
                    drops: enemy.death().map_or(0, |death| death.drops),
                });
            }
        } else if let Ok((transform, mut combat, mut velocity)) = player_query.get_mut(target) {
            let was_dead = combat.actor.is_dead();
            let outcome = combat.take_hit(&hit, transform.translation.x, &mut velocity.linvel);
            if !outcome.landed() {
                continue;
            }

            debug!("Player hit for {} ({} hp left)", hit.damage, combat.actor.hp());
            screen_shake.shake(3.0, 0.2);

            if !was_dead && combat.actor.is_dead() {
                death_events.send(DeathEvent {
                    entity: target,
                    position: transform.translation.truncate(),
                    name: "Player".to_string(),
                    drops: 0,
                });
            }
        }
    }
}

/// End the run when the player dies.
fn check_player_death(
    mut death_events: EventReader<DeathEvent>,
    player_query: Query<Entity, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in death_events.read() {
        if player_query.get(event.entity).is_ok() {
            info!("Player died! Transitioning to Game Over...");
            next_state.set(GameState::GameOver);
        }
    }
}

/// Apply screen shake as an offset from each camera's anchor.
fn update_screen_shake(
    time: Res<Time>,
    mut screen_shake: ResMut<ScreenShake>,
    mut rng: ResMut<CombatRng>,
    mut camera_query: Query<(&mut Transform, &ShakeAnchor), With<Camera2d>>,
) {
    let offset = screen_shake.update(time.delta_secs(), &mut rng.rng);

    for (mut transform, anchor) in camera_query.iter_mut() {
        transform.translation = anchor.base + offset.extend(0.0);
    }
}

fn sync_player_flash(mut player_query: Query<(&PlayerCombat, &mut Sprite), With<Player>>) {
    for (combat, mut sprite) in player_query.iter_mut() {
        sprite.color = combat.tint().color();
    }
}
