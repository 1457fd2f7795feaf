//! Loot plugin - coin bodies, settling and collection.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::drops::SETTLE_TICKS;
use crate::combat::{CombatSet, Player, PlayerCombat};
use crate::core::{DynamicSpawn, FrameClock, GameState, PickupCollectedEvent, Scheduler, SpawnEvent};

const COIN_RADIUS: f32 = 3.0;
/// Extra reach around the player's hurtbox for picking coins up.
const PICKUP_MARGIN: f32 = 4.0;

/// A dropped coin.
#[derive(Component)]
pub struct Coin;

/// Coins collected by the player this run.
#[derive(Resource, Debug, Default)]
pub struct Purse {
    pub coins: u32,
}

/// Deferred freeze of a coin once it has come to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleCoin(pub Entity);

/// Loot plugin - turns coin spawn requests into pickups.
pub struct LootPlugin;

impl Plugin for LootPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Purse>()
            .init_resource::<Scheduler<SettleCoin>>()
            .add_systems(
                Update,
                (spawn_coins, settle_coins, collect_coins)
                    .chain()
                    .after(CombatSet::Damage)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// Spawn a physics coin for every coin request and schedule its settle.
fn spawn_coins(
    mut commands: Commands,
    clock: Res<FrameClock>,
    mut spawns: EventReader<SpawnEvent>,
    mut settles: ResMut<Scheduler<SettleCoin>>,
) {
    for SpawnEvent(spawn) in spawns.read() {
        let DynamicSpawn::Coin { position, velocity } = *spawn else {
            continue;
        };

        let coin = commands
            .spawn((
                Coin,
                Sprite::from_color(Color::srgb(1.0, 0.85, 0.2), Vec2::splat(COIN_RADIUS * 2.0)),
                Transform::from_translation(position.extend(3.0)),
                RigidBody::Dynamic,
                Collider::ball(COIN_RADIUS),
                Restitution::coefficient(0.3),
                Velocity::linear(velocity),
                LockedAxes::ROTATION_LOCKED,
            ))
            .id();
        settles.schedule_in(clock.now(), SETTLE_TICKS, SettleCoin(coin));
    }
}

/// Freeze coins whose settle tick has come.
fn settle_coins(
    mut commands: Commands,
    clock: Res<FrameClock>,
    mut settles: ResMut<Scheduler<SettleCoin>>,
    coins: Query<(), With<Coin>>,
) {
    for SettleCoin(coin) in settles.drain_due(clock.now()) {
        if coins.get(coin).is_ok() {
            commands
                .entity(coin)
                .insert((RigidBody::Fixed, Sensor, Velocity::zero()));
        }
    }
}

/// Pick up every coin touching the player.
fn collect_coins(
    mut commands: Commands,
    mut purse: ResMut<Purse>,
    player_query: Query<(&Transform, &PlayerCombat), With<Player>>,
    coins: Query<(Entity, &Transform), With<Coin>>,
    mut collected: EventWriter<PickupCollectedEvent>,
) {
    let Ok((player_transform, combat)) = player_query.get_single() else {
        return;
    };
    if combat.actor.is_dead() {
        return;
    }

    let reach = combat
        .bounds(player_transform.translation.truncate())
        .inflate(PICKUP_MARGIN + COIN_RADIUS);

    for (coin, transform) in coins.iter() {
        if !reach.contains(transform.translation.truncate()) {
            continue;
        }
        purse.coins += 1;
        commands.entity(coin).despawn_recursive();
        collected.send(PickupCollectedEvent {
            pickup: coin,
            total: purse.coins,
        });
        debug!("Coin collected ({} total)", purse.coins);
    }
}
