//! Coin lifecycle through the loot plugin: spawn, settle and pickup.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy_rapier2d::prelude::*;

use hollowblade::combat::{Player, PlayerCombat};
use hollowblade::core::{
    CorePlugin, DynamicSpawn, FrameClock, GameState, PickupCollectedEvent, Scheduler, SpawnEvent,
};
use hollowblade::loot::{Coin, LootPlugin, Purse, SettleCoin, SETTLE_TICKS};

#[derive(Resource, Default)]
struct Collected(Vec<PickupCollectedEvent>);

fn record_pickups(mut events: EventReader<PickupCollectedEvent>, mut collected: ResMut<Collected>) {
    collected.0.extend(events.read().copied());
}

fn loot_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .add_plugins((CorePlugin, LootPlugin))
        .init_resource::<Collected>()
        .add_systems(Last, record_pickups);
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
    app
}

fn drop_coin(app: &mut App, position: Vec2) -> Entity {
    app.world_mut().send_event(SpawnEvent(DynamicSpawn::Coin {
        position,
        velocity: Vec2::new(30.0, 200.0),
    }));
    app.update();

    let mut coins = app.world_mut().query_filtered::<Entity, With<Coin>>();
    coins.single(app.world())
}

fn spawn_player(app: &mut App, position: Vec2) {
    app.world_mut().spawn((
        Player,
        PlayerCombat::new(5, Vec2::new(16.0, 28.0)),
        Transform::from_translation(position.extend(0.0)),
    ));
}

fn now(app: &App) -> u64 {
    app.world().resource::<FrameClock>().now()
}

#[test]
fn coin_settles_after_the_delay_and_lands_in_the_purse() {
    let mut app = loot_app();
    let coin = drop_coin(&mut app, Vec2::new(40.0, 0.0));
    let dropped_at = now(&app);

    assert!(matches!(
        app.world().get::<RigidBody>(coin),
        Some(RigidBody::Dynamic)
    ));
    assert_eq!(app.world().resource::<Scheduler<SettleCoin>>().len(), 1);

    while now(&app) < dropped_at + SETTLE_TICKS - 1 {
        app.update();
    }
    assert!(matches!(
        app.world().get::<RigidBody>(coin),
        Some(RigidBody::Dynamic)
    ));

    app.update();
    app.update();
    assert!(matches!(
        app.world().get::<RigidBody>(coin),
        Some(RigidBody::Fixed)
    ));
    assert!(app.world().get::<Sensor>(coin).is_some());
    let velocity = app.world().get::<Velocity>(coin).expect("coin has a velocity");
    assert_eq!(velocity.linvel, Vec2::ZERO);
    assert_eq!(velocity.angvel, 0.0);
    assert!(app.world().resource::<Scheduler<SettleCoin>>().is_empty());
    assert_eq!(app.world().resource::<Purse>().coins, 0);

    spawn_player(&mut app, Vec2::new(40.0, 0.0));
    app.update();

    assert_eq!(app.world().resource::<Purse>().coins, 1);
    assert!(app.world().get::<Coin>(coin).is_none());
    let collected = &app.world().resource::<Collected>().0;
    assert_eq!(collected.len(), 1);
    assert_eq!(collected[0].pickup, coin);
    assert_eq!(collected[0].total, 1);
}

#[test]
fn coin_out_of_reach_stays_put() {
    let mut app = loot_app();
    spawn_player(&mut app, Vec2::new(-200.0, 0.0));
    let coin = drop_coin(&mut app, Vec2::new(40.0, 0.0));

    for _ in 0..5 {
        app.update();
    }

    assert!(app.world().get::<Coin>(coin).is_some());
    assert_eq!(app.world().resource::<Purse>().coins, 0);
    assert!(app.world().resource::<Collected>().0.is_empty());
}

#[test]
fn coin_collected_before_settling_is_not_revisited() {
    let mut app = loot_app();
    spawn_player(&mut app, Vec2::new(40.0, 0.0));
    app.world_mut().send_event(SpawnEvent(DynamicSpawn::Coin {
        position: Vec2::new(40.0, 0.0),
        velocity: Vec2::ZERO,
    }));
    app.update();

    assert_eq!(app.world().resource::<Purse>().coins, 1);
    assert_eq!(app.world().resource::<Scheduler<SettleCoin>>().len(), 1);

    let collected_at = now(&app);
    while now(&app) <= collected_at + SETTLE_TICKS {
        app.update();
    }

    assert!(app.world().resource::<Scheduler<SettleCoin>>().is_empty());
    assert_eq!(app.world().resource::<Purse>().coins, 1);
    let mut coins = app.world_mut().query::<&Coin>();
    assert_eq!(coins.iter(app.world()).count(), 0);
}
