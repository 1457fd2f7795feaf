//! End-to-end combat scenarios driven through the public enemy API.

use std::sync::Arc;

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hollowblade::combat::{Hit, SwingId};
use hollowblade::core::{
    Countdown, DynamicSpawn, Facing, FrameWorld, PlayerView, PresentationQueue, Sensors, Tint,
};
use hollowblade::enemies::behavior::{AttackBehavior, BossPhase};
use hollowblade::enemies::{AiState, ArchetypeRegistry, CombatConfig, Enemy, TickContext};

const DT: f32 = 1.0 / 60.0;

fn archetype(name: &str) -> CombatConfig {
    let registry = ArchetypeRegistry::builtin().expect("bundled archetypes are valid");
    (*registry.require(name).expect("archetype exists")).clone()
}

fn spawn(config: CombatConfig, position: Vec2) -> Enemy {
    Enemy::new(Arc::new(config), position).expect("valid config")
}

fn grounded() -> Sensors {
    Sensors {
        grounded: true,
        ..default()
    }
}

/// Tick `enemy` once with fixed contact flags and the given ground test.
fn tick(
    enemy: &mut Enemy,
    player: Vec2,
    sensors: Sensors,
    solid: &dyn Fn(Rect) -> bool,
    presentation: &mut PresentationQueue,
) -> Vec<DynamicSpawn> {
    let mut world = FrameWorld::new(sensors, solid);
    enemy.tick(&mut TickContext {
        delta: DT,
        player: PlayerView { position: player },
        world: &mut world,
        presentation,
    });
    world.take_spawns()
}

fn no_solid(_: Rect) -> bool {
    false
}

/// Apply one hit and hand back the world that recorded its side effects.
fn hit(
    enemy: &mut Enemy,
    damage: i32,
    source_x: f32,
    swing: u64,
    rng: &mut ChaCha8Rng,
) -> (bool, FrameWorld<'static>) {
    let mut world = FrameWorld::new(Sensors::default(), &no_solid);
    let landed = enemy.apply_damage(&Hit::new(damage, source_x, SwingId(swing)), &mut world, rng);
    (landed, world)
}

#[test]
fn hit_from_the_left_hurts_and_repeat_swing_is_ignored() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut enemy = spawn(archetype("charger"), Vec2::new(0.0, 10.0));
    assert_eq!(enemy.hp(), 10);

    let (landed, _) = hit(&mut enemy, 6, -40.0, 1, &mut rng);
    assert!(landed);
    assert_eq!(enemy.hp(), 4);
    assert_eq!(enemy.state(), AiState::Hurt);
    assert!(enemy.velocity().x > 0.0, "knocked rightward");
    assert!(enemy.timers().remaining(Countdown::Invulnerability) > 0.0);

    let (landed, _) = hit(&mut enemy, 6, -40.0, 1, &mut rng);
    assert!(!landed);
    assert_eq!(enemy.hp(), 4);
}

#[test]
fn same_swing_lands_once_even_after_invulnerability() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut presentation = PresentationQueue::default();
    let floor = |_: Rect| true;
    let mut enemy = spawn(archetype("brute"), Vec2::new(0.0, 10.0));
    let start = enemy.hp();

    assert!(hit(&mut enemy, 3, 20.0, 7, &mut rng).0);
    for _ in 0..120 {
        tick(&mut enemy, Vec2::new(900.0, 10.0), grounded(), &floor, &mut presentation);
    }
    assert!(enemy.timers().is_expired(Countdown::Invulnerability));

    assert!(!hit(&mut enemy, 3, 20.0, 7, &mut rng).0);
    assert_eq!(enemy.hp(), start - 3);
    assert!(hit(&mut enemy, 3, 20.0, 8, &mut rng).0);
    assert_eq!(enemy.hp(), start - 6);
}

#[test]
fn invulnerable_enemy_ignores_every_hit() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut enemy = spawn(archetype("brute"), Vec2::ZERO);
    assert!(hit(&mut enemy, 1, 0.0, 1, &mut rng).0);
    let hp = enemy.hp();

    for (swing, damage) in (2..20).zip([0, 1, 5, 29, 100].into_iter().cycle()) {
        assert!(!hit(&mut enemy, damage, 0.0, swing, &mut rng).0);
        assert_eq!(enemy.hp(), hp);
    }
}

#[test]
fn lethal_hit_disables_collision_and_drops_loot_before_fading_out() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut presentation = PresentationQueue::default();
    let floor = |_: Rect| true;
    let mut config = archetype("charger");
    config.max_hp = 5;
    let (min, max) = config.loot;
    let death_duration = config.death_duration;
    let mut enemy = spawn(config, Vec2::new(0.0, 10.0));

    let (landed, mut world) = hit(&mut enemy, 5, 30.0, 1, &mut rng);
    assert!(landed);
    assert_eq!(enemy.hp(), 0);
    assert_eq!(enemy.state(), AiState::Dead);
    assert_eq!(world.collision_change(), Some(false));
    assert!(!enemy.collision_enabled());

    let coins = world.take_spawns();
    assert!((min as usize..=max as usize).contains(&coins.len()));
    assert!(coins.iter().all(|spawn| matches!(spawn, DynamicSpawn::Coin { .. })));

    let mut elapsed = 0.0;
    while elapsed + DT < death_duration - 1e-3 {
        tick(&mut enemy, Vec2::new(0.0, 10.0), grounded(), &floor, &mut presentation);
        elapsed += DT;
        assert!(!enemy.is_removable(), "removed early at {elapsed}");
    }
    for _ in 0..3 {
        tick(&mut enemy, Vec2::new(0.0, 10.0), grounded(), &floor, &mut presentation);
    }
    assert!(enemy.is_removable());
}

#[test]
fn death_happens_once_and_hit_points_never_rise() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut presentation = PresentationQueue::default();
    let floor = |_: Rect| true;
    let mut enemy = spawn(archetype("charger"), Vec2::new(0.0, 10.0));
    let mut previous = enemy.hp();
    let mut deaths = 0;
    let mut coins = 0;

    for swing in 1..200 {
        let was_dead = enemy.is_dead();
        let damage = rng.gen_range(0..4);
        let (_, mut world) = hit(&mut enemy, damage, -10.0, swing, &mut rng);
        coins += world.take_spawns().len();
        if !was_dead && enemy.is_dead() {
            deaths += 1;
        }
        assert!(enemy.hp() <= previous);
        previous = enemy.hp();

        for _ in 0..10 {
            tick(&mut enemy, Vec2::new(300.0, 10.0), grounded(), &floor, &mut presentation);
        }
    }

    assert_eq!(deaths, 1);
    assert_eq!(enemy.death().map(|death| death.drops as usize), Some(coins));
}

#[test]
fn empty_loot_range_drops_nothing() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut config = archetype("charger");
    config.loot = (0, 0);
    let mut enemy = spawn(config, Vec2::ZERO);

    let (_, mut world) = hit(&mut enemy, 100, 0.0, 1, &mut rng);
    assert!(enemy.is_dead());
    assert!(world.take_spawns().is_empty());
}

#[test]
fn patrol_turns_once_at_a_platform_edge() {
    // Platform top at y = 0, right edge at x = 105.
    let platform = Rect::new(-200.0, -20.0, 105.0, 0.0);
    let solid = move |area: Rect| !area.intersect(platform).is_empty();
    let mut presentation = PresentationQueue::default();
    let mut enemy = spawn(archetype("charger"), Vec2::new(100.0, 10.0));
    assert_eq!(enemy.patrol_direction(), Facing::Right);

    let mut turns = 0;
    let mut direction = enemy.patrol_direction();
    for frame in 0..90 {
        tick(&mut enemy, Vec2::new(-900.0, 10.0), grounded(), &solid, &mut presentation);
        if enemy.patrol_direction() != direction {
            turns += 1;
            direction = enemy.patrol_direction();
            if frame == 0 {
                assert!(enemy.timers().is_active(Countdown::TurnCooldown));
            }
        }
        assert!(enemy.velocity().x <= 0.0, "walking off the edge");
    }

    assert_eq!(turns, 1);
    assert_eq!(enemy.patrol_direction(), Facing::Left);
}

#[test]
fn aggro_does_not_thrash_between_radii() {
    let mut presentation = PresentationQueue::default();
    let floor = |_: Rect| true;
    let config = archetype("scuttler");
    let (aggro, deaggro) = (config.aggro_radius, config.deaggro_radius);
    let mut enemy = spawn(config, Vec2::new(0.0, 10.0));
    let between = (aggro + deaggro) * 0.5;

    // Close in once, then hover between the radii.
    tick(&mut enemy, Vec2::new(aggro - 1.0, 10.0), grounded(), &floor, &mut presentation);
    assert_eq!(enemy.state(), AiState::Aggro);

    let mut changes = 0;
    let mut state = enemy.state();
    for frame in 0..120 {
        let wobble = if frame % 2 == 0 { 2.0 } else { -2.0 };
        tick(&mut enemy, Vec2::new(between + wobble, 10.0), grounded(), &floor, &mut presentation);
        if enemy.state() != state {
            changes += 1;
            state = enemy.state();
        }
    }
    assert_eq!(changes, 0);

    tick(&mut enemy, Vec2::new(deaggro + 1.0, 10.0), grounded(), &floor, &mut presentation);
    assert_eq!(enemy.state(), AiState::Patrol);
}

fn boss_phase(enemy: &Enemy) -> BossPhase {
    match enemy.behavior() {
        AttackBehavior::Boss(boss) => boss.phase(),
        other => panic!("expected a boss, got {other:?}"),
    }
}

#[test]
fn boss_ranged_move_fires_once_at_the_players_position_at_fire_time() {
    let mut presentation = PresentationQueue::default();
    let floor = |_: Rect| true;
    let config = archetype("warden");
    let origin = Vec2::new(0.0, 30.0);
    let mut enemy = spawn(config, origin);
    let mut player = Vec2::new(150.0, 30.0);

    // The cycle opens with a hop sequence; run it out.
    let mut frames = 0;
    while boss_phase(&enemy) != BossPhase::RangedWindup {
        let spawns = tick(&mut enemy, player, grounded(), &floor, &mut presentation);
        assert!(spawns.is_empty());
        frames += 1;
        assert!(frames < 600, "boss never reached the ranged move");
    }
    assert_eq!(enemy.appearance().tint, Tint::Telegraph);

    // The player keeps moving through the windup; only the final spot counts.
    let mut projectiles = Vec::new();
    while projectiles.is_empty() {
        player += Vec2::new(-1.0, 1.5);
        projectiles = tick(&mut enemy, player, grounded(), &floor, &mut presentation);
        frames += 1;
        assert!(frames < 1200, "boss never fired");
    }
    let fired_at = player;

    assert_eq!(projectiles.len(), 1);
    let DynamicSpawn::Projectile { position, velocity, .. } = projectiles[0] else {
        panic!("expected a projectile");
    };
    assert_eq!(position, origin);
    let expected = (fired_at - origin).normalize();
    assert!(velocity.normalize().distance(expected) < 1e-4);
    let AttackBehavior::Boss(boss) = enemy.behavior() else {
        panic!("expected a boss");
    };
    let aim = boss.last_aim().expect("boss recorded its aim");
    assert!(aim.distance(expected) < 1e-4);
    assert_eq!(boss_phase(&enemy), BossPhase::RangedRecovery);
    assert_ne!(enemy.appearance().tint, Tint::Telegraph);

    // Recovery ends in cooldown without firing again.
    while boss_phase(&enemy) == BossPhase::RangedRecovery {
        player += Vec2::new(-1.0, 0.0);
        let spawns = tick(&mut enemy, player, grounded(), &floor, &mut presentation);
        assert!(spawns.is_empty());
        frames += 1;
        assert!(frames < 1800, "boss never recovered");
    }
    assert_eq!(boss_phase(&enemy), BossPhase::Ready);
    assert!(enemy.timers().is_active(Countdown::AttackCooldown));
}

#[test]
fn passive_archetype_never_aggroes_but_still_dies() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut presentation = PresentationQueue::default();
    let floor = |_: Rect| true;
    let mut enemy = spawn(archetype("drifter"), Vec2::new(0.0, 10.0));

    for _ in 0..30 {
        tick(&mut enemy, Vec2::new(0.0, 10.0), grounded(), &floor, &mut presentation);
        assert_eq!(enemy.state(), AiState::Patrol);
    }
    assert!(enemy.contact_hit().is_none());

    let (_, mut world) = hit(&mut enemy, 1000, 0.0, 1, &mut rng);
    assert!(enemy.is_dead());
    assert_eq!(world.take_spawns().len(), 2);
}
