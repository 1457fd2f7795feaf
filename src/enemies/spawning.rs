//! Enemy spawning from the archetype registry.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::SpawnPoint;
use super::data::ArchetypeRegistry;
use super::enemy::Enemy;
use super::error::ConfigError;

/// Spawn one enemy of `archetype` centred on `position`.
pub fn spawn_enemy(
    commands: &mut Commands,
    registry: &ArchetypeRegistry,
    archetype: &str,
    position: Vec2,
) -> Result<Entity, ConfigError> {
    let config = registry.require(archetype)?;
    let size = config.size();
    let enemy = Enemy::new(config, position)?;
    let name = enemy.name().to_string();

    let entity = commands
        .spawn((
            enemy,
            Name::new(name.clone()),
            Sprite::from_color(Color::WHITE, size),
            Transform::from_translation(position.extend(2.0)),
            RigidBody::Dynamic,
            Collider::cuboid(size.x * 0.5, size.y * 0.5),
            LockedAxes::ROTATION_LOCKED,
            Velocity::zero(),
            Friction::coefficient(0.0),
        ))
        .id();

    info!("Spawned {} at ({:.0}, {:.0})", name, position.x, position.y);
    Ok(entity)
}

/// Replace every spawn point with the enemy it names.
pub fn spawn_at_spawn_points(
    mut commands: Commands,
    registry: Res<ArchetypeRegistry>,
    points: Query<(Entity, &Transform, &SpawnPoint)>,
) {
    for (entity, transform, point) in points.iter() {
        let position = transform.translation.truncate();
        if let Err(e) = spawn_enemy(&mut commands, &registry, &point.archetype, position) {
            warn!("Skipping spawn point at {:?}: {}", position, e);
        }
        commands.entity(entity).despawn_recursive();
    }
}
