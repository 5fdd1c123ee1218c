//! Entity registry: spawn factories and lookups over the hecs world.
//!
//! Enemies, towers and projectiles are entities with plain component
//! bundles. A projectile refers to its target through a `hecs::Entity`
//! handle, which carries a generation, so a despawned enemy shows up as a
//! failed lookup instead of a dangling reference.

use glam::Vec2;
use hecs::{Entity, World};

use bulwark_core::components::*;
use bulwark_core::enums::{EnemyKind, TowerKind};
use bulwark_core::stats::{EnemyStats, TowerStats};
use bulwark_core::types::{Position, Velocity};

/// Weak reference from a projectile to the enemy it homes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomingTarget(pub Entity);

/// Spawn an enemy at `position` with progress 0.
pub fn spawn_enemy(
    world: &mut World,
    id: EnemyId,
    kind: EnemyKind,
    stats: &EnemyStats,
    precounted_minions: u32,
    position: Vec2,
) -> Entity {
    let enemy = Enemy {
        id,
        kind,
        hp: stats.hp,
        max_hp: stats.hp,
        traverse_ms: stats.traverse_ms,
        scale: stats.scale,
        tint: stats.tint,
        reward: stats.reward,
        score: stats.score,
        spawn_on_death: stats.spawn_on_death,
        precounted_minions: precounted_minions.min(stats.spawn_on_death),
        reached_end: false,
        active: true,
    };
    world.spawn((enemy, PathFollower::default(), Position(position)))
}

/// Spawn a tower with the preset stats copied onto it.
pub fn spawn_tower(
    world: &mut World,
    id: TowerId,
    kind: TowerKind,
    stats: &TowerStats,
    position: Vec2,
) -> Entity {
    world.spawn((Tower::from_stats(id, kind, stats), Position(position)))
}

/// Spawn a projectile at the tower, homing on `target`.
pub fn spawn_projectile(
    world: &mut World,
    id: ProjectileId,
    tower: &Tower,
    origin: Vec2,
    target: Entity,
) -> Entity {
    let projectile = Projectile {
        id,
        source: tower.id,
        damage: tower.damage,
        speed: tower.projectile_speed,
        color: tower.projectile_color,
    };
    world.spawn((
        projectile,
        Position(origin),
        Velocity(Vec2::ZERO),
        HomingTarget(target),
    ))
}

/// Entity of the tower with the given id.
pub fn find_tower(world: &World, id: TowerId) -> Option<Entity> {
    world
        .query::<&Tower>()
        .iter()
        .find(|(_, tower)| tower.id == id)
        .map(|(entity, _)| entity)
}

/// Tower whose body contains `point`. Lowest id wins on overlap.
pub fn tower_at(world: &World, point: Vec2, radius: f32) -> Option<(Entity, TowerId)> {
    world
        .query::<(&Tower, &Position)>()
        .iter()
        .filter(|(_, (_, pos))| pos.0.distance(point) <= radius)
        .map(|(entity, (tower, _))| (entity, tower.id))
        .min_by_key(|(_, id)| *id)
}

/// Number of enemies still in the registry.
pub fn enemy_count(world: &World) -> usize {
    world.query::<&Enemy>().iter().count()
}

pub fn tower_count(world: &World) -> usize {
    world.query::<&Tower>().iter().count()
}

pub fn projectile_count(world: &World) -> usize {
    world.query::<&Projectile>().iter().count()
}
