//! Homing projectiles: steering, bounds culling and hit resolution.
//!
//! A projectile whose target is gone, inactive or leaked is discarded as a
//! miss. Death is resolved by despawning the enemy immediately, so any other
//! projectile aimed at it finds a stale handle and misses: one death, one
//! reward.

use glam::Vec2;
use hecs::Entity;
use tracing::trace;

use bulwark_core::components::{Enemy, EnemyId, Projectile, ProjectileId, Tower};
use bulwark_core::constants::{
    CANVAS_HEIGHT, CANVAS_WIDTH, ENEMY_BASE_RADIUS, PROJECTILE_BOUNDS_MARGIN, PROJECTILE_RADIUS,
};
use bulwark_core::types::{Position, Velocity};

use crate::registry::HomingTarget;
use crate::session::GameSession;

pub fn run(session: &mut GameSession, delta_ms: f64) {
    let dt = (delta_ms / 1000.0) as f32;

    let mut order: Vec<(ProjectileId, Entity)> = session
        .world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, projectile)| (projectile.id, entity))
        .collect();
    order.sort_by_key(|(id, _)| *id);

    for (_, entity) in order {
        step(session, entity, dt);
    }
}

fn step(session: &mut GameSession, entity: Entity, dt: f32) {
    let Ok(target) = session.world.get::<&HomingTarget>(entity).map(|t| t.0) else {
        return;
    };

    let Some(target_pos) = live_enemy_position(session, target) else {
        trace!("projectile lost its target");
        let _ = session.world.despawn(entity);
        return;
    };

    let Some(position) = steer(session, entity, target_pos, dt) else {
        return;
    };

    if out_of_bounds(position) {
        let _ = session.world.despawn(entity);
        return;
    }

    if let Some(enemy) = overlapping_enemy(session, target, position) {
        hit(session, entity, enemy, position);
    }
}

/// Position of a targetable enemy, or `None` for a stale handle.
fn live_enemy_position(session: &GameSession, enemy: Entity) -> Option<Vec2> {
    let state = session.world.get::<&Enemy>(enemy).ok()?;
    if !state.active || state.reached_end {
        return None;
    }
    session.world.get::<&Position>(enemy).ok().map(|p| p.0)
}

/// Point the velocity at the target and integrate one step.
fn steer(session: &GameSession, entity: Entity, target_pos: Vec2, dt: f32) -> Option<Vec2> {
    let speed = session.world.get::<&Projectile>(entity).ok()?.speed;
    let mut pos = session.world.get::<&mut Position>(entity).ok()?;
    let mut vel = session.world.get::<&mut Velocity>(entity).ok()?;

    let offset = target_pos - pos.0;
    vel.0 = offset.normalize_or_zero() * speed;
    // Long frames must not carry a shot past its target.
    let travel = (speed * dt).min(offset.length());
    pos.0 += offset.normalize_or_zero() * travel;
    Some(pos.0)
}

fn out_of_bounds(position: Vec2) -> bool {
    position.x < -PROJECTILE_BOUNDS_MARGIN
        || position.x > CANVAS_WIDTH + PROJECTILE_BOUNDS_MARGIN
        || position.y < -PROJECTILE_BOUNDS_MARGIN
        || position.y > CANVAS_HEIGHT + PROJECTILE_BOUNDS_MARGIN
}

fn overlaps(enemy: &Enemy, enemy_pos: Vec2, projectile_pos: Vec2) -> bool {
    enemy_pos.distance(projectile_pos) <= ENEMY_BASE_RADIUS * enemy.scale + PROJECTILE_RADIUS
}

/// The target if touched, otherwise the first other enemy in spawn order.
fn overlapping_enemy(session: &GameSession, target: Entity, position: Vec2) -> Option<Entity> {
    if let Some(target_pos) = live_enemy_position(session, target) {
        if let Ok(enemy) = session.world.get::<&Enemy>(target) {
            if overlaps(&enemy, target_pos, position) {
                return Some(target);
            }
        }
    }
    session
        .world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (enemy, pos))| {
            enemy.active && !enemy.reached_end && overlaps(enemy, pos.0, position)
        })
        .min_by_key(|(_, (enemy, _))| enemy.id)
        .map(|(entity, _)| entity)
}

fn hit(session: &mut GameSession, projectile: Entity, enemy: Entity, impact: Vec2) {
    let Ok(shot) = session.world.remove_one::<Projectile>(projectile) else {
        return;
    };
    let _ = session.world.despawn(projectile);

    let (enemy_id, hp): (EnemyId, f32) = {
        let Ok(mut state) = session.world.get::<&mut Enemy>(enemy) else {
            return;
        };
        if state.reached_end {
            return;
        }
        state.hp -= shot.damage;
        (state.id, state.hp)
    };
    trace!(
        projectile = shot.id.0,
        enemy = enemy_id.0,
        damage = shot.damage,
        hp,
        "projectile hit"
    );

    let credited = session.attribute_hit(shot.source, impact);
    if let Some(tower) = credited {
        if let Ok(mut tower) = session.world.get::<&mut Tower>(tower) {
            tower.damage_dealt += shot.damage;
        }
    }

    if hp <= 0.0 {
        session.kill_enemy(enemy, credited);
    }
}
