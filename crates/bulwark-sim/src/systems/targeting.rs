//! Tower targeting: each tower off cooldown fires at the first in-range
//! enemy, in spawn order.

use glam::Vec2;
use hecs::Entity;
use tracing::trace;

use bulwark_core::components::{Enemy, EnemyId, Tower};
use bulwark_core::events::GameEvent;
use bulwark_core::types::Position;

use crate::registry;
use crate::session::GameSession;

struct Shot {
    tower: Tower,
    origin: Vec2,
    target: Entity,
    target_id: EnemyId,
}

pub fn run(session: &mut GameSession, now_ms: f64) {
    let mut candidates: Vec<(EnemyId, Entity, Vec2)> = session
        .world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (enemy, _))| enemy.active && !enemy.reached_end)
        .map(|(entity, (enemy, pos))| (enemy.id, entity, pos.0))
        .collect();
    if candidates.is_empty() {
        return;
    }
    candidates.sort_by_key(|(id, _, _)| *id);

    let mut shots = Vec::new();
    for (_entity, (tower, pos)) in session.world.query_mut::<(&mut Tower, &Position)>() {
        // Cooldown: strictly more than one interval since the last shot.
        if now_ms <= tower.last_fired_ms + tower.fire_interval_ms {
            continue;
        }
        let in_range = candidates
            .iter()
            .find(|(_, _, enemy_pos)| enemy_pos.distance(pos.0) <= tower.range);
        if let Some(&(target_id, target, _)) = in_range {
            tower.last_fired_ms = now_ms;
            shots.push(Shot {
                tower: tower.clone(),
                origin: pos.0,
                target,
                target_id,
            });
        }
    }

    shots.sort_by_key(|shot| shot.tower.id);
    for shot in shots {
        let id = session.next_projectile_id();
        registry::spawn_projectile(&mut session.world, id, &shot.tower, shot.origin, shot.target);
        trace!(
            projectile = id.0,
            tower = shot.tower.id.0,
            target = shot.target_id.0,
            "projectile fired"
        );
        session.events.push(GameEvent::ProjectileFired {
            projectile: id,
            tower: shot.tower.id,
            target: shot.target_id,
        });
    }
}
