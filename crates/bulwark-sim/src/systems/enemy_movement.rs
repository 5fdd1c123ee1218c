//! Enemy traversal along the path.
//!
//! Progress advances by `delta / traverse_ms` each tick, so an enemy takes
//! exactly its preset traversal time to walk the whole path.

use hecs::Entity;

use bulwark_core::components::{Enemy, EnemyId, PathFollower};
use bulwark_core::types::Position;

use crate::session::GameSession;

/// Move every walking enemy and resolve leaks in spawn order.
pub fn run(session: &mut GameSession, delta_ms: f64) {
    let mut leaked: Vec<(EnemyId, Entity)> = Vec::new();

    for (entity, (enemy, follower, pos)) in session
        .world
        .query_mut::<(&mut Enemy, &mut PathFollower, &mut Position)>()
    {
        if !enemy.active || enemy.reached_end {
            continue;
        }
        let step = (delta_ms / enemy.traverse_ms) as f32;
        follower.progress = (follower.progress + step).min(1.0);
        pos.0 = session.path.point_at_fraction(follower.progress);

        if follower.progress >= 1.0 {
            enemy.reached_end = true;
            enemy.active = false;
            leaked.push((enemy.id, entity));
        }
    }

    leaked.sort_by_key(|(id, _)| *id);
    for (_, entity) in leaked {
        session.enemy_leaked(entity);
        if session.is_over() {
            return;
        }
    }
}
