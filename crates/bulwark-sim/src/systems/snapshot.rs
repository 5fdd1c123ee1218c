//! Snapshot system: queries the session and builds a complete
//! GameStateSnapshot.
//!
//! This system is read-only: it never modifies the session.

use hecs::World;

use bulwark_core::components::*;
use bulwark_core::enums::GamePhase;
use bulwark_core::events::GameEvent;
use bulwark_core::state::*;
use bulwark_core::types::Position;

use crate::session::GameSession;

/// Build the snapshot for a session that is still being played.
pub fn build_snapshot(session: &GameSession, events: Vec<GameEvent>) -> GameStateSnapshot {
    let waves = session.wave_state();
    let total_waves = session.config().waves.len();
    let economy = session.economy();

    let announcement = if waves.is_announcing {
        session
            .config()
            .waves
            .get(waves.current_wave_index)
            .map(|w| w.name.clone())
    } else {
        None
    };

    GameStateSnapshot {
        time: session.time(),
        phase: GamePhase::Playing,
        score: economy.score,
        lives: economy.lives,
        currency: economy.currency,
        wave_label: wave_label(waves.current_wave_index, total_waves),
        announcement,
        wave: WaveView {
            index: waves.current_wave_index,
            total_waves,
            phase: waves.phase(),
            in_progress: waves.is_wave_in_progress,
            spawned: waves.enemies_spawned,
            killed: waves.enemies_killed,
            total: waves.total_enemies,
        },
        enemies: build_enemies(session.world()),
        towers: build_towers(session.world(), session.selected_tower()),
        projectiles: build_projectiles(session.world()),
        selected_kind: session.selected_kind(),
        selected_tower: session
            .selected_tower()
            .and_then(|id| session.tower_details(id)),
        placement_preview: session.placement_preview(),
        notices: session.notices().to_vec(),
        events,
        final_score: None,
    }
}

/// HUD text, `WAVE n/N`. Clamped to the last wave once all are done.
pub fn wave_label(index: usize, total_waves: usize) -> String {
    let shown = (index + 1).min(total_waves);
    format!("WAVE {shown}/{total_waves}")
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &PathFollower, &Position)>()
        .iter()
        .map(|(_, (enemy, follower, pos))| EnemyView {
            id: enemy.id,
            kind: enemy.kind,
            position: pos.0,
            hp: enemy.hp,
            max_hp: enemy.max_hp,
            progress: follower.progress,
            scale: enemy.scale,
            tint: enemy.tint,
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_towers(world: &World, selected: Option<TowerId>) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Tower, &Position)>()
        .iter()
        .map(|(_, (tower, pos))| TowerView {
            id: tower.id,
            kind: tower.kind,
            position: pos.0,
            range: tower.range,
            color: tower.color,
            selected: selected == Some(tower.id),
        })
        .collect();

    towers.sort_by_key(|t| t.id);
    towers
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(_, (projectile, pos))| ProjectileView {
            id: projectile.id,
            position: pos.0,
            color: projectile.color,
        })
        .collect();

    projectiles.sort_by_key(|p| p.id);
    projectiles
}
