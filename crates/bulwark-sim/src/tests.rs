//! Tests for the session, wave scheduler, combat systems and economy rules.

use glam::Vec2;
use hecs::Entity;

use bulwark_core::commands::CommandOutcome;
use bulwark_core::components::*;
use bulwark_core::enums::*;
use bulwark_core::errors::{CommandError, PlacementError};
use bulwark_core::events::GameEvent;
use bulwark_core::stats::TowerStats;
use bulwark_core::types::{Position, Velocity};
use bulwark_core::waves::{SpawnEntry, WaveDefinition};

use crate::config::SessionConfig;
use crate::path::Path;
use crate::registry;
use crate::session::{GameSession, SessionOutcome};
use crate::systems;
use crate::systems::snapshot::build_snapshot;

// ---- Helpers ----

/// A session whose only wave waits forever, so nothing spawns on its own.
fn quiet_config() -> SessionConfig {
    SessionConfig {
        waves: vec![WaveDefinition {
            name: "Hold".to_string(),
            entries: vec![SpawnEntry::delay(1.0e9)],
        }],
        ..Default::default()
    }
}

fn new_session(config: SessionConfig) -> GameSession {
    let path = Path::new(config.path.clone()).unwrap();
    GameSession::new(config, path, 1, 0.0)
}

fn enemy_entity(session: &GameSession, id: EnemyId) -> Entity {
    session
        .world
        .query::<&Enemy>()
        .iter()
        .find(|(_, enemy)| enemy.id == id)
        .map(|(entity, _)| entity)
        .unwrap()
}

fn place_enemy(session: &mut GameSession, kind: EnemyKind, at: Vec2) -> Entity {
    let id = session.spawn_enemy(kind, 0);
    let entity = enemy_entity(session, id);
    session.world.get::<&mut Position>(entity).unwrap().0 = at;
    entity
}

fn place_tower(session: &mut GameSession, id: u32, stats: TowerStats, at: Vec2) -> Entity {
    registry::spawn_tower(&mut session.world, TowerId(id), TowerKind::Basic, &stats, at)
}

fn fire_at(session: &mut GameSession, tower: Entity, target: Entity, from: Vec2) {
    let tower: Tower = (*session.world.get::<&Tower>(tower).unwrap()).clone();
    let id = session.next_projectile_id();
    registry::spawn_projectile(&mut session.world, id, &tower, from, target);
}

/// Tick the session from `from_ms` to `to_ms` in fixed steps.
fn run_until(
    session: &mut GameSession,
    from_ms: u64,
    to_ms: u64,
    step_ms: u64,
) -> Vec<(f64, GameEvent)> {
    let mut log = Vec::new();
    let mut t = from_ms;
    while t < to_ms {
        t += step_ms;
        session.tick(t as f64, step_ms as f64);
        for event in session.take_events() {
            log.push((t as f64, event));
        }
    }
    log
}

// ---- Wave scheduler ----

#[test]
fn test_session_announces_first_wave() {
    let mut session = new_session(SessionConfig::default());
    let events = session.take_events();
    assert!(
        matches!(&events[0], GameEvent::WaveAnnounced { wave_index: 0, name } if name == "Wave 1 - Basic"),
        "got {events:?}"
    );
    assert_eq!(session.wave_state().phase(), WavePhase::Announcing);
    assert_eq!(session.wave_state().total_enemies, 5);
    assert_eq!(session.timers().next_due_ms(), Some(2000.0));
}

#[test]
fn test_default_wave_one_spawn_times() {
    let mut session = new_session(SessionConfig::default());
    session.take_events();
    let log = run_until(&mut session, 0, 10_000, 10);

    let spawns: Vec<(f64, EnemyKind)> = log
        .iter()
        .filter_map(|(t, e)| match e {
            GameEvent::EnemySpawned { kind, .. } => Some((*t, *kind)),
            _ => None,
        })
        .collect();
    assert_eq!(
        spawns,
        vec![
            (4000.0, EnemyKind::Basic),
            (6000.0, EnemyKind::Basic),
            (8000.0, EnemyKind::Basic),
            (9000.0, EnemyKind::Fast),
            (10_000.0, EnemyKind::Fast),
        ]
    );
    assert!(!session.wave_state().is_spawning, "entries exhausted");
    assert_eq!(session.wave_state().phase(), WavePhase::Draining);
}

#[test]
fn test_delay_entries_and_zero_counts() {
    let config = SessionConfig {
        waves: vec![WaveDefinition {
            name: "Gaps".to_string(),
            entries: vec![
                SpawnEntry::spawn(0, 500.0, EnemyKind::Tank),
                SpawnEntry::delay(3000.0),
                SpawnEntry::spawn(2, 500.0, EnemyKind::Fast),
            ],
        }],
        ..quiet_config()
    };
    let mut session = new_session(config);
    let log = run_until(&mut session, 0, 6000, 10);
    let times: Vec<f64> = log
        .iter()
        .filter(|(_, e)| matches!(e, GameEvent::EnemySpawned { .. }))
        .map(|(t, _)| *t)
        .collect();
    // 2000 announcement + 3000 pause + 500 per fast.
    assert_eq!(times, vec![5500.0, 6000.0]);
    assert_eq!(session.wave_state().total_enemies, 2);
}

#[test]
fn test_spawn_entries_with_zero_delay_release_together() {
    let config = SessionConfig {
        waves: vec![WaveDefinition {
            name: "Swarm".to_string(),
            entries: vec![SpawnEntry::spawn(4, 0.0, EnemyKind::Minion)],
        }],
        ..quiet_config()
    };
    let mut session = new_session(config);
    run_until(&mut session, 0, 2000, 10);
    assert_eq!(registry::enemy_count(&session.world), 4);
    assert_eq!(session.wave_state().enemies_spawned, 4);
}

#[test]
fn test_boss_minions_counted_at_death() {
    let config = SessionConfig {
        waves: vec![WaveDefinition {
            name: "Boss".to_string(),
            entries: vec![SpawnEntry::spawn(1, 0.0, EnemyKind::Boss)],
        }],
        ..quiet_config()
    };
    let mut session = new_session(config);
    run_until(&mut session, 0, 2010, 10);
    assert_eq!(session.wave_state().total_enemies, 1, "minions not yet counted");

    let boss = session
        .world
        .query::<&Enemy>()
        .iter()
        .find(|(_, e)| e.kind == EnemyKind::Boss)
        .map(|(entity, _)| entity)
        .unwrap();
    session.kill_enemy(boss, None);

    assert_eq!(session.wave_state().total_enemies, 5);
    assert_eq!(session.wave_state().enemies_killed, 1);
    let minions = session
        .world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, e)| e.kind == EnemyKind::Minion)
        .count();
    assert_eq!(minions, 4);
    let start = session.path.start_point();
    assert!(
        session.world.query::<&Position>().iter().all(|(_, p)| p.0 == start),
        "minions appear at the path start"
    );

    let ids: Vec<Entity> = session.world.query::<&Enemy>().iter().map(|(e, _)| e).collect();
    for minion in ids {
        session.kill_enemy(minion, None);
    }
    assert_eq!(session.wave_state().enemies_killed, 5);
    assert_eq!(session.wave_state().phase(), WavePhase::Complete);
}

#[test]
fn test_boss_precounted_minions_not_double_counted() {
    let config = SessionConfig {
        waves: vec![WaveDefinition {
            name: "Boss".to_string(),
            entries: vec![SpawnEntry::Spawn {
                count: 1,
                delay_ms: 0.0,
                kind: EnemyKind::Boss,
                spawn_on_death: 4,
            }],
        }],
        ..quiet_config()
    };
    let mut session = new_session(config);
    assert_eq!(session.wave_state().total_enemies, 5);
    run_until(&mut session, 0, 2010, 10);

    let boss = session.world.query::<&Enemy>().iter().next().map(|(e, _)| e).unwrap();
    session.kill_enemy(boss, None);
    assert_eq!(session.wave_state().total_enemies, 5);
    assert_eq!(registry::enemy_count(&session.world), 4);
}

#[test]
fn test_completion_waits_for_spawning_to_finish() {
    let mut session = new_session(quiet_config());
    let enemy = place_enemy(&mut session, EnemyKind::Basic, Vec2::new(300.0, 160.0));
    session.kill_enemy(enemy, None);
    assert!(
        !session.wave_state().is_waiting_for_next_wave,
        "still spawning, no completion"
    );
}

#[test]
fn test_wave_break_pays_bonus_then_announces() {
    let config = SessionConfig {
        waves: vec![
            WaveDefinition {
                name: "One".to_string(),
                entries: vec![SpawnEntry::spawn(1, 0.0, EnemyKind::Basic)],
            },
            WaveDefinition {
                name: "Two".to_string(),
                entries: vec![SpawnEntry::spawn(1, 0.0, EnemyKind::Fast)],
            },
        ],
        ..quiet_config()
    };
    let mut session = new_session(config);
    run_until(&mut session, 0, 2000, 10);
    let enemy = session.world.query::<&Enemy>().iter().next().map(|(e, _)| e).unwrap();
    session.kill_enemy(enemy, None);
    assert_eq!(session.economy().currency, 120, "reward only");
    assert_eq!(session.wave_state().phase(), WavePhase::Complete);
    assert!(!session.wave_state().is_wave_in_progress);
    assert!(!build_snapshot(&session, Vec::new()).wave.in_progress);

    let log = run_until(&mut session, 2000, 3990, 10);
    assert!(log.iter().all(|(_, e)| !matches!(e, GameEvent::WaveAnnounced { .. })));
    assert_eq!(session.economy().currency, 120);

    let log = run_until(&mut session, 3990, 4000, 10);
    assert_eq!(session.economy().currency, 170, "bonus after the break");
    assert!(log
        .iter()
        .any(|(_, e)| matches!(e, GameEvent::WaveAnnounced { wave_index: 1, .. })));
    assert_eq!(session.wave_state().current_wave_index, 1);
    assert_eq!(session.wave_state().enemies_killed, 0, "counters reset");
    assert!(build_snapshot(&session, Vec::new()).wave.in_progress);
}

#[test]
fn test_victory_after_last_wave() {
    let config = SessionConfig {
        waves: vec![WaveDefinition {
            name: "Only".to_string(),
            entries: vec![SpawnEntry::spawn(1, 0.0, EnemyKind::Fast)],
        }],
        ..quiet_config()
    };
    let mut session = new_session(config);
    run_until(&mut session, 0, 2000, 10);
    let enemy = session.world.query::<&Enemy>().iter().next().map(|(e, _)| e).unwrap();
    session.kill_enemy(enemy, None);
    let log = run_until(&mut session, 2000, 5000, 10);

    assert_eq!(session.outcome(), Some(SessionOutcome::Victory { score: 15 }));
    let victories = log
        .iter()
        .filter(|(_, e)| matches!(e, GameEvent::Victory { .. }))
        .count();
    assert_eq!(victories, 1);
}

#[test]
fn test_empty_wave_list_is_immediate_victory() {
    let config = SessionConfig {
        waves: Vec::new(),
        ..Default::default()
    };
    let session = new_session(config);
    assert_eq!(session.outcome(), Some(SessionOutcome::Victory { score: 0 }));
}

// ---- Leaks and defeat ----

#[test]
fn test_leak_costs_one_life_and_counts_as_resolved() {
    let mut session = new_session(quiet_config());
    let enemy = place_enemy(&mut session, EnemyKind::Fast, Vec2::ZERO);
    session.world.get::<&mut PathFollower>(enemy).unwrap().progress = 0.999;
    systems::enemy_movement::run(&mut session, 100.0);

    assert_eq!(session.economy().lives, 2);
    assert_eq!(session.wave_state().enemies_killed, 1);
    assert_eq!(registry::enemy_count(&session.world), 0);
}

#[test]
fn test_simultaneous_leaks_trigger_defeat_once() {
    let mut session = new_session(quiet_config());
    for _ in 0..5 {
        let enemy = place_enemy(&mut session, EnemyKind::Basic, Vec2::ZERO);
        session.world.get::<&mut PathFollower>(enemy).unwrap().progress = 0.9999;
    }
    session.take_events();
    systems::enemy_movement::run(&mut session, 100.0);

    let events = session.take_events();
    let leaks = events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyLeaked { .. }))
        .count();
    let defeats = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Defeat { .. }))
        .count();
    assert_eq!(leaks, 3, "leaks stop once the game is lost");
    assert_eq!(defeats, 1);
    assert_eq!(session.economy().lives, 0);
    assert_eq!(session.outcome(), Some(SessionOutcome::Defeat { score: 0 }));
    assert!(session.timers().is_empty(), "pending calls cancelled");

    // A finished session ignores further ticks.
    session.tick(5000.0, 16.0);
    assert!(session.take_events().is_empty());
}

#[test]
fn test_enemy_progress_matches_traverse_time() {
    let mut session = new_session(quiet_config());
    let enemy = place_enemy(&mut session, EnemyKind::Basic, Vec2::ZERO);
    for _ in 0..600 {
        systems::enemy_movement::run(&mut session, 10.0);
    }
    // 6000 of 12000 ms: halfway.
    let progress = session.world.get::<&PathFollower>(enemy).unwrap().progress;
    assert!((progress - 0.5).abs() < 1e-3, "progress {progress}");
    let pos = session.world.get::<&Position>(enemy).unwrap().0;
    assert!(pos.distance(Vec2::new(750.0, 300.0)) < 2.0, "pos {pos}");
}

// ---- Targeting ----

#[test]
fn test_tower_fires_at_first_enemy_in_range() {
    let mut session = new_session(quiet_config());
    let towers = session.config.towers.clone();
    place_tower(&mut session, 0, towers.basic, Vec2::new(400.0, 300.0));
    let _far = place_enemy(&mut session, EnemyKind::Basic, Vec2::new(50.0, 160.0));
    let first = place_enemy(&mut session, EnemyKind::Basic, Vec2::new(480.0, 300.0));
    let _second = place_enemy(&mut session, EnemyKind::Fast, Vec2::new(410.0, 300.0));
    session.take_events();

    systems::targeting::run(&mut session, 1500.0);

    let events = session.take_events();
    assert_eq!(events.len(), 1, "one shot per tower");
    let first_id = session.world.get::<&Enemy>(first).unwrap().id;
    assert!(
        matches!(events[0], GameEvent::ProjectileFired { target, .. } if target == first_id),
        "lowest id in range wins, not the closest: {events:?}"
    );
}

#[test]
fn test_tower_cooldown_is_strict() {
    let mut session = new_session(quiet_config());
    let towers = session.config.towers.clone();
    let tower = place_tower(&mut session, 0, towers.basic, Vec2::new(400.0, 300.0));
    place_enemy(&mut session, EnemyKind::Tank, Vec2::new(420.0, 300.0));

    systems::targeting::run(&mut session, 1000.0);
    assert_eq!(registry::projectile_count(&session.world), 0, "needs now > 0 + 1000");

    systems::targeting::run(&mut session, 1001.0);
    assert_eq!(registry::projectile_count(&session.world), 1);
    assert_eq!(session.world.get::<&Tower>(tower).unwrap().last_fired_ms, 1001.0);

    systems::targeting::run(&mut session, 2001.0);
    assert_eq!(registry::projectile_count(&session.world), 1);
    systems::targeting::run(&mut session, 2002.0);
    assert_eq!(registry::projectile_count(&session.world), 2);
}

#[test]
fn test_tower_ignores_out_of_range() {
    let mut session = new_session(quiet_config());
    let towers = session.config.towers.clone();
    place_tower(&mut session, 0, towers.rapid, Vec2::new(400.0, 300.0));
    place_enemy(&mut session, EnemyKind::Basic, Vec2::new(501.0, 300.0));
    systems::targeting::run(&mut session, 5000.0);
    assert_eq!(registry::projectile_count(&session.world), 0);
}

// ---- Projectiles ----

#[test]
fn test_hit_reduces_hp_by_damage() {
    let mut session = new_session(quiet_config());
    let towers = session.config.towers.clone();
    let tower = place_tower(&mut session, 0, towers.basic, Vec2::new(400.0, 300.0));
    let enemy = place_enemy(&mut session, EnemyKind::Tank, Vec2::new(300.0, 300.0));
    fire_at(&mut session, tower, enemy, Vec2::new(300.0, 300.0));

    systems::projectiles::run(&mut session, 16.0);

    assert_eq!(session.world.get::<&Enemy>(enemy).unwrap().hp, 7.0);
    assert_eq!(registry::projectile_count(&session.world), 0, "projectile consumed");
    let stats = session.world.get::<&Tower>(tower).unwrap();
    assert_eq!(stats.damage_dealt, 1.0);
    assert_eq!(stats.kills, 0);
}

#[test]
fn test_projectile_homes_on_moving_target() {
    let mut session = new_session(quiet_config());
    let towers = session.config.towers.clone();
    let tower = place_tower(&mut session, 0, towers.basic, Vec2::new(400.0, 300.0));
    let enemy = place_enemy(&mut session, EnemyKind::Tank, Vec2::new(400.0, 200.0));
    fire_at(&mut session, tower, enemy, Vec2::new(400.0, 300.0));

    systems::projectiles::run(&mut session, 20.0);
    // 500 px/s for 20 ms straight up.
    let (pos, vel) = session
        .world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .next()
        .map(|(_, (_, pos, vel))| (pos.0, vel.0))
        .unwrap();
    assert!(pos.distance(Vec2::new(400.0, 290.0)) < 1e-3, "pos {pos}");
    assert!(vel.distance(Vec2::new(0.0, -500.0)) < 1e-3, "vel {vel}");

    // Target moves sideways; the next step re-aims.
    session.world.get::<&mut Position>(enemy).unwrap().0 = Vec2::new(500.0, 290.0);
    systems::projectiles::run(&mut session, 20.0);
    let vel = session
        .world
        .query::<(&Projectile, &Velocity)>()
        .iter()
        .next()
        .map(|(_, (_, v))| v.0)
        .unwrap();
    assert!(vel.distance(Vec2::new(500.0, 0.0)) < 1e-3, "vel {vel}");
}

#[test]
fn test_stale_target_is_a_miss() {
    let mut session = new_session(quiet_config());
    let towers = session.config.towers.clone();
    let tower = place_tower(&mut session, 0, towers.basic, Vec2::new(400.0, 300.0));
    let enemy = place_enemy(&mut session, EnemyKind::Basic, Vec2::new(300.0, 300.0));
    let bystander = place_enemy(&mut session, EnemyKind::Basic, Vec2::new(400.0, 300.0));
    fire_at(&mut session, tower, enemy, Vec2::new(400.0, 300.0));
    session.world.despawn(enemy).unwrap();

    systems::projectiles::run(&mut session, 16.0);

    assert_eq!(registry::projectile_count(&session.world), 0);
    assert_eq!(
        session.world.get::<&Enemy>(bystander).unwrap().hp,
        3.0,
        "discarded projectile deals no damage"
    );
}

#[test]
fn test_projectile_leaves_bounds() {
    let mut session = new_session(quiet_config());
    let towers = session.config.towers.clone();
    let tower = place_tower(&mut session, 0, towers.sniper, Vec2::new(400.0, 300.0));
    let enemy = place_enemy(&mut session, EnemyKind::Basic, Vec2::new(-200.0, 300.0));
    fire_at(&mut session, tower, enemy, Vec2::new(-40.0, 300.0));

    systems::projectiles::run(&mut session, 20.0);
    assert_eq!(registry::projectile_count(&session.world), 0);
    assert_eq!(session.world.get::<&Enemy>(enemy).unwrap().hp, 3.0);
}

#[test]
fn test_death_rewards_once_with_overkill_in_same_tick() {
    let mut session = new_session(quiet_config());
    let heavy = TowerStats {
        damage: 5.0,
        ..session.config.towers.basic
    };
    let tower = place_tower(&mut session, 0, heavy, Vec2::new(400.0, 300.0));
    let enemy = place_enemy(&mut session, EnemyKind::Basic, Vec2::new(300.0, 300.0));
    for _ in 0..3 {
        fire_at(&mut session, tower, enemy, Vec2::new(300.0, 300.0));
    }
    session.take_events();

    systems::projectiles::run(&mut session, 16.0);

    let events = session.take_events();
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
            .count(),
        1
    );
    assert_eq!(session.economy().currency, 120);
    assert_eq!(session.economy().score, 10);
    assert_eq!(session.wave_state().enemies_killed, 1);
    assert_eq!(registry::projectile_count(&session.world), 0);
    let stats = session.world.get::<&Tower>(tower).unwrap();
    assert_eq!(stats.kills, 1);
    assert_eq!(stats.damage_dealt, 5.0, "later shots missed");
}

#[test]
fn test_hit_credited_to_nearby_tower_when_source_is_gone() {
    let mut session = new_session(quiet_config());
    let towers = session.config.towers.clone();
    let source = place_tower(&mut session, 0, towers.basic, Vec2::new(600.0, 400.0));
    let nearby = place_tower(&mut session, 1, towers.basic, Vec2::new(310.0, 300.0));
    let enemy = place_enemy(&mut session, EnemyKind::Basic, Vec2::new(300.0, 300.0));
    fire_at(&mut session, source, enemy, Vec2::new(300.0, 300.0));
    session.world.despawn(source).unwrap();

    systems::projectiles::run(&mut session, 16.0);
    assert_eq!(session.world.get::<&Tower>(nearby).unwrap().damage_dealt, 1.0);
}

// ---- Player actions ----

#[test]
fn test_place_requires_kind_and_funds() {
    let mut session = new_session(quiet_config());
    let err = session.pointer_down(Vec2::new(400.0, 300.0)).unwrap_err();
    assert_eq!(err, CommandError::Placement(PlacementError::NoTowerKindSelected));
    assert_eq!(session.notices()[0].kind, NoticeKind::SelectTowerFirst);

    session.select_tower_kind(TowerKind::Rapid);
    let err = session.pointer_down(Vec2::new(400.0, 300.0)).unwrap_err();
    assert_eq!(
        err,
        CommandError::Placement(PlacementError::InsufficientFunds {
            cost: 150,
            available: 100
        })
    );
    assert_eq!(session.economy().currency, 100);
    assert_eq!(registry::tower_count(&session.world), 0);
    assert_eq!(session.selected_kind(), Some(TowerKind::Rapid), "kind stays selected");
    assert_eq!(session.notices()[1].kind, NoticeKind::CannotAfford);
}

#[test]
fn test_notices_expire() {
    let mut session = new_session(quiet_config());
    let _ = session.pointer_down(Vec2::new(400.0, 300.0));
    assert_eq!(session.notices().len(), 1);
    assert_eq!(session.notices()[0].position, Vec2::new(400.0, 280.0));
    run_until(&mut session, 0, 990, 10);
    assert_eq!(session.notices().len(), 1);
    run_until(&mut session, 990, 1000, 10);
    assert!(session.notices().is_empty());
}

#[test]
fn test_place_debits_cost_and_clears_kind() {
    let mut session = new_session(quiet_config());
    session.select_tower_kind(TowerKind::Basic);
    session.pointer_move(Vec2::new(200.0, 300.0));
    assert!(session.placement_preview().is_some());

    let outcome = session.pointer_down(Vec2::new(200.0, 300.0)).unwrap();
    assert_eq!(outcome, CommandOutcome::TowerPlaced { tower: TowerId(0) });
    assert_eq!(session.economy().currency, 50);
    assert_eq!(session.selected_kind(), None);
    assert!(session.placement_preview().is_none());
}

#[test]
fn test_preview_tracks_affordability() {
    let mut session = new_session(quiet_config());
    session.select_tower_kind(TowerKind::Sniper);
    assert_eq!(
        session.pointer_move(Vec2::new(100.0, 100.0)),
        CommandOutcome::PreviewMoved { affordable: true }
    );
    session.select_tower_kind(TowerKind::Rapid);
    let preview = session.placement_preview().unwrap();
    assert_eq!(preview.kind, TowerKind::Rapid);
    assert!(!preview.affordable);
    assert_eq!(preview.range, 100.0);

    assert_eq!(
        session.select_tower_kind(TowerKind::Rapid),
        CommandOutcome::TowerKindCleared
    );
    assert!(session.placement_preview().is_none());
}

#[test]
fn test_pointer_outside_game_area() {
    let mut session = new_session(quiet_config());
    assert_eq!(
        session.pointer_down(Vec2::new(400.0, 30.0)).unwrap(),
        CommandOutcome::Ignored
    );
    session.select_tower_kind(TowerKind::Basic);
    assert_eq!(
        session.pointer_down(Vec2::new(400.0, 560.0)).unwrap_err(),
        CommandError::Placement(PlacementError::OutsideGameArea)
    );
    assert_eq!(session.economy().currency, 100);
    assert!(session.notices().is_empty());
}

#[test]
fn test_pointer_move_outside_game_area_hides_preview() {
    let mut session = new_session(quiet_config());
    session.select_tower_kind(TowerKind::Basic);
    assert_eq!(
        session.pointer_move(Vec2::new(400.0, 300.0)),
        CommandOutcome::PreviewMoved { affordable: true }
    );
    assert!(session.placement_preview().is_some());

    // HUD bar along the top.
    assert_eq!(
        session.pointer_move(Vec2::new(400.0, 10.0)),
        CommandOutcome::Ignored
    );
    assert!(session.placement_preview().is_none());

    // Tower bar along the bottom.
    assert_eq!(
        session.pointer_move(Vec2::new(400.0, 580.0)),
        CommandOutcome::Ignored
    );
    assert!(session.placement_preview().is_none());

    // Back over the field the preview returns.
    session.pointer_move(Vec2::new(420.0, 320.0));
    let preview = session.placement_preview().unwrap();
    assert_eq!(preview.position, Vec2::new(420.0, 320.0));
    assert_eq!(session.selected_kind(), Some(TowerKind::Basic));
}

#[test]
fn test_select_deselect_and_sell() {
    let mut session = new_session(quiet_config());
    session.select_tower_kind(TowerKind::Basic);
    session.pointer_down(Vec2::new(200.0, 300.0)).unwrap();

    let outcome = session.pointer_down(Vec2::new(210.0, 305.0)).unwrap();
    assert_eq!(outcome, CommandOutcome::TowerSelected { tower: TowerId(0) });
    let details = session.tower_details(TowerId(0)).unwrap();
    assert_eq!(details.name, "Basic");
    assert_eq!(details.sell_price, 35);
    assert!((details.fire_rate_per_sec - 1.0).abs() < 1e-9);

    // Clicking empty ground only drops the selection.
    let outcome = session.pointer_down(Vec2::new(500.0, 300.0)).unwrap();
    assert_eq!(outcome, CommandOutcome::TowerDeselected);
    assert_eq!(registry::tower_count(&session.world), 1);
    assert_eq!(session.economy().currency, 50);

    assert_eq!(
        session.sell_selected_tower().unwrap_err(),
        CommandError::NoTowerSelected
    );

    session.pointer_down(Vec2::new(200.0, 300.0)).unwrap();
    let (tower, refund) = session.sell_selected_tower().unwrap();
    assert_eq!((tower, refund), (TowerId(0), 35));
    assert_eq!(session.economy().currency, 85);
    assert_eq!(registry::tower_count(&session.world), 0);
    assert!(session.tower_details(TowerId(0)).is_none());
    assert_eq!(session.selected_tower(), None);
}

#[test]
fn test_tower_ids_not_reused_after_sale() {
    let mut session = new_session(SessionConfig {
        starting_currency: 500,
        ..quiet_config()
    });
    session.select_tower_kind(TowerKind::Basic);
    session.pointer_down(Vec2::new(200.0, 300.0)).unwrap();
    session.pointer_down(Vec2::new(200.0, 300.0)).unwrap();
    session.sell_selected_tower().unwrap();

    session.select_tower_kind(TowerKind::Basic);
    let outcome = session.pointer_down(Vec2::new(200.0, 300.0)).unwrap();
    assert_eq!(outcome, CommandOutcome::TowerPlaced { tower: TowerId(1) });
}
