//! Wave scheduler: announces waves, walks their spawn entries on the delayed-
//! call queue and detects when a wave is cleared.
//!
//! Wave definitions are never mutated. Progress through a spawn directive is
//! tracked by `WaveState::remaining_in_entry`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use bulwark_core::enums::WavePhase;
use bulwark_core::events::GameEvent;
use bulwark_core::waves::SpawnEntry;

use crate::registry;
use crate::scheduler::ScheduledAction;
use crate::session::{GameSession, SessionOutcome};

/// Progress bookkeeping for the current wave.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveState {
    pub current_wave_index: usize,
    /// Index of the spawn entry being walked.
    pub entry_cursor: usize,
    /// Enemies still to release from the entry under the cursor.
    pub remaining_in_entry: u32,
    pub started: bool,
    pub is_announcing: bool,
    pub is_spawning: bool,
    /// From the announcement until the wave is resolved.
    pub is_wave_in_progress: bool,
    pub is_waiting_for_next_wave: bool,
    pub enemies_spawned: u32,
    /// Kills plus leaks. Never decreases within a wave.
    pub enemies_killed: u32,
    /// Grows when a boss releases minions that were not counted up front.
    pub total_enemies: u32,
}

impl WaveState {
    pub fn phase(&self) -> WavePhase {
        if !self.started {
            WavePhase::Idle
        } else if self.is_waiting_for_next_wave {
            WavePhase::Complete
        } else if self.is_announcing {
            WavePhase::Announcing
        } else if self.is_spawning {
            WavePhase::Spawning
        } else {
            WavePhase::Draining
        }
    }
}

/// Announce the wave at `current_wave_index`, or end the game in victory
/// when none remain and the field is empty.
pub fn start_next_wave(session: &mut GameSession, now_ms: f64) {
    let index = session.waves.current_wave_index;
    let Some(wave) = session.config.waves.get(index) else {
        if registry::enemy_count(&session.world) == 0 {
            session.finish(SessionOutcome::Victory {
                score: session.economy.score,
            });
        }
        return;
    };

    let total = wave.total_enemies(&session.config.enemies);
    let name = wave.name.clone();
    let first_count = entry_count(wave.entries.first());

    session.waves = WaveState {
        current_wave_index: index,
        entry_cursor: 0,
        remaining_in_entry: first_count,
        started: true,
        is_announcing: true,
        is_spawning: true,
        is_wave_in_progress: true,
        is_waiting_for_next_wave: false,
        enemies_spawned: 0,
        enemies_killed: 0,
        total_enemies: total,
    };

    info!(wave = index + 1, name = %name, total, "wave announced");
    session.events.push(GameEvent::WaveAnnounced {
        wave_index: index,
        name,
    });
    let delay = session.config.announce_delay_ms;
    session
        .timers
        .schedule(now_ms, delay, ScheduledAction::BeginSpawning);
}

/// Announcement finished.
pub fn begin_spawning(session: &mut GameSession, at_ms: f64) {
    session.waves.is_announcing = false;
    schedule_next_entry(session, at_ms);
}

/// Look at the entry under the cursor and schedule its next step.
pub fn schedule_next_entry(session: &mut GameSession, at_ms: f64) {
    loop {
        if !session.waves.is_spawning {
            return;
        }
        let entry = current_entry(session).cloned();
        match entry {
            None => {
                finish_spawning(session);
                return;
            }
            Some(SpawnEntry::Delay { delay_ms }) => {
                session
                    .timers
                    .schedule(at_ms, delay_ms, ScheduledAction::AdvanceEntry);
                return;
            }
            Some(SpawnEntry::Spawn { .. }) if session.waves.remaining_in_entry == 0 => {
                advance_cursor(session);
            }
            Some(SpawnEntry::Spawn { delay_ms, .. }) => {
                session
                    .timers
                    .schedule(at_ms, delay_ms, ScheduledAction::SpawnFromEntry);
                return;
            }
        }
    }
}

/// Release one enemy from the spawn directive under the cursor.
pub fn spawn_from_entry(session: &mut GameSession, at_ms: f64) {
    if !session.waves.is_spawning {
        return;
    }
    match current_entry(session).cloned() {
        Some(entry) => {
            if let SpawnEntry::Spawn { kind, .. } = &entry {
                if session.waves.remaining_in_entry > 0 {
                    let precounted = entry.precounted_minions(&session.config.enemies);
                    session.spawn_enemy(*kind, precounted);
                    session.waves.remaining_in_entry -= 1;
                }
            }
            if session.waves.remaining_in_entry == 0 {
                advance_cursor(session);
            }
        }
        None => advance_cursor(session),
    }
    schedule_next_entry(session, at_ms);
}

/// A delay-only entry elapsed.
pub fn advance_entry(session: &mut GameSession, at_ms: f64) {
    if !session.waves.is_spawning {
        return;
    }
    advance_cursor(session);
    schedule_next_entry(session, at_ms);
}

/// Called after every kill, leak and when spawning runs out. Starts the
/// inter-wave pause once the wave is fully resolved.
pub fn check_wave_completion(session: &mut GameSession) {
    let waves = &session.waves;
    if !waves.is_wave_in_progress || session.outcome.is_some() {
        return;
    }
    let no_more_spawning = !waves.is_spawning;
    let all_resolved = waves.enemies_killed >= waves.total_enemies;
    let field_clear = registry::enemy_count(&session.world) == 0;
    if !(no_more_spawning && all_resolved && field_clear) {
        return;
    }

    session.waves.is_wave_in_progress = false;
    session.waves.is_waiting_for_next_wave = true;

    let index = session.waves.current_wave_index;
    let bonus = session.config.wave_clear_bonus;
    info!(wave = index + 1, bonus, "wave cleared");
    session.events.push(GameEvent::WaveCompleted {
        wave_index: index,
        bonus,
    });
    let now_ms = session.time.now_ms;
    let delay = session.config.wave_break_ms;
    session
        .timers
        .schedule(now_ms, delay, ScheduledAction::StartNextWave);
}

/// Inter-wave pause over: pay the bonus and move to the next wave.
pub fn finish_wave_break(session: &mut GameSession, at_ms: f64) {
    session.economy.credit(session.config.wave_clear_bonus);
    session.waves.current_wave_index += 1;
    start_next_wave(session, at_ms);
}

fn finish_spawning(session: &mut GameSession) {
    session.waves.is_spawning = false;
    let index = session.waves.current_wave_index;
    debug!(
        wave = index + 1,
        spawned = session.waves.enemies_spawned,
        "wave spawning finished"
    );
    session
        .events
        .push(GameEvent::WaveSpawningFinished { wave_index: index });
    check_wave_completion(session);
}

fn current_entry(session: &GameSession) -> Option<&SpawnEntry> {
    session
        .config
        .waves
        .get(session.waves.current_wave_index)
        .and_then(|wave| wave.entries.get(session.waves.entry_cursor))
}

fn advance_cursor(session: &mut GameSession) {
    session.waves.entry_cursor += 1;
    session.waves.remaining_in_entry = entry_count(current_entry(session));
}

fn entry_count(entry: Option<&SpawnEntry>) -> u32 {
    match entry {
        Some(SpawnEntry::Spawn { count, .. }) => *count,
        _ => 0,
    }
}
