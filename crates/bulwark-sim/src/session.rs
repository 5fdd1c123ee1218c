//! One play session: everything between "Start" and Victory or Defeat.
//!
//! `GameSession` owns the entity registry, wave progress, economy, timers
//! and player selection state. The wave scheduler and per-tick systems are
//! free functions that borrow it mutably for the duration of a call.

use glam::Vec2;
use hecs::{Entity, World};
use tracing::{debug, info, trace};

use bulwark_core::commands::CommandOutcome;
use bulwark_core::components::*;
use bulwark_core::constants::{DAMAGE_ATTRIBUTION_RADIUS, TOWER_RADIUS};
use bulwark_core::enums::{EnemyKind, NoticeKind, TowerKind};
use bulwark_core::errors::{CommandError, PlacementError};
use bulwark_core::events::{GameEvent, Notice};
use bulwark_core::state::{PlacementPreview, TowerDetails};
use bulwark_core::types::{Position, SimTime};

use crate::config::SessionConfig;
use crate::economy::Economy;
use crate::path::Path;
use crate::registry;
use crate::scheduler::{DelayedCalls, DueAction, ScheduledAction};
use crate::systems;
use crate::wave::{self, WaveState};

/// Vertical offset of a notice above the pointer.
const NOTICE_OFFSET_Y: f32 = 20.0;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Victory { score: u32 },
    Defeat { score: u32 },
}

pub struct GameSession {
    pub(crate) config: SessionConfig,
    pub(crate) world: World,
    pub(crate) path: Path,
    pub(crate) waves: WaveState,
    pub(crate) economy: Economy,
    pub(crate) timers: DelayedCalls,
    pub(crate) time: SimTime,
    pub(crate) selected_kind: Option<TowerKind>,
    pub(crate) selected_tower: Option<TowerId>,
    pub(crate) preview: Option<PlacementPreview>,
    pub(crate) notices: Vec<Notice>,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) outcome: Option<SessionOutcome>,
    next_enemy_id: u32,
    next_tower_id: u32,
    next_projectile_id: u32,
    next_notice_id: u32,
}

impl GameSession {
    /// Create a session and announce the first wave at `now_ms`.
    ///
    /// `epoch` tags every delayed call so that nothing scheduled by an
    /// earlier session can fire into this one.
    pub fn new(config: SessionConfig, path: Path, epoch: u64, now_ms: f64) -> Self {
        let economy = Economy::new(config.starting_currency, config.starting_lives);
        let mut session = Self {
            config,
            world: World::new(),
            path,
            waves: WaveState::default(),
            economy,
            timers: DelayedCalls::new(epoch),
            time: SimTime {
                tick: 0,
                now_ms,
            },
            selected_kind: None,
            selected_tower: None,
            preview: None,
            notices: Vec::new(),
            events: Vec::new(),
            outcome: None,
            next_enemy_id: 0,
            next_tower_id: 0,
            next_projectile_id: 0,
            next_notice_id: 0,
        };
        wave::start_next_wave(&mut session, now_ms);
        session
    }

    // --- Accessors ---

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn wave_state(&self) -> &WaveState {
        &self.waves
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn timers(&self) -> &DelayedCalls {
        &self.timers
    }

    pub fn selected_kind(&self) -> Option<TowerKind> {
        self.selected_kind
    }

    pub fn selected_tower(&self) -> Option<TowerId> {
        self.selected_tower
    }

    pub fn placement_preview(&self) -> Option<PlacementPreview> {
        self.preview
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Events raised since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Tick ---

    /// Advance the session to `now_ms`. `delta_ms` is the frame time used
    /// for movement integration.
    pub fn tick(&mut self, now_ms: f64, delta_ms: f64) {
        if self.is_over() {
            return;
        }
        self.time.advance(now_ms);

        // 1. Delayed calls (spawns, wave transitions, notice expiry)
        self.run_timers(now_ms);
        if self.is_over() {
            return;
        }
        // 2. Enemy movement and leaks
        systems::enemy_movement::run(self, delta_ms);
        if self.is_over() {
            return;
        }
        // 3. Tower targeting and firing
        systems::targeting::run(self, now_ms);
        // 4. Projectile homing and hits
        systems::projectiles::run(self, delta_ms);
    }

    fn run_timers(&mut self, now_ms: f64) {
        while let Some(due) = self.timers.pop_due(now_ms) {
            self.apply_scheduled(due);
            if self.is_over() {
                return;
            }
        }
    }

    fn apply_scheduled(&mut self, due: DueAction) {
        let at = due.fire_at_ms;
        match due.action {
            ScheduledAction::BeginSpawning => wave::begin_spawning(self, at),
            ScheduledAction::SpawnFromEntry => wave::spawn_from_entry(self, at),
            ScheduledAction::AdvanceEntry => wave::advance_entry(self, at),
            ScheduledAction::StartNextWave => wave::finish_wave_break(self, at),
            ScheduledAction::ExpireNotice { id } => self.notices.retain(|n| n.id != id),
        }
    }

    /// Record the outcome once and stop all pending work.
    pub(crate) fn finish(&mut self, outcome: SessionOutcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        self.timers.cancel_all();
        match outcome {
            SessionOutcome::Victory { score } => {
                info!(score, "victory");
                self.events.push(GameEvent::Victory { score });
            }
            SessionOutcome::Defeat { score } => {
                info!(score, "defeat");
                self.events.push(GameEvent::Defeat { score });
            }
        }
    }

    // --- Enemy lifecycle ---

    /// Spawn an enemy of `kind` at the path start.
    pub(crate) fn spawn_enemy(&mut self, kind: EnemyKind, precounted_minions: u32) -> EnemyId {
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        let stats = *self.config.enemies.get(kind);
        let start = self.path.start_point();
        registry::spawn_enemy(&mut self.world, id, kind, &stats, precounted_minions, start);
        self.waves.enemies_spawned += 1;
        trace!(enemy = id.0, ?kind, "enemy spawned");
        self.events.push(GameEvent::EnemySpawned { enemy: id, kind });
        id
    }

    /// An enemy reached the end of the path.
    pub(crate) fn enemy_leaked(&mut self, entity: Entity) {
        let Ok(enemy) = self.world.remove_one::<Enemy>(entity) else {
            return;
        };
        let _ = self.world.despawn(entity);

        if self.economy.lives > 0 {
            let defeated = self.economy.lose_life();
            debug!(enemy = enemy.id.0, lives = self.economy.lives, "enemy leaked");
            self.events.push(GameEvent::EnemyLeaked {
                enemy: enemy.id,
                lives_remaining: self.economy.lives,
            });
            if defeated {
                self.finish(SessionOutcome::Defeat {
                    score: self.economy.score,
                });
                return;
            }
        }
        self.waves.enemies_killed += 1;
        wave::check_wave_completion(self);
    }

    /// An enemy's hp dropped to zero. `credited` is the tower the kill is
    /// attributed to, if any.
    pub(crate) fn kill_enemy(&mut self, entity: Entity, credited: Option<Entity>) {
        let Ok(enemy) = self.world.remove_one::<Enemy>(entity) else {
            return;
        };
        let _ = self.world.despawn(entity);

        if enemy.spawn_on_death > 0 {
            let uncounted = enemy.spawn_on_death.saturating_sub(enemy.precounted_minions);
            self.waves.total_enemies += uncounted;
            for _ in 0..enemy.spawn_on_death {
                self.spawn_enemy(EnemyKind::Minion, 0);
            }
        }

        self.economy.credit(enemy.reward);
        self.economy.add_score(enemy.score);

        let tower = credited.and_then(|entity| {
            let mut tower = self.world.get::<&mut Tower>(entity).ok()?;
            tower.kills += 1;
            Some(tower.id)
        });

        self.waves.enemies_killed += 1;
        trace!(enemy = enemy.id.0, kind = ?enemy.kind, "enemy killed");
        self.events.push(GameEvent::EnemyKilled {
            enemy: enemy.id,
            kind: enemy.kind,
            reward: enemy.reward,
            score: enemy.score,
            tower,
        });
        wave::check_wave_completion(self);
    }

    /// Tower credited for a hit: the firing tower while it stands, otherwise
    /// the closest tower near the impact point.
    pub(crate) fn attribute_hit(&self, source: TowerId, impact: Vec2) -> Option<Entity> {
        if let Some(entity) = registry::find_tower(&self.world, source) {
            return Some(entity);
        }
        self.world
            .query::<(&Tower, &Position)>()
            .iter()
            .map(|(entity, (_, pos))| (entity, pos.0.distance(impact)))
            .filter(|(_, distance)| *distance < DAMAGE_ATTRIBUTION_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity)
    }

    pub(crate) fn next_projectile_id(&mut self) -> ProjectileId {
        let id = ProjectileId(self.next_projectile_id);
        self.next_projectile_id += 1;
        id
    }

    // --- Player input ---

    /// Pointer pressed at `point`: select a tower, drop the selection, or
    /// place the selected tower kind.
    pub fn pointer_down(&mut self, point: Vec2) -> Result<CommandOutcome, CommandError> {
        if !self.config.game_area.contains(point) {
            if self.selected_kind.is_some() {
                return Err(PlacementError::OutsideGameArea.into());
            }
            return Ok(CommandOutcome::Ignored);
        }

        if let Some((_, id)) = registry::tower_at(&self.world, point, TOWER_RADIUS) {
            self.selected_tower = Some(id);
            debug!(tower = id.0, "tower selected");
            return Ok(CommandOutcome::TowerSelected { tower: id });
        }
        if self.selected_tower.is_some() {
            self.deselect_tower();
            return Ok(CommandOutcome::TowerDeselected);
        }
        let tower = self.place_tower(point)?;
        Ok(CommandOutcome::TowerPlaced { tower })
    }

    /// Pointer moved: update the placement preview. Over the HUD or the
    /// tower bar the preview is hidden.
    pub fn pointer_move(&mut self, point: Vec2) -> CommandOutcome {
        if !self.config.game_area.contains(point) {
            self.preview = None;
            return CommandOutcome::Ignored;
        }
        let Some(kind) = self.selected_kind else {
            return CommandOutcome::Ignored;
        };
        let stats = self.config.towers.get(kind);
        let affordable = self.economy.can_afford(stats.cost);
        self.preview = Some(PlacementPreview {
            kind,
            position: point,
            range: stats.range,
            affordable,
        });
        CommandOutcome::PreviewMoved { affordable }
    }

    /// Toggle the tower kind to place.
    pub fn select_tower_kind(&mut self, kind: TowerKind) -> CommandOutcome {
        if self.selected_kind == Some(kind) {
            self.clear_tower_kind();
            return CommandOutcome::TowerKindCleared;
        }
        self.selected_kind = Some(kind);
        // The preview keeps its position but takes the new kind's stats.
        if let Some(preview) = self.preview {
            self.pointer_move(preview.position);
        }
        debug!(?kind, "tower kind selected");
        CommandOutcome::TowerKindSelected { kind }
    }

    pub fn deselect_tower(&mut self) {
        self.selected_tower = None;
    }

    /// Sell the selected tower for `floor(cost × refund ratio)`.
    pub fn sell_selected_tower(&mut self) -> Result<(TowerId, u32), CommandError> {
        let id = self.selected_tower.ok_or(CommandError::NoTowerSelected)?;
        let Some(entity) = registry::find_tower(&self.world, id) else {
            self.selected_tower = None;
            return Err(CommandError::NoTowerSelected);
        };
        let refund = match self.world.get::<&Tower>(entity) {
            Ok(tower) => tower.sell_price(self.config.sell_refund_ratio),
            Err(_) => return Err(CommandError::NoTowerSelected),
        };
        let _ = self.world.despawn(entity);
        self.economy.credit(refund);
        self.selected_tower = None;

        debug!(tower = id.0, refund, "tower sold");
        self.events.push(GameEvent::TowerSold { tower: id, refund });
        Ok((id, refund))
    }

    /// Stats panel for a placed tower; `None` once it is gone.
    pub fn tower_details(&self, id: TowerId) -> Option<TowerDetails> {
        let entity = registry::find_tower(&self.world, id)?;
        let tower = self.world.get::<&Tower>(entity).ok()?;
        let position = self.world.get::<&Position>(entity).ok()?.0;
        Some(TowerDetails {
            id: tower.id,
            name: tower.kind.name().to_string(),
            position,
            damage: tower.damage,
            fire_rate_per_sec: tower.fire_rate_per_sec(),
            range: tower.range,
            kills: tower.kills,
            damage_dealt: tower.damage_dealt.floor() as u32,
            sell_price: tower.sell_price(self.config.sell_refund_ratio),
        })
    }

    fn place_tower(&mut self, point: Vec2) -> Result<TowerId, PlacementError> {
        let Some(kind) = self.selected_kind else {
            self.raise_notice(NoticeKind::SelectTowerFirst, point);
            debug!("placement rejected: no tower kind selected");
            return Err(PlacementError::NoTowerKindSelected);
        };
        let stats = *self.config.towers.get(kind);
        if let Err(err) = self.economy.spend(stats.cost) {
            self.raise_notice(NoticeKind::CannotAfford, point);
            debug!(?kind, %err, "placement rejected");
            return Err(err);
        }

        let id = TowerId(self.next_tower_id);
        self.next_tower_id += 1;
        registry::spawn_tower(&mut self.world, id, kind, &stats, point);
        self.clear_tower_kind();

        debug!(tower = id.0, ?kind, x = point.x, y = point.y, "tower placed");
        self.events.push(GameEvent::TowerPlaced {
            tower: id,
            kind,
            position: point,
            cost: stats.cost,
        });
        Ok(id)
    }

    fn clear_tower_kind(&mut self) {
        self.selected_kind = None;
        self.preview = None;
    }

    fn raise_notice(&mut self, kind: NoticeKind, pointer: Vec2) {
        let id = self.next_notice_id;
        self.next_notice_id += 1;
        let position = pointer - Vec2::new(0.0, NOTICE_OFFSET_Y);
        self.notices.push(Notice {
            id,
            kind,
            position,
            raised_at_ms: self.time.now_ms,
        });
        self.events.push(GameEvent::NoticeRaised { kind, position });
        let lifetime = self.config.notice_lifetime_ms;
        self.timers.schedule(
            self.time.now_ms,
            lifetime,
            ScheduledAction::ExpireNotice { id },
        );
    }
}
