//! Simulation engine: the surface the presentation layer talks to.
//!
//! `SimulationEngine` owns the scene state machine, processes player
//! commands, drives the active `GameSession` from the host clock and
//! produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use tracing::{debug, info};

use bulwark_core::commands::{CommandOutcome, PlayerCommand};
use bulwark_core::components::TowerId;
use bulwark_core::enums::GamePhase;
use bulwark_core::errors::CommandError;
use bulwark_core::events::GameEvent;
use bulwark_core::state::{GameStateSnapshot, TowerDetails};
use bulwark_core::types::SimTime;

use crate::config::{ConfigError, SessionConfig};
use crate::path::Path;
use crate::session::{GameSession, SessionOutcome};
use crate::systems;

/// Top-level scene.
pub enum Scene {
    MainMenu,
    Playing(Box<GameSession>),
    Victory { score: u32 },
    Defeat { score: u32 },
}

impl Scene {
    pub fn phase(&self) -> GamePhase {
        match self {
            Scene::MainMenu => GamePhase::MainMenu,
            Scene::Playing(_) => GamePhase::Playing,
            Scene::Victory { .. } => GamePhase::Victory,
            Scene::Defeat { .. } => GamePhase::Defeat,
        }
    }
}

pub struct SimulationEngine {
    config: SessionConfig,
    path: Path,
    scene: Scene,
    /// The session that produced the current Victory or Defeat screen.
    finished: Option<Box<GameSession>>,
    /// Host clock at the most recent tick.
    now_ms: f64,
    sessions_started: u64,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create an engine sitting at the main menu.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let path = Path::new(config.path.clone())?;
        Ok(Self {
            config,
            path,
            scene: Scene::MainMenu,
            finished: None,
            now_ms: 0.0,
            sessions_started: 0,
            command_queue: VecDeque::new(),
            events: Vec::new(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance to `now_ms` and return the resulting snapshot.
    pub fn tick(&mut self, now_ms: f64, delta_ms: f64) -> GameStateSnapshot {
        self.now_ms = now_ms;
        self.process_commands();

        if let Scene::Playing(session) = &mut self.scene {
            session.tick(now_ms, delta_ms);
        }
        self.settle_scene();
        self.build_snapshot()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<CommandOutcome, CommandError> {
        self.handle_command(PlayerCommand::PointerDown { x, y })
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<CommandOutcome, CommandError> {
        self.handle_command(PlayerCommand::PointerMove { x, y })
    }

    /// Apply a command immediately.
    pub fn handle_command(&mut self, command: PlayerCommand) -> Result<CommandOutcome, CommandError> {
        let phase = self.phase();
        let outcome = match command {
            PlayerCommand::StartGame => {
                if phase == GamePhase::Playing {
                    return Err(CommandError::InvalidPhase { phase });
                }
                self.start_session();
                CommandOutcome::SceneChanged
            }
            PlayerCommand::ReturnToMenu => {
                if phase == GamePhase::MainMenu {
                    return Err(CommandError::InvalidPhase { phase });
                }
                info!("returning to menu");
                self.scene = Scene::MainMenu;
                self.finished = None;
                CommandOutcome::SceneChanged
            }
            other => {
                let Scene::Playing(session) = &mut self.scene else {
                    return Err(CommandError::InvalidPhase { phase });
                };
                match other {
                    PlayerCommand::PointerDown { x, y } => session.pointer_down(Vec2::new(x, y))?,
                    PlayerCommand::PointerMove { x, y } => session.pointer_move(Vec2::new(x, y)),
                    PlayerCommand::SelectTowerKind { kind } => session.select_tower_kind(kind),
                    PlayerCommand::DeselectTower => {
                        session.deselect_tower();
                        CommandOutcome::TowerDeselected
                    }
                    PlayerCommand::SellSelectedTower => {
                        let (tower, refund) = session.sell_selected_tower()?;
                        CommandOutcome::TowerSold { tower, refund }
                    }
                    PlayerCommand::StartGame | PlayerCommand::ReturnToMenu => {
                        CommandOutcome::Ignored
                    }
                }
            }
        };
        self.settle_scene();
        Ok(outcome)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.scene.phase()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The session being played, if any.
    pub fn session(&self) -> Option<&GameSession> {
        match &self.scene {
            Scene::Playing(session) => Some(session.as_ref()),
            _ => None,
        }
    }

    /// The session behind the current end screen.
    pub fn finished_session(&self) -> Option<&GameSession> {
        self.finished.as_deref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Details panel for a placed tower in the running session.
    pub fn tower_details(&self, id: TowerId) -> Option<TowerDetails> {
        self.session()?.tower_details(id)
    }

    fn start_session(&mut self) {
        self.sessions_started += 1;
        info!(session = self.sessions_started, "starting game");
        let session = GameSession::new(
            self.config.clone(),
            self.path.clone(),
            self.sessions_started,
            self.now_ms,
        );
        self.scene = Scene::Playing(Box::new(session));
        self.finished = None;
    }

    /// Process all queued commands. Rejections are logged and dropped.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.handle_command(command.clone()) {
                debug!(?command, %err, "command rejected");
            }
        }
    }

    /// Move to the end screen once the session reports an outcome.
    fn settle_scene(&mut self) {
        let Scene::Playing(session) = &mut self.scene else {
            return;
        };
        let Some(outcome) = session.outcome() else {
            return;
        };
        self.events.extend(session.take_events());

        let next = match outcome {
            SessionOutcome::Victory { score } => Scene::Victory { score },
            SessionOutcome::Defeat { score } => Scene::Defeat { score },
        };
        if let Scene::Playing(session) = std::mem::replace(&mut self.scene, next) {
            self.finished = Some(session);
        }
    }

    fn build_snapshot(&mut self) -> GameStateSnapshot {
        let mut events = std::mem::take(&mut self.events);
        let phase = self.phase();
        match &mut self.scene {
            Scene::Playing(session) => {
                events.extend(session.take_events());
                systems::snapshot::build_snapshot(session, events)
            }
            Scene::Victory { score } | Scene::Defeat { score } => {
                let score = *score;
                let mut snapshot = match &self.finished {
                    Some(session) => systems::snapshot::build_snapshot(session, events),
                    None => GameStateSnapshot {
                        events,
                        ..Default::default()
                    },
                };
                snapshot.phase = phase;
                snapshot.score = score;
                snapshot.final_score = Some(score);
                snapshot
            }
            Scene::MainMenu => GameStateSnapshot {
                time: SimTime {
                    tick: 0,
                    now_ms: self.now_ms,
                },
                phase,
                events,
                ..Default::default()
            },
        }
    }
}
