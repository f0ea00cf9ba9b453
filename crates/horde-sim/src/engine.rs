//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Headless and
//! deterministic: the same config and command sequence always yield the same
//! snapshots.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use horde_ai::combat::weapon_damage;
use horde_core::commands::PlayerCommand;
use horde_core::components::{Agent, Health};
use horde_core::config::GameConfig;
use horde_core::enums::{GamePhase, WeaponKind};
use horde_core::events::{CombatEvent, EventKind};
use horde_core::state::{GameStateSnapshot, ScoreView};
use horde_core::types::{Position, SimTime};

use crate::director::{DirectorCtx, WaveDirector, WaveState};
use crate::factory::{AgentFactory, ProfileFactory};
use crate::ledger::{ScoreLedger, Subscriber, SubscriptionId};
use crate::scheduler::{ScheduledAction, Scheduler};
use crate::session::GameSession;
use crate::spatial::{FlatArena, SpatialQuery};
use crate::systems;
use crate::systems::damage::{apply_damage, entity_from_id, Casualty};
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: GameConfig,
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    combat_events: Vec<CombatEvent>,
    /// Lethal hits not yet reported to the director, in the order they landed.
    casualties: Vec<Casualty>,

    scheduler: Scheduler,
    session: GameSession,
    ledger: ScoreLedger,
    director: WaveDirector,
    spatial: Box<dyn SpatialQuery>,
    factory: Box<dyn AgentFactory>,
    protagonist: Option<Entity>,
    agents_killed: u32,
}

impl SimulationEngine {
    /// Create an engine on a flat arena with the built-in agent factory.
    pub fn new(config: GameConfig) -> Self {
        let spatial = Box::new(FlatArena::new(config.arena.half_extent));
        let factory = Box::new(ProfileFactory::new(config.agents.clone()));
        Self::with_collaborators(config, spatial, factory)
    }

    /// Create an engine with host-supplied spatial query and agent factory.
    pub fn with_collaborators(
        config: GameConfig,
        spatial: Box<dyn SpatialQuery>,
        factory: Box<dyn AgentFactory>,
    ) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            combat_events: Vec::new(),
            casualties: Vec::new(),
            scheduler: Scheduler::new(),
            session: GameSession::new(config.waves.max_waves),
            ledger: ScoreLedger::new(),
            director: WaveDirector::new(&config),
            spatial,
            factory,
            protagonist: None,
            agents_killed: 0,
            config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Subscribe to every lifecycle notification.
    pub fn subscribe(&mut self, handler: Subscriber) -> SubscriptionId {
        self.ledger.bus_mut().subscribe(handler)
    }

    /// Subscribe to one kind of lifecycle notification.
    pub fn subscribe_kind(&mut self, kind: EventKind, handler: Subscriber) -> SubscriptionId {
        self.ledger.bus_mut().subscribe_kind(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.ledger.bus_mut().unsubscribe(id)
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Nothing moves before `StartGame` or while paused; commands are still
    /// drained so `Resume` can take effect.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.session.is_running() {
            self.run_systems();
            self.time.advance();
        }

        let events = self.ledger.drain();
        let combat_events = std::mem::take(&mut self.combat_events);
        let wave = self
            .director
            .view(&self.session, &self.scheduler, self.time.tick);
        let score = ScoreView {
            total_score: self.session.total_score(),
            agents_killed: self.agents_killed,
        };
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.session.phase(),
            wave,
            score,
            events,
            combat_events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn wave(&self) -> WaveState {
        self.director.wave()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn protagonist(&self) -> Option<Entity> {
        self.protagonist
    }

    /// Place an agent directly, outside the wave sequence (for testing).
    #[cfg(test)]
    pub fn spawn_test_agent(
        &mut self,
        archetype: horde_core::enums::AgentArchetype,
        position: Position,
    ) -> Option<Entity> {
        self.factory.spawn(&mut self.world, archetype, position, 0.0)
    }

    /// Get a mutable reference to the ECS world (for testing).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
        self.settle_casualties();
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => self.start_game(),
            PlayerCommand::Pause => {
                if self.session.pause() {
                    info!(tick = self.time.tick, "paused");
                }
            }
            PlayerCommand::Resume => {
                if self.session.resume() {
                    info!(tick = self.time.tick, "resumed");
                }
            }
            PlayerCommand::EndGame => {
                if self.session.is_started() {
                    self.with_director(|director, ctx| director.game_over(ctx, false));
                }
            }
            // Paused or not yet started: the world is frozen.
            _ if !self.session.is_running() => {
                debug!(?command, "command ignored while not running");
            }
            PlayerCommand::MoveProtagonist { position } => {
                if let Some(protagonist) = self.protagonist {
                    if let Ok(mut pos) = self.world.get::<&mut Position>(protagonist) {
                        *pos = position;
                    }
                }
            }
            PlayerCommand::HealProtagonist { amount } => self.heal_protagonist(amount),
            PlayerCommand::Shoot {
                agent_id,
                weapon,
                base_damage,
                range,
            } => self.shoot(agent_id, weapon, base_damage, range),
            PlayerCommand::DamageAgent { agent_id, amount } => {
                self.damage_agent(agent_id, amount);
            }
        }
    }

    fn start_game(&mut self) {
        if !self.session.start() {
            return;
        }
        self.protagonist = Some(world_setup::spawn_protagonist(
            &mut self.world,
            &self.config.protagonist,
        ));
        info!(
            seed = self.config.seed,
            max_waves = self.session.max_waves(),
            "game started"
        );
        self.with_director(|director, ctx| director.advance_wave(ctx));
    }

    fn heal_protagonist(&mut self, amount: u32) {
        let Some(protagonist) = self.protagonist else {
            return;
        };
        if let Ok(mut health) = self.world.get::<&mut Health>(protagonist) {
            if health.dead {
                return;
            }
            health.heal(amount);
            self.combat_events.push(CombatEvent::ProtagonistHealed {
                amount,
                remaining: health.reported(),
            });
        }
    }

    /// A weapon hit resolved by the host. Damage falls off with the distance
    /// between protagonist and agent.
    fn shoot(&mut self, agent_id: u64, weapon: WeaponKind, base_damage: u32, range: f64) {
        let (Some(protagonist), Some(agent)) = (self.protagonist, self.find_agent(agent_id)) else {
            return;
        };
        let (Ok(from), Ok(to)) = (
            self.world.get::<&Position>(protagonist).map(|p| *p),
            self.world.get::<&Position>(agent).map(|p| *p),
        ) else {
            return;
        };
        let distance = self.spatial.distance(&from, &to);
        let amount = weapon_damage(weapon, base_damage, distance, range);
        debug!(agent = agent_id, ?weapon, distance, amount, "weapon hit");
        self.apply(agent, amount);
    }

    fn damage_agent(&mut self, agent_id: u64, amount: u32) {
        if let Some(agent) = self.find_agent(agent_id) {
            self.apply(agent, amount);
        }
    }

    fn find_agent(&self, agent_id: u64) -> Option<Entity> {
        entity_from_id(&self.world, agent_id)
            .filter(|entity| self.world.get::<&Agent>(*entity).is_ok())
    }

    fn apply(&mut self, target: Entity, amount: u32) {
        apply_damage(
            &mut self.world,
            &mut self.scheduler,
            target,
            amount,
            self.time.tick,
            &mut self.casualties,
            &mut self.combat_events,
        );
    }

    /// Run all simulation systems for one tick.
    fn run_systems(&mut self) {
        let now = self.time.tick;

        // 1. Expired timers, one at a time. Deaths caused by one action are
        //    settled before the next fires, so a game over cancels what follows.
        while let Some((_handle, action)) = self.scheduler.pop_due(now) {
            self.fire(action);
            self.settle_casualties();
        }

        // 2. Agent AI: FSM decisions, attack starts, fuses.
        systems::agent_ai::run(
            &mut self.world,
            &mut self.scheduler,
            self.spatial.as_ref(),
            &mut self.rng,
            self.protagonist,
            now,
            &mut self.combat_events,
        );

        // 3. Locomotion.
        systems::movement::run(&mut self.world);

        // 4. Corpse removal.
        systems::cleanup::run(&mut self.world, now, &mut self.despawn_buffer);
    }

    fn fire(&mut self, action: ScheduledAction) {
        let now = self.time.tick;
        match action {
            ScheduledAction::AttackStrike(agent) => systems::attack::strike(
                &mut self.world,
                &mut self.scheduler,
                self.spatial.as_ref(),
                agent,
                self.protagonist,
                now,
                &mut self.casualties,
                &mut self.combat_events,
            ),
            ScheduledAction::AttackRecovered(agent) => {
                systems::attack::recover(&mut self.world, agent);
            }
            ScheduledAction::Detonate(agent) => systems::detonation::detonate(
                &mut self.world,
                &mut self.scheduler,
                self.spatial.as_ref(),
                agent,
                now,
                &mut self.casualties,
                &mut self.combat_events,
            ),
            ScheduledAction::SpawnNext => {
                self.with_director(|director, ctx| director.spawn_next(ctx));
            }
            ScheduledAction::AdvanceWave => {
                self.with_director(|director, ctx| director.advance_wave(ctx));
            }
        }
    }

    /// Report recorded deaths to the director, in the order they happened.
    fn settle_casualties(&mut self) {
        let casualties = std::mem::take(&mut self.casualties);
        for casualty in casualties {
            match casualty {
                Casualty::Agent(agent, _) => {
                    self.agents_killed += 1;
                    self.with_director(|director, ctx| director.on_agent_death(ctx, agent));
                }
                Casualty::Protagonist(_) => {
                    self.with_director(|director, ctx| director.game_over(ctx, true));
                }
            }
        }
    }

    fn with_director<R>(&mut self, f: impl FnOnce(&mut WaveDirector, &mut DirectorCtx) -> R) -> R {
        let mut ctx = DirectorCtx {
            world: &mut self.world,
            session: &mut self.session,
            ledger: &mut self.ledger,
            scheduler: &mut self.scheduler,
            factory: self.factory.as_mut(),
            rng: &mut self.rng,
            now_tick: self.time.tick,
        };
        f(&mut self.director, &mut ctx)
    }
}
