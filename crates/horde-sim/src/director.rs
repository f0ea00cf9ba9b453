//! Wave director: wave sequencing, spawning, completion, and the terminal
//! transitions of the session.
//!
//! Wave `n` spawns `base_per_wave + (n - 1) × per_wave_growth` agents, one
//! every `spawn_interval_secs` after a `pre_spawn_delay_secs` warm-up. The
//! wave completes when every agent it counted has died and spawning is over;
//! the next wave starts `time_between_waves_secs` later. Clearing the last
//! wave is a victory.

use std::collections::HashSet;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use horde_ai::selection::select_archetype;
use horde_core::config::GameConfig;
use horde_core::enums::WavePhase;
use horde_core::events::GameEvent;
use horde_core::state::WaveView;
use horde_core::types::{secs_to_ticks, ticks_to_secs, TimerHandle};

use crate::factory::AgentFactory;
use crate::ledger::ScoreLedger;
use crate::scheduler::{ScheduledAction, Scheduler};
use crate::session::GameSession;

/// Engine collaborators the director works through.
pub struct DirectorCtx<'a> {
    pub world: &'a mut World,
    pub session: &'a mut GameSession,
    pub ledger: &'a mut ScoreLedger,
    pub scheduler: &'a mut Scheduler,
    pub factory: &'a mut dyn AgentFactory,
    pub rng: &'a mut ChaCha8Rng,
    pub now_tick: u64,
}

/// Counters for the wave in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveState {
    pub number: u32,
    pub phase: WavePhase,
    pub to_spawn: u32,
    /// Spawn attempts made, including failed ones.
    pub spawned: u32,
    /// Counted agents not yet dead. Never goes below zero.
    pub remaining: u32,
}

pub struct WaveDirector {
    config: GameConfig,
    wave: WaveState,
    pending_spawn: Option<TimerHandle>,
    pending_advance: Option<TimerHandle>,
    /// Agents of the current wave whose death has already been credited.
    credited: HashSet<Entity>,
}

impl WaveDirector {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.clone(),
            wave: WaveState::default(),
            pending_spawn: None,
            pending_advance: None,
            credited: HashSet::new(),
        }
    }

    pub fn wave(&self) -> WaveState {
        self.wave
    }

    #[cfg(test)]
    pub fn credited_len(&self) -> usize {
        self.credited.len()
    }

    pub fn view(&self, session: &GameSession, scheduler: &Scheduler, now_tick: u64) -> WaveView {
        WaveView {
            wave_number: self.wave.number,
            max_waves: session.max_waves(),
            phase: self.wave.phase,
            agents_to_spawn: self.wave.to_spawn,
            agents_spawned: self.wave.spawned,
            agents_remaining: self.wave.remaining,
            next_wave_in_secs: self
                .pending_advance
                .and_then(|h| scheduler.remaining_ticks(h, now_tick))
                .map(ticks_to_secs),
        }
    }

    /// Start the next wave, or declare victory if the last one is done.
    pub fn advance_wave(&mut self, ctx: &mut DirectorCtx) {
        self.pending_advance = None;
        if ctx.session.is_game_over() {
            return;
        }

        let number = ctx.session.begin_next_wave();
        if number > ctx.session.max_waves() {
            self.victory(ctx);
            return;
        }

        // Every agent counted by the previous wave is dead by now.
        self.credited.clear();
        let to_spawn = self.config.agents_for_wave(number);
        self.wave = WaveState {
            number,
            phase: WavePhase::Spawning,
            to_spawn,
            spawned: 0,
            remaining: to_spawn,
        };
        ctx.ledger.publish(GameEvent::WaveStarted {
            wave_number: number,
        });
        info!(wave = number, agents = to_spawn, "wave started");

        self.pending_spawn = Some(ctx.scheduler.schedule(
            ctx.now_tick,
            secs_to_ticks(self.config.waves.pre_spawn_delay_secs),
            ScheduledAction::SpawnNext,
        ));
    }

    /// One step of the spawn sequence.
    pub fn spawn_next(&mut self, ctx: &mut DirectorCtx) {
        self.pending_spawn = None;
        if self.wave.phase != WavePhase::Spawning {
            return;
        }
        if ctx.session.is_game_over() || self.wave.spawned >= self.wave.to_spawn {
            self.finish_spawning(ctx);
            return;
        }

        self.spawn_one(ctx);
        self.wave.spawned += 1;
        self.pending_spawn = Some(ctx.scheduler.schedule(
            ctx.now_tick,
            secs_to_ticks(self.config.waves.spawn_interval_secs),
            ScheduledAction::SpawnNext,
        ));
    }

    fn spawn_one(&mut self, ctx: &mut DirectorCtx) {
        if self.config.spawn_points.is_empty() {
            warn!(wave = self.wave.number, "no spawn points configured");
            return;
        }
        let points = &self.config.spawn_points;
        let point = points[ctx.rng.gen_range(0..points.len())];
        let roll: f64 = ctx.rng.gen();
        let available = ctx.factory.available_archetypes();
        let Some(archetype) =
            select_archetype(self.wave.number, roll, &self.config.selection, available)
        else {
            warn!(wave = self.wave.number, "agent factory offers no archetypes");
            return;
        };

        match ctx
            .factory
            .spawn(ctx.world, archetype, point.position, point.yaw)
        {
            Some(entity) => debug!(
                wave = self.wave.number,
                agent = entity.to_bits().get(),
                ?archetype,
                "agent spawned"
            ),
            None => warn!(wave = self.wave.number, ?archetype, "agent spawn failed"),
        }
    }

    fn finish_spawning(&mut self, ctx: &mut DirectorCtx) {
        self.wave.phase = WavePhase::AwaitingCompletion;
        if self.wave.remaining == 0 && !ctx.session.is_game_over() {
            self.complete_wave(ctx);
        }
    }

    /// Credit an agent death. Duplicate reports and deaths after game over
    /// are ignored.
    pub fn on_agent_death(&mut self, ctx: &mut DirectorCtx, agent: Entity) {
        if ctx.session.is_game_over() || !self.credited.insert(agent) {
            return;
        }
        if self.wave.remaining == 0 {
            return;
        }

        self.wave.remaining -= 1;
        ctx.ledger.add_score(ctx.session, self.config.scoring.points_per_kill);

        if self.wave.remaining == 0 && self.wave.phase == WavePhase::AwaitingCompletion {
            self.complete_wave(ctx);
        }
    }

    fn complete_wave(&mut self, ctx: &mut DirectorCtx) {
        self.wave.phase = WavePhase::Complete;
        let bonus = self.config.scoring.points_per_wave * u64::from(self.wave.number);
        ctx.ledger.add_score(ctx.session, bonus);
        ctx.ledger.publish(GameEvent::WaveEnded {
            wave_number: self.wave.number,
        });
        info!(wave = self.wave.number, bonus, "wave complete");

        self.pending_advance = Some(ctx.scheduler.schedule(
            ctx.now_tick,
            secs_to_ticks(self.config.waves.time_between_waves_secs),
            ScheduledAction::AdvanceWave,
        ));
    }

    fn victory(&mut self, ctx: &mut DirectorCtx) {
        ctx.session.declare_victory();
        let bonus = self.config.scoring.points_per_wave
            * u64::from(ctx.session.max_waves())
            * self.config.scoring.victory_multiplier;
        ctx.ledger.add_score(ctx.session, bonus);
        ctx.ledger.publish(GameEvent::GameOver {
            final_score: ctx.session.total_score(),
            final_wave: ctx.session.max_waves(),
            victory: true,
        });
        info!(score = ctx.session.total_score(), "all waves cleared");
    }

    /// End the session in defeat. Idempotent. Cancels the pending wave
    /// advance and any remaining spawns.
    pub fn game_over(&mut self, ctx: &mut DirectorCtx, from_player_death: bool) {
        if ctx.session.is_game_over() {
            return;
        }
        ctx.session.declare_defeat();

        if let Some(handle) = self.pending_advance.take() {
            ctx.scheduler.cancel(handle);
        }
        if let Some(handle) = self.pending_spawn.take() {
            ctx.scheduler.cancel(handle);
        }
        if self.wave.phase == WavePhase::Spawning {
            self.wave.phase = WavePhase::AwaitingCompletion;
        }

        ctx.ledger.publish(GameEvent::GameOver {
            final_score: ctx.session.total_score(),
            final_wave: ctx.session.current_wave(),
            victory: false,
        });
        info!(
            score = ctx.session.total_score(),
            wave = ctx.session.current_wave(),
            from_player_death,
            "game over"
        );
    }
}
