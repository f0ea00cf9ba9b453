//! Session-level state: wave counter, score total, and the terminal flags.
//!
//! Mutated only by the wave director and the score ledger; everything else
//! reads it.

use horde_core::enums::GamePhase;

#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    current_wave: u32,
    total_score: u64,
    max_waves: u32,
    started: bool,
    paused: bool,
    game_over: bool,
    victory: bool,
}

impl GameSession {
    pub fn new(max_waves: u32) -> Self {
        Self {
            current_wave: 0,
            total_score: 0,
            max_waves,
            started: false,
            paused: false,
            game_over: false,
            victory: false,
        }
    }

    pub fn current_wave(&self) -> u32 {
        self.current_wave
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    pub fn max_waves(&self) -> u32 {
        self.max_waves
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// True while simulation time should advance.
    pub fn is_running(&self) -> bool {
        self.started && !self.paused
    }

    pub fn phase(&self) -> GamePhase {
        if !self.started {
            GamePhase::NotStarted
        } else if self.game_over {
            if self.victory {
                GamePhase::Victory
            } else {
                GamePhase::Defeat
            }
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Active
        }
    }

    /// Returns true if the session was not already started.
    pub(crate) fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }

    /// Freeze time. No effect before start, after game over, or when already paused.
    pub fn pause(&mut self) -> bool {
        if !self.started || self.game_over || self.paused {
            return false;
        }
        self.paused = true;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.game_over || !self.paused {
            return false;
        }
        self.paused = false;
        true
    }

    pub(crate) fn begin_next_wave(&mut self) -> u32 {
        self.current_wave += 1;
        self.current_wave
    }

    pub(crate) fn add_points(&mut self, points: u64) -> u64 {
        self.total_score = self.total_score.saturating_add(points);
        self.total_score
    }

    pub(crate) fn declare_defeat(&mut self) {
        self.game_over = true;
        self.victory = false;
    }

    pub(crate) fn declare_victory(&mut self) {
        self.game_over = true;
        self.victory = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_follows_flags() {
        let mut session = GameSession::new(3);
        assert_eq!(session.phase(), GamePhase::NotStarted);
        assert!(!session.pause(), "cannot pause before start");

        assert!(session.start());
        assert!(!session.start());
        assert_eq!(session.phase(), GamePhase::Active);

        assert!(session.pause());
        assert!(!session.pause());
        assert_eq!(session.phase(), GamePhase::Paused);
        assert!(!session.is_running());

        assert!(session.resume());
        assert!(!session.resume());

        session.declare_defeat();
        assert_eq!(session.phase(), GamePhase::Defeat);
        assert!(!session.pause(), "pause is ignored once the game is over");
    }
}
