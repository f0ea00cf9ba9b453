#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::components::{ArchetypeTraits, Health};
    use crate::config::GameConfig;
    use crate::damage::{DamageOutcome, DamageSink};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::{CombatEvent, EventKind, GameEvent};
    use crate::state::GameStateSnapshot;
    use crate::types::{secs_to_ticks, Position, SimTime};

    // ---- Damage sink ----

    #[test]
    fn test_health_is_initial_minus_damage_floored_at_zero() {
        let mut health = Health::new(100);
        assert_eq!(health.take_damage(30), DamageOutcome::Wounded);
        assert_eq!(health.take_damage(25), DamageOutcome::Wounded);
        assert_eq!(health.reported(), 45);
        assert!(!health.is_dead());

        assert_eq!(health.take_damage(80), DamageOutcome::Killed);
        assert_eq!(health.reported(), 0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_death_transition_happens_once() {
        let mut health = Health::new(10);
        assert_eq!(health.take_damage(10), DamageOutcome::Killed);
        for _ in 0..5 {
            assert_eq!(health.take_damage(50), DamageOutcome::Ignored);
        }
        assert_eq!(health.reported(), 0);
        assert_eq!(health.health_fraction(), 0.0);
    }

    #[test]
    fn test_zero_damage_does_not_kill() {
        let mut health = Health::new(1);
        assert_eq!(health.take_damage(0), DamageOutcome::Wounded);
        assert!(!health.is_dead());
    }

    #[test]
    fn test_health_fraction_and_heal() {
        let mut health = Health::new(200);
        health.take_damage(150);
        assert!((health.health_fraction() - 0.25).abs() < 1e-12);
        health.heal(500);
        assert_eq!(health.reported(), 200);
        health.take_damage(200);
        health.heal(50);
        assert_eq!(health.reported(), 0, "the dead cannot be healed");
    }

    // ---- Enums ----

    #[test]
    fn test_archetype_index_clamp() {
        assert_eq!(
            AgentArchetype::from_index_clamped(3, 4),
            Some(AgentArchetype::Exploder)
        );
        assert_eq!(
            AgentArchetype::from_index_clamped(3, 2),
            Some(AgentArchetype::Runner)
        );
        assert_eq!(
            AgentArchetype::from_index_clamped(99, 10),
            Some(AgentArchetype::Exploder)
        );
        assert_eq!(AgentArchetype::from_index_clamped(0, 0), None);
        for a in AgentArchetype::ALL {
            assert_eq!(AgentArchetype::from_index_clamped(a.index(), 4), Some(a));
        }
    }

    #[test]
    fn test_archetype_traits_tag() {
        let tank = ArchetypeTraits::Tank {
            run_away_threshold: 0.3,
        };
        assert_eq!(tank.archetype(), AgentArchetype::Tank);
        let json = serde_json::to_string(&tank).unwrap();
        assert!(json.contains("\"archetype\":\"Tank\""), "got {json}");
    }

    #[test]
    fn test_game_phase_terminal() {
        assert!(GamePhase::Victory.is_terminal());
        assert!(GamePhase::Defeat.is_terminal());
        assert!(!GamePhase::Paused.is_terminal());
        assert!(!GamePhase::Active.is_terminal());
    }

    // ---- Events and commands ----

    #[test]
    fn test_game_event_serde_tagged() {
        let event = GameEvent::GameOver {
            final_score: 1150,
            final_wave: 11,
            victory: true,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"GameOver\""));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.kind(), EventKind::GameOver);
    }

    #[test]
    fn test_combat_event_serde() {
        let event = CombatEvent::AgentKilled {
            agent_id: 7,
            archetype: AgentArchetype::Runner,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: CombatEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_command_serde() {
        let json = r#"{"type":"Shoot","agent_id":3,"weapon":"Shotgun","base_damage":25,"range":100.0}"#;
        let cmd: PlayerCommand = serde_json::from_str(json).unwrap();
        match cmd {
            PlayerCommand::Shoot {
                agent_id, weapon, ..
            } => {
                assert_eq!(agent_id, 3);
                assert_eq!(weapon, WeaponKind::Shotgun);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snap = GameStateSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::NotStarted);
        assert!(back.agents.is_empty());
    }

    // ---- Geometry and time ----

    #[test]
    fn test_step_toward_does_not_overshoot() {
        let from = Position::ground(0.0, 0.0);
        let to = Position::ground(3.0, 4.0);
        let mid = from.step_toward(&to, 2.5);
        assert!((mid.range_to(&from) - 2.5).abs() < 1e-9);
        assert_eq!(from.step_toward(&to, 10.0), to);
    }

    #[test]
    fn test_yaw_north_is_zero() {
        let origin = Position::default();
        assert!(origin.yaw_to(&Position::ground(0.0, 5.0)).abs() < 1e-12);
        let east = origin.yaw_to(&Position::ground(5.0, 0.0));
        assert!((east - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_time_conversion() {
        assert_eq!(secs_to_ticks(0.5), 15);
        assert_eq!(secs_to_ticks(1.5), 45);
        assert_eq!(secs_to_ticks(-3.0), 0);

        let mut time = SimTime::default();
        for _ in 0..30 {
            time.advance();
        }
        assert_eq!(time.tick, 30);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.agents_for_wave(1), 5);
        assert_eq!(config.agents_for_wave(4), 11);
        assert_eq!(config.selection.len(), 3);
        assert_eq!(config.selection[0].archetype, AgentArchetype::Tank);
        assert_eq!(config.spawn_points.len(), 4);
    }

    #[test]
    fn test_wave_size_saturates_instead_of_overflowing() {
        let mut config = GameConfig::default();
        config.waves.per_wave_growth = u32::MAX;
        assert!(config.validate().is_ok());
        assert_eq!(config.agents_for_wave(1), 5);
        assert_eq!(config.agents_for_wave(2), u32::MAX);
        assert_eq!(config.agents_for_wave(u32::MAX), u32::MAX);

        config.waves.base_per_wave = u32::MAX;
        config.waves.per_wave_growth = 1;
        assert_eq!(config.agents_for_wave(3), u32::MAX);
    }

    #[test]
    fn test_partial_json_config_fills_defaults() {
        let config =
            GameConfig::from_json_str(r#"{"seed": 7, "waves": {"max_waves": 3}}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.waves.max_waves, 3);
        assert_eq!(config.waves.base_per_wave, 5);
        assert_eq!(config.scoring.points_per_kill, 10);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = GameConfig::from_json_str(r#"{"waves": {"max_waves": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err =
            GameConfig::from_json_str(r#"{"agents": {"attack_cooldown_secs": 0.2}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GameConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let err = GameConfig::load(std::path::Path::new("/nonexistent/horde.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/horde.json"));
    }
}
