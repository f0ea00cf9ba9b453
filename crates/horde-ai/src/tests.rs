#[cfg(test)]
mod tests {
    use horde_core::components::{AgentStats, ArchetypeTraits};
    use horde_core::config::{default_selection, AgentBaseStats, SelectionGate};
    use horde_core::constants::DT;
    use horde_core::enums::{AgentArchetype, AgentState, AttackPhase, WeaponKind};
    use horde_core::types::Position;

    use crate::combat::{blast_damage, weapon_damage};
    use crate::fsm::{evaluate, flee_point, AgentContext, MovementIntent};
    use crate::profiles::get_profile;
    use crate::selection::select_archetype;

    fn stats_for(archetype: AgentArchetype) -> AgentStats {
        get_profile(archetype, &AgentBaseStats::default()).stats
    }

    /// Agent at the origin with the target `range` meters to the north.
    fn make_context(archetype: AgentArchetype, range: Option<f64>) -> AgentContext {
        AgentContext {
            stats: stats_for(archetype),
            state: AgentState::Wander,
            attack: AttackPhase::Ready,
            position: Position::ground(0.0, 0.0),
            health_fraction: 1.0,
            target: range.map(|r| Position::ground(0.0, r)),
            wander_timer_secs: 5.0,
            dt: DT,
        }
    }

    // ---- Wander ----

    #[test]
    fn test_no_target_wanders_and_counts_down() {
        let ctx = make_context(AgentArchetype::Normal, None);
        let decision = evaluate(&ctx);
        assert_eq!(decision.new_state, AgentState::Wander);
        assert_eq!(decision.movement, MovementIntent::Keep);
        assert!((decision.wander_timer_secs - (5.0 - DT)).abs() < 1e-12);
        assert!(!decision.begin_attack);
    }

    #[test]
    fn test_wander_timer_expiry_requests_roam_and_resets() {
        let mut ctx = make_context(AgentArchetype::Normal, None);
        ctx.wander_timer_secs = DT / 2.0;
        let decision = evaluate(&ctx);
        assert_eq!(
            decision.movement,
            MovementIntent::Roam {
                origin: ctx.position,
                radius: ctx.stats.wander_radius,
            }
        );
        assert_eq!(decision.wander_timer_secs, ctx.stats.wander_interval_secs);
    }

    #[test]
    fn test_target_beyond_detection_range_is_ignored() {
        let ctx = make_context(AgentArchetype::Runner, Some(15.01));
        let decision = evaluate(&ctx);
        assert_eq!(decision.new_state, AgentState::Wander);
    }

    // ---- Chase ----

    #[test]
    fn test_normal_and_runner_chase_detected_target() {
        for archetype in [AgentArchetype::Normal, AgentArchetype::Runner] {
            let mut ctx = make_context(archetype, Some(15.0));
            ctx.wander_timer_secs = 2.0;
            let decision = evaluate(&ctx);
            assert_eq!(decision.new_state, AgentState::Chasing);
            assert!(decision.state_changed);
            assert_eq!(
                decision.movement,
                MovementIntent::Pursue(Position::ground(0.0, 15.0))
            );
            assert_eq!(decision.wander_timer_secs, 2.0, "timer frozen while chasing");
        }
    }

    #[test]
    fn test_chasing_reissues_destination_without_state_change() {
        let mut ctx = make_context(AgentArchetype::Normal, Some(8.0));
        ctx.state = AgentState::Chasing;
        let decision = evaluate(&ctx);
        assert!(!decision.state_changed);
        assert_eq!(
            decision.movement,
            MovementIntent::Pursue(Position::ground(0.0, 8.0))
        );
    }

    // ---- Tank ----

    #[test]
    fn test_wounded_tank_flees() {
        let mut ctx = make_context(AgentArchetype::Tank, Some(5.0));
        ctx.health_fraction = 0.25;
        let decision = evaluate(&ctx);
        assert_eq!(decision.new_state, AgentState::Fleeing);
        match decision.movement {
            MovementIntent::Flee { toward, .. } => {
                // Target is north, so the flee point is 10 m south.
                assert!((toward.y + 10.0).abs() < 1e-9, "got {toward:?}");
                assert!(toward.x.abs() < 1e-9);
            }
            other => panic!("expected Flee, got {other:?}"),
        }
    }

    #[test]
    fn test_tank_at_exact_threshold_flees() {
        let mut ctx = make_context(AgentArchetype::Tank, Some(5.0));
        ctx.health_fraction = 0.3;
        assert_eq!(evaluate(&ctx).new_state, AgentState::Fleeing);
    }

    #[test]
    fn test_healthy_tank_chases() {
        let mut ctx = make_context(AgentArchetype::Tank, Some(5.0));
        ctx.health_fraction = 0.31;
        assert_eq!(evaluate(&ctx).new_state, AgentState::Chasing);
    }

    #[test]
    fn test_flee_point_on_top_of_threat_stays_put() {
        let here = Position::ground(3.0, 4.0);
        assert_eq!(flee_point(here, here, 10.0), here);
    }

    // ---- Exploder ----

    #[test]
    fn test_exploder_arms_within_trigger_range() {
        // 1.5 × 1.5 m attack range = 2.25 m
        let ctx = make_context(AgentArchetype::Exploder, Some(2.25));
        let decision = evaluate(&ctx);
        assert_eq!(decision.new_state, AgentState::Detonating);
        assert!(decision.arm_detonation);
        assert_eq!(decision.movement, MovementIntent::Halt);
        assert!(!decision.begin_attack, "detonating agents never attack");
    }

    #[test]
    fn test_exploder_inside_attack_range_detonates_instead_of_attacking() {
        let ctx = make_context(AgentArchetype::Exploder, Some(1.0));
        let decision = evaluate(&ctx);
        assert!(decision.arm_detonation);
        assert!(!decision.begin_attack);
    }

    #[test]
    fn test_exploder_outside_trigger_range_chases() {
        let ctx = make_context(AgentArchetype::Exploder, Some(2.3));
        let decision = evaluate(&ctx);
        assert_eq!(decision.new_state, AgentState::Chasing);
        assert!(!decision.arm_detonation);
    }

    #[test]
    fn test_detonating_and_dead_make_no_decisions() {
        for state in [AgentState::Detonating, AgentState::Dead] {
            let mut ctx = make_context(AgentArchetype::Exploder, Some(0.5));
            ctx.state = state;
            let decision = evaluate(&ctx);
            assert_eq!(decision.new_state, state);
            assert!(!decision.state_changed);
            assert!(!decision.begin_attack);
            assert!(!decision.arm_detonation);
            assert_eq!(decision.movement, MovementIntent::Keep);
        }
    }

    // ---- Attack eligibility ----

    #[test]
    fn test_attack_begins_in_range_when_ready() {
        let ctx = make_context(AgentArchetype::Normal, Some(1.5));
        assert!(evaluate(&ctx).begin_attack);
    }

    #[test]
    fn test_no_attack_while_one_is_in_flight() {
        for phase in [AttackPhase::WindUp, AttackPhase::Recovering] {
            let mut ctx = make_context(AgentArchetype::Normal, Some(1.0));
            ctx.attack = phase;
            assert!(!evaluate(&ctx).begin_attack);
        }
    }

    #[test]
    fn test_no_attack_out_of_range() {
        let ctx = make_context(AgentArchetype::Normal, Some(1.6));
        assert!(!evaluate(&ctx).begin_attack);
    }

    #[test]
    fn test_fleeing_tank_still_swings_in_range() {
        let mut ctx = make_context(AgentArchetype::Tank, Some(1.0));
        ctx.health_fraction = 0.1;
        let decision = evaluate(&ctx);
        assert_eq!(decision.new_state, AgentState::Fleeing);
        assert!(decision.begin_attack);
    }

    // ---- Profiles ----

    #[test]
    fn test_archetype_profiles() {
        let base = AgentBaseStats::default();

        let normal = get_profile(AgentArchetype::Normal, &base);
        assert_eq!(normal.max_health, 100);
        assert_eq!(normal.stats.damage, 10);
        assert_eq!(normal.stats.traits, ArchetypeTraits::Normal);

        let runner = get_profile(AgentArchetype::Runner, &base);
        assert_eq!(runner.max_health, 80);
        assert!((runner.stats.move_speed - 5.25).abs() < 1e-9);
        assert!((runner.stats.attack_cooldown_secs - 1.4).abs() < 1e-9);

        let tank = get_profile(AgentArchetype::Tank, &base);
        assert_eq!(tank.max_health, 250);
        assert_eq!(tank.stats.damage, 15);
        assert!((tank.stats.attack_cooldown_secs - 3.0).abs() < 1e-9);
        assert_eq!(
            tank.stats.traits,
            ArchetypeTraits::Tank {
                run_away_threshold: 0.3
            }
        );

        let exploder = get_profile(AgentArchetype::Exploder, &base);
        assert_eq!(exploder.max_health, 60);
        assert_eq!(exploder.stats.traits.archetype(), AgentArchetype::Exploder);
    }

    // ---- Falloff ----

    #[test]
    fn test_blast_damage_falloff() {
        assert_eq!(blast_damage(50.0, 5.0, 0.0), 50);
        assert_eq!(blast_damage(50.0, 5.0, 2.5), 25);
        assert_eq!(blast_damage(50.0, 5.0, 5.0), 0);
        assert_eq!(blast_damage(50.0, 5.0, 7.0), 0, "clamped at zero");
        assert_eq!(blast_damage(50.0, 0.0, 0.0), 0);
    }

    #[test]
    fn test_weapon_damage_falloff() {
        assert_eq!(weapon_damage(WeaponKind::Pistol, 25, 0.0, 100.0), 25);
        assert_eq!(weapon_damage(WeaponKind::Pistol, 25, 60.0, 100.0), 10);
        assert_eq!(weapon_damage(WeaponKind::Pistol, 25, 150.0, 100.0), 0);
        // Shotgun close-range bonus below 30% of range.
        assert_eq!(weapon_damage(WeaponKind::Shotgun, 25, 20.0, 100.0), 30);
        assert_eq!(weapon_damage(WeaponKind::Shotgun, 25, 60.0, 100.0), 10);
        assert_eq!(weapon_damage(WeaponKind::RocketLauncher, 40, 0.0, 0.0), 0);
    }

    // ---- Selection ----

    #[test]
    fn test_wave_one_is_all_normal() {
        let gates = default_selection();
        for i in 0..100 {
            let roll = i as f64 / 100.0;
            assert_eq!(
                select_archetype(1, roll, &gates, 4),
                Some(AgentArchetype::Normal)
            );
        }
    }

    #[test]
    fn test_gates_checked_in_order() {
        let gates = default_selection();
        // Wave 2: runner below 0.4, tank locked.
        assert_eq!(select_archetype(2, 0.39, &gates, 4), Some(AgentArchetype::Runner));
        assert_eq!(select_archetype(2, 0.41, &gates, 4), Some(AgentArchetype::Normal));
        // Wave 3: tank below 0.19 wins over runner.
        assert_eq!(select_archetype(3, 0.18, &gates, 4), Some(AgentArchetype::Tank));
        assert_eq!(select_archetype(3, 0.20, &gates, 4), Some(AgentArchetype::Runner));
    }

    #[test]
    fn test_default_gates_shadow_exploder() {
        let gates = default_selection();
        for wave in 4..=10 {
            for i in 0..1000 {
                let roll = i as f64 / 1000.0;
                assert_ne!(
                    select_archetype(wave, roll, &gates, 4),
                    Some(AgentArchetype::Exploder),
                    "wave {wave} roll {roll}"
                );
            }
        }
    }

    #[test]
    fn test_exploder_reachable_when_gated_first() {
        let gates = vec![SelectionGate {
            archetype: AgentArchetype::Exploder,
            min_wave: 1,
            base: 0.5,
            per_wave: 0.0,
        }];
        assert_eq!(select_archetype(1, 0.2, &gates, 4), Some(AgentArchetype::Exploder));
    }

    #[test]
    fn test_selection_clamps_to_available_archetypes() {
        let gates = default_selection();
        assert_eq!(select_archetype(3, 0.0, &gates, 2), Some(AgentArchetype::Runner));
        assert_eq!(select_archetype(3, 0.0, &gates, 1), Some(AgentArchetype::Normal));
        assert_eq!(select_archetype(3, 0.0, &gates, 0), None);
    }
}
