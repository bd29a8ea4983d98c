use proptest::prelude::*;

use super::test_support::*;
use super::*;
use crate::error::BehaviorError;
use crate::random::FixedSource;
use crate::sink::SinkEvent;

fn player() -> Combatant {
    unit("Player", 250.0, 15.0, 10.0, 60.0, Personality::default())
}

#[test]
fn starting_an_idle_controller_is_a_quiet_noop() {
    let mut fx = Fixture::new();
    let id = fx.add_opponent(player());
    let mut controller = Controller::idle();

    fx.start(&mut controller, id);

    assert!(controller.is_idle());
    assert!(fx.log.events().is_empty());
}

#[test]
fn updating_without_a_state_is_a_precondition_error() {
    let mut fx = Fixture::new();
    let id = fx.add_opponent(player());
    let mut controller = Controller::idle();

    assert_eq!(fx.step(&mut controller, id), Err(BehaviorError::NoCurrentState));
}

#[test]
fn start_runs_the_enter_hook_of_the_initial_state() {
    let mut fx = Fixture::new();
    let id = fx.add(unit("Rager", 35.0, 25.0, 4.0, 1.75, rager()));
    let mut controller = Controller::new(BehaviorState::RageDecision);

    fx.start(&mut controller, id);

    assert_eq!(fx.kinds(), vec!["enter Rage Decision"]);
    assert_eq!(controller.previous(), None);
}

#[test]
fn change_state_exits_old_before_entering_new() {
    let mut fx = Fixture::new();
    fx.add_opponent(player());
    let id = fx.add(unit("Guardian", 100.0, 25.0, 5.0, 2.0, guardian()).with_hp(50.0));
    let mut controller = Controller::new(BehaviorState::GuardianAttack);
    fx.start(&mut controller, id);
    fx.log.clear();

    let mut ctx = fx.ctx(id, 1.0);
    controller.change_state(BehaviorState::wait(), &mut ctx);

    assert_eq!(
        fx.kinds(),
        vec![
            "vitals",
            "exit Guardian Attack",
            "change Guardian Attack -> Wait",
            "cooldown",
            "enter Wait",
        ]
    );
    assert_eq!(controller.previous(), Some(&BehaviorState::GuardianAttack));
    assert_eq!(controller.current(), Some(&BehaviorState::Wait { cooldown: 5.0 }));
}

#[test]
fn rage_decision_idles_at_full_health() {
    let mut fx = Fixture::new();
    fx.add_opponent(player());
    let id = fx.add(unit("Rager", 35.0, 25.0, 4.0, 1.75, rager()));
    let mut controller = Controller::new(BehaviorState::RageDecision);
    fx.start(&mut controller, id);
    fx.log.clear();

    for _ in 0..5 {
        fx.step(&mut controller, id).expect("update");
    }

    assert_eq!(controller.current(), Some(&BehaviorState::RageDecision));
    assert!(fx.log.events().is_empty());
}

#[test]
fn generic_decision_routes_like_rage_decision_without_a_cue() {
    let mut fx = Fixture::new();
    fx.add_opponent(player());
    let id = fx.add(unit("Default", 10.0, 1.0, 1.0, 1.0, Personality::default()).with_hp(9.0));
    let mut controller = Controller::new(BehaviorState::Decision);
    fx.start(&mut controller, id);

    fx.step(&mut controller, id).expect("update");

    assert_eq!(controller.current(), Some(&BehaviorState::RageAttack));
    assert!(fx.log.cues_for(id).is_empty());
}

#[test]
fn injured_rager_attacks_then_cools_down() {
    let mut fx = Fixture::new();
    let target = fx.add_opponent(player());
    let id = fx.add(unit("Rager", 35.0, 25.0, 4.0, 1.75, rager()).with_hp(30.0));
    let mut controller = Controller::new(BehaviorState::RageDecision);
    fx.start(&mut controller, id);

    fx.step(&mut controller, id).expect("decide");
    assert_eq!(controller.current(), Some(&BehaviorState::RageAttack));
    assert_eq!(fx.log.cues_for(id), vec![Cue::Attack]);

    fx.log.clear();
    fx.step(&mut controller, id).expect("attack");

    assert_eq!(fx.hp(target), 235.0);
    assert_eq!(controller.current(), Some(&BehaviorState::Wait { cooldown: 6.0 }));
    assert_eq!(
        fx.kinds(),
        vec![
            "vitals",
            "exit Rage Attack",
            "change Rage Attack -> Wait",
            "cooldown",
            "enter Wait",
            "cue CooldownTrigger",
        ]
    );
}

#[test]
fn heal_critical_routes_on_quarter_health() {
    let mut fx = Fixture::new();
    fx.add_opponent(player());
    let critical = fx.add(unit("Critical", 100.0, 8.0, 3.0, 1.5, healer()).with_hp(25.0));
    let wounded = fx.add(unit("Wounded", 100.0, 8.0, 3.0, 1.5, healer()).with_hp(26.0));

    let mut first = Controller::new(BehaviorState::HealCritical);
    fx.start(&mut first, critical);
    fx.step(&mut first, critical).expect("update");
    assert_eq!(first.current(), Some(&BehaviorState::Heal));
    assert_eq!(fx.log.cues_for(critical), vec![Cue::HealSelf]);

    let mut second = Controller::new(BehaviorState::HealCritical);
    fx.start(&mut second, wounded);
    fx.step(&mut second, wounded).expect("update");
    assert_eq!(second.current(), Some(&BehaviorState::HealDecision));
    assert_eq!(fx.log.cues_for(wounded), vec![Cue::HealDecision]);
}

#[test]
fn heal_decision_picks_first_more_injured_ally() {
    let mut fx = Fixture::new();
    fx.add_opponent(player());
    let me = fx.add(unit("Healer", 100.0, 8.0, 3.0, 1.5, healer()).with_hp(80.0));
    let ally_a = fx.add(unit("Ally A", 100.0, 8.0, 3.0, 1.5, rager()).with_hp(40.0));
    fx.add(unit("Ally B", 100.0, 8.0, 3.0, 1.5, rager()).with_hp(90.0));
    let mut controller = Controller::new(BehaviorState::HealDecision);
    fx.start(&mut controller, me);

    fx.step(&mut controller, me).expect("decide");
    assert_eq!(controller.current(), Some(&BehaviorState::HealAlly { target: ally_a }));
    assert_eq!(fx.log.cues_for(me), vec![Cue::HealAlly]);

    fx.step(&mut controller, me).expect("heal");
    assert_eq!(fx.hp(ally_a), 47.5);
    assert_eq!(fx.hp(me), 80.0);
    assert!(matches!(controller.current(), Some(BehaviorState::Wait { .. })));
}

#[test]
fn heal_decision_heals_self_when_first_injured_ally_is_better_off() {
    let mut fx = Fixture::new();
    fx.add_opponent(player());
    let me = fx.add(unit("Healer", 100.0, 8.0, 3.0, 1.5, healer()).with_hp(50.0));
    // Scanned first and healthier than the healer, so the worse-off ally behind it is ignored.
    fx.add(unit("Scratched", 100.0, 8.0, 3.0, 1.5, rager()).with_hp(90.0));
    fx.add(unit("Bleeding", 100.0, 8.0, 3.0, 1.5, rager()).with_hp(10.0));
    let mut controller = Controller::new(BehaviorState::HealDecision);
    fx.start(&mut controller, me);

    fx.step(&mut controller, me).expect("decide");
    assert_eq!(controller.current(), Some(&BehaviorState::Heal));

    fx.step(&mut controller, me).expect("heal");
    assert_eq!(fx.hp(me), 75.0);
}

#[test]
fn heal_decision_never_targets_self() {
    let mut fx = Fixture::new();
    fx.add_opponent(player());
    let me = fx.add(unit("Healer", 100.0, 8.0, 3.0, 1.5, healer()).with_hp(30.0));
    fx.add(unit("Ally", 100.0, 8.0, 3.0, 1.5, rager()));
    let mut controller = Controller::new(BehaviorState::HealDecision);
    fx.start(&mut controller, me);

    fx.step(&mut controller, me).expect("decide");

    assert_eq!(controller.current(), Some(&BehaviorState::Heal));
}

#[test]
fn heal_decision_idles_when_everyone_is_healthy() {
    let mut fx = Fixture::new();
    fx.add_opponent(player());
    let me = fx.add(unit("Healer", 100.0, 8.0, 3.0, 1.5, healer()));
    fx.add(unit("Ally", 100.0, 8.0, 3.0, 1.5, rager()));
    let mut controller = Controller::new(BehaviorState::HealDecision);
    fx.start(&mut controller, me);
    fx.log.clear();

    fx.step(&mut controller, me).expect("decide");

    assert_eq!(controller.current(), Some(&BehaviorState::HealDecision));
    assert!(fx.log.events().is_empty());
}

#[test]
fn heal_ally_on_removed_target_still_cools_down() {
    let mut fx = Fixture::new();
    fx.add_opponent(player());
    let me = fx.add(unit("Healer", 100.0, 8.0, 3.0, 1.5, healer()));
    let ally = fx.add(unit("Ally", 100.0, 8.0, 3.0, 1.5, rager()).with_hp(10.0));
    let mut controller = Controller::new(BehaviorState::HealAlly { target: ally });
    fx.start(&mut controller, me);
    fx.combatants.remove(ally);
    fx.roster.remove(ally);
    fx.log.clear();

    fx.step(&mut controller, me).expect("heal");

    assert!(matches!(controller.current(), Some(BehaviorState::Wait { .. })));
    assert!(!fx.log.events().iter().any(|event| matches!(event, SinkEvent::Vitals { .. })));
}

#[test]
fn attack_on_dead_opponent_is_skipped() {
    let mut fx = Fixture::new();
    let target = fx.add_opponent(player());
    fx.combatants[target].receive_damage(10_000.0);
    let id = fx.add(unit("Rager", 35.0, 25.0, 4.0, 1.75, rager()));
    let mut controller = Controller::new(BehaviorState::RageAttack);
    fx.start(&mut controller, id);
    fx.log.clear();

    fx.step(&mut controller, id).expect("attack");

    assert_eq!(fx.hp(target), 0.0);
    assert_eq!(fx.log.deaths(), 0);
    assert!(matches!(controller.current(), Some(BehaviorState::Wait { .. })));
}

#[test]
fn guardian_initial_decision_heals_when_critical() {
    let mut fx = Fixture::new();
    fx.add_opponent(player());
    let id = fx.add(unit("Guardian", 100.0, 25.0, 5.0, 2.0, guardian()).with_hp(20.0));
    let mut controller = Controller::new(BehaviorState::GuardianInitialDecision);
    fx.start(&mut controller, id);

    fx.step(&mut controller, id).expect("decide");
    assert_eq!(controller.current(), Some(&BehaviorState::Heal));

    fx.step(&mut controller, id).expect("heal");
    assert_eq!(fx.hp(id), 45.0);
}

#[test]
fn guardian_initial_decision_moves_on_to_attack_decision() {
    let mut fx = Fixture::new();
    fx.add_opponent(player());
    let id = fx.add(unit("Guardian", 100.0, 25.0, 5.0, 2.0, guardian()).with_hp(26.0));
    let mut controller = Controller::new(BehaviorState::GuardianInitialDecision);
    fx.start(&mut controller, id);

    fx.step(&mut controller, id).expect("decide");

    assert_eq!(controller.current(), Some(&BehaviorState::GuardAttackDecision));
    assert_eq!(fx.log.cues_for(id), vec![Cue::AttackDecision]);
}

#[test]
fn high_guard_roll_triggers_guardian_attack_that_bypasses_defense() {
    let mut fx = Fixture::new();
    fx.random = FixedSource::constant(0.9);
    let target = fx.add_opponent(player());
    let id = fx.add(unit("Guardian", 100.0, 25.0, 5.0, 2.0, guardian()).with_hp(50.0));
    let mut controller = Controller::new(BehaviorState::GuardAttackDecision);
    fx.start(&mut controller, id);

    fx.step(&mut controller, id).expect("decide");
    assert_eq!(controller.current(), Some(&BehaviorState::GuardianAttack));
    assert_eq!(fx.log.cues_for(id), vec![Cue::GuardianAttack]);

    fx.step(&mut controller, id).expect("attack");
    assert_eq!(fx.hp(target), 200.0);
    assert_close(fx.hp(id), 83.0);
    assert_eq!(controller.current(), Some(&BehaviorState::Wait { cooldown: 5.0 }));
}

#[test]
fn guardian_recovery_is_clamped_at_full_health() {
    let mut fx = Fixture::new();
    fx.random = FixedSource::constant(0.9);
    let target = fx.add_opponent(player());
    let id = fx.add(unit("Guardian", 100.0, 25.0, 5.0, 2.0, guardian()));
    let mut controller = Controller::new(BehaviorState::GuardAttackDecision);
    fx.start(&mut controller, id);

    fx.step(&mut controller, id).expect("decide");
    fx.step(&mut controller, id).expect("attack");

    assert_eq!(fx.hp(target), 200.0);
    assert_eq!(fx.hp(id), 100.0);
}

#[test]
fn low_guard_roll_falls_back_to_rage_attack() {
    let mut fx = Fixture::new();
    fx.random = FixedSource::constant(0.5);
    let target = fx.add_opponent(player());
    let id = fx.add(unit("Guardian", 100.0, 25.0, 5.0, 2.0, guardian()));
    let mut controller = Controller::new(BehaviorState::GuardAttackDecision);
    fx.start(&mut controller, id);

    fx.step(&mut controller, id).expect("decide");
    assert_eq!(controller.current(), Some(&BehaviorState::RageAttack));
    assert_eq!(fx.log.cues_for(id), vec![Cue::RageAttack]);

    fx.step(&mut controller, id).expect("attack");
    assert_eq!(fx.hp(target), 235.0);
}

#[test]
fn wait_drains_by_speed_and_routes_after_expiry() {
    let mut fx = Fixture::new();
    fx.add_opponent(player());
    let id = fx.add(unit("Quick", 50.0, 5.0, 1.0, 5.0, rager()));
    let mut controller = Controller::new(BehaviorState::wait());
    fx.start(&mut controller, id);
    assert_eq!(controller.current(), Some(&BehaviorState::Wait { cooldown: 2.0 }));

    fx.step(&mut controller, id).expect("drain");
    assert_eq!(controller.current(), Some(&BehaviorState::Wait { cooldown: -3.0 }));

    fx.step(&mut controller, id).expect("route");
    assert_eq!(controller.current(), Some(&BehaviorState::RageDecision));
    assert_eq!(controller.previous(), Some(&BehaviorState::Wait { cooldown: -3.0 }));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]
    #[test]
    fn wait_cooldown_never_rises_and_always_expires(
        speed in 0.5_f32..50.0,
        delta in 0.05_f32..1.0
    ) {
        let mut fx = Fixture::new();
        let id = fx.add(unit("Waiter", 10.0, 1.0, 1.0, speed, rager()));
        let mut controller = Controller::new(BehaviorState::wait());
        fx.start(&mut controller, id);

        let mut last = f32::INFINITY;
        let mut ticks = 0;
        while let Some(BehaviorState::Wait { cooldown }) = controller.current().copied() {
            prop_assert!(cooldown <= last, "cooldown rose from {last} to {cooldown}");
            last = cooldown;
            let mut ctx = fx.ctx(id, delta);
            prop_assert_eq!(controller.update(&mut ctx), Ok(()));
            ticks += 1;
            prop_assert!(ticks <= 1_000, "speed={speed}, delta={delta} never left Wait");
        }
        prop_assert_eq!(controller.current(), Some(&BehaviorState::RageDecision));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]
    #[test]
    fn wait_drains_strictly_even_when_the_step_is_below_f32_precision(
        speed in 0.001_f32..0.5,
        delta in 0.001_f32..0.1
    ) {
        let mut fx = Fixture::new();
        let id = fx.add(unit("Crawler", 10.0, 1.0, 1.0, speed, rager()));
        let mut controller = Controller::new(BehaviorState::wait());
        fx.start(&mut controller, id);

        let mut last = f32::INFINITY;
        for _ in 0..200 {
            let Some(BehaviorState::Wait { cooldown }) = controller.current().copied() else {
                break;
            };
            prop_assert!(cooldown < last, "cooldown stalled at {cooldown}");
            last = cooldown;
            let mut ctx = fx.ctx(id, delta);
            prop_assert_eq!(controller.update(&mut ctx), Ok(()));
        }
    }
}

#[test]
fn wait_with_a_tiny_drain_still_moves_every_tick() {
    let mut fx = Fixture::new();
    let id = fx.add(unit("Crawler", 10.0, 1.0, 1.0, 0.005, rager()));
    let mut controller = Controller::new(BehaviorState::wait());
    fx.start(&mut controller, id);
    assert_eq!(controller.current(), Some(&BehaviorState::Wait { cooldown: 2000.0 }));

    let mut ctx = fx.ctx(id, 0.01);
    controller.update(&mut ctx).expect("drain");

    let Some(BehaviorState::Wait { cooldown }) = controller.current().copied() else {
        panic!("left Wait after one tick");
    };
    assert_eq!(cooldown, 2000.0_f32.next_down());
}

#[test]
fn wait_routes_by_personality_precedence() {
    let both = Personality { rage: 0.0, healing: 1.0, guarding: 1.0 };
    assert_eq!(next_decision(guardian()), BehaviorState::GuardianInitialDecision);
    assert_eq!(next_decision(healer()), BehaviorState::HealCritical);
    assert_eq!(next_decision(rager()), BehaviorState::RageDecision);
    assert_eq!(next_decision(Personality::default()), BehaviorState::RageDecision);
    // Guarding equal to healing skips the guardian branch.
    assert_eq!(next_decision(both), BehaviorState::HealCritical);
    assert_eq!(
        next_decision(Personality { rage: 1.0, healing: 1.0, guarding: 0.0 }),
        BehaviorState::RageDecision
    );
}

#[test]
fn signal_stop_only_narrates() {
    let mut fx = Fixture::new();
    let id = fx.add(unit("Rager", 35.0, 25.0, 4.0, 1.75, rager()));
    let mut controller = Controller::new(BehaviorState::RageDecision);
    fx.start(&mut controller, id);
    fx.log.clear();

    let ctx = fx.ctx(id, 1.0);
    controller.signal_stop(&ctx);

    assert_eq!(controller.current(), Some(&BehaviorState::RageDecision));
    assert!(fx.log.events().is_empty());
}

#[test]
fn state_kinds_partition_variants() {
    let states = [
        BehaviorState::Decision,
        BehaviorState::RageDecision,
        BehaviorState::RageAttack,
        BehaviorState::HealCritical,
        BehaviorState::HealDecision,
        BehaviorState::Heal,
        BehaviorState::GuardianInitialDecision,
        BehaviorState::GuardAttackDecision,
        BehaviorState::GuardianAttack,
        BehaviorState::wait(),
    ];
    for state in states {
        let is_wait = matches!(state, BehaviorState::Wait { .. });
        assert_eq!(state.is_decision() as u8 + state.is_action() as u8 + is_wait as u8, 1);
    }
}
