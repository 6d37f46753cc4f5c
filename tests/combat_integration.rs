//! Combat rules integration tests
//!
//! Robots, abilities and status effects working together through the public API.

use robot_arena::combat::{
    Archetype, CombatEvent, DamageModifier, Robot, RobotRole, StatusEffect, StatusKind,
};
use robot_arena::core::ActionRejection;

#[test]
fn test_attacker_hits_boss_through_armor_and_resistance() {
    let attacker = Robot::player("Volt", Archetype::Attacker);
    let mut boss = Robot::boss("Mega Boss");

    let events = attacker.attack(&mut boss).unwrap();

    // max(0, 25 - 20) = 5, boss keeps 80% -> 4
    assert_eq!(
        events[0],
        CombatEvent::Attacked {
            attacker: "Volt".into(),
            target: "Mega Boss".into(),
            damage: 5,
        }
    );
    assert_eq!(boss.energy(), 196);
}

#[test]
fn test_boss_hits_player_without_resistance() {
    let boss = Robot::boss("Mega Boss");
    let mut defender = Robot::player("Bulwark", Archetype::Defender);

    boss.attack(&mut defender).unwrap();

    // 30 - 15 = 15, no modifier on players
    assert_eq!(defender.energy(), 85);
}

#[test]
fn test_shock_stun_wears_off_after_two_ticks() {
    let mut balanced = Robot::player("Spark", Archetype::Balanced);
    let mut target = Robot::player("Dummy", Archetype::Balanced);

    // Balanced: [Repair, Shock Attack]
    balanced.use_ability(1, Some(&mut target)).unwrap();

    assert_eq!(target.energy(), 80);
    assert!(target.is_stunned());

    assert!(target.update_status_effects().is_empty());
    assert!(target.is_stunned());

    let expired = target.update_status_effects();
    assert_eq!(
        expired,
        vec![CombatEvent::StatusExpired {
            robot: "Dummy".into(),
            status: StatusKind::Stun,
        }]
    );
    assert!(!target.is_stunned());
    assert!(target.effects().is_empty());
}

#[test]
fn test_super_defense_restores_armor_after_three_ticks() {
    let mut robot = Robot::new(
        "Plain",
        RobotRole::Player(Archetype::Defender),
        100,
        10,
        20,
        &Archetype::Defender.abilities(),
        DamageModifier::Identity,
    );

    // Defender: [Repair, Super Defense]
    robot.use_ability(1, None).unwrap();
    assert_eq!(robot.armor().current(), 25);

    robot.update_status_effects();
    robot.update_status_effects();
    assert_eq!(robot.armor().current(), 25);

    robot.update_status_effects();
    assert_eq!(robot.armor().current(), 10);
}

#[test]
fn test_overlapping_shields_never_drop_below_base() {
    let mut robot = Robot::player("Bulwark", Archetype::Defender);
    let base = robot.armor().base();

    robot.add_status_effect(StatusEffect::shield(3, 15));
    robot.update_status_effects();
    robot.add_status_effect(StatusEffect::shield(3, 15));
    assert_eq!(robot.armor().current(), base + 30);

    for _ in 0..5 {
        robot.update_status_effects();
        assert!(robot.armor().current() >= base);
    }
    assert_eq!(robot.armor().current(), base);
}

#[test]
fn test_stunned_robot_cannot_act_or_change_anything() {
    let mut stunned = Robot::player("Volt", Archetype::Attacker);
    let mut boss = Robot::boss("Mega Boss");
    stunned.add_status_effect(StatusEffect::stun(2));

    let attack = stunned.attack(&mut boss);
    let ability = stunned.use_ability(1, Some(&mut boss));

    assert_eq!(
        attack,
        Err(ActionRejection::Stunned {
            robot: "Volt".into()
        })
    );
    assert!(matches!(ability, Err(ActionRejection::Stunned { .. })));
    assert_eq!(boss.energy(), 200);
    assert_eq!(boss.armor().current(), 20);
    assert_eq!(stunned.energy(), 100);
    assert!(stunned.abilities()[1].is_ready());
}

#[test]
fn test_cooldown_blocks_reuse_until_ticked_down() {
    let mut robot = Robot::player("Medic", Archetype::Balanced);
    robot.use_ability(0, None).unwrap();
    assert_eq!(robot.energy(), 140);

    for remaining in [3, 2, 1] {
        let rejected = robot.use_ability(0, None);
        assert_eq!(
            rejected,
            Err(ActionRejection::OnCooldown {
                ability: "Repair".into(),
                remaining,
            })
        );
        robot.tick_cooldowns();
    }

    robot.use_ability(0, None).unwrap();
    assert_eq!(robot.energy(), 180);
}

#[test]
fn test_unknown_ability_index_is_rejected() {
    let mut robot = Robot::player("Volt", Archetype::Attacker);

    let result = robot.use_ability(5, None);

    assert_eq!(
        result,
        Err(ActionRejection::UnknownAbility {
            robot: "Volt".into(),
            index: 5,
        })
    );
}

#[test]
fn test_boss_defeat_notice() {
    let mut boss = Robot::boss("Mega Boss");
    assert!(boss.check_defeated().is_none());

    boss.receive_damage(1000);

    assert!(boss.is_defeated());
    assert_eq!(
        boss.check_defeated(),
        Some(CombatEvent::BossDefeated {
            boss: "Mega Boss".into()
        })
    );
}
