//! Tests for dice types and outcome draws

use dndgamerolls_widget::dice3d::engine::roll_outcome;
use dndgamerolls_widget::dice3d::faces::FaceOrientationTable;
use dndgamerolls_widget::dice3d::types::{DiceType, RollPhase, SoundCue};
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_dice_type_max_values() {
    assert_eq!(DiceType::D6.max_value(), 6);
    assert_eq!(DiceType::D20.max_value(), 20);
}

#[test]
fn test_dice_type_names() {
    assert_eq!(DiceType::D6.name(), "D6");
    assert_eq!(DiceType::D20.name(), "D20");
    assert_eq!(DiceType::D20.to_string(), "D20");
}

#[test]
fn test_dice_type_parse_valid() {
    assert_eq!(DiceType::parse("d6"), Some(DiceType::D6));
    assert_eq!(DiceType::parse("D6"), Some(DiceType::D6));
    assert_eq!(DiceType::parse("d20"), Some(DiceType::D20));
    assert_eq!(DiceType::parse(" D20 "), Some(DiceType::D20));
}

#[test]
fn test_dice_type_parse_invalid() {
    assert_eq!(DiceType::parse("d4"), None);
    assert_eq!(DiceType::parse("d100"), None);
    assert_eq!(DiceType::parse("invalid"), None);
    assert_eq!(DiceType::parse(""), None);
}

#[test]
fn test_dice_type_equality() {
    assert_eq!(DiceType::D20, DiceType::D20);
    assert_ne!(DiceType::D20, DiceType::D6);
}

#[test]
fn test_only_d6_settles_and_plays_cues() {
    assert!(DiceType::D6.settles());
    assert!(!DiceType::D20.settles());
    assert_eq!(DiceType::D6.roll_cue(), Some(SoundCue::RollStart));
    assert_eq!(DiceType::D6.settle_cue(), Some(SoundCue::Settle));
    assert_eq!(DiceType::D20.roll_cue(), None);
    assert_eq!(DiceType::D20.settle_cue(), None);
}

#[test]
fn test_cue_names() {
    assert_eq!(SoundCue::RollStart.name(), "roll-start");
    assert_eq!(SoundCue::Settle.to_string(), "settle");
}

#[test]
fn test_in_flight_phases() {
    assert!(!RollPhase::Idle.is_in_flight());
    assert!(RollPhase::Rolling.is_in_flight());
    assert!(RollPhase::Settling.is_in_flight());
    assert!(!RollPhase::Resolved.is_in_flight());
}

#[test]
fn test_roll_outcome_bounds() {
    // u = 0 draws the lowest face, u just below 1 the highest.
    let mut low = StepRng::new(0, 0);
    let mut high = StepRng::new(u64::MAX, 0);
    for die_type in DiceType::ALL {
        assert_eq!(roll_outcome(&mut low, die_type.max_value()), 1);
        assert_eq!(
            roll_outcome(&mut high, die_type.max_value()),
            die_type.max_value()
        );
    }
}

#[test]
fn test_roll_outcome_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for die_type in DiceType::ALL {
        for _ in 0..1000 {
            let roll = roll_outcome(&mut rng, die_type.max_value());
            assert!(
                (1..=die_type.max_value()).contains(&roll),
                "Roll {} out of range for {}",
                roll,
                die_type
            );
        }
    }
}

#[test]
fn test_every_outcome_has_an_orientation() {
    for die_type in DiceType::ALL {
        let table = FaceOrientationTable::for_die(die_type);
        for outcome in 1..=die_type.max_value() {
            assert!(table.orientation_of(outcome).is_some());
        }
    }
}
