//! Roll engine
//!
//! Owns the lifecycle of a single mounted die: idle → rolling → (settling) →
//! resolved. The engine never touches time or randomness on its own; the
//! caller feeds it frame deltas, fires the deferred resolve with the ticket
//! handed out by `start_roll`, and drains the events it produced.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::dice3d::faces::{FaceOrientationTable, Orientation};
use crate::dice3d::types::{DiceType, DieInstanceId, RollPhase, SoundCue, WidgetConfig};

/// Time and easing constants for a roll
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RollTuning {
    /// Delay between `start_roll` and the outcome being drawn
    pub roll_duration: Duration,
    /// Radians per second added to each axis while tumbling
    pub tumble_rates: Vec3,
    /// Easing constant `k` in `lerp(current, target, k * dt)`
    pub settle_rate: f32,
    /// Per-axis distance below which settling snaps onto the target
    pub settle_tolerance: f32,
}

impl Default for RollTuning {
    fn default() -> Self {
        Self::from_config(&WidgetConfig::default())
    }
}

impl RollTuning {
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self {
            roll_duration: config.roll_duration(),
            tumble_rates: config.tumble_rates.as_vec3(),
            settle_rate: config.settle_rate,
            settle_tolerance: config.settle_tolerance,
        }
    }
}

/// Liveness token for one scheduled resolve.
///
/// Captured when a roll starts and checked before the deferred resolve is
/// allowed to touch any state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RollTicket {
    pub instance: DieInstanceId,
    pub roll: u64,
}

/// Something the engine wants the outside world to know about
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RollEvent {
    /// A roll began; its resolve must be scheduled with this ticket.
    Started { ticket: RollTicket, die_type: DiceType },
    /// The outcome was drawn. Fired exactly once per resolved roll.
    Completed {
        instance: DieInstanceId,
        die_type: DiceType,
        outcome: u32,
    },
    /// The die is at rest showing its outcome.
    Settled {
        instance: DieInstanceId,
        die_type: DiceType,
        outcome: u32,
    },
    /// Best-effort audio request.
    Cue(SoundCue),
}

/// Draw a uniformly distributed outcome in `1..=faces`.
///
/// Uses `floor(u * faces) + 1` with a 53-bit uniform `u` in `[0, 1)`.
pub fn roll_outcome<R: Rng + ?Sized>(rng: &mut R, faces: u32) -> u32 {
    let u: f64 = rng.gen();
    let outcome = (u * faces as f64).floor() as u32 + 1;
    outcome.min(faces)
}

/// State machine of one mounted die
#[derive(Clone, Debug)]
pub struct RollEngine {
    die_type: DiceType,
    instance: DieInstanceId,
    table: FaceOrientationTable,
    tuning: RollTuning,
    phase: RollPhase,
    outcome: Option<u32>,
    current: Orientation,
    target: Option<Orientation>,
    roll: u64,
    events: Vec<RollEvent>,
}

impl RollEngine {
    pub fn new(die_type: DiceType, instance: DieInstanceId, tuning: RollTuning) -> Self {
        Self {
            die_type,
            instance,
            table: FaceOrientationTable::for_die(die_type),
            tuning,
            phase: RollPhase::Idle,
            outcome: None,
            current: Vec3::ZERO,
            target: None,
            roll: 0,
            events: Vec::new(),
        }
    }

    pub fn die_type(&self) -> DiceType {
        self.die_type
    }

    pub fn instance(&self) -> DieInstanceId {
        self.instance
    }

    pub fn tuning(&self) -> &RollTuning {
        &self.tuning
    }

    pub fn phase(&self) -> RollPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<u32> {
        self.outcome
    }

    pub fn current_orientation(&self) -> Orientation {
        self.current
    }

    /// Orientation for the drawn outcome; `None` until the outcome exists.
    pub fn target_orientation(&self) -> Option<Orientation> {
        self.target
    }

    /// The ticket a resolve must carry to be accepted right now.
    pub fn current_ticket(&self) -> RollTicket {
        RollTicket {
            instance: self.instance,
            roll: self.roll,
        }
    }

    /// Whether the renderer should show the result caption.
    pub fn shows_result(&self) -> bool {
        self.phase == RollPhase::Resolved
    }

    /// Begin a roll. Returns `None` (and changes nothing) while a roll is
    /// already in flight.
    pub fn start_roll(&mut self) -> Option<RollTicket> {
        if self.phase.is_in_flight() {
            return None;
        }

        self.phase = RollPhase::Rolling;
        self.outcome = None;
        self.target = None;
        self.roll += 1;

        let ticket = self.current_ticket();
        if let Some(cue) = self.die_type.roll_cue() {
            self.events.push(RollEvent::Cue(cue));
        }
        self.events.push(RollEvent::Started {
            ticket,
            die_type: self.die_type,
        });
        Some(ticket)
    }

    /// Draw the outcome for the roll identified by `ticket`.
    ///
    /// Tickets from another instance, an older roll, or a roll that is no
    /// longer tumbling are ignored and `None` is returned.
    pub fn resolve_roll<R: Rng + ?Sized>(&mut self, ticket: RollTicket, rng: &mut R) -> Option<u32> {
        if ticket != self.current_ticket() || self.phase != RollPhase::Rolling {
            return None;
        }

        let outcome = roll_outcome(rng, self.table.faces());
        let target = self.table.orientation_of(outcome)?;
        self.outcome = Some(outcome);
        self.target = Some(target);

        if self.die_type.settles() {
            self.phase = RollPhase::Settling;
        } else {
            self.current = target;
            self.phase = RollPhase::Resolved;
        }

        self.events.push(RollEvent::Completed {
            instance: self.instance,
            die_type: self.die_type,
            outcome,
        });
        if self.phase == RollPhase::Resolved {
            self.events.push(RollEvent::Settled {
                instance: self.instance,
                die_type: self.die_type,
                outcome,
            });
        }
        Some(outcome)
    }

    /// Per-frame animation step. `dt` is seconds since the previous frame.
    pub fn tick(&mut self, dt: f32) {
        match self.phase {
            RollPhase::Rolling => {
                self.current += self.tuning.tumble_rates * dt;
            }
            RollPhase::Settling => self.ease_toward_target(dt),
            RollPhase::Idle | RollPhase::Resolved => {}
        }
    }

    fn ease_toward_target(&mut self, dt: f32) {
        let (Some(target), Some(outcome)) = (self.target, self.outcome) else {
            return;
        };

        let t = (self.tuning.settle_rate * dt).clamp(0.0, 1.0);
        let before = (target - self.current).abs().max_element();
        self.current = self.current.lerp(target, t);

        // f32 lerp stops making progress a few ULPs short of the target.
        let remaining = (target - self.current).abs().max_element();
        let stalled = t > 0.0 && remaining >= before;
        if stalled || remaining < self.tuning.settle_tolerance {
            // Snap exactly to remove the leftover drift.
            self.current = target;
            self.phase = RollPhase::Resolved;
            if let Some(cue) = self.die_type.settle_cue() {
                self.events.push(RollEvent::Cue(cue));
            }
            self.events.push(RollEvent::Settled {
                instance: self.instance,
                die_type: self.die_type,
                outcome,
            });
        }
    }

    /// Take every event produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<RollEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine(die_type: DiceType) -> RollEngine {
        RollEngine::new(die_type, DieInstanceId(1), RollTuning::default())
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = engine(DiceType::D6);
        assert_eq!(engine.phase(), RollPhase::Idle);
        assert_eq!(engine.outcome(), None);
        assert_eq!(engine.target_orientation(), None);
        assert_eq!(engine.current_orientation(), Vec3::ZERO);
        assert!(!engine.shows_result());
    }

    #[test]
    fn test_roll_outcome_bounds() {
        // StepRng yielding 0 maps to the lowest face, u64::MAX to the highest.
        let mut low = StepRng::new(0, 0);
        assert_eq!(roll_outcome(&mut low, 20), 1);
        let mut high = StepRng::new(u64::MAX, 0);
        assert_eq!(roll_outcome(&mut high, 20), 20);
        assert_eq!(roll_outcome(&mut high, 6), 6);
    }

    #[test]
    fn test_roll_outcome_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = roll_outcome(&mut rng, 6);
            assert!((1..=6).contains(&v));
        }
    }

    #[test]
    fn test_start_roll_enters_rolling() {
        let mut engine = engine(DiceType::D20);
        let ticket = engine.start_roll().unwrap();
        assert_eq!(engine.phase(), RollPhase::Rolling);
        assert_eq!(ticket, engine.current_ticket());
        assert_eq!(
            engine.drain_events(),
            vec![RollEvent::Started {
                ticket,
                die_type: DiceType::D20
            }]
        );
    }

    #[test]
    fn test_d6_start_requests_roll_cue() {
        let mut engine = engine(DiceType::D6);
        engine.start_roll().unwrap();
        let events = engine.drain_events();
        assert_eq!(events[0], RollEvent::Cue(SoundCue::RollStart));
    }

    #[test]
    fn test_start_while_in_flight_is_noop() {
        let mut engine = engine(DiceType::D6);
        let ticket = engine.start_roll().unwrap();
        engine.tick(0.1);
        let before = engine.current_orientation();
        engine.drain_events();

        assert!(engine.start_roll().is_none());
        assert_eq!(engine.phase(), RollPhase::Rolling);
        assert_eq!(engine.current_ticket(), ticket);
        assert_eq!(engine.current_orientation(), before);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_rolling_tumbles_at_fixed_rates() {
        let mut engine = engine(DiceType::D20);
        engine.start_roll();
        engine.tick(0.5);
        let o = engine.current_orientation();
        assert!((o - Vec3::new(2.5, 3.5, 1.5)).abs().max_element() < 1e-5);
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut engine = engine(DiceType::D20);
        engine.tick(1.0);
        assert_eq!(engine.current_orientation(), Vec3::ZERO);
    }

    #[test]
    fn test_d20_resolve_snaps_to_target() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut engine = engine(DiceType::D20);
        let ticket = engine.start_roll().unwrap();
        engine.tick(0.3);
        engine.drain_events();

        let outcome = engine.resolve_roll(ticket, &mut rng).unwrap();
        assert!((1..=20).contains(&outcome));
        assert_eq!(engine.phase(), RollPhase::Resolved);
        assert_eq!(engine.outcome(), Some(outcome));
        let target = FaceOrientationTable::for_die(DiceType::D20)
            .orientation_of(outcome)
            .unwrap();
        assert_eq!(engine.target_orientation(), Some(target));
        assert_eq!(engine.current_orientation(), target);
        assert!(engine.shows_result());

        let events = engine.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], RollEvent::Completed { outcome: o, .. } if o == outcome));
        assert!(matches!(events[1], RollEvent::Settled { .. }));
    }

    #[test]
    fn test_d6_settles_then_resolves() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut engine = engine(DiceType::D6);
        let ticket = engine.start_roll().unwrap();
        engine.tick(1.5);
        engine.drain_events();

        let outcome = engine.resolve_roll(ticket, &mut rng).unwrap();
        assert_eq!(engine.phase(), RollPhase::Settling);
        assert!(!engine.shows_result());
        let events = engine.drain_events();
        assert_eq!(
            events,
            vec![RollEvent::Completed {
                instance: DieInstanceId(1),
                die_type: DiceType::D6,
                outcome
            }]
        );

        let mut frames = 0;
        while engine.phase() == RollPhase::Settling {
            engine.tick(1.0 / 60.0);
            frames += 1;
            assert!(frames < 600, "settling never converged");
        }

        assert_eq!(engine.phase(), RollPhase::Resolved);
        assert_eq!(Some(engine.current_orientation()), engine.target_orientation());
        let events = engine.drain_events();
        assert_eq!(events[0], RollEvent::Cue(SoundCue::Settle));
        assert!(matches!(events[1], RollEvent::Settled { outcome: o, .. } if o == outcome));
    }

    #[test]
    fn test_click_while_settling_is_noop() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut engine = engine(DiceType::D6);
        let ticket = engine.start_roll().unwrap();
        engine.tick(1.5);
        let outcome = engine.resolve_roll(ticket, &mut rng).unwrap();
        engine.tick(0.016);
        assert_eq!(engine.phase(), RollPhase::Settling);
        engine.drain_events();
        let orientation = engine.current_orientation();

        assert!(engine.start_roll().is_none());
        assert_eq!(engine.phase(), RollPhase::Settling);
        assert_eq!(engine.outcome(), Some(outcome));
        assert_eq!(engine.current_ticket(), ticket);
        assert_eq!(engine.current_orientation(), orientation);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_settling_terminates_below_float_precision() {
        let tuning = RollTuning {
            settle_tolerance: 1e-9,
            ..RollTuning::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut engine = RollEngine::new(DiceType::D6, DieInstanceId(1), tuning);
        let ticket = engine.start_roll().unwrap();
        engine.tick(1.37);
        engine.resolve_roll(ticket, &mut rng).unwrap();

        let mut frames = 0;
        while engine.phase() == RollPhase::Settling {
            engine.tick(1.0 / 60.0);
            frames += 1;
            assert!(frames < 10_000, "settling never converged");
        }
        assert_eq!(Some(engine.current_orientation()), engine.target_orientation());
        assert!(engine.start_roll().is_some());
    }

    #[test]
    fn test_large_frame_gap_does_not_overshoot() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut engine = engine(DiceType::D6);
        let ticket = engine.start_roll().unwrap();
        engine.tick(1.5);
        engine.resolve_roll(ticket, &mut rng).unwrap();

        engine.tick(2.0);
        assert_eq!(engine.phase(), RollPhase::Resolved);
        assert_eq!(Some(engine.current_orientation()), engine.target_orientation());
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = engine(DiceType::D20);
        let first = engine.start_roll().unwrap();
        engine.resolve_roll(first, &mut rng).unwrap();

        let second = engine.start_roll().unwrap();
        assert_ne!(first, second);
        assert_eq!(engine.resolve_roll(first, &mut rng), None);
        assert_eq!(engine.phase(), RollPhase::Rolling);
        assert_eq!(engine.outcome(), None);

        let foreign = RollTicket {
            instance: DieInstanceId(99),
            roll: second.roll,
        };
        assert_eq!(engine.resolve_roll(foreign, &mut rng), None);
        assert_eq!(engine.phase(), RollPhase::Rolling);
    }

    #[test]
    fn test_ticket_cannot_resolve_twice() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut engine = engine(DiceType::D20);
        let ticket = engine.start_roll().unwrap();
        let outcome = engine.resolve_roll(ticket, &mut rng);
        assert!(outcome.is_some());
        assert_eq!(engine.resolve_roll(ticket, &mut rng), None);
        assert_eq!(engine.outcome(), outcome);
    }

    #[test]
    fn test_new_roll_clears_outcome() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut engine = engine(DiceType::D20);
        let ticket = engine.start_roll().unwrap();
        engine.resolve_roll(ticket, &mut rng).unwrap();

        engine.start_roll().unwrap();
        assert_eq!(engine.outcome(), None);
        assert_eq!(engine.target_orientation(), None);
        assert_eq!(engine.phase(), RollPhase::Rolling);
    }
}
