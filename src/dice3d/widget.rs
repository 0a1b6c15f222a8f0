//! Dice widget
//!
//! Ties the selector, the mounted engine and the deferred resolve timers
//! together and advances them one frame at a time. Bevy systems hold it as a
//! resource; the CLI drives it directly.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::dice3d::engine::{RollEngine, RollEvent, RollTuning};
use crate::dice3d::scheduler::RollScheduler;
use crate::dice3d::selector::DieSelector;
use crate::dice3d::types::{DiceType, WidgetConfig};

#[derive(Resource, Clone, Debug)]
pub struct DiceWidget {
    selector: DieSelector,
    scheduler: RollScheduler,
}

impl DiceWidget {
    pub fn new(die_type: DiceType, tuning: RollTuning) -> Self {
        Self {
            selector: DieSelector::new(die_type, tuning),
            scheduler: RollScheduler::new(),
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.default_die, RollTuning::from_config(config))
    }

    pub fn active_die(&self) -> DiceType {
        self.selector.active()
    }

    pub fn engine(&self) -> &RollEngine {
        self.selector.engine()
    }

    /// Resolve timers that have not fired yet, including ones for dice that
    /// are no longer mounted.
    pub fn pending_resolves(&self) -> usize {
        self.scheduler.len()
    }

    /// Click on the die. Starts a roll unless one is already in flight.
    pub fn click(&mut self) -> bool {
        let engine = self.selector.engine_mut();
        match engine.start_roll() {
            Some(ticket) => {
                let delay = engine.tuning().roll_duration;
                self.scheduler.schedule(ticket, delay);
                true
            }
            None => {
                debug!("Ignoring click: {} roll already in flight", engine.die_type());
                false
            }
        }
    }

    /// Switch the active die type, discarding the mounted die.
    pub fn select(&mut self, die_type: DiceType) -> bool {
        self.selector.select(die_type)
    }

    /// One frame: fire due resolve timers, animate, and hand back whatever the
    /// engine reported.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: Duration, rng: &mut R) -> Vec<RollEvent> {
        let engine = self.selector.engine_mut();

        for ticket in self.scheduler.advance(dt) {
            if ticket.instance != engine.instance() {
                debug!(
                    "Discarding resolve for unmounted die instance {}",
                    ticket.instance.0
                );
                continue;
            }
            match engine.resolve_roll(ticket, rng) {
                Some(outcome) => info!("{} rolled {}", engine.die_type(), outcome),
                None => debug!("Discarding stale resolve for roll {}", ticket.roll),
            }
        }

        engine.tick(dt.as_secs_f32());
        engine.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice3d::types::{RollPhase, SoundCue};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FRAME: Duration = Duration::from_millis(16);

    fn run_frames(widget: &mut DiceWidget, rng: &mut StdRng, frames: usize) -> Vec<RollEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            events.extend(widget.advance(FRAME, rng));
        }
        events
    }

    #[test]
    fn test_click_schedules_one_resolve() {
        let mut widget = DiceWidget::new(DiceType::D20, RollTuning::default());
        assert!(widget.click());
        assert_eq!(widget.pending_resolves(), 1);
        assert!(!widget.click());
        assert_eq!(widget.pending_resolves(), 1);
    }

    #[test]
    fn test_d20_resolves_after_roll_duration() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut widget = DiceWidget::new(DiceType::D20, RollTuning::default());
        widget.click();

        // 93 frames = 1488ms: still tumbling
        run_frames(&mut widget, &mut rng, 93);
        assert_eq!(widget.engine().phase(), RollPhase::Rolling);

        let events = run_frames(&mut widget, &mut rng, 1);
        assert_eq!(widget.engine().phase(), RollPhase::Resolved);
        let completed = events
            .iter()
            .filter(|e| matches!(e, RollEvent::Completed { .. }))
            .count();
        assert_eq!(completed, 1);
    }

    #[test]
    fn test_d6_emits_both_cues() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut widget = DiceWidget::new(DiceType::D6, RollTuning::default());
        widget.click();
        let events = run_frames(&mut widget, &mut rng, 200);
        let cues: Vec<SoundCue> = events
            .iter()
            .filter_map(|e| match e {
                RollEvent::Cue(cue) => Some(*cue),
                _ => None,
            })
            .collect();
        assert_eq!(cues, vec![SoundCue::RollStart, SoundCue::Settle]);
        assert_eq!(widget.engine().phase(), RollPhase::Resolved);
    }

    #[test]
    fn test_switch_mid_roll_discards_result() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut widget = DiceWidget::new(DiceType::D6, RollTuning::default());
        widget.click();
        run_frames(&mut widget, &mut rng, 10);

        assert!(widget.select(DiceType::D20));
        let events = run_frames(&mut widget, &mut rng, 200);

        assert!(events.is_empty());
        assert_eq!(widget.pending_resolves(), 0);
        assert_eq!(widget.engine().phase(), RollPhase::Idle);
        assert_eq!(widget.engine().outcome(), None);
    }

    #[test]
    fn test_old_timer_does_not_resolve_new_roll_early() {
        let mut rng = StdRng::seed_from_u64(29);
        let mut widget = DiceWidget::new(DiceType::D20, RollTuning::default());
        widget.click();
        run_frames(&mut widget, &mut rng, 50);

        // Remount and roll again; the old timer fires ~700ms before the new one.
        widget.select(DiceType::D6);
        widget.select(DiceType::D20);
        widget.click();
        run_frames(&mut widget, &mut rng, 50);
        assert_eq!(widget.engine().phase(), RollPhase::Rolling);
        assert_eq!(widget.pending_resolves(), 1);

        run_frames(&mut widget, &mut rng, 44);
        assert_eq!(widget.engine().phase(), RollPhase::Resolved);
    }
}
