use super::*;
use cboard_core::{ManualClock, TimerRuntime};
use std::cell::Cell;

struct Fixture {
    clock: ManualClock,
    runtime: TimerRuntime,
    activations: Rc<Cell<u32>>,
    activator: DwellActivator,
}

impl Fixture {
    fn new() -> Self {
        Self::with_config(DwellConfig::default())
    }

    fn with_config(config: DwellConfig) -> Self {
        let clock = ManualClock::new();
        let runtime = TimerRuntime::new(clock.clone());
        let activations = Rc::new(Cell::new(0));
        let activator = {
            let activations = Rc::clone(&activations);
            DwellActivator::with_callback(runtime.handle(), config, move || {
                activations.set(activations.get() + 1)
            })
        };
        Self {
            clock,
            runtime,
            activations,
            activator,
        }
    }

    /// Moves the clock to `at`, firing due timers at their own deadlines.
    fn run_until(&self, at: Millis) {
        while let Some(deadline) = self.runtime.next_deadline() {
            if deadline > at {
                break;
            }
            self.clock.set(deadline);
            self.runtime.pump();
        }
        self.clock.set(at);
        self.runtime.pump();
    }

    fn enter_at(&self, at: Millis) {
        self.run_until(at);
        self.activator.on_pointer_enter();
    }

    fn leave_at(&self, at: Millis) {
        self.run_until(at);
        self.activator.on_pointer_leave();
    }
}

#[test]
fn default_config_matches_board_constants() {
    let config = DwellConfig::default();
    assert_eq!(config.threshold_ms(), 1000);
    assert_eq!(config.clear_window_ms(), 300);
}

#[test]
fn zero_threshold_is_rejected() {
    assert_eq!(DwellConfig::new(0, 300), Err(DwellConfigError::ZeroThreshold));
    assert_eq!(
        DwellConfig::default().with_threshold_ms(0),
        Err(DwellConfigError::ZeroThreshold)
    );
    let config = DwellConfig::default()
        .with_threshold_ms(1500)
        .expect("non-zero threshold")
        .with_clear_window_ms(0);
    assert_eq!(config.threshold_ms(), 1500);
    assert_eq!(config.clear_window_ms(), 0);
}

#[test]
fn starts_idle_with_full_remaining_fraction() {
    let fixture = Fixture::new();
    assert_eq!(fixture.activator.phase(), DwellPhase::Idle);
    assert_eq!(fixture.activator.remaining_fraction(), 1.0);
    assert_eq!(fixture.activator.state(), DwellState::default());
}

#[test]
fn continuous_hover_fires_exactly_once_at_threshold() {
    let fixture = Fixture::new();
    fixture.enter_at(0);
    assert_eq!(fixture.activator.phase(), DwellPhase::Dwelling);
    assert_eq!(fixture.runtime.next_deadline(), Some(1000));

    fixture.run_until(999);
    assert_eq!(fixture.activations.get(), 0);

    fixture.run_until(1000);
    assert_eq!(fixture.activations.get(), 1);
    assert_eq!(fixture.activator.phase(), DwellPhase::Activated);
    assert!(!fixture.activator.has_pending_activation());
    assert_eq!(fixture.activator.accumulated_millis(), 0);

    fixture.run_until(5000);
    assert_eq!(fixture.activations.get(), 1);

    fixture.leave_at(5200);
    assert_eq!(fixture.activator.phase(), DwellPhase::Idle);
    assert_eq!(fixture.activator.accumulated_millis(), 0);
}

#[test]
fn quick_return_resumes_progress_and_late_leave_cancels() {
    let fixture = Fixture::new();
    fixture.enter_at(0);
    fixture.leave_at(400);
    assert_eq!(fixture.activator.accumulated_millis(), 400);
    assert_eq!(fixture.runtime.pending_count(), 0);

    fixture.enter_at(500);
    assert_eq!(fixture.runtime.next_deadline(), Some(1100));

    fixture.leave_at(700);
    assert_eq!(fixture.activator.accumulated_millis(), 600);
    assert_eq!(fixture.runtime.pending_count(), 0);

    fixture.run_until(2000);
    assert_eq!(fixture.activations.get(), 0);
}

#[test]
fn long_absence_restarts_countdown() {
    let fixture = Fixture::new();
    fixture.enter_at(0);
    fixture.leave_at(400);

    fixture.enter_at(900);
    assert_eq!(fixture.activator.accumulated_millis(), 0);
    assert_eq!(fixture.runtime.next_deadline(), Some(1900));

    fixture.run_until(1900);
    assert_eq!(fixture.activations.get(), 1);
}

#[test]
fn absence_equal_to_clear_window_restarts_countdown() {
    let fixture = Fixture::new();
    fixture.enter_at(0);
    fixture.leave_at(400);
    fixture.enter_at(700);
    assert_eq!(fixture.runtime.next_deadline(), Some(1700));
}

#[test]
fn resumed_progress_fires_at_carried_deadline() {
    let fixture = Fixture::new();
    fixture.enter_at(0);
    fixture.leave_at(400);
    fixture.enter_at(500);
    fixture.run_until(1099);
    assert_eq!(fixture.activations.get(), 0);
    fixture.run_until(1100);
    assert_eq!(fixture.activations.get(), 1);
}

#[test]
fn flickering_hover_never_fires() {
    let fixture = Fixture::new();
    let mut now = 0;
    for _ in 0..20 {
        fixture.enter_at(now);
        now += 40;
        fixture.leave_at(now);
        // Absent long enough for progress to reset.
        now += 400;
    }
    fixture.run_until(now + 5000);
    assert_eq!(fixture.activations.get(), 0);
}

#[test]
fn leaving_exactly_at_threshold_resets_progress() {
    let fixture = Fixture::new();
    fixture.enter_at(0);
    fixture.clock.set(1000);
    fixture.activator.on_pointer_leave();
    assert_eq!(fixture.activator.accumulated_millis(), 0);
    assert_eq!(fixture.runtime.pump(), 0);
    assert_eq!(fixture.activations.get(), 0);
}

#[test]
fn return_after_activation_starts_a_fresh_cycle() {
    let fixture = Fixture::new();
    fixture.enter_at(0);
    fixture.run_until(1000);
    fixture.leave_at(1100);
    fixture.enter_at(1200);
    assert_eq!(fixture.runtime.next_deadline(), Some(2200));
    fixture.run_until(2200);
    assert_eq!(fixture.activations.get(), 2);
}

#[test]
fn duplicate_enter_keeps_single_timer_and_first_start() {
    let fixture = Fixture::new();
    fixture.enter_at(0);
    fixture.enter_at(300);
    assert_eq!(fixture.runtime.pending_count(), 1);
    assert_eq!(fixture.activator.state().dwell_start, Some(0));
    fixture.run_until(1000);
    assert_eq!(fixture.activations.get(), 1);
}

#[test]
fn leave_without_enter_is_ignored() {
    let fixture = Fixture::new();
    fixture.leave_at(100);
    assert_eq!(fixture.activator.state(), DwellState::default());
}

#[test]
fn dispose_cancels_pending_activation() {
    let fixture = Fixture::new();
    fixture.enter_at(0);
    fixture.run_until(500);
    fixture.activator.dispose();
    assert!(fixture.activator.is_disposed());
    assert_eq!(fixture.runtime.pending_count(), 0);

    fixture.run_until(3000);
    fixture.activator.on_pointer_enter();
    fixture.run_until(6000);
    assert_eq!(fixture.activations.get(), 0);
}

#[test]
fn dropping_activator_cancels_pending_activation() {
    let Fixture {
        clock,
        runtime,
        activations,
        activator,
    } = Fixture::new();
    activator.on_pointer_enter();
    assert_eq!(runtime.pending_count(), 1);
    drop(activator);
    assert_eq!(runtime.pending_count(), 0);
    clock.set(2000);
    runtime.pump();
    assert_eq!(activations.get(), 0);
}

#[test]
fn hover_is_tracked_without_callback() {
    let clock = ManualClock::new();
    let runtime = TimerRuntime::new(clock.clone());
    let activator = DwellActivator::new(runtime.handle(), DwellConfig::default());

    activator.on_pointer_enter();
    assert!(activator.is_dwelling());
    assert_eq!(activator.phase(), DwellPhase::Dwelling);
    assert_eq!(runtime.pending_count(), 0);

    clock.set(250);
    activator.on_pointer_leave();
    assert_eq!(activator.accumulated_millis(), 250);
    assert_eq!(activator.remaining_fraction(), 0.75);
}

#[test]
fn removing_callback_cancels_running_countdown() {
    let fixture = Fixture::new();
    fixture.enter_at(0);
    fixture.activator.set_callback(None);
    assert!(!fixture.activator.has_callback());
    assert_eq!(fixture.runtime.pending_count(), 0);
    fixture.run_until(2000);
    assert_eq!(fixture.activations.get(), 0);
}

#[test]
fn remaining_fraction_tracks_stored_progress() {
    let fixture = Fixture::new();
    fixture.enter_at(0);
    fixture.leave_at(400);
    assert_eq!(fixture.activator.remaining_millis(), 600);
    assert!((fixture.activator.remaining_fraction() - 0.6).abs() < f32::EPSILON);
}

#[test]
fn remaining_fraction_now_includes_current_span() {
    let fixture = Fixture::new();
    fixture.enter_at(0);
    fixture.leave_at(200);
    fixture.enter_at(300);
    fixture.run_until(600);
    assert!((fixture.activator.remaining_fraction_now() - 0.5).abs() < f32::EPSILON);
    assert!((fixture.activator.remaining_fraction() - 0.8).abs() < f32::EPSILON);
}

#[test]
fn callback_may_dispose_its_own_activator() {
    let clock = ManualClock::new();
    let runtime = TimerRuntime::new(clock.clone());
    let slot: Rc<RefCell<Option<Rc<DwellActivator>>>> = Rc::new(RefCell::new(None));
    let activator = {
        let slot = Rc::clone(&slot);
        Rc::new(DwellActivator::with_callback(
            runtime.handle(),
            DwellConfig::default(),
            move || {
                if let Some(activator) = slot.borrow_mut().take() {
                    activator.dispose();
                }
            },
        ))
    };
    slot.borrow_mut().replace(Rc::clone(&activator));

    activator.on_pointer_enter();
    clock.set(1000);
    assert_eq!(runtime.pump(), 1);
    assert!(activator.is_disposed());
    assert!(slot.borrow().is_none());
}

#[test]
fn accumulated_progress_stays_within_threshold() {
    let fixture = Fixture::new();
    let threshold = fixture.activator.config().threshold_ms();
    // Deterministic LCG so the sequence is reproducible.
    let mut seed: u64 = 0x5eed;
    let mut next = move |bound: u64| {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (seed >> 33) % bound
    };

    let mut now = 0;
    for _ in 0..500 {
        now += next(700);
        fixture.enter_at(now);
        now += next(1400);
        fixture.leave_at(now);
        let accumulated = fixture.activator.accumulated_millis();
        assert!(
            accumulated < threshold,
            "accumulated {accumulated} escaped [0, {threshold})"
        );
        assert!((0.0..=1.0).contains(&fixture.activator.remaining_fraction()));
        assert_eq!(fixture.runtime.pending_count(), 0);
    }
}
