use super::*;
use crate::clock::ManualClock;
use std::cell::RefCell;
use std::rc::Rc;

fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let make = {
        let log = Rc::clone(&log);
        move |label: &'static str| {
            let log = Rc::clone(&log);
            Box::new(move || log.borrow_mut().push(label)) as Box<dyn FnOnce()>
        }
    };
    (log, make)
}

#[test]
fn timer_fires_only_after_deadline() {
    let clock = ManualClock::new();
    let runtime = TimerRuntime::new(clock.clone());
    let (log, make) = recorder();

    let registration = runtime.handle().schedule(1000, make("fired"));
    assert!(registration.is_active());
    assert_eq!(runtime.next_deadline(), Some(1000));

    clock.set(999);
    assert_eq!(runtime.pump(), 0);
    assert!(log.borrow().is_empty());

    clock.set(1000);
    assert_eq!(runtime.pump(), 1);
    assert_eq!(log.borrow().as_slice(), &["fired"]);
    assert!(!registration.is_active());
    assert!(!runtime.has_pending());
}

#[test]
fn dropping_registration_cancels_timer() {
    let clock = ManualClock::new();
    let runtime = TimerRuntime::new(clock.clone());
    let (log, make) = recorder();

    {
        let _registration = runtime.handle().schedule(10, make("dropped"));
        assert_eq!(runtime.pending_count(), 1);
    }

    clock.advance(50);
    assert_eq!(runtime.pump(), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn explicit_cancel_removes_timer() {
    let clock = ManualClock::new();
    let runtime = TimerRuntime::new(clock.clone());
    let (log, make) = recorder();

    let registration = runtime.handle().schedule(10, make("cancelled"));
    registration.cancel();
    assert_eq!(runtime.pending_count(), 0);

    clock.advance(10);
    runtime.pump();
    assert!(log.borrow().is_empty());
}

#[test]
fn due_timers_fire_in_deadline_then_schedule_order() {
    let clock = ManualClock::new();
    let runtime = TimerRuntime::new(clock.clone());
    let handle = runtime.handle();
    let (log, make) = recorder();

    let _late = handle.schedule(300, make("late"));
    let _first = handle.schedule(100, make("first"));
    let _second = handle.schedule(100, make("second"));

    clock.set(500);
    assert_eq!(runtime.pump(), 3);
    assert_eq!(log.borrow().as_slice(), &["first", "second", "late"]);
}

#[test]
fn callback_may_schedule_without_spinning_the_pump() {
    let clock = ManualClock::new();
    let runtime = TimerRuntime::new(clock.clone());
    let handle = runtime.handle();
    let count = Rc::new(RefCell::new(0));
    let follow_up: Rc<RefCell<Option<TimerRegistration>>> = Rc::new(RefCell::new(None));

    let _registration = {
        let inner_handle = handle.clone();
        let count = Rc::clone(&count);
        let follow_up = Rc::clone(&follow_up);
        handle.schedule(0, move || {
            let handle = inner_handle;
            *count.borrow_mut() += 1;
            let count = Rc::clone(&count);
            let registration = handle.schedule(0, move || *count.borrow_mut() += 1);
            follow_up.borrow_mut().replace(registration);
        })
    };

    assert_eq!(runtime.pump(), 1);
    assert_eq!(*count.borrow(), 1);
    assert_eq!(runtime.pending_count(), 1);

    assert_eq!(runtime.pump(), 1);
    assert_eq!(*count.borrow(), 2);
}

#[test]
fn scheduling_after_runtime_drop_is_inert() {
    let clock = ManualClock::new();
    let runtime = TimerRuntime::new(clock.clone());
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    let registration = handle.schedule(10, || panic!("must never run"));
    assert_eq!(registration.id(), None);
    assert!(!registration.is_active());
    assert_eq!(handle.now_millis(), 0);
}
