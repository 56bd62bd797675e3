use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use approx::assert_abs_diff_eq;
use tether_animator::{Event, FrameTicker, RunState, Spring, StepPolicy, TickCallback, Ticker};
use tether_core::TimeStep;
use tether_solvers::{Scheme, Simulation, SpringParams};
use uom::si::{
    f64::{Frequency, Time},
    frequency::hertz,
    time::{millisecond, second},
};

/// A minimal ticker that hands out indices as subscription handles.
#[derive(Clone, Default)]
struct ManualTicker {
    slots: Rc<RefCell<Vec<Option<Rc<RefCell<TickCallback>>>>>>,
}

impl ManualTicker {
    fn tick(&self, dt: Time) {
        let live: Vec<_> = self.slots.borrow().iter().flatten().cloned().collect();
        for callback in live {
            let mut callback = callback.borrow_mut();
            (*callback)(dt);
        }
    }

    fn live(&self) -> usize {
        self.slots.borrow().iter().flatten().count()
    }
}

impl Ticker for ManualTicker {
    type Handle = usize;

    fn subscribe(&self, _interval: Option<Time>, callback: TickCallback) -> usize {
        let mut slots = self.slots.borrow_mut();
        slots.push(Some(Rc::new(RefCell::new(callback))));
        slots.len() - 1
    }

    fn unsubscribe(&self, handle: usize) {
        if let Some(slot) = self.slots.borrow_mut().get_mut(handle) {
            *slot = None;
        }
    }
}

fn seconds(value: f64) -> Time {
    Time::new::<second>(value)
}

#[test]
fn scalar_spring_at_120_hz() {
    let ticker = FrameTicker::new();
    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&values);
    let completed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&completed);

    let spring = Spring::builder(0.0_f64)
        .target(10.0)
        .scheme(Scheme::SemiImplicitEuler)
        .on_complete(move || flag.set(true))
        .build(ticker.clone(), move |event: &Event<f64>| {
            sink.borrow_mut().push(*event.value());
            None
        })
        .unwrap();
    spring.start();

    for _ in 0..120 {
        ticker.tick(seconds(1.0 / 120.0));
    }
    assert_abs_diff_eq!(*values.borrow().last().unwrap(), 10.0, epsilon = 0.01);

    while spring.run_state() == RunState::Running {
        ticker.tick(seconds(1.0 / 120.0));
    }

    assert!(completed.get());
    assert_eq!(values.borrow().last(), Some(&10.0));
    assert_eq!(ticker.subscriber_count(), 0);
}

#[test]
fn point_spring_moves_both_components() {
    let ticker = FrameTicker::new();
    let first = Rc::new(Cell::new(None));
    let sink = Rc::clone(&first);

    let observer = move |event: &Event<(f64, f64)>| {
        if sink.get().is_none() {
            sink.set(Some(*event.value()));
        }
        None
    };
    let spring = Spring::basic(ticker.clone(), (0.0_f64, 0.0_f64), observer);

    assert!(spring.update_target_value(&(3.0, 4.0), true).is_ok());
    ticker.tick(seconds(1.0 / 60.0));

    let (x, y) = first.get().unwrap();
    assert!(x > 0.0 && y > 0.0);
    assert_abs_diff_eq!(y / x, 4.0 / 3.0, epsilon = 1e-12);

    while spring.run_state() == RunState::Running {
        ticker.tick(seconds(1.0 / 60.0));
    }
    assert_eq!(spring.value().unwrap(), (3.0, 4.0));
}

#[test]
fn three_component_target_is_rejected_for_a_point() {
    let ticker = FrameTicker::new();
    let spring = Spring::basic(ticker.clone(), vec![0.0_f64, 0.0], ());

    assert!(spring.update_target_value(&vec![3.0, 4.0, 5.0], true).is_err());
    assert_eq!(spring.run_state(), RunState::Idle);
    assert_eq!(ticker.subscriber_count(), 0);

    spring.update_target_value(&vec![3.0, 4.0], true).unwrap();
    assert_eq!(spring.target().unwrap(), vec![3.0, 4.0]);
}

#[test]
fn fixed_step_policy_ignores_ticker_time() {
    let step = TimeStep::from_seconds(1.0 / 120.0).unwrap();
    let ticker = FrameTicker::new();
    let spring = Spring::builder(0.0_f64)
        .target(1.0)
        .step_policy(StepPolicy::Fixed(step))
        .build(ticker.clone(), ())
        .unwrap();
    spring.start();

    let mut reference = Simulation::new(&0.0_f64, SpringParams::basic(), Scheme::default())
        .with_target(&1.0)
        .unwrap();

    // Wildly irregular frame times, including invalid ones.
    for dt in [0.5, 0.0, 0.001, -1.0, 0.25] {
        ticker.tick(seconds(dt));
        reference.advance(step);
    }

    assert_eq!(spring.value().unwrap(), reference.value().unwrap());
}

#[test]
fn implicit_scheme_survives_irregular_frames() {
    let ticker = ManualTicker::default();
    let spring = Spring::builder([0.0_f64, 100.0])
        .target([50.0, -50.0])
        .tuning(Frequency::new::<hertz>(6.0), Time::new::<millisecond>(80.0))
        .scheme(Scheme::ImplicitEuler)
        .build(ticker.clone(), ())
        .unwrap();
    spring.start();
    assert_eq!(ticker.live(), 1);

    let frames = [16.0, 33.0, 250.0, 8.0, 500.0, 16.0];
    for frame in frames.iter().cycle().take(2_000) {
        if spring.run_state() != RunState::Running {
            break;
        }
        ticker.tick(Time::new::<millisecond>(*frame));
        let [a, b] = spring.value().unwrap();
        assert!(a.is_finite() && b.is_finite());
    }

    assert_eq!(spring.run_state(), RunState::Idle);
    assert_eq!(spring.value().unwrap(), [50.0, -50.0]);
    assert_eq!(ticker.live(), 0);
}

#[test]
fn interval_subscription_steps_by_accumulated_time() {
    let ticker = FrameTicker::new();
    let spring = Spring::builder(0.0_f64)
        .target(1.0)
        .interval(Time::new::<millisecond>(30.0))
        .build(ticker.clone(), ())
        .unwrap();
    spring.start();

    let mut reference = Simulation::new(&0.0_f64, SpringParams::basic(), Scheme::default())
        .with_target(&1.0)
        .unwrap();

    // Three 11 ms frames make one 33 ms step.
    for _ in 0..3 {
        ticker.tick(Time::new::<millisecond>(11.0));
    }
    reference.advance(TimeStep::new::<millisecond>(33.0).unwrap());

    assert_abs_diff_eq!(
        spring.value().unwrap(),
        reference.value().unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn interval_spring_settles_after_invalid_frames() {
    let ticker = FrameTicker::new();
    let spring = Spring::builder(0.0_f64)
        .target(1.0)
        .interval(Time::new::<millisecond>(30.0))
        .build(ticker.clone(), ())
        .unwrap();
    spring.start();

    ticker.tick(seconds(f64::NAN));
    ticker.tick(seconds(-1.0));

    for _ in 0..10_000 {
        if spring.run_state() != RunState::Running {
            break;
        }
        ticker.tick(Time::new::<millisecond>(16.0));
    }

    assert_eq!(spring.run_state(), RunState::Idle);
    assert_eq!(spring.value().unwrap(), 1.0);
    assert_eq!(ticker.subscriber_count(), 0);
}

#[test]
fn custom_ticker_is_released_on_drop() {
    let ticker = ManualTicker::default();
    let spring = Spring::basic(ticker.clone(), 0.0_f64, ());
    spring.update_target_value(&1.0, true).unwrap();
    assert_eq!(ticker.live(), 1);

    drop(spring);

    assert_eq!(ticker.live(), 0);
}
