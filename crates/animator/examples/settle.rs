//! Animates a 2-D point at a simulated 60 Hz and prints each frame.
//!
//! Run with `RUST_LOG=tether_animator=debug` to see lifecycle logging, or
//! `trace` for per-tick detail.

use std::{cell::Cell, env, io, rc::Rc};

use tether_animator::{Event, FrameTicker, RunState, Spring};
use tether_solvers::Scheme;
use tracing_subscriber::EnvFilter;
use uom::si::{
    f64::{Frequency, Time},
    frequency::hertz,
    time::second,
};

const DEFAULT_LOG_FILTER: &str = "tether_animator=debug";

fn main() -> Result<(), tether_animator::Error> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::builder().parse_lossy(directives))
        .init();

    let ticker = FrameTicker::new();
    let done = Rc::new(Cell::new(false));
    let flag = Rc::clone(&done);

    let spring = Spring::builder((0.0_f64, 0.0_f64))
        .target((3.0, 4.0))
        .tuning(Frequency::new::<hertz>(2.0), Time::new::<second>(0.15))
        .scheme(Scheme::ImplicitEuler)
        .on_complete(move || flag.set(true))
        .build(ticker.clone(), |event: &Event<(f64, f64)>| {
            let (x, y) = *event.value();
            let marker = if event.is_settled() { " (settled)" } else { "" };
            println!("{:>4}  x = {x:>9.5}  y = {y:>9.5}{marker}", event.tick());
            None
        })?;

    spring.start();
    while spring.run_state() == RunState::Running {
        ticker.tick(Time::new::<second>(1.0 / 60.0));
    }

    println!("completed: {}", done.get());
    Ok(())
}
