//! A light cycling at demo speed while a few vehicles wait to cross.
//!
//! Run with: `cargo run --example crossing`
//! Set `RUST_LOG=trace` to see every phase flip.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lightvisor::{LightConfig, LightError, TrafficLight};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), LightError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = LightConfig {
        dwell_min: Duration::from_millis(400),
        dwell_max: Duration::from_millis(900),
        tick: Duration::from_millis(1),
    };
    let light = Arc::new(TrafficLight::new(cfg));
    println!("light starts {}", light.current_phase());
    light.simulate()?;

    let vehicles: Vec<_> = (0..3)
        .map(|id| {
            let light = Arc::clone(&light);
            thread::spawn(move || {
                light.wait_for_green().expect("light stopped");
                println!("vehicle {id} crosses");
            })
        })
        .collect();

    for vehicle in vehicles {
        vehicle.join().expect("vehicle panicked");
    }

    light.shutdown();
    println!("light shut down");
    Ok(())
}
