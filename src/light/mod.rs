mod core;
mod phase;

pub use core::TrafficLight;
pub use phase::Phase;
