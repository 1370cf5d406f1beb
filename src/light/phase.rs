use std::fmt;

/// Phase of the traffic light.
///
/// Plain value type, copied freely between the cycle worker and observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Traffic must stop.
    Red,
    /// Traffic may cross.
    Green,
}

impl Phase {
    /// Returns the other phase (the cycle is a strict two-state alternation).
    pub fn toggled(self) -> Self {
        match self {
            Phase::Red => Phase::Green,
            Phase::Green => Phase::Red,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Red => f.write_str("red"),
            Phase::Green => f.write_str("green"),
        }
    }
}
