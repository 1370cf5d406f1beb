mod error;
mod slot;

pub use error::{RecvError, RecvTimeoutError, TryRecvError};
pub use slot::SignalSlot;
