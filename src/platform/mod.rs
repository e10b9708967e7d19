// Platform Module - OS capability gates
//
// This module abstracts OS-level permission checks so they can be
// mocked in tests

pub mod gate;

// Re-export public API
pub use gate::{DesktopGate, ExactAlarmGate};
