// Event Module - Centralized Tauri event management
//
// This module handles all event emission toward the webview UI
// using singleton pattern

pub mod emitter;

// Re-export public API
pub use emitter::{emit_open_message_detail, init};
