// Notification Module - Daily message notification
//
// This module resolves the day index, builds the notification, and posts
// it through the OS notification service

pub mod presenter;
pub mod rotation;
pub mod sender;

// Re-export public API
pub use sender::{init, send_test_notification, Notifier, SystemNotifier};
