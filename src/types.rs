// DailyMessages Type Definitions
//
// This module contains all shared data structures
// used throughout the application.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Number of rotating messages; the day index always lands in [0, MESSAGE_CYCLE - 1]
pub const MESSAGE_CYCLE: i64 = 30;

/// Result of registering (or re-registering) the daily trigger
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ScheduleOutcome {
    /// One-shot trigger is pending for this instant
    Scheduled { fire_at: DateTime<Local> },
    /// Exact-alarm consent missing; nothing registered, user redirected to settings
    ConsentMissing,
    /// Requested wall time does not exist (out of range or DST gap); nothing registered
    InvalidTime,
}

/// Event sent from a trigger thread to the dispatcher
#[derive(Debug, Clone, Copy)]
pub enum AlarmEvent {
    Fired { fired_at: DateTime<Local> },
}

/// Notification content plus the day index its tap action carries
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DailyNotification {
    pub title: String,
    pub body: String,
    pub day_index: u32,
}
