// Notification Presenter
//
// Entry point for every trigger fire: resolve the day index, post the
// notification, re-arm tomorrow's trigger. Runs on the dispatcher
// thread, never on the UI thread.

use crate::alarm::AlarmScheduler;
use crate::notification::rotation;
use crate::notification::sender::Notifier;
use crate::prefs::PreferenceStore;
use crate::types::DailyNotification;
use chrono::Local;
use once_cell::sync::OnceCell;

const CHANNEL_ID: &str = "daily_messages";

/// Channel registration happens at most once per process
static CHANNEL_READY: OnceCell<()> = OnceCell::new();

/// Ensure the notification channel exists. Idempotent.
pub fn ensure_channel() {
    CHANNEL_READY.get_or_init(|| {
        println!("[Presenter] Notification channel '{}' ready", CHANNEL_ID);
    });
}

/// Build the daily notification; the tap action carries the day index
pub fn build_notification(day_index: u32) -> DailyNotification {
    DailyNotification {
        title: "Message of the Day".to_string(),
        body: format!("Tap to see today's message - Day {}", day_index + 1),
        day_index,
    }
}

/// Handle one trigger fire
pub fn on_trigger_fire(scheduler: &AlarmScheduler, prefs: &PreferenceStore, notifier: &dyn Notifier) {
    ensure_channel();

    let day_index = rotation::resolve_day_index(prefs.start_date().as_deref(), Local::now());
    let note = build_notification(day_index);

    if notifier.can_post() {
        match notifier.post(&note) {
            Ok(_) => println!("[Presenter] 📢 Notification posted for day {}", day_index),
            Err(e) => eprintln!("[Presenter] ⚠️ Failed to post notification: {}", e),
        }
    } else {
        eprintln!("[Presenter] No notification permission, skipping post");
    }

    // Re-arm the chain whether or not the post went out
    let outcome = scheduler.reschedule_for_tomorrow(prefs);
    println!("[Presenter] Next trigger outcome: {:?}", outcome);
}
