// Notification Sender
//
// Posts notifications through the OS notification service using
// singleton pattern for AppHandle management. The posting seam is a
// trait so the presentation flow can run against a mock in tests.
//

use crate::launch;
use crate::types::DailyNotification;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use tauri::api::notification::Notification;

/// Global AppHandle singleton for notifications
static APP_HANDLE: OnceCell<tauri::AppHandle> = OnceCell::new();

/// Initialize the notification system with AppHandle
/// This should be called once during app setup
pub fn init(app_handle: tauri::AppHandle) {
    if APP_HANDLE.set(app_handle).is_err() {
        eprintln!("[Notification] Warning: AppHandle already initialized");
    }
    println!("[Notification] ✅ Notification system initialized");
}

/// Get the bundle identifier for notifications
fn get_bundle_id() -> String {
    APP_HANDLE
        .get()
        .map(|handle| handle.config().tauri.bundle.identifier.clone())
        .unwrap_or_else(|| {
            eprintln!("[Notification] ⚠️ AppHandle not initialized, using default bundle ID");
            "com.dailymessages.app".to_string()
        })
}

/// Posting capability consumed by the presenter
pub trait Notifier: Send + Sync {
    /// Whether the process currently holds notification-posting permission
    fn can_post(&self) -> bool;

    /// Post the notification; its tap action must carry the day index
    fn post(&self, note: &DailyNotification) -> Result<(), String>;
}

/// Posts through the OS notification service and stages the tap payload
/// in the slot file the launch path consumes
pub struct SystemNotifier {
    tap_payload_path: PathBuf,
}

impl SystemNotifier {
    pub fn new(tap_payload_path: PathBuf) -> Self {
        Self { tap_payload_path }
    }
}

impl Notifier for SystemNotifier {
    fn can_post(&self) -> bool {
        // Desktop hosts grant posting to installed apps without a runtime prompt
        true
    }

    fn post(&self, note: &DailyNotification) -> Result<(), String> {
        // Stage the tap payload before posting so a tap never resolves to a
        // stale index; each post overwrites the prior slot
        launch::stash_tap_payload(&self.tap_payload_path, note.day_index)
            .map_err(|e| format!("Failed to stage tap payload: {}", e))?;

        Notification::new(get_bundle_id())
            .title(&note.title)
            .body(&note.body)
            .show()
            .map_err(|e| e.to_string())
    }
}

/// Send test notification for debugging
pub fn send_test_notification() {
    println!("[Notification] 🔔 Sending test notification");

    let result = Notification::new(get_bundle_id())
        .title("Test Notification")
        .body("Daily Messages notification system is working correctly!")
        .show();

    match result {
        Ok(_) => println!("[Notification] ✅ Test notification sent successfully"),
        Err(e) => println!("[Notification] ⚠️ Failed to send test notification: {}", e),
    }
}
