// Event Emitter Module
//
// Centralized Tauri event emission using singleton pattern
// - Navigation events into the webview UI
//

use once_cell::sync::OnceCell;
use tauri::Manager;

/// Global AppHandle singleton for event emission
static APP_HANDLE: OnceCell<tauri::AppHandle> = OnceCell::new();

/// Initialize the event emitter with AppHandle
/// This should be called once during app setup
pub fn init(app_handle: tauri::AppHandle) {
    if APP_HANDLE.set(app_handle).is_err() {
        eprintln!("[EventEmitter] Warning: AppHandle already initialized");
    }
    println!("[EventEmitter] ✅ Event emitter initialized");
}

/// Get the AppHandle (internal helper)
fn get_handle() -> Option<&'static tauri::AppHandle> {
    APP_HANDLE.get()
}

/// Emit open-message-detail so the UI navigates to the day's message
pub fn emit_open_message_detail(day_index: u32) {
    if let Some(handle) = get_handle() {
        if let Err(e) = handle.emit_all("open-message-detail", day_index) {
            eprintln!("[EventEmitter] Failed to emit open-message-detail: {}", e);
        } else {
            println!("[EventEmitter] 📡 Emitted open-message-detail for day {}", day_index);
        }
    } else {
        eprintln!("[EventEmitter] ⚠️ Cannot emit open-message-detail: AppHandle not initialized");
    }
}
