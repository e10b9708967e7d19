// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![allow(dead_code)]

mod alarm;
mod event;
mod launch;
mod notification;
mod platform;
mod prefs;
mod types;

use alarm::AlarmScheduler;
use notification::{Notifier, SystemNotifier};
use platform::DesktopGate;
use prefs::PreferenceStore;
use std::sync::mpsc::channel;
use std::sync::Arc;
use types::ScheduleOutcome;

#[tauri::command]
fn schedule_daily_alarm(
    hour: u32,
    minute: u32,
    scheduler: tauri::State<Arc<AlarmScheduler>>,
) -> bool {
    match scheduler.schedule(hour, minute) {
        ScheduleOutcome::Scheduled { fire_at } => {
            println!("[Main] Daily alarm scheduled for {}", fire_at);
            true
        }
        // Silent no-op from the caller's view; the user was pointed at the
        // consent settings surface
        ScheduleOutcome::ConsentMissing => true,
        ScheduleOutcome::InvalidTime => {
            eprintln!("[Main] Rejected alarm time {:02}:{:02}", hour, minute);
            false
        }
    }
}

#[tauri::command]
fn cancel_alarm(scheduler: tauri::State<Arc<AlarmScheduler>>) -> bool {
    scheduler.cancel();
    true
}

#[tauri::command]
fn send_test_notification() -> Result<String, String> {
    println!("[TestNotification] 🔔 Sending test notification...");
    notification::send_test_notification();
    Ok("Test notification sent!".to_string())
}

fn main() {
    let prefs = PreferenceStore::open_default();

    // Fixed-identity trigger slot plus the fire channel into the dispatcher
    let (fire_sender, fire_receiver) = channel();
    let scheduler = Arc::new(AlarmScheduler::new(Arc::new(DesktopGate), fire_sender));

    let notifier: Arc<dyn Notifier> =
        Arc::new(SystemNotifier::new(launch::default_payload_path()));

    // Dispatcher runs the presentation flow and re-arms after every fire
    let _dispatcher = alarm::start_dispatcher(
        fire_receiver,
        scheduler.clone(),
        prefs.clone(),
        notifier,
    );

    tauri::Builder::default()
        .manage(scheduler)
        .invoke_handler(tauri::generate_handler![
            schedule_daily_alarm,
            cancel_alarm,
            send_test_notification
        ])
        .setup(move |app| {
            let app_handle = app.handle();

            // Initialize notification system (singleton pattern)
            notification::init(app_handle.clone());

            // Initialize event emitter (singleton pattern)
            event::init(app_handle.clone());

            // Forward a notification-tap launch into the UI
            if let Some(day_index) = launch::consume_tap_payload(&launch::default_payload_path()) {
                if day_index >= 0 {
                    event::emit_open_message_detail(day_index as u32);
                }
            }

            println!("[Main] Native bridge ready");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
