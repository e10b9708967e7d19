// Fire Dispatcher Thread
//
// Receives trigger fires from sleeper threads and runs the presentation
// flow, which re-arms the next day's trigger

use crate::alarm::scheduler::AlarmScheduler;
use crate::notification::presenter;
use crate::notification::Notifier;
use crate::prefs::PreferenceStore;
use crate::types::AlarmEvent;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread;

/// Start dispatcher thread
pub fn start_dispatcher(
    fire_receiver: Receiver<AlarmEvent>,
    scheduler: Arc<AlarmScheduler>,
    prefs: PreferenceStore,
    notifier: Arc<dyn Notifier>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        run_dispatcher(fire_receiver, scheduler, prefs, notifier);
    })
}

fn run_dispatcher(
    fire_receiver: Receiver<AlarmEvent>,
    scheduler: Arc<AlarmScheduler>,
    prefs: PreferenceStore,
    notifier: Arc<dyn Notifier>,
) {
    println!("[Dispatcher] Started");

    let mut fire_count = 0u64;
    loop {
        match fire_receiver.recv() {
            Ok(AlarmEvent::Fired { fired_at }) => {
                fire_count += 1;
                println!("[Dispatcher] Trigger fire #{} (due {})", fire_count, fired_at);
                presenter::on_trigger_fire(&scheduler, &prefs, notifier.as_ref());
            }
            Err(_) => {
                println!("[Dispatcher] Channel disconnected, shutting down");
                break;
            }
        }
    }
}
