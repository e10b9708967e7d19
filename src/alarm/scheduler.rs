// Alarm Scheduler
//
// Manages the single exact one-shot wake-up trigger. The trigger has a
// fixed logical identity: arming replaces any pending occurrence, so at
// most one is pending at any time. A generation counter invalidates the
// sleeper thread of a replaced or cancelled trigger.
//
// The daily cadence is a self-rescheduling one-shot chain, not a
// periodic trigger: every fire re-arms tomorrow's occurrence.

use crate::alarm::time;
use crate::platform::ExactAlarmGate;
use crate::prefs::PreferenceStore;
use crate::types::{AlarmEvent, ScheduleOutcome};
use chrono::{DateTime, Local};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

// Sleeper threads re-check the wall clock at this cadence so a trigger
// survives host sleep and clock adjustments
const POLL_INTERVAL: Duration = Duration::from_secs(30);

struct TriggerSlot {
    generation: u64,
    pending: Option<DateTime<Local>>,
}

pub struct AlarmScheduler {
    slot: Arc<Mutex<TriggerSlot>>,
    gate: Arc<dyn ExactAlarmGate>,
    fire_sender: Sender<AlarmEvent>,
}

impl AlarmScheduler {
    pub fn new(gate: Arc<dyn ExactAlarmGate>, fire_sender: Sender<AlarmEvent>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(TriggerSlot {
                generation: 0,
                pending: None,
            })),
            gate,
            fire_sender,
        }
    }

    /// Register the daily trigger for the next occurrence of hour:minute —
    /// today if still in the future, otherwise tomorrow.
    ///
    /// Requires exact-alarm consent; without it the user is redirected to
    /// the consent settings surface and nothing is registered.
    pub fn schedule(&self, hour: u32, minute: u32) -> ScheduleOutcome {
        if !self.gate.can_schedule_exact() {
            eprintln!("[AlarmScheduler] ⚠️ No exact alarm consent, aborting schedule");
            self.gate.request_exact_alarm_consent();
            return ScheduleOutcome::ConsentMissing;
        }

        let Some(fire_at) = time::next_occurrence(Local::now(), hour, minute) else {
            eprintln!(
                "[AlarmScheduler] Invalid alarm time {:02}:{:02}, nothing scheduled",
                hour, minute
            );
            return ScheduleOutcome::InvalidTime;
        };

        self.arm(fire_at);
        ScheduleOutcome::Scheduled { fire_at }
    }

    /// Deregister any pending trigger. Idempotent.
    pub fn cancel(&self) {
        let mut slot = self.slot.lock().unwrap();
        slot.generation += 1;

        match slot.pending.take() {
            Some(fire_at) => println!("[AlarmScheduler] Cancelled trigger for {}", fire_at),
            None => println!("[AlarmScheduler] Cancel requested with no trigger pending"),
        }
    }

    /// Re-arm for tomorrow at the configured hour:minute (default 9:00).
    /// Invoked after every fire; a failure here stops the daily chain
    /// until the application schedules again.
    pub fn reschedule_for_tomorrow(&self, prefs: &PreferenceStore) -> ScheduleOutcome {
        let (hour, minute) = prefs.alarm_time();

        // Consent may have been revoked since the last run; no settings
        // redirect from a background fire, just log and stop the chain
        if !self.gate.can_schedule_exact() {
            eprintln!("[AlarmScheduler] ⚠️ Exact alarm consent revoked, daily chain stops");
            return ScheduleOutcome::ConsentMissing;
        }

        let Some(fire_at) = time::tomorrow_at(Local::now(), hour, minute) else {
            eprintln!(
                "[AlarmScheduler] Invalid configured time {:02}:{:02}, daily chain stops",
                hour, minute
            );
            return ScheduleOutcome::InvalidTime;
        };

        self.arm(fire_at);
        ScheduleOutcome::Scheduled { fire_at }
    }

    /// The pending trigger's fire time, if one is registered
    pub fn pending(&self) -> Option<DateTime<Local>> {
        self.slot.lock().unwrap().pending
    }

    /// Replace the slot contents and start a sleeper for the new occurrence
    fn arm(&self, fire_at: DateTime<Local>) {
        let generation = {
            let mut slot = self.slot.lock().unwrap();
            slot.generation += 1;
            slot.pending = Some(fire_at);
            slot.generation
        };

        let slot = self.slot.clone();
        let sender = self.fire_sender.clone();
        thread::spawn(move || run_trigger(slot, generation, fire_at, sender));

        println!("[AlarmScheduler] Trigger armed for {}", fire_at);
    }
}

fn run_trigger(
    slot: Arc<Mutex<TriggerSlot>>,
    generation: u64,
    fire_at: DateTime<Local>,
    sender: Sender<AlarmEvent>,
) {
    loop {
        {
            let current = slot.lock().unwrap();
            if current.generation != generation {
                println!("[AlarmScheduler] Trigger for {} superseded, sleeper exiting", fire_at);
                return;
            }
        }

        let now = Local::now();
        if now >= fire_at {
            break;
        }

        let remaining = (fire_at - now).to_std().unwrap_or(Duration::ZERO);
        thread::sleep(remaining.min(POLL_INTERVAL));
    }

    {
        let mut current = slot.lock().unwrap();
        if current.generation != generation {
            println!("[AlarmScheduler] Trigger for {} superseded at fire time", fire_at);
            return;
        }
        current.pending = None;
    }

    println!("[AlarmScheduler] 🔔 Trigger fired (due {})", fire_at);

    if sender.send(AlarmEvent::Fired { fired_at: fire_at }).is_err() {
        println!("[AlarmScheduler] Dispatcher disconnected, fire dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::PreferenceStore;
    use chrono::{Days, Timelike};
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::channel;
    use tempfile::TempDir;

    struct GrantedGate;

    impl ExactAlarmGate for GrantedGate {
        fn can_schedule_exact(&self) -> bool {
            true
        }
        fn request_exact_alarm_consent(&self) {}
    }

    struct DenyingGate {
        consent_requests: AtomicUsize,
    }

    impl ExactAlarmGate for DenyingGate {
        fn can_schedule_exact(&self) -> bool {
            false
        }
        fn request_exact_alarm_consent(&self) {
            self.consent_requests.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn granted_scheduler() -> AlarmScheduler {
        let (sender, _receiver) = channel();
        AlarmScheduler::new(Arc::new(GrantedGate), sender)
    }

    #[test]
    fn test_schedule_registers_one_pending_trigger() {
        let scheduler = granted_scheduler();

        let outcome = scheduler.schedule(9, 0);
        let ScheduleOutcome::Scheduled { fire_at } = outcome else {
            panic!("expected Scheduled, got {:?}", outcome);
        };

        assert_eq!(scheduler.pending(), Some(fire_at));
        assert_eq!(fire_at.hour(), 9);
        assert_eq!(fire_at.minute(), 0);
        assert!(fire_at > Local::now());
    }

    #[test]
    fn test_reschedule_replaces_pending_trigger() {
        let scheduler = granted_scheduler();

        scheduler.schedule(9, 0);
        let outcome = scheduler.schedule(10, 30);

        let ScheduleOutcome::Scheduled { fire_at } = outcome else {
            panic!("expected Scheduled, got {:?}", outcome);
        };
        let pending = scheduler.pending().unwrap();
        assert_eq!(pending, fire_at);
        assert_eq!(pending.hour(), 10);
        assert_eq!(pending.minute(), 30);
    }

    #[test]
    fn test_cancel_clears_pending_and_is_idempotent() {
        let scheduler = granted_scheduler();

        scheduler.schedule(9, 0);
        assert!(scheduler.pending().is_some());

        scheduler.cancel();
        assert_eq!(scheduler.pending(), None);

        // Safe with nothing pending
        scheduler.cancel();
        assert_eq!(scheduler.pending(), None);
    }

    #[test]
    fn test_missing_consent_registers_nothing_and_redirects_once() {
        let gate = Arc::new(DenyingGate {
            consent_requests: AtomicUsize::new(0),
        });
        let (sender, _receiver) = channel();
        let scheduler = AlarmScheduler::new(gate.clone(), sender);

        assert_eq!(scheduler.schedule(9, 0), ScheduleOutcome::ConsentMissing);
        assert_eq!(scheduler.pending(), None);
        assert_eq!(gate.consent_requests.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_revoked_consent_stops_chain_without_redirect() {
        let gate = Arc::new(DenyingGate {
            consent_requests: AtomicUsize::new(0),
        });
        let (sender, _receiver) = channel();
        let scheduler = AlarmScheduler::new(gate.clone(), sender);

        let temp_dir = TempDir::new().unwrap();
        let prefs = PreferenceStore::with_path(temp_dir.path().join("preferences.json"));

        let outcome = scheduler.reschedule_for_tomorrow(&prefs);
        assert_eq!(outcome, ScheduleOutcome::ConsentMissing);
        assert_eq!(scheduler.pending(), None);
        // The background re-arm path never opens the settings surface
        assert_eq!(gate.consent_requests.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_invalid_time_registers_nothing() {
        let scheduler = granted_scheduler();

        assert_eq!(scheduler.schedule(24, 0), ScheduleOutcome::InvalidTime);
        assert_eq!(scheduler.schedule(9, 60), ScheduleOutcome::InvalidTime);
        assert_eq!(scheduler.pending(), None);
    }

    #[test]
    fn test_reschedule_for_tomorrow_reads_configured_time() {
        let scheduler = granted_scheduler();

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        fs::write(&path, r#"{"notification_hour":6,"notification_minute":15}"#).unwrap();
        let prefs = PreferenceStore::with_path(path);

        let before = Local::now();
        let outcome = scheduler.reschedule_for_tomorrow(&prefs);

        let ScheduleOutcome::Scheduled { fire_at } = outcome else {
            panic!("expected Scheduled, got {:?}", outcome);
        };
        assert_eq!(fire_at.hour(), 6);
        assert_eq!(fire_at.minute(), 15);
        assert_eq!(
            fire_at.date_naive(),
            before.date_naive().checked_add_days(Days::new(1)).unwrap()
        );
        assert_eq!(scheduler.pending(), Some(fire_at));
    }

    #[test]
    fn test_reschedule_for_tomorrow_defaults_to_nine() {
        let scheduler = granted_scheduler();

        let temp_dir = TempDir::new().unwrap();
        let prefs = PreferenceStore::with_path(temp_dir.path().join("preferences.json"));

        let outcome = scheduler.reschedule_for_tomorrow(&prefs);
        let ScheduleOutcome::Scheduled { fire_at } = outcome else {
            panic!("expected Scheduled, got {:?}", outcome);
        };
        assert_eq!(fire_at.hour(), 9);
        assert_eq!(fire_at.minute(), 0);
    }
}
