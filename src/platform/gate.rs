// Exact Alarm Gate
//
// Some host platforms require explicit user consent before an app may
// register exact-time wake-up triggers. The scheduler consults this gate
// on every arm; when consent is missing it redirects the user to the
// relevant settings surface and registers nothing.
//

/// Consent check for exact-time trigger registration
pub trait ExactAlarmGate: Send + Sync {
    /// Whether the process may register exact-time triggers right now
    fn can_schedule_exact(&self) -> bool;

    /// Point the user at the settings surface where consent is granted.
    /// Best effort; failures are logged by the implementation.
    fn request_exact_alarm_consent(&self);
}

/// Desktop hosts grant exact scheduling unconditionally
pub struct DesktopGate;

impl ExactAlarmGate for DesktopGate {
    fn can_schedule_exact(&self) -> bool {
        true
    }

    fn request_exact_alarm_consent(&self) {
        // No consent surface exists on desktop
        println!("[Platform] Exact alarm consent requested; desktop grants implicitly");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_gate_grants() {
        let gate = DesktopGate;
        assert!(gate.can_schedule_exact());
        // Must not panic
        gate.request_exact_alarm_consent();
    }
}
