// Launch Routing
//
// Carries the day index from a notification tap into the application.
// The slot file plays the role of a launch-intent extra: the notifier
// stages it when posting and startup consumes it exactly once. Each new
// post overwrites the slot, so a tap always resolves to the most recent
// notification.
//

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Tap payload staged by the notifier and consumed at startup
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct TapPayload {
    pub day_index: i32,
}

/// Get the default tap payload slot path
pub fn default_payload_path() -> PathBuf {
    dirs::home_dir()
        .expect("Failed to get home directory")
        .join(".daily-messages")
        .join("pending_tap.json")
}

/// Stage a tap payload, replacing any prior one
pub fn stash_tap_payload(path: &Path, day_index: u32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = TapPayload {
        day_index: day_index as i32,
    };
    let json_str = serde_json::to_string(&payload)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    fs::write(path, json_str)?;
    println!("[Launch] Staged tap payload for day {}", day_index);
    Ok(())
}

/// Consume the staged payload: read it, clear the slot, return the index.
/// Absent or malformed slots yield None.
pub fn consume_tap_payload(path: &Path) -> Option<i32> {
    if !path.exists() {
        return None;
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("[Launch] Failed to read tap payload: {}", e);
            return None;
        }
    };

    // One-shot slot: cleared whether or not the contents parse
    if let Err(e) = fs::remove_file(path) {
        eprintln!("[Launch] Failed to clear tap payload slot: {}", e);
    }

    match serde_json::from_str::<TapPayload>(&contents) {
        Ok(payload) => {
            println!("[Launch] Launched from notification for day {}", payload.day_index);
            Some(payload.day_index)
        }
        Err(e) => {
            eprintln!("[Launch] Malformed tap payload, ignoring: {}", e);
            None
        }
    }
}
