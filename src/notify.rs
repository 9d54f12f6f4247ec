//! Desktop notifications, best-effort.
//!
//! Posted through `osascript` so no notification framework is linked in.
//! Failures are logged and swallowed — a missing notification must never
//! fail the operation it decorates.

use log::{debug, warn};
use std::process::Command;

/// Show a notification with an optional title.
pub fn notify(message: &str, title: Option<&str>) {
    let mut script = format!("display notification \"{}\"", escape(message));
    if let Some(title) = title {
        script.push_str(&format!(" with title \"{}\"", escape(title)));
    }
    match Command::new("osascript").arg("-e").arg(&script).output() {
        Ok(output) if output.status.success() => debug!("notified: {}", message),
        Ok(output) => warn!(
            "osascript failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        ),
        Err(err) => warn!("could not run osascript: {}", err),
    }
}

/// Escape for interpolation inside an AppleScript double-quoted string.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
