use anyhow::Result;
use tracing::{info, warn};

pub const STACK_FULL_TITLE: &str = "Stack Full";
pub const STACK_FULL_MESSAGE: &str =
    "Cannot add more items. Please delete some items from your stack.";

/// Surface for the passive "stack full" signal.
pub trait Notifier {
    fn stack_full(&self, capacity: usize);
}

/// Shows a native notification where the platform allows it.
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn stack_full(&self, capacity: usize) {
        warn!(capacity, "{STACK_FULL_TITLE}: {STACK_FULL_MESSAGE}");
        if let Err(e) = platform_notify(STACK_FULL_TITLE, STACK_FULL_MESSAGE) {
            warn!("Error displaying notification: {e:#}");
        }
    }
}

#[cfg(target_os = "macos")]
fn platform_notify(title: &str, body: &str) -> Result<()> {
    use anyhow::{bail, Context};

    let script = format!(
        "display notification \"{}\" with title \"{}\"",
        escape_applescript(body),
        escape_applescript(title)
    );

    let output = std::process::Command::new("osascript")
        .arg("-e")
        .arg(&script)
        .output()
        .context("Failed to run osascript")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("osascript failed: {stderr}");
    }

    info!("Native notification sent");
    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn platform_notify(title: &str, body: &str) -> Result<()> {
    eprintln!("{title}: {body}");
    info!("Notification written to stderr");
    Ok(())
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_applescript() {
        assert_eq!(escape_applescript(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_applescript(r"a\b"), r"a\\b");
    }
}
