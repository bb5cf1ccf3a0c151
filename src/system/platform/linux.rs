use std::path::Path;
use std::time::Duration;

use super::PlatformExtensions;

const POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

pub struct Platform;

impl PlatformExtensions for Platform {
    fn battery_percent() -> Option<f32> {
        battery_from_power_supply(Path::new(POWER_SUPPLY_ROOT))
    }

    fn ping_command(target: &str, timeout: Duration) -> (&'static str, Vec<String>) {
        let wait_secs = timeout.as_secs().max(1);
        (
            "ping",
            vec![
                "-c".to_string(),
                "1".to_string(),
                "-W".to_string(),
                wait_secs.to_string(),
                target.to_string(),
            ],
        )
    }
}

/// Scan `root` for a supply of type `Battery` and read its `capacity`.
fn battery_from_power_supply(root: &Path) -> Option<f32> {
    let mut entries: Vec<_> = std::fs::read_dir(root).ok()?.flatten().collect();
    entries.sort_by_key(|e| e.file_name());
    for entry in entries {
        let path = entry.path();
        let kind = std::fs::read_to_string(path.join("type")).unwrap_or_default();
        if kind.trim() != "Battery" {
            continue;
        }
        if let Some(capacity) = std::fs::read_to_string(path.join("capacity"))
            .ok()
            .and_then(|s| s.trim().parse::<f32>().ok())
        {
            return Some(capacity.clamp(0.0, 100.0));
        }
    }
    None
}
