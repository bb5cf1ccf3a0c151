use std::time::Duration;

use battery::units::ratio::percent;

use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn battery_percent() -> Option<f32> {
        let manager = battery::Manager::new().ok()?;
        let battery = manager.batteries().ok()?.next()?.ok()?;
        Some(battery.state_of_charge().get::<percent>())
    }

    fn ping_command(target: &str, timeout: Duration) -> (&'static str, Vec<String>) {
        // -t is the overall timeout in seconds on BSD ping
        let wait_secs = timeout.as_secs().max(1);
        (
            "ping",
            vec![
                "-c".to_string(),
                "1".to_string(),
                "-t".to_string(),
                wait_secs.to_string(),
                target.to_string(),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_uses_bsd_overall_timeout() {
        let (_, args) = Platform::ping_command("192.0.2.1", Duration::from_millis(200));
        assert_eq!(args, ["-c", "1", "-t", "1", "192.0.2.1"]);
    }
}
