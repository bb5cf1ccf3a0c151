use std::time::Duration;

use windows_sys::Win32::System::Power::{GetSystemPowerStatus, SYSTEM_POWER_STATUS};

use super::PlatformExtensions;

const NO_SYSTEM_BATTERY: u8 = 128;
const UNKNOWN_STATUS: u8 = 255;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn battery_percent() -> Option<f32> {
        let mut status = unsafe { std::mem::zeroed::<SYSTEM_POWER_STATUS>() };
        let ok = unsafe { GetSystemPowerStatus(&mut status) };
        if ok == 0 {
            return None;
        }
        if status.BatteryFlag & NO_SYSTEM_BATTERY != 0 || status.BatteryLifePercent == UNKNOWN_STATUS {
            return None;
        }
        Some(f32::from(status.BatteryLifePercent))
    }

    fn ping_command(target: &str, timeout: Duration) -> (&'static str, Vec<String>) {
        let wait_ms = timeout.as_millis().max(1);
        (
            "ping",
            vec![
                "-n".to_string(),
                "1".to_string(),
                "-w".to_string(),
                wait_ms.to_string(),
                target.to_string(),
            ],
        )
    }
}
