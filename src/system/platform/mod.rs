use std::time::Duration;

/// Host facilities that differ per operating system.
pub trait PlatformExtensions {
    /// Charge of the first battery found, `None` on hosts without one.
    fn battery_percent() -> Option<f32>;
    /// Program and arguments for a single liveness probe with `timeout`.
    fn ping_command(target: &str, timeout: Duration) -> (&'static str, Vec<String>);
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn battery_percent() -> Option<f32> {
    platform_impl::Platform::battery_percent()
}

pub fn ping_command(target: &str, timeout: Duration) -> (&'static str, Vec<String>) {
    platform_impl::Platform::ping_command(target, timeout)
}
