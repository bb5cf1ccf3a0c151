//! Panel text for each metric category.

use crate::system::history::MetricHistory;
use crate::system::snapshot::Capability;
use crate::system::source::{GpuReading, PartitionUsage, TempReading};
use crate::visual::{BAR_WIDTH, Fragment, PanelText, SPARKLINE_LENGTH, Tone, bar, sparkline};

use super::rate::RateSample;

/// Above this a sensor is shown as hot.
pub const HOT_CELSIUS: f32 = 80.0;

const UNAVAILABLE: &str = "n/a";

fn bar_with_history(percent: f64, history: &MetricHistory) -> Vec<Fragment> {
    let mut line = bar(percent, BAR_WIDTH).fragments();
    line.push(Fragment::plain(" "));
    line.push(Fragment::plain(sparkline(&history.to_vec(), SPARKLINE_LENGTH)));
    line
}

/// CPU and RAM panels share this shape.
pub fn percent_panel(percent: Option<f32>, history: &MetricHistory) -> PanelText {
    match percent {
        Some(percent) => PanelText {
            lines: vec![bar_with_history(f64::from(percent), history)],
        },
        None => PanelText::placeholder(UNAVAILABLE),
    }
}

pub fn gpu_panel(
    gpus: &Capability<Vec<GpuReading>>,
    utilization: Option<f64>,
    history: &MetricHistory,
) -> PanelText {
    match (gpus, utilization) {
        (Capability::Present(devices), Some(utilization)) => {
            let mut text = PanelText::new();
            text.push_line(bar_with_history(utilization, history));
            for gpu in devices {
                text.push_line(vec![Fragment::plain(format!(
                    "{}: {}% / {}MB",
                    gpu.name,
                    gpu.utilization_percent,
                    gpu.memory_used_mb()
                ))]);
            }
            text
        }
        (Capability::Failed, _) => PanelText::placeholder("GPU read failed"),
        _ => PanelText::placeholder("No GPU info"),
    }
}

pub fn network_panel(
    rate: Option<RateSample>,
    upload: &MetricHistory,
    download: &MetricHistory,
) -> PanelText {
    match rate {
        Some(rate) => PanelText {
            lines: vec![vec![Fragment::plain(format!(
                "Up: {:.1} KB/s | Down: {:.1} KB/s {} {}",
                rate.upload_kbps,
                rate.download_kbps,
                sparkline(&upload.to_vec(), SPARKLINE_LENGTH),
                sparkline(&download.to_vec(), SPARKLINE_LENGTH),
            ))]],
        },
        None => PanelText::placeholder("Network unavailable"),
    }
}

pub fn disk_panel(partitions: Option<&[PartitionUsage]>) -> PanelText {
    let Some(partitions) = partitions else {
        return PanelText::placeholder("Disk information unavailable");
    };
    if partitions.is_empty() {
        return PanelText::placeholder("No partitions");
    }

    let mut text = PanelText::new();
    for part in partitions {
        let mut line = vec![Fragment::plain(format!("{}: ", part.device))];
        line.extend(bar(part.used_percent(), BAR_WIDTH).fragments());
        line.push(Fragment::plain(format!(" {}MB free", part.free_mb())));
        text.push_line(line);
    }
    text
}

pub fn battery_panel(battery: &Capability<f32>) -> PanelText {
    match battery {
        Capability::Present(percent) => PanelText::placeholder(format!("{percent:.1}%")),
        Capability::Absent => PanelText::placeholder("No battery"),
        Capability::Failed => PanelText::placeholder("Battery read failed"),
    }
}

pub fn temps_panel(temps: Option<&[TempReading]>) -> PanelText {
    let Some(temps) = temps else {
        return PanelText::placeholder("Temperature sensors unavailable");
    };
    if temps.is_empty() {
        return PanelText::placeholder("No sensors");
    }

    let mut text = PanelText::new();
    for reading in temps {
        text.push_line(vec![Fragment::new(
            format_temp(reading),
            temp_tone(reading.celsius),
        )]);
    }
    text
}

pub fn temp_tone(celsius: f32) -> Tone {
    if celsius > HOT_CELSIUS {
        Tone::Hot
    } else {
        Tone::Normal
    }
}

pub fn format_temp(reading: &TempReading) -> String {
    format!("{}: {:.1}°C", reading.label, reading.celsius)
}

/// Temperatures as a single plain-text field for the CSV log.
pub fn temps_plain(temps: Option<&[TempReading]>) -> String {
    temps
        .unwrap_or_default()
        .iter()
        .map(format_temp)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::Severity;

    fn history(values: &[f64]) -> MetricHistory {
        let mut h = MetricHistory::new(50);
        for v in values {
            h.push(*v);
        }
        h
    }

    #[test]
    fn percent_panel_has_bar_and_sparkline() {
        let text = percent_panel(Some(55.0), &history(&[10.0, 55.0]));
        assert_eq!(text.lines.len(), 1);
        assert_eq!(text.lines[0][0].tone, Tone::Severity(Severity::Medium));
        assert_eq!(text.plain_text(), "███████████░░░░░░░░░ 55.0% ▂█");
    }

    #[test]
    fn percent_panel_placeholder_on_failed_read() {
        assert_eq!(percent_panel(None, &history(&[])).plain_text(), "n/a");
    }

    #[test]
    fn temps_threshold_is_strictly_above_80() {
        let temps = vec![
            TempReading {
                label: "core0".into(),
                celsius: 80.0,
            },
            TempReading {
                label: "core1".into(),
                celsius: 80.5,
            },
        ];
        let text = temps_panel(Some(&temps));
        assert_eq!(text.lines[0][0].tone, Tone::Normal);
        assert_eq!(text.lines[1][0].tone, Tone::Hot);
        assert_eq!(text.plain_text(), "core0: 80.0°C\ncore1: 80.5°C");
        assert_eq!(temps_plain(Some(&temps)), "core0: 80.0°C; core1: 80.5°C");
    }

    #[test]
    fn temps_without_sensors() {
        assert_eq!(temps_panel(Some(&[])).plain_text(), "No sensors");
        assert_eq!(
            temps_panel(None).plain_text(),
            "Temperature sensors unavailable"
        );
        assert_eq!(temps_plain(None), "");
    }

    #[test]
    fn gpu_sentinels() {
        let h = history(&[]);
        assert_eq!(
            gpu_panel(&Capability::Absent, None, &h).plain_text(),
            "No GPU info"
        );
        assert_eq!(
            gpu_panel(&Capability::Failed, None, &h).plain_text(),
            "GPU read failed"
        );
    }

    #[test]
    fn gpu_panel_lists_devices() {
        let devices = vec![GpuReading {
            name: "RTX".into(),
            utilization_percent: 30,
            memory_used_bytes: 2048 * 1024 * 1024,
        }];
        let text = gpu_panel(
            &Capability::Present(devices),
            Some(30.0),
            &history(&[30.0]),
        );
        assert_eq!(text.lines.len(), 2);
        assert_eq!(text.lines[1][0].text, "RTX: 30% / 2048MB");
    }

    #[test]
    fn network_panel_formats_rates() {
        let text = network_panel(
            Some(RateSample {
                upload_kbps: 2.0,
                download_kbps: 10.0,
            }),
            &history(&[2.0]),
            &history(&[0.0, 10.0]),
        );
        assert_eq!(text.plain_text(), "Up: 2.0 KB/s | Down: 10.0 KB/s █ ▁█");
    }

    #[test]
    fn disk_panel_one_line_per_partition() {
        let parts = vec![
            PartitionUsage {
                device: "/dev/sda1".into(),
                mount_point: "/".into(),
                total_bytes: 1000 * 1024 * 1024,
                available_bytes: 100 * 1024 * 1024,
            },
            PartitionUsage {
                device: "/dev/sdb1".into(),
                mount_point: "/data".into(),
                total_bytes: 1000 * 1024 * 1024,
                available_bytes: 900 * 1024 * 1024,
            },
        ];
        let text = disk_panel(Some(&parts));
        assert_eq!(text.lines.len(), 2);
        let first = text.plain_text();
        let first = first.lines().next().unwrap();
        assert!(first.starts_with("/dev/sda1: ██████████████████░░ 90.0%"));
        assert!(first.ends_with(" 100MB free"));
        assert_eq!(text.lines[0][1].tone, Tone::Severity(Severity::High));
        assert_eq!(text.lines[1][1].tone, Tone::Severity(Severity::Low));
    }

    #[test]
    fn battery_states() {
        assert_eq!(battery_panel(&Capability::Present(87.0)).plain_text(), "87.0%");
        assert_eq!(battery_panel(&Capability::Absent).plain_text(), "No battery");
        assert_eq!(
            battery_panel(&Capability::Failed).plain_text(),
            "Battery read failed"
        );
    }
}
