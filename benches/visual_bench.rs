use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::hint::black_box;
use std::sync::Arc;
use sysdash::app::App;
use sysdash::config::Config;
use sysdash::sampler::panels;
use sysdash::state::{PanelKind, SharedTelemetry};
use sysdash::system::history::MetricHistory;
use sysdash::system::source::{PartitionUsage, TempReading};
use sysdash::ui;
use sysdash::visual::{BAR_WIDTH, SPARKLINE_LENGTH, bar, sparkline};

fn make_history(n: usize) -> Vec<f64> {
    (0..n).map(|i| ((i * 37) % 100) as f64).collect()
}

fn make_partitions(n: usize) -> Vec<PartitionUsage> {
    (0..n)
        .map(|i| PartitionUsage {
            device: format!("/dev/sd{i}"),
            mount_point: format!("/mnt/{i}"),
            total_bytes: 1 << 40,
            available_bytes: (i as u64 + 1) << 34,
        })
        .collect()
}

fn bench_bar(c: &mut Criterion) {
    c.bench_function("bar_width_20", |b| {
        b.iter(|| {
            for percent in [0.0, 12.5, 49.9, 50.0, 79.9, 80.0, 100.0, 104.2] {
                black_box(bar(black_box(percent), BAR_WIDTH).to_string());
            }
        })
    });
}

fn bench_sparkline(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparkline_10_50_500");

    for size in [10usize, 50, 500] {
        let history = make_history(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &history, |b, history| {
            b.iter(|| black_box(sparkline(black_box(history), SPARKLINE_LENGTH)))
        });
    }

    group.finish();
}

fn bench_panel_composition(c: &mut Criterion) {
    let mut history = MetricHistory::new(50);
    for v in make_history(50) {
        history.push(v);
    }
    let partitions = make_partitions(8);
    let temps: Vec<TempReading> = (0..12)
        .map(|i| TempReading {
            label: format!("core{i}"),
            celsius: 60.0 + i as f32 * 3.0,
        })
        .collect();

    c.bench_function("panel_composition", |b| {
        b.iter(|| {
            black_box(panels::percent_panel(Some(63.0), &history));
            black_box(panels::disk_panel(Some(partitions.as_slice())));
            black_box(panels::temps_panel(Some(temps.as_slice())));
        })
    });
}

fn bench_dashboard_render(c: &mut Criterion) {
    let state = Arc::new(SharedTelemetry::new());
    let mut history = MetricHistory::new(50);
    for v in make_history(50) {
        history.push(v);
    }
    for kind in PanelKind::ALL {
        state.set_panel(kind, panels::percent_panel(Some(42.0), &history));
    }
    let mut app = App::new(&Config::default(), true, state);

    c.bench_function("dashboard_render_160x50", |b| {
        b.iter(|| {
            let backend = TestBackend::new(160, 50);
            let mut terminal = Terminal::new(backend).expect("bench terminal init failed");
            terminal
                .draw(|frame| ui::draw(frame, &mut app))
                .expect("bench draw failed");
            black_box(terminal.backend());
        })
    });
}

criterion_group!(
    benches,
    bench_bar,
    bench_sparkline,
    bench_panel_composition,
    bench_dashboard_render
);
criterion_main!(benches);
