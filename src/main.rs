use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyEventKind, MouseButton, MouseEventKind,
};
use crossterm::execute;

use sysdash::action::Action;
use sysdash::app::App;
use sysdash::config::{self, load_config, load_config_from_path};
use sysdash::event::{Event, EventHandler};
use sysdash::probe::PingProbe;
use sysdash::record::RecordLog;
use sysdash::runtime::{RuntimeOptions, Workers};
use sysdash::state::SharedTelemetry;
use sysdash::system::collector::Collector;
use sysdash::system::gpu::GpuMonitor;
use sysdash::{logging, ui};

/// Fastest redraw the display will run at.
const MIN_REDRAW_MS: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Standard,
    /// Adds the reachability console.
    Server,
}

#[derive(Parser)]
#[command(
    name = "sysdash",
    about = "Live terminal dashboard for host telemetry"
)]
struct Cli {
    /// Run mode; overrides `server_mode` from the config file
    #[arg(value_enum, ignore_case = true)]
    mode: Option<Mode>,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV sample log path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Host probed in server mode
    #[arg(long)]
    probe_target: Option<String>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    logging::init(&config.logging)?;

    // Fail before the terminal is taken over if the log cannot be written.
    let log = RecordLog::open(&config.general.log_path)?;
    let state = Arc::new(SharedTelemetry::new());
    let options = RuntimeOptions {
        server_mode: config.general.server_mode,
        probe_target: config.probe.target.clone(),
    };
    let gpu = GpuMonitor::detect();
    tracing::info!(gpu = gpu.is_available(), "gpu detection finished");
    let workers = Workers::start(Collector::new(gpu), log, PingProbe, &options, &state)?;

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut app = App::new(&config, workers.has_prober(), Arc::clone(&state));
    let redraw = Duration::from_millis(config.general.refresh_rate_ms.max(MIN_REDRAW_MS));
    let result = run(&mut terminal, &mut app, redraw).await;

    execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();

    let shutdown = workers.shutdown(&state);
    tracing::info!("dashboard closed");
    result?;
    shutdown?;
    match state.fault() {
        Some(fault) => Err(eyre!(fault)),
        None => Ok(()),
    }
}

async fn run(terminal: &mut ratatui::DefaultTerminal, app: &mut App, redraw: Duration) -> Result<()> {
    let mut events = EventHandler::new(redraw);

    terminal.draw(|frame| ui::draw(frame, app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let mut should_draw = false;
        match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    let action = app.map_key(key);
                    app.dispatch(action);
                    should_draw = true;
                }
            }
            Event::Mouse(mouse) => {
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                    app.dispatch(Action::ClickAt(mouse.column, mouse.row));
                    should_draw = true;
                }
            }
            Event::Tick => {
                app.on_tick();
                should_draw = true;
            }
            Event::Resize => should_draw = true,
        }
        if should_draw {
            terminal.draw(|frame| ui::draw(frame, app))?;
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    match cli.mode {
        Some(Mode::Server) => config.general.server_mode = true,
        Some(Mode::Standard) => config.general.server_mode = false,
        None => {}
    }
    if let Some(ref path) = cli.log_file {
        config.general.log_path = path.clone();
    }
    if let Some(ref target) = cli.probe_target {
        config.probe.target = target.clone();
    }
    if let Some(ref support) = cli.color {
        config.colors.color_support = support.clone();
    }

    config
}
