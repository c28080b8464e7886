use std::io;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;

use grid_snake::config::{theme_by_name, Theme, THEMES};
use grid_snake::engine::{Engine, Phase};
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::renderer;
use grid_snake::settings::{self, Overrides, Settings};
use grid_snake::terminal_runtime::{install_panic_hook, TerminalSession};
use grid_snake::ui::hud::HudInfo;

/// How long one input poll may block; also the upper bound on frame latency.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(name = "grid-snake", about = "Snake on a fixed grid, in the terminal")]
struct Cli {
    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Tick interval in milliseconds.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Points awarded per food.
    #[arg(long)]
    points: Option<u32>,

    /// Color theme name.
    #[arg(long)]
    theme: Option<String>,

    /// Seed for deterministic food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// List built-in themes and exit.
    #[arg(long = "list-themes")]
    list_themes: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list_themes {
        for theme in THEMES {
            println!("{}", theme.name);
        }
        return ExitCode::SUCCESS;
    }

    let overrides = Overrides {
        grid_width: cli.width,
        grid_height: cli.height,
        tick_interval_ms: cli.tick_ms,
        points_per_food: cli.points,
        theme: cli.theme.clone(),
    };

    // Resolve settings before raw mode so errors print to a sane terminal.
    let settings = match settings::load(&overrides) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            return ExitCode::FAILURE;
        }
    };

    install_panic_hook();

    match run(&settings, cli.seed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings, seed: Option<u64>) -> io::Result<()> {
    let theme: &Theme = theme_by_name(&settings.theme_name)
        .expect("theme name was validated during settings resolution");

    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();

    let mut engine = match seed {
        Some(seed) => Engine::new_with_seed(settings.engine, seed),
        None => Engine::new(settings.engine),
    };

    let tick_interval = Duration::from_millis(settings.tick_interval_ms);
    let mut last_tick = Instant::now();
    let mut session_best: u32 = 0;

    loop {
        let snapshot = engine.snapshot();
        session.terminal_mut().draw(|frame| {
            renderer::render(
                frame,
                &snapshot,
                settings.engine.grid,
                theme,
                HudInfo { session_best },
            );
        })?;

        if let Some(game_input) = input.poll_input(INPUT_POLL_INTERVAL)? {
            if game_input == GameInput::Quit {
                break;
            }
            handle_input(&mut engine, game_input, &mut last_tick);
        }

        // The engine owns no clock: this loop is the scheduler, and it only
        // ticks while Running, never overlapping two ticks.
        if engine.phase() == Phase::Running && last_tick.elapsed() >= tick_interval {
            let report = engine.tick();
            session_best = session_best.max(report.snapshot.score);
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn handle_input(engine: &mut Engine, input: GameInput, last_tick: &mut Instant) {
    match input {
        GameInput::Confirm if engine.phase() == Phase::Idle => {
            engine.start();
            *last_tick = Instant::now();
        }
        GameInput::Confirm if engine.phase() == Phase::GameOver => {
            engine.restart();
        }
        other => engine.apply_input(other),
    }
}
