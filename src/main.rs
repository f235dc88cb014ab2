//! Ping Pong entry point
//!
//! Runs the terminal game, or a headless computer-vs-computer series.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use ping_pong::audio::{AudioBackend, AudioManager, LogBackend};
use ping_pong::consts::{MAX_SUBSTEPS, SERIES_LENGTHS};
#[cfg(feature = "speaker")]
use ping_pong::platform::SpeakerBackend;
use ping_pong::platform::bell::BELL_THRESHOLD;
use ping_pong::platform::{HeldKeys, InputAction, TerminalBell, map_key};
use ping_pong::renderer::{Terminal, draw};
use ping_pong::sim::{Command, Flow, MatchController, Mode};
use ping_pong::{GameConfig, Settings};

/// Frame pacing for input polling and redraws
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(name = "ping-pong", version, about = "Best-of-N Pong against the computer")]
struct Args {
    /// Play a computer-vs-computer series without a terminal and print the result
    #[arg(long)]
    headless: bool,

    /// Series length for headless mode (3, 5 or 7)
    #[arg(long)]
    best_of: Option<u32>,

    /// RNG seed for serves (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to load (and save sound preference to)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Stop a headless run after this many ticks
    #[arg(long, default_value_t = 1_000_000)]
    max_ticks: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    let seed = args.seed.unwrap_or_else(clock_seed);
    let config = settings.game_config();
    log::info!("Ping Pong starting (seed {})", seed);

    if args.headless {
        run_headless(&args, &settings, config, seed)
    } else {
        run_terminal(&args, settings, config, seed)
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Demo: both paddles computer-driven, one full series
fn run_headless(args: &Args, settings: &Settings, config: GameConfig, seed: u64) -> Result<()> {
    let best_of = match args.best_of {
        Some(n) if SERIES_LENGTHS.contains(&n) => n,
        Some(n) => anyhow::bail!("--best-of must be one of {:?}, got {}", SERIES_LENGTHS, n),
        None => settings.default_best_of,
    };

    let mut mc = MatchController::new(config, seed).context("invalid game configuration")?;
    let mut audio = AudioManager::new(LogBackend::default());
    settings.apply_audio(&mut audio);

    mc.set_autopilot(Some(settings.ai_difficulty));
    mc.start_series(best_of);

    while mc.mode() != Mode::SeriesOver && mc.ticks() < args.max_ticks {
        match mc.mode() {
            Mode::Playing => mc.tick(),
            Mode::GameOver => {
                mc.apply(Command::ContinueGame);
            }
            Mode::Menu | Mode::SeriesOver => break,
        }
        mc.drain_events_into(&mut audio);
    }

    if mc.mode() != Mode::SeriesOver {
        log::warn!("Stopped after {} ticks without a series winner", mc.ticks());
    }
    log::info!("{} sounds played", audio.backend().played);

    println!("{}", serde_json::to_string_pretty(&mc.snapshot())?);
    Ok(())
}

/// Speaker output, or the terminal bell when no device opens
fn open_audio() -> Box<dyn AudioBackend> {
    match open_speaker() {
        Some(speaker) => speaker,
        None => Box::new(TerminalBell::new(io::stdout(), BELL_THRESHOLD)),
    }
}

#[cfg(feature = "speaker")]
fn open_speaker() -> Option<Box<dyn AudioBackend>> {
    match SpeakerBackend::open() {
        Ok(speaker) => {
            log::info!("Audio output opened");
            Some(Box::new(speaker))
        }
        Err(e) => {
            log::warn!("No audio output ({}), using terminal bell", e);
            None
        }
    }
}

#[cfg(not(feature = "speaker"))]
fn open_speaker() -> Option<Box<dyn AudioBackend>> {
    None
}

/// Interactive game in the terminal
fn run_terminal(args: &Args, mut settings: Settings, config: GameConfig, seed: u64) -> Result<()> {
    let tick_dt = config.tick_dt();
    let mut mc = MatchController::new(config, seed).context("invalid game configuration")?;
    let mut audio = AudioManager::new(open_audio());
    settings.apply_audio(&mut audio);

    let mut term = Terminal::enter(io::stdout()).context("failed to set up terminal")?;
    let mut held = HeldKeys::new();
    let mut accumulator = 0.0_f32;
    let mut last = Instant::now();

    'game: loop {
        // Input
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Repeat && mc.mode() != Mode::Playing {
                continue;
            }
            match map_key(mc.mode(), &key) {
                Some(InputAction::Command(command)) => {
                    if mc.apply(command) == Flow::Quit {
                        break 'game;
                    }
                    held.clear();
                }
                Some(InputAction::Paddle(direction, down)) => held.set(direction, down),
                Some(InputAction::ToggleSound) => {
                    settings.sound_enabled = audio.toggle();
                }
                Some(InputAction::Quit) => break 'game,
                None => {}
            }
        }

        // Fixed timestep simulation
        let now = Instant::now();
        accumulator += now.duration_since(last).as_secs_f32().min(0.1);
        last = now;

        let mut substeps = 0;
        while accumulator >= tick_dt && substeps < MAX_SUBSTEPS {
            if let Some(command) = held.next_tick() {
                mc.apply(command);
            }
            mc.tick();
            accumulator -= tick_dt;
            substeps += 1;
        }
        mc.drain_events_into(&mut audio);

        // Render
        let (cols, rows) = term.size()?;
        term.present(&draw(&mc.snapshot(), audio.is_enabled(), cols, rows))?;

        let elapsed = now.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }

    drop(term);
    log::info!("Ping Pong exiting");

    if let Some(path) = &args.settings {
        settings.save_to(path)?;
    }
    Ok(())
}
