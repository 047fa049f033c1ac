mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use display::TerminalCanvas;
use journey_to_bennu::clock::FrameClock;
use journey_to_bennu::compute::tick;
use journey_to_bennu::input::{is_quit, is_start, HeldKeys};
use journey_to_bennu::render::{render_frame, render_menu};
use journey_to_bennu::{GameConfig, GameContext, GameSession, GameStatus};

const DEFAULT_LOG_FILE: &str = "journey_to_bennu.log";

// ── Startup ───────────────────────────────────────────────────────────────────

/// The terminal is in the alternate screen while we run, so log lines go to
/// a file instead of stderr.
fn init_logging() {
    let path = std::env::var("BENNU_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    if let Ok(file) = File::create(&path) {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
}

fn load_config() -> anyhow::Result<GameConfig> {
    match std::env::var_os("BENNU_CONFIG") {
        Some(path) => GameConfig::load(&PathBuf::from(path)),
        None => Ok(GameConfig::default()),
    }
}

fn pick_seed() -> anyhow::Result<u64> {
    if let Ok(text) = std::env::var("BENNU_SEED") {
        return text
            .trim()
            .parse()
            .with_context(|| format!("BENNU_SEED must be an integer, got {text:?}"));
    }
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?;
    Ok(now.as_nanos() as u64)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    canvas: &mut TerminalCanvas<W>,
    rx: &mpsc::Receiver<Event>,
    ctx: &GameContext,
) -> std::io::Result<MenuResult> {
    render_menu(canvas, ctx)?;

    // Block until the user makes a choice
    loop {
        let Ok(ev) = rx.recv() else {
            return Ok(MenuResult::Quit);
        };
        if is_quit(&ev) {
            return Ok(MenuResult::Quit);
        }
        if is_start(&ev) {
            return Ok(MenuResult::Start);
        }
        if let Event::Resize(..) = ev {
            canvas.resize(&ctx.config)?;
            render_menu(canvas, ctx)?;
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Each frame drains every pending event without blocking, samples the held
/// keys, advances the simulation one tick and paints the result.
fn game_loop<W: Write>(
    canvas: &mut TerminalCanvas<W>,
    rx: &mpsc::Receiver<Event>,
    ctx: &GameContext,
    rng: &mut Pcg32,
) -> std::io::Result<bool> {
    let mut state = GameSession::new(ctx);
    let mut keys = HeldKeys::default();
    let mut clock = FrameClock::new(ctx.config.fps);

    loop {
        let frame = clock.frame();

        loop {
            match rx.try_recv() {
                Ok(ev) => {
                    if is_quit(&ev) {
                        return Ok(true);
                    }
                    if let Event::Resize(..) = ev {
                        canvas.resize(&ctx.config)?;
                    }
                    keys.record(&ev, frame);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(true),
            }
        }

        state = tick(&state, &keys.tick_input(frame), ctx, rng);
        render_frame(canvas, &state, ctx)?;

        if state.status == GameStatus::Finished {
            log::info!("Back to menu: level {}, score {}", state.level, state.score);
            return Ok(false);
        }

        clock.wait();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = load_config()?;
    let seed = pick_seed()?;
    log::info!("Journey to Bennu starting with seed {}", seed);
    let ctx = GameContext::new(config);
    let mut rng = Pcg32::seed_from_u64(seed);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &ctx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    ctx: &GameContext,
    rng: &mut Pcg32,
) -> std::io::Result<()> {
    let mut canvas = TerminalCanvas::new(out, &ctx.config)?;

    loop {
        match show_menu(&mut canvas, rx, ctx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                log::info!("New run");
                if game_loop(&mut canvas, rx, ctx, rng)? {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    log::info!("Quit requested");
    Ok(())
}
