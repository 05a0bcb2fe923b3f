//! Terminal runner (default binary).
//!
//! `tilt-blocks [play]` starts a game; `tilt-blocks dump <save-file>` prints a
//! save as JSON. Keyboard arrows stand in for tilting the device.

use std::fs::File;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tilt_blocks::cli::{self, Command, RunConfig};
use tilt_blocks::core::{ActionOutcome, FileStore, GameSnapshot, Session};
use tilt_blocks::input::{handle_key_event, should_quit};
use tilt_blocks::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tilt_blocks::types::GameAction;

const POLL_MS: u64 = 250;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match cli::parse_args(&args)? {
        Command::Dump { path } => {
            println!("{}", cli::dump_file(&path)?);
            Ok(())
        }
        Command::Play => play(),
    }
}

fn play() -> Result<()> {
    let config = RunConfig::from_env()?;
    init_logging(&config)?;

    let store = FileStore::open(&config.save_path, config.store_capacity())
        .with_context(|| format!("cannot open save file {}", config.save_path.display()))?;
    let mut session = Session::new(config.game, store, config.seed)
        .context("cannot read best score from save file")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file only; stderr would draw over the game screen.
fn init_logging(config: &RunConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file =
        File::create(path).with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::info!("seed {}", config.seed);
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut Session<FileStore>) -> Result<()> {
    let mut view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        // A failed best-score write is retried on the next pass.
        let ended = session.has_ended().unwrap_or_else(|e| {
            log::error!("recording best score failed: {}", e);
            true
        });

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        if !event::poll(Duration::from_millis(POLL_MS))? {
            continue;
        }
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            Event::Resize(_, _) => {
                term.invalidate();
                continue;
            }
            _ => continue,
        };

        if should_quit(key) {
            return Ok(());
        }
        let Some(action) = handle_key_event(key) else {
            continue;
        };

        if ended {
            // Finished game: only starting over, loading or help make sense.
            match action {
                GameAction::Activate | GameAction::NewGameRequest => start_new_game(session),
                GameAction::OpenMenu => view.toggle_legend(),
                GameAction::LoadRequest => report(session.apply(action), action),
                _ => {}
            }
            continue;
        }

        match session.apply(action) {
            Ok(ActionOutcome::MenuRequested) => view.toggle_legend(),
            Ok(ActionOutcome::Abandoned) => start_new_game(session),
            other => report(other, action),
        }
    }
}

/// On failure the abandoned game stays on screen and another request retries.
fn start_new_game(session: &mut Session<FileStore>) {
    if let Err(e) = session.new_game() {
        log::error!("new game failed: {}", e);
    }
}

/// Save and load failures are not fatal; the game keeps running.
fn report<E: std::fmt::Display>(result: Result<ActionOutcome, E>, action: GameAction) {
    match result {
        Ok(outcome) => log::debug!("{} -> {:?}", action.as_str(), outcome),
        Err(e) => log::error!("{} failed: {}", action.as_str(), e),
    }
}
