//! Terminal fifteen-puzzle runner (default binary).
//!
//! Wires the session state machine to a JSON-file store, a crossterm event
//! loop, and the board renderer. Configuration comes from the environment
//! (`FIFTEEN_DATA_DIR`, `FIFTEEN_USER`, `FIFTEEN_SEED`); logs go to a file
//! in the data directory so they never fight the alternate screen.

use std::fs::File;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use tui_fifteen::core::Shuffler;
use tui_fifteen::input::{handle_key_event, should_quit, UiAction};
use tui_fifteen::session::GameSession;
use tui_fifteen::store::{DetachedStore, JsonStore, SnapshotStore, StatsSink, StoreConfig};
use tui_fifteen::term::{Screen, ViewState};
use tui_fifteen::types::{Pos, PuzzleId, BOARD_SIDE};

const TICK: Duration = Duration::from_millis(50);
const LOG_FILE: &str = "fifteen.log";

fn main() -> Result<()> {
    let config = StoreConfig::from_env();

    let json = JsonStore::open(&config.data_dir)?;
    init_logging(&json)?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        user = config.user.as_str(),
        "starting"
    );

    let detached = Arc::new(DetachedStore::new(
        Arc::new(json.clone()) as Arc<dyn SnapshotStore>,
        Arc::new(json) as Arc<dyn StatsSink>,
    )?);

    let mut session = GameSession::new(
        config.user.clone(),
        PuzzleId("numbers".into()),
        detached.clone() as Arc<dyn SnapshotStore>,
        detached as Arc<dyn StatsSink>,
    );

    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut shuffler = Shuffler::new(seed);

    if !session.try_resume() {
        session.shuffle(&mut shuffler);
    }

    let mut screen = Screen::new();
    screen.enter()?;
    let result = run(&mut screen, &mut session, &mut shuffler);

    // Always try to restore terminal state.
    let _ = screen.exit();
    result
}

fn run(screen: &mut Screen, session: &mut GameSession, shuffler: &mut Shuffler) -> Result<()> {
    let start = Instant::now();
    let mut cursor = Pos::new(0, 0);
    let mut last_tick = Instant::now();

    loop {
        let state = ViewState {
            board: session.board(),
            cursor,
            status: session.status(),
            move_count: session.move_count(),
            elapsed_seconds: session.elapsed_seconds(),
            resumed: session.resumed(),
            stats_saved: session.stats_saved(),
            move_in_flight: session.move_in_flight(),
        };
        screen.draw(&state)?;

        // Input with timeout until next tick.
        let timeout = TICK
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        session.discard_and_exit();
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(UiAction::CursorUp) => {
                            cursor = Pos::new(cursor.row.saturating_sub(1), cursor.col);
                        }
                        Some(UiAction::CursorDown) => {
                            cursor = Pos::new((cursor.row + 1).min(BOARD_SIDE - 1), cursor.col);
                        }
                        Some(UiAction::CursorLeft) => {
                            cursor = Pos::new(cursor.row, cursor.col.saturating_sub(1));
                        }
                        Some(UiAction::CursorRight) => {
                            cursor = Pos::new(cursor.row, (cursor.col + 1).min(BOARD_SIDE - 1));
                        }
                        Some(UiAction::Push) => {
                            session.request_move(cursor, start.elapsed().as_millis() as u64);
                        }
                        Some(UiAction::NewGame) => {
                            session.shuffle(shuffler);
                        }
                        Some(UiAction::SaveQuit) => {
                            session.request_exit_save();
                            return Ok(());
                        }
                        Some(UiAction::DiscardQuit) => {
                            session.discard_and_exit();
                            return Ok(());
                        }
                        None => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= TICK {
            last_tick = Instant::now();
            session.tick(start.elapsed().as_millis() as u64);
        }
    }
}

fn init_logging(store: &JsonStore) -> Result<()> {
    let path = store.dir().join(LOG_FILE);
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0x5eed)
}
