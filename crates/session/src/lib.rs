//! Session lifecycle - the state machine around a play session.
//!
//! States run Idle -> Playing -> Solved. The session owns the move counter,
//! the elapsed-time clock, and the in-flight-move exclusion; the board, the
//! move rules, and the stores are collaborators.
//!
//! Time is supplied by the caller as a monotonic millisecond value. The
//! clock is anchored: delivering the same instant twice adds nothing, so an
//! aggressively rescheduled ticker cannot double-count seconds.
//!
//! An accepted move does not mutate the board immediately. The result is
//! parked in a pending-move token carrying the visual settle deadline; until
//! the token resolves every further request is rejected outright, which is
//! the only synchronization this single-threaded core needs. Tests resolve
//! the token deterministically via [`GameSession::settle_now`].
//!
//! Durability is strictly fire-and-forget from the state machine's point of
//! view: every store failure is logged here at the boundary and never
//! reaches the in-memory transition that already happened.

use std::sync::Arc;

use tracing::{info, warn};

use tui_fifteen_core::{Board, Shuffler};
use tui_fifteen_engine::{apply, MoveApplied, SlideMove};
use tui_fifteen_store::{SnapshotStore, StatsSink};
use tui_fifteen_types::{
    Pos, PuzzleId, SavedState, SessionStatus, StatsRecord, UserId, CLOCK_SECOND_MS,
};

/// Notification fired when a move is accepted (the seam where the front end
/// hangs its tile sound). Deliberately a plain callback: the session never
/// reaches into ambient audio or theme state.
pub type MoveListener = Box<dyn FnMut(&SlideMove) + Send>;

/// Outcome of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Move accepted and parked; the board commits after `settle_ms`.
    Accepted { settle_ms: u32 },
    /// A previous move has not settled yet.
    RejectedInFlight,
    /// The cell is not move-eligible (the hole, or off-line).
    RejectedIneligible,
    /// Session is not in the Playing state.
    RejectedNotPlaying,
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted { .. })
    }
}

/// An accepted move awaiting its settle deadline.
#[derive(Debug)]
struct PendingMove {
    applied: MoveApplied,
    deadline_ms: u64,
}

/// A play session for one (user, puzzle) pair.
pub struct GameSession {
    user: UserId,
    puzzle: PuzzleId,
    board: Board,
    status: SessionStatus,
    move_count: u32,
    elapsed_seconds: u32,
    /// Millisecond instant at which `elapsed_seconds` was last advanced.
    clock_anchor_ms: Option<u64>,
    pending: Option<PendingMove>,
    /// Whether this run was restored from a snapshot.
    resumed: bool,
    /// Moves made since the last successful save.
    unsaved_moves: bool,
    /// None until solved; then whether the stats write was accepted.
    stats_saved: Option<bool>,
    snapshots: Arc<dyn SnapshotStore>,
    stats: Arc<dyn StatsSink>,
    on_move: Option<MoveListener>,
}

impl GameSession {
    pub fn new(
        user: UserId,
        puzzle: PuzzleId,
        snapshots: Arc<dyn SnapshotStore>,
        stats: Arc<dyn StatsSink>,
    ) -> Self {
        Self {
            user,
            puzzle,
            board: Board::solved(),
            status: SessionStatus::Idle,
            move_count: 0,
            elapsed_seconds: 0,
            clock_anchor_ms: None,
            pending: None,
            resumed: false,
            unsaved_moves: false,
            stats_saved: None,
            snapshots,
            stats,
            on_move: None,
        }
    }

    /// Register the on-move notification callback.
    pub fn set_move_listener(&mut self, listener: MoveListener) {
        self.on_move = Some(listener);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn resumed(&self) -> bool {
        self.resumed
    }

    pub fn has_unsaved_moves(&self) -> bool {
        self.unsaved_moves
    }

    /// Whether an accepted move is still settling.
    pub fn move_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// None until the run is solved; afterwards, whether the completion
    /// stats write was accepted (drives the "not saved" indicator).
    pub fn stats_saved(&self) -> Option<bool> {
        self.stats_saved
    }

    /// Begin a fresh run on `board`. Idle/Solved -> Playing; counters reset.
    /// A no-op while a run is already in progress.
    pub fn start(&mut self, board: Board) {
        if self.status == SessionStatus::Playing {
            return;
        }
        self.board = board;
        self.status = SessionStatus::Playing;
        self.move_count = 0;
        self.elapsed_seconds = 0;
        self.clock_anchor_ms = None;
        self.pending = None;
        self.resumed = false;
        self.unsaved_moves = false;
        self.stats_saved = None;
    }

    /// Try to restore a prior run from the snapshot store.
    ///
    /// Returns true and enters Playing with the restored counters if an
    /// active, structurally valid snapshot exists. Load failures are
    /// absorbed: the session stays Idle and the player starts fresh.
    pub fn try_resume(&mut self) -> bool {
        let saved = match self.snapshots.load(&self.user, &self.puzzle) {
            Ok(saved) => saved,
            Err(err) => {
                warn!(puzzle = self.puzzle.as_str(), %err, "snapshot load failed");
                return false;
            }
        };
        let Some(saved) = saved else {
            return false;
        };
        self.resume(saved)
    }

    /// Restore a specific snapshot. Rejects grids that are not a
    /// permutation of 0-15 or whose empty position disagrees with the grid.
    pub fn resume(&mut self, saved: SavedState) -> bool {
        let Some(board) = Board::from_grid(saved.grid) else {
            warn!(puzzle = self.puzzle.as_str(), "discarding corrupt snapshot");
            return false;
        };
        if board.empty_pos() != saved.empty {
            warn!(puzzle = self.puzzle.as_str(), "discarding corrupt snapshot");
            return false;
        }

        self.board = board;
        self.status = SessionStatus::Playing;
        self.move_count = saved.move_count;
        self.elapsed_seconds = saved.elapsed_seconds;
        self.clock_anchor_ms = None;
        self.pending = None;
        self.resumed = true;
        self.unsaved_moves = false;
        self.stats_saved = None;
        true
    }

    /// Start a new run with a freshly generated board, discarding any prior
    /// snapshot for this puzzle. Valid from every state.
    pub fn shuffle(&mut self, shuffler: &mut Shuffler) {
        if let Err(err) = self.snapshots.invalidate(&self.user, &self.puzzle) {
            warn!(puzzle = self.puzzle.as_str(), %err, "snapshot invalidate failed");
        }

        let (board, retries) = shuffler.generate_traced();
        if retries > 0 {
            // Must be statistically unreachable; a hit means the legal-walk
            // invariant was broken by a refactor.
            warn!(retries, "shuffle produced an unsolvable board, regenerated");
        }

        self.status = SessionStatus::Idle; // force the reset in start()
        self.start(board);
    }

    /// Advance the session clock and resolve a due pending move.
    ///
    /// `now_ms` is any monotonic millisecond reading. Idempotent per
    /// instant: re-delivery of the same `now_ms` changes nothing.
    pub fn tick(&mut self, now_ms: u64) {
        if self.status != SessionStatus::Playing {
            return;
        }

        let anchor = *self.clock_anchor_ms.get_or_insert(now_ms);
        if now_ms > anchor {
            let whole_seconds = (now_ms - anchor) / CLOCK_SECOND_MS;
            if whole_seconds > 0 {
                self.elapsed_seconds += whole_seconds as u32;
                self.clock_anchor_ms = Some(anchor + whole_seconds * CLOCK_SECOND_MS);
            }
        }

        if self
            .pending
            .as_ref()
            .is_some_and(|p| now_ms >= p.deadline_ms)
        {
            self.settle_now();
        }
    }

    /// Request the move for a clicked cell.
    ///
    /// Accepted moves are parked until their settle deadline (driven by
    /// [`tick`](Self::tick)); everything else is a silent no-op. Exactly one
    /// move can be in flight.
    pub fn request_move(&mut self, cell: Pos, now_ms: u64) -> MoveOutcome {
        if self.status != SessionStatus::Playing {
            return MoveOutcome::RejectedNotPlaying;
        }
        if self.pending.is_some() {
            return MoveOutcome::RejectedInFlight;
        }

        let Some(applied) = apply(&self.board, cell) else {
            return MoveOutcome::RejectedIneligible;
        };

        if let Some(listener) = self.on_move.as_mut() {
            listener(&applied.mv);
        }

        let settle_ms = applied.mv.settle_ms();
        self.pending = Some(PendingMove {
            applied,
            deadline_ms: now_ms + settle_ms as u64,
        });
        MoveOutcome::Accepted { settle_ms }
    }

    /// Resolve the pending move immediately, committing the board.
    ///
    /// Normally driven by [`tick`](Self::tick) once the settle deadline
    /// passes; exposed so tests and shutdown paths can settle without
    /// real delay.
    pub fn settle_now(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        self.board = pending.applied.board;
        self.move_count += 1;
        self.unsaved_moves = true;

        if pending.applied.solved {
            self.finish_run();
        }
    }

    /// Solved transition: freeze the counters and report the outcome.
    fn finish_run(&mut self) {
        self.status = SessionStatus::Solved;
        self.unsaved_moves = false;

        // The finalized counters are passed explicitly on every solving
        // path; recording must never observe a stale pair.
        let record = StatsRecord {
            user: self.user.clone(),
            puzzle: self.puzzle.clone(),
            move_count: self.move_count,
            elapsed_seconds: self.elapsed_seconds,
        };
        let saved = match self.stats.record(&record) {
            Ok(()) => true,
            Err(err) => {
                warn!(puzzle = self.puzzle.as_str(), %err, "stats record failed");
                false
            }
        };
        self.stats_saved = Some(saved);

        // A live snapshot would resume a pre-solve position; retire it.
        if let Err(err) = self.snapshots.invalidate(&self.user, &self.puzzle) {
            warn!(puzzle = self.puzzle.as_str(), %err, "snapshot invalidate failed");
        }

        info!(
            puzzle = self.puzzle.as_str(),
            moves = self.move_count,
            seconds = self.elapsed_seconds,
            "puzzle solved"
        );
    }

    /// Snapshot of the current settled state.
    pub fn saved_state(&self) -> SavedState {
        SavedState {
            grid: *self.board.grid(),
            empty: self.board.empty_pos(),
            move_count: self.move_count,
            elapsed_seconds: self.elapsed_seconds,
        }
    }

    /// Persist the session for a later resume. Only meaningful while
    /// Playing with unsaved moves; returns whether the store accepted the
    /// write. An unsettled move is dropped, exactly as if the player had
    /// navigated away mid-animation.
    pub fn request_exit_save(&mut self) -> bool {
        if self.status != SessionStatus::Playing || !self.unsaved_moves {
            return false;
        }
        self.pending = None;

        match self
            .snapshots
            .save(&self.user, &self.puzzle, &self.saved_state())
        {
            Ok(()) => {
                self.unsaved_moves = false;
                true
            }
            Err(err) => {
                warn!(puzzle = self.puzzle.as_str(), %err, "snapshot save failed");
                false
            }
        }
    }

    /// Leave without persisting; pending work is discarded.
    pub fn discard_and_exit(&mut self) {
        self.pending = None;
        self.unsaved_moves = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_fifteen_store::{MemoryStats, MemoryStore};

    fn session_with_stores() -> (GameSession, Arc<MemoryStore>, Arc<MemoryStats>) {
        let store = Arc::new(MemoryStore::new());
        let stats = Arc::new(MemoryStats::new());
        let session = GameSession::new(
            UserId("alice".into()),
            PuzzleId("numbers".into()),
            store.clone(),
            stats.clone(),
        );
        (session, store, stats)
    }

    /// Board one single-tile move away from solved: click (3,3) to finish.
    fn near_solved() -> Board {
        Board::solved().with_tile_into_empty(Pos::new(3, 2))
    }

    fn play_move(session: &mut GameSession, cell: Pos, now_ms: u64) {
        assert!(session.request_move(cell, now_ms).is_accepted());
        session.settle_now();
    }

    #[test]
    fn test_new_session_is_idle() {
        let (session, _, _) = session_with_stores();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.elapsed_seconds(), 0);
        assert!(!session.move_in_flight());
        assert!(session.board().is_solved());
    }

    #[test]
    fn test_move_rejected_while_idle() {
        let (mut session, _, _) = session_with_stores();
        let outcome = session.request_move(Pos::new(3, 2), 0);
        assert_eq!(outcome, MoveOutcome::RejectedNotPlaying);
    }

    #[test]
    fn test_accepted_move_commits_after_settle() {
        let (mut session, _, _) = session_with_stores();
        session.start(near_solved());

        let outcome = session.request_move(Pos::new(3, 1), 0);
        assert!(outcome.is_accepted());
        assert!(session.move_in_flight());
        // Board unchanged until the token resolves.
        assert_eq!(session.board(), &near_solved());
        assert_eq!(session.move_count(), 0);

        session.settle_now();
        assert!(!session.move_in_flight());
        assert_eq!(session.move_count(), 1);
        assert_eq!(session.board().empty_pos(), Pos::new(3, 1));
    }

    #[test]
    fn test_second_request_rejected_while_in_flight() {
        let (mut session, _, _) = session_with_stores();
        session.start(near_solved());

        assert!(session.request_move(Pos::new(3, 1), 0).is_accepted());
        let board_before = *session.board();

        let outcome = session.request_move(Pos::new(2, 2), 0);
        assert_eq!(outcome, MoveOutcome::RejectedInFlight);
        assert_eq!(session.board(), &board_before);
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_tick_resolves_due_pending_move() {
        let (mut session, _, _) = session_with_stores();
        session.start(near_solved());

        let MoveOutcome::Accepted { settle_ms } = session.request_move(Pos::new(3, 1), 1000)
        else {
            panic!("move not accepted");
        };

        session.tick(1000 + settle_ms as u64 - 1);
        assert!(session.move_in_flight());

        session.tick(1000 + settle_ms as u64);
        assert!(!session.move_in_flight());
        assert_eq!(session.move_count(), 1);
    }

    #[test]
    fn test_ineligible_cell_is_silent_noop() {
        let (mut session, _, _) = session_with_stores();
        session.start(near_solved());

        // (3,2) is the hole; (0,1) is off-line from it.
        assert_eq!(
            session.request_move(Pos::new(3, 2), 0),
            MoveOutcome::RejectedIneligible
        );
        assert_eq!(
            session.request_move(Pos::new(0, 1), 0),
            MoveOutcome::RejectedIneligible
        );
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_move_count_is_one_per_accepted_move() {
        let (mut session, _, _) = session_with_stores();
        session.start(near_solved());

        // Two singles walking the hole left, then a two-tile slide back.
        play_move(&mut session, Pos::new(3, 1), 0);
        play_move(&mut session, Pos::new(3, 0), 0);
        play_move(&mut session, Pos::new(3, 2), 0);

        assert_eq!(session.move_count(), 3);
        assert_eq!(session.board().empty_pos(), Pos::new(3, 2));
        assert_eq!(session.status(), SessionStatus::Playing);
    }

    #[test]
    fn test_move_and_inverse_count_two() {
        let (mut session, _, _) = session_with_stores();
        session.start(near_solved());
        let initial = *session.board();

        play_move(&mut session, Pos::new(3, 1), 0);
        play_move(&mut session, Pos::new(3, 2), 0);

        assert_eq!(session.board(), &initial);
        assert_eq!(session.move_count(), 2);
    }

    #[test]
    fn test_clock_is_idempotent_per_instant() {
        let (mut session, _, _) = session_with_stores();
        session.start(near_solved());

        session.tick(5000);
        assert_eq!(session.elapsed_seconds(), 0);

        session.tick(8000);
        session.tick(8000);
        session.tick(8000);
        assert_eq!(session.elapsed_seconds(), 3);

        session.tick(8999);
        assert_eq!(session.elapsed_seconds(), 3);
        session.tick(9000);
        assert_eq!(session.elapsed_seconds(), 4);
    }

    #[test]
    fn test_clock_stops_outside_playing() {
        let (mut session, _, _) = session_with_stores();
        session.tick(1000);
        session.tick(99_000);
        assert_eq!(session.elapsed_seconds(), 0);
    }

    #[test]
    fn test_solving_move_freezes_and_records_stats() {
        let (mut session, _, stats) = session_with_stores();
        session.start(near_solved());
        session.tick(0);
        session.tick(7000); // 7 elapsed seconds

        play_move(&mut session, Pos::new(3, 3), 7000);

        assert_eq!(session.status(), SessionStatus::Solved);
        assert_eq!(session.stats_saved(), Some(true));

        let records = stats.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].move_count, 1);
        assert_eq!(records[0].elapsed_seconds, 7);

        // Frozen: clock and moves are dead after the solve.
        session.tick(60_000);
        assert_eq!(session.elapsed_seconds(), 7);
        assert_eq!(
            session.request_move(Pos::new(3, 2), 60_000),
            MoveOutcome::RejectedNotPlaying
        );
    }

    #[test]
    fn test_stats_recorded_exactly_once() {
        let (mut session, _, stats) = session_with_stores();
        session.start(near_solved());
        play_move(&mut session, Pos::new(3, 3), 0);

        // Extra settles must not re-report.
        session.settle_now();
        session.settle_now();
        assert_eq!(stats.records().len(), 1);
    }

    #[test]
    fn test_shuffle_from_solved_resets_and_invalidates() {
        let (mut session, store, _) = session_with_stores();
        let (user, puzzle) = (UserId("alice".into()), PuzzleId("numbers".into()));

        // Leave a snapshot behind, then solve.
        session.start(near_solved());
        session.tick(0);
        session.tick(3000);
        assert!(!session.request_exit_save()); // nothing unsaved yet
        play_move(&mut session, Pos::new(3, 3), 3000);
        assert_eq!(session.status(), SessionStatus::Solved);

        // Plant a stale active snapshot to prove shuffle retires it.
        store
            .save(&user, &puzzle, &session.saved_state())
            .unwrap();
        assert!(store.has_active(&user, &puzzle));

        let mut shuffler = Shuffler::new(7);
        session.shuffle(&mut shuffler);

        assert_eq!(session.status(), SessionStatus::Playing);
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.elapsed_seconds(), 0);
        assert!(!store.has_active(&user, &puzzle));
        assert!(!session.board().is_solved());
    }

    #[test]
    fn test_exit_save_and_resume_roundtrip() {
        let (mut session, store, stats) = session_with_stores();
        session.start(near_solved());
        session.tick(0);
        session.tick(12_000);

        play_move(&mut session, Pos::new(3, 1), 12_000);
        assert!(session.has_unsaved_moves());
        assert!(session.request_exit_save());
        assert!(!session.has_unsaved_moves());

        let mut restored = GameSession::new(
            UserId("alice".into()),
            PuzzleId("numbers".into()),
            store,
            stats,
        );
        assert!(restored.try_resume());
        assert!(restored.resumed());
        assert_eq!(restored.status(), SessionStatus::Playing);
        assert_eq!(restored.move_count(), 1);
        assert_eq!(restored.elapsed_seconds(), 12);
        assert_eq!(restored.board(), session.board());
    }

    #[test]
    fn test_resume_rejects_corrupt_snapshot() {
        let (mut session, _, _) = session_with_stores();

        let mut saved = SavedState {
            grid: *Board::solved().grid(),
            empty: Pos::new(3, 3),
            move_count: 2,
            elapsed_seconds: 2,
        };
        saved.grid[0][0] = 3; // duplicate tile
        assert!(!session.resume(saved));
        assert_eq!(session.status(), SessionStatus::Idle);

        // Empty-position disagreement is also rejected.
        let saved = SavedState {
            grid: *Board::solved().grid(),
            empty: Pos::new(0, 0),
            move_count: 2,
            elapsed_seconds: 2,
        };
        assert!(!session.resume(saved));
    }

    #[test]
    fn test_discard_and_exit_drops_pending_work() {
        let (mut session, store, _) = session_with_stores();
        session.start(near_solved());
        play_move(&mut session, Pos::new(3, 1), 0);

        session.discard_and_exit();
        assert!(!session.has_unsaved_moves());
        assert!(!store.has_active(&UserId("alice".into()), &PuzzleId("numbers".into())));
    }

    #[test]
    fn test_move_listener_fires_on_acceptance_only() {
        let (mut session, _, _) = session_with_stores();
        session.start(near_solved());

        let hits = Arc::new(std::sync::Mutex::new(0u32));
        let hits_in = hits.clone();
        session.set_move_listener(Box::new(move |_mv| {
            *hits_in.lock().unwrap() += 1;
        }));

        session.request_move(Pos::new(3, 2), 0); // the hole: rejected
        assert_eq!(*hits.lock().unwrap(), 0);

        assert!(session.request_move(Pos::new(3, 1), 0).is_accepted());
        assert_eq!(*hits.lock().unwrap(), 1);
    }
}
