//! Session driver
//!
//! Owns the store, the random stream and the running game, and turns player
//! actions into core calls. Everything is turn-based: each action is fully
//! processed before `apply` returns.

use crate::config::GameConfig;
use crate::error::CodecError;
use crate::game_state::{DeletionOutcome, GameState};
use crate::persistence;
use crate::rng::SimpleRng;
use crate::snapshot::GameSnapshot;
use crate::store::ByteStore;
use crate::types::{GameAction, MoveIntent};

/// What an action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Cursor move; true if the cursor changed cell
    Moved(bool),
    Deleted(DeletionOutcome),
    Saved,
    /// Load request; false when the store held no save
    Loaded(bool),
    /// The running game was given up
    Abandoned,
    /// The caller should show its menu; the game is untouched
    MenuRequested,
}

pub struct Session<S: ByteStore> {
    config: GameConfig,
    store: S,
    rng: SimpleRng,
    state: GameState,
    /// Set once `has_ended` has settled the best score for the current game
    best_recorded: bool,
}

impl<S: ByteStore> Session<S> {
    /// Read the best score from `store` and deal the first grid
    pub fn new(config: GameConfig, store: S, seed: u32) -> Result<Self, CodecError> {
        let best = persistence::load_best_score(&store)?;
        let mut rng = SimpleRng::new(seed);
        let state = GameState::new(&config, &mut rng, best);
        log::info!(
            "session started: {}x{} grid, {} kinds, best {}",
            state.width(),
            state.height(),
            state.block_kinds(),
            best
        );
        Ok(Self {
            config,
            store,
            rng,
            state,
            best_recorded: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Swap in a prepared game, e.g. a hand-built board. The best score on
    /// record is carried over.
    pub fn set_game(&mut self, mut state: GameState) {
        state.set_best_score(state.best_score().max(self.state.best_score()));
        self.state = state;
        self.best_recorded = false;
    }

    pub fn apply(&mut self, action: GameAction) -> Result<ActionOutcome, CodecError> {
        match action {
            GameAction::MoveLeft
            | GameAction::MoveRight
            | GameAction::MoveUp
            | GameAction::MoveDown => {
                let intent = action.move_intent().unwrap_or(MoveIntent::NONE);
                Ok(ActionOutcome::Moved(self.apply_move(intent)))
            }
            GameAction::Activate => Ok(ActionOutcome::Deleted(self.state.activate())),
            GameAction::SaveRequest => {
                self.save()?;
                Ok(ActionOutcome::Saved)
            }
            GameAction::LoadRequest => Ok(ActionOutcome::Loaded(self.load()?)),
            GameAction::NewGameRequest => {
                self.state.abandon();
                Ok(ActionOutcome::Abandoned)
            }
            GameAction::OpenMenu => Ok(ActionOutcome::MenuRequested),
        }
    }

    /// Move along both axes at once (tilt input)
    pub fn apply_move(&mut self, intent: MoveIntent) -> bool {
        self.state.move_cursor(intent)
    }

    /// Whether the current game is over.
    ///
    /// The first call that sees the end stores the score as the new best
    /// score when it beats the old one. Later calls only report. A failed
    /// write leaves the best score pending, and the next call tries again.
    pub fn has_ended(&mut self) -> Result<bool, CodecError> {
        if !self.state.game_ended() {
            return Ok(false);
        }
        if !self.best_recorded {
            let score = self.state.score();
            if score > self.state.best_score() {
                persistence::save_best_score(&mut self.store, score)?;
                self.state.set_best_score(score);
            }
            self.best_recorded = true;
        }
        Ok(true)
    }

    /// Finish the current game and deal a new grid from the same stream
    pub fn new_game(&mut self) -> Result<(), CodecError> {
        self.state.abandon();
        self.has_ended()?;

        let best = self.state.best_score();
        self.state = GameState::new(&self.config, &mut self.rng, best);
        self.best_recorded = false;
        log::info!(
            "new game: {}x{} grid, {} kinds",
            self.state.width(),
            self.state.height(),
            self.state.block_kinds()
        );
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), CodecError> {
        persistence::save_game(&self.state, &mut self.store)
    }

    /// Restore the saved game. Returns false when there is nothing to load;
    /// a corrupt save is an error and the running game stays as it was.
    pub fn load(&mut self) -> Result<bool, CodecError> {
        let saved = match persistence::load_game(&self.store) {
            Ok(Some(saved)) => saved,
            Ok(None) => {
                log::info!("load requested but no save present");
                return Ok(false);
            }
            Err(e) => {
                log::warn!("rejected save: {}", e);
                return Err(e);
            }
        };

        self.state.restore(saved);
        self.best_recorded = false;
        log::info!(
            "loaded {}x{} game, score {}",
            self.state.width(),
            self.state.height(),
            self.state.score()
        );
        Ok(true)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use crate::types::GameOutcome;

    fn session_with(rows: &[&str]) -> Session<MemoryStore> {
        let mut session =
            Session::new(GameConfig::default(), MemoryStore::default(), 7).unwrap();
        session.set_game(GameState::from_board(Board::from_rows(rows), 3, 0));
        session
    }

    #[test]
    fn new_session_reads_best_score() {
        let mut store = MemoryStore::default();
        persistence::save_best_score(&mut store, 12).unwrap();
        let session = Session::new(GameConfig::default(), store, 1).unwrap();
        assert_eq!(session.state().best_score(), 12);
        assert_eq!(session.state().num_blocks(), 96);
    }

    #[test]
    fn menu_request_leaves_game_alone() {
        let mut session = session_with(&["00", "11"]);
        let before = session.state().clone();
        assert_eq!(
            session.apply(GameAction::OpenMenu).unwrap(),
            ActionOutcome::MenuRequested
        );
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn moves_route_to_cursor() {
        let mut session = session_with(&["00", "11"]);
        assert_eq!(
            session.apply(GameAction::MoveLeft).unwrap(),
            ActionOutcome::Moved(false)
        );
        assert_eq!(
            session.apply(GameAction::MoveUp).unwrap(),
            ActionOutcome::Moved(true)
        );
        assert_eq!(session.state().cursor().row, 0);
    }

    #[test]
    fn best_score_saved_once_when_beaten() {
        let mut session = session_with(&["00"]);
        assert!(!session.has_ended().unwrap());

        session.apply(GameAction::Activate).unwrap();
        assert!(session.has_ended().unwrap());
        assert_eq!(session.state().outcome(), Some(GameOutcome::Won));
        assert_eq!(persistence::load_best_score(session.store()).unwrap(), 2);
        let commits = session.store().commits();

        assert!(session.has_ended().unwrap());
        assert_eq!(session.store().commits(), commits);
    }

    /// Memory store whose commits fail while `full` is set
    #[derive(Default)]
    struct DiskFullStore {
        inner: MemoryStore,
        full: bool,
        attempts: usize,
    }

    impl ByteStore for DiskFullStore {
        fn capacity(&self) -> usize {
            self.inner.capacity()
        }

        fn read_byte(&self, addr: usize) -> Result<u8, StoreError> {
            self.inner.read_byte(addr)
        }

        fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), StoreError> {
            self.inner.write_byte(addr, value)
        }

        fn commit(&mut self) -> Result<(), StoreError> {
            self.attempts += 1;
            if self.full {
                return Err(std::io::Error::other("disk full").into());
            }
            self.inner.commit()
        }
    }

    #[test]
    fn failed_best_score_write_is_retried() {
        let mut session =
            Session::new(GameConfig::default(), DiskFullStore::default(), 7).unwrap();
        session.set_game(GameState::from_board(Board::from_rows(&["00"]), 3, 0));
        session.store.full = true;

        session.apply(GameAction::Activate).unwrap();
        assert!(session.has_ended().is_err());
        assert_eq!(session.state().best_score(), 0);
        assert!(session.has_ended().is_err());
        assert_eq!(session.store().attempts, 2);

        session.store.full = false;
        assert!(session.has_ended().unwrap());
        assert_eq!(session.state().best_score(), 2);
        assert_eq!(persistence::load_best_score(session.store()).unwrap(), 2);

        assert!(session.has_ended().unwrap());
        assert_eq!(session.store().attempts, 3);
    }

    #[test]
    fn new_game_waits_for_best_score_write() {
        let mut session =
            Session::new(GameConfig::default(), DiskFullStore::default(), 7).unwrap();
        session.set_game(GameState::from_board(Board::from_rows(&["00", "11"]), 3, 0));
        session.apply(GameAction::Activate).unwrap();
        session.store.full = true;

        assert!(session.new_game().is_err());
        assert_eq!(session.state().num_blocks(), 2);

        session.store.full = false;
        session.new_game().unwrap();
        assert_eq!(session.state().num_blocks(), 96);
        assert_eq!(session.state().best_score(), 2);
    }

    #[test]
    fn lower_score_does_not_touch_best() {
        let mut store = MemoryStore::default();
        persistence::save_best_score(&mut store, 50).unwrap();
        let mut session = Session::new(GameConfig::default(), store, 3).unwrap();
        session.set_game(GameState::from_board(Board::from_rows(&["00"]), 3, 0));

        session.apply(GameAction::Activate).unwrap();
        assert!(session.has_ended().unwrap());
        assert_eq!(session.state().best_score(), 50);
        assert_eq!(session.store().commits(), 1);
    }

    #[test]
    fn new_game_request_abandons() {
        let mut session = session_with(&["00", "11"]);
        assert_eq!(
            session.apply(GameAction::NewGameRequest).unwrap(),
            ActionOutcome::Abandoned
        );
        assert!(session.has_ended().unwrap());
        assert_eq!(session.snapshot().banner.as_deref(), Some("NEW GAME"));
    }

    #[test]
    fn new_game_deals_fresh_grid() {
        let mut session = session_with(&["00", "11"]);
        session.new_game().unwrap();
        assert_eq!(session.state().num_blocks(), 96);
        assert_eq!(session.state().width(), 16);
        assert_eq!(session.state().score(), 0);
    }

    #[test]
    fn load_without_save_is_noop() {
        let mut session = session_with(&["00", "11"]);
        let before = session.state().clone();
        assert_eq!(
            session.apply(GameAction::LoadRequest).unwrap(),
            ActionOutcome::Loaded(false)
        );
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn save_then_load_restores_game() {
        let mut session = session_with(&["001", "112"]);
        session.apply(GameAction::SaveRequest).unwrap();
        let saved = session.state().board().clone();

        session.apply(GameAction::MoveUp).unwrap();
        session.apply(GameAction::Activate).unwrap();
        assert_ne!(session.state().board(), &saved);

        assert_eq!(
            session.apply(GameAction::LoadRequest).unwrap(),
            ActionOutcome::Loaded(true)
        );
        assert_eq!(session.state().board(), &saved);
        assert_eq!(session.state().score(), 0);
        assert_eq!(session.state().num_blocks(), 6);
    }
}
