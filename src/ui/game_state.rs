//! Game state management for the Reversi GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::{AppConfig, PlayMode};
use crate::error::RuleViolation;
use crate::game::{Game, GameOutcome};
use crate::rules::legal_moves;
use crate::{AIEngine, MoveResult, Pos, Side};

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub game: Game,
    pub mode: PlayMode,
    pub outcome: Option<GameOutcome>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub message: Option<String>,

    config: AppConfig,
    /// Earliest time the next AI move may start (watch mode pacing)
    ai_ready_at: Option<Instant>,
}

impl GameState {
    pub fn new(config: AppConfig) -> Self {
        let mode = config.ui.mode;
        Self::with_mode(config, mode)
    }

    pub fn with_mode(config: AppConfig, mode: PlayMode) -> Self {
        Self {
            game: Game::new(),
            mode,
            outcome: None,
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            message: None,
            config,
            ai_ready_at: None,
        }
    }

    /// Start over, keeping the mode
    pub fn reset(&mut self) {
        self.game = Game::new();
        self.outcome = None;
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.message = None;
        self.ai_ready_at = None;
    }

    /// Start over in another mode
    pub fn set_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
        self.reset();
    }

    #[inline]
    pub fn to_move(&self) -> Side {
        self.game.to_move()
    }

    pub fn engine_name(&self, side: Side) -> &str {
        &self.config.engine(side).name
    }

    pub fn is_human_turn(&self) -> bool {
        self.mode.human_side() == Some(self.game.to_move())
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.is_human_turn()
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Legal moves for the side to move, empty once the game is over
    pub fn legal_moves(&self) -> Vec<Pos> {
        if self.is_over() {
            return Vec::new();
        }
        legal_moves(self.game.board(), self.game.to_move())
    }

    /// Human places a disc
    pub fn try_play(&mut self, pos: Pos) -> Result<(), String> {
        if self.is_over() {
            return Err(RuleViolation::GameOver.to_string());
        }

        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }

        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        let side = self.game.to_move();
        self.game.play(pos).map_err(|e| e.to_string())?;
        info!(%side, %pos, "human move");
        self.message = None;
        self.after_turn();
        Ok(())
    }

    /// Settle passes and the end of the game after a move or an undo
    fn after_turn(&mut self) {
        // One pass at most: if the opponent were stuck too the game would be over
        if self.game.must_pass() {
            let side = self.game.to_move();
            if self.game.pass().is_ok() {
                info!(%side, "no legal move, passing");
                self.message = Some(format!("{side} has no legal move and passes"));
            }
        }

        if self.game.is_over() {
            let outcome = self.game.outcome();
            info!(
                black = outcome.black_discs,
                white = outcome.white_discs,
                winner = ?outcome.winner,
                "game over"
            );
            self.outcome = Some(outcome);
            return;
        }

        if self.mode == PlayMode::Watch {
            self.ai_ready_at = Some(Instant::now() + Duration::from_millis(self.config.ui.ai_move_delay_ms));
        }
        self.move_timer.start();
    }

    /// Time left before the next AI move may start
    pub fn ai_delay_remaining(&self) -> Option<Duration> {
        self.ai_ready_at
            .map(|t| t.saturating_duration_since(Instant::now()))
            .filter(|d| !d.is_zero())
    }

    /// Start AI thinking on a background thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.is_over() {
            return;
        }
        if self.ai_delay_remaining().is_some() {
            return;
        }

        let board = *self.game.board();
        let side = self.game.to_move();
        let config = self.config.engine(side).clone();
        debug!(%side, engine = %config.name, depth = config.depth, "AI thinking");

        let (tx, rx) = channel();

        thread::spawn(move || {
            let mut engine = AIEngine::with_config(config);
            let result = engine.get_move_with_stats(&board, side);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.move_timer.set_ai_time(elapsed);
            self.apply_ai_result(move_result);
        }
    }

    fn apply_ai_result(&mut self, result: MoveResult) {
        let side = self.game.to_move();
        let played = match result.best_move {
            Some(pos) => self.game.play(pos).map(|()| pos),
            None => Err(RuleViolation::NoMoveChosen { side }),
        };
        self.last_ai_result = Some(result);

        match played {
            Ok(pos) => {
                info!(%side, %pos, engine = self.engine_name(side), "AI move");
                self.message = None;
                self.after_turn();
            }
            Err(violation) => {
                warn!(%side, "{violation}");
                self.message = Some(format!("{violation}; {side} forfeits"));
                self.outcome = Some(self.game.forfeit(violation));
            }
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Undo last move. Against the AI this goes back to the last turn where
    /// the human had a move to make, skipping forced passes.
    pub fn undo(&mut self) {
        if self.game.turns().is_empty() || self.is_ai_thinking() {
            return;
        }

        self.game.undo();
        if self.mode != PlayMode::Watch {
            while (!self.is_human_turn() || self.game.must_pass()) && self.game.undo().is_some() {}
        }

        self.outcome = None;
        self.message = None;
        self.ai_ready_at = None;
        self.after_turn();
    }
}
