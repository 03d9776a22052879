//! Game driver: turn order, passes, forfeits and the final tally
//!
//! [`Game`] holds the position and checks every move against the rules.
//! [`play_match`] runs two [`Strategy`] values against each other until
//! neither side can move or one of them breaks the rules.

use tracing::{info, warn};

use crate::board::{Board, Pos, Side};
use crate::engine::Strategy;
use crate::error::RuleViolation;
use crate::rules::{apply_move, disc_count, has_legal_move, is_game_over, is_legal, winner};

/// One entry of the game record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Move { side: Side, pos: Pos },
    Pass { side: Side },
}

impl Turn {
    pub fn side(self) -> Side {
        match self {
            Turn::Move { side, .. } | Turn::Pass { side } => side,
        }
    }
}

/// Why a match ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndReason {
    /// Neither side had a legal move
    NoMovesLeft,
    /// `side` broke the rules and loses
    Forfeit { side: Side, violation: RuleViolation },
}

/// Final result of a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub board: Board,
    pub black_discs: u32,
    pub white_discs: u32,
    /// `None` on a draw
    pub winner: Option<Side>,
    pub reason: EndReason,
    pub turns: Vec<Turn>,
}

/// Game in progress
#[derive(Debug, Clone)]
pub struct Game {
    start: Board,
    start_side: Side,
    board: Board,
    to_move: Side,
    turns: Vec<Turn>,
}

impl Game {
    /// Standard starting position, Black to move
    pub fn new() -> Self {
        Self::from_position(Board::new(), Side::Black)
    }

    /// Start from an arbitrary position
    pub fn from_position(board: Board, to_move: Side) -> Self {
        Self {
            start: board,
            start_side: to_move,
            board,
            to_move,
            turns: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    #[inline]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Last disc placed, ignoring passes
    pub fn last_move(&self) -> Option<Pos> {
        self.turns.iter().rev().find_map(|turn| match *turn {
            Turn::Move { pos, .. } => Some(pos),
            Turn::Pass { .. } => None,
        })
    }

    /// Neither side can move
    #[inline]
    pub fn is_over(&self) -> bool {
        is_game_over(&self.board)
    }

    /// The side to move has no legal move but the game goes on
    pub fn must_pass(&self) -> bool {
        !has_legal_move(&self.board, self.to_move) && !self.is_over()
    }

    /// Place a disc for the side to move.
    pub fn play(&mut self, pos: Pos) -> Result<(), RuleViolation> {
        if self.is_over() {
            return Err(RuleViolation::GameOver);
        }
        let side = self.to_move;
        if !Pos::is_valid(pos.row as i32, pos.col as i32) || !is_legal(&self.board, side, pos) {
            return Err(RuleViolation::IllegalMove { side, pos });
        }
        self.board = apply_move(&self.board, side, pos);
        self.turns.push(Turn::Move { side, pos });
        self.to_move = side.opponent();
        Ok(())
    }

    /// Skip the turn of the side to move. Only allowed without legal moves.
    pub fn pass(&mut self) -> Result<(), RuleViolation> {
        if self.is_over() {
            return Err(RuleViolation::GameOver);
        }
        let side = self.to_move;
        if has_legal_move(&self.board, side) {
            return Err(RuleViolation::PassWithLegalMoves { side });
        }
        self.turns.push(Turn::Pass { side });
        self.to_move = side.opponent();
        Ok(())
    }

    /// Take back the last turn. Returns it, or `None` at the start.
    pub fn undo(&mut self) -> Option<Turn> {
        let last = self.turns.pop()?;
        let turns = std::mem::take(&mut self.turns);
        self.board = self.start;
        self.to_move = self.start_side;
        for turn in turns {
            match turn {
                Turn::Move { side, pos } => self.board = apply_move(&self.board, side, pos),
                Turn::Pass { .. } => {}
            }
            self.turns.push(turn);
            self.to_move = turn.side().opponent();
        }
        Some(last)
    }

    /// Result for a game that ended normally
    pub fn outcome(&self) -> GameOutcome {
        self.finish(EndReason::NoMovesLeft)
    }

    /// Result when the side to move breaks the rules and loses
    pub fn forfeit(&self, violation: RuleViolation) -> GameOutcome {
        self.finish(EndReason::Forfeit { side: self.to_move, violation })
    }

    fn finish(&self, reason: EndReason) -> GameOutcome {
        let winner = match &reason {
            EndReason::NoMovesLeft => winner(&self.board),
            EndReason::Forfeit { side, .. } => Some(side.opponent()),
        };
        GameOutcome {
            board: self.board,
            black_discs: disc_count(&self.board, Side::Black),
            white_discs: disc_count(&self.board, Side::White),
            winner,
            reason,
            turns: self.turns.clone(),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// What happened on one call to [`step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Played(Pos),
    Passed,
    Forfeit(RuleViolation),
    GameOver,
}

/// Let `strategy` take the turn of the side to move.
///
/// A side without legal moves passes without consulting the strategy. No move
/// while legal moves exist, or an illegal move, is returned as a forfeit and
/// the position is left unchanged.
pub fn step(game: &mut Game, strategy: &mut dyn Strategy) -> StepResult {
    if game.is_over() {
        return StepResult::GameOver;
    }
    let side = game.to_move();

    if game.must_pass() {
        info!(%side, strategy = strategy.name(), face = strategy.face(), "no legal move, passing");
        // must_pass guarantees the pass is legal
        return match game.pass() {
            Ok(()) => StepResult::Passed,
            Err(violation) => StepResult::Forfeit(violation),
        };
    }

    let Some(pos) = strategy.choose_move(game.board(), side) else {
        let violation = RuleViolation::NoMoveChosen { side };
        warn!(%side, strategy = strategy.name(), "{violation}");
        return StepResult::Forfeit(violation);
    };

    match game.play(pos) {
        Ok(()) => {
            info!(%side, %pos, strategy = strategy.name(), face = strategy.face(), "move played");
            StepResult::Played(pos)
        }
        Err(violation) => {
            warn!(%side, %pos, strategy = strategy.name(), "{violation}");
            StepResult::Forfeit(violation)
        }
    }
}

/// Play `game` to the end with `black` and `white` choosing moves.
pub fn play_match(
    mut game: Game,
    black: &mut dyn Strategy,
    white: &mut dyn Strategy,
) -> GameOutcome {
    loop {
        let side = game.to_move();
        let strategy: &mut dyn Strategy = match side {
            Side::Black => &mut *black,
            Side::White => &mut *white,
        };

        match step(&mut game, strategy) {
            StepResult::Played(_) | StepResult::Passed => {}
            StepResult::GameOver => {
                let outcome = game.outcome();
                info!(
                    black = outcome.black_discs,
                    white = outcome.white_discs,
                    winner = ?outcome.winner,
                    "game over: no moves left"
                );
                return outcome;
            }
            StepResult::Forfeit(violation) => {
                let outcome = game.forfeit(violation);
                info!(
                    black = outcome.black_discs,
                    white = outcome.white_discs,
                    loser = %side,
                    "game over: forfeit"
                );
                return outcome;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AIEngine, EngineConfig};
    use crate::rules::legal_moves;

    /// Always plays the first legal move
    struct FirstMove;

    impl Strategy for FirstMove {
        fn name(&self) -> &str {
            "first"
        }

        fn choose_move(&mut self, board: &Board, side: Side) -> Option<Pos> {
            legal_moves(board, side).first().copied()
        }
    }

    /// Always plays the same square
    struct Stubborn(Pos);

    impl Strategy for Stubborn {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn choose_move(&mut self, _board: &Board, _side: Side) -> Option<Pos> {
            Some(self.0)
        }
    }

    /// Never moves
    struct Silent;

    impl Strategy for Silent {
        fn name(&self) -> &str {
            "silent"
        }

        fn choose_move(&mut self, _board: &Board, _side: Side) -> Option<Pos> {
            None
        }
    }

    #[test]
    fn test_play_alternates_sides() {
        let mut game = Game::new();
        game.play(Pos::new(1, 3)).unwrap();
        assert_eq!(game.to_move(), Side::White);
        assert_eq!(game.board().count(Side::Black), 4);
        assert_eq!(game.last_move(), Some(Pos::new(1, 3)));
    }

    #[test]
    fn test_illegal_play_is_rejected() {
        let mut game = Game::new();
        let err = game.play(Pos::new(0, 0)).unwrap_err();
        assert_eq!(err, RuleViolation::IllegalMove { side: Side::Black, pos: Pos::new(0, 0) });
        assert_eq!(*game.board(), Board::new());
        assert_eq!(game.to_move(), Side::Black);
    }

    #[test]
    fn test_pass_only_without_moves() {
        let mut game = Game::new();
        assert_eq!(
            game.pass(),
            Err(RuleViolation::PassWithLegalMoves { side: Side::Black })
        );

        // Black stuck, White can still play c1
        let board: Board = "OX....
                            ......
                            ......
                            ......
                            ......
                            ......"
            .parse()
            .unwrap();
        let mut game = Game::from_position(board, Side::Black);
        assert!(game.must_pass());
        game.pass().unwrap();
        assert_eq!(game.to_move(), Side::White);
        assert_eq!(game.turns(), &[Turn::Pass { side: Side::Black }]);
    }

    #[test]
    fn test_undo_replays_history() {
        let mut game = Game::new();
        game.play(Pos::new(1, 3)).unwrap();
        let after_first = *game.board();
        game.play(Pos::new(1, 2)).unwrap();

        assert_eq!(game.undo(), Some(Turn::Move { side: Side::White, pos: Pos::new(1, 2) }));
        assert_eq!(*game.board(), after_first);
        assert_eq!(game.to_move(), Side::White);

        game.undo();
        assert_eq!(*game.board(), Board::new());
        assert_eq!(game.to_move(), Side::Black);
        assert_eq!(game.undo(), None);
    }

    #[test]
    fn test_step_passes_without_consulting_strategy() {
        let board: Board = "OX....
                            ......
                            ......
                            ......
                            ......
                            ......"
            .parse()
            .unwrap();
        let mut game = Game::from_position(board, Side::Black);
        assert_eq!(step(&mut game, &mut Silent), StepResult::Passed);
    }

    #[test]
    fn test_silent_strategy_forfeits() {
        let outcome = play_match(Game::new(), &mut Silent, &mut FirstMove);
        assert_eq!(
            outcome.reason,
            EndReason::Forfeit {
                side: Side::Black,
                violation: RuleViolation::NoMoveChosen { side: Side::Black },
            }
        );
        assert_eq!(outcome.winner, Some(Side::White));
        assert!(outcome.turns.is_empty());
    }

    #[test]
    fn test_illegal_strategy_forfeits() {
        let outcome = play_match(Game::new(), &mut FirstMove, &mut Stubborn(Pos::new(0, 0)));
        assert_eq!(
            outcome.reason,
            EndReason::Forfeit {
                side: Side::White,
                violation: RuleViolation::IllegalMove { side: Side::White, pos: Pos::new(0, 0) },
            }
        );
        assert_eq!(outcome.winner, Some(Side::Black));
        assert_eq!(outcome.turns.len(), 1);
    }

    #[test]
    fn test_first_move_match_runs_to_completion() {
        let outcome = play_match(Game::new(), &mut FirstMove, &mut FirstMove);
        assert_eq!(outcome.reason, EndReason::NoMovesLeft);
        assert!(is_game_over(&outcome.board));
        assert_eq!(outcome.black_discs, outcome.board.count(Side::Black));
        assert_eq!(outcome.white_discs, outcome.board.count(Side::White));
        assert_eq!(outcome.winner, winner(&outcome.board));
        let placed = outcome
            .turns
            .iter()
            .filter(|t| matches!(t, Turn::Move { .. }))
            .count() as u32;
        assert_eq!(outcome.black_discs + outcome.white_discs, placed + 4);
    }

    #[test]
    fn test_corner_trap_forfeit() {
        let board: Board = "......
                            X.....
                            O.....
                            O..XO.
                            O.....
                            O....."
            .parse()
            .unwrap();
        let mut engine = AIEngine::with_config(EngineConfig { depth: 2, ..EngineConfig::default() });
        let outcome = play_match(Game::from_position(board, Side::Black), &mut engine, &mut FirstMove);
        assert!(matches!(
            outcome.reason,
            EndReason::Forfeit { side: Side::Black, violation: RuleViolation::NoMoveChosen { .. } }
        ));
        assert_eq!(outcome.winner, Some(Side::White));
    }
}
