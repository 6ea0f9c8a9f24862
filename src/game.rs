//! Stateful game session wrapping [`Position`].
//!
//! The engine itself holds no globals; a `Game` is the explicit, caller-owned
//! object that tracks move history, the undo stack, repetition counts, and
//! the derived [`GameStatus`]. Position-only status predicates
//! ([`is_checkmate`], [`is_stalemate`], [`insufficient_material`],
//! [`is_draw`]) are free functions — only repetition needs history.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::movegen;
use crate::position::{FenOptions, Position, UndoInfo};
use crate::san;
use crate::types::{
    Bitboard, ChessError, Color, DrawReason, GameStatus, Move, PieceType, Square,
};

// =========================================================================
// Position-only status predicates
// =========================================================================

/// Checkmate: in check with no legal move.
pub fn is_checkmate(pos: &Position) -> bool {
    pos.is_in_check() && movegen::legal_moves(pos).is_empty()
}

/// Stalemate: not in check, yet no legal move.
pub fn is_stalemate(pos: &Position) -> bool {
    !pos.is_in_check() && movegen::legal_moves(pos).is_empty()
}

/// Neither side can possibly deliver mate: bare kings, a lone minor piece,
/// or bishops that all share one square colour.
pub fn insufficient_material(pos: &Position) -> bool {
    for color in [Color::White, Color::Black] {
        for pt in [PieceType::Pawn, PieceType::Rook, PieceType::Queen] {
            if !pos.bb(color, pt).is_empty() {
                return false;
            }
        }
    }

    let knights = pos.bb(Color::White, PieceType::Knight).count()
        + pos.bb(Color::Black, PieceType::Knight).count();
    let bishops = pos.bb(Color::White, PieceType::Bishop) | pos.bb(Color::Black, PieceType::Bishop);

    if bishops.is_empty() {
        // K vs K, or a single knight beside the kings.
        return knights <= 1;
    }
    if knights > 0 {
        return false;
    }

    // Bishops only: drawn when every bishop stands on one square colour.
    let dark = Bitboard(0xAA55_AA55_AA55_AA55);
    (bishops & dark).is_empty() || (bishops & !dark).is_empty()
}

/// Draw by the fifty-move rule, stalemate, or insufficient material.
/// Repetition is a property of a game, not a position; see
/// [`Game::is_threefold_repetition`].
pub fn is_draw(pos: &Position) -> bool {
    pos.halfmove_clock() >= 100 || is_stalemate(pos) || insufficient_material(pos)
}

// =========================================================================
// GameOptions
// =========================================================================

/// Session configuration.
#[derive(Clone, Copy, Debug)]
pub struct GameOptions {
    /// Piece substituted when a caller-supplied move promotes a pawn
    /// without naming one. UIs that prompt the user pass the chosen piece
    /// explicitly instead.
    pub default_promotion: PieceType,
}

impl Default for GameOptions {
    fn default() -> Self {
        GameOptions {
            default_promotion: PieceType::Queen,
        }
    }
}

// =========================================================================
// MoveRecord
// =========================================================================

/// One committed move: the resolved move, its notations, what it captured,
/// and the status it produced.
#[derive(Clone, Debug, Serialize)]
pub struct MoveRecord {
    #[serde(skip)]
    pub mv: Move,
    /// Long algebraic form (`e2e4`, `e7e8q`) — the replayable wire format.
    pub lan: String,
    /// SAN with check/mate suffix (`Nf3`, `exd6`, `e8=Q#`).
    pub san: String,
    pub capture: Option<PieceType>,
    pub status_after: GameStatus,
}

// =========================================================================
// Game
// =========================================================================

/// A chess game: current position, history, undo stack, repetition
/// tracking, and derived status.
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    /// Legal moves of the current position, computed once per position
    /// change and reused for resolution, SAN, and status classification.
    legal: Vec<Move>,
    status: GameStatus,
    history: Vec<MoveRecord>,
    undo_stack: Vec<UndoInfo>,
    /// Zobrist keys of every position reached, current included.
    seen_keys: Vec<u64>,
    options: GameOptions,

    pub id: String,
    pub created_at: DateTime<Utc>,

    started_from_fen: bool,
    starting_fen: String,
}

impl Game {
    // -----------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------

    /// A fresh game from the standard starting position.
    pub fn new() -> Self {
        Self::with_options(GameOptions::default())
    }

    /// A fresh game with explicit options.
    pub fn with_options(options: GameOptions) -> Self {
        let position = Position::starting();
        Self::from_parts(position, options, false)
    }

    /// A game starting from an arbitrary FEN position.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        Self::from_fen_with(fen, FenOptions::default(), GameOptions::default())
    }

    /// A game from FEN with explicit parse and session options.
    pub fn from_fen_with(
        fen: &str,
        fen_opts: FenOptions,
        options: GameOptions,
    ) -> Result<Self, ChessError> {
        let position = Position::from_fen_with(fen, fen_opts)?;
        Ok(Self::from_parts(position, options, true))
    }

    /// Replay a long-algebraic move list from the standard starting
    /// position. A stored `lan_history` reproduces its game exactly.
    pub fn from_lan_moves(moves: &[&str]) -> Result<Self, ChessError> {
        let mut game = Self::new();
        for lan in moves {
            game.make_lan_move(lan)?;
        }
        Ok(game)
    }

    fn from_parts(position: Position, options: GameOptions, from_fen: bool) -> Self {
        let starting_fen = position.to_fen();
        let seen_keys = vec![position.zobrist_hash()];
        let mut game = Game {
            position,
            legal: Vec::new(),
            status: GameStatus::Active,
            history: Vec::new(),
            undo_stack: Vec::new(),
            seen_keys,
            options,
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            started_from_fen: from_fen,
            starting_fen,
        };
        game.refresh();
        game
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    pub fn options(&self) -> GameOptions {
        self.options
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The game so far as long-algebraic strings, replayable with
    /// [`Game::from_lan_moves`].
    pub fn lan_history(&self) -> Vec<String> {
        self.history.iter().map(|r| r.lan.clone()).collect()
    }

    pub fn started_from_fen(&self) -> bool {
        self.started_from_fen
    }

    pub fn starting_fen(&self) -> &str {
        &self.starting_fen
    }

    /// Legal moves in the current position (memoized).
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal
    }

    /// Legal moves from one square, for destination highlighting.
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        self.legal.iter().filter(|m| m.from == from).copied().collect()
    }

    /// Has the current position occurred three or more times?
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetitions() >= 3
    }

    // -----------------------------------------------------------------
    // Making moves
    // -----------------------------------------------------------------

    /// Commit a move given as a from/to pair. A promoting pawn move with no
    /// piece named uses `GameOptions::default_promotion`.
    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<&MoveRecord, ChessError> {
        if self.status.is_game_over() {
            return Err(ChessError::GameOver(self.status.to_string()));
        }

        let candidates: Vec<&Move> = self
            .legal
            .iter()
            .filter(|m| m.from == from && m.to == to)
            .collect();
        if candidates.is_empty() {
            return Err(ChessError::illegal(from, to, "not a legal move"));
        }

        let wanted = match promotion {
            Some(p) => Some(p),
            None if candidates[0].promotion.is_some() => Some(self.options.default_promotion),
            None => None,
        };
        let mv = *candidates
            .into_iter()
            .find(|m| m.promotion == wanted)
            .ok_or_else(|| ChessError::illegal(from, to, "no matching promotion"))?;

        Ok(self.commit(mv))
    }

    /// Commit a move given in long algebraic notation (`e2e4`, `e7e8q`).
    pub fn make_lan_move(&mut self, lan: &str) -> Result<&MoveRecord, ChessError> {
        let (from, to, promotion) = movegen::split_lan(lan)?;
        self.make_move(from, to, promotion)
    }

    /// Commit a move given in SAN.
    pub fn make_san_move(&mut self, san_str: &str) -> Result<&MoveRecord, ChessError> {
        if self.status.is_game_over() {
            return Err(ChessError::GameOver(self.status.to_string()));
        }
        let mv = san::parse_san_with(&self.position, san_str, &self.legal)?;
        Ok(self.commit(mv))
    }

    /// Apply an already-resolved legal move and record it.
    fn commit(&mut self, mv: Move) -> &MoveRecord {
        let san = san::move_to_san(&self.position, mv, &self.legal);
        let lan = mv.lan();

        let undo = self.position.make_move(mv);
        let capture = undo.captured;
        self.undo_stack.push(undo);
        self.seen_keys.push(self.position.zobrist_hash());
        self.refresh();

        debug!(
            game = %self.id,
            %lan,
            %san,
            status = %self.status,
            "move committed"
        );

        self.history.push(MoveRecord {
            mv,
            lan,
            san,
            capture,
            status_after: self.status.clone(),
        });
        self.history.last().expect("just pushed")
    }

    // -----------------------------------------------------------------
    // Undo
    // -----------------------------------------------------------------

    /// Take back the last committed move.
    pub fn undo_move(&mut self) -> Result<Move, ChessError> {
        let record = self.history.pop().ok_or(ChessError::NothingToUndo)?;
        let undo = self.undo_stack.pop().expect("stacks stay in step");
        self.seen_keys.pop();
        self.position.undo_move(record.mv, &undo);
        self.refresh();
        Ok(record.mv)
    }

    // -----------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------

    /// Load a new FEN position, discarding all history.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), ChessError> {
        let position = Position::from_fen(fen)?;
        debug!(game = %self.id, %fen, "position loaded");
        self.position = position;
        self.history.clear();
        self.undo_stack.clear();
        self.seen_keys.clear();
        self.seen_keys.push(self.position.zobrist_hash());
        self.started_from_fen = true;
        self.starting_fen = fen.to_string();
        self.refresh();
        Ok(())
    }

    // -----------------------------------------------------------------
    // Status
    // -----------------------------------------------------------------

    fn refresh(&mut self) {
        self.legal = movegen::legal_moves(&self.position);
        self.status = self.classify();
    }

    fn classify(&self) -> GameStatus {
        let in_check = self.position.is_in_check();

        if self.legal.is_empty() {
            return if in_check {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            };
        }

        if self.position.halfmove_clock() >= 100 {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }
        if self.is_threefold_repetition() {
            return GameStatus::Draw(DrawReason::ThreefoldRepetition);
        }
        if insufficient_material(&self.position) {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }

        if in_check {
            GameStatus::Check
        } else {
            GameStatus::Active
        }
    }

    fn repetitions(&self) -> usize {
        let current = self.position.zobrist_hash();
        self.seen_keys.iter().filter(|&&k| k == current).count()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    // -----------------------------------------------------------------
    // Predicates on bare positions
    // -----------------------------------------------------------------

    #[test]
    fn checkmate_predicate() {
        let fools_mate =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(is_checkmate(&fools_mate));
        assert!(!is_stalemate(&fools_mate));
        assert!(!is_checkmate(&Position::starting()));
    }

    #[test]
    fn stalemate_predicate() {
        let cornered = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(is_stalemate(&cornered));
        assert!(!is_checkmate(&cornered));
        assert!(is_draw(&cornered));
    }

    #[test]
    fn fifty_move_predicate() {
        let pos = Position::from_fen("4k3/8/3q4/8/8/8/8/4K3 w - - 100 80").unwrap();
        assert!(is_draw(&pos));
        let fresh = Position::from_fen("4k3/8/3q4/8/8/8/8/4K3 w - - 99 80").unwrap();
        assert!(!is_draw(&fresh));
    }

    #[test]
    fn insufficient_material_cases() {
        let drawn = [
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1",    // K vs K
            "4k3/8/8/8/8/8/8/4KB2 w - - 0 1",   // K+B vs K
            "4k3/8/8/8/8/8/8/4KN2 w - - 0 1",   // K+N vs K
            "4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1", // bishops both on dark squares
        ];
        for fen in drawn {
            let pos = Position::from_fen(fen).unwrap();
            assert!(insufficient_material(&pos), "{fen} should be drawn");
            assert!(is_draw(&pos));
        }

        let live = [
            "2b1k3/8/8/8/8/8/8/2B1K3 w - - 0 1", // opposite-coloured bishops
            "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",   // a pawn can promote
            "4k3/8/8/8/8/8/8/3QK3 w - - 0 1",    // queen
            "4k3/8/8/8/8/8/8/2N1KN2 w - - 0 1",  // two knights
            "4kn2/8/8/8/8/8/8/4KB2 w - - 0 1",   // bishop vs knight
            "4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1",  // own bishops on both colours
        ];
        for fen in live {
            let pos = Position::from_fen(fen).unwrap();
            assert!(!insufficient_material(&pos), "{fen} should not be drawn");
        }
    }

    // -----------------------------------------------------------------
    // Session basics
    // -----------------------------------------------------------------

    #[test]
    fn new_game_is_active() {
        let g = Game::new();
        assert_eq!(*g.status(), GameStatus::Active);
        assert!(!g.is_game_over());
        assert_eq!(g.side_to_move(), Color::White);
        assert_eq!(g.legal_moves().len(), 20);
        assert!(!g.started_from_fen());
        assert!(!g.id.is_empty());
    }

    #[test]
    fn from_fen_round_trip() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let g = Game::from_fen(fen).unwrap();
        assert_eq!(g.side_to_move(), Color::Black);
        assert_eq!(g.to_fen(), fen);
        assert!(g.started_from_fen());
        assert_eq!(g.starting_fen(), fen);
    }

    #[test]
    fn from_invalid_fen_errors() {
        assert!(matches!(
            Game::from_fen("not a position"),
            Err(ChessError::Fen(_))
        ));
    }

    #[test]
    fn make_move_records_notation() {
        let mut g = Game::new();
        let record = g.make_move(sq("e2"), sq("e4"), None).unwrap();
        assert_eq!(record.lan, "e2e4");
        assert_eq!(record.san, "e4");
        assert_eq!(record.capture, None);
        assert_eq!(record.status_after, GameStatus::Active);
        assert_eq!(g.side_to_move(), Color::Black);
        assert_eq!(g.history().len(), 1);
    }

    #[test]
    fn capture_is_recorded() {
        let mut g = Game::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2")
            .unwrap();
        let record = g.make_lan_move("e4d5").unwrap();
        assert_eq!(record.capture, Some(PieceType::Pawn));
        assert_eq!(record.san, "exd5");
    }

    #[test]
    fn illegal_move_keeps_position() {
        let mut g = Game::new();
        let fen_before = g.to_fen();
        assert!(g.make_move(sq("e2"), sq("e5"), None).is_err());
        assert!(g.make_lan_move("d1h5").is_err());
        assert_eq!(g.to_fen(), fen_before);
        assert!(g.history().is_empty());
    }

    #[test]
    fn finished_game_rejects_moves() {
        let mut g = Game::new();
        for lan in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            g.make_lan_move(lan).unwrap();
        }
        assert_eq!(*g.status(), GameStatus::Checkmate);
        assert!(g.is_game_over());
        assert!(matches!(
            g.make_lan_move("e2e4"),
            Err(ChessError::GameOver(_))
        ));
    }

    #[test]
    fn checkmate_gets_san_suffix() {
        let mut g = Game::new();
        for lan in ["f2f3", "e7e5", "g2g4"] {
            g.make_lan_move(lan).unwrap();
        }
        let record = g.make_lan_move("d8h4").unwrap();
        assert_eq!(record.san, "Qh4#");
        assert_eq!(record.status_after, GameStatus::Checkmate);
    }

    #[test]
    fn check_status_and_suffix() {
        let mut g = Game::from_fen("6k1/8/8/8/8/8/4R3/4K3 w - - 0 1").unwrap();
        let record = g.make_san_move("Re8+").unwrap();
        assert_eq!(record.san, "Re8+");
        assert_eq!(record.status_after, GameStatus::Check);
        assert_eq!(*g.status(), GameStatus::Check);
        assert!(!g.is_game_over());
    }

    // -----------------------------------------------------------------
    // Promotion defaulting
    // -----------------------------------------------------------------

    #[test]
    fn promotion_defaults_to_queen() {
        let mut g = Game::from_fen("7k/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let record = g.make_move(sq("e7"), sq("e8"), None).unwrap();
        assert_eq!(record.mv.promotion, Some(PieceType::Queen));
        assert_eq!(record.lan, "e7e8q");
    }

    #[test]
    fn promotion_default_is_configurable() {
        let mut g = Game::from_fen_with(
            "7k/4P3/8/8/8/8/8/4K3 w - - 0 1",
            FenOptions::default(),
            GameOptions {
                default_promotion: PieceType::Knight,
            },
        )
        .unwrap();
        let record = g.make_move(sq("e7"), sq("e8"), None).unwrap();
        assert_eq!(record.mv.promotion, Some(PieceType::Knight));
    }

    #[test]
    fn explicit_promotion_overrides_default() {
        let mut g = Game::from_fen("7k/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let record = g.make_lan_move("e7e8r").unwrap();
        assert_eq!(record.mv.promotion, Some(PieceType::Rook));
        assert_eq!(record.san, "e8=R");
    }

    // -----------------------------------------------------------------
    // Undo
    // -----------------------------------------------------------------

    #[test]
    fn undo_restores_everything() {
        let mut g = Game::new();
        let before = g.to_fen();
        g.make_lan_move("e2e4").unwrap();
        g.make_lan_move("c7c5").unwrap();
        g.undo_move().unwrap();
        g.undo_move().unwrap();
        assert_eq!(g.to_fen(), before);
        assert!(g.history().is_empty());
        assert_eq!(*g.status(), GameStatus::Active);
        assert_eq!(g.legal_moves().len(), 20);
    }

    #[test]
    fn undo_on_fresh_game_errors() {
        let mut g = Game::new();
        assert!(matches!(g.undo_move(), Err(ChessError::NothingToUndo)));
    }

    // -----------------------------------------------------------------
    // Draws in play
    // -----------------------------------------------------------------

    #[test]
    fn stalemate_status() {
        let g = Game::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(*g.status(), GameStatus::Stalemate);
        assert!(g.is_game_over());
    }

    #[test]
    fn fifty_move_status() {
        let g = Game::from_fen("4k3/8/3q4/8/8/8/8/4K3 w - - 100 80").unwrap();
        assert_eq!(*g.status(), GameStatus::Draw(DrawReason::FiftyMoveRule));
    }

    #[test]
    fn insufficient_material_status() {
        let g = Game::from_fen("4k3/8/8/8/8/8/8/4KB2 w - - 0 1").unwrap();
        assert_eq!(
            *g.status(),
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        );
    }

    #[test]
    fn threefold_repetition_status() {
        let mut g = Game::new();
        for _ in 0..2 {
            for lan in ["g1f3", "g8f6", "f3g1", "f6g8"] {
                g.make_lan_move(lan).unwrap();
            }
        }
        assert!(g.is_threefold_repetition());
        assert_eq!(
            *g.status(),
            GameStatus::Draw(DrawReason::ThreefoldRepetition)
        );
    }

    #[test]
    fn repetition_count_survives_undo() {
        let mut g = Game::new();
        for lan in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            g.make_lan_move(lan).unwrap();
        }
        // Start position has now occurred twice; not yet a draw.
        assert!(!g.is_threefold_repetition());
        g.undo_move().unwrap();
        g.make_lan_move("f6g8").unwrap();
        assert!(!g.is_threefold_repetition());
    }

    // -----------------------------------------------------------------
    // History & replay
    // -----------------------------------------------------------------

    #[test]
    fn lan_history_replays_to_same_position() {
        let mut g = Game::new();
        for lan in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"] {
            g.make_lan_move(lan).unwrap();
        }
        let replayed = Game::from_lan_moves(
            &g.lan_history().iter().map(String::as_str).collect::<Vec<_>>(),
        )
        .unwrap();
        assert_eq!(replayed.to_fen(), g.to_fen());
        assert_eq!(
            replayed.position().zobrist_hash(),
            g.position().zobrist_hash()
        );
    }

    #[test]
    fn castling_rights_are_not_restored_by_shuffling_back() {
        let mut g = Game::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        g.make_lan_move("h1g1").unwrap();
        g.make_lan_move("a7a6").unwrap();
        g.make_lan_move("g1h1").unwrap();
        g.make_lan_move("a6a5").unwrap();
        // The rook is home again but the right is gone for good.
        assert!(!g.position().castling_rights().kingside(Color::White));
        assert!(g.position().castling_rights().queenside(Color::White));
        assert!(
            g.legal_moves()
                .iter()
                .all(|m| !m.flags.is_kingside_castle())
        );
    }

    #[test]
    fn load_fen_resets_session() {
        let mut g = Game::new();
        g.make_lan_move("e2e4").unwrap();
        g.load_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(g.history().is_empty());
        assert!(g.started_from_fen());
        assert_eq!(
            *g.status(),
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        );
        assert!(matches!(g.undo_move(), Err(ChessError::NothingToUndo)));
    }

    #[test]
    fn legal_moves_from_square() {
        let g = Game::new();
        let from_e2 = g.legal_moves_from(sq("e2"));
        assert_eq!(from_e2.len(), 2);
        assert!(g.legal_moves_from(sq("e4")).is_empty());
    }

    // -----------------------------------------------------------------
    // Serialization of records
    // -----------------------------------------------------------------

    #[test]
    fn move_record_serializes() {
        let mut g = Game::new();
        let record = g.make_lan_move("e2e4").unwrap().clone();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["lan"], "e2e4");
        assert_eq!(json["san"], "e4");
        assert_eq!(json["status_after"], "active");
        assert!(json["capture"].is_null());
    }
}
