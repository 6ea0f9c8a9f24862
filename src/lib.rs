//! A chess rules engine: position model, legal move generation, move
//! application, SAN, and game-state detection.
//!
//! The crate is split in two layers:
//!
//! - [`Position`] is a value: piece placement, side to move, castling
//!   rights, en-passant target, and move counters, with FEN parsing and
//!   serialization. Applying a move never mutates a caller's position —
//!   [`movegen::apply_move`] returns a fresh one.
//! - [`Game`] is the caller-owned session: it tracks history, undo,
//!   repetition, and the derived [`GameStatus`], and resolves caller input
//!   (long-algebraic or SAN) into context-tagged moves.
//!
//! ```
//! use chesskit::{Game, GameStatus};
//!
//! let mut game = Game::new();
//! game.make_lan_move("e2e4")?;
//! let reply = game.make_san_move("e5")?.lan.clone();
//! assert_eq!(reply, "e7e5");
//! assert_eq!(*game.status(), GameStatus::Active);
//! # Ok::<(), chesskit::ChessError>(())
//! ```

pub mod attacks;
pub mod game;
pub mod movegen;
pub mod position;
pub mod san;
pub mod types;
pub mod zobrist;

pub use game::{
    Game, GameOptions, MoveRecord, insufficient_material, is_checkmate, is_draw, is_stalemate,
};
pub use movegen::{
    apply_move, legal_moves, legal_moves_from, parse_lan, perft, pseudo_legal_moves, resolve_move,
};
pub use position::{FenOptions, Position, STARTING_FEN};
pub use san::{move_to_san, parse_san};
pub use types::{
    Bitboard, CastlingRights, ChessError, Color, DrawReason, FenError, GameStatus, Move, MoveFlags,
    PieceType, Square,
};
