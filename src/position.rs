//! The `Position` value type.
//!
//! A position holds piece placement (bitboards, LERF mapping: a1=0 … h8=63),
//! side to move, castling rights, the en-passant target, both move counters,
//! and an incrementally maintained Zobrist hash. Callers treat positions as
//! values: the engine's public move application produces a fresh `Position`,
//! and the in-place make/undo pair stays crate-private for the legality
//! filter and the game session.

use crate::attacks;
use crate::types::{
    Bitboard, CastlingRights, Color, FenError, Move, PieceType, Square,
};
use crate::zobrist;

/// The standard starting position in FEN.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// ---------------------------------------------------------------------------
// FenOptions
// ---------------------------------------------------------------------------

/// Knobs for FEN validation.
#[derive(Clone, Copy, Debug)]
pub struct FenOptions {
    /// Require exactly one king per side. Disable to accept analysis and
    /// puzzle positions with a king missing.
    pub require_kings: bool,
}

impl Default for FenOptions {
    fn default() -> Self {
        FenOptions {
            require_kings: true,
        }
    }
}

// ---------------------------------------------------------------------------
// UndoInfo
// ---------------------------------------------------------------------------

/// State saved before a move so it can be reversed.
#[derive(Clone, Debug)]
pub(crate) struct UndoInfo {
    pub(crate) captured: Option<PieceType>,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) hash: u64,
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A complete chess position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// Piece bitboards: `pieces[color][piece_type]`.
    pieces: [[Bitboard; PieceType::COUNT]; 2],
    /// Per-colour occupancy.
    occupied: [Bitboard; 2],
    /// Union of both colours.
    all_occupied: Bitboard,
    side_to_move: Color,
    castling_rights: CastlingRights,
    /// The square a pawn skipped on the preceding double step.
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    /// Zobrist hash over placement, turn, castling, and en-passant file.
    hash: u64,
}

impl Position {
    /// An empty board, White to move, no rights.
    pub fn empty() -> Self {
        Position {
            pieces: [[Bitboard::EMPTY; PieceType::COUNT]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    /// The standard starting position.
    pub fn starting() -> Self {
        Self::from_fen(STARTING_FEN).expect("starting FEN is always valid")
    }

    // -----------------------------------------------------------------------
    // Field accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Zobrist key over placement, turn, castling rights, and en-passant
    /// file — exactly the fields that determine the legal-move set, so equal
    /// keys identify repeated positions.
    #[inline]
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    // -----------------------------------------------------------------------
    // Board queries
    // -----------------------------------------------------------------------

    /// What stands on `sq`, if anything.
    pub fn piece_at(&self, sq: Square) -> Option<(Color, PieceType)> {
        let bb = Bitboard::from_square(sq);
        if (self.all_occupied & bb).is_empty() {
            return None;
        }
        let color = if !(self.occupied[Color::White.index()] & bb).is_empty() {
            Color::White
        } else {
            Color::Black
        };
        PieceType::ALL
            .into_iter()
            .find(|pt| !(self.pieces[color.index()][pt.index()] & bb).is_empty())
            .map(|pt| (color, pt))
    }

    /// Bitboard of all pieces of one colour and kind.
    #[inline]
    pub fn bb(&self, color: Color, piece: PieceType) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// Bitboard of every piece of one colour.
    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    /// Bitboard of every occupied square.
    #[inline]
    pub fn all_occupancy(&self) -> Bitboard {
        self.all_occupied
    }

    /// The king square of `color`, if that king is on the board.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces[color.index()][PieceType::King.index()].first()
    }

    // -----------------------------------------------------------------------
    // Board editing
    // -----------------------------------------------------------------------

    /// Put a piece on `sq`, replacing whatever stood there. Intended for
    /// composing positions; does not touch turn, rights, or clocks.
    pub fn put_piece(&mut self, sq: Square, color: Color, piece: PieceType) {
        self.remove_piece(sq);
        self.place(sq, color, piece);
    }

    /// Remove and return the piece on `sq`, if any.
    pub fn remove_piece(&mut self, sq: Square) -> Option<(Color, PieceType)> {
        let occupant = self.piece_at(sq)?;
        self.lift(sq, occupant.0, occupant.1);
        Some(occupant)
    }

    /// Low-level place: square is assumed empty.
    fn place(&mut self, sq: Square, color: Color, piece: PieceType) {
        let bb = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] |= bb;
        self.occupied[color.index()] |= bb;
        self.all_occupied |= bb;
        self.hash ^= zobrist::keys().piece(color, piece, sq);
    }

    /// Low-level lift: the given piece is assumed present.
    fn lift(&mut self, sq: Square, color: Color, piece: PieceType) {
        let bb = !Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] &= bb;
        self.occupied[color.index()] &= bb;
        self.all_occupied &= bb;
        self.hash ^= zobrist::keys().piece(color, piece, sq);
    }

    /// The piece kind of `color` on `sq`. Panics if absent — callers only
    /// reach this through generator-produced moves.
    fn piece_kind_at(&self, sq: Square, color: Color) -> PieceType {
        let bb = Bitboard::from_square(sq);
        for pt in PieceType::ALL {
            if !(self.pieces[color.index()][pt.index()] & bb).is_empty() {
                return pt;
            }
        }
        panic!("no {color} piece on {sq}:\n{}", self.board_string());
    }

    // -----------------------------------------------------------------------
    // Attack queries
    // -----------------------------------------------------------------------

    /// Is `sq` attacked by any piece of colour `by`?
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let t = attacks::tables();

        // A pawn of `by` attacks `sq` iff it stands on a square that a pawn
        // of the *other* colour on `sq` would attack.
        if !(t.pawn_attacks(!by, sq) & self.bb(by, PieceType::Pawn)).is_empty() {
            return true;
        }
        if !(t.knight_attacks(sq) & self.bb(by, PieceType::Knight)).is_empty() {
            return true;
        }
        if !(t.king_attacks(sq) & self.bb(by, PieceType::King)).is_empty() {
            return true;
        }

        let straight = self.bb(by, PieceType::Rook) | self.bb(by, PieceType::Queen);
        if !straight.is_empty()
            && !(attacks::rook_attacks(sq, self.all_occupied) & straight).is_empty()
        {
            return true;
        }

        let diagonal = self.bb(by, PieceType::Bishop) | self.bb(by, PieceType::Queen);
        if !diagonal.is_empty()
            && !(attacks::bishop_attacks(sq, self.all_occupied) & diagonal).is_empty()
        {
            return true;
        }

        false
    }

    /// Is the king of `color` attacked? `false` when that king is absent
    /// (relaxed analysis positions).
    pub fn king_attacked(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_square_attacked(king, !color),
            None => false,
        }
    }

    /// Is the side to move in check?
    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.king_attacked(self.side_to_move)
    }

    // -----------------------------------------------------------------------
    // Make / undo (crate-internal)
    // -----------------------------------------------------------------------

    /// Apply a generator-produced move in place. Legality (own king safety)
    /// is the caller's responsibility; see `movegen::apply_move` for the
    /// checked, value-producing entry point.
    pub(crate) fn make_move(&mut self, mv: Move) -> UndoInfo {
        let zk = zobrist::keys();
        let us = self.side_to_move;
        let them = !us;

        let undo = UndoInfo {
            captured: None,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        };

        let moving = self.piece_kind_at(mv.from, us);

        // Clear the old en-passant file from the hash; re-set below if this
        // move is a capturable double push.
        if let Some(ep) = self.en_passant {
            self.hash ^= zk.en_passant_file(ep.file());
        }
        self.en_passant = None;

        self.hash ^= zk.castling(self.castling_rights.0);

        // Captures. En passant removes the pawn behind the destination.
        let mut captured = None;
        if mv.flags.is_en_passant() {
            let victim = match us {
                Color::White => Square(mv.to.0 - 8),
                Color::Black => Square(mv.to.0 + 8),
            };
            self.lift(victim, them, PieceType::Pawn);
            captured = Some(PieceType::Pawn);
        } else if mv.flags.is_capture() {
            let kind = self.piece_kind_at(mv.to, them);
            self.lift(mv.to, them, kind);
            captured = Some(kind);
        }

        // Move (and possibly promote) the piece.
        self.lift(mv.from, us, moving);
        self.place(mv.to, us, mv.promotion.unwrap_or(moving));

        // Castling relocates the rook as well.
        if mv.flags.is_castling() {
            let (rook_from, rook_to) = rook_castling_squares(us, mv.flags.is_kingside_castle());
            self.lift(rook_from, us, PieceType::Rook);
            self.place(rook_to, us, PieceType::Rook);
        }

        // Any move touching a king or rook home square drops the matching
        // rights — including a capture of an unmoved rook.
        self.castling_rights.0 &=
            !(castling_clear_mask(mv.from) | castling_clear_mask(mv.to));
        self.hash ^= zk.castling(self.castling_rights.0);

        // Double push: record the skipped square, but only when an enemy
        // pawn stands ready to take en passant. Unconditional recording
        // would make repetition keys differ for positions with identical
        // move sets.
        if mv.flags.is_double_push() {
            let skipped = Square((mv.from.0 + mv.to.0) / 2);
            let capturers =
                attacks::tables().pawn_attacks(us, skipped) & self.bb(them, PieceType::Pawn);
            if !capturers.is_empty() {
                self.en_passant = Some(skipped);
                self.hash ^= zk.en_passant_file(skipped.file());
            }
        }

        if moving == PieceType::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = them;
        self.hash ^= zk.side();

        UndoInfo { captured, ..undo }
    }

    /// Reverse a move applied with [`Position::make_move`].
    pub(crate) fn undo_move(&mut self, mv: Move, undo: &UndoInfo) {
        let them = self.side_to_move;
        let us = !them;
        self.side_to_move = us;

        let landed = mv
            .promotion
            .unwrap_or_else(|| self.piece_kind_at(mv.to, us));
        let original = if mv.promotion.is_some() {
            PieceType::Pawn
        } else {
            landed
        };

        self.lift(mv.to, us, landed);
        self.place(mv.from, us, original);

        if mv.flags.is_en_passant() {
            let victim = match us {
                Color::White => Square(mv.to.0 - 8),
                Color::Black => Square(mv.to.0 + 8),
            };
            self.place(victim, them, PieceType::Pawn);
        } else if let Some(kind) = undo.captured {
            self.place(mv.to, them, kind);
        }

        if mv.flags.is_castling() {
            let (rook_from, rook_to) = rook_castling_squares(us, mv.flags.is_kingside_castle());
            self.lift(rook_to, us, PieceType::Rook);
            self.place(rook_from, us, PieceType::Rook);
        }

        self.castling_rights = undo.castling_rights;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.hash = undo.hash;

        if us == Color::Black {
            self.fullmove_number -= 1;
        }
    }

    // -----------------------------------------------------------------------
    // Display
    // -----------------------------------------------------------------------

    /// Render the board as an 8-line text grid, rank 8 first.
    pub fn board_string(&self) -> String {
        let mut s = String::with_capacity(200);
        for rank in (0..8).rev() {
            s.push((b'1' + rank) as char);
            s.push(' ');
            for file in 0..8 {
                let sq = Square::from_file_rank(file, rank);
                s.push(match self.piece_at(sq) {
                    Some((c, p)) => p.to_char(c),
                    None => '.',
                });
                if file < 7 {
                    s.push(' ');
                }
            }
            s.push('\n');
        }
        s.push_str("  a b c d e f g h");
        s
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board_string())
    }
}

// ---------------------------------------------------------------------------
// Castling square bookkeeping
// ---------------------------------------------------------------------------

/// Rook's (from, to) squares for a castle by `color`.
pub(crate) fn rook_castling_squares(color: Color, kingside: bool) -> (Square, Square) {
    match (color, kingside) {
        (Color::White, true) => (Square(7), Square(5)),
        (Color::White, false) => (Square(0), Square(3)),
        (Color::Black, true) => (Square(63), Square(61)),
        (Color::Black, false) => (Square(56), Square(59)),
    }
}

/// Rights cleared when a move touches `sq` (origin or destination).
fn castling_clear_mask(sq: Square) -> u8 {
    match sq.0 {
        0 => CastlingRights::WHITE_QUEENSIDE,
        4 => CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE,
        7 => CastlingRights::WHITE_KINGSIDE,
        56 => CastlingRights::BLACK_QUEENSIDE,
        60 => CastlingRights::BLACK_KINGSIDE | CastlingRights::BLACK_QUEENSIDE,
        63 => CastlingRights::BLACK_KINGSIDE,
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// FEN parsing & serialization
// ---------------------------------------------------------------------------

impl Position {
    /// Parse a FEN string with default (strict) validation.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Self::from_fen_with(fen, FenOptions::default())
    }

    /// Parse a FEN string. Each of the six fields is validated in order and
    /// reported individually on failure.
    pub fn from_fen_with(fen: &str, opts: FenOptions) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::FieldCount(fields.len()));
        }

        let mut pos = Position::empty();

        // Field 1: piece placement, rank 8 down to rank 1.
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::Placement(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file: u8 = 0;
            for ch in rank_str.chars() {
                if file > 7 {
                    return Err(FenError::Placement(format!(
                        "rank {} spills past the h-file",
                        rank + 1
                    )));
                }
                if let Some(run) = ch.to_digit(10) {
                    if !(1..=8).contains(&run) {
                        return Err(FenError::Placement(format!(
                            "empty-square run '{ch}' in rank {}",
                            rank + 1
                        )));
                    }
                    file += run as u8;
                } else if let Some((color, piece)) = PieceType::from_char(ch) {
                    pos.place(Square::from_file_rank(file, rank), color, piece);
                    file += 1;
                } else {
                    return Err(FenError::Placement(format!(
                        "unrecognized character '{ch}'"
                    )));
                }
            }
            if file != 8 {
                return Err(FenError::Placement(format!(
                    "rank {} covers {file} squares instead of 8",
                    rank + 1
                )));
            }
        }

        if opts.require_kings {
            for color in [Color::White, Color::Black] {
                let count = pos.bb(color, PieceType::King).count();
                if count != 1 {
                    return Err(FenError::KingCount { color, count });
                }
            }
        } else {
            // Even relaxed positions cannot have two kings of one colour.
            for color in [Color::White, Color::Black] {
                let count = pos.bb(color, PieceType::King).count();
                if count > 1 {
                    return Err(FenError::KingCount { color, count });
                }
            }
        }

        // Field 2: side to move.
        pos.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        // Field 3: castling availability.
        pos.castling_rights = CastlingRights::from_fen(fields[2])
            .ok_or_else(|| FenError::Castling(fields[2].to_string()))?;

        // Field 4: en-passant target. The rank must match whose pawn just
        // double-stepped: rank 6 with White to move, rank 3 with Black.
        if fields[3] != "-" {
            let ep = Square::from_algebraic(fields[3])
                .ok_or_else(|| FenError::EnPassant(format!("'{}' is not a square", fields[3])))?;
            let expected_rank = match pos.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if ep.rank() != expected_rank {
                return Err(FenError::EnPassant(format!(
                    "'{}' is on the wrong rank for {} to move",
                    fields[3], pos.side_to_move
                )));
            }
            pos.en_passant = Some(ep);
        }

        // Fields 5 and 6: clocks.
        pos.halfmove_clock = fields[4]
            .parse::<u16>()
            .map_err(|_| FenError::HalfmoveClock(fields[4].to_string()))?;
        pos.fullmove_number = fields[5]
            .parse::<u16>()
            .map_err(|_| FenError::FullmoveNumber(fields[5].to_string()))?;
        if pos.fullmove_number == 0 {
            return Err(FenError::FullmoveNumber(fields[5].to_string()));
        }

        // `place` already folded the piece keys in; add the rest.
        if pos.side_to_move == Color::Black {
            pos.hash ^= zobrist::keys().side();
        }
        pos.hash ^= zobrist::keys().castling(pos.castling_rights.0);
        if let Some(ep) = pos.en_passant {
            pos.hash ^= zobrist::keys().en_passant_file(ep.file());
        }

        Ok(pos)
    }

    /// Serialize to canonical FEN. Round-trips exactly with
    /// [`Position::from_fen`].
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(80);

        for rank in (0..8).rev() {
            let mut run = 0u8;
            for file in 0..8 {
                match self.piece_at(Square::from_file_rank(file, rank)) {
                    Some((color, piece)) => {
                        if run > 0 {
                            fen.push((b'0' + run) as char);
                            run = 0;
                        }
                        fen.push(piece.to_char(color));
                    }
                    None => run += 1,
                }
            }
            if run > 0 {
                fen.push((b'0' + run) as char);
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });
        fen.push(' ');
        fen.push_str(&self.castling_rights.to_fen());
        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }
        fen.push(' ');
        fen.push_str(&self.halfmove_clock.to_string());
        fen.push(' ');
        fen.push_str(&self.fullmove_number.to_string());

        fen
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
