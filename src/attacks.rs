//! Attack patterns for every piece kind.
//!
//! Knight, king, and pawn attacks are table lookups, initialised once via
//! `OnceLock`. Sliding attacks (rook, bishop, queen) walk their rays one
//! step at a time; each step goes through [`Square::offset`], so the edge of
//! the board is an ordinary `None` rather than an error condition.

use crate::types::{Bitboard, Color, Square};
use std::sync::OnceLock;

/// Ray directions as (file_delta, rank_delta) pairs.
pub(crate) const ROOK_RAYS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub(crate) const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

// ---------------------------------------------------------------------------
// Leaper tables
// ---------------------------------------------------------------------------

/// Get a reference to the global leaper tables.
pub fn tables() -> &'static LeaperTables {
    static TABLES: OnceLock<LeaperTables> = OnceLock::new();
    TABLES.get_or_init(LeaperTables::init)
}

/// Precomputed attack sets for the non-sliding pieces.
pub struct LeaperTables {
    knight: [Bitboard; Square::NUM],
    king: [Bitboard; Square::NUM],
    /// `pawn[color][square]` — squares a pawn of `color` on `square` attacks.
    pawn: [[Bitboard; Square::NUM]; 2],
}

impl LeaperTables {
    fn init() -> Self {
        let mut knight = [Bitboard::EMPTY; Square::NUM];
        let mut king = [Bitboard::EMPTY; Square::NUM];
        let mut pawn = [[Bitboard::EMPTY; Square::NUM]; 2];

        for idx in 0..Square::NUM as u8 {
            let sq = Square(idx);
            knight[idx as usize] = steps_from(sq, &KNIGHT_JUMPS);
            king[idx as usize] = steps_from(sq, &KING_STEPS);
            pawn[Color::White.index()][idx as usize] = steps_from(sq, &[(-1, 1), (1, 1)]);
            pawn[Color::Black.index()][idx as usize] = steps_from(sq, &[(-1, -1), (1, -1)]);
        }

        LeaperTables { knight, king, pawn }
    }

    #[inline]
    pub fn knight_attacks(&self, sq: Square) -> Bitboard {
        self.knight[sq.0 as usize]
    }

    #[inline]
    pub fn king_attacks(&self, sq: Square) -> Bitboard {
        self.king[sq.0 as usize]
    }

    /// Squares a pawn of `color` on `sq` attacks. Pawns attack diagonally
    /// only; their forward pushes are not attacks.
    #[inline]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn[color.index()][sq.0 as usize]
    }
}

/// Collect the on-board destinations of a fixed set of single steps.
fn steps_from(sq: Square, steps: &[(i8, i8)]) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &(df, dr) in steps {
        if let Some(to) = sq.offset(df, dr) {
            bb.insert(to);
        }
    }
    bb
}

// ---------------------------------------------------------------------------
// Sliding attacks
// ---------------------------------------------------------------------------

/// Walk the given rays from `sq`, stopping at (and including) the first
/// occupied square of each ray.
fn ray_attacks(sq: Square, occupied: Bitboard, rays: &[(i8, i8)]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(df, dr) in rays {
        let mut cursor = sq;
        while let Some(next) = cursor.offset(df, dr) {
            attacks.insert(next);
            if occupied.contains(next) {
                break;
            }
            cursor = next;
        }
    }
    attacks
}

/// Rook attacks from `sq` given the current occupancy.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, &ROOK_RAYS)
}

/// Bishop attacks from `sq` given the current occupancy.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, &BISHOP_RAYS)
}

/// Queen attacks = rook | bishop.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
