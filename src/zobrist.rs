//! Zobrist keys for position identification.
//!
//! A position's key is the XOR of one random 64-bit value per feature:
//! each (colour, piece, square) occupancy, the side to move, the castling
//! bitmask, and the en-passant file. Clock fields are deliberately not
//! hashed, so equal keys mean equal positions for repetition purposes.

use crate::types::{Color, PieceType, Square};
use std::sync::OnceLock;

/// 16 possible castling bitmasks (0..=15).
const CASTLING_STATES: usize = 16;
/// 8 en-passant files; only the file is hashed, not the full square.
const EP_FILES: usize = 8;

/// Get a reference to the global key set.
pub fn keys() -> &'static ZobristKeys {
    static KEYS: OnceLock<ZobristKeys> = OnceLock::new();
    KEYS.get_or_init(ZobristKeys::init)
}

/// The full key set, generated once from a fixed seed so hashes are
/// reproducible across runs and platforms.
pub struct ZobristKeys {
    piece: [[[u64; Square::NUM]; PieceType::COUNT]; 2],
    black_to_move: u64,
    castling: [u64; CASTLING_STATES],
    en_passant: [u64; EP_FILES],
}

impl ZobristKeys {
    fn init() -> Self {
        let mut rng = SplitMix64::new(0x9E37_79B9_7F4A_7C15);

        let mut piece = [[[0u64; Square::NUM]; PieceType::COUNT]; 2];
        for per_color in &mut piece {
            for per_piece in per_color.iter_mut() {
                for key in per_piece.iter_mut() {
                    *key = rng.next_u64();
                }
            }
        }

        let black_to_move = rng.next_u64();

        let mut castling = [0u64; CASTLING_STATES];
        // Index 0 ("no rights") stays zero so an empty position hashes to 0.
        for key in castling.iter_mut().skip(1) {
            *key = rng.next_u64();
        }

        let mut en_passant = [0u64; EP_FILES];
        for key in &mut en_passant {
            *key = rng.next_u64();
        }

        ZobristKeys {
            piece,
            black_to_move,
            castling,
            en_passant,
        }
    }

    /// Key for a piece of `color` standing on `sq`.
    #[inline]
    pub fn piece(&self, color: Color, piece: PieceType, sq: Square) -> u64 {
        self.piece[color.index()][piece.index()][sq.0 as usize]
    }

    /// Key XORed in whenever Black is to move.
    #[inline]
    pub fn side(&self) -> u64 {
        self.black_to_move
    }

    /// Key for a castling-rights bitmask (0..=15).
    #[inline]
    pub fn castling(&self, rights: u8) -> u64 {
        self.castling[rights as usize]
    }

    /// Key for an en-passant file (0..=7).
    #[inline]
    pub fn en_passant_file(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

// ---------------------------------------------------------------------------
// SplitMix64 — deterministic key generator
// ---------------------------------------------------------------------------

/// SplitMix64: tiny, fast, and statistically solid for key generation.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        SplitMix64 { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
