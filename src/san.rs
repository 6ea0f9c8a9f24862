//! Standard Algebraic Notation (SAN).
//!
//! Rendering: `e4`, `Nf3`, `Bxe5`, `O-O`, `e8=Q+`, `Raxd1#`. Disambiguation
//! is minimal — file first, then rank, then both. Parsing resolves a SAN
//! string to the unique legal move it denotes.

use crate::movegen;
use crate::position::Position;
use crate::types::{ChessError, Move, PieceType, Square};

// =========================================================================
// Rendering
// =========================================================================

/// Render a legal move as SAN, including the `+`/`#` suffix derived from
/// the resulting position.
///
/// `legal` must be the full legal-move list for `pos` (callers that keep a
/// per-position memo pass it in to avoid regenerating).
pub fn move_to_san(pos: &Position, mv: Move, legal: &[Move]) -> String {
    let mut san = san_body(pos, mv, legal);

    // Suffix: probe the successor position.
    let mut next = pos.clone();
    next.make_move(mv);
    if next.is_in_check() {
        san.push(if movegen::legal_moves(&next).is_empty() {
            '#'
        } else {
            '+'
        });
    }
    san
}

/// SAN without the check/mate suffix.
fn san_body(pos: &Position, mv: Move, legal: &[Move]) -> String {
    if mv.flags.is_castling() {
        return if mv.flags.is_kingside_castle() {
            "O-O".into()
        } else {
            "O-O-O".into()
        };
    }

    let piece = pos
        .piece_at(mv.from)
        .map(|(_, pt)| pt)
        .expect("SAN: no piece on the from-square");

    let mut san = String::with_capacity(8);

    if piece == PieceType::Pawn {
        if mv.flags.is_capture() {
            san.push((b'a' + mv.from.file()) as char);
            san.push('x');
        }
        san.push_str(&mv.to.to_algebraic());
        if let Some(promo) = mv.promotion {
            san.push('=');
            san.push(piece_letter(promo));
        }
    } else {
        san.push(piece_letter(piece));
        san.push_str(&disambiguator(pos, mv, piece, legal));
        if mv.flags.is_capture() {
            san.push('x');
        }
        san.push_str(&mv.to.to_algebraic());
    }

    san
}

/// The minimal departure hint when several pieces of the same kind can
/// legally reach the destination: file if unique, else rank, else both.
fn disambiguator(pos: &Position, mv: Move, piece: PieceType, legal: &[Move]) -> String {
    let rivals: Vec<&Move> = legal
        .iter()
        .filter(|m| {
            m.to == mv.to
                && m.from != mv.from
                && !m.flags.is_castling()
                && pos.piece_at(m.from).map(|(_, pt)| pt) == Some(piece)
        })
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let file_taken = rivals.iter().any(|m| m.from.file() == mv.from.file());
    let rank_taken = rivals.iter().any(|m| m.from.rank() == mv.from.rank());
    let file_char = (b'a' + mv.from.file()) as char;
    let rank_char = (b'1' + mv.from.rank()) as char;

    match (file_taken, rank_taken) {
        (false, _) => file_char.to_string(),
        (true, false) => rank_char.to_string(),
        (true, true) => format!("{file_char}{rank_char}"),
    }
}

fn piece_letter(pt: PieceType) -> char {
    match pt {
        PieceType::Pawn => 'P',
        PieceType::Knight => 'N',
        PieceType::Bishop => 'B',
        PieceType::Rook => 'R',
        PieceType::Queen => 'Q',
        PieceType::King => 'K',
    }
}

// =========================================================================
// Parsing
// =========================================================================

/// Resolve a SAN string against a position. Accepts `e4`, `Nf3`, `Bxe5`,
/// `O-O`, `0-0-0`, `e8=Q`; check/mate/annotation suffixes are ignored.
/// Fails when no legal move matches, or when more than one does.
pub fn parse_san(pos: &Position, san: &str) -> Result<Move, ChessError> {
    let legal = movegen::legal_moves(pos);
    parse_san_with(pos, san, &legal)
}

/// Like [`parse_san`], but against a caller-held legal-move list.
pub fn parse_san_with(pos: &Position, san: &str, legal: &[Move]) -> Result<Move, ChessError> {
    let stripped = san.trim_end_matches(['+', '#', '!', '?']);

    if stripped == "O-O" || stripped == "0-0" {
        return find_castling(legal, true, san);
    }
    if stripped == "O-O-O" || stripped == "0-0-0" {
        return find_castling(legal, false, san);
    }

    let chars: Vec<char> = stripped.chars().collect();
    if chars.is_empty() {
        return Err(san_error(san, "empty string"));
    }

    // Promotion suffix `=X`.
    let (chars, promotion) = if chars.len() >= 2 && chars[chars.len() - 2] == '=' {
        let letter = chars[chars.len() - 1];
        let promo = PieceType::promotion_from_char(letter)
            .ok_or_else(|| ChessError::InvalidPromotion(letter.to_string()))?;
        (&chars[..chars.len() - 2], Some(promo))
    } else {
        (&chars[..], None)
    };

    // Leading piece letter; none means a pawn move.
    let (piece, rest) = match chars.first() {
        Some('N') => (PieceType::Knight, &chars[1..]),
        Some('B') => (PieceType::Bishop, &chars[1..]),
        Some('R') => (PieceType::Rook, &chars[1..]),
        Some('Q') => (PieceType::Queen, &chars[1..]),
        Some('K') => (PieceType::King, &chars[1..]),
        _ => (PieceType::Pawn, chars),
    };

    // Capture marker carries no information beyond the destination.
    let rest: Vec<char> = rest.iter().copied().filter(|&c| c != 'x').collect();
    if rest.len() < 2 {
        return Err(san_error(san, "too short"));
    }

    let dest_str: String = rest[rest.len() - 2..].iter().collect();
    let dest = Square::from_algebraic(&dest_str)
        .ok_or_else(|| ChessError::InvalidSquare(dest_str))?;

    // Whatever precedes the destination disambiguates the departure.
    let hint = &rest[..rest.len() - 2];
    let hint_file = hint
        .iter()
        .find(|c| c.is_ascii_lowercase())
        .map(|&c| c as u8 - b'a');
    let hint_rank = hint
        .iter()
        .find(|c| c.is_ascii_digit())
        .map(|&c| c as u8 - b'1');

    let matches: Vec<&Move> = legal
        .iter()
        .filter(|m| {
            m.to == dest
                && !m.flags.is_castling()
                && pos.piece_at(m.from).map(|(_, pt)| pt) == Some(piece)
                && hint_file.is_none_or(|f| m.from.file() == f)
                && hint_rank.is_none_or(|r| m.from.rank() == r)
                && m.promotion == promotion
        })
        .collect();

    match matches[..] {
        [mv] => Ok(*mv),
        [] => Err(san_error(san, "no legal move matches")),
        _ => Err(san_error(
            san,
            format!("ambiguous, {} candidates", matches.len()),
        )),
    }
}

fn find_castling(legal: &[Move], kingside: bool, san: &str) -> Result<Move, ChessError> {
    legal
        .iter()
        .find(|m| m.flags.is_castling() && m.flags.is_kingside_castle() == kingside)
        .copied()
        .ok_or_else(|| san_error(san, "castling is not legal here"))
}

fn san_error(san: &str, reason: impl Into<String>) -> ChessError {
    ChessError::IllegalMove {
        from: String::new(),
        to: san.to_string(),
        reason: format!("SAN: {}", reason.into()),
    }
}

// =========================================================================
// Tests
// =========================================================================
