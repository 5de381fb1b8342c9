use cozy_chess::{Board as CozyBoard, File, Move, Piece, Square};
use crate::error::BoardError;

/// Board state backed by cozy-chess, spoken to in FEN and UCI strings.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default() }
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        CozyBoard::from_fen(fen.trim(), false)
            .map(|b| Self { board: b })
            .map_err(|e| BoardError::InvalidFen { fen: fen.to_string(), reason: format!("{e:?}") })
    }

    pub fn to_fen(&self) -> String { format!("{}", self.board) }

    /// Legal moves in generation order. Repeated calls on the same board
    /// return the same order.
    pub fn legal_moves(&self) -> Vec<String> {
        self.legal_pairs().into_iter().map(|(_, uci)| uci).collect()
    }

    pub fn play_uci(&mut self, mv_uci: &str) -> Result<(), BoardError> {
        if !is_uci_move(mv_uci) {
            return Err(BoardError::BadMoveSyntax { mv: mv_uci.to_string() });
        }
        let found = self.legal_pairs().into_iter().find(|(_, uci)| uci == mv_uci).map(|(m, _)| m);
        match found {
            Some(m) => { self.board.play(m); Ok(()) }
            None => Err(BoardError::IllegalMove { mv: mv_uci.to_string(), fen: self.to_fen() }),
        }
    }

    fn legal_pairs(&self) -> Vec<(Move, String)> {
        let mut out = Vec::new();
        self.board.generate_moves(|moves| {
            for m in moves { out.push((m, uci_string(&self.board, m))); }
            false
        });
        out
    }
}

// cozy-chess encodes castling as king-takes-own-rook; UCI wants the king's
// two-square destination.
fn uci_string(board: &CozyBoard, mv: Move) -> String {
    let is_castle = board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to) == Some(board.side_to_move());
    if !is_castle { return format!("{}", mv); }
    let file = if (mv.to.file() as usize) > (mv.from.file() as usize) { File::G } else { File::C };
    let to = Square::new(file, mv.from.rank());
    format!("{}", Move { from: mv.from, to, promotion: None })
}

/// Syntactic check for a coordinate move: `e2e4`, `a7a8q`.
pub fn is_uci_move(s: &str) -> bool {
    let b = s.as_bytes();
    let square = |f: u8, r: u8| (b'a'..=b'h').contains(&f) && (b'1'..=b'8').contains(&r);
    match b.len() {
        4 => square(b[0], b[1]) && square(b[2], b[3]),
        5 => square(b[0], b[1]) && square(b[2], b[3]) && matches!(b[4], b'q' | b'r' | b'b' | b'n'),
        _ => false,
    }
}
