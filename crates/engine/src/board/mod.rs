use crate::types::*;

pub mod moves;
pub mod state;
pub mod validation;

#[derive(Debug, Clone)]
pub struct Board {
    pub squares: [Option<Piece>; 64],
    pub current_turn: Color,
    pub move_history: Vec<GameMove>,
    pub game_status: GameStatus,
}

impl Board {
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_starting_position();
        board
    }

    /// A board with no pieces, white to move. Starting point for FEN
    /// parsing and hand-built test positions.
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            current_turn: Color::White,
            move_history: Vec::new(),
            game_status: GameStatus::InProgress,
        }
    }

    fn setup_starting_position(&mut self) {
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (file, &kind) in back_rank.iter().enumerate() {
            let file = file as u8;
            self.set_piece(Square::new(file, 0), Some(Piece::new(Color::White, kind)));
            self.set_piece(Square::new(file, 7), Some(Piece::new(Color::Black, kind)));
        }

        for file in 0..8 {
            self.set_piece(
                Square::new(file, 1),
                Some(Piece::new(Color::White, PieceKind::Pawn)),
            );
            self.set_piece(
                Square::new(file, 6),
                Some(Piece::new(Color::Black, PieceKind::Pawn)),
            );
        }
    }

    // Basic board operations
    pub fn get_piece(&self, square: Square) -> Option<Piece> {
        self.squares[square.0 as usize]
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.0 as usize] = piece;
    }

    /// Copy of the position alone, without history. The legality filter
    /// probes candidate moves on such copies so the real board is never
    /// mutated mid-query.
    pub(crate) fn position_copy(&self) -> Self {
        Self {
            squares: self.squares,
            current_turn: self.current_turn,
            move_history: Vec::new(),
            game_status: GameStatus::InProgress,
        }
    }

    /// Build a board from the first two FEN fields (piece placement and
    /// active color). Castling, en passant and clock fields are accepted
    /// and ignored: this engine models none of them.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(FenError::MissingFields);
        }

        let mut board = Self::empty();
        board.parse_piece_placement(parts[0])?;

        board.current_turn = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadActiveColor(other.to_string())),
        };

        board.update_game_status();
        Ok(board)
    }

    fn parse_piece_placement(&mut self, placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadRankCount);
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // FEN starts from rank 8, we start from rank 0
            let mut file = 0u8;

            for ch in rank_str.chars() {
                if let Some(empty_squares) = ch.to_digit(10) {
                    file += empty_squares as u8;
                } else {
                    if file >= 8 {
                        return Err(FenError::BadRank(rank_str.to_string()));
                    }

                    let mut piece = char_to_piece(ch)?;
                    // FEN carries no has_moved flag; a pawn off its starting
                    // rank must have moved, which is all the flag gates.
                    if piece.kind == PieceKind::Pawn {
                        piece.has_moved = rank != piece.color.pawn_start_rank();
                    }
                    self.set_piece(Square::new(file, rank), Some(piece));
                    file += 1;
                }
            }

            if file != 8 {
                return Err(FenError::BadRank(rank_str.to_string()));
            }
        }

        Ok(())
    }
}

fn char_to_piece(ch: char) -> Result<Piece, FenError> {
    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return Err(FenError::UnknownPiece(ch)),
    };

    let color = if ch.is_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Ok(Piece::new(color, kind))
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// Display helpers (outside the impl block)
pub fn square_to_algebraic(square: Square) -> String {
    let file = (b'a' + square.file()) as char;
    let rank = (b'1' + square.rank()) as char;
    format!("{}{}", file, rank)
}

pub fn move_to_algebraic(mv: Move) -> String {
    format!(
        "{}{}",
        square_to_algebraic(mv.from),
        square_to_algebraic(mv.to)
    )
}
