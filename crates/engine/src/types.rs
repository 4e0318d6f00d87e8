use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(pub u8);

impl Square {
    pub fn new(file: u8, rank: u8) -> Self {
        Self(rank * 8 + file)
    }

    pub fn file(&self) -> u8 {
        self.0 % 8
    }

    pub fn rank(&self) -> u8 {
        self.0 / 8
    }

    /// Step by (file, rank) deltas, returning None when the result
    /// leaves the board.
    pub fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;

        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    pub fn from_coords(x: f32, y: f32, square_size: f32) -> Option<Self> {
        let file = (x / square_size) as u8;
        let rank_from_top = (y / square_size) as u8; // Screen y grows downward

        if file < 8 && rank_from_top < 8 {
            Some(Self::new(file, 7 - rank_from_top))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank direction pawns of this color advance in. Rank 0 is white's
    /// back rank, so white pawns move up the board.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A piece on the board. Position is implied by the square holding it;
/// `has_moved` only exists to gate the pawn's initial two-square advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            has_moved: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Check(Color),     // Which color is in check
    Checkmate(Color), // Which color is checkmated (other color wins)
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Stalemate)
    }
}

/// Record of an applied move, carrying enough state to undo it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameMove {
    pub mv: Move,
    /// The moving piece as it stood before the move (keeps the old
    /// `has_moved` flag for undo).
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promoted: bool,
    pub previous_status: GameStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece on the source square")]
    EmptySource,
    #[error("piece belongs to the opponent")]
    WrongColor,
    #[error("destination is not a legal move for this piece")]
    IllegalDestination,
    #[error("game is already over")]
    GameOver,
    #[error("no moves to undo")]
    NothingToUndo,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN must contain piece placement and active color")]
    MissingFields,
    #[error("piece placement must have 8 ranks")]
    BadRankCount,
    #[error("rank does not describe exactly 8 files: {0}")]
    BadRank(String),
    #[error("unknown piece character: {0}")]
    UnknownPiece(char),
    #[error("invalid active color: {0}")]
    BadActiveColor(String),
}
