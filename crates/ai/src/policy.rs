use engine::{Board, Move, Square};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// The computer opponent: gathers every legal move for the side to move
/// and picks one uniformly at random, preferring captures when any exist.
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic opponent for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a move for the side to move, or None when it has none.
    /// The board is only queried, never mutated.
    pub fn choose_move(&mut self, board: &Board) -> Option<Move> {
        let mut captures = Vec::new();
        let mut quiet = Vec::new();

        for index in 0..64 {
            let from = Square(index);
            let piece = match board.get_piece(from) {
                Some(piece) => piece,
                None => continue,
            };
            if piece.color != board.current_turn {
                continue;
            }

            for to in board.get_legal_moves(from) {
                // Legal moves never land on a friendly piece, so any
                // occupied destination is a capture
                if board.get_piece(to).is_some() {
                    captures.push(Move::new(from, to));
                } else {
                    quiet.push(Move::new(from, to));
                }
            }
        }

        if captures.is_empty() {
            quiet.choose(&mut self.rng).copied()
        } else {
            captures.choose(&mut self.rng).copied()
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}
