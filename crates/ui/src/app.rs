use egui::{Color32, Rect, Sense, Vec2};

use ai::RandomOpponent;
use engine::{Board, Color, GameLogger, GameStatus, Move, PieceKind, Square};

/// The human always drives white; the random opponent answers as black.
const HUMAN_COLOR: Color = Color::White;

pub struct ChessApp {
    board: Board,
    selected_square: Option<Square>,
    legal_moves: Vec<Square>,
    opponent: RandomOpponent,
    logger: GameLogger,
    log_saved: bool,
}

impl ChessApp {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            selected_square: None,
            legal_moves: Vec::new(),
            opponent: RandomOpponent::new(),
            logger: GameLogger::new(),
            log_saved: false,
        }
    }

    fn new_game(&mut self) {
        self.board = Board::new();
        self.logger = GameLogger::new();
        self.log_saved = false;
        self.clear_selection();
    }

    fn clear_selection(&mut self) {
        self.selected_square = None;
        self.legal_moves.clear();
    }

    fn select_square(&mut self, square: Square) {
        self.selected_square = Some(square);
        self.legal_moves = self.board.get_legal_moves(square);
    }
}

impl Default for ChessApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for ChessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Chess");

            ui.horizontal(|ui| {
                if ui.button("New Game").clicked() {
                    self.new_game();
                }
                if ui.button("Undo").clicked() {
                    self.undo_last_moves();
                }
                ui.label(self.status_text());
            });

            let available_size = ui.available_size();
            let board_size = available_size.x.min(available_size.y) - 20.0;
            let square_size = board_size / 8.0;

            let board_rect = Rect::from_min_size(ui.cursor().min, Vec2::splat(board_size));

            let response = ui.allocate_rect(board_rect, Sense::click());

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let relative_pos = pos - board_rect.min;
                    if let Some(clicked_square) =
                        Square::from_coords(relative_pos.x, relative_pos.y, square_size)
                    {
                        self.handle_square_click(clicked_square);
                    }
                }
            }

            self.draw_board(ui, board_rect, square_size);
        });
    }
}

impl ChessApp {
    fn handle_square_click(&mut self, clicked_square: Square) {
        if self.board.game_status.is_over() || self.board.current_turn != HUMAN_COLOR {
            return;
        }

        let clicked_piece = self.board.get_piece(clicked_square);

        if let Some(selected) = self.selected_square {
            if selected == clicked_square {
                // Deselect
                self.clear_selection();
            } else if self.legal_moves.contains(&clicked_square) {
                self.make_human_move(Move::new(selected, clicked_square));
            } else if clicked_piece.map(|p| p.color) == Some(HUMAN_COLOR) {
                // Select a different piece
                self.select_square(clicked_square);
            } else {
                self.clear_selection();
            }
        } else if clicked_piece.map(|p| p.color) == Some(HUMAN_COLOR) {
            self.select_square(clicked_square);
        }
    }

    fn make_human_move(&mut self, mv: Move) {
        match self.board.try_make_move(mv) {
            Ok(record) => {
                self.logger.log_human_move(&record);
                self.logger.log_status(self.board.game_status);
                self.clear_selection();
                self.computer_reply();
            }
            Err(_) => self.clear_selection(),
        }
    }

    /// The opponent answers immediately in the same frame, as the game is
    /// fully synchronous.
    fn computer_reply(&mut self) {
        if !self.board.game_status.is_over() {
            if let Some(mv) = self.opponent.choose_move(&self.board) {
                if let Ok(record) = self.board.try_make_move(mv) {
                    self.logger.log_computer_move(&record);
                    self.logger.log_status(self.board.game_status);
                }
            }
        }

        if self.board.game_status.is_over() {
            self.finish_game();
        }
    }

    /// Revert to the human's previous turn: one ply if the game ended on
    /// the human move, otherwise the computer's reply and the human move
    /// beneath it.
    fn undo_last_moves(&mut self) {
        while let Ok(record) = self.board.undo_move() {
            self.logger.log_undo(&record);
            if self.board.current_turn == HUMAN_COLOR {
                break;
            }
        }
        self.log_saved = false;
        self.clear_selection();
    }

    fn finish_game(&mut self) {
        if self.log_saved {
            return;
        }

        let reason = self.status_text();
        match self.logger.save_to_file(&reason) {
            Ok(path) => eprintln!("game log saved to {}", path),
            Err(err) => eprintln!("failed to save game log: {}", err),
        }
        self.log_saved = true;
    }

    fn status_text(&self) -> String {
        match self.board.game_status {
            GameStatus::InProgress => format!("{} to move", self.board.current_turn),
            GameStatus::Check(color) => format!("{} is in check", color),
            GameStatus::Checkmate(color) => format!("Checkmate - {} wins", color.opposite()),
            GameStatus::Stalemate => "Stalemate - draw".to_string(),
        }
    }

    fn draw_board(&self, ui: &mut egui::Ui, board_rect: Rect, square_size: f32) {
        let painter = ui.painter();
        let last_move = self.board.get_last_move().map(|record| record.mv);

        for rank in 0..8 {
            for file in 0..8 {
                let square = Square::new(file, rank);
                let is_light = (file + rank) % 2 == 0;

                let square_rect = Rect::from_min_size(
                    board_rect.min
                        + Vec2::new(file as f32 * square_size, (7 - rank) as f32 * square_size),
                    Vec2::splat(square_size),
                );

                let base_color = if is_light {
                    Color32::from_rgb(240, 217, 181)
                } else {
                    Color32::from_rgb(181, 136, 99)
                };

                let is_last_move = last_move
                    .map(|mv| mv.from == square || mv.to == square)
                    .unwrap_or(false);

                let square_color = if Some(square) == self.selected_square {
                    Color32::from_rgb(255, 255, 0)
                } else if is_last_move {
                    Color32::from_rgb(255, 255, 153)
                } else {
                    base_color
                };

                painter.rect_filled(square_rect, 0.0, square_color);

                // Legal move indicators: dot on empty squares, ring on captures
                if self.legal_moves.contains(&square) {
                    let center = square_rect.center();
                    let indicator = Color32::from_rgba_premultiplied(128, 128, 128, 179);

                    if self.board.get_piece(square).is_some() {
                        let outer_radius = square_size * 0.4;
                        let inner_radius = square_size * 0.25;
                        painter.circle_filled(center, outer_radius, indicator);
                        painter.circle_filled(center, inner_radius, square_color);
                    } else {
                        painter.circle_filled(center, square_size * 0.15, indicator);
                    }
                }

                if let Some(piece) = self.board.get_piece(square) {
                    let glyph = piece_glyph(piece.color, piece.kind);
                    painter.text(
                        square_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        glyph,
                        egui::FontId::proportional(square_size * 0.8),
                        Color32::BLACK,
                    );
                }
            }
        }

        painter.rect_stroke(board_rect, 0.0, egui::Stroke::new(2.0, Color32::BLACK));
    }
}

/// Rendering lookup keyed on (color, kind); the engine knows nothing
/// about presentation.
fn piece_glyph(color: Color, kind: PieceKind) -> &'static str {
    match (color, kind) {
        (Color::White, PieceKind::King) => "♔",
        (Color::White, PieceKind::Queen) => "♕",
        (Color::White, PieceKind::Rook) => "♖",
        (Color::White, PieceKind::Bishop) => "♗",
        (Color::White, PieceKind::Knight) => "♘",
        (Color::White, PieceKind::Pawn) => "♙",
        (Color::Black, PieceKind::King) => "♚",
        (Color::Black, PieceKind::Queen) => "♛",
        (Color::Black, PieceKind::Rook) => "♜",
        (Color::Black, PieceKind::Bishop) => "♝",
        (Color::Black, PieceKind::Knight) => "♞",
        (Color::Black, PieceKind::Pawn) => "♟",
    }
}
