use std::fs::{self, File};
use std::io::Write;

use crate::board::square_to_algebraic;
use crate::types::{GameMove, GameStatus};

/// Accumulates a human-readable game log in memory; written to a file
/// under logs/ when the game ends.
#[derive(Debug)]
pub struct GameLogger {
    pub log_buffer: String,
    move_count: u32,
}

impl GameLogger {
    pub fn new() -> Self {
        let mut logger = Self {
            log_buffer: String::with_capacity(16 * 1024),
            move_count: 0,
        };

        logger.log("=== Chess Game Log ===");
        logger.log(&format!(
            "Date: {}",
            chrono::Local::now().format("%m/%d/%Y %H:%M:%S")
        ));
        logger
    }

    pub fn log(&mut self, message: &str) {
        self.log_buffer.push_str(message);
        self.log_buffer.push('\n');
    }

    pub fn log_human_move(&mut self, record: &GameMove) {
        self.move_count += 1;
        let entry = format!("{}. {} (Human)", self.move_count, record_to_string(record));
        self.log(&entry);
    }

    pub fn log_computer_move(&mut self, record: &GameMove) {
        self.move_count += 1;
        let entry = format!(
            "{}. {} (Computer)",
            self.move_count,
            record_to_string(record)
        );
        self.log(&entry);
    }

    pub fn log_undo(&mut self, record: &GameMove) {
        let entry = format!("UNDO: {}", record_to_string(record));
        self.log(&entry);
        self.move_count = self.move_count.saturating_sub(1);
    }

    pub fn log_status(&mut self, status: GameStatus) {
        match status {
            GameStatus::Check(color) => self.log(&format!("{} is in check", color)),
            GameStatus::Checkmate(color) => {
                self.log(&format!("Checkmate - {} wins", color.opposite()))
            }
            GameStatus::Stalemate => self.log("Stalemate - draw"),
            GameStatus::InProgress => {}
        }
    }

    /// Write the buffered log to logs/<timestamp>.txt, returning the
    /// filename.
    pub fn save_to_file(&mut self, reason: &str) -> std::io::Result<String> {
        fs::create_dir_all("logs")?;

        let now = chrono::Local::now();
        let filename = format!("logs/{}.txt", now.format("%m_%d_%Y_%H_%M_%S"));

        self.log(&format!("Game ended: {}", reason));

        let mut file = File::create(&filename)?;
        file.write_all(self.log_buffer.as_bytes())?;
        Ok(filename)
    }
}

fn record_to_string(record: &GameMove) -> String {
    let from = square_to_algebraic(record.mv.from);
    let to = square_to_algebraic(record.mv.to);
    let separator = if record.captured.is_some() { "x" } else { "-" };

    if record.promoted {
        format!("{}{}{}=Q", from, separator, to)
    } else {
        format!("{}{}{}", from, separator, to)
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}
