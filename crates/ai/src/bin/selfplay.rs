use ai::RandomOpponent;
use engine::{move_to_algebraic, Board};

// Random-vs-random games rarely run this long; the cap only guards
// against shuffling endgames (no draw rules in the engine).
const MAX_PLIES: u32 = 400;

fn main() {
    let mut board = Board::new();
    let mut player = RandomOpponent::new();
    let mut ply = 0;

    while !board.game_status.is_over() && ply < MAX_PLIES {
        let mv = match player.choose_move(&board) {
            Some(mv) => mv,
            None => break,
        };

        let mover = board.current_turn;
        let record = match board.try_make_move(mv) {
            Ok(record) => record,
            Err(err) => {
                eprintln!("engine rejected its own move {}: {}", move_to_algebraic(mv), err);
                break;
            }
        };

        ply += 1;
        let capture = if record.captured.is_some() { " (capture)" } else { "" };
        println!("{:3}. {} {}{}", ply, mover, move_to_algebraic(record.mv), capture);
    }

    println!("Final status after {} plies: {:?}", ply, board.game_status);
}
