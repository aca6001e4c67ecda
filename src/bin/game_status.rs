//! Print the status of a game given as moves from the start (or a FEN).
//!
//! usage: game_status [--fen "<fen>"] <move1> <move2> ...

use std::env;
use std::process::ExitCode;

use chess_bot::board::{Board, GameStatus};

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1).peekable();
    let mut board = if args.peek().map(String::as_str) == Some("--fen") {
        args.next();
        let Some(fen) = args.next() else {
            eprintln!("usage: game_status [--fen \"<fen>\"] <move1> <move2> ...");
            return ExitCode::FAILURE;
        };
        match Board::try_from_fen(&fen) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("bad FEN: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        Board::new()
    };

    for text in args {
        if let Err(e) = board.make_move_str(&text) {
            eprintln!("{text}: {e}");
            return ExitCode::FAILURE;
        }
    }

    let legal_moves = board.generate_moves();
    let status = match board.game_status() {
        GameStatus::NoMate => "ongoing",
        GameStatus::Lose => "checkmate",
        GameStatus::Stalemate => "draw",
    };
    println!("{board}");
    println!("fen: {}", board.to_fen());
    println!("side_to_move: {}", board.side_to_move());
    println!("status: {status}");
    println!("in_check: {}", board.is_in_check());
    println!("legal_moves: {}", legal_moves.len());
    for &mv in &legal_moves {
        println!("{mv} {}", board.to_algebraic(mv));
    }
    ExitCode::SUCCESS
}
