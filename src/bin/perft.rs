//! Perft binary to verify move generation.
//!
//! usage: perft <depth> [fen]      (prints the per-move split, then the total)

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use chess_bot::board::Board;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(depth) = args.first().and_then(|d| d.parse::<usize>().ok()) else {
        eprintln!("usage: perft <depth> [fen]");
        return ExitCode::FAILURE;
    };
    let mut board = match args.get(1) {
        Some(fen) => match Board::try_from_fen(fen) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("bad FEN: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Board::new(),
    };

    let start = Instant::now();
    let split = board.divide(depth);
    let total: u64 = split.iter().map(|(_, n)| n).sum();
    let elapsed = start.elapsed();

    for (mv, nodes) in &split {
        println!("{mv}: {nodes}");
    }
    println!();
    println!("perft({depth}) = {total}");
    let nps = total as f64 / elapsed.as_secs_f64().max(1e-9);
    println!("time: {} ms, {:.0} nodes/s", elapsed.as_millis(), nps);
    ExitCode::SUCCESS
}
