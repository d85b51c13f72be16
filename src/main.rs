use std::io;

use minesweeper::game_loop;
use minesweeper::interaction;

const BOARD_SIZE: usize = 9;

fn main() -> io::Result<()> {
    env_logger::init();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    match interaction::prompt_board(&mut input, &mut output, BOARD_SIZE)? {
        Some(mut board) => game_loop(&mut board, &mut input, &mut output),
        None => Ok(())
    }
}
