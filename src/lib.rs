pub mod board;
pub mod error;
pub mod generator;
pub mod interaction;
use std::io::{self, BufRead, Write};

use board::Board;
use interaction::{ActionType, HumanAgent};

/// Plays `board` to completion, reading moves from `input`. Returns early without a
/// verdict if the input runs out.
pub fn game_loop<R: BufRead, W: Write>(board: &mut Board, input: &mut R, output: &mut W) -> io::Result<()> {
    let agent = HumanAgent::new();
    writeln!(output, "{}", board)?;
    while !board.is_completed() {
        let action = match agent.generate_move(input, output)? {
            Some(action) => action,
            None => return Ok(())
        };
        let result = match action {
            ActionType::Free(point) => board.open(&point),
            ActionType::Mark(point) => board.mark(&point)
        };
        if let Err(err) = result {
            writeln!(output, "{}", err)?;
        }
        writeln!(output, "\n{}", board)?;
        if !board.is_completed() {
            writeln!(output, "Mines left: {}", board.remaining_mines())?;
        }
    }
    if board.is_lost() {
        writeln!(output, "You stepped on a mine and failed!")?;
    }
    else{
        writeln!(output, "Congratulations! You found all mines!")?;
    }
    Ok(())
}

#[cfg(test)]
mod game_loop_tests {
    use super::*;
    use crate::board::Point;
    use crate::generator::FixedSampler;
    use std::io::Cursor;

    fn play(moves: &str) -> String {
        let wall: Vec<Point> = (0..5).map(|row| Point(row, 2)).collect();
        let mut board = Board::with_sampler(5, 5, Box::new(FixedSampler::new(wall))).unwrap();
        let mut output = Vec::new();
        game_loop(&mut board, &mut Cursor::new(moves), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn reveal_win() {
        let printed = play("1 1 free\n5 1 free\n");
        assert!(printed.contains("Mines left: 5"));
        assert!(printed.ends_with("Congratulations! You found all mines!\n"));
    }

    #[test]
    fn flag_win() {
        let printed = play("1 1 free\n3 1 mine\n3 2 mine\n3 3 mine\n3 4 mine\n3 5 mine\n");
        assert!(printed.contains("Mines left: 1"));
        assert!(printed.ends_with("Congratulations! You found all mines!\n"));
    }

    #[test]
    fn stepping_on_a_mine() {
        let printed = play("1 1 free\n3 2 free\n1 5 free\n");
        assert!(printed.contains("X"));
        assert!(printed.ends_with("You stepped on a mine and failed!\n"));
    }

    #[test]
    fn bad_moves_keep_the_game_going() {
        let printed = play("9 9 free\nflag it\n");
        assert!(printed.contains("Cell at column 9, row 9 is outside the board"));
        assert!(printed.contains("Must be of the form"));
        assert!(!printed.contains("Congratulations"));
        assert!(!printed.contains("failed"));
    }
}
