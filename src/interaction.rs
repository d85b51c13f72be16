use regex::Regex;
use std::io::{self, BufRead, Write};
use super::board::Board;
use super::board::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    Free(Point),
    Mark(Point)
}

pub struct HumanAgent {
    pattern: Regex
}

impl Default for HumanAgent {
    fn default() -> Self {
        HumanAgent::new()
    }
}

impl HumanAgent {
    pub fn new() -> HumanAgent {
        // column first, then row, both 1-indexed
        let pattern = Regex::new(r"^\s*(\d+)\s+(\d+)\s+(?i:(free|mine))\s*$").expect("move pattern is valid");
        HumanAgent { pattern }
    }

    /// Prompts until a well-formed move is read. `None` once input runs out.
    pub fn generate_move<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> io::Result<Option<ActionType>> {
        loop {
            write!(output, "Set/unset mines marks or claim a cell as free: ")?;
            output.flush()?;
            let line = match read_line(input)? {
                Some(line) => line,
                None => return Ok(None)
            };
            match self.action_from_string(&line) {
                Some(action) => return Ok(Some(action)),
                None => {
                    log::debug!("unparsable move {:?}", line.trim());
                    writeln!(output, "Must be of the form: COLUMN ROW free|mine")?;
                }
            }
        }
    }

    pub fn action_from_string(&self, input: &str) -> Option<ActionType> {
        let cap = self.pattern.captures(input)?;
        let point = Point::from_input(&cap[2], &cap[1])?;
        match cap[3].to_lowercase().as_str() {
            "free" => Some(ActionType::Free(point)),
            "mine" => Some(ActionType::Mark(point)),
            _ => None
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None)
    }
    Ok(Some(line))
}

/// Asks for a mine count until it yields a playable board of `size`.
pub fn prompt_board<R: BufRead, W: Write>(input: &mut R, output: &mut W, size: usize) -> io::Result<Option<Board>> {
    loop {
        write!(output, "How many mines do you want on the field? ")?;
        output.flush()?;
        let line = match read_line(input)? {
            Some(line) => line,
            None => return Ok(None)
        };
        match line.trim().parse::<usize>() {
            Ok(mine_count) => match Board::new(size, mine_count) {
                Ok(board) => return Ok(Some(board)),
                Err(err) => writeln!(output, "{}", err)?
            },
            Err(_) => writeln!(output, "Please enter a whole number")?
        }
    }
}
