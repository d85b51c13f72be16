use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use itertools::Itertools;

use super::error::{GameError, Result};
use super::generator::{PointSampler, RandomSampler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Mine,
    Empty
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeState {
    Unknown,
    Flag,
    Known
}

impl KnowledgeState {
    pub fn is_known(&self) -> bool{
        match *self {
            KnowledgeState::Known => true,
            _ => false
        }
    }

    pub fn is_flag(&self) -> bool{
        match *self {
            KnowledgeState::Flag => true,
            _ => false
        }
    }

    pub fn is_unknown(&self) -> bool{
        match *self {
            KnowledgeState::Unknown => true,
            _ => false
        }
    }
}

#[derive(Debug)]
pub struct Cell {
    pub content: Content,
    pub mined_neighbor_count: usize,
    pub knowledge: KnowledgeState,
    pub point: Point
}

impl Cell {
    fn create_empty(point: Point) -> Cell {
        Cell{content: Content::Empty, mined_neighbor_count: 0, knowledge: KnowledgeState::Unknown, point}
    }

    pub fn is_mine(&self) -> bool {
        self.content == Content::Mine
    }

    pub fn toggle_flag(&mut self){
        let new_state = match self.knowledge {
            KnowledgeState::Known => KnowledgeState::Known,
            KnowledgeState::Flag => KnowledgeState::Unknown,
            KnowledgeState::Unknown => KnowledgeState::Flag
        };
        self.knowledge = new_state;
    }

    fn to_str(&self, game_over: bool) -> String {
        match (&self.knowledge, &self.content) {
            (KnowledgeState::Flag, _) => String::from("*"),
            (KnowledgeState::Known, _) => {
                if self.mined_neighbor_count == 0{
                    String::from("/")
                }
                else{
                    self.mined_neighbor_count.to_string()
                }
            }
            (KnowledgeState::Unknown, Content::Mine) if game_over => String::from("X"),
            (KnowledgeState::Unknown, _) => String::from(".")
        }
    }
}

/// Zero-indexed `(row, column)` position.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Copy)]
pub struct Point(pub usize, pub usize);

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}, row {}", self.1 + 1, self.0 + 1)
    }
}

impl Point {
    /// Parses the 1-indexed row and column a player types, `"3"` being index 2.
    pub fn from_input(row: &str, col: &str) -> Option<Point> {
        let parse = |s: &str| s.trim().parse::<usize>().ok().and_then(|x| x.checked_sub(1));
        Some(Point(parse(row)?, parse(col)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    pub width: usize,
    pub height: usize
}

impl BoardSize {
    pub fn square(side: usize) -> BoardSize {
        BoardSize{width: side, height: side}
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.0 < self.height && point.1 < self.width
    }

    /// Up to eight surrounding positions in row-major order, clipped at the edges.
    pub fn neighbor_points(&self, point: &Point) -> Vec<Point>{
        let mut product = Vec::with_capacity(8);
        for i in -1..2{
            for j in -1..2{
                if i != 0 || j != 0 {
                    product.push((i, j))
                }
            }
        }
        product.iter()
               .map(|(x, y)| (x+(point.0 as i64), y+(point.1 as i64)))
               .filter(|(x, y)| *x >= 0 && *x < self.height as i64 && *y >= 0 && *y < self.width as i64)
               .map(|(x, y)| Point(x as usize, y as usize))
               .collect()
    }
}

pub struct Board {
    size: BoardSize,
    field: Vec<Vec<Cell>>,
    mine_count: usize,
    initialized: bool,
    game_over: bool,
    revealed_count: usize,
    flagged_count: usize,
    sampler: Box<dyn PointSampler>,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl Board {
    /// Square board whose mines are drawn from OS entropy on the first `open`.
    pub fn new(size: usize, mine_count: usize) -> Result<Board> {
        Board::with_sampler(size, mine_count, Box::new(RandomSampler::new(StdRng::from_entropy())))
    }

    pub fn with_seed(size: usize, mine_count: usize, seed: u64) -> Result<Board> {
        Board::with_sampler(size, mine_count, Box::new(RandomSampler::new(StdRng::seed_from_u64(seed))))
    }

    pub fn with_sampler(size: usize, mine_count: usize, sampler: Box<dyn PointSampler>) -> Result<Board> {
        let size = BoardSize::square(size);
        // at least one safe cell is needed for the first move
        if size.area() == 0 || mine_count >= size.area() {
            return Err(GameError::InvalidConfiguration{size: size.width, mine_count})
        }
        let mut field = Vec::with_capacity(size.height);
        for i in 0..size.height {
            let mut row_vec = Vec::with_capacity(size.width);
            for j in 0..size.width {
                row_vec.push(Cell::create_empty(Point(i, j)));
            }
            field.push(row_vec);
        }

        Ok(Board {
            size,
            field,
            mine_count,
            initialized: false,
            game_over: false,
            revealed_count: 0,
            flagged_count: 0,
            sampler,
        })
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged_count
    }

    /// Mines not yet accounted for by a flag; negative when the player over-flags.
    pub fn remaining_mines(&self) -> isize {
        self.mine_count as isize - self.flagged_count as isize
    }

    pub fn retrieve_cell(&self, point: &Point) -> Option<&Cell>{
        if !self.size.contains(point) {
            return None
        }
        Some(&self.field[point.0][point.1])
    }

    fn cell(&self, point: &Point) -> &Cell{
        &self.field[point.0][point.1]
    }

    fn cell_mut(&mut self, point: &Point) -> &mut Cell{
        &mut self.field[point.0][point.1]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.field.iter().flatten()
    }

    pub fn neighbor_points(&self, point: &Point) -> Vec<Point>{
        self.size.neighbor_points(point)
    }

    fn initialize(&mut self, disallowed: &Point){
        for _ in 0..self.mine_count {
            let point = loop {
                let candidate = self.sampler.sample(&self.size);
                if self.size.contains(&candidate) && candidate != *disallowed && !self.cell(&candidate).is_mine() {
                    break candidate
                }
            };
            self.cell_mut(&point).content = Content::Mine;
            for neighbor in self.neighbor_points(&point){
                let cell = self.cell_mut(&neighbor);
                if !cell.is_mine() {
                    cell.mined_neighbor_count += 1;
                }
            }
            log::debug!("placed mine at {:?}", point);
        }
        self.initialized = true;
    }

    fn check_move(&self, point: &Point) -> Result<()> {
        if !self.size.contains(point) {
            log::warn!("rejected move outside the board at {:?}", point);
            return Err(GameError::OutOfBounds(*point))
        }
        if self.is_completed() {
            log::warn!("rejected move at {:?}, game already over", point);
            return Err(GameError::AlreadyOver)
        }
        Ok(())
    }

    /// Reveals `point`, flooding outwards through cells with no adjacent mines.
    /// Mines are laid on the first call, never under `point`.
    pub fn open(&mut self, point: &Point) -> Result<()> {
        self.check_move(point)?;
        log::debug!("open {:?}", point);
        if !self.initialized {
            self.initialize(point);
        }

        if self.cell(point).knowledge.is_flag() {
            self.cell_mut(point).knowledge = KnowledgeState::Unknown;
            self.flagged_count -= 1;
        }

        if self.cell(point).is_mine() {
            self.game_over = true;
            self.clear_flags();
            log::info!("stepped on a mine at {:?}", point);
            return Ok(())
        }

        self.reveal_region(*point);
        if self.is_won() {
            log::info!("board cleared");
        }
        Ok(())
    }

    fn reveal_region(&mut self, start: Point) {
        let mut pending = vec![start];
        while let Some(point) = pending.pop() {
            let cell = self.cell(&point);
            if cell.knowledge.is_known() || cell.is_mine() {
                continue
            }
            let was_flag = cell.knowledge.is_flag();
            let expand = cell.mined_neighbor_count == 0;

            self.cell_mut(&point).knowledge = KnowledgeState::Known;
            self.revealed_count += 1;
            if was_flag {
                self.flagged_count -= 1;
            }

            if expand {
                let next: Vec<Point> = self.neighbor_points(&point).into_iter()
                    .filter(|neighbor| {
                        let cell = self.cell(neighbor);
                        !cell.knowledge.is_known() && !cell.is_mine()
                    })
                    .collect();
                pending.extend(next);
            }
        }
    }

    fn clear_flags(&mut self) {
        for cell in self.field.iter_mut().flatten() {
            if cell.knowledge.is_flag() {
                cell.knowledge = KnowledgeState::Unknown;
            }
        }
        self.flagged_count = 0;
    }

    /// Toggles a flag; revealed cells are left alone.
    pub fn mark(&mut self, point: &Point) -> Result<()> {
        self.check_move(point)?;
        let cell = self.cell_mut(point);
        let before = cell.knowledge;
        cell.toggle_flag();
        match (before, cell.knowledge) {
            (KnowledgeState::Unknown, KnowledgeState::Flag) => self.flagged_count += 1,
            (KnowledgeState::Flag, KnowledgeState::Unknown) => self.flagged_count -= 1,
            _ => {}
        }
        log::debug!("mark {:?}: {:?} -> {:?}", point, before, self.cell(point).knowledge);
        Ok(())
    }

    pub fn is_lost(&self) -> bool {
        self.game_over
    }

    pub fn is_won(&self) -> bool {
        !self.game_over && (self.all_mines_flagged() || self.all_safe_cells_revealed())
    }

    pub fn is_completed(&self) -> bool {
        self.game_over || self.all_mines_flagged() || self.all_safe_cells_revealed()
    }

    // flags have to match the mine set exactly, a stray flag on a safe cell blocks the win
    fn all_mines_flagged(&self) -> bool {
        self.initialized
            && self.flagged_count == self.mine_count
            && self.cells().filter(|cell| cell.knowledge.is_flag()).all(|cell| cell.is_mine())
    }

    fn all_safe_cells_revealed(&self) -> bool {
        self.revealed_count == self.size.area() - self.mine_count
    }

    pub fn render(&self) -> String {
        let pad = self.size.width.max(self.size.height).to_string().len();
        let border = "—".repeat(self.size.width * pad);
        let header = (1..=self.size.width)
            .map(|i| format!("{:>pad$}", i, pad = pad))
            .join("");

        let mut result = format!("{:>pad$}│{}|\n", "", header, pad = pad);
        result += &format!("{}│{}|\n", "—".repeat(pad), border);
        for (i, row) in self.field.iter().enumerate() {
            let line = row.iter()
                .map(|cell| format!("{:>pad$}", cell.to_str(self.game_over), pad = pad))
                .join("");
            result += &format!("{:>pad$}|{}|\n", i + 1, line, pad = pad);
        }
        result += &format!("{}│{}|\n", "—".repeat(pad), border);
        result
    }
}

#[cfg(test)]
use proptest::prelude::*;
