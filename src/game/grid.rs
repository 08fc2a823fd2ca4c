use serde::{Deserialize, Serialize};

use super::state::{Position, Snake};

/// Contents of a single grid cell, encoded as its observation value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Body = 1,
    Head = 2,
    Cherry = 3,
}

impl Cell {
    pub const ALL: [Cell; 4] = [Cell::Empty, Cell::Body, Cell::Head, Cell::Cherry];

    /// Integer value used in observations
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Cell::Empty => "NOTHING",
            Cell::Body => "SNAKE_BODY",
            Cell::Head => "SNAKE_HEAD",
            Cell::Cherry => "CHERRY",
        }
    }

    /// Occupied by the snake, which is what cherry placement must avoid
    pub fn is_snake(self) -> bool {
        matches!(self, Cell::Body | Cell::Head)
    }
}

/// Occupancy of the board, row-major.
///
/// Always derived from a snake and a cherry; the engine never edits it by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl GameGrid {
    /// An all-empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Encode a snake and an optional cherry into a fresh grid
    pub fn from_parts(rows: usize, cols: usize, snake: &Snake, cherry: Option<Position>) -> Self {
        let mut grid = Self::new(rows, cols);
        grid.encode(snake, cherry);
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Check if a position is within the grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.row as usize * self.cols + pos.col as usize)
    }

    /// Cell at `pos`, `None` outside the grid
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Recompute every cell from the snake and cherry.
    ///
    /// Cells outside the grid are skipped. The head is written last so it
    /// wins over a cherry it has just reached.
    pub fn encode(&mut self, snake: &Snake, cherry: Option<Position>) {
        self.cells.fill(Cell::Empty);

        if let Some(cherry) = cherry {
            self.write(cherry, Cell::Cherry);
        }
        for &segment in snake.body() {
            self.write(segment, Cell::Body);
        }
        self.write(snake.head(), Cell::Head);
    }

    fn write(&mut self, pos: Position, cell: Cell) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = cell;
        }
    }

    pub(crate) fn set_cherry(&mut self, pos: Position) {
        self.write(pos, Cell::Cherry);
    }

    /// True if pos is inside the grid and not covered by the snake
    pub fn is_free(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|cell| !cell.is_snake())
    }

    /// Every position not covered by the snake, row-major
    pub fn free_cells(&self) -> Vec<Position> {
        self.positions()
            .filter(|&(_, cell)| !cell.is_snake())
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn has_free_cell(&self) -> bool {
        self.cells.iter().any(|cell| !cell.is_snake())
    }

    /// Iterate over (position, cell) pairs in row-major order
    pub fn positions(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(idx, &cell)| {
            let pos = Position::new((idx / self.cols) as i32, (idx % self.cols) as i32);
            (pos, cell)
        })
    }

    /// Positions holding `kind`, row-major
    pub fn find(&self, kind: Cell) -> Vec<Position> {
        self.positions()
            .filter(|&(_, cell)| cell == kind)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn head_position(&self) -> Option<Position> {
        self.find(Cell::Head).into_iter().next()
    }

    pub fn cherry_position(&self) -> Option<Position> {
        self.find(Cell::Cherry).into_iter().next()
    }

    /// Integer observation of shape (rows, cols)
    pub fn to_observation(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| row.iter().map(|cell| cell.code()).collect())
            .collect()
    }

    /// Row-major cell slice
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Name to observation value mapping handed to renderers
    pub fn legend() -> [(&'static str, u8); 4] {
        Cell::ALL.map(|cell| (cell.name(), cell.code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use std::collections::HashSet;

    #[test]
    fn test_bounds_checking() {
        let grid = GameGrid::new(20, 10);

        assert!(grid.in_bounds(Position::new(0, 0)));
        assert!(grid.in_bounds(Position::new(19, 9)));
        assert!(!grid.in_bounds(Position::new(-1, 0)));
        assert!(!grid.in_bounds(Position::new(20, 0)));
        assert!(!grid.in_bounds(Position::new(0, 10)));
        assert_eq!(grid.get(Position::new(0, -1)), None);
    }

    #[test]
    fn test_encode_values() {
        let snake = Snake::new(Position::new(5, 5), Direction::East);
        let grid = GameGrid::from_parts(10, 10, &snake, Some(Position::new(0, 0)));
        let obs = grid.to_observation();

        assert_eq!(obs.len(), 10);
        assert!(obs.iter().all(|row| row.len() == 10));
        assert_eq!(obs[5][5], 2);
        assert_eq!(obs[5][4], 1);
        assert_eq!(obs[0][0], 3);
        assert_eq!(obs.iter().flatten().filter(|&&v| v == 0).count(), 97);
    }

    #[test]
    fn test_round_trip_positions() {
        let snake = Snake::from_parts(
            Position::new(2, 3),
            [
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(4, 2),
                Position::new(4, 3),
            ],
            Direction::East,
        )
        .unwrap();
        let cherry = Position::new(0, 4);
        let grid = GameGrid::from_parts(6, 5, &snake, Some(cherry));

        assert_eq!(grid.head_position(), Some(snake.head()));
        assert_eq!(grid.cherry_position(), Some(cherry));

        let decoded: HashSet<Position> = grid.find(Cell::Body).into_iter().collect();
        let expected: HashSet<Position> = snake.body().iter().copied().collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_head_overwrites_cherry() {
        let snake = Snake::new(Position::new(1, 1), Direction::East);
        let grid = GameGrid::from_parts(3, 3, &snake, Some(Position::new(1, 1)));

        assert_eq!(grid.get(Position::new(1, 1)), Some(Cell::Head));
        assert_eq!(grid.cherry_position(), None);
    }

    #[test]
    fn test_out_of_bounds_head_is_skipped() {
        let mut snake = Snake::new(Position::new(0, 1), Direction::North);
        snake.move_towards(None);
        let grid = GameGrid::from_parts(3, 3, &snake, None);

        assert_eq!(grid.head_position(), None);
        assert_eq!(grid.find(Cell::Body), vec![Position::new(0, 1)]);
    }

    #[test]
    fn test_free_cells() {
        let snake = Snake::new(Position::new(0, 1), Direction::East);
        let grid = GameGrid::from_parts(1, 3, &snake, Some(Position::new(0, 2)));

        assert_eq!(grid.free_cells(), vec![Position::new(0, 2)]);
        assert!(grid.is_free(Position::new(0, 2)));
        assert!(!grid.is_free(Position::new(0, 0)));
        assert!(!grid.is_free(Position::new(5, 5)));
        assert!(grid.has_free_cell());
    }

    #[test]
    fn test_legend() {
        let legend = GameGrid::legend();
        assert_eq!(legend[0], ("NOTHING", 0));
        assert_eq!(legend[2], ("SNAKE_HEAD", 2));
    }
}
