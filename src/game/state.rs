use std::collections::VecDeque;

use super::action::Direction;
use super::error::ConfigError;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (drow, dcol) = direction.delta();
        self.moved_by(drow, dcol)
    }

    /// Euclidean distance between two cells
    pub fn distance_to(&self, other: Position) -> f32 {
        let drow = (self.row - other.row) as f32;
        let dcol = (self.col - other.col) as f32;
        drow.hypot(dcol)
    }

    fn is_adjacent(&self, other: Position) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

/// What a single call to [`Snake::move_towards`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The new head landed on a body segment
    pub body_collision: bool,
    /// Tail tip dropped by this move, if the snake was not growing
    pub vacated: Option<Position>,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    head: Position,
    /// Segments behind the head; index 0 touches the head, the back is the tail tip
    body: VecDeque<Position>,
    heading: Direction,
    growth_pending: bool,
}

impl Snake {
    /// Create a snake with a single body segment trailing behind the head
    pub fn new(head: Position, heading: Direction) -> Self {
        let (drow, dcol) = heading.delta();
        let tail = head.moved_by(-drow, -dcol);

        Self {
            head,
            body: VecDeque::from([tail]),
            heading,
            growth_pending: false,
        }
    }

    /// Build a snake from explicit segments.
    ///
    /// The body must be non-empty, contiguous, start next to the head and
    /// never overlap itself or the head.
    pub fn from_parts(
        head: Position,
        body: impl IntoIterator<Item = Position>,
        heading: Direction,
    ) -> Result<Self, ConfigError> {
        let body: VecDeque<Position> = body.into_iter().collect();

        let Some(&neck) = body.front() else {
            return Err(ConfigError::InvalidSnake("body must not be empty"));
        };
        if !head.is_adjacent(neck) {
            return Err(ConfigError::InvalidSnake(
                "first body segment must touch the head",
            ));
        }
        if body
            .iter()
            .zip(body.iter().skip(1))
            .any(|(a, b)| !a.is_adjacent(*b))
        {
            return Err(ConfigError::InvalidSnake("body segments must be contiguous"));
        }
        for (i, segment) in body.iter().enumerate() {
            if *segment == head || body.iter().skip(i + 1).any(|other| other == segment) {
                return Err(ConfigError::InvalidSnake("segments must not overlap"));
            }
        }

        Ok(Self {
            head,
            body,
            heading,
            growth_pending: false,
        })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.head
    }

    /// Body segments, neck first
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn growth_pending(&self) -> bool {
        self.growth_pending
    }

    /// Get the tail tip
    pub fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or(self.head)
    }

    /// Number of cells covered, head included
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Always false, a snake keeps at least its head and one segment
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if position is covered by head or body
    pub fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.collides_with_body(pos)
    }

    /// Advance one cell.
    ///
    /// `None` or a reversal of the current heading keeps the snake going
    /// straight. The head may leave the grid; bounds are the caller's concern.
    pub fn move_towards(&mut self, requested: Option<Direction>) -> MoveOutcome {
        match requested {
            Some(direction) if !self.heading.is_opposite(direction) => {
                self.heading = direction;
            }
            _ => {}
        }

        self.body.push_front(self.head);

        let vacated = if self.growth_pending {
            self.growth_pending = false;
            None
        } else {
            self.body.pop_back()
        };

        self.head = self.head.moved_in_direction(self.heading);

        MoveOutcome {
            body_collision: self.collides_with_body(self.head),
            vacated,
        }
    }

    /// Keep the tail tip on the next move
    pub fn extend_tail(&mut self) {
        self.growth_pending = true;
    }

    /// Euclidean distance from the head to `pos`
    pub fn distance_to(&self, pos: Position) -> f32 {
        self.head.distance_to(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_snake() -> Snake {
        // (5,5) head moving east, body curls down and right underneath it
        Snake::from_parts(
            Position::new(5, 5),
            [
                Position::new(5, 4),
                Position::new(6, 4),
                Position::new(6, 5),
                Position::new(6, 6),
            ],
            Direction::East,
        )
        .unwrap()
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_in_direction(Direction::North), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::South), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::East), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::West), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::East);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body()[0], Position::new(5, 4));
        assert!(!snake.growth_pending());

        let snake = Snake::new(Position::new(5, 5), Direction::North);
        assert_eq!(snake.tail(), Position::new(6, 5));
    }

    #[test]
    fn test_from_parts_validation() {
        let head = Position::new(2, 2);
        assert!(Snake::from_parts(head, Vec::new(), Direction::East).is_err());
        assert!(Snake::from_parts(head, [Position::new(4, 4)], Direction::East).is_err());
        assert!(
            Snake::from_parts(
                head,
                [Position::new(2, 1), Position::new(0, 0)],
                Direction::East
            )
            .is_err()
        );
        assert!(
            Snake::from_parts(
                head,
                [Position::new(2, 1), Position::new(2, 2)],
                Direction::East
            )
            .is_err()
        );
        assert!(Snake::from_parts(head, [Position::new(1, 2)], Direction::South).is_ok());
    }

    #[test]
    fn test_move_every_non_reversing_direction() {
        for direction in [Direction::North, Direction::South, Direction::East] {
            let mut snake = Snake::new(Position::new(5, 5), Direction::East);
            let outcome = snake.move_towards(Some(direction));

            assert_eq!(snake.head(), Position::new(5, 5).moved_in_direction(direction));
            assert_eq!(snake.heading(), direction);
            assert_eq!(snake.len(), 2);
            assert_eq!(snake.body()[0], Position::new(5, 5));
            assert_eq!(outcome.vacated, Some(Position::new(5, 4)));
            assert!(!outcome.body_collision);
        }
    }

    #[test]
    fn test_reverse_request_continues_straight() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::East);
        snake.move_towards(Some(Direction::West));

        assert_eq!(snake.heading(), Direction::East);
        assert_eq!(snake.head(), Position::new(5, 6));
    }

    #[test]
    fn test_none_continues_straight() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::South);
        snake.move_towards(None);

        assert_eq!(snake.heading(), Direction::South);
        assert_eq!(snake.head(), Position::new(6, 5));
    }

    #[test]
    fn test_extend_tail_grows_on_next_move() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::East);
        snake.extend_tail();
        assert_eq!(snake.len(), 2);

        let outcome = snake.move_towards(Some(Direction::East));
        assert_eq!(outcome.vacated, None);
        assert_eq!(snake.len(), 3);
        assert!(!snake.growth_pending());

        // Only one move is affected
        let outcome = snake.move_towards(Some(Direction::East));
        assert_eq!(outcome.vacated, Some(Position::new(5, 4)));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_body_collision() {
        let mut snake = corner_snake();
        let outcome = snake.move_towards(Some(Direction::South));

        assert!(outcome.body_collision);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(outcome.vacated, Some(Position::new(6, 6)));
    }

    #[test]
    fn test_moving_into_vacated_tail_is_not_a_collision() {
        // Square loop: the head chases the tail tip which leaves this step
        let mut snake = Snake::from_parts(
            Position::new(0, 0),
            [Position::new(0, 1), Position::new(1, 1), Position::new(1, 0)],
            Direction::West,
        )
        .unwrap();

        let outcome = snake.move_towards(Some(Direction::South));
        assert_eq!(snake.head(), Position::new(1, 0));
        assert!(!outcome.body_collision);
    }

    #[test]
    fn test_collision_detection() {
        let snake = corner_snake();
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(6, 4))); // body
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(!snake.occupies(Position::new(0, 0)));
    }

    #[test]
    fn test_head_may_leave_grid() {
        let mut snake = Snake::new(Position::new(0, 3), Direction::North);
        let outcome = snake.move_towards(None);

        assert_eq!(snake.head(), Position::new(-1, 3));
        assert!(!outcome.body_collision);
    }

    #[test]
    fn test_distance() {
        let snake = Snake::new(Position::new(1, 1), Direction::East);
        assert_eq!(snake.distance_to(Position::new(4, 5)), 5.0);
        assert_eq!(snake.distance_to(Position::new(1, 1)), 0.0);
    }
}
