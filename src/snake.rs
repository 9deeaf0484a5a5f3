use crate::apples::Apples;
use crate::GridInt;
use Direction::*;

/// A single grid position. Cells compare by value, so set containment and
/// collision checks work on coordinates alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: GridInt,
    pub y: GridInt,
}

impl Cell {
    pub fn new(x: GridInt, y: GridInt) -> Self {
        Cell { x, y }
    }

    /// Displaces the cell in place by one step along `direction`.
    pub fn step(&mut self, direction: Direction) {
        let (dx, dy) = direction.delta();
        self.x += dx;
        self.y += dy;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit displacement vector. The y axis grows downward, terminal-style.
    pub fn delta(self) -> (GridInt, GridInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    /// True iff the two displacement vectors cancel out.
    pub fn is_opposite_to(self, other: Direction) -> bool {
        let (dx, dy) = self.delta();
        let (odx, ody) = other.delta();
        dx + odx == 0 && dy + ody == 0
    }
}

/// The snake body: head at index 0, tail segments behind it front-to-back.
/// Always holds at least one cell.
pub struct Snake {
    cells: Vec<Cell>,
    direction: Direction,
}

impl Snake {
    pub fn new(cells: Vec<Cell>, direction: Direction) -> Self {
        debug_assert!(!cells.is_empty());
        Snake { cells, direction }
    }

    pub fn head(&self) -> Cell {
        self.cells[0]
    }

    pub fn tail(&self) -> &[Cell] {
        &self.cells[1..]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Applies a requested turn. Reversing 180° in a single step would send
    /// the head into the neck, so the opposite of the current heading is
    /// silently ignored.
    pub fn turn(&mut self, new_direction: Option<Direction>) {
        if let Some(dir) = new_direction {
            if !dir.is_opposite_to(self.direction) {
                self.direction = dir;
            }
        }
    }

    /// Moves the whole body one step: each segment takes the position of the
    /// one ahead of it, then the head advances along the current direction.
    /// Copying runs from the tail end backward so no source position is
    /// overwritten before it is read.
    pub fn advance(&mut self) {
        for i in (1..self.cells.len()).rev() {
            self.cells[i] = self.cells[i - 1];
        }
        self.cells[0].step(self.direction);
    }

    /// Consumes the apple under the head, if any. Growth appends a segment
    /// on top of the current tail end; it separates on the next advance.
    /// Returns whether the snake grew.
    pub fn eat(&mut self, apples: &mut Apples) -> bool {
        if apples.remove(self.head()) {
            let last = *self.cells.last().unwrap();
            self.cells.push(last);
            true
        } else {
            false
        }
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_snake() -> Snake {
        Snake::new(
            vec![
                Cell::new(6, 5),
                Cell::new(5, 5),
                Cell::new(4, 5),
                Cell::new(4, 4),
            ],
            Right,
        )
    }

    #[test]
    fn opposites_cancel_out() {
        assert!(Up.is_opposite_to(Down));
        assert!(Down.is_opposite_to(Up));
        assert!(Left.is_opposite_to(Right));
        assert!(Right.is_opposite_to(Left));
    }

    #[test]
    fn non_opposites_do_not_cancel() {
        for dir in [Up, Down, Left, Right].iter() {
            assert!(!dir.is_opposite_to(*dir));
        }
        assert!(!Up.is_opposite_to(Left));
        assert!(!Right.is_opposite_to(Down));
    }

    #[test]
    fn turn_rejects_reversal() {
        let mut snake = test_snake();
        snake.turn(Some(Left));
        assert_eq!(snake.direction(), Right);
    }

    #[test]
    fn turn_accepts_everything_else() {
        let mut snake = test_snake();
        snake.turn(Some(Up));
        assert_eq!(snake.direction(), Up);
        snake.turn(Some(Up));
        assert_eq!(snake.direction(), Up);
        snake.turn(None);
        assert_eq!(snake.direction(), Up);
    }

    #[test]
    fn advance_propagates_positions_backward() {
        let mut snake = test_snake();
        snake.advance();
        assert_eq!(
            snake.cells(),
            &[
                Cell::new(7, 5),
                Cell::new(6, 5),
                Cell::new(5, 5),
                Cell::new(4, 5),
            ]
        );
        assert_eq!(snake.head(), Cell::new(7, 5));
    }

    #[test]
    fn advance_keeps_length() {
        let mut snake = test_snake();
        snake.advance();
        snake.advance();
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn eat_grows_and_removes_the_apple() {
        let mut snake = test_snake();
        let mut apples = Apples::new(2);
        apples.insert(Cell::new(6, 5));

        assert!(snake.eat(&mut apples));
        assert_eq!(snake.len(), 5);
        assert!(apples.is_empty());
        // The placeholder sits on the old tail end until the next advance
        assert_eq!(snake.cells()[4], Cell::new(4, 4));

        snake.advance();
        assert_eq!(snake.cells()[4], Cell::new(4, 4));
        assert_eq!(snake.cells()[3], Cell::new(4, 5));
    }

    #[test]
    fn eat_without_apple_changes_nothing() {
        let mut snake = test_snake();
        let mut apples = Apples::new(2);
        apples.insert(Cell::new(1, 1));

        assert!(!snake.eat(&mut apples));
        assert_eq!(snake.len(), 4);
        assert_eq!(apples.len(), 1);
    }
}
