use std::collections::HashSet;

use rand::Rng;

use crate::snake::Cell;
use crate::{GridInt, MAX_COLUMNS, MAX_ROWS};

/// The food on the board: a set of unique cells plus the growth-speed
/// parameter controlling how often a new apple appears.
pub struct Apples {
    cells: HashSet<Cell>,
    growth_speed: GridInt,
}

impl Apples {
    pub fn new(growth_speed: GridInt) -> Self {
        Apples {
            cells: HashSet::new(),
            growth_speed,
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn insert(&mut self, cell: Cell) {
        self.cells.insert(cell);
    }

    /// Removes the apple at `cell`, reporting whether one was there.
    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Maybe drops a new apple this tick. A uniform draw over 0..=10 spawns
    /// only when strictly below the growth speed, i.e. with chance
    /// growth_speed/11. The new apple lands on a random interior cell; it
    /// may coincide with the snake body, and landing on an existing apple
    /// is a no-op thanks to set semantics.
    pub fn grow(&mut self, rng: &mut impl Rng) {
        let roll = rng.gen_range(0..=10);
        if !self.spawns_on(roll) {
            return;
        }

        let apple = Cell::new(
            rng.gen_range(1..MAX_COLUMNS - 1),
            rng.gen_range(1..MAX_ROWS - 1),
        );
        self.cells.insert(apple);
    }

    fn spawns_on(&self, roll: GridInt) -> bool {
        roll < self.growth_speed
    }
}
