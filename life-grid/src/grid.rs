use crate::{GridSize, Loc, Random};
use std::mem;
use std::ops::{Index, IndexMut};

pub const SEED_ALIVE_PROBABILITY: f64 = 0.15;
pub const MAX_AGE: u8 = u8::MAX;

const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Which cells are eligible to be counted as someone's neighbor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Boundary {
    /// Row 0 and column 0 never count as neighbors. The last row and column do.
    #[default]
    SkipLeadingEdges,
    /// Every cell inside the grid counts. Everything outside is dead.
    DeadBorder,
}

impl Boundary {
    fn counts(self, row: i64, col: i64, size: GridSize) -> bool {
        let height = size.height as i64;
        let width = size.width as i64;
        match self {
            Boundary::SkipLeadingEdges => row > 0 && col > 0 && row < height && col < width,
            Boundary::DeadBorder => row >= 0 && col >= 0 && row < height && col < width,
        }
    }
}

/// Fixed-size field of cell ages. Zero is dead; anything else is the number of
/// generations the cell has been alive, saturating at `MAX_AGE`.
#[derive(Clone, Debug)]
pub struct CellGrid {
    size: GridSize,
    boundary: Boundary,
    cells: Vec<u8>,
    next_cells: Vec<u8>,
}

impl CellGrid {
    pub fn new_empty(size: GridSize) -> Self {
        assert!(size.width > 0 && size.height > 0);
        Self {
            size,
            boundary: Boundary::default(),
            cells: vec![0; size.num_cells()],
            next_cells: vec![0; size.num_cells()],
        }
    }

    pub fn new_random(size: GridSize, rand: &mut Random) -> Self {
        let mut result = Self::new_empty(size);
        result.add_random_life(rand);
        result
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    fn add_random_life(&mut self, rand: &mut Random) {
        for cell in self.cells.iter_mut() {
            *cell = if rand.next_bool(SEED_ALIVE_PROBABILITY) { 1 } else { 0 };
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &u8> + Clone {
        self.cells.iter()
    }

    pub fn get(&self, loc: Loc) -> Option<u8> {
        loc.grid_index(self.size).map(|index| self.cells[index])
    }

    pub fn set(&mut self, loc: Loc, age: u8) {
        self[loc] = age;
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&age| age != 0).count()
    }

    /// Live cells among the eight around `loc`, as of the current generation.
    pub fn neighbor_count(&self, loc: Loc) -> u8 {
        let mut result = 0;
        for (row_offset, col_offset) in NEIGHBOR_OFFSETS {
            let row = loc.row as i64 + row_offset;
            let col = loc.col as i64 + col_offset;
            if self.boundary.counts(row, col, self.size)
                && self.cells[row as usize * self.size.width as usize + col as usize] != 0
            {
                result += 1;
            }
        }
        result
    }

    pub fn update(&mut self) {
        // Rules read only `cells`; results land in `next_cells`.
        self.next_cells.copy_from_slice(&self.cells);
        for row in 0..self.height() {
            for col in 0..self.width() {
                self.update_cell(Loc::new(row, col));
            }
        }
        mem::swap(&mut self.next_cells, &mut self.cells);
    }

    fn update_cell(&mut self, loc: Loc) {
        let index = self.index_of(loc);
        let neighbors = self.neighbor_count(loc);
        self.next_cells[index] = next_age(self.cells[index], neighbors);
    }

    fn index_of(&self, loc: Loc) -> usize {
        loc.grid_index(self.size)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl Index<Loc> for CellGrid {
    type Output = u8;

    fn index(&self, loc: Loc) -> &Self::Output {
        &self.cells[self.index_of(loc)]
    }
}

impl IndexMut<Loc> for CellGrid {
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        let index = self.index_of(loc);
        &mut self.cells[index]
    }
}

pub fn next_age(age: u8, neighbors: u8) -> u8 {
    match (age, neighbors) {
        (0, 3) => 1,
        (0, _) => 0,
        (_, 2 | 3) => age.saturating_add(1),
        _ => 0,
    }
}
