//! Toroidal Game of Life grid, independent of any rendering.

/// Offsets of the 8 neighbours of a cell, as `(dx, dy)`, row by row.
pub const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// B3/S23: a live cell survives with 2 or 3 live neighbours, a dead one is born with exactly 3.
#[inline]
pub fn next_state(alive: bool, live_neighbours: u8) -> bool {
    matches!((alive, live_neighbours), (true, 2) | (_, 3))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeGrid {
    cols: usize,
    rows: usize,
    /// row-major, `rows * cols` long
    cells: Vec<bool>,
    paused: bool,
    generation: u64,
}

impl LifeGrid {
    /// Creates an all-dead, paused grid.
    ///
    /// # Panics
    /// if either dimension is zero.
    pub fn new(cols: usize, rows: usize) -> Self {
        assert!(cols > 0 && rows > 0, "grid dimensions must be non-zero");
        Self {
            cols,
            rows,
            cells: vec![false; cols * rows],
            paused: true,
            generation: 0,
        }
    }

    /// Creates a grid covering a `width` x `height` pixel area with square cells of `cell_size`
    /// pixels. Partial cells at the right and bottom edges are dropped.
    pub fn from_pixel_area(width: u32, height: u32, cell_size: u32) -> Self {
        assert!(cell_size > 0, "cell size must be non-zero");
        Self::new((width / cell_size) as usize, (height / cell_size) as usize)
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flips between paused and running, returning the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    #[inline]
    fn idx(&self, col: usize, row: usize) -> usize {
        debug_assert!(
            col < self.cols && row < self.rows,
            "cell ({col}, {row}) outside {}x{} grid",
            self.cols,
            self.rows
        );
        row * self.cols + col
    }

    #[inline]
    pub fn is_alive(&self, col: usize, row: usize) -> bool {
        self.cells[self.idx(col, row)]
    }

    /// Callers must keep `col < cols` and `row < rows`.
    #[inline]
    pub fn set_cell(&mut self, col: usize, row: usize, alive: bool) {
        let idx = self.idx(col, row);
        self.cells[idx] = alive;
    }

    /// Kills every cell. Dimensions and the pause state are kept.
    pub fn reset(&mut self) {
        self.cells.fill(false);
        self.generation = 0;
    }

    /// Fills the grid with a random soup, each cell alive with probability 1/2.
    pub fn randomize(&mut self, rng: &mut fastrand::Rng) {
        for cell in self.cells.iter_mut() {
            *cell = rng.bool();
        }
    }

    /// Coordinates of the 8 neighbours of `(col, row)`, wrapping around both edges.
    pub fn neighbour_coords(&self, col: usize, row: usize) -> [(usize, usize); 8] {
        let (cols, rows) = (self.cols as isize, self.rows as isize);
        NEIGHBOUR_OFFSETS.map(|(dx, dy)| {
            (
                (col as isize + dx).rem_euclid(cols) as usize,
                (row as isize + dy).rem_euclid(rows) as usize,
            )
        })
    }

    pub fn live_neighbours(&self, col: usize, row: usize) -> u8 {
        self.neighbour_coords(col, row)
            .into_iter()
            .filter(|&(c, r)| self.is_alive(c, r))
            .count() as u8
    }

    /// Advances one generation. The next generation is computed into a fresh buffer from the
    /// current one only, then swapped in.
    pub fn step(&mut self) {
        let next = self
            .cells()
            .map(|(col, row, alive)| next_state(alive, self.live_neighbours(col, row)))
            .collect();
        self.cells = next;
        self.generation += 1;
    }

    /// Every cell as `(col, row, alive)`, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &alive)| (i % cols, i / cols, alive))
    }

    /// `(col, row)` of every live cell, in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells()
            .filter_map(|(col, row, alive)| alive.then_some((col, row)))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|alive| **alive).count()
    }
}
