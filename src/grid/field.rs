//! The playing field: cell tags plus the vacancy index.
//!
//! ## Storage
//!
//! Cells live in an `im::Vector`, so cloning the whole field (the per-tick
//! observation snapshot, the per-episode reset from the pristine level) is an
//! O(1) structural-sharing operation while point writes stay cheap.
//!
//! ## Vacancy index
//!
//! Fruit spawning needs a uniform draw from the currently-empty cells without
//! scanning the grid. The field maintains a swap-remove vector + position map
//! over Empty-tagged cells; `set` is the single choke point that updates tag
//! and index together, so the two can never drift apart.

use im::Vector;
use rustc_hash::FxHashMap;

use crate::core::{AgentId, AgentPair, CellType, GameRng, Point};
use crate::error::EnvError;
use crate::snake::Snake;

/// Uniform-samplable set of vacant cells.
#[derive(Clone, Debug, Default)]
struct VacancySet {
    cells: Vec<Point>,
    index: FxHashMap<Point, usize>,
}

impl VacancySet {
    fn insert(&mut self, cell: Point) {
        if !self.index.contains_key(&cell) {
            self.index.insert(cell, self.cells.len());
            self.cells.push(cell);
        }
    }

    fn remove(&mut self, cell: Point) {
        if let Some(slot) = self.index.remove(&cell) {
            let last = self.cells.pop().expect("index and cells agree on size");
            if slot < self.cells.len() {
                self.cells[slot] = last;
                self.index.insert(last, slot);
            }
        }
    }

    fn contains(&self, cell: Point) -> bool {
        self.index.contains_key(&cell)
    }

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn sample(&self, rng: &mut GameRng) -> Point {
        assert!(
            !self.cells.is_empty(),
            "no vacant cells left on the field (grid full)"
        );
        self.cells[rng.gen_range_usize(0..self.cells.len())]
    }
}

/// N×N grid of cell tags with an always-consistent vacancy index.
#[derive(Clone, Debug)]
pub struct Field {
    size: usize,
    cells: Vector<CellType>,
    vacancies: VacancySet,
}

impl Field {
    /// Parse a level map into a field.
    ///
    /// The map must be a non-empty square (row count == row length) over the
    /// symbol table `A B s x # O .`; any other character fails with an error
    /// naming the symbol and its position.
    pub fn from_level(rows: &[String]) -> Result<Self, EnvError> {
        let size = rows.len();
        if size == 0 {
            return Err(EnvError::MalformedLevel("level map has no rows".into()));
        }

        let mut cells = Vector::new();
        for (row, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != size {
                return Err(EnvError::MalformedLevel(format!(
                    "row {row} has {width} symbols, expected {size} (map must be square)"
                )));
            }
            for (col, symbol) in line.chars().enumerate() {
                let tag = CellType::from_symbol(symbol).ok_or(EnvError::UnknownSymbol {
                    symbol,
                    row,
                    col,
                })?;
                cells.push_back(tag);
            }
        }

        let mut vacancies = VacancySet::default();
        for (i, tag) in cells.iter().enumerate() {
            if *tag == CellType::Empty {
                vacancies.insert(Point::new((i % size) as i32, (i / size) as i32));
            }
        }

        Ok(Self {
            size,
            cells,
            vacancies,
        })
    }

    /// Side length of the square field.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn slot(&self, cell: Point) -> usize {
        assert!(
            cell.x >= 0
                && cell.y >= 0
                && (cell.x as usize) < self.size
                && (cell.y as usize) < self.size,
            "cell {} is outside the {}x{} field",
            cell,
            self.size,
            self.size
        );
        cell.y as usize * self.size + cell.x as usize
    }

    /// The tag at `cell`. Panics if `cell` is out of bounds.
    #[must_use]
    pub fn get(&self, cell: Point) -> CellType {
        self.cells[self.slot(cell)]
    }

    /// Retag `cell`, keeping the vacancy index in sync in the same operation.
    pub fn set(&mut self, cell: Point, tag: CellType) {
        let slot = self.slot(cell);
        self.cells.set(slot, tag);

        if tag == CellType::Empty {
            self.vacancies.insert(cell);
        } else {
            self.vacancies.remove(cell);
        }
    }

    /// Find the first cell carrying `tag`, scanning row-major.
    ///
    /// Used once per agent at episode start to locate the head markers.
    pub fn find_marker(&self, tag: CellType) -> Result<Point, EnvError> {
        self.cells
            .iter()
            .position(|&t| t == tag)
            .map(|i| Point::new((i % self.size) as i32, (i / self.size) as i32))
            .ok_or(EnvError::MissingMarker(tag))
    }

    /// Number of currently vacant cells.
    #[must_use]
    pub fn vacant_count(&self) -> usize {
        self.vacancies.len()
    }

    /// True if `cell` is currently tagged Empty.
    #[must_use]
    pub fn is_vacant(&self, cell: Point) -> bool {
        self.vacancies.contains(cell)
    }

    /// Draw a uniformly random vacant cell.
    ///
    /// Panics if the field has no vacant cells: the grid being full is a
    /// logic error, and failing loudly beats spinning on a full board.
    #[must_use]
    pub fn random_vacant_cell(&self, rng: &mut GameRng) -> Point {
        self.vacancies.sample(rng)
    }

    /// Stamp both snakes' initial bodies: head cells as `Head(owner)`, the
    /// rest as `Body(owner)`.
    pub fn place_initial_bodies(&mut self, snakes: &AgentPair<Snake>) {
        for (owner, snake) in snakes.iter() {
            self.set(snake.head(), CellType::Head(owner));
            for cell in snake.cells().skip(1) {
                self.set(cell, CellType::Body(owner));
            }
        }
    }

    /// Record one snake's move in the cell tags.
    ///
    /// Retags the old head as body, frees the old tail cell if the snake did
    /// not grow, and stamps the new head, unless the target cell currently
    /// holds a wall or a body cell of either snake *and* is not the tail cell
    /// this very snake just vacated (the tail-chasing exception).
    ///
    /// This only records the footprint. Whether the move killed the snake is
    /// decided afterwards by reading the resulting tags; the write has to land
    /// first so tail-chasing and same-tick collisions are observable.
    pub fn apply_footprint(
        &mut self,
        owner: AgentId,
        old_head: Point,
        freed_tail: Option<Point>,
        new_head: Point,
    ) {
        self.set(old_head, CellType::Body(owner));

        if let Some(tail) = freed_tail {
            self.set(tail, CellType::Empty);
        }

        if !self.get(new_head).blocks_head() || Some(new_head) == freed_tail {
            self.set(new_head, CellType::Head(owner));
        }
    }

    /// An O(1) structural-sharing copy of the cell tags, row-major.
    #[must_use]
    pub fn snapshot(&self) -> Vector<CellType> {
        self.cells.clone()
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                write!(f, "{}", self.cells[row * self.size + col].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
