//! Spatial grid for fast neighbor queries.

/// Uniform bucket grid over the world bounds.
///
/// Buckets hold indices into the fish array the grid was built from. The
/// grid is a pure performance index: it is cleared and refilled every tick
/// and never consulted as a source of truth.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f64,
    columns: usize,
    rows: usize,
    /// cells[row * columns + column] contains indices of fish in that bucket
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Create a grid covering `width` x `height` with square buckets
    pub fn new(width: f64, height: f64, cell_size: f64) -> Self {
        let cell_size = if cell_size > 0.0 { cell_size } else { 100.0 };
        let columns = (width.max(0.0) / cell_size).ceil() as usize + 1;
        let rows = (height.max(0.0) / cell_size).ceil() as usize + 1;

        Self {
            cell_size,
            columns,
            rows,
            cells: vec![Vec::new(); columns * rows],
        }
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Bucket coordinates for a world position, if it falls inside the grid
    #[inline]
    fn cell_of(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let cx = (x / self.cell_size).floor();
        let cy = (y / self.cell_size).floor();
        if cx < 0.0 || cy < 0.0 || !cx.is_finite() || !cy.is_finite() {
            return None;
        }
        let (cx, cy) = (cx as usize, cy as usize);
        if cx < self.columns && cy < self.rows {
            Some((cx, cy))
        } else {
            None
        }
    }

    /// Insert an index at the given position. Out-of-range positions are dropped.
    #[inline]
    pub fn insert(&mut self, index: usize, x: f64, y: f64) {
        if let Some((cx, cy)) = self.cell_of(x, y) {
            self.cells[cy * self.columns + cx].push(index);
        }
    }

    /// All indices in the bucket containing (x, y) and its 8 neighbors
    pub fn query_neighbors(&self, x: f64, y: f64) -> Vec<usize> {
        let mut results = Vec::new();
        self.for_each_neighbor(x, y, |idx| results.push(idx));
        results
    }

    /// Visit every index in the 3x3 neighborhood without allocating
    pub fn for_each_neighbor<F: FnMut(usize)>(&self, x: f64, y: f64, mut visit: F) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        // Positions outside the grid still see the buckets along its border
        let cx = (x / self.cell_size).floor() as i64;
        let cy = (y / self.cell_size).floor() as i64;

        for dy in -1..=1 {
            for dx in -1..=1 {
                let col = cx.saturating_add(dx);
                let row = cy.saturating_add(dy);
                if col < 0 || row < 0 || col >= self.columns as i64 || row >= self.rows as i64 {
                    continue;
                }
                for &idx in &self.cells[row as usize * self.columns + col as usize] {
                    visit(idx);
                }
            }
        }
    }

    /// Count entries in the bucket containing (x, y)
    #[inline]
    pub fn count_at(&self, x: f64, y: f64) -> usize {
        self.cell_of(x, y)
            .map(|(cx, cy)| self.cells[cy * self.columns + cx].len())
            .unwrap_or(0)
    }

    /// Total number of indexed entries
    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    /// Grid dimensions in buckets (columns, rows)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        let grid = SpatialGrid::new(800.0, 600.0, 100.0);
        assert_eq!(grid.dimensions(), (9, 7));
    }

    #[test]
    fn test_insert_and_count() {
        let mut grid = SpatialGrid::new(800.0, 600.0, 100.0);
        grid.insert(0, 150.0, 250.0);
        grid.insert(1, 199.0, 201.0);
        grid.insert(2, 250.0, 250.0);

        assert_eq!(grid.count_at(150.0, 250.0), 2);
        assert_eq!(grid.count_at(250.0, 250.0), 1);
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn test_out_of_range_dropped() {
        let mut grid = SpatialGrid::new(800.0, 600.0, 100.0);
        grid.insert(0, -5.0, 10.0);
        grid.insert(1, 10.0, -0.1);
        grid.insert(2, 5000.0, 10.0);
        grid.insert(3, f64::NAN, 10.0);

        assert!(grid.is_empty());
    }

    #[test]
    fn test_query_neighbors() {
        let mut grid = SpatialGrid::new(800.0, 600.0, 100.0);
        grid.insert(0, 150.0, 150.0);
        grid.insert(1, 250.0, 150.0); // Adjacent bucket
        grid.insert(2, 50.0, 50.0); // Diagonal bucket
        grid.insert(3, 450.0, 450.0); // Far away

        let results = grid.query_neighbors(150.0, 150.0);
        assert!(results.contains(&0));
        assert!(results.contains(&1));
        assert!(results.contains(&2));
        assert!(!results.contains(&3));
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_query_at_corner() {
        let mut grid = SpatialGrid::new(800.0, 600.0, 100.0);
        grid.insert(0, 0.0, 0.0);
        grid.insert(1, 800.0, 600.0);

        assert_eq!(grid.query_neighbors(0.0, 0.0), vec![0]);
        assert_eq!(grid.query_neighbors(800.0, 600.0), vec![1]);
    }

    #[test]
    fn test_clear_and_reinsert_is_idempotent() {
        let positions = [(10.0, 10.0), (120.0, 40.0), (390.0, 210.0), (410.0, 220.0)];
        let mut grid = SpatialGrid::new(800.0, 600.0, 100.0);

        let rebuild = |grid: &mut SpatialGrid| {
            grid.clear();
            for (i, &(x, y)) in positions.iter().enumerate() {
                grid.insert(i, x, y);
            }
            let mut a = grid.query_neighbors(400.0, 200.0);
            let mut b = grid.query_neighbors(50.0, 50.0);
            a.sort_unstable();
            b.sort_unstable();
            (a, b)
        };

        let first = rebuild(&mut grid);
        let second = rebuild(&mut grid);
        assert_eq!(first, second);
        assert_eq!(first.0, vec![2, 3]);
        assert_eq!(first.1, vec![0, 1]);
    }
}
