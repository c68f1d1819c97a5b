// Spatial hash grid for efficient proximity detection.
//
// Instead of O(n) distance checks against all placed notes, this provides
// O(1) average lookup by dividing the layout plane into uniform cells.

use std::collections::HashMap;

use crate::graph::Point;

/// A spatial hash grid over 2D points with an attached payload.
#[derive(Debug, Clone)]
pub struct SpatialGrid<T> {
    /// Side length of each square cell.
    cell_size: f64,
    /// Map from cell coordinates to the points registered in that cell.
    cells: HashMap<(i32, i32), Vec<(Point, T)>>,
}

impl<T: Copy> SpatialGrid<T> {
    /// Create a new grid with the given cell size.
    ///
    /// Cell size should be on the order of the typical query gap: too small
    /// fragments points across many cells, too large clusters everything
    /// into a few. A non-positive cell size is a configuration error.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not strictly positive.
    pub fn new(cell_size: f64) -> Self {
        assert!(
            cell_size > 0.0,
            "spatial grid cell size must be positive, got {cell_size}"
        );
        Self { cell_size, cells: HashMap::new() }
    }

    /// Cell coordinates containing a point.
    fn cell_of(&self, x: f64, y: f64) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// Register a point with its payload.
    pub fn insert(&mut self, x: f64, y: f64, payload: T) {
        let cell = self.cell_of(x, y);
        self.cells.entry(cell).or_default().push((Point::new(x, y), payload));
    }

    /// All registered points whose cell falls within `radius` of the query.
    ///
    /// Returns a superset of the true radius matches: everything in cells
    /// within ceil(radius / cell_size) cells of the query's cell. Callers
    /// must still apply an exact distance test.
    pub fn query(&self, x: f64, y: f64, radius: f64) -> Vec<(Point, T)> {
        let (cx, cy) = self.cell_of(x, y);
        let reach = (radius / self.cell_size).ceil() as i32;

        let mut result = Vec::new();
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                if let Some(entries) = self.cells.get(&(cx + dx, cy + dy)) {
                    result.extend(entries.iter().copied());
                }
            }
        }
        result
    }

    /// Whether any registered point lies at Euclidean distance < `min_gap`.
    pub fn has_collision(&self, x: f64, y: f64, min_gap: f64) -> bool {
        let probe = Point::new(x, y);
        self.query(x, y, min_gap)
            .iter()
            .any(|(p, _)| probe.distance_to(*p) < min_gap)
    }

    /// Number of registered points.
    pub fn len(&self) -> usize {
        self.cells.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.values().all(|v| v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_query() {
        let mut grid: SpatialGrid<usize> = SpatialGrid::new(50.0);
        grid.insert(0.0, 0.0, 0);
        grid.insert(500.0, 500.0, 1);

        let nearby = grid.query(10.0, 10.0, 30.0);
        assert!(nearby.iter().any(|(_, id)| *id == 0));
        assert!(!nearby.iter().any(|(_, id)| *id == 1));
    }

    #[test]
    fn test_query_is_superset_across_cell_boundary() {
        let mut grid: SpatialGrid<usize> = SpatialGrid::new(50.0);
        // Sits just past the cell boundary of the query point's cell.
        grid.insert(51.0, 0.0, 0);

        let nearby = grid.query(49.0, 0.0, 10.0);
        assert_eq!(nearby.len(), 1);
    }

    #[test]
    fn test_has_collision_exact_distance() {
        let mut grid: SpatialGrid<usize> = SpatialGrid::new(50.0);
        grid.insert(0.0, 0.0, 0);

        // distance ~14.14 < 15
        assert!(grid.has_collision(10.0, 10.0, 15.0));
        // distance ~70.7 >= 15
        assert!(!grid.has_collision(50.0, 50.0, 15.0));
    }

    #[test]
    fn test_has_collision_monotonic_in_radius() {
        let mut grid: SpatialGrid<usize> = SpatialGrid::new(40.0);
        grid.insert(30.0, 40.0, 0);

        let mut seen_collision = false;
        for radius in [10.0, 25.0, 49.0, 51.0, 80.0, 200.0] {
            let hit = grid.has_collision(0.0, 0.0, radius);
            if seen_collision {
                assert!(hit, "collision at smaller radius must persist at {radius}");
            }
            seen_collision |= hit;
        }
        assert!(seen_collision);
    }

    #[test]
    fn test_negative_coordinates() {
        let mut grid: SpatialGrid<usize> = SpatialGrid::new(50.0);
        grid.insert(-10.0, -10.0, 0);

        assert!(grid.has_collision(-12.0, -12.0, 5.0));
        assert!(!grid.has_collision(40.0, 40.0, 5.0));
    }

    #[test]
    #[should_panic(expected = "cell size must be positive")]
    fn test_non_positive_cell_size_panics() {
        let _: SpatialGrid<usize> = SpatialGrid::new(0.0);
    }
}
