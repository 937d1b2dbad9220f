//! Geometric primitives and cell placement.
//!
//! Positions are in the painter's units (usually CSS pixels), with the grid's
//! top-left cell at `origin`.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Square cells of `cell_size` separated by `cell_gap`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Side length of one cell.
    pub cell_size: f32,
    /// Space between neighbouring cells.
    pub cell_gap: f32,
    /// Top-left corner of cell (0, 0).
    pub origin: Point,
}

impl GridGeometry {
    /// Geometry with the grid at the origin.
    #[must_use]
    pub fn new(cell_size: u32, cell_gap: u32) -> Self {
        Self { cell_size: cell_size as f32, cell_gap: cell_gap as f32, origin: Point::ORIGIN }
    }

    /// Move the grid's top-left corner.
    #[must_use]
    pub const fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    fn pitch(&self) -> f32 {
        self.cell_size + self.cell_gap
    }

    /// Rectangle of the cell at (`column`, `row`).
    #[must_use]
    pub fn cell_rect(&self, column: u32, row: u8) -> Rect {
        Rect::new(
            self.origin.x + column as f32 * self.pitch(),
            self.origin.y + f32::from(row) * self.pitch(),
            self.cell_size,
            self.cell_size,
        )
    }

    /// Total extent of a grid with `columns` columns and `rows` rows.
    #[must_use]
    pub fn extent(&self, columns: u32, rows: u8) -> (f32, f32) {
        let span = |n: f32| if n > 0.0 { n * self.pitch() - self.cell_gap } else { 0.0 };
        (span(columns as f32), span(f32::from(rows)))
    }

    /// Column and row under `point`, or `None` when it falls in a gap or
    /// outside the grid.
    #[must_use]
    pub fn locate(&self, point: Point, columns: u32, rows: u8) -> Option<(u32, u8)> {
        let dx = point.x - self.origin.x;
        let dy = point.y - self.origin.y;
        if dx < 0.0 || dy < 0.0 {
            return None;
        }

        let column = (dx / self.pitch()).floor() as u32;
        let row = (dy / self.pitch()).floor() as u32;
        if column >= columns || row >= u32::from(rows) {
            return None;
        }

        let row = row as u8;
        self.cell_rect(column, row).contains(point).then_some((column, row))
    }
}
