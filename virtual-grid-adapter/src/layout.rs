use virtual_grid::{Point, RowRect};

/// Fixed-height row geometry: an optional header band followed by equal rows.
///
/// Rows scroll by whole rows (`first_row`). Coordinates are grid client pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowLayout {
    pub header_height: i32,
    pub row_height: i32,
    pub width: i32,
    pub height: i32,
    pub first_row: usize,
}

impl RowLayout {
    pub fn new(row_height: i32, width: i32, height: i32) -> Self {
        Self {
            header_height: 0,
            row_height: row_height.max(1),
            width,
            height,
            first_row: 0,
        }
    }

    pub fn with_header_height(mut self, header_height: i32) -> Self {
        self.header_height = header_height.max(0);
        self
    }

    pub fn with_first_row(mut self, first_row: usize) -> Self {
        self.first_row = first_row;
        self
    }

    /// Whether `point` lies inside the grid's client area.
    pub fn contains(&self, point: Point) -> bool {
        (0..self.width).contains(&point.x) && (0..self.height).contains(&point.y)
    }

    /// Rows that fit below the header, partially visible ones included.
    pub fn visible_rows(&self) -> usize {
        let body = (self.height - self.header_height).max(0);
        (body as usize).div_ceil(self.row_height as usize)
    }

    /// The displayed row under `point`, given `row_count` displayed rows.
    pub fn row_at(&self, point: Point, row_count: usize) -> Option<usize> {
        if !self.contains(point) || point.y < self.header_height {
            return None;
        }
        let offset = ((point.y - self.header_height) / self.row_height) as usize;
        let row = self.first_row.checked_add(offset)?;
        (row < row_count).then_some(row)
    }

    pub fn row_rect(&self, row: usize, row_count: usize) -> Option<RowRect> {
        if row >= row_count || row < self.first_row {
            return None;
        }
        let offset = i32::try_from(row - self.first_row).ok()?;
        let y = self
            .header_height
            .checked_add(offset.checked_mul(self.row_height)?)?;
        Some(RowRect {
            x: 0,
            y,
            width: self.width,
            height: self.row_height,
        })
    }

    /// A point in the upper (`above`) or lower half of `row`, for scripted gestures.
    pub fn point_in_row(&self, row: usize, above: bool, x: i32) -> Option<Point> {
        let rect = self.row_rect(row, usize::MAX)?;
        let quarter = (self.row_height / 4).max(0);
        let y = if above {
            rect.y + quarter
        } else {
            rect.bottom() - 1 - quarter
        };
        Some(Point::new(x, y))
    }
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::new(20, 400, 300)
    }
}
