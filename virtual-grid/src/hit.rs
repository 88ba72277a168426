use crate::{GridHost, InsertionPoint, Point};

/// Resolves `point` to an insertion point among the first `count` rows.
///
/// The upper half of a row (midline inclusive) inserts before it, the lower half after it.
/// The sentinel row and anything outside the rows resolve to `None`.
pub fn hit_test(host: &impl GridHost, point: Point, count: usize) -> Option<InsertionPoint> {
    let row = host.row_at(point)?;
    if row >= count {
        return None;
    }
    let rect = host.row_rect(row)?;
    let above = point.y <= rect.midline();
    let index = if above { row } else { row + 1 };
    Some(InsertionPoint { row, above, index })
}
