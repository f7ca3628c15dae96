//! Field-to-cell projection

use glam::Vec2;

/// Rows above the play area: HUD and top border
const TOP_ROWS: u16 = 2;
/// Rows below the play area: bottom border and controls hint
const BOTTOM_ROWS: u16 = 2;

/// A block of terminal cells, in absolute terminal coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

/// The part of the terminal the play field is drawn into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub left: u16,
    pub top: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Play area inside the border of a `cols` x `rows` terminal
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self {
            left: 1,
            top: TOP_ROWS,
            cols: cols.saturating_sub(2).max(1),
            rows: rows.saturating_sub(TOP_ROWS + BOTTOM_ROWS).max(1),
        }
    }

    /// Cells covered by a field-space rectangle, clipped to the viewport.
    /// Anything visible covers at least one cell.
    pub fn project(&self, field: Vec2, pos: Vec2, size: Vec2) -> Option<CellRect> {
        if field.x <= 0.0 || field.y <= 0.0 {
            return None;
        }
        let (col, width) = span(pos.x, size.x, field.x, self.cols)?;
        let (row, height) = span(pos.y, size.y, field.y, self.rows)?;
        Some(CellRect {
            col: self.left + col,
            row: self.top + row,
            width,
            height,
        })
    }

    /// Centre cell of the play area
    pub fn center(&self) -> (u16, u16) {
        (self.left + self.cols / 2, self.top + self.rows / 2)
    }
}

/// Project one axis; returns (first cell, cell count)
fn span(start: f32, len: f32, extent: f32, cells: u16) -> Option<(u16, u16)> {
    let to_cell = |v: f32| v * f32::from(cells) / extent;
    let first = to_cell(start).floor() as i32;
    let last = to_cell(start + len).ceil() as i32;
    let last = last.max(first + 1);

    let first = first.max(0);
    let last = last.min(i32::from(cells));
    if first >= last {
        return None;
    }
    Some((first as u16, (last - first) as u16))
}
