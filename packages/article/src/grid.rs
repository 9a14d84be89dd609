//! Grid reconstruction for tables with `rowspan`/`colspan` cells.
//!
//! Source tables describe each row as the cells that *start* in it. The
//! grid built here is fully materialized: a spanned cell is copied into
//! every position it covers, so a `colspan="3"` cell becomes three equal
//! entries and a `rowspan="2"` cell shows up in both rows.

use crate::config::{MAX_COLSPAN, MAX_ROWSPAN};

/// A cell as read from the source row, before expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Cell text.
    pub text: String,
    /// Number of rows covered, starting at the cell's own row.
    pub rowspan: usize,
    /// Number of columns covered.
    pub colspan: usize,
}

impl GridCell {
    /// Create a cell covering a single grid position.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rowspan: 1,
            colspan: 1,
        }
    }

    /// Set the row span.
    #[must_use]
    pub fn with_rowspan(mut self, rowspan: usize) -> Self {
        self.rowspan = rowspan;
        self
    }

    /// Set the column span.
    #[must_use]
    pub fn with_colspan(mut self, colspan: usize) -> Self {
        self.colspan = colspan;
        self
    }
}

/// A column still covered by a cell that started in an earlier row.
#[derive(Debug, Clone)]
struct PendingSpan {
    remaining: usize,
    text: String,
}

/// Expand rows of spanning cells into a rectangular grid of strings.
///
/// Rows are walked top to bottom and cells left to right. Before a cell is
/// placed, every column at the cursor that is still covered by a rowspan
/// from above is filled with that cell's text; the same happens after the
/// last cell of a row. Spans of 0 are treated as 1, and spans above
/// [`MAX_ROWSPAN`]/[`MAX_COLSPAN`] are clamped to them.
///
/// The result is ragged only when the source rows are (rows that cover a
/// different number of columns).
///
/// # Examples
/// ```
/// use jats_article::grid::{build_grid, GridCell};
///
/// let rows = vec![
///     vec![GridCell::new("Y").with_rowspan(2), GridCell::new("a")],
///     vec![GridCell::new("b")],
/// ];
/// assert_eq!(build_grid(rows), vec![vec!["Y", "a"], vec!["Y", "b"]]);
/// ```
pub fn build_grid<R>(rows: impl IntoIterator<Item = R>) -> Vec<Vec<String>>
where
    R: IntoIterator<Item = GridCell>,
{
    let mut pending: Vec<Option<PendingSpan>> = Vec::new();
    let mut grid = Vec::new();

    for row in rows {
        let mut out: Vec<String> = Vec::new();

        for cell in row {
            fill_pending(&mut out, &mut pending);

            let column = out.len();
            let rowspan = cell.rowspan.clamp(1, MAX_ROWSPAN);
            let colspan = cell.colspan.clamp(1, MAX_COLSPAN);

            for offset in 0..colspan {
                out.push(cell.text.clone());

                if rowspan > 1 {
                    let index = column + offset;
                    if pending.len() <= index {
                        pending.resize(index + 1, None);
                    }
                    pending[index] = Some(PendingSpan {
                        remaining: rowspan - 1,
                        text: cell.text.clone(),
                    });
                }
            }
        }

        fill_pending(&mut out, &mut pending);
        grid.push(out);
    }

    grid
}

/// Fill consecutive covered columns at the cursor (`out.len()`).
fn fill_pending(out: &mut Vec<String>, pending: &mut [Option<PendingSpan>]) {
    while let Some(slot) = pending.get_mut(out.len()) {
        let Some(span) = slot.as_mut() else {
            break;
        };

        out.push(span.text.clone());
        span.remaining -= 1;
        if span.remaining == 0 {
            *slot = None;
        }
    }
}
