//! Configuration constants for parsing and output.

/// Separator used when a list is rendered as text.
pub const LIST_ITEM_SEPARATOR: &str = ";";

/// Gap between columns when a table is rendered as text.
pub const TABLE_COLUMN_GAP: &str = "  ";

/// Joiner for the flattened text of a main section in nested text mode.
pub const MAIN_SECTION_TEXT_JOINER: &str = " ";

/// Text wrap width for CLI text output.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Namespace of `xlink:*` attributes in JATS documents.
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Largest `colspan` honored on a table cell (the HTML limit).
pub const MAX_COLSPAN: usize = 1000;

/// Largest `rowspan` honored on a table cell (the HTML limit).
pub const MAX_ROWSPAN: usize = 65534;
