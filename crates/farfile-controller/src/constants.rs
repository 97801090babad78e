//! User-facing strings and glyphs.

/// Glyph shown in front of directories. Files have none.
pub const DIRECTORY_GLYPH: &str = "📁";

/// Indicator shown instead of rows for an empty directory.
pub const EMPTY_DIRECTORY: &str = "📭 Empty directory";

/// Placeholder shown before the first listing arrives.
pub const LOADING: &str = "Loading files...";

pub const SAVED: &str = "File saved successfully!";
pub const DELETED: &str = "Item deleted successfully!";
pub const CREATED: &str = "Created successfully!";
pub const RENAMED: &str = "Renamed successfully!";
