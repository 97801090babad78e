//! Application constants.

use farfile_core::MenuFootprint;

/// Spaces inserted for Tab in the editor.
pub const TAB_WIDTH: usize = 4;

/// Two clicks on the same row within this window count as a double click.
pub const DOUBLE_CLICK_MS: u64 = 400;

/// Context menu size in terminal cells.
pub const MENU_FOOTPRINT: MenuFootprint = MenuFootprint {
    width: 16,
    height: 6,
    margin: 1,
};

/// Column where entry names start within a listing row.
pub const GLYPH_COLUMN: u16 = 3;
