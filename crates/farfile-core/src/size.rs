//! Human-readable entry sizes.

use crate::EntrySize;

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Largest unit first; sizes past a GiB stay in GB.
const UNITS: [(u64, &str); 3] = [(GIB, "GB"), (MIB, "MB"), (KIB, "KB")];

/// Format a byte count: plain bytes below 1024, otherwise one decimal place.
pub fn format_bytes(bytes: u64) -> String {
    for (scale, unit) in UNITS {
        if bytes >= scale {
            return format!("{:.1} {unit}", bytes as f64 / scale as f64);
        }
    }
    format!("{bytes} B")
}

/// Format an entry size for display. Non-numeric sizes pass through.
pub fn format_size(size: &EntrySize) -> String {
    match size {
        EntrySize::Bytes(n) => format_bytes(*n),
        EntrySize::Unsized => "-".to_string(),
        EntrySize::Opaque(text) => text.clone(),
    }
}
