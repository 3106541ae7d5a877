//! Value mapping strings
//!
//! The property inspector stores per-value display overrides as one string:
//! `value:text:image:textColor:bgColor;value:...`. Two separate lookups exist
//! over it:
//!
//! - [`parse_value_mapping`] matches on the exact canonical string of the value and
//!   understands every positional format.
//! - [`lookup_text_tolerant`] / [`lookup_image_tolerant`] match numerically within
//!   [`MATCH_TOLERANCE`], for settings saved with simulator float noise.

mod exact;
mod legacy;

pub use exact::{parse_value_mapping, ValueMapping};
pub use legacy::{lookup_image_tolerant, lookup_text_tolerant, IMAGE_PREFIX, MATCH_TOLERANCE};

/// Separator between entries
pub const ENTRY_SEPARATOR: char = ';';

/// Separator between fields of one entry
pub const FIELD_SEPARATOR: char = ':';

/// Non-empty entries of a mapping string, in declaration order
fn entries(mapping: &str) -> impl Iterator<Item = &str> {
    mapping
        .split(ENTRY_SEPARATOR)
        .filter(|entry| !entry.is_empty())
}
