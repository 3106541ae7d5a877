use rust_decimal::Decimal;

use super::{entries, FIELD_SEPARATOR};
use crate::numeric::parse_decimal;

/// Largest difference still treated as the same simulator value
pub const MATCH_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// Marks a mapped content field as an image path rather than text
pub const IMAGE_PREFIX: &str = "IMG:";

/// Obsolete styling suffix separator (`text|color:...|size:...`)
const STYLE_SEPARATOR: char = '|';

fn within_tolerance(entry_value: &str, target: &Decimal) -> bool {
    parse_decimal(entry_value)
        .and_then(|v| v.checked_sub(*target))
        .map(|diff| diff.abs() < MATCH_TOLERANCE)
        .unwrap_or(false)
}

/// `(value, content)` pairs split on the first `:`, both trimmed
fn pairs(mapping: &str) -> impl Iterator<Item = (&str, &str)> {
    entries(mapping).filter_map(|entry| {
        entry
            .split_once(FIELD_SEPARATOR)
            .map(|(value, content)| (value.trim(), content.trim()))
    })
}

/// Text mapped to a value that is numerically within tolerance of `target`
///
/// Only the text field is returned: anything after a further `:` or an old `|` style
/// suffix is dropped. Image entries (`IMG:`) are not text and are skipped.
pub fn lookup_text_tolerant(mapping: &str, target: &Decimal) -> Option<String> {
    pairs(mapping)
        .filter(|(_, content)| !content.starts_with(IMAGE_PREFIX))
        .find(|(value, _)| within_tolerance(value, target))
        .map(|(_, content)| {
            let text = content.split(FIELD_SEPARATOR).next().unwrap_or_default();
            let text = text.split(STYLE_SEPARATOR).next().unwrap_or_default();
            text.trim().to_string()
        })
}

/// Image path mapped with `value:IMG:path` to a value within tolerance of `target`
pub fn lookup_image_tolerant(mapping: &str, target: &Decimal) -> Option<String> {
    pairs(mapping)
        .filter_map(|(value, content)| {
            content
                .strip_prefix(IMAGE_PREFIX)
                .map(|path| (value, path.trim()))
        })
        .find(|(value, _)| within_tolerance(value, target))
        .map(|(_, path)| path.to_string())
}
