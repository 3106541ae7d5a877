use super::{entries, FIELD_SEPARATOR};

/// Display overrides for one simulator value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueMapping {
    pub match_value: String,
    pub text: String,
    pub image_path: String,
    pub text_color: String,
    pub bg_color: String,
}

impl ValueMapping {
    /// Parse one `value:...` entry. Entries without any `:` are unusable.
    fn parse_entry(entry: &str) -> Option<Self> {
        let (match_value, rest) = entry.split_once(FIELD_SEPARATOR)?;
        if match_value.is_empty() {
            return None;
        }

        let mut mapping = ValueMapping {
            match_value: match_value.to_string(),
            ..Default::default()
        };

        // Positional fields; the last present field swallows any further colons:
        //   value:text
        //   value:text:image
        //   value:text:image:textColor
        //   value:text:image:textColor:bgColor
        let mut fields = rest.splitn(4, FIELD_SEPARATOR);
        if let Some(text) = fields.next() {
            mapping.text = text.to_string();
        }
        if let Some(image) = fields.next() {
            mapping.image_path = image.to_string();
        }
        if let Some(color) = fields.next() {
            mapping.text_color = color.to_string();
        }
        if let Some(bg) = fields.next() {
            mapping.bg_color = bg.to_string();
        }

        Some(mapping)
    }
}

/// Find the first entry whose value is exactly `target` (string equality, not numeric)
pub fn parse_value_mapping(mapping: &str, target: &str) -> Option<ValueMapping> {
    entries(mapping)
        .filter_map(ValueMapping::parse_entry)
        .find(|entry| entry.match_value == target)
}
