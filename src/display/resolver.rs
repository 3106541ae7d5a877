use tracing::debug;

use super::calculate_indicator;
use crate::actions::EncoderControl;
use crate::mapping::{parse_value_mapping, ValueMapping};
use crate::settings::{keys, ContextSettings};
use crate::sim::SimulatorInterface;

/// Render-ready description of an encoder's touch display
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncoderDisplayData {
    /// Headline text; empty when an icon is the headline
    pub value: String,
    /// Gauge position, 0-100
    pub indicator: Option<i32>,
    pub icon: Option<String>,
    pub title: Option<String>,
    /// Background image path
    pub background: Option<String>,
    pub text_color: Option<String>,
    pub bg_color: Option<String>,
    pub alignment: Option<String>,
    pub font_size: Option<i32>,
    pub font_weight: Option<i32>,
    pub opacity: Option<f64>,
}

impl EncoderDisplayData {
    /// Short description used to trace display changes
    pub fn signature(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{}|icon:{}", self.value, icon),
            None => self.value.clone(),
        }
    }

    fn apply_mapping(&mut self, raw_value: &str, mapping: &ValueMapping) {
        // Image is the headline and text becomes its caption; otherwise text replaces the value
        if !mapping.image_path.is_empty() {
            self.icon = Some(mapping.image_path.clone());
            if !mapping.text.is_empty() {
                self.title = Some(mapping.text.clone());
            }
        } else if !mapping.text.is_empty() {
            self.value = mapping.text.clone();
        } else {
            self.value = raw_value.to_string();
        }

        if !mapping.text_color.is_empty() {
            self.text_color = Some(mapping.text_color.clone());
        }
        if !mapping.bg_color.is_empty() {
            self.bg_color = Some(mapping.bg_color.clone());
        }
    }

    fn apply_layout(&mut self, settings: &ContextSettings) {
        self.background = settings.get_str(keys::BACKGROUND_IMAGE);
        self.alignment = settings.get_str(keys::TEXT_ALIGNMENT);

        if self.text_color.is_none() {
            self.text_color = settings.get_str(keys::TEXT_COLOR);
        }

        self.font_size = settings
            .get_str(keys::FONT_SIZE)
            .and_then(|s| s.trim().parse().ok());
        self.font_weight = settings
            .get_str(keys::FONT_WEIGHT)
            .and_then(|s| s.trim().parse().ok());
        self.opacity = settings
            .get_str(keys::OPACITY)
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|o| o.is_finite());
    }
}

/// Resolve a raw display value against the context's mapping and layout settings
///
/// `image_fallback` is used as the icon only when no mapping entry matched the value.
/// The indicator is left unset.
pub fn resolve_display(
    raw_value: &str,
    settings: &ContextSettings,
    image_fallback: Option<String>,
) -> EncoderDisplayData {
    let mut data = EncoderDisplayData::default();

    let mapping_str = settings.get_str_or_empty(keys::VALUE_TEXT_MAPPING);
    match parse_value_mapping(&mapping_str, raw_value) {
        Some(mapping) => data.apply_mapping(raw_value, &mapping),
        None => match image_fallback.filter(|path| !path.is_empty()) {
            Some(path) => data.icon = Some(path),
            None => data.value = raw_value.to_string(),
        },
    }

    data.apply_layout(settings);
    data
}

/// Full display for a context's action, or `None` when it has nothing to show
///
/// Actions without the encoder capability never show anything.
pub fn determine_encoder_display(
    encoder: Option<&dyn EncoderControl>,
    sim: &dyn SimulatorInterface,
    settings: &ContextSettings,
) -> Option<EncoderDisplayData> {
    let encoder = encoder?;

    let raw_value = encoder
        .current_display_value(sim, settings)
        .filter(|v| !v.is_empty())?;

    let image_fallback = encoder.current_image_path(sim, settings);
    let mut data = resolve_display(&raw_value, settings, image_fallback);
    data.indicator = calculate_indicator(sim, settings);

    debug!("Resolved encoder display '{}'", data.signature());
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(value: serde_json::Value) -> ContextSettings {
        ContextSettings::from_value(value)
    }

    #[test]
    fn test_image_with_caption() {
        let s = settings(json!({ "encoder_value_text_mapping": "5:On:icon_on.png;0:Off:icon_off.png" }));
        let data = resolve_display("5", &s, None);
        assert_eq!(data.icon.as_deref(), Some("icon_on.png"));
        assert_eq!(data.title.as_deref(), Some("On"));
        assert_eq!(data.value, "");
    }

    #[test]
    fn test_text_replaces_value() {
        let s = settings(json!({ "encoder_value_text_mapping": "0:OFF;1:ON" }));
        let data = resolve_display("1", &s, None);
        assert_eq!(data.value, "ON");
        assert!(data.icon.is_none());
        assert!(data.title.is_none());
    }

    #[test]
    fn test_empty_mapping_shows_raw_value() {
        let data = resolve_display("42", &ContextSettings::default(), None);
        assert_eq!(data.value, "42");
        assert!(data.icon.is_none());
        assert!(data.title.is_none());
    }

    #[test]
    fn test_matched_entry_without_content_shows_raw_value() {
        let s = settings(json!({ "encoder_value_text_mapping": "7:::#FF0000" }));
        let data = resolve_display("7", &s, None);
        assert_eq!(data.value, "7");
        assert_eq!(data.text_color.as_deref(), Some("#FF0000"));
    }

    #[test]
    fn test_entry_color_wins_over_global() {
        let s = settings(json!({
            "encoder_value_text_mapping": "1:ON::#00FF00:#003300;0:OFF",
            "encoder_text_color": "#FFFFFF",
        }));
        let on = resolve_display("1", &s, None);
        assert_eq!(on.text_color.as_deref(), Some("#00FF00"));
        assert_eq!(on.bg_color.as_deref(), Some("#003300"));

        let off = resolve_display("0", &s, None);
        assert_eq!(off.text_color.as_deref(), Some("#FFFFFF"));
        assert!(off.bg_color.is_none());
    }

    #[test]
    fn test_layout_settings() {
        let s = settings(json!({
            "encoder_background_image": "bg.png",
            "encoder_text_alignment": "right",
            "encoder_font_size": "20",
            "encoder_font_weight": 700,
            "encoder_opacity": "0.8",
        }));
        let data = resolve_display("3", &s, None);
        assert_eq!(data.background.as_deref(), Some("bg.png"));
        assert_eq!(data.alignment.as_deref(), Some("right"));
        assert_eq!(data.font_size, Some(20));
        assert_eq!(data.font_weight, Some(700));
        assert_eq!(data.opacity, Some(0.8));
    }

    #[test]
    fn test_bad_numbers_leave_fields_unset() {
        let s = settings(json!({
            "encoder_font_size": "big",
            "encoder_font_weight": "600",
            "encoder_opacity": "half",
            "encoder_text_alignment": "center",
        }));
        let data = resolve_display("3", &s, None);
        assert_eq!(data.font_size, None);
        assert_eq!(data.font_weight, Some(600));
        assert_eq!(data.opacity, None);
        assert_eq!(data.alignment.as_deref(), Some("center"));
        assert_eq!(data.value, "3");
    }

    #[test]
    fn test_image_fallback_only_without_mapping_match() {
        let s = settings(json!({ "encoder_value_text_mapping": "1:ON" }));

        let unmatched = resolve_display("2", &s, Some("two.png".to_string()));
        assert_eq!(unmatched.icon.as_deref(), Some("two.png"));
        assert_eq!(unmatched.value, "");

        let matched = resolve_display("1", &s, Some("one.png".to_string()));
        assert!(matched.icon.is_none());
        assert_eq!(matched.value, "ON");
    }

    #[test]
    fn test_signature() {
        let mut data = EncoderDisplayData {
            value: "5".to_string(),
            ..Default::default()
        };
        assert_eq!(data.signature(), "5");
        data.icon = Some("a.png".to_string());
        assert_eq!(data.signature(), "5|icon:a.png");
    }
}
