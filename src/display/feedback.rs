//! SDK `setFeedback` payload

use serde::Serialize;

use super::EncoderDisplayData;

/// Feedback object for an encoder's touch display layout
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Feedback {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FeedbackText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<FeedbackIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<FeedbackIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<FeedbackText>,
    /// Image path or color string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// Styled text item
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedbackText {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FeedbackFont>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedbackFont {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackIndicator {
    pub value: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedbackIcon {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl From<&EncoderDisplayData> for Feedback {
    fn from(data: &EncoderDisplayData) -> Self {
        let value = (!data.value.is_empty()).then(|| {
            let font = (data.font_size.is_some() || data.font_weight.is_some()).then(|| FeedbackFont {
                size: data.font_size,
                weight: data.font_weight,
            });
            FeedbackText {
                value: data.value.clone(),
                color: data.text_color.clone(),
                alignment: data.alignment.clone(),
                font,
                opacity: data.opacity,
            }
        });

        let icon = data.icon.as_ref().map(|path| FeedbackIcon {
            value: path.clone(),
            opacity: data.opacity,
        });

        let title = data.title.as_ref().map(|text| FeedbackText {
            value: text.clone(),
            color: data.text_color.clone(),
            ..Default::default()
        });

        // A background image wins over a background color
        let background = data.background.clone().or_else(|| data.bg_color.clone());

        Self {
            value,
            indicator: data.indicator.map(|value| FeedbackIndicator { value }),
            icon,
            title,
            background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_payload() {
        let data = EncoderDisplayData {
            value: "ON".to_string(),
            indicator: Some(40),
            text_color: Some("#FFFFFF".to_string()),
            alignment: Some("left".to_string()),
            font_size: Some(18),
            font_weight: Some(600),
            opacity: Some(0.5),
            bg_color: Some("#202020".to_string()),
            ..Default::default()
        };

        let payload = serde_json::to_value(Feedback::from(&data)).unwrap();
        assert_eq!(
            payload,
            json!({
                "value": {
                    "value": "ON",
                    "color": "#FFFFFF",
                    "alignment": "left",
                    "font": { "size": 18, "weight": 600 },
                    "opacity": 0.5
                },
                "indicator": { "value": 40 },
                "background": "#202020"
            })
        );
    }

    #[test]
    fn test_icon_with_caption() {
        let data = EncoderDisplayData {
            icon: Some("icon_on.png".to_string()),
            title: Some("On".to_string()),
            text_color: Some("#00FF00".to_string()),
            ..Default::default()
        };

        let payload = serde_json::to_value(Feedback::from(&data)).unwrap();
        assert_eq!(
            payload,
            json!({
                "icon": { "value": "icon_on.png" },
                "title": { "value": "On", "color": "#00FF00" }
            })
        );
    }

    #[test]
    fn test_background_image_wins_over_color() {
        let data = EncoderDisplayData {
            value: "1".to_string(),
            background: Some("bg.png".to_string()),
            bg_color: Some("#FF0000".to_string()),
            ..Default::default()
        };
        let feedback = Feedback::from(&data);
        assert_eq!(feedback.background.as_deref(), Some("bg.png"));
    }
}
