//! Clock widget styling.

use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};
use crate::payload::Payload;

/// Check that a color is written as `#RRGGBB`.
pub fn is_valid_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockType {
    #[default]
    Analog,
    Digital,
}

/// Color of a clock hand or scale mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandStyle {
    pub color: String,
}

impl HandStyle {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
        }
    }
}

impl Default for HandStyle {
    fn default() -> Self {
        Self::new("#FFFFFF")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontStyle {
    pub name: String,
    pub size: u32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            name: "Arial".to_string(),
            size: 12,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

/// A line of text drawn on the clock face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default = "default_visible")]
    pub visible: bool,
    pub color: String,
    #[serde(default)]
    pub font: FontStyle,
}

fn default_visible() -> bool {
    true
}

impl TextStyle {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            visible: true,
            color: color.into(),
            font: FontStyle::default(),
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }

    pub fn with_font(mut self, font: FontStyle) -> Self {
        self.font = font;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new("#FFFFFF")
    }
}

/// Parameters of a clock content node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockParam {
    #[serde(rename = "type", default)]
    pub clock_type: ClockType,
    /// UTC offset, `+HH:MM` or `-HH:MM`.
    pub timezone: String,
    #[serde(default)]
    pub hour_hand: HandStyle,
    #[serde(default)]
    pub minute_hand: HandStyle,
    #[serde(default)]
    pub second_hand: HandStyle,
    #[serde(default)]
    pub hour_scale: HandStyle,
    #[serde(default)]
    pub minute_scale: HandStyle,
    #[serde(default)]
    pub title: TextStyle,
    #[serde(default)]
    pub date: TextStyle,
    #[serde(default)]
    pub week: TextStyle,
    #[serde(default)]
    pub time: TextStyle,
}

impl Default for ClockParam {
    fn default() -> Self {
        Self {
            clock_type: ClockType::Analog,
            timezone: "+00:00".to_string(),
            hour_hand: HandStyle::default(),
            minute_hand: HandStyle::default(),
            second_hand: HandStyle::new("#FF0000"),
            hour_scale: HandStyle::default(),
            minute_scale: HandStyle::default(),
            title: TextStyle::hidden(),
            date: TextStyle::default(),
            week: TextStyle::default(),
            time: TextStyle::default(),
        }
    }
}

impl ClockParam {
    pub fn new(clock_type: ClockType) -> Self {
        Self {
            clock_type,
            ..Default::default()
        }
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    pub fn with_title(mut self, title: TextStyle) -> Self {
        self.title = title;
        self
    }

    /// Set all three hand colors at once.
    pub fn with_hands(mut self, hour: HandStyle, minute: HandStyle, second: HandStyle) -> Self {
        self.hour_hand = hour;
        self.minute_hand = minute;
        self.second_hand = second;
        self
    }

    pub fn validate(&self) -> SdkResult<()> {
        if !is_valid_timezone(&self.timezone) {
            return Err(SdkError::validation(format!(
                "Invalid clock timezone '{}'",
                self.timezone
            )));
        }

        let colors = [
            ("hourHand", &self.hour_hand.color),
            ("minuteHand", &self.minute_hand.color),
            ("secondHand", &self.second_hand.color),
            ("hourScale", &self.hour_scale.color),
            ("minuteScale", &self.minute_scale.color),
            ("title", &self.title.color),
            ("date", &self.date.color),
            ("week", &self.week.color),
            ("time", &self.time.color),
        ];
        for (field, color) in colors {
            if !is_valid_color(color) {
                return Err(SdkError::validation(format!(
                    "Invalid color '{}' for clock {}",
                    color, field
                )));
            }
        }
        Ok(())
    }
}

fn is_valid_timezone(tz: &str) -> bool {
    let bytes = tz.as_bytes();
    if bytes.len() != 6 || !(bytes[0] == b'+' || bytes[0] == b'-') || bytes[3] != b':' {
        return false;
    }
    let digits = [bytes[1], bytes[2], bytes[4], bytes[5]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let hours = (digits[0] - b'0') * 10 + (digits[1] - b'0');
    let minutes = (digits[2] - b'0') * 10 + (digits[3] - b'0');
    hours <= 14 && minutes < 60
}

impl Payload for ClockParam {}
