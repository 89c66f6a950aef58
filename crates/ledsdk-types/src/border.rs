//! Decorative borders drawn around an area.

use serde::{Deserialize, Serialize};

use crate::payload::Payload;

/// How fast the border artwork moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderSpeed {
    Slow,
    #[default]
    Middle,
    Fast,
}

/// Animation applied to the border artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderEffect {
    /// Artwork runs around the edge.
    #[default]
    Rotate,
    /// Artwork flashes in place.
    Blink,
    /// Artwork is drawn once and stays.
    Static,
}

/// A border around a content area.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Border {
    /// Index of the border artwork on the device.
    #[serde(rename = "type", default)]
    pub border_type: u32,
    #[serde(default)]
    pub speed: BorderSpeed,
    #[serde(default)]
    pub effect: BorderEffect,
}

impl Border {
    pub fn new(border_type: u32) -> Self {
        Self {
            border_type,
            ..Default::default()
        }
    }

    pub fn with_speed(mut self, speed: BorderSpeed) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_effect(mut self, effect: BorderEffect) -> Self {
        self.effect = effect;
        self
    }
}

impl Payload for Border {}
