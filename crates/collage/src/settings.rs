//! Canvas configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size and look of the collage canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: f32,
    pub height: f32,
    pub background_color: String,
    /// Uniform gap used by the layout engines.
    pub padding: f32,
    /// Corner rounding of the canvas itself; cosmetic only.
    pub border_radius: f32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            background_color: "#ffffff".to_string(),
            padding: 10.0,
            border_radius: 0.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("canvas {axis} must be a positive number, got {value}")]
    NonPositiveExtent { axis: &'static str, value: f32 },

    #[error("padding must be a non-negative number, got {0}")]
    NegativePadding(f32),
}

impl CanvasSettings {
    /// Check the values the layout engines divide by.
    ///
    /// The engines themselves accept anything; this is for callers that
    /// take settings from outside.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (axis, value) in [("width", self.width), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::NonPositiveExtent { axis, value });
            }
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(SettingsError::NegativePadding(self.padding));
        }
        Ok(())
    }

    /// Merge a partial update into a copy of these settings.
    pub fn merged(&self, update: &CanvasSettingsUpdate) -> Self {
        Self {
            width: update.width.unwrap_or(self.width),
            height: update.height.unwrap_or(self.height),
            background_color: update
                .background_color
                .clone()
                .unwrap_or_else(|| self.background_color.clone()),
            padding: update.padding.unwrap_or(self.padding),
            border_radius: update.border_radius.unwrap_or(self.border_radius),
        }
    }
}

/// Partial canvas settings; unset fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
}

impl CanvasSettingsUpdate {
    pub fn padding(padding: f32) -> Self {
        Self {
            padding: Some(padding),
            ..Default::default()
        }
    }
}
