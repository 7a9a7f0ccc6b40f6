//! Support for library configuration options
//!
//! Settings are plain values, that are handed to the [`TaskRepository`](crate::repository::TaskRepository)
//! and [`Projector`](crate::projector::Projector) when they are built.

use csscolorparser::{Color, ParseColorError};
use serde::{Deserialize, Serialize};

/// The key the task collection is stored under, unless told otherwise
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// The colors calendar marks are drawn with
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkStyle {
    /// The dot of a day that has tasks
    pub dot_color: Color,
    /// The background of the selected day
    pub selected_color: Color,
    /// The dot of the selected day, drawn over `selected_color`
    pub selected_dot_color: Color,
}

impl MarkStyle {
    /// Build a style from CSS color strings (e.g. `#007AFF`, `white` or `rgb(0, 122, 255)`)
    pub fn from_css(dot: &str, selected: &str, selected_dot: &str) -> Result<Self, ParseColorError> {
        Ok(Self {
            dot_color: csscolorparser::parse(dot)?,
            selected_color: csscolorparser::parse(selected)?,
            selected_dot_color: csscolorparser::parse(selected_dot)?,
        })
    }
}

impl Default for MarkStyle {
    fn default() -> Self {
        let accent = Color { r: 0.0, g: 122.0 / 255.0, b: 1.0, a: 1.0 };
        Self {
            dot_color: accent.clone(),
            selected_color: accent,
            selected_dot_color: Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The single key the whole task collection is persisted under
    pub storage_key: String,
    pub style: MarkStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            style: MarkStyle::default(),
        }
    }
}
