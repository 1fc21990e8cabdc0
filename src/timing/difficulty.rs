use crate::prelude::*;

/// difficulty settings read when resolving an object's speed
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyInfo {
    pub slider_multiplier: f32,
    pub slider_tick_rate: f32,
}

impl Default for DifficultyInfo {
    fn default() -> Self {
        Self {
            slider_multiplier: 1.4,
            slider_tick_rate: 1.0,
        }
    }
}
