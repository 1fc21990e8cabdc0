use crate::prelude::*;

pub const HIT_NORMAL: &str = "hitnormal";
pub const SLIDER_TICK: &str = "slidertick";

/// a single hit sample to play when a nested object is collected
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitSampleInfo {
    /// sample name, ie "hitnormal"
    pub name: String,
    pub volume: u8,
}
impl HitSampleInfo {
    pub fn new(name: impl Into<String>, volume: u8) -> Self {
        Self { name: name.into(), volume }
    }

    /// copy of this sample under another name, ie deriving the tick variant
    /// from a boundary sample
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self { name: name.into(), volume: self.volume }
    }
}
impl Default for HitSampleInfo {
    fn default() -> Self {
        Self::new(HIT_NORMAL, 100)
    }
}
