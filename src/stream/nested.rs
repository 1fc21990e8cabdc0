use crate::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NestedKind {
    /// boundary marker (head, repeat or tail)
    Fruit,
    /// audible tick
    Droplet,
    /// silent filler covering a sparse stretch between two events
    TinyDroplet,
}

/// a concrete timed sub-object of a juice stream.
/// created during nested object generation and never mutated afterwards,
/// regeneration replaces the whole list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NestedObject {
    /// start time (ms)
    pub time: f32,
    /// horizontal position, already clamped to the playfield
    pub x: f32,
    pub kind: NestedKind,
    /// hit samples, always empty for tiny droplets
    pub samples: Vec<HitSampleInfo>,
}
