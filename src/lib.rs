#![deny(unused_must_use)]

#[macro_use] extern crate log;

pub mod math;
pub mod errors;
pub mod timing;
pub mod path;
pub mod stream;
pub mod prelude;

/// width of the playfield. nested object positions are clamped to [0, this]
pub const PLAYFIELD_WIDTH: f32 = 512.0;
