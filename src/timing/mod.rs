mod difficulty;
mod timing_point;

pub use difficulty::*;
pub use timing_point::*;
