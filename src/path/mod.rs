mod commands;
mod control_point;
mod curves;
mod reverse;
mod slider_path;

pub use commands::*;
pub use control_point::*;
pub use curves::*;
pub use slider_path::*;
