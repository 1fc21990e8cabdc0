mod cancellation;
mod events;
mod hit_samples;
mod juice_stream;
mod nested;

pub use cancellation::*;
pub use events::*;
pub use hit_samples::*;
pub use juice_stream::*;
pub use nested::*;
