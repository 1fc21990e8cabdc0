// std imports
pub use std::fmt::Display;

// sync imports
pub use std::sync::Arc;
pub use std::sync::atomic::{ AtomicBool, Ordering::SeqCst };

// serde imports
pub use serde::{ Serialize, Deserialize };

// crate imports
pub use crate::PLAYFIELD_WIDTH;
pub use crate::math::*;
pub use crate::errors::*;
pub use crate::timing::*;
pub use crate::path::*;
pub use crate::stream::*;
