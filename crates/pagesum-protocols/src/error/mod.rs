//! Error types for the pagesum protocol layer.

mod browser;
mod message;
mod persona;
mod settings;
mod summarize;
mod trigger;

pub use browser::*;
pub use message::*;
pub use persona::*;
pub use settings::*;
pub use summarize::*;
pub use trigger::*;
