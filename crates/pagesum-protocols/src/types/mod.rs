//! Common types used across pagesum.

mod page;
mod text;

pub use page::*;
pub use text::*;
