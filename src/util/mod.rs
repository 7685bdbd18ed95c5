//! Utility modules

pub mod path;
pub mod text;

pub use path::normalize_path;
pub use text::{char_to_byte, normalize_line_endings, strip_markup};
