//! Directory scanning logic

mod walker;

pub use walker::{list_files, translate_path, FileWalk};
