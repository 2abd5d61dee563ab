pub mod model;

pub use model::{artifact_paths, parse_u32, read_hex_words, write_hex_words};
