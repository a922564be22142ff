// Adapters layer: concrete sources and sinks (JSON lines input, local files).

pub mod json_lines;
pub mod local;

pub use json_lines::JsonLinesSource;
pub use local::LocalFiles;
