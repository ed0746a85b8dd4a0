pub mod model;

pub use model::{load_mem_dump, parse_mem_dump, LabelKV};
