pub mod dataset;
pub mod sink;

pub use dataset::load_names;
pub use sink::write_rows;
