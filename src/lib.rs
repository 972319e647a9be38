pub mod clustering;
pub mod config;
pub mod entity;
pub mod io;
pub mod logging;
pub mod pipeline;

pub const TARGET_CLUSTER: &str = "clustering";
pub const TARGET_IO: &str = "io";
