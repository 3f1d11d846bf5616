//! 基础设施层

pub mod logging;

pub use logging::{init_default_logging, init_logging};
