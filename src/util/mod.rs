pub mod error;
pub mod logging;

pub use error::SeekError;
pub use logging::{default_log_level, init_logging};
