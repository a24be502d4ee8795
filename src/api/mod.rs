pub mod config;

pub use config::{ConfigFile, SearchConfig, SearchConfigBuilder, decode_escapes};
