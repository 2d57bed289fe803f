pub mod error;
pub mod generator;
pub mod http;
pub mod job;
pub mod logger;
pub mod parser;
pub mod runner;
pub mod settings;

// 重新导出常用类型
pub use error::{Result, StatsError};
