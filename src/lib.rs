pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod output;
pub mod parser;
pub mod scan;
pub mod stats;
pub mod table;
pub mod timing;
