pub mod config;
pub mod detection;
pub mod domain_utils;
pub mod scanner;

pub use config::ScannerConfig;
pub use detection::HeuristicReport;
pub use scanner::{scan_url, Reason, ScanReport, UrlScanner, Verdict};
