//! Data Transfer Objects

mod scan_options;
mod scan_report;

pub use scan_options::ScanOptions;
pub use scan_report::ScanReport;
