pub mod report_api;
pub mod report_provider;
