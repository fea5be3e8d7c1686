/// Runtime configuration, resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub report_api_url: String,
    pub output_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            report_api_url: std::env::var("REPORT_API_URL")
                .unwrap_or_else(|_| "http://localhost:9000".to_string()),
            output_dir: std::env::var("REPORT_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string()),
        }
    }
}
