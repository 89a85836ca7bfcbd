use log::Level;

const DEFAULT_API_BASE_URL: &str = "";
const DEFAULT_YEAR_SPAN: i32 = 2;

/// Build-time configuration, read from the environment the bundle was compiled in.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: Level,
    pub year_span: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: Level::Info,
            year_span: DEFAULT_YEAR_SPAN,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("BUDGET_API_BASE_URL"),
            option_env!("BUDGET_LOG_LEVEL"),
            option_env!("BUDGET_YEAR_SPAN"),
        )
    }

    fn from_values(base_url: Option<&str>, level: Option<&str>, span: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            log_level: level
                .and_then(|raw| raw.parse::<Level>().ok())
                .unwrap_or(defaults.log_level),
            year_span: span
                .and_then(|raw| raw.trim().parse::<i32>().ok())
                .filter(|span| *span >= 0)
                .unwrap_or(defaults.year_span),
        }
    }

    /// Years offered by the year selector, oldest first.
    pub fn selectable_years(&self, current_year: i32) -> Vec<i32> {
        ((current_year - self.year_span)..=(current_year + self.year_span)).collect()
    }
}

pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}
