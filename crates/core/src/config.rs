use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `MEDIAMIX__`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub calculator: CalculatorConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default = "default_goal")]
    pub default_goal: String,
    #[serde(default = "default_campaign_type")]
    pub default_campaign_type: String,
    #[serde(default = "default_audience_target")]
    pub default_audience_target: String,
    #[serde(default = "default_duration_months")]
    pub default_duration_months: u32,
    /// Durations a plan may request. Empty accepts any positive value.
    #[serde(default = "default_allowed_durations")]
    pub allowed_durations: Vec<u32>,
    /// Smallest per-channel budget the planner accepts. 0 disables the check.
    #[serde(default)]
    pub min_channel_budget: f64,
    #[serde(default = "default_max_channels")]
    pub max_channels: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_include_summary_row")]
    pub include_summary_row: bool,
}

// Default functions
fn default_goal() -> String {
    "awareness".to_string()
}
fn default_campaign_type() -> String {
    "web_landing".to_string()
}
fn default_audience_target() -> String {
    "broad".to_string()
}
fn default_duration_months() -> u32 {
    1
}
fn default_allowed_durations() -> Vec<u32> {
    vec![1, 3, 6, 12]
}
fn default_max_channels() -> usize {
    12
}
fn default_currency_symbol() -> String {
    "$".to_string()
}
fn default_include_summary_row() -> bool {
    true
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_goal: default_goal(),
            default_campaign_type: default_campaign_type(),
            default_audience_target: default_audience_target(),
            default_duration_months: default_duration_months(),
            allowed_durations: default_allowed_durations(),
            min_channel_budget: 0.0,
            max_channels: default_max_channels(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            include_summary_row: default_include_summary_row(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("MEDIAMIX")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("calculator.allowed_durations"),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_calculator_ui() {
        let config = AppConfig::default();
        assert_eq!(config.calculator.default_goal, "awareness");
        assert_eq!(config.calculator.allowed_durations, vec![1, 3, 6, 12]);
        assert_eq!(config.calculator.min_channel_budget, 0.0);
        assert_eq!(config.export.currency_symbol, "$");
        assert!(config.export.include_summary_row);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"calculator": {"min_channel_budget": 50.0}}"#).unwrap();
        assert_eq!(config.calculator.min_channel_budget, 50.0);
        assert_eq!(config.calculator.default_duration_months, 1);
        assert_eq!(config.export.currency_symbol, "$");
    }
}
