//! Run configuration
//!
//! The pipeline is driven by a YAML file, with the name map optionally
//! overridden by the MEMBER_NAMES environment variable (a JSON object
//! mapping phone numbers to display names).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

/// Environment variable holding a JSON phone → name map.
pub const MEMBER_NAMES_ENV: &str = "MEMBER_NAMES";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// PDF bill to analyze.
    pub bill_path: PathBuf,
    /// Zero-based page holding the summary table.
    pub page_number: usize,
    /// Zero-based page holding the billing period and TOTAL DUE.
    #[serde(default)]
    pub front_page_number: usize,
    /// Expected number of family members.
    pub family_count: usize,
    /// true: split all plan costs evenly across members; false: included
    /// members share the lump sum, others pay their own plan.
    pub plan_cost_for_all_members: bool,
    /// Where the summary CSV lands.
    pub summarized_bill_path: PathBuf,
    /// Where the billing-period label lands.
    #[serde(default = "default_billing_period_path")]
    pub billing_period_path: PathBuf,
    /// Phone → display-name map; MEMBER_NAMES overrides it when set.
    #[serde(default)]
    pub member_names: HashMap<String, String>,
}

fn default_billing_period_path() -> PathBuf {
    PathBuf::from("billing_month.txt")
}

impl Config {
    /// Loads the YAML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Reading configuration from {}", path.display());
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// The effective name map: the MEMBER_NAMES env JSON when set, else the
    /// config file's map.
    pub fn resolve_member_names(&self) -> Result<HashMap<String, String>> {
        match std::env::var(MEMBER_NAMES_ENV) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("{MEMBER_NAMES_ENV} is not a JSON object of names")),
            Err(_) => Ok(self.member_names.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
bill_path: attachments/phone_bill.pdf
page_number: 1
family_count: 4
plan_cost_for_all_members: false
summarized_bill_path: summarized_bill.csv
member_names:
  "(555) 123-4001": Alice
"#;

    #[test]
    fn test_parses_yaml_config() {
        let config: Config = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(config.bill_path, PathBuf::from("attachments/phone_bill.pdf"));
        assert_eq!(config.page_number, 1);
        assert_eq!(config.family_count, 4);
        assert!(!config.plan_cost_for_all_members);
        assert_eq!(
            config.member_names.get("(555) 123-4001").map(String::as_str),
            Some("Alice")
        );
    }

    #[test]
    fn test_optional_fields_default() {
        let config: Config = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(config.front_page_number, 0);
        assert_eq!(config.billing_period_path, PathBuf::from("billing_month.txt"));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/billsplit.yml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
