//! Output formatting

use clap::ValueEnum;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, CliError> {
        <Self as ValueEnum>::from_str(value, true)
            .map_err(|_| CliError::InvalidArgument(format!("unknown output format: {}", value)))
    }

    /// Render `data`; the table format shows `rows` instead
    pub fn render<T, R>(&self, data: &T, rows: &[R]) -> Result<String, CliError>
    where
        T: Serialize + ?Sized,
        R: Tabled,
    {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
            OutputFormat::Table => {
                if rows.is_empty() {
                    return Ok("No results".to_string());
                }
                Ok(Table::new(rows).with(Style::rounded()).to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        name: &'static str,
        count: u32,
    }

    #[test]
    fn test_json_uses_data_not_rows() {
        let out = OutputFormat::Json
            .render(&serde_json::json!({"total": 2}), &[Row { name: "a", count: 1 }])
            .unwrap();
        assert!(out.contains("\"total\": 2"));
        assert!(!out.contains("name"));
    }

    #[test]
    fn test_table_lists_rows() {
        let rows = [Row { name: "alpha", count: 3 }];
        let out = OutputFormat::Table.render(&(), &rows).unwrap();
        assert!(out.contains("alpha"));
        assert!(out.contains("count"));
    }

    #[test]
    fn test_empty_table() {
        let out = OutputFormat::Table.render::<_, Row>(&(), &[]).unwrap();
        assert_eq!(out, "No results");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(OutputFormat::parse("YAML").unwrap(), OutputFormat::Yaml);
        assert!(OutputFormat::parse("xml").is_err());
    }
}
