use super::models::AppConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from disk, falling back to defaults on any error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("Failed to parse config TOML")?;
    Ok(tables.into())
}

pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(&ConfigTables::from(config)).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, ThemeMode};

    #[test]
    fn empty_document_yields_defaults() {
        let parsed = parse_config("").expect("empty TOML is valid");
        let defaults = AppConfig::default();
        assert_eq!(parsed.pdf_path, defaults.pdf_path);
        assert_eq!(parsed.default_zoom, defaults.default_zoom);
        assert_eq!(parsed.sync_deadband, 10.0);
        assert_eq!(parsed.min_annotation_size, 5.0);
        assert_eq!(parsed.key_undo, "ctrl+z");
    }

    #[test]
    fn tables_map_onto_flat_fields() {
        let parsed = parse_config(
            r#"
            [documents]
            pdf_path = "/data/report.pdf"
            html_base = "http://localhost:8000/html_output"
            document_id = "report"
            initial_page = 4

            [appearance]
            theme = "night"

            [sync]
            sync_enabled = false
            sync_deadband = 25.0

            [drawing]
            min_annotation_size = 8.0

            [keys]
            undo = "ctrl+u"

            [logging]
            log_level = "warn"
            "#,
        )
        .expect("valid config");

        assert_eq!(parsed.pdf_path, "/data/report.pdf");
        assert_eq!(parsed.html_base, "http://localhost:8000/html_output");
        assert_eq!(parsed.document_id, "report");
        assert_eq!(parsed.initial_page, 4);
        assert_eq!(parsed.theme, ThemeMode::Night);
        assert!(!parsed.sync_enabled);
        assert_eq!(parsed.sync_deadband, 25.0);
        assert_eq!(parsed.sync_suppress_ms, 100);
        assert_eq!(parsed.min_annotation_size, 8.0);
        assert_eq!(parsed.key_undo, "ctrl+u");
        assert_eq!(parsed.key_clear, "ctrl+l");
        assert_eq!(parsed.log_level, LogLevel::Warn);
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = AppConfig::default();
        config.document_id = "other".to_string();
        config.sync_enabled = false;
        let text = serialize_config(&config).expect("serializable");
        assert!(text.contains("[documents]"));
        let parsed = parse_config(&text).expect("round trip");
        assert_eq!(parsed.document_id, "other");
        assert!(!parsed.sync_enabled);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_config("[sync\nsync_enabled = maybe").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_config(Path::new("/nonexistent/pdf-html-validator.toml"));
        assert_eq!(cfg.document_id, AppConfig::default().document_id);
    }
}
