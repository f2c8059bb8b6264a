//! TOML configuration for the exporter binary.

use std::fs;
use std::path::{Path, PathBuf};

use log::error;
use serde::Deserialize;

use crate::errors::Error;

/// Contents of `rates_exporter.toml`. Every field is optional; command-line
/// flags take precedence over whatever the file provides.
#[derive(Debug, Default, Deserialize)]
pub struct ExporterConfig {
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct TerminalConfig {
    /// Endpoint the terminal bridge listens on.
    pub endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportConfig {
    /// Directory the CSV file is written to.
    pub output_dir: Option<PathBuf>,
}

pub fn read_config(path: &Path) -> Result<ExporterConfig, Error> {
    let content = fs::read_to_string(path).map_err(|e| {
        error!("failed to read config file {}: {e}", path.display());
        Error::Io(e)
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Applies the CLI-over-config-over-default precedence to one setting.
pub fn resolve<T>(cli: Option<T>, file: Option<T>, default: impl FnOnce() -> T) -> T {
    cli.or(file).unwrap_or_else(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn parses_a_full_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[terminal]
endpoint = "http://127.0.0.1:9000"

[export]
output_dir = "/tmp/exports"
"#
        )
        .unwrap();

        let config = read_config(file.path()).unwrap();
        assert_eq!(
            config.terminal.endpoint.as_deref(),
            Some("http://127.0.0.1:9000")
        );
        assert_eq!(
            config.export.output_dir,
            Some(PathBuf::from("/tmp/exports"))
        );
    }

    #[test]
    fn an_empty_file_yields_defaults() {
        let file = NamedTempFile::new().unwrap();
        let config = read_config(file.path()).unwrap();
        assert!(config.terminal.endpoint.is_none());
        assert!(config.export.output_dir.is_none());
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[terminal\nendpoint = ").unwrap();
        assert!(matches!(
            read_config(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn cli_flags_win_over_config_values_and_defaults() {
        assert_eq!(resolve(Some("cli"), Some("file"), || "default"), "cli");
        assert_eq!(resolve(None, Some("file"), || "default"), "file");
        assert_eq!(resolve(None::<&str>, None, || "default"), "default");
    }

    #[test]
    fn a_missing_file_is_an_io_error() {
        assert!(matches!(
            read_config(Path::new("/nonexistent/rates_exporter.toml")),
            Err(Error::Io(_))
        ));
    }
}
