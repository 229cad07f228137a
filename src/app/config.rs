use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::render::TableStyle;

const MIN_INTERVAL_SECS: u64 = 1;
const DEFAULT_INTERVAL_SECS: u64 = 5;
const DEFAULT_MAX_ROWS: usize = 10;
const DEFAULT_CSV_FILE: &str = "gpuwatch.csv";

/// Runtime configuration
pub struct Config {
    pub interval: Duration,
    pub max_rows: usize,
    pub table_style: TableStyle,
    pub formatter_path: Option<PathBuf>,
    pub csv_path: PathBuf,
}

/// File-based configuration (TOML)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    general: GeneralConfig,
    formatter: FormatterConfig,
    output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct GeneralConfig {
    interval_secs: u64,
    max_rows: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FormatterConfig {
    style: String,
    program: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            style: "pipe".to_string(),
            program: String::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputConfig {
    csv_path: String,
}

impl Config {
    pub fn from_args() -> Result<Self, String> {
        // Load file config first
        let file_config = load_config_file().unwrap_or_default();

        // Start with file config values
        let mut interval_secs = file_config.general.interval_secs;
        let mut max_rows = file_config.general.max_rows;
        let mut table_style =
            TableStyle::parse(&file_config.formatter.style).unwrap_or(TableStyle::Pipe);
        let mut formatter_path = if file_config.formatter.program.is_empty() {
            None
        } else {
            Some(PathBuf::from(file_config.formatter.program))
        };
        let mut csv_path = if file_config.output.csv_path.is_empty() {
            None
        } else {
            Some(PathBuf::from(file_config.output.csv_path))
        };

        // Override with CLI args
        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => return Err(usage()),
                "--interval-secs" => {
                    let value = args.next().ok_or_else(|| {
                        "Missing value for --interval-secs\n\n".to_string() + &usage()
                    })?;
                    interval_secs = value
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid interval value: {value}\n\n{}", usage()))?;
                }
                "--max-rows" => {
                    let value = args
                        .next()
                        .ok_or_else(|| "Missing value for --max-rows\n\n".to_string() + &usage())?;
                    max_rows = value
                        .parse::<usize>()
                        .map_err(|_| format!("Invalid max rows value: {value}\n\n{}", usage()))?;
                }
                "--style" => {
                    let value = args
                        .next()
                        .ok_or_else(|| "Missing value for --style\n\n".to_string() + &usage())?;
                    table_style = TableStyle::parse(&value)
                        .ok_or_else(|| format!("Invalid table style: {value}\n\n{}", usage()))?;
                }
                "--formatter" => {
                    let value = args
                        .next()
                        .ok_or_else(|| "Missing value for --formatter\n\n".to_string() + &usage())?;
                    formatter_path = Some(PathBuf::from(value));
                }
                "--csv" => {
                    let value = args
                        .next()
                        .ok_or_else(|| "Missing value for --csv\n\n".to_string() + &usage())?;
                    csv_path = Some(PathBuf::from(value));
                }
                _ => return Err(format!("Unknown argument: {arg}\n\n{}", usage())),
            }
        }

        Ok(Self {
            interval: Duration::from_secs(normalize_interval_secs(interval_secs)),
            max_rows: normalize_max_rows(max_rows),
            table_style,
            formatter_path,
            csv_path: csv_path.unwrap_or_else(default_csv_path),
        })
    }
}

fn default_csv_path() -> PathBuf {
    env::temp_dir().join(DEFAULT_CSV_FILE)
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("gpuwatch").join("config.toml"))
}

fn load_config_file() -> Option<FileConfig> {
    let path = config_path()?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

fn usage() -> String {
    let config_location = config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "~/.config/gpuwatch/config.toml".to_string());
    let default_csv = default_csv_path().display().to_string();

    [
        "Usage: gpuwatch [options]",
        "",
        "Options:",
        "  --interval-secs <s>  Sampling interval in seconds (default: 5, min: 1)",
        "  --max-rows <n>       Retained history rows (default: 10, min: 1)",
        "  --style <style>      pipe | grid | simple | plain | github",
        "  --formatter <path>   Path to the table formatting tool (default: tabulate)",
        "  --csv <path>         CSV log destination",
        "  -h, --help           Show this help",
        "",
        &format!("Config file: {config_location}"),
        &format!("Default CSV log: {default_csv}"),
        "",
        "Example config.toml:",
        "  [general]",
        "  interval_secs = 5",
        "  max_rows = 10",
        "",
        "  [formatter]",
        "  style = \"pipe\"",
        "  program = \"/usr/local/bin/tabulate\"",
        "",
        "  [output]",
        "  csv_path = \"/var/log/gpuwatch.csv\"",
    ]
    .join("\n")
}

fn normalize_interval_secs(value: u64) -> u64 {
    value.max(MIN_INTERVAL_SECS)
}

fn normalize_max_rows(value: usize) -> usize {
    value.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_interval_secs_clamps_to_min() {
        assert_eq!(normalize_interval_secs(0), MIN_INTERVAL_SECS);
        assert_eq!(normalize_interval_secs(MIN_INTERVAL_SECS), MIN_INTERVAL_SECS);
        assert_eq!(normalize_interval_secs(30), 30);
    }

    #[test]
    fn normalize_max_rows_clamps_to_one() {
        assert_eq!(normalize_max_rows(0), 1);
        assert_eq!(normalize_max_rows(25), 25);
    }

    #[test]
    fn file_config_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.general.interval_secs, DEFAULT_INTERVAL_SECS);
        assert_eq!(config.general.max_rows, DEFAULT_MAX_ROWS);
        assert_eq!(config.formatter.style, "pipe");
        assert!(config.formatter.program.is_empty());
        assert!(config.output.csv_path.is_empty());
    }

    #[test]
    fn file_config_partial() {
        let config: FileConfig = toml::from_str(
            r#"
            [formatter]
            style = "grid"
            "#,
        )
        .unwrap();
        assert_eq!(config.general.interval_secs, DEFAULT_INTERVAL_SECS);
        assert_eq!(config.formatter.style, "grid");
    }
}
