//! Layered loading of the host configuration

use crate::{ConfigError, ConfigResult, HostConfig};
use config::{ConfigBuilder as ConfigBuilderInner, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

/// Environment prefix used by [`ConfigBuilder::with_default_env`]
pub const DEFAULT_ENV_PREFIX: &str = "ZSTDPLUG";

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Builder that layers defaults, files and environment variables into a [`HostConfig`]
///
/// Sources added later take precedence over earlier ones; built-in defaults always sit
/// underneath everything else.
#[derive(Debug)]
pub struct ConfigBuilder {
    sources: Vec<ConfigSource>,
    env_separator: String,
}

#[derive(Debug, Clone)]
enum ConfigSource {
    File {
        path: PathBuf,
        format: FileFormat,
        required: bool,
    },
    Environment {
        prefix: String,
    },
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            env_separator: "__".to_string(),
        }
    }

    /// Add an optional configuration file; a missing file is skipped
    pub fn add_source_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = Self::detect_format(&path);
        self.sources.push(ConfigSource::File {
            path,
            format,
            required: false,
        });
        self
    }

    /// Add a configuration file that must exist
    pub fn add_required_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = Self::detect_format(&path);
        self.sources.push(ConfigSource::File {
            path,
            format,
            required: true,
        });
        self
    }

    /// Add environment variable source with prefix
    pub fn add_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.sources.push(ConfigSource::Environment {
            prefix: prefix.into(),
        });
        self
    }

    /// Add the `ZSTDPLUG__*` environment variables
    pub fn with_default_env(self) -> Self {
        self.add_env_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Set environment variable separator (default: "__")
    pub fn env_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.env_separator = separator.into();
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> ConfigResult<HostConfig> {
        let defaults = serde_yaml::to_value(HostConfig::default())
            .map_err(|e| ConfigError::serialization(format!("Failed to serialize defaults: {}", e)))?;
        let mut inner: ConfigBuilderInner<config::builder::DefaultState> =
            config::Config::builder().add_source(config::Config::try_from(&defaults)?);

        for source in &self.sources {
            match source {
                ConfigSource::File {
                    path,
                    format,
                    required,
                } => {
                    if *required && !path.exists() {
                        return Err(ConfigError::Load {
                            path: path.clone(),
                            message: "file does not exist".to_string(),
                        });
                    }
                    inner = inner.add_source(
                        File::from(path.clone())
                            .format(*format)
                            .required(*required),
                    );
                }
                ConfigSource::Environment { prefix } => {
                    inner = inner.add_source(
                        Environment::with_prefix(prefix)
                            .prefix_separator(&self.env_separator)
                            .separator(&self.env_separator),
                    );
                }
            }
        }

        let config: HostConfig = inner.build()?.try_deserialize()?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Detect file format from extension
    fn detect_format(path: &Path) -> FileFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        }
    }

    /// Validate the configuration
    fn validate(config: &HostConfig) -> ConfigResult<()> {
        if !LOG_LEVELS.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::validation(format!(
                "Log level must be one of: {}",
                LOG_LEVELS.join(", ")
            )));
        }

        if config.decompression.max_output_size == 0 {
            return Err(ConfigError::validation(
                "Maximum decompression output size must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
