//! Global config file source: $XDG_CONFIG_HOME/sizecheck/config.toml (optional)

use crate::config::xdg;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};

/// Add the global config file to builder when it can be located.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Ok(path) = xdg::global_config_path() else {
        return Ok(builder);
    };
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(false)))
}
