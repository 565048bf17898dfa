//! Default icon loading.
//!
//! The default icon is the universal backstop of the fallback chain. It is
//! loaded once at startup: from `default_icon_file` when configured, otherwise
//! from the PNG bundled into the binary.

use crate::config::{Config, DEFAULT_FAVICON_MIME};
use crate::error_handling::InitializationError;
use crate::validate::Icon;

const BUNDLED_DEFAULT_ICON: &[u8] = include_bytes!("../../assets/default_favicon.png");

/// Loads the default icon described by the configuration.
///
/// The icon's location is `config.default_icon_location`. An icon read from a
/// file is not validated; it is trusted as the operator's choice, but it must
/// not be empty.
///
/// # Errors
///
/// Returns `InitializationError::DefaultIconError` if the configured file
/// cannot be read or is empty.
pub fn load_default_icon(config: &Config) -> Result<Icon, InitializationError> {
    let data = match &config.default_icon_file {
        Some(path) => {
            let data =
                std::fs::read(path).map_err(|source| InitializationError::DefaultIconError {
                    path: path.display().to_string(),
                    source,
                })?;
            if data.is_empty() {
                return Err(InitializationError::DefaultIconError {
                    path: path.display().to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::InvalidData, "file is empty"),
                });
            }
            log::info!(
                "Loaded default icon from {} ({} bytes)",
                path.display(),
                data.len()
            );
            data
        }
        None => BUNDLED_DEFAULT_ICON.to_vec(),
    };

    let mime_type = infer::get(&data)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_else(|| DEFAULT_FAVICON_MIME.to_string());

    Ok(Icon {
        data,
        location: config.default_icon_location.clone(),
        mime_type,
    })
}
