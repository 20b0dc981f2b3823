use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One entry of the batch channel list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEntry {
    pub handle: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ChannelEntry {
    #[must_use]
    pub fn new(handle: &str) -> Self {
        Self {
            handle: normalize_handle(handle),
            description: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChannelsFile {
    pub channels: Vec<ChannelEntry>,
}

/// Strip surrounding whitespace and a leading `@` from a channel handle.
#[must_use]
pub fn normalize_handle(handle: &str) -> String {
    handle.trim().trim_start_matches('@').trim().to_string()
}

/// Load the batch channel list from a YAML file.
///
/// List order is preserved and duplicate handles are kept; each entry is
/// processed independently.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or contains an
/// empty handle.
pub fn load_channels(path: &Path) -> Result<Vec<ChannelEntry>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ChannelsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_channels(&content)
}

/// Parse a channel list from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` on malformed YAML or an empty handle.
pub fn parse_channels(content: &str) -> Result<Vec<ChannelEntry>, ConfigError> {
    let file: ChannelsFile = serde_yaml::from_str(content)?;

    file.channels
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            let handle = normalize_handle(&entry.handle);
            if handle.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "channel entry {} has an empty handle",
                    idx + 1
                )));
            }
            let description = entry.description.filter(|d| !d.trim().is_empty());
            Ok(ChannelEntry {
                handle,
                description,
            })
        })
        .collect()
}
