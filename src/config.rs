use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context as _;
use gif_header::de::{Version, VersionAllowList};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Replaces the default version allow-list when present.
    #[serde(default)]
    versions: Option<Vec<String>>,
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(s).context("failed to parse configuration")?;
        // Reject malformed version strings up front.
        config.allow_list()?;
        Ok(config)
    }
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration file {}", path.display()))?;
        contents.parse()
    }

    /// Load the configuration from `explicit`, or from the default location if it exists.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            info!("using configuration: {:#}", path.display());
            return Self::from_file(path);
        }

        let Some(path) = default_path() else {
            debug!("no configuration directory on this platform");
            return Ok(Self::default());
        };

        match fs::read_to_string(&path) {
            Ok(contents) => {
                info!("using configuration: {:#}", path.display());
                contents.parse()
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no configuration at {:#}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err).with_context(|| {
                format!("failed to read configuration file {}", path.display())
            }),
        }
    }

    /// The versions the parser should accept.
    pub fn allow_list(&self) -> anyhow::Result<VersionAllowList> {
        let Some(ref versions) = self.versions else {
            return Ok(VersionAllowList::default());
        };

        versions
            .iter()
            .map(|v| v.parse::<Version>().context("invalid entry in `versions`"))
            .collect()
    }
}

fn default_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.extend([env!("CARGO_PKG_NAME"), "config.toml"]);
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config.allow_list().unwrap(), VersionAllowList::default());
    }

    #[test]
    fn versions_replace_defaults() {
        let config: Config = r#"versions = ["89a", "90a"]"#.parse().unwrap();
        let list = config.allow_list().unwrap();

        assert!(list.contains(Version::GIF89A));
        assert!(list.contains("90a".parse().unwrap()));
        assert!(!list.contains(Version::GIF87A));
    }

    #[test]
    fn rejects_malformed_version() {
        assert!(r#"versions = ["89"]"#.parse::<Config>().is_err());
        assert!(r"versions = 89".parse::<Config>().is_err());
    }
}
