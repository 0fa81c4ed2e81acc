//! Defaults for the command-line options, read from a YAML file.

use std::env;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use passgen::{CharacterPool, PoolSelection};

use crate::ProgError;

pub(crate) const DEFAULT_LENGTH: usize = 16;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
    /// Copy generated passwords to the clipboard without being asked to.
    pub copy: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            length: DEFAULT_LENGTH,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
            copy: false,
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicitly named file must exist. The default file (`~/.config/passgen/config.yaml`)
    /// is optional; if it isn't there, the built-in defaults are used.
    pub(crate) fn load(explicit_path: Option<&Path>) -> Result<Config, ProgError> {
        match explicit_path {
            Some(path) => {
                log::debug!("loading configuration from {}", path.display());
                match Self::load_file(path)? {
                    Some(config) => Ok(config),
                    None => Err(ProgError::ConfigNotFound(path.to_owned())),
                }
            }
            None => {
                let Some(path) = default_config_path() else {
                    log::debug!("HOME is not set; using the built-in configuration");
                    return Ok(Config::default());
                };
                match Self::load_file(&path)? {
                    Some(config) => {
                        log::debug!("loaded configuration from {}", path.display());
                        Ok(config)
                    }
                    None => {
                        log::debug!(
                            "no configuration at {}; using the built-in configuration",
                            path.display()
                        );
                        Ok(Config::default())
                    }
                }
            }
        }
    }

    /// Returns `None` if the file doesn't exist.
    fn load_file(path: &Path) -> Result<Option<Config>, ProgError> {
        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("failed to open {}", path.display()))
                    .into())
            }
        };
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|err| anyhow::Error::new(err).context(format!("failed to read {}", path.display())))?;
        Self::parse(&contents)
            .map(Some)
            .map_err(|err| ProgError::ConfigInvalid(path.to_owned(), err))
    }

    fn parse(contents: &str) -> Result<Config, serde_yaml::Error> {
        // A document with nothing but comments deserializes as unit, not as an empty map.
        let is_blank = contents
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'));
        if is_blank {
            return Ok(Config::default());
        }
        serde_yaml::from_str(contents)
    }

    pub(crate) fn selection(&self) -> PoolSelection {
        let mut selection = PoolSelection::default();
        selection.set(CharacterPool::Uppercase, self.uppercase);
        selection.set(CharacterPool::Lowercase, self.lowercase);
        selection.set(CharacterPool::Digits, self.digits);
        selection.set(CharacterPool::Symbols, self.symbols);
        selection
    }
}

fn default_config_path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    let mut p = PathBuf::from(home);
    p.push(".config");
    p.push("passgen");
    p.push("config.yaml");
    Some(p)
}
