use std::{io::Read, path::PathBuf, str::FromStr};

/// User preferences, read from a plain `key=value` file `.graphed` in the
/// home directory. Everything falls back to defaults when the file or a
/// key is missing.
#[derive(Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub x_label: String,
    pub y_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("/tmp/"),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
        }
    }
}

impl Config {
    pub fn from_config_file() -> Result<Self, String> {
        #[allow(deprecated)]
        let Some(home) = std::env::home_dir() else {
            return Err("could not determine home directory to load config file".into());
        };
        let config_raw = {
            let path = home.join(PathBuf::from(".graphed"));
            let mut file = std::fs::File::open(path)
                .map_err(|err| format!("could not open config file: {err}"))?;
            let mut buf = String::new();
            file.read_to_string(&mut buf)
                .map_err(|err| format!("could not load config file: {err}"))?;
            buf
        };
        Ok(Self::from_raw(&config_raw))
    }

    fn from_raw(config_raw: &str) -> Self {
        let mut config = Self::default();
        for line in config_raw.lines() {
            // Lines starting with "#" are considered comments.
            if line.starts_with('#') {
                continue;
            }
            let mut iter = line.split('=');
            let key = iter.next();
            let val = iter.next();
            match (key, val) {
                (Some("data_dir"), Some(path_str)) => {
                    if let Ok(path) = PathBuf::from_str(path_str) {
                        config.data_dir = path;
                    } else {
                        log::warn!("could not parse 'data_dir' as directory name");
                    }
                }
                (Some("x_label"), Some(x_label)) => {
                    config.x_label = x_label.to_string();
                }
                (Some("y_label"), Some(y_label)) => {
                    config.y_label = y_label.to_string();
                }
                _ => continue,
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_override_defaults() {
        let raw = "# session defaults\ndata_dir=/home/user/data\nx_label=time\ny_label=voltage\n";
        let config = Config::from_raw(raw);
        assert_eq!(config.data_dir, PathBuf::from("/home/user/data"));
        assert_eq!(config.x_label, "time");
        assert_eq!(config.y_label, "voltage");
    }

    #[test]
    fn unknown_keys_and_comments_are_ignored() {
        let raw = "# comment\nunknown=1\nx_label=t\n";
        let config = Config::from_raw(raw);
        assert_eq!(config.x_label, "t");
        assert_eq!(config.y_label, Config::default().y_label);
    }
}
