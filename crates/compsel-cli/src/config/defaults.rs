use directories::ProjectDirs;
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub config_file_name: String,
    pub query: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            config_file_name: "config.toml".to_string(),
            query: String::new(),
        }
    }
}

impl DefaultsConfig {
    /// Location of the user-level config file, whether or not it exists.
    pub fn user_config_path(&self) -> Option<PathBuf> {
        ProjectDirs::from("org", "compsel", "compsel")
            .map(|dirs| dirs.config_dir().join(&self.config_file_name))
    }
}
