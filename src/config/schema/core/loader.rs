use super::Config;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let router_dir = home.join(".content-router");
        let config_path = router_dir.join("config.toml");

        if !router_dir.exists() {
            fs::create_dir_all(&router_dir)
                .context("Failed to create .content-router directory")?;
            fs::create_dir_all(router_dir.join("workspace"))
                .context("Failed to create workspace directory")?;
        }

        let mut config = if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path.clone_from(&config_path);
            config.workspace_dir = router_dir.join("workspace");
            config
        } else {
            let config = Self {
                config_path: config_path.clone(),
                workspace_dir: router_dir.join("workspace"),
                ..Self::default()
            };
            config.save()?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Persist the file-backed settings. Env overrides are applied after load,
    /// so a freshly created file never captures credentials from the environment.
    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
