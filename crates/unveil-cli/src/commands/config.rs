use std::path::Path;

use anyhow::Result;

use unveil_core::AppConfig;

pub fn run(config: &AppConfig, explicit_path: Option<&Path>, path_only: bool) -> Result<()> {
    if path_only {
        match explicit_path {
            Some(path) => println!("{}", path.display()),
            None => println!("{}", AppConfig::config_path().display()),
        }
        return Ok(());
    }

    print!("{}", config.to_toml()?);
    Ok(())
}
