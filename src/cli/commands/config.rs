//! Config Command
//!
//! Manage flightplan configuration.
//!
//! Usage:
//!   flightplan config show [-f json]
//!   flightplan config path
//!   flightplan config init [-g] [--force]

use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the merged effective configuration
pub fn show(format: &str) -> Result<()> {
    let config = ConfigLoader::load()?;
    println!("{}", ConfigLoader::render(&config, format == "json")?);
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    match ConfigLoader::global_config_path() {
        Some(global) => {
            let marker = if global.exists() { "" } else { " (not found)" };
            println!("Global:  {}{}", global.display(), marker);
        }
        None => println!("Global:  (no config directory on this platform)"),
    }

    let project = ConfigLoader::project_config_path();
    let marker = if project.exists() { "" } else { " (not found)" };
    println!("Project: {}{}", project.display(), marker);
    Ok(())
}

/// Initialize global configuration
pub fn init_global(force: bool) -> Result<()> {
    let path = ConfigLoader::init_global(force)?;
    println!("✓ Initialized global configuration");
    println!("  Config: {}", path.display());
    Ok(())
}

/// Initialize project configuration
pub fn init_project(force: bool) -> Result<()> {
    let path = ConfigLoader::init_project(force)?;
    println!("✓ Initialized project configuration");
    println!("  Config: {}", path.display());
    Ok(())
}
