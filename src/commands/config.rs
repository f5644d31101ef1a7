//! `objj config` - inspect and edit ~/.objj/settings.toml

use anyhow::Result;
use colored::*;

use objj::paths;
use objj::settings::{self, SettingKey};

fn show_value(name: &str, value: Option<String>) {
    match value {
        Some(value) => println!("  {} = {}", name, value),
        None => println!("  {} = {}", name, "(not set)".dimmed()),
    }
}

pub fn show() -> Result<()> {
    let config = settings::load()?;

    println!("⚙️  Settings: {}", paths::settings_path().display());
    show_value("cappuccino_source", config.cappuccino_source.clone());
    show_value("lookup_target", config.lookup_target.clone());
    show_value(
        "lib_dir",
        config.lib_dir.as_ref().map(|p| p.display().to_string()),
    );
    println!("  (tables read from {})", config.resolved_lib_dir().display());
    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let key: SettingKey = key.parse()?;
    let mut config = settings::load()?;
    config.set(key, value);
    settings::save(&config)?;
    println!("✓ Saved {:?}", key);
    Ok(())
}

pub fn unset(key: &str) -> Result<()> {
    let key: SettingKey = key.parse()?;
    let mut config = settings::load()?;
    config.unset(key);
    settings::save(&config)?;
    println!("✓ Cleared {:?}", key);
    Ok(())
}
