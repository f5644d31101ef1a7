use anyhow::{Context, Result};

use objj::lookup::{self, LookupTarget, SymbolScope};
use objj::settings::{self, Settings};

pub fn execute(
    scope: &str,
    line: &str,
    word: &str,
    target: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let scope: SymbolScope = scope.parse()?;
    let config = match target {
        Some(_) => Settings::default(),
        None => settings::load()?,
    };
    let target = resolve_target(target, &config)?;

    let term = lookup::resolve(scope, line, word)?;

    if dry_run {
        println!("🔎 {}", term);
        print!("{}", target.script(&term));
        return Ok(());
    }

    lookup::open_in(target, &term)
}

/// Explicit target, else the configured one
fn resolve_target(target: Option<String>, config: &Settings) -> Result<LookupTarget> {
    let target = match target {
        Some(target) => target,
        None => config
            .lookup_target
            .clone()
            .context("No target application has been set for symbol lookups.")?,
    };
    target.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_target_configured_is_an_error() {
        let err = resolve_target(None, &Settings::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No target application has been set for symbol lookups."
        );
    }

    #[test]
    fn test_explicit_target_overrides_settings() -> Result<()> {
        let config = Settings {
            lookup_target: Some("not-a-browser".to_string()),
            ..Settings::default()
        };
        let target = resolve_target(Some("ingredients".to_string()), &config)?;
        assert_eq!(target, LookupTarget::Ingredients);
        Ok(())
    }

    #[test]
    fn test_configured_target_is_used() -> Result<()> {
        let config = Settings {
            lookup_target: Some("ingredients".to_string()),
            ..Settings::default()
        };
        assert_eq!(resolve_target(None, &config)?, LookupTarget::Ingredients);
        Ok(())
    }
}
