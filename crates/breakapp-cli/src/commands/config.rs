use anyhow::Result;
use breakapp_core::config::RootConfig;

/// Prints the effective configuration as TOML.
pub fn show(config: &RootConfig) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let rendered = toml::to_string_pretty(&RootConfig::default()).unwrap();
        assert!(rendered.contains("[engine]"));
        let parsed: RootConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, RootConfig::default());
    }
}
