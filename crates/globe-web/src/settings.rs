use anyhow::Context;
use globe_core::{default_locations, GlobeConfig, Location};

/// Config from the mount element's JSON attribute; defaults when absent.
pub fn parse_config(json: Option<&str>) -> anyhow::Result<GlobeConfig> {
    let config = match json {
        Some(text) if !text.trim().is_empty() => {
            serde_json::from_str::<GlobeConfig>(text).context("parsing globe config")?
        }
        _ => GlobeConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Locations from the mount element's JSON attribute; the four landing-page
/// corridors when absent.
pub fn parse_locations(json: Option<&str>) -> anyhow::Result<Vec<Location>> {
    match json {
        Some(text) if !text.trim().is_empty() => {
            serde_json::from_str(text).context("parsing globe locations")
        }
        _ => Ok(default_locations()),
    }
}
