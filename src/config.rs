use clap::builder::BoolishValueParser;
use clap::Args;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_USER_AGENT: &str = "DishDirect/0.1 (restaurant-discovery)";

/// Upstream endpoints and transport settings. Every flag can also come from
/// the environment (or a `.env` file).
#[derive(Args, Debug, Clone)]
pub struct DiscoveryConfig {
    /// Nominatim search endpoint used to geocode place names.
    #[arg(long, env = "NOMINATIM_URL", default_value = DEFAULT_NOMINATIM_URL, global = true)]
    pub nominatim_url: String,

    /// Overpass interpreter endpoint used for venue search.
    #[arg(long, env = "OVERPASS_URL", default_value = DEFAULT_OVERPASS_URL, global = true)]
    pub overpass_url: String,

    /// User-Agent sent to both providers.
    #[arg(long, env = "DISHDIRECT_USER_AGENT", default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Per-request transport timeout in seconds.
    #[arg(long, env = "DISHDIRECT_TIMEOUT_SECS", default_value_t = 25, global = true)]
    pub timeout_secs: u64,

    /// Offline mode: never call the network, always serve built-in data.
    #[arg(
        long,
        env = "DISHDIRECT_OFFLINE",
        global = true,
        value_parser = BoolishValueParser::new()
    )]
    pub offline: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 25,
            offline: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: DiscoveryConfig,
    }

    fn parse(args: &[&str]) -> Result<DiscoveryConfig, clap::Error> {
        TestCli::try_parse_from(std::iter::once("dishdirect").chain(args.iter().copied()))
            .map(|cli| cli.config)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--timeout-secs", "25"]).unwrap();
        assert_eq!(config.overpass_url, DEFAULT_OVERPASS_URL);
        assert_eq!(config.timeout_secs, 25);
    }

    #[test]
    fn test_offline_flag() {
        assert!(parse(&["--offline"]).unwrap().offline);
    }

    // Single test so the env var mutations do not race each other.
    #[test]
    fn test_offline_from_env() {
        let cases = [("1", true), ("yes", true), ("true", true), ("0", false), ("off", false)];
        for (value, expected) in cases {
            std::env::set_var("DISHDIRECT_OFFLINE", value);
            let config = parse(&[]).unwrap_or_else(|e| panic!("DISHDIRECT_OFFLINE={value}: {e}"));
            assert_eq!(config.offline, expected, "DISHDIRECT_OFFLINE={value}");
        }
        std::env::remove_var("DISHDIRECT_OFFLINE");
        assert!(!parse(&[]).unwrap().offline);
    }
}
