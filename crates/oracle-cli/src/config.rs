use std::fs;
use std::path::Path;

use feels_oracle_adapter::{
    Clock, ConfiguredAdapter, DualFeedAdapter, DualFeedConfig, FeedId, MarketAdjustment,
    SingleFeedAdapter, SingleFeedConfig, SnapshotFileFeed, StalenessPolicy,
};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Oracle configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OracleConfig {
    /// Price update document the feed reads on every query
    pub snapshot_path: String,

    /// Default `watch` polling interval in seconds
    #[serde(default = "default_watch_interval")]
    pub watch_interval: u64,

    /// Adapter mode and its feed configuration
    pub adapter: AdapterMode,
}

/// Adapter section, tagged by `mode`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum AdapterMode {
    Single(SingleFeedConfig),
    Dual(DualFeedConfig),
}

fn default_watch_interval() -> u64 {
    15
}

impl OracleConfig {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Io(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: OracleConfig = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> CliResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| {
            CliError::Io(format!("Failed to write config file {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.snapshot_path.trim().is_empty() {
            return Err(CliError::invalid_parameter("snapshot_path", "empty", "a file path"));
        }

        if self.watch_interval == 0 {
            return Err(CliError::invalid_parameter("watch_interval", "0", "greater than 0"));
        }

        match &self.adapter {
            AdapterMode::Single(config) => config.validate()?,
            AdapterMode::Dual(config) => config.validate()?,
        }

        Ok(())
    }

    pub fn feed(&self) -> SnapshotFileFeed {
        SnapshotFileFeed::new(&self.snapshot_path)
    }

    /// Build the configured adapter over the snapshot file
    pub fn build_adapter<C: Clock>(
        &self,
        clock: C,
    ) -> CliResult<ConfiguredAdapter<SnapshotFileFeed, C>> {
        let adapter: ConfiguredAdapter<_, C> = match &self.adapter {
            AdapterMode::Single(config) => {
                SingleFeedAdapter::new(self.feed(), clock, config.clone())?.into()
            }
            AdapterMode::Dual(config) => {
                DualFeedAdapter::new(self.feed(), clock, config.clone())?.into()
            }
        };
        Ok(adapter)
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "prices.json".to_string(),
            watch_interval: default_watch_interval(),
            adapter: AdapterMode::Single(SingleFeedConfig::new(
                FeedId::default(),
                StalenessPolicy::default(),
                MarketAdjustment::default(),
            )),
        }
    }
}

// Well-known Pyth feed ids
const ETH_USD: &str = "0xff61491a931112ddf1bd8147cd1b641375f79f5825126d665480874634fd0ace";
const BTC_USD: &str = "0xe62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43";

/// Create example configuration file: ETH/BTC priced from ETH/USD and BTC/USD
pub fn create_example_config(path: impl AsRef<Path>) -> CliResult<()> {
    let numerator = FeedId::from_hex(ETH_USD)?;
    let denominator = FeedId::from_hex(BTC_USD)?;

    let example_config = OracleConfig {
        snapshot_path: "prices.json".to_string(),
        watch_interval: 15,
        adapter: AdapterMode::Dual(DualFeedConfig::new(
            numerator,
            denominator,
            StalenessPolicy::new(60),
            0,
        )),
    };

    example_config.save(path)?;
    Ok(())
}
