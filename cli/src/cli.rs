use clap::{Parser, ValueEnum};

use model::Strategy;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    NearestFirst,
    LoadAware,
    EnergySaving,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::NearestFirst => Strategy::NearestFirst,
            StrategyArg::LoadAware => Strategy::NearestLoadAware,
            StrategyArg::EnergySaving => Strategy::EnergySaving,
        }
    }
}

/// Startup overrides for the reference front-end (spec.md section 6). Any
/// unset value falls back to `SimConfig::from_env()`, which itself falls
/// back to the documented defaults.
#[derive(Debug, Parser)]
#[clap(name = "elevator-sim", version)]
pub struct Cli {
    /// Dispatch strategy to start with.
    #[clap(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    #[clap(long)]
    pub floor_count: Option<u32>,

    #[clap(long)]
    pub cabin_count: Option<u32>,

    #[clap(long)]
    pub capacity: Option<u32>,

    /// Advance this many ticks of `FLOOR_TRAVEL_TIME` on startup before
    /// dropping into the interactive menu, useful for scripted demos.
    #[clap(long, default_value_t = 0)]
    pub warmup_ticks: u32,
}

pub fn apply_overrides(cli: &Cli, cfg: &mut model::SimConfig) {
    if let Some(strategy) = cli.strategy {
        cfg.strategy = strategy.into();
    }
    if let Some(v) = cli.floor_count {
        cfg.floor_count = v;
    }
    if let Some(v) = cli.cabin_count {
        cfg.cabin_count = v;
    }
    if let Some(v) = cli.capacity {
        cfg.capacity = v;
    }
}
