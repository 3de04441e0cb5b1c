//! Configuration structures for the labeling pipeline.

use crate::types::{BarMetric, BreachRule};
use serde::{Deserialize, Serialize};

/// Main configuration for the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Bar aggregation configuration.
    pub bars: BarConfig,
    /// Volatility estimation configuration.
    pub volatility: VolatilityConfig,
    /// CUSUM event filter configuration.
    pub cusum: CusumConfig,
    /// Barrier labeling configuration.
    pub labeling: LabelingConfig,
    /// Parallel dispatch configuration.
    pub dispatch: DispatchConfig,
}

/// Bar aggregation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarConfig {
    /// Accumulation metric driving bar boundaries.
    pub metric: BarMetric,
    /// Threshold at which a bar closes.
    pub threshold: f64,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            metric: BarMetric::TickCount,
            threshold: 100.0,
        }
    }
}

/// Volatility estimation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatilityConfig {
    /// Span of the exponentially weighted moving std, in samples.
    /// Weight of the most recent sample is 2 / (span + 1).
    pub span: u32,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self { span: 100 }
    }
}

/// CUSUM event filter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CusumConfig {
    /// Fixed threshold used when no volatility series is supplied.
    pub threshold: f64,
}

impl Default for CusumConfig {
    fn default() -> Self {
        Self { threshold: 0.01 }
    }
}

/// Barrier labeling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelingConfig {
    /// Profit-take barrier multiplier; 0 disables the upper barrier.
    pub pt_mult: f64,
    /// Stop-loss barrier multiplier; 0 disables the lower barrier.
    pub sl_mult: f64,
    /// Minimum target return required to seed an event.
    pub min_ret: f64,
    /// Vertical barrier holding period in calendar days.
    pub holding_days: i64,
    /// Comparison rule at exact barrier levels.
    pub breach_rule: BreachRule,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            pt_mult: 1.0,
            sl_mult: 1.0,
            min_ret: 0.0,
            holding_days: 1,
            breach_rule: BreachRule::Strict,
        }
    }
}

/// Parallel dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Worker count; 1 forces the deterministic sequential path.
    pub workers: usize,
    /// Use equal-sized (linear) molecules rather than the load-balanced
    /// nested partition.
    pub linear: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            linear: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.labeling.pt_mult, 1.0);
        assert_eq!(config.labeling.breach_rule, BreachRule::Strict);
        assert_eq!(config.dispatch.workers, 1);
        assert_eq!(config.volatility.span, 100);
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bars.threshold, config.bars.threshold);
        assert_eq!(back.labeling.holding_days, config.labeling.holding_days);
    }
}
