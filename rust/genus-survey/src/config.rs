use std::collections::HashMap;

/// Largest genus evaluated when no `--max-genus` is given.
pub const DEFAULT_MAX_GENUS: u32 = 120;

/// Sweep and summary settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyConfig {
    pub min_genus: u32,
    pub max_genus: u32,
    /// Evaluate genera on the Rayon pool.
    pub parallel: bool,
    /// Bootstrap resamples for the confidence interval on the mean.
    pub bootstrap_resamples: usize,
    /// Two-sided confidence level, in (0, 1).
    pub confidence: f64,
    pub seed: u64,
    /// Flag genera where |total - interaction| exceeds this.
    pub consistency_threshold: f64,
    /// Flag totals further than this many standard deviations from the mean.
    pub extreme_sigma: f64,
    /// Print the full per-genus bundle, not just the summary.
    pub show_bundles: bool,
    pub json_path: Option<String>,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            min_genus: 0,
            max_genus: DEFAULT_MAX_GENUS,
            parallel: false,
            bootstrap_resamples: 10_000,
            confidence: 0.95,
            seed: 0x6765_6e75_7300_0001,
            consistency_threshold: 1e5,
            extreme_sigma: 3.0,
            show_bundles: true,
            json_path: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for --{key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("unknown mode: {0} (use --mode=survey|quick)")]
    UnknownMode(String),

    #[error("min genus {min} exceeds max genus {max}")]
    EmptyRange { min: u32, max: u32 },

    #[error("confidence must lie in (0, 1), got {0}")]
    Confidence(f64),

    #[error("bootstrap needs at least one resample")]
    NoResamples,
}

impl SurveyConfig {
    /// Small sweep for smoke runs.
    pub fn quick() -> Self {
        Self {
            max_genus: 20,
            bootstrap_resamples: 1_000,
            ..Self::default()
        }
    }

    /// Build from `--key=value` / `--flag` arguments (program name excluded).
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let opts = parse_args(args);

        let mut config = match opts.get("mode").map(String::as_str) {
            None | Some("survey") => Self::default(),
            Some("quick") => Self::quick(),
            Some(other) => return Err(ConfigError::UnknownMode(other.to_string())),
        };

        if let Some(v) = parse_opt(&opts, "min-genus")? {
            config.min_genus = v;
        }
        if let Some(v) = parse_opt(&opts, "max-genus")? {
            config.max_genus = v;
        }
        if let Some(v) = parse_opt(&opts, "resamples")? {
            config.bootstrap_resamples = v;
        }
        if let Some(v) = parse_opt(&opts, "confidence")? {
            config.confidence = v;
        }
        if let Some(v) = parse_opt(&opts, "threshold")? {
            config.consistency_threshold = v;
        }
        if let Some(v) = parse_opt(&opts, "sigma")? {
            config.extreme_sigma = v;
        }
        if let Some(v) = opts.get("seed") {
            config.seed = parse_seed(v).ok_or_else(|| ConfigError::InvalidValue {
                key: "seed".into(),
                value: v.clone(),
            })?;
        }
        config.parallel |= opts.contains_key("parallel");
        if opts.contains_key("quiet") {
            config.show_bundles = false;
        }
        if let Some(path) = opts.get("json") {
            config.json_path = Some(path.clone());
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_genus > self.max_genus {
            return Err(ConfigError::EmptyRange { min: self.min_genus, max: self.max_genus });
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(ConfigError::Confidence(self.confidence));
        }
        if self.bootstrap_resamples == 0 {
            return Err(ConfigError::NoResamples);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Argument parsing helpers
// ---------------------------------------------------------------------------

fn parse_args(args: &[String]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for arg in args {
        if let Some(kv) = arg.strip_prefix("--") {
            if let Some((k, v)) = kv.split_once('=') {
                map.insert(k.to_string(), v.to_string());
            } else {
                map.insert(kv.to_string(), "true".to_string());
            }
        }
    }
    map
}

fn parse_opt<T: std::str::FromStr>(
    opts: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    match opts.get(key) {
        None => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: v.clone(),
        }),
    }
}

fn parse_seed(v: &str) -> Option<u64> {
    if let Some(hex) = v.strip_prefix("0x") {
        u64::from_str_radix(&hex.replace('_', ""), 16).ok()
    } else {
        v.parse().ok()
    }
}
