//! Per-call configuration for simdarr operations.
//!
//! [`OpConfig`] decides which execution path a call may take (scalar, SIMD or
//! parallel SIMD), whether integer overflow and non-finite float results are
//! reported as errors, and how much of the input is processed.

use std::env;

use crate::error::{invalid_config, Result};

// ================================================================================================
// PERFORMANCE TUNING CONSTANTS
// ================================================================================================

/// Inputs shorter than this many elements always take the scalar loop.
pub const SIMD_THRESHOLD: usize = 32;

/// Inputs with at least this many elements are split across the rayon pool.
pub const PARALLEL_SIMD_THRESHOLD: usize = 262_144;

/// Elements handed to each rayon task on the parallel path.
pub const PARALLEL_CHUNK_SIZE: usize = 16_384;

const ENV_SIMD: &str = "SIMDARR_SIMD";
const ENV_SIMD_THRESHOLD: &str = "SIMDARR_SIMD_THRESHOLD";
const ENV_PARALLEL_THRESHOLD: &str = "SIMDARR_PARALLEL_THRESHOLD";
const ENV_CHECK_OVERFLOW: &str = "SIMDARR_CHECK_OVERFLOW";

/// Options shared by every operation.
///
/// # Examples
///
/// ```rust
/// use simdarr::OpConfig;
///
/// let cfg = OpConfig::default()
///     .with_overflow_checks(false)
///     .with_max_len(Some(1024))
///     .with_parallel_threshold(None);
/// assert!(!cfg.check_overflow);
/// assert_eq!(cfg.max_len, Some(1024));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpConfig {
    /// Report integer overflow, division by zero and non-finite float results.
    pub check_overflow: bool,
    /// Process at most this many leading elements of each input.
    pub max_len: Option<usize>,
    /// Allow the SIMD kernels. When `false` every call runs the scalar loop.
    pub simd: bool,
    /// Minimum input length for the SIMD path.
    pub simd_threshold: usize,
    /// Minimum input length for the parallel SIMD path, `None` disables it.
    pub parallel_threshold: Option<usize>,
    /// Elements per rayon task on the parallel path.
    pub parallel_chunk_size: usize,
}

impl Default for OpConfig {
    fn default() -> Self {
        Self {
            check_overflow: true,
            max_len: None,
            simd: true,
            simd_threshold: SIMD_THRESHOLD,
            parallel_threshold: Some(PARALLEL_SIMD_THRESHOLD),
            parallel_chunk_size: PARALLEL_CHUNK_SIZE,
        }
    }
}

impl OpConfig {
    /// Configuration that never leaves the scalar loop.
    pub fn scalar_only() -> Self {
        Self {
            simd: false,
            parallel_threshold: None,
            ..Self::default()
        }
    }

    pub fn with_overflow_checks(mut self, enabled: bool) -> Self {
        self.check_overflow = enabled;
        self
    }

    pub fn with_max_len(mut self, max_len: Option<usize>) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn with_simd(mut self, enabled: bool) -> Self {
        self.simd = enabled;
        self
    }

    pub fn with_simd_threshold(mut self, threshold: usize) -> Self {
        self.simd_threshold = threshold;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: Option<usize>) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_parallel_chunk_size(mut self, chunk_size: usize) -> Self {
        self.parallel_chunk_size = chunk_size;
        self
    }

    /// Checks that the configuration can drive the dispatcher.
    pub fn validate(&self) -> Result<()> {
        if self.parallel_chunk_size == 0 {
            return Err(invalid_config("parallel_chunk_size must be greater than zero"));
        }
        if self.max_len == Some(0) {
            return Err(invalid_config("max_len must be greater than zero"));
        }
        Ok(())
    }

    /// Default configuration overlaid with `SIMDARR_*` environment variables.
    ///
    /// | Variable | Values |
    /// |----------|--------|
    /// | `SIMDARR_SIMD` | `1`/`on`/`true`, `0`/`off`/`false` |
    /// | `SIMDARR_SIMD_THRESHOLD` | element count |
    /// | `SIMDARR_PARALLEL_THRESHOLD` | element count, or `off` |
    /// | `SIMDARR_CHECK_OVERFLOW` | `1`/`on`/`true`, `0`/`off`/`false` |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(value) = lookup(ENV_SIMD) {
            cfg.simd = parse_switch(ENV_SIMD, &value)?;
        }
        if let Some(value) = lookup(ENV_SIMD_THRESHOLD) {
            cfg.simd_threshold = parse_count(ENV_SIMD_THRESHOLD, &value)?;
        }
        if let Some(value) = lookup(ENV_PARALLEL_THRESHOLD) {
            cfg.parallel_threshold = match value.trim().to_ascii_lowercase().as_str() {
                "off" | "none" | "false" => None,
                _ => Some(parse_count(ENV_PARALLEL_THRESHOLD, &value)?),
            };
        }
        if let Some(value) = lookup(ENV_CHECK_OVERFLOW) {
            cfg.check_overflow = parse_switch(ENV_CHECK_OVERFLOW, &value)?;
        }

        cfg.validate()?;
        log::debug!("configuration loaded from environment: {cfg:?}");
        Ok(cfg)
    }

    /// The prefix of `data` this configuration allows an operation to touch.
    #[inline(always)]
    pub(crate) fn limit<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        match self.max_len {
            Some(max_len) if max_len < data.len() => &data[..max_len],
            _ => data,
        }
    }

    #[inline(always)]
    pub(crate) fn limit_mut<'a, T>(&self, data: &'a mut [T]) -> &'a mut [T] {
        match self.max_len {
            Some(max_len) if max_len < data.len() => &mut data[..max_len],
            _ => data,
        }
    }
}

fn parse_switch(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Ok(true),
        "0" | "off" | "false" | "no" => Ok(false),
        other => Err(invalid_config(format!("{key}: expected on/off, got '{other}'"))),
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|e| {
            invalid_config(format!("{key}: '{}' is not an element count ({e})", value.trim()))
        })
}
