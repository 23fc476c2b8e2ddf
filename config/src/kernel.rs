//! Runtime configuration for the solid kernel.
//!
//! [`KernelConfig`] is an immutable snapshot validated on construction. It
//! carries the default resolution of round primitives, the CSG backend
//! preference order, the seam policy used by revolved solids and the
//! validation policy used by boolean composition. Numeric tolerances are
//! fixed in [`crate::constants`].

use std::fmt;

use crate::constants::{BACKEND_ENV_VAR, DEFAULT_BACKEND_ORDER, DEFAULT_SEGMENTS, MIN_SEGMENTS};

/// How a revolved sweep treats its closing seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeamPolicy {
    /// The last profile is stitched back to the first. No caps.
    #[default]
    Weld,
    /// Profiles are stitched in order and both ends are capped.
    Open,
}

/// When boolean composition checks mesh watertightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Validate both operands and the result.
    #[default]
    Strict,
    /// Validate only the result.
    OutputOnly,
    /// Skip validation entirely.
    Off,
}

impl ValidationPolicy {
    /// Whether operands are validated before combination.
    pub fn checks_inputs(self) -> bool {
        matches!(self, ValidationPolicy::Strict)
    }

    /// Whether results are validated after combination.
    pub fn checks_output(self) -> bool {
        !matches!(self, ValidationPolicy::Off)
    }
}

/// Immutable kernel configuration.
///
/// # Examples
/// ```
/// use config::kernel::KernelConfig;
/// let cfg = KernelConfig::new(24).expect("valid config");
/// assert_eq!(cfg.segments(None), 24);
/// assert_eq!(cfg.segments(Some(8)), 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KernelConfig {
    /// Default segment count for round primitives.
    pub default_segments: u32,
    /// Backend names tried in order when binding a CSG engine.
    pub backend_preference: Vec<String>,
    /// Seam handling for revolved solids.
    pub seam_policy: SeamPolicy,
    /// Watertightness checks around boolean composition.
    pub validation: ValidationPolicy,
}

impl KernelConfig {
    /// Builds a configuration, rejecting segment counts that cannot form a
    /// polygon.
    pub fn new(default_segments: u32) -> Result<Self, ConfigError> {
        if default_segments < MIN_SEGMENTS {
            return Err(ConfigError::InvalidSegments(default_segments));
        }
        Ok(Self {
            default_segments,
            ..Self::default()
        })
    }

    /// Segment count for a round primitive, falling back to
    /// `default_segments` when none is requested.
    pub fn segments(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.default_segments)
    }

    /// Replaces the backend preference order.
    pub fn with_backends<I, S>(mut self, names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(ConfigError::EmptyBackendList);
        }
        self.backend_preference = names;
        Ok(self)
    }

    /// Replaces the seam policy.
    pub fn with_seam_policy(mut self, policy: SeamPolicy) -> Self {
        self.seam_policy = policy;
        self
    }

    /// Replaces the validation policy.
    pub fn with_validation(mut self, policy: ValidationPolicy) -> Self {
        self.validation = policy;
        self
    }

    /// Default configuration with the backend order taken from
    /// [`BACKEND_ENV_VAR`] when it is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(BACKEND_ENV_VAR) {
            Ok(raw) => Self::default().with_backends(parse_backend_list(&raw)),
            Err(_) => Ok(Self::default()),
        }
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            default_segments: DEFAULT_SEGMENTS,
            backend_preference: DEFAULT_BACKEND_ORDER.iter().map(|s| s.to_string()).collect(),
            seam_policy: SeamPolicy::default(),
            validation: ValidationPolicy::default(),
        }
    }
}

/// Splits a comma-separated backend list, trimming blanks and lowercasing.
///
/// # Examples
/// ```
/// use config::kernel::parse_backend_list;
/// assert_eq!(parse_backend_list(" BSP, raycast ,,"), vec!["bsp", "raycast"]);
/// ```
pub fn parse_backend_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Segment count too small to form a polygon.
    InvalidSegments(u32),
    /// Backend preference list contained no names.
    EmptyBackendList,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSegments(value) => {
                write!(f, "default_segments must be >= {MIN_SEGMENTS}: {value}")
            }
            ConfigError::EmptyBackendList => write!(f, "backend preference list is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}
