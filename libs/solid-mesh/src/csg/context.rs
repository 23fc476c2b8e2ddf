//! # CSG Context
//!
//! Binds a boolean engine and a validation policy.
//!
//! Contexts are cheap to clone and can be passed explicitly. Operator sugar
//! on [`Solid`](crate::solid::Solid) uses [`CsgContext::global`], which is
//! bound once, on first use, from [`KernelConfig::from_env`].

use std::fmt;
use std::sync::{Arc, OnceLock};

use config::kernel::{KernelConfig, ValidationPolicy};
use tracing::{debug, info, warn};

use super::{trivial_result, BooleanOp, CsgEngine, EngineKind};
use crate::error::{SolidError, SolidResult};
use crate::mesh::Mesh;

static GLOBAL: OnceLock<Result<CsgContext, SolidError>> = OnceLock::new();

/// A bound boolean engine.
#[derive(Clone)]
pub struct CsgContext {
    engine: Arc<dyn CsgEngine>,
    validation: ValidationPolicy,
}

impl CsgContext {
    /// Wraps an engine with the default validation policy.
    pub fn new(engine: Arc<dyn CsgEngine>) -> Self {
        Self {
            engine,
            validation: ValidationPolicy::default(),
        }
    }

    /// Binds a specific built-in engine.
    pub fn with_engine(kind: EngineKind) -> SolidResult<Self> {
        Self::select(&[kind])
    }

    /// Binds the first available engine from `preference`.
    pub fn select(preference: &[EngineKind]) -> SolidResult<Self> {
        for &kind in preference {
            match kind.engine() {
                Some(engine) => {
                    info!(engine = %kind, "CSG engine bound");
                    return Ok(Self::new(engine));
                }
                None => debug!(engine = %kind, "CSG engine not compiled in, trying next"),
            }
        }
        Err(SolidError::backend_unavailable(
            preference.iter().map(|kind| kind.name()),
        ))
    }

    /// Binds an engine from configuration.
    ///
    /// Unknown backend names are skipped with a warning.
    pub fn from_config(config: &KernelConfig) -> SolidResult<Self> {
        let kinds: Vec<EngineKind> = config
            .backend_preference
            .iter()
            .filter_map(|name| {
                let kind = EngineKind::from_name(name);
                if kind.is_none() {
                    warn!(backend = %name, "Unknown CSG backend ignored");
                }
                kind
            })
            .collect();
        match Self::select(&kinds) {
            Ok(ctx) => Ok(ctx.with_validation(config.validation)),
            Err(_) => Err(SolidError::backend_unavailable(
                config.backend_preference.iter().cloned(),
            )),
        }
    }

    /// Process-wide context, bound on first call.
    ///
    /// The outcome of the first binding, success or failure, is kept for the
    /// life of the process.
    pub fn global() -> SolidResult<&'static CsgContext> {
        GLOBAL
            .get_or_init(|| {
                let config = KernelConfig::from_env()?;
                Self::from_config(&config)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Replaces the validation policy.
    pub fn with_validation(mut self, policy: ValidationPolicy) -> Self {
        self.validation = policy;
        self
    }

    /// The bound engine.
    pub fn engine(&self) -> &Arc<dyn CsgEngine> {
        &self.engine
    }

    /// Name of the bound engine.
    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// The validation policy.
    pub fn validation(&self) -> ValidationPolicy {
        self.validation
    }

    /// Applies `op` to two meshes, validating per the policy.
    ///
    /// Face indices of both operands are checked under every policy.
    pub fn apply(&self, op: BooleanOp, a: &Mesh, b: &Mesh) -> SolidResult<Mesh> {
        if self.validation.checks_inputs() {
            a.validate()?;
            b.validate()?;
        } else {
            a.check_indices()?;
            b.check_indices()?;
        }
        let result = match trivial_result(op, a, b) {
            Some(mesh) => mesh,
            None => self.engine.apply(op, a, b)?,
        };
        if self.validation.checks_output() {
            result.validate().inspect_err(|err| {
                warn!(%op, engine = self.engine_name(), %err, "Boolean result failed validation");
            })?;
        }
        debug!(
            %op,
            engine = self.engine_name(),
            faces = result.face_count(),
            "Boolean operation complete"
        );
        Ok(result)
    }

    /// `a ∪ b`
    pub fn union(&self, a: &Mesh, b: &Mesh) -> SolidResult<Mesh> {
        self.apply(BooleanOp::Union, a, b)
    }

    /// `a \ b`
    pub fn subtract(&self, a: &Mesh, b: &Mesh) -> SolidResult<Mesh> {
        self.apply(BooleanOp::Subtract, a, b)
    }

    /// `a ∩ b`
    pub fn intersect(&self, a: &Mesh, b: &Mesh) -> SolidResult<Mesh> {
        self.apply(BooleanOp::Intersect, a, b)
    }
}

impl fmt::Debug for CsgContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsgContext")
            .field("engine", &self.engine_name())
            .field("validation", &self.validation)
            .finish()
    }
}
