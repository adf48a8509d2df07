//! The `WalkManager` — ordered walker specs and the `walk` loop.

use av_core::{AvatarId, IntoIdentity, Pose, WalkerSpec};
use av_registry::{Resolve, invoke};
use tracing::{debug, debug_span, trace, warn};

use crate::{ChainResult, WalkError, Walker, stock};

/// Per-stage result reported to the `walk` loop's observer closure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    Ran,
    Finalized,
    Unresolved,
    Failed,
}

/// What happened during one [`WalkManager::walk_traced`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct WalkTrace {
    /// The resolved pose; identical to what `walk` returns.
    pub pose: Pose,
    /// The stage that declared its result final, if any.
    pub finalized_by: Option<WalkerSpec>,
    /// Stages that were invoked and returned a result, in order.
    pub ran: Vec<WalkerSpec>,
    /// Stages whose identity did not resolve (passed through unchanged).
    pub unresolved: Vec<WalkerSpec>,
    /// Stages that returned an error or panicked (pre-call pose kept).
    pub failed: Vec<WalkerSpec>,
}

/// Owns the ordered list of walker identities.
///
/// List order is execution order and no identity appears twice.  The manager
/// holds identities only; handlers are resolved through a registry on every
/// `walk`, so reloading a behavior between ticks needs no chain update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalkManager {
    specs: Vec<WalkerSpec>,
}

impl WalkManager {
    /// An empty chain: `walk` returns its input unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock composition: portal check, fall recovery, collision
    /// resolution, in that order.
    pub fn with_default_chain() -> ChainResult<Self> {
        let mut manager = Self::new();
        for spec in stock::default_specs()? {
            manager.append(spec)?;
        }
        Ok(manager)
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Add `spec` to the end of the chain.
    ///
    /// # Errors
    ///
    /// - [`WalkError::Identity`] if `spec` is not a three-part identity.
    /// - [`WalkError::Duplicate`] if `spec` is already in the chain.
    pub fn append<S: IntoIdentity>(&mut self, spec: S) -> ChainResult<()> {
        let spec = spec.into_identity()?;
        self.reject_duplicate(&spec)?;
        debug!(walker = %spec, position = self.specs.len(), "walker appended");
        self.specs.push(spec);
        Ok(())
    }

    /// Insert `spec` immediately before the first entry equal to `before`.
    ///
    /// - `before == None`: same as [`append`][Self::append].
    /// - `before == Some(x)` and `x` is in the chain: inserted ahead of `x`.
    /// - `before == Some(x)` and `x` is absent: nothing happens and `Ok(())`
    ///   is returned.  `spec` is **not** appended.
    ///
    /// # Errors
    ///
    /// Same as `append`.  A malformed `spec` is reported even when the
    /// anchor is absent.
    pub fn insert_before<S: IntoIdentity>(
        &mut self,
        spec:   S,
        before: Option<&WalkerSpec>,
    ) -> ChainResult<()> {
        let spec = spec.into_identity()?;
        let Some(anchor) = before else {
            return self.append(spec);
        };
        let Some(pos) = self.position(anchor) else {
            debug!(walker = %spec, anchor = %anchor, "anchor absent; insert ignored");
            return Ok(());
        };
        self.reject_duplicate(&spec)?;
        debug!(walker = %spec, position = pos, "walker inserted");
        self.specs.insert(pos, spec);
        Ok(())
    }

    /// Remove `spec`.  Returns `false` if it was not in the chain.
    pub fn remove(&mut self, spec: &WalkerSpec) -> bool {
        match self.position(spec) {
            Some(pos) => {
                self.specs.remove(pos);
                debug!(walker = %spec, "walker removed");
                true
            }
            None => false,
        }
    }

    /// Remove every spec owned by `module`.  Returns how many were removed.
    pub fn remove_module(&mut self, module: &str) -> usize {
        let before = self.specs.len();
        self.specs.retain(|s| !s.in_module(module));
        before - self.specs.len()
    }

    pub fn remove_all(&mut self) {
        self.specs.clear();
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn specs(&self) -> &[WalkerSpec] {
        &self.specs
    }

    pub fn contains(&self, spec: &WalkerSpec) -> bool {
        self.position(spec).is_some()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    // ── Walk ──────────────────────────────────────────────────────────────

    /// Thread `pose` through every stage in order and return the result.
    ///
    /// Stops at the first stage whose result is final.  Unresolved stages and
    /// stages that fail or panic are identity pass-throughs.
    pub fn walk<R>(&self, registry: &R, avatar: AvatarId, pose: Pose, time: f64, delta: f64) -> Pose
    where
        R: Resolve<dyn Walker> + ?Sized,
    {
        self.run(registry, avatar, pose, time, delta, |_, _| {})
    }

    /// [`walk`][Self::walk], also reporting what each stage did.
    pub fn walk_traced<R>(
        &self,
        registry: &R,
        avatar:   AvatarId,
        pose:     Pose,
        time:     f64,
        delta:    f64,
    ) -> WalkTrace
    where
        R: Resolve<dyn Walker> + ?Sized,
    {
        let mut finalized_by = None;
        let mut ran = Vec::new();
        let mut unresolved = Vec::new();
        let mut failed = Vec::new();

        let pose = self.run(registry, avatar, pose, time, delta, |spec, stage| match stage {
            Stage::Ran => ran.push(spec.clone()),
            Stage::Finalized => {
                ran.push(spec.clone());
                finalized_by = Some(spec.clone());
            }
            Stage::Unresolved => unresolved.push(spec.clone()),
            Stage::Failed => failed.push(spec.clone()),
        });

        WalkTrace { pose, finalized_by, ran, unresolved, failed }
    }

    fn run<R, F>(
        &self,
        registry:  &R,
        avatar:    AvatarId,
        mut pose:  Pose,
        time:      f64,
        delta:     f64,
        mut stage: F,
    ) -> Pose
    where
        R: Resolve<dyn Walker> + ?Sized,
        F: FnMut(&WalkerSpec, Stage),
    {
        let _span = debug_span!("walk", %avatar).entered();

        for spec in &self.specs {
            let walker = match registry.resolve(spec) {
                Ok(w) => w,
                Err(e) => {
                    debug!(error = %e, "walker unresolved; passing through");
                    stage(spec, Stage::Unresolved);
                    continue;
                }
            };

            match invoke(|| walker.walk(avatar, pose, time, delta)) {
                Ok(result) => {
                    pose = result.pose;
                    if result.is_final {
                        trace!(walker = %spec, "final");
                        stage(spec, Stage::Finalized);
                        return pose;
                    }
                    trace!(walker = %spec, "passed");
                    stage(spec, Stage::Ran);
                }
                Err(e) => {
                    warn!(walker = %spec, error = %e, "walker failed; keeping previous pose");
                    stage(spec, Stage::Failed);
                }
            }
        }
        pose
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn position(&self, spec: &WalkerSpec) -> Option<usize> {
        self.specs.iter().position(|s| s == spec)
    }

    fn reject_duplicate(&self, spec: &WalkerSpec) -> ChainResult<()> {
        if self.contains(spec) {
            return Err(WalkError::Duplicate(spec.clone()));
        }
        Ok(())
    }
}
