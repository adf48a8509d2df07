//! The `(module, behavior, method)` identity triple.
//!
//! Chains never hold function references.  They hold a [`HandlerRef`] and
//! resolve it through a registry each time they dispatch, so a behavior
//! module can be reloaded between ticks without leaving a chain pointing at
//! a stale closure.
//!
//! Components are interned as `Arc<str>`: cloning a `HandlerRef` is three
//! refcount bumps, and equality is plain string equality.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{AvError, AvResult};

/// Identifies an invocable behavior method by structural identity.
///
/// Always exactly three non-empty components, none containing `.`, so the
/// dotted `Display` form always parses back to the same identity.  Ordering
/// and hashing are by `(module, behavior, method)`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct HandlerRef {
    module:   Arc<str>,
    behavior: Arc<str>,
    method:   Arc<str>,
}

/// A [`HandlerRef`] naming a pose transformer in the walker chain.
pub type WalkerSpec = HandlerRef;

impl HandlerRef {
    /// Build a triple, rejecting empty components and components containing
    /// the `.` separator.
    pub fn new(module: &str, behavior: &str, method: &str) -> AvResult<Self> {
        for part in [module, behavior, method] {
            if part.is_empty() || part.contains('.') {
                return Err(AvError::MalformedIdentity(format!(
                    "{module}.{behavior}.{method}"
                )));
            }
        }
        Ok(Self {
            module:   Arc::from(module),
            behavior: Arc::from(behavior),
            method:   Arc::from(method),
        })
    }

    #[inline]
    pub fn module(&self) -> &str {
        &self.module
    }

    #[inline]
    pub fn behavior(&self) -> &str {
        &self.behavior
    }

    #[inline]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// `true` if this identity belongs to `module`.
    #[inline]
    pub fn in_module(&self, module: &str) -> bool {
        &*self.module == module
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.module, self.behavior, self.method)
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandlerRef({self})")
    }
}

impl FromStr for HandlerRef {
    type Err = AvError;

    /// Parse `"module.behavior.method"`.
    fn from_str(s: &str) -> AvResult<Self> {
        let parts: Vec<&str> = s.split('.').collect();
        HandlerRef::try_from(parts.as_slice())
    }
}

impl TryFrom<&[&str]> for HandlerRef {
    type Error = AvError;

    fn try_from(parts: &[&str]) -> AvResult<Self> {
        match parts {
            [module, behavior, method] => HandlerRef::new(module, behavior, method),
            _ => Err(AvError::MalformedIdentity(parts.join("."))),
        }
    }
}

impl TryFrom<String> for HandlerRef {
    type Error = AvError;

    fn try_from(s: String) -> AvResult<Self> {
        s.parse()
    }
}

impl From<HandlerRef> for String {
    fn from(id: HandlerRef) -> String {
        id.to_string()
    }
}

// ── IntoIdentity ──────────────────────────────────────────────────────────────

/// Anything a registration call accepts as an identity.
///
/// Registration APIs are generic over this trait so callers can pass an
/// already-built [`HandlerRef`], a dotted string, or a slice of parts.  Shapes
/// other than a three-part identity fail with [`AvError::MalformedIdentity`]
/// and the registration does not proceed.
pub trait IntoIdentity {
    fn into_identity(self) -> AvResult<HandlerRef>;
}

impl IntoIdentity for HandlerRef {
    #[inline]
    fn into_identity(self) -> AvResult<HandlerRef> {
        Ok(self)
    }
}

impl IntoIdentity for &HandlerRef {
    #[inline]
    fn into_identity(self) -> AvResult<HandlerRef> {
        Ok(self.clone())
    }
}

impl IntoIdentity for &str {
    fn into_identity(self) -> AvResult<HandlerRef> {
        self.parse()
    }
}

impl IntoIdentity for &[&str] {
    fn into_identity(self) -> AvResult<HandlerRef> {
        HandlerRef::try_from(self)
    }
}

impl<const N: usize> IntoIdentity for [&str; N] {
    fn into_identity(self) -> AvResult<HandlerRef> {
        HandlerRef::try_from(&self[..])
    }
}

impl IntoIdentity for (&str, &str, &str) {
    fn into_identity(self) -> AvResult<HandlerRef> {
        HandlerRef::new(self.0, self.1, self.2)
    }
}
