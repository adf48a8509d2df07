//! The `HandlerRegistry` — identity triple → boxed handler.

use std::fmt;

use av_core::HandlerRef;
use tracing::debug;

use crate::{RegistryError, RegistryResult};

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = std::collections::HashMap<K, V>;

/// Lookup seam between the chains and whatever supplies behavior methods.
///
/// [`HandlerRegistry`] is the in-process implementation.  A host with its own
/// behavior-module system implements this instead and hands that to
/// `dispatch`/`walk`.
///
/// # Contract
///
/// - Must return `Err(RegistryError::NotFound)` for identities that do not
///   exist (including ones removed by a hot reload); never panic.
/// - Must not block.
pub trait Resolve<H: ?Sized> {
    fn resolve(&self, id: &HandlerRef) -> RegistryResult<&H>;
}

/// Owns one boxed handler per identity.
///
/// `H` is the handler trait object, e.g. `dyn Walker` or `dyn Responder`.
/// The registry is local to one view: it is not shared across chains or
/// participants and needs no locking.
pub struct HandlerRegistry<H: ?Sized> {
    handlers: Map<HandlerRef, Box<H>>,
}

impl<H: ?Sized> HandlerRegistry<H> {
    pub fn new() -> Self {
        Self { handlers: Map::default() }
    }

    /// Install `handler` under `id`.
    ///
    /// Registering an identity that already exists swaps the handler in place
    /// (hot reload) and returns the previous one.
    pub fn register(&mut self, id: HandlerRef, handler: Box<H>) -> Option<Box<H>> {
        let previous = self.handlers.insert(id.clone(), handler);
        if previous.is_some() {
            debug!(handler = %id, "handler replaced");
        } else {
            debug!(handler = %id, "handler registered");
        }
        previous
    }

    /// Remove one identity.  Returns the handler if it was present.
    pub fn unregister(&mut self, id: &HandlerRef) -> Option<Box<H>> {
        let removed = self.handlers.remove(id);
        if removed.is_some() {
            debug!(handler = %id, "handler unregistered");
        }
        removed
    }

    /// Remove every identity belonging to `module`.  Returns how many were
    /// removed.
    pub fn unregister_module(&mut self, module: &str) -> usize {
        let before = self.handlers.len();
        self.handlers.retain(|id, _| !id.in_module(module));
        let removed = before - self.handlers.len();
        if removed > 0 {
            debug!(module, removed, "module handlers unregistered");
        }
        removed
    }

    /// Look up the handler for `id`.
    #[inline]
    pub fn resolve(&self, id: &HandlerRef) -> RegistryResult<&H> {
        self.handlers
            .get(id)
            .map(|h| &**h)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    #[inline]
    pub fn contains(&self, id: &HandlerRef) -> bool {
        self.handlers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// All registered identities, sorted.
    pub fn identities(&self) -> Vec<&HandlerRef> {
        let mut ids: Vec<&HandlerRef> = self.handlers.keys().collect();
        ids.sort();
        ids
    }
}

impl<H: ?Sized> Default for HandlerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> fmt::Debug for HandlerRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.identities())
            .finish()
    }
}

impl<H: ?Sized> Resolve<H> for HandlerRegistry<H> {
    #[inline]
    fn resolve(&self, id: &HandlerRef) -> RegistryResult<&H> {
        HandlerRegistry::resolve(self, id)
    }
}
