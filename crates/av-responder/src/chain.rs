//! The `ResponderChain` — per-event-kind tiers of responder entries.

use std::collections::HashMap;

use av_core::{EventKind, HandlerRef, InputEvent, IntoIdentity, MoveIntent, TargetId};
use av_registry::{Resolve, invoke};
use tracing::{debug, debug_span, trace, warn};

use crate::{Outcome, Predicate, Responder, ResponderResult};

// ── Tier ──────────────────────────────────────────────────────────────────────

/// Coarse dispatch priority.  Tiers run in declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Tier {
    First,
    Normal,
    Last,
}

impl Tier {
    /// Dispatch order.
    pub const ORDER: [Tier; 3] = [Tier::First, Tier::Normal, Tier::Last];

    #[inline]
    fn index(self) -> usize {
        match self {
            Tier::First  => 0,
            Tier::Normal => 1,
            Tier::Last   => 2,
        }
    }
}

// ── ResponderEntry ────────────────────────────────────────────────────────────

/// One registration in the chain.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponderEntry {
    pub event_kind: EventKind,
    pub tier:       Tier,
    /// `None` matches every modifier state.
    pub predicate:  Option<Predicate>,
    /// The scene object the handler acts for; passed through to the handler.
    pub target:     TargetId,
    pub handler:    HandlerRef,
}

impl ResponderEntry {
    #[inline]
    pub fn matches(&self, event: &InputEvent) -> bool {
        self.event_kind == event.kind
            && self.predicate.is_none_or(|p| p.matches(&event.modifiers))
    }
}

// ── ResponderChain ────────────────────────────────────────────────────────────

type Tiers = [Vec<ResponderEntry>; 3];

/// Ordered input handlers for every event kind.
///
/// Owned by the frame that dispatches into it; registration, removal, and
/// dispatch all happen on the tick thread.
#[derive(Clone, Debug, Default)]
pub struct ResponderChain {
    kinds: HashMap<EventKind, Tiers>,
}

impl ResponderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the end of `tier` for `event_kind`.
    ///
    /// Duplicate registrations are legal and fire in registration order.
    /// A malformed `handler` identity is rejected and nothing is registered.
    pub fn add_responder<S: IntoIdentity>(
        &mut self,
        event_kind: EventKind,
        tier:       Tier,
        predicate:  Option<Predicate>,
        target:     TargetId,
        handler:    S,
    ) -> ResponderResult<()> {
        let handler = handler.into_identity()?;
        debug!(kind = %event_kind, ?tier, %handler, "responder added");
        self.kinds.entry(event_kind).or_default()[tier.index()].push(ResponderEntry {
            event_kind,
            tier,
            predicate,
            target,
            handler,
        });
        Ok(())
    }

    /// Remove the first entry for `event_kind` whose handler is `handler`,
    /// searching tiers in dispatch order.
    ///
    /// Returns `false` (and changes nothing) when there is no such entry.
    pub fn remove_responder(&mut self, event_kind: EventKind, handler: &HandlerRef) -> bool {
        let Some(tiers) = self.kinds.get_mut(&event_kind) else {
            return false;
        };
        for entries in tiers.iter_mut() {
            if let Some(pos) = entries.iter().position(|e| &e.handler == handler) {
                entries.remove(pos);
                debug!(kind = %event_kind, %handler, "responder removed");
                return true;
            }
        }
        false
    }

    /// Drop every entry whose handler belongs to `module`, for all kinds and
    /// tiers.  Used when a behavior module tears down.
    pub fn remove_module(&mut self, module: &str) -> usize {
        let mut removed = 0;
        for tiers in self.kinds.values_mut() {
            for entries in tiers.iter_mut() {
                let before = entries.len();
                entries.retain(|e| !e.handler.in_module(module));
                removed += before - entries.len();
            }
        }
        if removed > 0 {
            debug!(module, removed, "module responders removed");
        }
        removed
    }

    /// Entries for `event_kind` in dispatch order.
    pub fn entries(&self, event_kind: EventKind) -> impl Iterator<Item = &ResponderEntry> {
        self.kinds
            .get(&event_kind)
            .into_iter()
            .flat_map(|tiers| tiers.iter().flatten())
    }

    /// The entries of one tier, in registration order.
    pub fn tier(&self, event_kind: EventKind, tier: Tier) -> &[ResponderEntry] {
        self.kinds
            .get(&event_kind)
            .map(|tiers| tiers[tier.index()].as_slice())
            .unwrap_or(&[])
    }

    /// Total entries across all kinds and tiers.
    pub fn len(&self) -> usize {
        self.kinds.values().flat_map(|t| t.iter()).map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.kinds.clear();
    }

    /// Route `event` through the chain.  Returns `true` if a handler
    /// consumed it.
    ///
    /// Entries whose identity does not resolve are skipped.  A handler that
    /// returns `Err` or panics is logged and treated as not consuming; any intents it
    /// pushed before failing are discarded.
    pub fn dispatch<R>(
        &self,
        event:    &InputEvent,
        registry: &R,
        intents:  &mut Vec<MoveIntent>,
    ) -> bool
    where
        R: Resolve<dyn Responder> + ?Sized,
    {
        let _span = debug_span!("dispatch", kind = %event.kind).entered();

        let Some(tiers) = self.kinds.get(&event.kind) else {
            return false;
        };

        for tier in Tier::ORDER {
            for entry in &tiers[tier.index()] {
                if !entry.matches(event) {
                    continue;
                }
                let responder = match registry.resolve(&entry.handler) {
                    Ok(r) => r,
                    Err(e) => {
                        debug!(?tier, error = %e, "skipping unresolved responder");
                        continue;
                    }
                };

                let mark = intents.len();
                match invoke(|| responder.respond(event, entry.target, intents)) {
                    Ok(Outcome::Consumed) => {
                        trace!(?tier, handler = %entry.handler, "consumed");
                        return true;
                    }
                    Ok(Outcome::Continue) => {
                        trace!(?tier, handler = %entry.handler, "passed");
                    }
                    Err(e) => {
                        intents.truncate(mark);
                        warn!(?tier, handler = %entry.handler, error = %e, "responder failed");
                    }
                }
            }
        }
        false
    }
}
