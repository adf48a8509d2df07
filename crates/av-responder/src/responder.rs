//! The `Responder` trait — what a registered input handler implements.

use av_core::{InputEvent, MoveIntent, TargetId};
use av_registry::{HandlerRegistry, HandlerResult};

/// Whether a responder took ownership of the event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Stop propagation; no later entry sees this event.
    Consumed,
    /// Let the next matching entry run.
    Continue,
}

impl Outcome {
    #[inline]
    pub fn is_consumed(self) -> bool {
        matches!(self, Outcome::Consumed)
    }
}

/// An input handler.
///
/// Called synchronously from [`ResponderChain::dispatch`][crate::ResponderChain::dispatch]
/// and must return within the tick.  Movement is requested by pushing onto
/// `intents`; the frame dispatcher folds them into the avatar's candidate
/// pose after dispatch.
///
/// Closures with the matching signature implement this trait; use
/// [`responder_fn`] to box one without annotating its argument types.
pub trait Responder {
    fn respond(
        &self,
        event:   &InputEvent,
        target:  TargetId,
        intents: &mut Vec<MoveIntent>,
    ) -> HandlerResult<Outcome>;
}

impl<F> Responder for F
where
    F: Fn(&InputEvent, TargetId, &mut Vec<MoveIntent>) -> HandlerResult<Outcome>,
{
    #[inline]
    fn respond(
        &self,
        event:   &InputEvent,
        target:  TargetId,
        intents: &mut Vec<MoveIntent>,
    ) -> HandlerResult<Outcome> {
        self(event, target, intents)
    }
}

/// Box a closure as a `dyn Responder`.
pub fn responder_fn<F>(f: F) -> Box<dyn Responder>
where
    F: Fn(&InputEvent, TargetId, &mut Vec<MoveIntent>) -> HandlerResult<Outcome> + 'static,
{
    Box::new(f)
}

/// Registry of input handlers, keyed by identity triple.
pub type ResponderRegistry = HandlerRegistry<dyn Responder>;
