//! Modifier-state predicates.
//!
//! A predicate is data rather than a closure so world manifests can declare
//! it (`{ shift = true }`) and so two entries' predicates can be compared.
//! Each field is a requirement on one modifier: `Some(true)` must be held,
//! `Some(false)` must not be held, `None` does not care.

use av_core::Modifiers;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Predicate {
    pub shift: Option<bool>,
    pub ctrl:  Option<bool>,
    pub alt:   Option<bool>,
    pub meta:  Option<bool>,
}

impl Predicate {
    /// Matches every modifier state.
    pub const ANY: Predicate = Predicate { shift: None, ctrl: None, alt: None, meta: None };

    /// Every modifier held in `held` must be held; the rest don't matter.
    pub fn requires(held: Modifiers) -> Self {
        let want = |on: bool| if on { Some(true) } else { None };
        Self {
            shift: want(held.shift),
            ctrl:  want(held.ctrl),
            alt:   want(held.alt),
            meta:  want(held.meta),
        }
    }

    /// The modifier state must equal `state` exactly.
    pub fn exactly(state: Modifiers) -> Self {
        Self {
            shift: Some(state.shift),
            ctrl:  Some(state.ctrl),
            alt:   Some(state.alt),
            meta:  Some(state.meta),
        }
    }

    pub fn with_shift(mut self, held: bool) -> Self {
        self.shift = Some(held);
        self
    }

    pub fn with_ctrl(mut self, held: bool) -> Self {
        self.ctrl = Some(held);
        self
    }

    pub fn with_alt(mut self, held: bool) -> Self {
        self.alt = Some(held);
        self
    }

    pub fn with_meta(mut self, held: bool) -> Self {
        self.meta = Some(held);
        self
    }

    pub fn matches(&self, m: &Modifiers) -> bool {
        fn ok(want: Option<bool>, got: bool) -> bool {
            want.is_none_or(|w| w == got)
        }
        ok(self.shift, m.shift) && ok(self.ctrl, m.ctrl) && ok(self.alt, m.alt) && ok(self.meta, m.meta)
    }
}
