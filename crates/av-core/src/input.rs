//! Raw input events as the responder chain sees them.

use std::fmt;

/// The kind of an input event.  The responder chain keeps one set of tiers
/// per kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EventKind {
    PointerDown,
    PointerUp,
    PointerMove,
    Wheel,
    KeyDown,
    KeyUp,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::PointerDown => "pointerDown",
            EventKind::PointerUp   => "pointerUp",
            EventKind::PointerMove => "pointerMove",
            EventKind::Wheel       => "wheel",
            EventKind::KeyDown     => "keyDown",
            EventKind::KeyUp       => "keyUp",
        };
        f.write_str(name)
    }
}

/// Modifier keys held when the event was produced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl:  bool,
    pub alt:   bool,
    pub meta:  bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, meta: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, ..Modifiers::NONE };
    pub const CTRL: Modifiers = Modifiers { ctrl: true, ..Modifiers::NONE };
    pub const ALT: Modifiers = Modifiers { alt: true, ..Modifiers::NONE };
}

/// A keyboard key.  Only the keys avatar controls care about are named;
/// everything printable arrives as `Char`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyCode {
    Char(char),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
    Enter,
}

/// Event-specific data.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputPayload {
    Key(KeyCode),
    /// Pointer position in viewport pixels and the button index.
    Pointer { x: f32, y: f32, button: u8 },
    Wheel { delta: f32 },
}

/// One raw input event, in arrival order.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputEvent {
    pub kind:      EventKind,
    pub modifiers: Modifiers,
    pub payload:   InputPayload,
}

impl InputEvent {
    pub fn key_down(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { kind: EventKind::KeyDown, modifiers, payload: InputPayload::Key(key) }
    }

    pub fn key_up(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { kind: EventKind::KeyUp, modifiers, payload: InputPayload::Key(key) }
    }

    pub fn pointer(kind: EventKind, x: f32, y: f32, button: u8, modifiers: Modifiers) -> Self {
        Self { kind, modifiers, payload: InputPayload::Pointer { x, y, button } }
    }

    pub fn wheel(delta: f32, modifiers: Modifiers) -> Self {
        Self { kind: EventKind::Wheel, modifiers, payload: InputPayload::Wheel { delta } }
    }

    /// The key, for keyboard events.
    #[inline]
    pub fn key(&self) -> Option<KeyCode> {
        match self.payload {
            InputPayload::Key(k) => Some(k),
            _ => None,
        }
    }
}
