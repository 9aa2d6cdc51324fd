//! Inbound activity events
//!
//! Activity arrives from a live chat feed on its own thread at arbitrary
//! times. Producers push [`ImpulseEvent`]s through an [`ImpulseSender`]; the
//! simulation drains the whole queue at the start of each tick so a tick never
//! observes a half-applied batch.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// "This participant was active", optionally with their preferred colour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpulseEvent {
    pub name: String,
    #[serde(default)]
    pub color_hint: Option<Rgb>,
}

impl ImpulseEvent {
    pub fn new(name: impl Into<String>, color_hint: Option<Rgb>) -> Self {
        Self {
            name: name.into(),
            color_hint,
        }
    }
}

/// A raw chat message as delivered by the chat connection
#[derive(Debug, Clone, Default)]
pub struct ChatMessage {
    pub display_name: String,
    /// Colour tag such as `#1E90FF`, if the author set one
    pub color_tag: Option<String>,
    /// Sent by our own connection
    pub is_self: bool,
}

impl ChatMessage {
    /// Convert to an impulse. Our own messages and nameless ones produce nothing.
    pub fn to_impulse(&self) -> Option<ImpulseEvent> {
        if self.is_self {
            return None;
        }
        let name = self.display_name.trim();
        if name.is_empty() {
            return None;
        }
        let color_hint = self.color_tag.as_deref().and_then(|tag| {
            let parsed = Rgb::parse_hex(tag);
            if parsed.is_none() {
                log::debug!("Unreadable colour tag {:?} from '{}'", tag, name);
            }
            parsed
        });
        Some(ImpulseEvent::new(name, color_hint))
    }
}

/// Cloneable producer handle for the impulse queue
#[derive(Debug, Clone)]
pub struct ImpulseSender {
    tx: Sender<ImpulseEvent>,
}

impl ImpulseSender {
    /// Queue an event. Returns false once the simulation is gone.
    pub fn send(&self, event: ImpulseEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Convert and queue a chat message, dropping the ones that yield no impulse
    pub fn send_chat(&self, message: &ChatMessage) -> bool {
        match message.to_impulse() {
            Some(event) => self.send(event),
            None => false,
        }
    }
}

/// Consumer side of the impulse queue, owned by the simulation
#[derive(Debug)]
pub struct ActivityFeed {
    tx: Sender<ImpulseEvent>,
    rx: Receiver<ImpulseEvent>,
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityFeed {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> ImpulseSender {
        ImpulseSender {
            tx: self.tx.clone(),
        }
    }

    /// Take everything queued so far, in arrival order
    pub fn drain(&self) -> Vec<ImpulseEvent> {
        self.rx.try_iter().collect()
    }
}
