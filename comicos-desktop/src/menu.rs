//! Menu action notifications.
//!
//! The application menu lives in the host process. Clicking an item sends a
//! one-way [`MenuAction`] to every subscriber on the [`MenuBus`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, Weak};

use serde::{Deserialize, Serialize};

/// An action picked from the application menu.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MenuAction {
    /// File > New Canvas.
    NewCanvas,
    /// File > Open.
    Open,
    /// File > Save.
    Save,
    /// File > Save As.
    SaveAs,
    /// File > Export Image.
    Export,
    /// View > Zoom In.
    ZoomIn,
    /// View > Zoom Out.
    ZoomOut,
    /// View > Actual Size.
    ZoomReset,
    /// Any action this build does not know by name.
    Other(String),
}

impl MenuAction {
    /// The wire name of the action.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NewCanvas => "new-canvas",
            Self::Open => "open",
            Self::Save => "save",
            Self::SaveAs => "save-as",
            Self::Export => "export",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::ZoomReset => "zoom-reset",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for MenuAction {
    fn from(name: String) -> Self {
        match name.as_str() {
            "new-canvas" => Self::NewCanvas,
            "open" => Self::Open,
            "save" => Self::Save,
            "save-as" => Self::SaveAs,
            "export" => Self::Export,
            "zoom-in" => Self::ZoomIn,
            "zoom-out" => Self::ZoomOut,
            "zoom-reset" => Self::ZoomReset,
            _ => Self::Other(name),
        }
    }
}

impl From<MenuAction> for String {
    fn from(action: MenuAction) -> Self {
        action.as_str().to_string()
    }
}

impl FromStr for MenuAction {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Handler = Arc<dyn Fn(&MenuAction) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    handlers: BTreeMap<u64, Handler>,
}

/// Fan-out of menu actions to subscribers.
#[derive(Clone, Default)]
pub struct MenuBus {
    listeners: Arc<Mutex<Listeners>>,
}

impl MenuBus {
    /// Create a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `handler` for every action emitted until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    #[must_use = "dropping the subscription detaches the handler"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&MenuAction) + Send + Sync + 'static,
    {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let id = listeners.next_id;
        listeners.next_id = listeners.next_id.wrapping_add(1);
        listeners.handlers.insert(id, Arc::new(handler));
        tracing::debug!("Menu subscriber {id} attached");

        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Deliver `action` to every current subscriber, in subscription order.
    ///
    /// Handlers run outside the internal lock, so they may subscribe or
    /// unsubscribe freely.
    pub fn emit(&self, action: &MenuAction) {
        let handlers: Vec<Handler> = self
            .listeners
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .handlers
            .values()
            .cloned()
            .collect();
        tracing::debug!("Menu action {action} -> {} subscribers", handlers.len());
        for handler in handlers {
            handler(action);
        }
    }

    /// Number of attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .handlers
            .len()
    }
}

impl fmt::Debug for MenuBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle to a menu subscription. Detaches its handler when dropped.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Subscription {
    /// Detach the handler now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            // The handler may own other subscriptions; drop it after unlocking.
            let removed = listeners
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .handlers
                .remove(&self.id);
            drop(removed);
            tracing::debug!("Menu subscriber {} detached", self.id);
        }
    }
}
