//! In-process event hub standing in for a host's event registrations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::api::{
    ButtonState, ContextKey, Handler, HookPoint, HookToken, HostEvents, TickEvent, TileCanvas,
};

/// Dispatches fired events to registered handlers in registration order.
///
/// Handlers are cloned out of the lock before they run, so a handler may
/// register or unregister others.
#[derive(Debug, Default)]
pub struct LocalEventHub {
    next_token: AtomicU64,
    handlers: RwLock<Vec<(HookToken, Handler)>>,
}

impl LocalEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn handlers_at(&self, point: HookPoint) -> Vec<Handler> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, handler)| handler.point() == point)
            .map(|(_, handler)| handler.clone())
            .collect()
    }

    /// Delivers `event` to every tick handler.
    ///
    /// Returns the number of handlers invoked.
    pub fn fire_tick(&self, event: TickEvent) -> usize {
        let handlers = self.handlers_at(HookPoint::Tick);
        for handler in &handlers {
            if let Handler::Tick(tick) = handler {
                tick(event);
            }
        }
        handlers.len()
    }

    /// Lets every render handler draw into `canvas`, in registration order.
    ///
    /// Returns the number of handlers invoked.
    pub fn fire_render(&self, ctx: ContextKey, canvas: &mut dyn TileCanvas) -> usize {
        let handlers = self.handlers_at(HookPoint::Render);
        for handler in &handlers {
            if let Handler::Render(render) = handler {
                render(ctx, &mut *canvas);
            }
        }
        handlers.len()
    }

    /// Delivers a buttons-changed notification for `ctx`.
    ///
    /// Returns the number of handlers invoked.
    pub fn fire_buttons(&self, ctx: ContextKey, buttons: ButtonState) -> usize {
        let handlers = self.handlers_at(HookPoint::Buttons);
        for handler in &handlers {
            if let Handler::Buttons(changed) = handler {
                changed(ctx, buttons);
            }
        }
        handlers.len()
    }

    pub fn handler_count(&self, point: HookPoint) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, handler)| handler.point() == point)
            .count()
    }
}

impl HostEvents for LocalEventHub {
    fn register(&self, handler: Handler) -> HookToken {
        let token = HookToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((token, handler));
        token
    }

    fn unregister(&self, token: HookToken) -> bool {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        let before = handlers.len();
        handlers.retain(|(registered, _)| *registered != token);
        handlers.len() != before
    }
}
