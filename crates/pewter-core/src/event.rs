//! Event system for Pewter.
//!
//! This module provides the host message base type every adapter produces:
//!
//! - [`Event`] - Base trait for all normalized events
//! - [`EventType`] - Event type classification (message, notice, presence)
//! - [`BoxedEvent`] - Type-erased container with runtime downcasting
//!
//! Every event carries a sender and a timestamp. Adapter-specific fields are
//! reached by downcasting to the concrete event type.

use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;

// ============================================================================
// Event Type Classification
// ============================================================================

/// Classification of event types.
///
/// This enum represents the high-level category of an event, which is useful
/// for routing without knowing the specific event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Messages carrying human-authored text.
    Message,
    /// Notices about activity on existing items (reactions, file shares).
    Notice,
    /// Presence changes.
    Presence,
    /// Other/unknown event types
    Other,
}

// ============================================================================
// Core Event Trait
// ============================================================================

/// The base trait for all normalized events.
///
/// Events are type-erased using `dyn Event` and can be downcast to concrete
/// types using `as_any()`.
pub trait Event: Any + Send + Sync {
    /// Returns the human-readable name of this event type.
    fn event_name(&self) -> &'static str;

    /// Returns the platform/adapter name (e.g., "slack").
    fn platform(&self) -> &'static str;

    /// Returns the high-level event type classification.
    fn event_type(&self) -> EventType {
        EventType::Other
    }

    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the identifier of the user who caused this event, if any.
    fn sender_id(&self) -> Option<&str>;

    /// Returns the platform timestamp of this event.
    fn timestamp(&self) -> &str;

    /// Returns the normalized text of this event.
    ///
    /// Only message events carry text; everything else returns `None`.
    fn plain_text(&self) -> Option<&str> {
        None
    }
}

// ============================================================================
// Boxed Event
// ============================================================================

/// A type-erased container for events that supports runtime downcasting.
///
/// `BoxedEvent` wraps any type implementing [`Event`] in an `Arc` and
/// implements `Deref<Target = dyn Event>`, so trait methods can be called
/// directly:
///
/// ```rust,ignore
/// let event: BoxedEvent = /* ... */;
/// let name = event.event_name();
/// let sender = event.sender_id();
/// ```
#[derive(Clone)]
pub struct BoxedEvent {
    inner: Arc<dyn Event>,
}

impl BoxedEvent {
    /// Creates a new `BoxedEvent` from any type implementing `Event`.
    pub fn new<E: Event + 'static>(event: E) -> Self {
        Self {
            inner: Arc::new(event),
        }
    }

    /// Returns the inner `Arc<dyn Event>`.
    pub fn inner(&self) -> &Arc<dyn Event> {
        &self.inner
    }

    /// Attempts to downcast to a concrete event type.
    pub fn downcast_ref<E: Event + 'static>(&self) -> Option<&E> {
        self.inner.as_any().downcast_ref()
    }

    /// Returns true if the wrapped event is of type `E`.
    pub fn is<E: Event + 'static>(&self) -> bool {
        self.inner.as_any().is::<E>()
    }
}

impl Deref for BoxedEvent {
    type Target = dyn Event;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl fmt::Debug for BoxedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedEvent")
            .field("event_name", &self.event_name())
            .field("platform", &self.platform())
            .field("timestamp", &self.timestamp())
            .finish()
    }
}
