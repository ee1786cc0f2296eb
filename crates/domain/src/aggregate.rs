//! Core aggregate and domain event traits.

use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name, used in logs and metrics labels.
    fn event_type(&self) -> &'static str;
}

/// Trait for aggregates whose state only changes through events.
///
/// Command methods inspect the current state and return the events they
/// would produce, or an error. `apply` folds an event into the state and
/// never fails.
pub trait Aggregate: Send + Sync + Sized {
    /// Identifier type of the aggregate root.
    type Id: Copy + std::fmt::Display;

    /// The type of events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// The type of errors this aggregate's commands can produce.
    type Error: std::error::Error + Send + Sync;

    /// Returns the aggregate type name.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's unique identifier.
    fn id(&self) -> Self::Id;

    /// Applies an event to the aggregate, updating its state.
    ///
    /// Must be deterministic and side-effect free.
    fn apply(&mut self, event: Self::Event);

    /// Applies multiple events in sequence.
    fn apply_events(&mut self, events: impl IntoIterator<Item = Self::Event>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Runs a command against the current state and applies its events.
    ///
    /// Nothing is applied when the command fails.
    fn execute<F>(&mut self, command: F) -> Result<Vec<Self::Event>, Self::Error>
    where
        F: FnOnce(&Self) -> Result<Vec<Self::Event>, Self::Error>,
    {
        let events = command(self)?;
        self.apply_events(events.iter().cloned());
        Ok(events)
    }
}
