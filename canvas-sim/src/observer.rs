// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Synchronous notification channels
//!
//! Collections report structural changes (entity added or removed) and
//! per-entity changes (a body moved) through an [`Observers`] registry.
//! Observers are called synchronously, in subscription order, at the end of
//! the mutation that caused the event.
//!
//! Observers only ever receive the event value, never a handle to the
//! collection, so an observer cannot mutate the collection that is
//! notifying it.

/// Change notification emitted by [`BodySet`](crate::BodySet) and
/// [`FigureGallery`](crate::figures::FigureGallery)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetEvent {
    /// An entity was appended at `index`
    Added {
        /// Index of the new entity
        index: usize,
    },
    /// The entity at `index` was removed; later entities shifted down by one
    Removed {
        /// Index the entity had before removal
        index: usize,
    },
    /// The entity at `index` changed its renderable state
    Changed {
        /// Index of the changed entity
        index: usize,
    },
}

impl SetEvent {
    /// Index the event refers to
    pub fn index(&self) -> usize {
        match *self {
            SetEvent::Added { index } | SetEvent::Removed { index } | SetEvent::Changed { index } => index,
        }
    }
}

/// Receiver of events of type `E`
///
/// Implemented for every `FnMut(&E) + Send` closure, so most callers just
/// pass a closure to [`Observers::subscribe`].
pub trait Observer<E>: Send {
    /// Handle one event
    fn notify(&mut self, event: &E);
}

impl<E, F> Observer<E> for F
where
    F: FnMut(&E) + Send,
{
    fn notify(&mut self, event: &E) {
        self(event)
    }
}

/// Handle returned by [`Observers::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Get the raw id value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Registry of observers for one event type
pub struct Observers<E> {
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn Observer<E>>)>,
}

impl<E> Observers<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Observers {
            next_id: 0,
            observers: Vec::new(),
        }
    }

    /// Register an observer; it receives every event from now on
    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: Observer<E> + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer
    ///
    /// Returns `false` if the id was never issued or was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.observers.iter().position(|(existing, _)| *existing == id) {
            Some(position) => {
                self.observers.remove(position);
                true
            }
            None => false,
        }
    }

    /// Deliver `event` to every observer in subscription order
    pub fn notify(&mut self, event: &E) {
        for (_, observer) in &mut self.observers {
            observer.notify(event);
        }
    }

    /// Get the number of registered observers
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if no observers are registered
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.observers.len())
            .finish()
    }
}
