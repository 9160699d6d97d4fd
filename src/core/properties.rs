//! Observable property store backing field interception.
//!
//! Instead of rewriting property descriptors at runtime, hosts keep an
//! explicit store: an insertion-ordered map from field name to a JSON value.
//! A slot is either *plain* (ordinary storage) or *watched* (writes notify
//! subscribers, which is what drives automatic re-render). Only fields
//! explicitly registered participate; everything else stays plain.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// How a widget exposes a field in its initial snapshot.
///
/// `Plain` fields are data-valued and eligible for interception. `Computed`
/// fields are derived (the accessor-backed case) and are skipped silently by
/// registration; writes to them never notify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FieldKind {
    #[default]
    Plain,
    Computed,
}

#[derive(Debug, Clone)]
struct PropertySlot {
    value: Value,
    kind: FieldKind,
    watched: bool,
}

type ChangeSubscriber = Box<dyn FnMut(&str, &Value)>;

/// Insertion-ordered field store with opt-in change notification.
#[derive(Default)]
pub struct PropertyStore {
    slots: IndexMap<String, PropertySlot>,
    subscribers: Vec<ChangeSubscriber>,
}

impl PropertyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one field from the host's snapshot. Later seeds of the same
    /// name overwrite the value but never demote a watched slot.
    pub fn seed(&mut self, name: impl Into<String>, value: Value, kind: FieldKind) {
        let name = name.into();
        match self.slots.get_mut(&name) {
            Some(slot) => {
                slot.value = value;
                slot.kind = kind;
            }
            None => {
                self.slots.insert(
                    name,
                    PropertySlot {
                        value,
                        kind,
                        watched: false,
                    },
                );
            }
        }
    }

    /// Marks a seeded field as watched so writes notify subscribers.
    ///
    /// Returns `true` when the field is watched after the call. Registration
    /// is idempotent, and names that are absent or computed are skipped
    /// silently, keeping their plain behavior.
    pub fn register(&mut self, name: &str) -> bool {
        match self.slots.get_mut(name) {
            Some(slot) if slot.kind == FieldKind::Plain => {
                if !slot.watched {
                    slot.watched = true;
                    trace!(field = name, "field registered for change tracking");
                }
                true
            }
            Some(_) => {
                trace!(field = name, "skipping computed field");
                false
            }
            None => {
                trace!(field = name, "skipping unknown field");
                false
            }
        }
    }

    /// Stores a value. Returns `true` when the write hit a watched slot, in
    /// which case subscribers were notified after the store.
    ///
    /// Writes to unknown names create a plain slot, mirroring assignment of
    /// a fresh property onto a host object.
    pub fn write(&mut self, name: &str, value: Value) -> bool {
        let watched = match self.slots.get_mut(name) {
            Some(slot) => {
                slot.value = value;
                slot.watched
            }
            None => {
                self.slots.insert(
                    name.to_owned(),
                    PropertySlot {
                        value,
                        kind: FieldKind::Plain,
                        watched: false,
                    },
                );
                false
            }
        };

        if watched {
            // Split borrow: slot read is done before subscribers run.
            if let Some(slot) = self.slots.get(name) {
                let value = slot.value.clone();
                for subscriber in &mut self.subscribers {
                    subscriber(name, &value);
                }
            }
        }
        watched
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slots.get(name).map(|slot| &slot.value)
    }

    #[must_use]
    pub fn is_watched(&self, name: &str) -> bool {
        self.slots.get(name).is_some_and(|slot| slot.watched)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Attaches an on-change callback invoked after every watched write.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&str, &Value) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }
}

impl std::fmt::Debug for PropertyStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("PropertyStore")
            .field("slots", &self.slots)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
