//! Change events and the listener registry.

use std::fmt;
use std::rc::Rc;

use crate::entity::Entity;

/// A membership change in a [`Cache`](super::Cache).
///
/// `Added` fires when an entity's count goes from 0 to 1, `Removed` when it
/// goes from 1 to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
  Added(Entity),
  Removed(Entity),
}

impl Change {
  pub fn entity(&self) -> &Entity {
    match self {
      Change::Added(entity) | Change::Removed(entity) => entity,
    }
  }
}

pub type Listener = Rc<dyn Fn(&Change)>;

/// Token returned by `add_change_listener`; removal matches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub(crate) struct Listeners {
  next: u64,
  entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
  pub(crate) fn add(&mut self, listener: Listener) -> ListenerId {
    let id = ListenerId(self.next);
    self.next += 1;
    self.entries.push((id, listener));
    id
  }

  pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
    match self.entries.iter().position(|(entry, _)| *entry == id) {
      Some(index) => {
        self.entries.remove(index);
        true
      }
      None => false,
    }
  }

  /// Listeners in registration order, detached from the registry so they can
  /// be invoked while the registry is mutated.
  pub(crate) fn snapshot(&self) -> Vec<Listener> {
    self.entries.iter().map(|(_, listener)| Rc::clone(listener)).collect()
  }

  pub(crate) fn len(&self) -> usize {
    self.entries.len()
  }
}

impl fmt::Debug for Listeners {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Listeners").field("len", &self.entries.len()).finish()
  }
}
