//! Reference-counted, composable cache of computed entities.
//!
//! A [`Cache`] counts how many times each entity (by id) has been added. The
//! entity is stored while its count is above zero, and listeners hear about
//! the 0 → 1 and 1 → 0 transitions only.
//!
//! # Composition
//!
//! A cache can [`attach`](Cache::attach) child caches. The parent subscribes to
//! the child's changes and mirrors them into its own counts, after pulling in
//! whatever the child already holds. A child may be attached to several
//! parents, and to the same parent several times; attachments are counted
//! the same way entities are. Children are matched by handle identity, not by
//! [`CacheId`], so caches from separate [`CacheIds`] generators never clash.
//!
//! A parent dropped without detaching stops receiving changes, and its
//! forwarding listener is removed from the child on the child's next change.
//!
//! Events are delivered synchronously, so one `add` can cascade through a
//! chain of parents. The attach graph must stay acyclic.
//!
//! # Failure policy
//!
//! No operation fails. Removing or detaching something that is not present
//! is a no-op.
//!
//! # Example
//!
//! ```
//! use freestyle::cache::{Cache, CacheIds};
//! use serde_json::json;
//!
//! let ids = CacheIds::new();
//! let root = Cache::new(&ids);
//! let child = Cache::new(&ids);
//! root.attach(&child);
//!
//! let button = child.register_style(&[json!({"color": "red"})]);
//! assert!(root.has(&button));
//! assert_eq!(root.css(), ".n0b5f1a33{color:red;}");
//! ```

mod events;
mod ids;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::entity::{Computed, Entity, Keyframes, Style};
use crate::normalize::normalize;

pub use events::{Change, Listener, ListenerId};
pub use ids::{CacheId, CacheIds};

/// A live attachment of a child cache.
struct Attachment {
  cache: Cache,
  count: usize,
  listener: ListenerId,
}

struct Inner {
  id: CacheId,
  /// Materialized entities in first-add order.
  entries: IndexMap<String, Entity>,
  counts: HashMap<String, usize>,
  /// Attached children in attach order.
  children: Vec<Attachment>,
  listeners: events::Listeners,
  css: String,
  dirty: bool,
}

/// Handle to a cache. Clones refer to the same cache.
#[derive(Clone)]
pub struct Cache {
  inner: Rc<RefCell<Inner>>,
}

impl Cache {
  pub fn new(ids: &CacheIds) -> Self {
    let id = ids.next_id();
    debug!(cache = %id, "created cache");
    Self {
      inner: Rc::new(RefCell::new(Inner {
        id,
        entries: IndexMap::new(),
        counts: HashMap::new(),
        children: Vec::new(),
        listeners: events::Listeners::default(),
        css: String::new(),
        dirty: false,
      })),
    }
  }

  pub fn id(&self) -> CacheId {
    self.inner.borrow().id.clone()
  }

  fn same(&self, other: &Cache) -> bool {
    Rc::ptr_eq(&self.inner, &other.inner)
  }

  /// Add one reference to `entity` and hand it back.
  pub fn add<E>(&self, entity: E) -> E
  where
    E: Into<Entity> + Clone,
  {
    self.add_entity(entity.clone().into());
    entity
  }

  fn add_entity(&self, entity: Entity) {
    let added = {
      let mut guard = self.inner.borrow_mut();
      let inner = &mut *guard;
      let count = inner.counts.entry(entity.id().to_string()).or_insert(0);
      *count += 1;
      trace!(cache = %inner.id, id = entity.id(), count = *count, "add");

      if *count == 1 {
        inner.entries.insert(entity.id().to_string(), entity.clone());
        inner.dirty = true;
        true
      } else {
        let existing = inner.entries.get(entity.id()).filter(|e| e.tree() != entity.tree());
        if let Some(existing) = existing {
          warn!(
            cache = %inner.id,
            id = entity.id(),
            kept = existing.css(),
            discarded = entity.css(),
            "content hash collision, keeping the first entity"
          );
        }
        false
      }
    };

    if added {
      self.emit(&Change::Added(entity));
    }
  }

  /// Drop one reference to `entity`. No-op when it is not present.
  pub fn remove(&self, entity: &impl Computed) {
    let removed = {
      let mut guard = self.inner.borrow_mut();
      let inner = &mut *guard;
      let id = entity.id();
      let count = inner.counts.get(id).copied().unwrap_or(0);
      if count == 0 {
        return;
      }

      trace!(cache = %inner.id, id, count = count - 1, "remove");
      if count == 1 {
        inner.counts.remove(id);
        inner.dirty = true;
        inner.entries.shift_remove(id)
      } else {
        inner.counts.insert(id.to_string(), count - 1);
        None
      }
    };

    if let Some(entity) = removed {
      self.emit(&Change::Removed(entity));
    }
  }

  pub fn count(&self, entity: &impl Computed) -> usize {
    self.inner.borrow().counts.get(entity.id()).copied().unwrap_or(0)
  }

  pub fn has(&self, entity: &impl Computed) -> bool {
    self.count(entity) > 0
  }

  /// Number of materialized entities.
  pub fn len(&self) -> usize {
    self.inner.borrow().entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.borrow().entries.is_empty()
  }

  /// Materialized entities in first-add order.
  pub fn values(&self) -> Vec<Entity> {
    self.inner.borrow().entries.values().cloned().collect()
  }

  /// Attach `child`, mirroring its current and future contents into this cache.
  pub fn attach(&self, child: &Cache) {
    let child_id = child.id();
    {
      let mut guard = self.inner.borrow_mut();
      let inner = &mut *guard;
      if let Some(attachment) = inner.children.iter_mut().find(|a| a.cache.same(child)) {
        attachment.count += 1;
        debug!(cache = %inner.id, child = %child_id, count = attachment.count, "re-attached child cache");
        return;
      }
    }

    let parent = Rc::downgrade(&self.inner);
    let source = Rc::downgrade(&child.inner);
    let token: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
    let listener = child.add_change_listener({
      let token = Rc::clone(&token);
      move |change: &Change| {
        if forward(&parent, change) {
          return;
        }
        if let (Some(inner), Some(id)) = (source.upgrade(), token.get()) {
          let child = Cache { inner };
          debug!(cache = %child.id(), "dropping listener of a released parent");
          child.remove_change_listener(id);
        }
      }
    });
    token.set(Some(listener));

    {
      let mut inner = self.inner.borrow_mut();
      debug!(cache = %inner.id, child = %child_id, "attached child cache");
      inner.children.push(Attachment {
        cache: child.clone(),
        count: 1,
        listener,
      });
    }

    for entity in child.values() {
      self.add_entity(entity);
    }
  }

  /// Undo one [`attach`](Self::attach). The last detach unsubscribes and
  /// removes whatever the child holds at that moment.
  pub fn detach(&self, child: &Cache) {
    let child_id = child.id();
    let detached = {
      let mut guard = self.inner.borrow_mut();
      let inner = &mut *guard;
      let Some(index) = inner.children.iter().position(|a| a.cache.same(child)) else {
        return;
      };
      let attachment = &mut inner.children[index];
      attachment.count -= 1;
      if attachment.count > 0 {
        debug!(cache = %inner.id, child = %child_id, count = attachment.count, "detached child cache once");
        return;
      }
      debug!(cache = %inner.id, child = %child_id, "detached child cache");
      inner.children.remove(index)
    };

    detached.cache.remove_change_listener(detached.listener);
    for entity in detached.cache.values() {
      self.remove(&entity);
    }
  }

  /// How many times `child` is currently attached.
  pub fn attach_count(&self, child: &Cache) -> usize {
    self
      .inner
      .borrow()
      .children
      .iter()
      .find(|a| a.cache.same(child))
      .map_or(0, |a| a.count)
  }

  /// Attached child ids in attach order.
  pub fn children(&self) -> Vec<CacheId> {
    self.inner.borrow().children.iter().map(|a| a.cache.id()).collect()
  }

  /// The concatenated CSS of every materialized entity.
  ///
  /// Rebuilt only after an entity was added or removed since the last call.
  pub fn css(&self) -> String {
    let mut guard = self.inner.borrow_mut();
    let inner = &mut *guard;
    if inner.dirty {
      inner.css = inner.entries.values().map(Computed::css).collect();
      inner.dirty = false;
      trace!(cache = %inner.id, len = inner.css.len(), "rebuilt css");
    }
    inner.css.clone()
  }

  /// Drive every entity's count to zero.
  pub fn empty(&self) {
    debug!(cache = %self.inner.borrow().id, entries = self.len(), "emptying cache");
    for entity in self.values() {
      for _ in 0..self.count(&entity) {
        self.remove(&entity);
      }
    }
  }

  pub fn create_style(&self, sources: &[Value]) -> Style {
    Style::new(normalize(sources))
  }

  pub fn register_style(&self, sources: &[Value]) -> Style {
    self.add(self.create_style(sources))
  }

  pub fn create_keyframes(&self, sources: &[Value]) -> Keyframes {
    Keyframes::new(normalize(sources))
  }

  pub fn register_keyframes(&self, sources: &[Value]) -> Keyframes {
    self.add(self.create_keyframes(sources))
  }

  pub fn add_change_listener(&self, listener: impl Fn(&Change) + 'static) -> ListenerId {
    let mut inner = self.inner.borrow_mut();
    let id = inner.listeners.add(Rc::new(listener));
    trace!(cache = %inner.id, listeners = inner.listeners.len(), "added change listener");
    id
  }

  /// Returns whether a listener was registered under `id`.
  pub fn remove_change_listener(&self, id: ListenerId) -> bool {
    self.inner.borrow_mut().listeners.remove(id)
  }

  /// Invoke listeners in registration order, outside of any borrow so they may
  /// call back into this cache.
  fn emit(&self, change: &Change) {
    let listeners = self.inner.borrow().listeners.snapshot();
    for listener in listeners {
      listener(change);
    }
  }
}

/// A child's change, replayed into the parent. Returns `false` once the
/// parent is gone.
fn forward(parent: &Weak<RefCell<Inner>>, change: &Change) -> bool {
  let Some(inner) = parent.upgrade() else {
    return false;
  };
  let parent = Cache { inner };
  match change {
    Change::Added(entity) => parent.add_entity(entity.clone()),
    Change::Removed(entity) => parent.remove(entity),
  }
  true
}

impl fmt::Debug for Cache {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let inner = self.inner.borrow();
    f.debug_struct("Cache")
      .field("id", &inner.id)
      .field("entries", &inner.entries.len())
      .field("children", &inner.children.len())
      .field("listeners", &inner.listeners)
      .finish()
  }
}
