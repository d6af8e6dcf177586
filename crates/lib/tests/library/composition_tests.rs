use freestyle::{Cache, CacheIds, Change, Computed};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

use super::common::{cache_tree, color_style};

#[test]
fn child_registration_reaches_parent() {
  let (parent, children) = cache_tree(1);
  let child = &children[0];

  let s = color_style(child, "red");
  parent.attach(child);
  assert!(parent.has(&s));

  parent.detach(child);
  assert!(!parent.has(&s));
  assert!(child.has(&s));
}

#[test]
fn detach_is_independent_of_later_child_state() {
  let (parent, children) = cache_tree(1);
  let child = &children[0];
  let s = color_style(child, "red");

  parent.attach(child);
  parent.detach(child);
  child.empty();
  child.add(s.clone());

  assert!(!parent.has(&s));
}

#[test]
fn entity_shared_by_two_children_is_counted_per_child() {
  let (parent, children) = cache_tree(2);
  let a = color_style(&children[0], "red");
  let b = color_style(&children[1], "red");
  assert_eq!(a, b);

  parent.attach(&children[0]);
  parent.attach(&children[1]);
  assert_eq!(parent.count(&a), 2);
  assert_eq!(parent.len(), 1);

  parent.detach(&children[0]);
  assert!(parent.has(&a));

  children[1].remove(&b);
  assert!(!parent.has(&a));
}

#[test]
fn child_attached_to_two_parents() {
  let ids = CacheIds::new();
  let left = Cache::new(&ids);
  let right = Cache::new(&ids);
  let child = Cache::new(&ids);

  left.attach(&child);
  right.attach(&child);

  let s = color_style(&child, "red");
  assert!(left.has(&s));
  assert!(right.has(&s));

  left.detach(&child);
  assert!(!left.has(&s));
  assert!(right.has(&s));

  child.remove(&s);
  assert!(!right.has(&s));
}

#[test]
fn changes_cascade_through_grandparents() {
  let ids = CacheIds::new();
  let root = Cache::new(&ids);
  let middle = Cache::new(&ids);
  let leaf = Cache::new(&ids);

  root.attach(&middle);
  middle.attach(&leaf);

  let s = color_style(&leaf, "red");
  assert!(middle.has(&s));
  assert!(root.has(&s));
  assert_eq!(root.css(), s.css());

  leaf.remove(&s);
  assert!(!root.has(&s));
  assert_eq!(root.css(), "");
}

#[test]
fn diamond_counts_both_paths() {
  let ids = CacheIds::new();
  let root = Cache::new(&ids);
  let left = Cache::new(&ids);
  let right = Cache::new(&ids);
  let shared = Cache::new(&ids);

  root.attach(&left);
  root.attach(&right);
  left.attach(&shared);
  right.attach(&shared);

  let s = color_style(&shared, "red");
  assert_eq!(root.count(&s), 2);

  left.detach(&shared);
  assert_eq!(root.count(&s), 1);

  right.detach(&shared);
  assert!(!root.has(&s));
}

#[test]
fn detach_only_removes_what_child_still_holds() {
  let (parent, children) = cache_tree(1);
  let child = &children[0];
  parent.attach(child);

  let kept = color_style(child, "red");
  let dropped = color_style(child, "blue");
  child.remove(&dropped);

  parent.add(dropped.clone());
  parent.detach(child);

  assert!(!parent.has(&kept));
  assert_eq!(parent.count(&dropped), 1);
}

#[test]
fn parent_emits_for_forwarded_changes() {
  let (parent, children) = cache_tree(1);
  let child = &children[0];
  let events = Rc::new(RefCell::new(Vec::new()));
  {
    let events = Rc::clone(&events);
    parent.add_change_listener(move |change| {
      events.borrow_mut().push(matches!(change, Change::Added(_)));
    });
  }

  color_style(child, "red");
  parent.attach(child);
  let s = color_style(child, "blue");
  child.remove(&s);
  parent.detach(child);

  assert_eq!(*events.borrow(), vec![true, true, false, false]);
}

#[test]
fn empty_on_child_clears_parent_mirror() {
  let (parent, children) = cache_tree(1);
  let child = &children[0];
  parent.attach(child);

  let s = color_style(child, "red");
  child.add(s.clone());
  child.add(s.clone());
  child.register_keyframes(&[json!({"to": {"opacity": 1}})]);

  child.empty();
  assert!(child.is_empty());
  assert!(parent.is_empty());
  assert_eq!(parent.attach_count(child), 1);
}

#[test]
fn parent_css_follows_child_order() {
  let (parent, children) = cache_tree(2);
  let a = color_style(&children[0], "red");
  let b = color_style(&children[1], "blue");

  parent.attach(&children[1]);
  parent.attach(&children[0]);

  assert_eq!(parent.css(), format!("{}{}", b.css(), a.css()));
  let ids: Vec<String> = parent.children().iter().map(ToString::to_string).collect();
  assert_eq!(ids, vec![children[1].id().to_string(), children[0].id().to_string()]);
}
