//! Rendering of canonical style trees to CSS text.
//!
//! Two renderers share the same walk. [`render`] scopes declarations to a
//! selector and supports nested `&` / descendant rules. [`render_nested`] is
//! used for keyframes: nested blocks stay inside the enclosing identifier.
//!
//! At-rule keys (`@media ...`, `@supports ...`) wrap a recursive rendering of
//! their value in the same context. `@font-face` is rendered as its own rule.

use crate::consts::FONT_FACE_RULE;
use crate::types::{StyleTree, StyleValue};

fn is_at_rule(key: &str) -> bool {
  key.starts_with('@')
}

fn push_declarations(out: &mut String, property: &str, value: &StyleValue) {
  for v in value.declarations() {
    out.push_str(property);
    out.push(':');
    out.push_str(v);
    out.push(';');
  }
}

/// At-rule keys with scalar values are statements, e.g. `@import url(a.css);`.
fn push_statement(out: &mut String, rule: &str, value: &StyleValue) {
  for v in value.declarations() {
    out.push_str(rule);
    out.push(' ');
    out.push_str(v);
    out.push(';');
  }
}

fn wrap(out: &mut String, head: &str, body: &str) {
  out.push_str(head);
  out.push('{');
  out.push_str(body);
  out.push('}');
}

/// Render `tree` as rules scoped to `selector`.
///
/// Direct declarations come first in a single `selector{...}` block, omitted
/// when there are none. Nested rules and at-rules follow in key order.
pub fn render(tree: &StyleTree, selector: &str) -> String {
  let mut rules = String::new();
  let mut toplevel = String::new();

  for (key, value) in tree.iter() {
    match value {
      StyleValue::Nested(nested) if is_at_rule(key) => {
        if key == FONT_FACE_RULE {
          toplevel.push_str(&render(nested, key));
        } else {
          wrap(&mut toplevel, key, &render(nested, selector));
        }
      }
      StyleValue::Nested(nested) => {
        let child = if key.contains('&') {
          key.replace('&', selector)
        } else {
          format!("{selector} {key}")
        };
        toplevel.push_str(&render(nested, &child));
      }
      _ if is_at_rule(key) => push_statement(&mut toplevel, key, value),
      _ => push_declarations(&mut rules, key, value),
    }
  }

  finish(selector, rules, toplevel)
}

/// Render `tree` as blocks nested inside `identifier`.
///
/// Used for keyframes, where `identifier` is `@keyframes <name>` and each
/// `from`/`to`/percentage key becomes a block inside it.
pub fn render_nested(tree: &StyleTree, identifier: &str) -> String {
  let mut rules = String::new();
  let mut toplevel = String::new();

  for (key, value) in tree.iter() {
    match value {
      StyleValue::Nested(nested) if is_at_rule(key) => {
        wrap(&mut toplevel, key, &render_nested(nested, identifier));
      }
      StyleValue::Nested(nested) => rules.push_str(&render_nested(nested, key)),
      _ if is_at_rule(key) => push_statement(&mut toplevel, key, value),
      _ => push_declarations(&mut rules, key, value),
    }
  }

  finish(identifier, rules, toplevel)
}

fn finish(head: &str, rules: String, toplevel: String) -> String {
  if rules.is_empty() {
    return toplevel;
  }
  let mut out = String::with_capacity(head.len() + rules.len() + toplevel.len() + 2);
  wrap(&mut out, head, &rules);
  out.push_str(&toplevel);
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::normalize::normalize;
  use serde_json::json;

  fn tree(value: serde_json::Value) -> StyleTree {
    normalize(&[value])
  }

  #[test]
  fn declarations_are_wrapped_once() {
    let css = render(&tree(json!({"color": "red", "width": 10})), ".a");
    assert_eq!(css, ".a{color:red;width:10px;}");
  }

  #[test]
  fn lists_render_one_declaration_per_value() {
    let css = render(&tree(json!({"display": ["-webkit-flex", "flex"]})), ".a");
    assert_eq!(css, ".a{display:-webkit-flex;display:flex;}");
  }

  #[test]
  fn ampersand_is_replaced_by_parent_selector() {
    let css = render(&tree(json!({"&:hover": {"color": "blue"}, "& + &": {"margin": 0}})), ".a");
    assert_eq!(css, ".a + .a{margin:0;}.a:hover{color:blue;}");
  }

  #[test]
  fn plain_nested_key_is_a_descendant() {
    let css = render(&tree(json!({"span": {"color": "blue"}, "color": "red"})), ".a");
    assert_eq!(css, ".a{color:red;}.a span{color:blue;}");
  }

  #[test]
  fn deep_nesting_composes_selectors() {
    let css = render(&tree(json!({"ul": {"li": {"&:first-child": {"margin": 0}}}})), ".a");
    assert_eq!(css, ".a ul li:first-child{margin:0;}");
  }

  #[test]
  fn at_rules_wrap_with_same_selector() {
    let css = render(
      &tree(json!({"color": "red", "@media (min-width: 500px)": {"color": "blue", "&:hover": {"color": "green"}}})),
      ".a",
    );
    assert_eq!(
      css,
      ".a{color:red;}@media (min-width: 500px){.a{color:blue;}.a:hover{color:green;}}"
    );
  }

  #[test]
  fn font_face_is_its_own_rule() {
    let css = render(&tree(json!({"@font-face": {"fontFamily": "Foo", "src": "url(foo.woff)"}})), ".a");
    assert_eq!(css, "@font-face{font-family:Foo;src:url(foo.woff);}");
  }

  #[test]
  fn only_nested_rules_produce_no_empty_block() {
    let css = render(&tree(json!({"&:hover": {"color": "blue"}})), ".a");
    assert_eq!(css, ".a:hover{color:blue;}");
  }

  #[test]
  fn empty_tree_renders_nothing() {
    assert_eq!(render(&StyleTree::new(), ".a"), "");
    assert_eq!(render_nested(&StyleTree::new(), "@keyframes k"), "");
  }

  #[test]
  fn scalar_at_rule_is_a_statement() {
    let css = render(&tree(json!({"@import": "url(a.css)", "color": "red"})), ".a");
    assert_eq!(css, ".a{color:red;}@import url(a.css);");
  }

  #[test]
  fn nested_renderer_keeps_blocks_inside_identifier() {
    let css = render_nested(
      &tree(json!({"from": {"color": "red"}, "to": {"color": "blue"}})),
      "@keyframes k1",
    );
    assert_eq!(css, "@keyframes k1{from{color:red;}to{color:blue;}}");
  }

  #[test]
  fn nested_renderer_passes_at_rules_through() {
    let css = render_nested(
      &tree(json!({"@supports (display: flex)": {"from": {"opacity": 0}}, "to": {"opacity": 1}})),
      "@keyframes k1",
    );
    assert_eq!(
      css,
      "@keyframes k1{to{opacity:1;}}@supports (display: flex){@keyframes k1{from{opacity:0;}}}"
    );
  }
}
