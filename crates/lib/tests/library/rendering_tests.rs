use freestyle::{Cache, CacheIds, Computed, join, normalize};
use serde_json::{Value, json};

#[test]
fn override_later_source_wins() {
  let tree = normalize(&[json!({"color": "red"}), json!({"color": "blue"})]);
  assert_eq!(tree, normalize(&[json!({"color": "blue"})]));
}

#[test]
fn same_content_any_order_same_id() {
  let cache = Cache::new(&CacheIds::new());
  let a = cache.create_style(&[json!({"a": 1, "b": 2})]);
  let b = cache.create_style(&[json!({"b": 2, "a": 1})]);
  assert_eq!(a.id(), b.id());
}

#[test]
fn identifier_formats() {
  let ids = CacheIds::new();
  let cache = Cache::new(&ids);
  let style = cache.create_style(&[json!({"color": "red"})]);
  let keyframes = cache.create_keyframes(&[json!({"from": {"color": "red"}})]);

  for (id, prefix) in [(style.id(), 'n'), (keyframes.id(), 'k')] {
    assert_eq!(id.len(), 9);
    assert!(id.starts_with(prefix));
    assert!(id[1..].chars().all(|c| c.is_ascii_hexdigit()));
  }
  assert_eq!(cache.id().as_str(), "f0");
  assert_eq!(Cache::new(&ids).id().as_str(), "f1");
}

#[test]
fn unit_inference() {
  let cache = Cache::new(&CacheIds::new());
  let width = cache.create_style(&[json!({"width": 10})]);
  assert_eq!(width.css(), format!(".{}{{width:10px;}}", width.id()));

  let z = cache.create_style(&[json!({"zIndex": 10})]);
  assert_eq!(z.css(), format!(".{}{{z-index:10;}}", z.id()));
}

#[test]
fn full_style_rendering() {
  let cache = Cache::new(&CacheIds::new());
  let style = cache.create_style(&[json!({
    "backgroundColor": "red",
    "display": ["-webkit-flex", "flex"],
    "&:hover": {"backgroundColor": "blue"},
    "@media (min-width: 500px)": {"padding": 20},
    "@font-face": {"fontFamily": "Foo"}
  })]);
  let sel = style.selector();

  assert_eq!(
    style.css(),
    format!(
      "{sel}{{background-color:red;display:-webkit-flex;display:flex;}}\
       {sel}:hover{{background-color:blue;}}\
       @font-face{{font-family:Foo;}}\
       @media (min-width: 500px){{{sel}{{padding:20px;}}}}"
    )
  );
}

#[test]
fn keyframes_with_supports_block() {
  let cache = Cache::new(&CacheIds::new());
  let k = cache.create_keyframes(&[json!({
    "0%": {"opacity": 0},
    "100%": {"opacity": 1},
    "@supports (transform: none)": {"50%": {"opacity": 0.5}}
  })]);
  let name = k.name();

  let body = |rule: &str| {
    format!(
      "{rule} {name}{{0%{{opacity:0;}}100%{{opacity:1;}}}}@supports (transform: none){{{rule} {name}{{50%{{opacity:0.5;}}}}}}"
    )
  };
  assert_eq!(k.css(), format!("{}{}", body("@-webkit-keyframes"), body("@keyframes")));
}

#[test]
fn memoized_output() {
  let cache = Cache::new(&CacheIds::new());
  cache.register_style(&[json!({"color": "red"})]);
  let first = cache.css();
  let second = cache.css();
  assert_eq!(first, second);

  cache.register_style(&[json!({"color": "blue"})]);
  assert_ne!(cache.css(), first);
}

#[test]
fn join_class_names() {
  assert_eq!(join(&[json!("a"), json!({"b": true, "c": false}), Value::Null, json!("d")]), "a b d");
}

#[test]
fn user_values_cannot_open_blocks() {
  let cache = Cache::new(&CacheIds::new());
  let s = cache.create_style(&[json!({"content": "'}body{color:red'"})]);
  assert_eq!(s.css(), format!(".{}{{content:'\\}}body\\{{color:red';}}", s.id()));
}
