use std::sync::{Arc, Mutex};

use crate::{ObjId, Placeholder, Value};

#[test]
fn fixups_fire_once_with_the_resolved_value() {
  let placeholder = Placeholder::shared(ObjId::from_raw(7));
  let seen = Arc::new(Mutex::new(Vec::new()));
  for _ in 0..3 {
    let sink = seen.clone();
    placeholder.on_resolve(Box::new(move |value| sink.lock().expect("sink").push(value)));
  }
  assert_eq!(placeholder.pending_fixups(), 3);

  placeholder.resolve(&Value::Int(11));
  assert_eq!(placeholder.pending_fixups(), 0);
  let seen = seen.lock().expect("sink");
  assert_eq!(seen.len(), 3);
  assert!(seen.iter().all(|value| *value == Value::Int(11)));
}

#[test]
fn resolve_without_fixups_is_a_no_op() {
  let placeholder = Placeholder::new(ObjId::from_raw(9));
  placeholder.resolve(&Value::Null);
  assert_eq!(placeholder.pending_fixups(), 0);
}
