use std::sync::Arc;

use crate::RecordType;

#[test]
fn same_definition_interns_to_the_same_descriptor() {
  let first = RecordType::define("tests.Point", ["x", "y"]);
  let second = RecordType::define("tests.Point", ["x", "y"]);
  assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn redefinition_with_new_fields_replaces_the_entry() {
  let first = RecordType::define("tests.Mutable", ["a"]);
  let second = RecordType::define("tests.Mutable", ["a", "b"]);
  assert!(!Arc::ptr_eq(&first, &second));
  let current = RecordType::lookup("tests.Mutable").expect("interned");
  assert!(Arc::ptr_eq(&second, &current));
}

#[test]
fn field_positions_resolve() {
  let record = RecordType::define("tests.Pair", ["left", "right"]);
  assert_eq!(record.index_of("right"), Some(1));
  assert_eq!(record.index_of("middle"), None);
  assert_eq!(record.fields(), &["left".to_string(), "right".to_string()]);
}
