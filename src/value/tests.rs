use std::sync::Arc;

use bytes::Bytes;
use chrono::{NaiveDate, TimeDelta};

use crate::{ListValue, MapValue, ObjId, RecordType, TupleValue, Value};

#[test]
fn primitives_carry_no_identity() {
  for value in [
    Value::Null,
    Value::Bool(true),
    Value::Int(-3),
    Value::Float(2.5),
    Value::Duration(TimeDelta::seconds(90)),
  ] {
    assert!(value.is_primitive(), "{} should be primitive", value.kind_name());
    assert_eq!(value.obj_id(), ObjId::NONE);
  }
}

#[test]
fn shared_arms_report_stable_identities() {
  let list = Value::list(vec![Value::Int(1)]);
  assert!(!list.is_primitive());
  assert!(!list.obj_id().is_none());
  assert_eq!(list.obj_id(), list.clone().obj_id());

  let text = Value::text("hello");
  assert_eq!(text.obj_id(), text.clone().obj_id());
  let other = Value::text("hello");
  assert_ne!(text.obj_id(), other.obj_id(), "distinct allocations have distinct identities");
}

#[test]
fn structural_equality_crosses_allocations() {
  let left = Value::list(vec![Value::Int(1), Value::text("a")]);
  let right = Value::list(vec![Value::Int(1), Value::text("a")]);
  assert_eq!(left, right);
  assert_ne!(left, Value::list(vec![Value::Int(2), Value::text("a")]));
  assert_ne!(left, Value::Int(1));
}

#[test]
fn self_referential_lists_compare_by_identity() {
  let list = ListValue::shared(Vec::new());
  list.push(Value::List(list.clone()));
  let value = Value::List(list);
  assert_eq!(value, value.clone());
}

#[test]
fn map_equality_ignores_insertion_order() {
  let forward = Value::map(vec![(Value::text("a"), Value::Int(1)), (Value::text("b"), Value::Int(2))]);
  let backward = Value::map(vec![(Value::text("b"), Value::Int(2)), (Value::text("a"), Value::Int(1))]);
  assert_eq!(forward, backward);
}

#[test]
fn map_insert_replaces_matching_keys() {
  let map = MapValue::new();
  assert_eq!(map.insert(Value::text("k"), Value::Int(1)), None);
  assert_eq!(map.insert(Value::text("k"), Value::Int(2)), Some(Value::Int(1)));
  assert_eq!(map.len(), 1);
  assert_eq!(map.get(&Value::text("k")), Some(Value::Int(2)));
  assert_eq!(map.remove(&Value::text("k")), Some(Value::Int(2)));
  assert!(map.is_empty());
}

#[test]
fn named_tuples_expose_fields_by_name() {
  let point = RecordType::define("tests.value.Point", ["x", "y"]);
  let tuple = TupleValue::shared_record(point.clone(), vec![Value::Int(1), Value::text("hello")]);
  assert_eq!(tuple.field("y"), Some(Value::text("hello")));
  assert_eq!(tuple.field("z"), None);
  assert!(Arc::ptr_eq(tuple.record_type().expect("record"), &point));
}

#[test]
fn tuples_with_different_records_are_unequal() {
  let a = RecordType::define("tests.value.A", ["x"]);
  let b = RecordType::define("tests.value.B", ["x"]);
  let left = Value::record(a, vec![Value::Int(1)]);
  let right = Value::record(b, vec![Value::Int(1)]);
  assert_ne!(left, right);
}

#[test]
fn dispatch_types_separate_the_builtin_arms() {
  let values = [
    Value::Null,
    Value::Bool(true),
    Value::Int(0),
    Value::Float(0.0),
    Value::Date(NaiveDate::from_ymd_opt(2024, 1, 1).expect("date")),
    Value::bytes(Bytes::from_static(b"x")),
    Value::text("x"),
    Value::tuple(vec![]),
    Value::list(vec![]),
    Value::map(vec![]),
  ];
  for (i, left) in values.iter().enumerate() {
    for (j, right) in values.iter().enumerate() {
      assert_eq!(i == j, left.dispatch_type() == right.dispatch_type());
    }
  }
}
