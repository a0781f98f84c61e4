use crate::builtin::collection::{parse_indices, scatter, split_elements};
use crate::engine_config::DEFAULT_INLINE_LIMIT;
use crate::{HeaderValue, Value};

#[test]
fn primitives_and_short_strings_stay_inline() {
  let elements = vec![Value::Int(1), Value::text("short"), Value::bytes(vec![1, 2, 3]), Value::Bool(true)];
  let split = split_elements(&elements, DEFAULT_INLINE_LIMIT);
  assert!(split.children.is_empty());
  assert!(split.indices.is_empty());
  assert_eq!(split.residual.len(), 4);
  assert_eq!(split.residual[1], HeaderValue::Str("short".into()));
}

#[test]
fn long_strings_and_containers_propagate() {
  let long_text = "x".repeat(DEFAULT_INLINE_LIMIT);
  let elements = vec![Value::Int(7), Value::text(long_text.as_str()), Value::list(vec![])];
  let split = split_elements(&elements, DEFAULT_INLINE_LIMIT);
  assert_eq!(split.indices, vec![1, 2]);
  assert_eq!(split.children.len(), 2);
  assert_eq!(split.residual[0], HeaderValue::Int(7));
  assert_eq!(split.residual[1], HeaderValue::Null);
  assert_eq!(split.residual[2], HeaderValue::Null);
}

#[test]
fn the_inline_boundary_is_exclusive() {
  let at_limit = "y".repeat(DEFAULT_INLINE_LIMIT);
  let under_limit = "y".repeat(DEFAULT_INLINE_LIMIT - 1);
  let split = split_elements(&[Value::text(at_limit.as_str()), Value::text(under_limit.as_str())], DEFAULT_INLINE_LIMIT);
  assert_eq!(split.indices, vec![0]);
}

#[test]
fn scatter_restores_propagated_slots() {
  let elements = vec![Value::Int(1), Value::list(vec![Value::Int(2)]), Value::text("tail")];
  let split = split_elements(&elements, DEFAULT_INLINE_LIMIT);
  let (residual_header, indices_header) = split.tail_elements();

  let residual = residual_header.as_seq().expect("residual");
  let indices = parse_indices(&indices_header).expect("indices");
  let scattered = scatter(residual, &indices, &split.children).expect("scatter");
  assert_eq!(scattered.items, elements);
  assert!(scattered.placeholders.is_empty());
}

#[test]
fn scatter_rejects_mismatched_child_counts() {
  let residual = [HeaderValue::Null];
  let error = scatter(&residual, &[0], &[]).expect_err("mismatch");
  assert!(matches!(error, crate::CodecError::MalformedHeader(_)));
}

#[test]
fn scatter_rejects_out_of_range_indices() {
  let residual = [HeaderValue::Null];
  let error = scatter(&residual, &[3], &[Value::Int(1)]).expect_err("out of range");
  assert!(matches!(error, crate::CodecError::MalformedHeader(_)));
}
