use core::any::Any;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{NaiveDate, TimeDelta, Utc};

use crate::builtin;
use crate::{
  default_object_codec, default_registry, deserialize, deserialize_with, serialize, serialize_with, CodecError,
  CodecId, Complex64, DeserializeContext, EngineConfig, HeaderNode, HeaderValue, ListValue, NativeFn, NumberKind,
  ObjId, OpaqueObject, RecordType, SerializeContext, SerializedGraph, Value,
};

fn round_trip(value: &Value) -> Value {
  let (graph, buffers) = serialize(value).expect("serialize");
  deserialize(&graph, &buffers).expect("deserialize")
}

#[test]
fn primitives_round_trip() {
  let values = [
    Value::Null,
    Value::Bool(true),
    Value::Int(-42),
    Value::Float(6.5),
    Value::Complex(Complex64::new(1.0, -2.0)),
    Value::Date(NaiveDate::from_ymd_opt(2024, 5, 17).expect("date")),
    Value::DateTime(chrono::DateTime::<Utc>::from_timestamp(1_700_000_000, 250).expect("timestamp")),
    Value::Duration(TimeDelta::milliseconds(-1500)),
    Value::NumberKind(NumberKind::Complex128),
  ];
  for value in values {
    assert_eq!(round_trip(&value), value, "{} did not round-trip", value.kind_name());
  }
}

#[test]
fn integers_serialize_into_a_single_final_node() {
  let (graph, buffers) = serialize(&Value::Int(5)).expect("serialize");
  assert!(buffers.is_empty());
  let root = graph.root();
  assert_eq!(root.codec_id(), builtin::PRIMITIVE_ID);
  assert_eq!(root.obj_id(), ObjId::NONE);
  assert_eq!(root.sub_count(), 0);
  assert!(root.is_final());
  assert_eq!(root.tail(), &[HeaderValue::Int(5)][..]);
  assert!(graph.meta().is_empty());
  assert_eq!(deserialize(&graph, &buffers).expect("deserialize"), Value::Int(5));
}

#[test]
fn native_functions_round_trip_through_the_table() {
  fn first(args: &[Value]) -> Result<Value, CodecError> {
    Ok(args.first().cloned().unwrap_or(Value::Null))
  }
  let function = NativeFn::register("tests.engine.first", first);
  assert_eq!(round_trip(&Value::NativeFn(function)), Value::NativeFn(function));
}

#[test]
fn unregistered_native_functions_fail_decode() {
  let graph = SerializedGraph::new(HeaderNode::leaf(
    builtin::PRIMITIVE_ID,
    ObjId::NONE,
    0,
    true,
    vec![HeaderValue::NativeFn("tests.engine.absent".into())],
  ));
  let error = deserialize(&graph, &[]).expect_err("unknown function");
  assert_eq!(error, CodecError::UnknownNativeFn("tests.engine.absent".into()));
}

#[test]
fn text_travels_as_a_single_utf8_buffer() {
  let text = "abc".repeat(600);
  let (graph, buffers) = serialize(&Value::text(text.as_str())).expect("serialize");
  assert_eq!(buffers.len(), 1);
  assert_eq!(&buffers[0][..3], b"abc");
  assert_eq!(graph.root().codec_id(), builtin::TEXT_ID);
  assert_eq!(deserialize(&graph, &buffers).expect("deserialize"), Value::text(text.as_str()));
}

#[test]
fn large_byte_payloads_pass_through_without_copying() {
  let payload = Bytes::from(vec![0_u8; 64 * 1024 * 1024]);
  let value = Value::Bytes(payload.clone());

  let (graph, buffers) = serialize(&value).expect("serialize");
  assert_eq!(buffers.len(), 1);
  assert_eq!(buffers[0].as_ptr(), payload.as_ptr(), "buffer must be a view of the input");
  let header = serde_json::to_vec(&graph).expect("header encodes");
  assert!(header.len() < 1024, "header blew up to {} bytes", header.len());

  let decoded = deserialize(&graph, &buffers).expect("deserialize");
  let Value::Bytes(decoded) = decoded else { panic!("expected bytes") };
  assert_eq!(decoded.as_ptr(), payload.as_ptr(), "decode must borrow the receive buffer");
}

#[test]
fn small_maps_serialize_entirely_into_the_header() {
  let value = Value::map(vec![(Value::text("k"), Value::text("v"))]);
  let (graph, buffers) = serialize(&value).expect("serialize");
  assert!(buffers.is_empty());
  let root = graph.root();
  assert_eq!(root.codec_id(), builtin::MAP_ID);
  assert_eq!(root.sub_count(), 0);
  assert_eq!(root.tail()[0], HeaderValue::Seq(vec![HeaderValue::Str("k".into())]));
  assert_eq!(root.tail()[2], HeaderValue::Seq(vec![HeaderValue::Str("v".into())]));
  assert_eq!(deserialize(&graph, &buffers).expect("deserialize"), value);
}

#[test]
fn maps_with_container_keys_round_trip() {
  let key = Value::tuple(vec![Value::Int(1), Value::Int(2)]);
  let value = Value::map(vec![(key, Value::list(vec![Value::text("payload")])), (Value::Int(9), Value::Null)]);
  assert_eq!(round_trip(&value), value);
}

#[test]
fn shared_references_serialize_once_and_rejoin() {
  let shared = Value::list(vec![Value::Int(1), Value::Int(2)]);
  let outer = Value::list(vec![shared.clone(), shared.clone()]);

  let (graph, buffers) = serialize(&outer).expect("serialize");
  let children = graph.root().children();
  assert_eq!(children.len(), 2);
  assert_eq!(children[0].codec_id(), builtin::LIST_ID);
  assert_eq!(children[1].codec_id(), builtin::PLACEHOLDER_ID);

  let decoded = deserialize(&graph, &buffers).expect("deserialize");
  let Value::List(list) = &decoded else { panic!("expected a list") };
  let (Some(Value::List(first)), Some(Value::List(second))) = (list.get(0), list.get(1)) else {
    panic!("expected list elements");
  };
  assert!(Arc::ptr_eq(&first, &second), "both slots must resolve to one allocation");
  assert_eq!(Value::List(first), shared);
}

#[test]
fn self_referential_lists_round_trip() {
  let cycle = ListValue::shared(Vec::new());
  cycle.push(Value::List(cycle.clone()));

  let (graph, buffers) = serialize(&Value::List(cycle)).expect("serialize");
  let root = graph.root();
  assert_eq!(root.sub_count(), 1);
  assert_eq!(root.children()[0].codec_id(), builtin::PLACEHOLDER_ID);

  let decoded = deserialize(&graph, &buffers).expect("deserialize");
  let Value::List(list) = decoded else { panic!("expected a list") };
  assert_eq!(list.len(), 1);
  let Some(Value::List(inner)) = list.get(0) else { panic!("expected the cycle back") };
  assert!(Arc::ptr_eq(&list, &inner), "element must be the list itself");
}

#[test]
fn cycles_through_tuples_and_maps_resolve() {
  let list = ListValue::shared(Vec::new());
  let tuple = Value::tuple(vec![Value::Int(7), Value::List(list.clone())]);
  list.push(tuple.clone());
  let map = Value::map(vec![(Value::text("root"), tuple.clone())]);

  let decoded = round_trip(&map);
  let Value::Map(decoded_map) = decoded else { panic!("expected a map") };
  let Some(Value::Tuple(decoded_tuple)) = decoded_map.get(&Value::text("root")) else {
    panic!("expected the tuple back");
  };
  let Some(Value::List(decoded_list)) = decoded_tuple.get(1) else { panic!("expected the list back") };
  let Some(Value::Tuple(inner_tuple)) = decoded_list.get(0) else { panic!("expected the inner tuple") };
  assert!(Arc::ptr_eq(&decoded_tuple, &inner_tuple), "cycle must close on one allocation");
}

#[test]
fn named_tuples_reconstruct_through_the_interned_descriptor() {
  let point = RecordType::define("tests.engine.Point", ["x", "y"]);
  let value = Value::record(point.clone(), vec![Value::Int(1), Value::text("hello")]);

  let decoded = round_trip(&value);
  let Value::Tuple(tuple) = &decoded else { panic!("expected a tuple") };
  let record = tuple.record_type().expect("record descriptor");
  assert!(Arc::ptr_eq(record, &point), "descriptor must intern to the same definition");
  assert_eq!(tuple.field("x"), Some(Value::Int(1)));
  assert_eq!(tuple.field("y"), Some(Value::text("hello")));
  assert_eq!(decoded, value);
}

#[derive(Debug, PartialEq)]
struct Blob {
  payload: Vec<u8>,
}

impl OpaqueObject for Blob {
  fn as_any(&self) -> &(dyn Any + Send + Sync) {
    self
  }

  fn opaque_eq(&self, other: &dyn OpaqueObject) -> bool {
    other.as_any().downcast_ref::<Self>().is_some_and(|blob| blob == self)
  }
}

fn register_blob() {
  default_object_codec().register::<Blob, _, _>(
    "tests.engine.blob",
    |blob: &Blob| Ok((Bytes::copy_from_slice(&blob.payload), Vec::new())),
    |prefix, _extras| Ok(Blob { payload: prefix.to_vec() }),
  );
}

#[test]
fn unregistered_user_types_route_through_the_opaque_fallback() {
  register_blob();
  let value = Value::opaque(Blob { payload: vec![1, 2, 3, 4] });

  let (graph, buffers) = serialize(&value).expect("serialize");
  assert_eq!(graph.root().codec_id(), builtin::OPAQUE_ID);
  assert!(graph.root().is_final());
  assert_eq!(buffers.len(), 1);

  let decoded = deserialize(&graph, &buffers).expect("deserialize");
  assert_eq!(decoded, value);
}

#[test]
fn opaque_objects_deduplicate_like_containers() {
  register_blob();
  let shared = Value::opaque(Blob { payload: vec![9, 9] });
  let outer = Value::list(vec![shared.clone(), shared]);

  let (graph, buffers) = serialize(&outer).expect("serialize");
  assert_eq!(graph.root().children()[1].codec_id(), builtin::PLACEHOLDER_ID);
  assert_eq!(buffers.len(), 1, "the blob must be encoded once");

  let decoded = deserialize(&graph, &buffers).expect("deserialize");
  let Value::List(list) = decoded else { panic!("expected a list") };
  let (Some(Value::Opaque(first)), Some(Value::Opaque(second))) = (list.get(0), list.get(1)) else {
    panic!("expected opaque elements");
  };
  assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn short_strings_inline_into_the_header() {
  let elements = (0..1000).map(|i| Value::text(format!("s{i:07x}"))).collect::<Vec<_>>();
  let value = Value::list(elements);
  let (graph, buffers) = serialize(&value).expect("serialize");
  assert!(buffers.is_empty(), "eight-character strings must inline");
  assert_eq!(deserialize(&graph, &buffers).expect("deserialize"), value);
}

#[test]
fn long_strings_propagate_as_buffers() {
  let value = Value::list(vec![Value::text("z".repeat(4096))]);
  let (graph, buffers) = serialize(&value).expect("serialize");
  assert_eq!(buffers.len(), 1);
  assert_eq!(buffers[0].len(), 4096);
  assert_eq!(deserialize(&graph, &buffers).expect("deserialize"), value);
}

#[test]
fn long_shared_strings_deduplicate() {
  let shared = Value::text("w".repeat(2048));
  let value = Value::list(vec![shared.clone(), shared]);
  let (graph, buffers) = serialize(&value).expect("serialize");
  assert_eq!(buffers.len(), 1, "the second occurrence must be a placeholder");
  let decoded = deserialize(&graph, &buffers).expect("deserialize");
  let Value::List(list) = decoded else { panic!("expected a list") };
  assert_eq!(list.get(0), list.get(1));
}

#[test]
fn headers_survive_a_transport_encoding() {
  let value = Value::map(vec![
    (Value::text("name"), Value::text("graphwire")),
    (Value::text("payload"), Value::list(vec![Value::Int(1), Value::bytes(vec![7_u8; 2048])])),
  ]);
  let (graph, buffers) = serialize(&value).expect("serialize");

  let shipped = serde_json::to_string(&graph).expect("encode header");
  let received: SerializedGraph = serde_json::from_str(&shipped).expect("decode header");
  assert_eq!(deserialize(&received, &buffers).expect("deserialize"), value);
}

#[test]
fn caller_supplied_contexts_span_calls() {
  let registry = default_registry();
  let shared = Value::list(vec![Value::Int(5)]);
  let config = EngineConfig::new();

  let mut encode_ctx = SerializeContext::new();
  let (first_graph, first_buffers) =
    serialize_with(&registry, &shared, &mut encode_ctx, &config).expect("first serialize");
  let (second_graph, second_buffers) =
    serialize_with(&registry, &Value::list(vec![shared.clone()]), &mut encode_ctx, &config).expect("second");
  assert_eq!(second_graph.root().children()[0].codec_id(), builtin::PLACEHOLDER_ID);

  let mut decode_ctx = DeserializeContext::new();
  let first = deserialize_with(&registry, &first_graph, &first_buffers, &mut decode_ctx, &config).expect("first");
  let second = deserialize_with(&registry, &second_graph, &second_buffers, &mut decode_ctx, &config).expect("second");
  let (Value::List(first), Value::List(outer)) = (first, second) else { panic!("expected lists") };
  let Some(Value::List(resolved)) = outer.get(0) else { panic!("expected the shared list") };
  assert!(Arc::ptr_eq(&first, &resolved), "second call must resolve against the shared context");
}

#[test]
fn deep_nesting_does_not_recurse_on_the_host_stack() {
  // The engine traverses on heap frames; the large thread stack is only
  // for the value's own drop.
  let handle = std::thread::Builder::new()
    .stack_size(64 * 1024 * 1024)
    .spawn(|| {
      let mut value = Value::list(vec![Value::Int(0)]);
      for _ in 0..20_000 {
        value = Value::list(vec![value]);
      }
      let (graph, buffers) = serialize(&value).expect("serialize");
      let decoded = deserialize(&graph, &buffers).expect("deserialize");

      let mut depth = 0_usize;
      let mut cursor = decoded;
      while let Value::List(list) = cursor {
        depth += 1;
        let Some(next) = list.get(0) else { break };
        cursor = next;
      }
      assert_eq!(depth, 20_001);
    })
    .expect("spawn");
  handle.join().expect("join");
}

#[test]
fn the_depth_bound_is_enforced_in_both_directions() {
  let config = EngineConfig::new().with_max_depth(4);
  let registry = default_registry();
  let mut value = Value::Int(1);
  for _ in 0..10 {
    value = Value::list(vec![value]);
  }

  let mut ctx = SerializeContext::new();
  let error = serialize_with(&registry, &value, &mut ctx, &config).expect_err("encode depth");
  assert_eq!(error, CodecError::DepthExceeded(4));

  let (graph, buffers) = serialize(&value).expect("serialize");
  let mut decode_ctx = DeserializeContext::new();
  let error =
    deserialize_with(&registry, &graph, &buffers, &mut decode_ctx, &config).expect_err("decode depth");
  assert_eq!(error, CodecError::DepthExceeded(4));
}

#[test]
fn unknown_codec_ids_fail_decode() {
  let graph = SerializedGraph::new(HeaderNode::leaf(
    CodecId::try_from(999).expect("id"),
    ObjId::NONE,
    0,
    true,
    Vec::new(),
  ));
  let error = deserialize(&graph, &[]).expect_err("unknown codec");
  assert_eq!(error, CodecError::UnknownCodecId(999));
}

#[test]
fn missing_buffers_fail_decode() {
  let (graph, buffers) = serialize(&Value::bytes(vec![1_u8; 2048])).expect("serialize");
  assert_eq!(buffers.len(), 1);
  let error = deserialize(&graph, &[]).expect_err("missing buffer");
  assert_eq!(error, CodecError::BufferCountMismatch { expected: 1, available: 0 });
}

#[test]
fn leftover_buffers_fail_decode() {
  let (graph, mut buffers) = serialize(&Value::Int(3)).expect("serialize");
  buffers.push(Bytes::from_static(b"stray"));
  let error = deserialize(&graph, &buffers).expect_err("leftover buffer");
  assert_eq!(error, CodecError::BufferCountMismatch { expected: 0, available: 1 });
}

#[test]
fn malformed_tails_fail_decode() {
  let graph = SerializedGraph::new(HeaderNode::leaf(builtin::PRIMITIVE_ID, ObjId::NONE, 0, true, Vec::new()));
  let error = deserialize(&graph, &[]).expect_err("empty primitive tail");
  assert!(matches!(error, CodecError::MalformedHeader(_)));
}

#[test]
fn empty_containers_round_trip() {
  for value in [Value::list(vec![]), Value::tuple(vec![]), Value::map(vec![])] {
    assert_eq!(round_trip(&value), value, "{} did not round-trip", value.kind_name());
  }
}
