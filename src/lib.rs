#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_safety_doc)]
#![deny(clippy::redundant_field_names)]
#![deny(clippy::redundant_pattern)]
#![deny(clippy::redundant_static_lifetimes)]
#![deny(clippy::manual_ok_or)]
#![deny(clippy::manual_map)]
#![deny(clippy::manual_let_else)]
#![deny(clippy::unused_self)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::from_over_into)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Zero-copy object graph serialization for distributed compute runtimes.
//!
//! A value serializes into a compact, transport-encodable header tree plus
//! a flat list of reference-counted buffers: bulk payloads (byte strings,
//! long text) travel as separate buffers so transports can scatter/gather
//! them without copying through an intermediate byte string.
//!
//! The engine is a dispatch-driven, iterative depth-first traversal.
//! Repeated identities within one call collapse into placeholders that are
//! reconnected through fixup callbacks on the way back in, which is what
//! makes shared structure and cycles round-trip. Values without a
//! registered codec route to an opaque fallback supplied by the
//! application.

/// Builtin codec implementations and the registry bootstrap.
pub mod builtin;
mod codec;
mod codec_id;
mod context;
mod defaults;
mod encoded;
mod engine;
mod engine_config;
mod error;
mod obj_id;
mod opaque;
mod placeholder;
mod registry;
mod registry_error;
mod subs;
mod value;
/// Wire-facing header model.
pub mod wire;

pub use bytes::Bytes;

pub use codec::Codec;
pub use codec_id::CodecId;
pub use context::{DeserializeContext, SerializeContext};
pub use defaults::{default_object_codec, default_registry, registry_with_defaults};
pub use encoded::{Children, Encoded};
pub use engine::{deserialize, deserialize_with, serialize, serialize_with};
pub use engine_config::EngineConfig;
pub use error::CodecError;
pub use obj_id::ObjId;
pub use opaque::{ObjectCodec, OpaqueObject, SharedOpaque, TaggedObjectCodec};
pub use placeholder::{Fixup, Placeholder};
pub use registry::CodecRegistry;
pub use registry_error::RegistryError;
pub use subs::Subs;
pub use value::{Complex64, ListValue, MapValue, NativeFn, NativeFnPtr, NumberKind, RecordType, TupleValue, Value};
pub use wire::{HeaderNode, HeaderValue, SerializedGraph};
