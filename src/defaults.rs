//! Process-wide default registry and object codec.

use std::sync::{Arc, OnceLock};

use crate::builtin;
use crate::opaque::{ObjectCodec, TaggedObjectCodec};
use crate::registry::CodecRegistry;

/// Returns the process-wide tagged object codec backing the default
/// registry's opaque fallback. Applications register their opaque types
/// here during startup.
pub fn default_object_codec() -> Arc<TaggedObjectCodec> {
  static CODEC: OnceLock<Arc<TaggedObjectCodec>> = OnceLock::new();
  CODEC.get_or_init(|| Arc::new(TaggedObjectCodec::new())).clone()
}

/// Returns the process-wide registry, initialized once with the builtin
/// codecs wired to [`default_object_codec`].
pub fn default_registry() -> Arc<CodecRegistry> {
  static REGISTRY: OnceLock<Arc<CodecRegistry>> = OnceLock::new();
  REGISTRY.get_or_init(|| registry_with_defaults(default_object_codec())).clone()
}

/// Builds a private registry with the builtin codecs installed.
pub fn registry_with_defaults(object_codec: Arc<dyn ObjectCodec>) -> Arc<CodecRegistry> {
  let registry = Arc::new(CodecRegistry::new());
  builtin::register_defaults(&registry, object_codec);
  registry
}
