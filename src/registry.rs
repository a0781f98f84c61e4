//! Runtime codec registry responsible for resolving codecs by type.


use core::any::{type_name, TypeId};
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::builtin;
use crate::codec::Codec;
use crate::codec_id::{CodecId, RESERVED_MAX};
use crate::error::CodecError;
use crate::registry_error::RegistryError;
use crate::value::Value;

/// Registry that resolves codecs based on type identifiers.
///
/// Intended as initialize-once, read-many: deployments that keep
/// registering codecs after startup must externally sequence those
/// mutations against concurrent traffic.
pub struct CodecRegistry {
  codecs:   RwLock<HashMap<CodecId, Arc<dyn Codec>>>,
  bindings: RwLock<HashMap<TypeId, CodecId>>,
  cache:    RwLock<HashMap<TypeId, CodecId>>,
  fallback: RwLock<CodecId>,
}

impl CodecRegistry {
  /// Creates an empty registry whose fallback is the opaque codec id.
  #[must_use]
  pub fn new() -> Self {
    Self {
      codecs:   RwLock::new(HashMap::new()),
      bindings: RwLock::new(HashMap::new()),
      cache:    RwLock::new(HashMap::new()),
      fallback: RwLock::new(builtin::OPAQUE_ID),
    }
  }

  /// Registers a codec under its own identifier.
  ///
  /// # Errors
  ///
  /// Returns [`RegistryError::ReservedId`] for identifiers in the builtin
  /// range and [`RegistryError::DuplicateId`] when the identifier is taken.
  pub fn register_codec(&self, codec: Arc<dyn Codec>) -> Result<(), RegistryError> {
    let id = codec.codec_id();
    if id.value() <= RESERVED_MAX {
      return Err(RegistryError::ReservedId(id.value()));
    }
    let mut codecs = self.codecs.write();
    if codecs.contains_key(&id) {
      return Err(RegistryError::DuplicateId(id.value()));
    }
    codecs.insert(id, codec);
    tracing::debug!(codec_id = id.value(), "registered codec");
    Ok(())
  }

  pub(crate) fn register_builtin(&self, codec: Arc<dyn Codec>) {
    let id = codec.codec_id();
    self.codecs.write().insert(id, codec);
  }

  /// Binds the marker type `T` to a registered codec.
  ///
  /// # Errors
  ///
  /// Returns [`RegistryError::UnknownCodec`] when `codec_id` is not
  /// registered.
  pub fn bind<T: ?Sized + 'static>(&self, codec_id: CodecId) -> Result<(), RegistryError> {
    self.bind_named(TypeId::of::<T>(), type_name::<T>(), codec_id)
  }

  /// Binds an explicit `TypeId` to a registered codec.
  ///
  /// # Errors
  ///
  /// Returns [`RegistryError::UnknownCodec`] when `codec_id` is not
  /// registered.
  pub fn bind_type(&self, type_id: TypeId, codec_id: CodecId) -> Result<(), RegistryError> {
    self.bind_named(type_id, "<type>", codec_id)
  }

  fn bind_named(&self, type_id: TypeId, name: &str, codec_id: CodecId) -> Result<(), RegistryError> {
    if !self.codecs.read().contains_key(&codec_id) {
      return Err(RegistryError::UnknownCodec(codec_id.value()));
    }
    self.bindings.write().insert(type_id, codec_id);
    self.cache.write().remove(&type_id);
    tracing::debug!(codec_id = codec_id.value(), type_name = name, "bound type to codec");
    Ok(())
  }

  pub(crate) fn bind_unchecked(&self, type_id: TypeId, codec_id: CodecId) {
    self.bindings.write().insert(type_id, codec_id);
    self.cache.write().remove(&type_id);
  }

  /// Removes the binding for `T`, and the codec itself once nothing else
  /// references it.
  pub fn unbind<T: ?Sized + 'static>(&self) {
    self.unbind_type(TypeId::of::<T>());
  }

  /// Removes the binding for an explicit `TypeId`, and the codec itself
  /// once nothing else references it.
  pub fn unbind_type(&self, type_id: TypeId) {
    let Some(codec_id) = self.bindings.write().remove(&type_id) else {
      return;
    };
    self.cache.write().remove(&type_id);
    let still_bound = self.bindings.read().values().any(|bound| *bound == codec_id);
    if !still_bound && codec_id != *self.fallback.read() {
      self.codecs.write().remove(&codec_id);
    }
    tracing::debug!(codec_id = codec_id.value(), "unbound type");
  }

  /// Marks a registered codec as the fallback for unbound types.
  ///
  /// # Errors
  ///
  /// Returns [`RegistryError::UnknownCodec`] when `codec_id` is not
  /// registered.
  pub fn set_fallback(&self, codec_id: CodecId) -> Result<(), RegistryError> {
    if !self.codecs.read().contains_key(&codec_id) {
      return Err(RegistryError::UnknownCodec(codec_id.value()));
    }
    *self.fallback.write() = codec_id;
    self.cache.write().clear();
    Ok(())
  }

  /// Returns the codec identified by `id`.
  ///
  /// # Errors
  ///
  /// Returns [`CodecError::UnknownCodecId`] when no codec carries `id`.
  pub fn codec_by_id(&self, id: CodecId) -> Result<Arc<dyn Codec>, CodecError> {
    self.codecs.read().get(&id).cloned().ok_or(CodecError::UnknownCodecId(id.value()))
  }

  /// Resolves the codec handling `value`, falling back when unbound.
  ///
  /// # Errors
  ///
  /// Returns [`CodecError::NoHandler`] when neither a binding nor the
  /// fallback resolves to a live codec.
  pub fn codec_for_value(&self, value: &Value) -> Result<Arc<dyn Codec>, CodecError> {
    self.resolve(value.dispatch_type(), value.kind_name())
  }

  fn resolve(&self, type_id: TypeId, kind: &'static str) -> Result<Arc<dyn Codec>, CodecError> {
    if let Some(cached) = self.cache.read().get(&type_id).copied() {
      if let Some(codec) = self.codecs.read().get(&cached).cloned() {
        return Ok(codec);
      }
      self.cache.write().remove(&type_id);
    }

    let resolved = self.bindings.read().get(&type_id).copied().unwrap_or(*self.fallback.read());
    if let Some(codec) = self.codecs.read().get(&resolved).cloned() {
      self.cache.write().insert(type_id, resolved);
      return Ok(codec);
    }
    self.cache.write().remove(&type_id);
    Err(CodecError::NoHandler(kind))
  }
}

impl Default for CodecRegistry {
  fn default() -> Self {
    Self::new()
  }
}
