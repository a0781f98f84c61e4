//! Shared element partitioning for the container codecs.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::error::CodecError;
use crate::placeholder::Placeholder;
use crate::value::Value;
use crate::wire::HeaderValue;

/// Result of partitioning a sequence into inline and propagated elements.
pub(crate) struct SplitSequence {
  /// Element-for-element header form, `Null` at propagated slots.
  pub residual: Vec<HeaderValue>,
  /// Positions of the propagated elements.
  pub indices:  Vec<u32>,
  /// Propagated elements in index order.
  pub children: Vec<Value>,
}

impl SplitSequence {
  /// Returns the residual and index list as header elements.
  pub fn tail_elements(&self) -> (HeaderValue, HeaderValue) {
    let residual = HeaderValue::Seq(self.residual.clone());
    let indices = HeaderValue::Seq(self.indices.iter().map(|index| HeaderValue::Int(i64::from(*index))).collect());
    (residual, indices)
  }
}

/// Partitions `elements`: primitives and byte/text elements shorter than
/// `inline_limit` stay in the header, everything else propagates.
pub(crate) fn split_elements(elements: &[Value], inline_limit: usize) -> SplitSequence {
  let mut residual = Vec::with_capacity(elements.len());
  let mut indices = Vec::new();
  let mut children = Vec::new();
  for (index, element) in elements.iter().enumerate() {
    match inline_element(element, inline_limit) {
      | Some(inline) => residual.push(inline),
      | None => {
        residual.push(HeaderValue::Null);
        indices.push(index as u32);
        children.push(element.clone());
      },
    }
  }
  SplitSequence { residual, indices, children }
}

fn inline_element(element: &Value, inline_limit: usize) -> Option<HeaderValue> {
  if element.is_primitive() {
    return HeaderValue::from_primitive(element);
  }
  match element {
    | Value::Text(text) if text.len() < inline_limit => Some(HeaderValue::Str(text.to_string())),
    | Value::Bytes(bytes) if bytes.len() < inline_limit => Some(HeaderValue::Bytes(bytes.to_vec())),
    | _ => None,
  }
}

/// Parses a propagated-index header element.
pub(crate) fn parse_indices(header: &HeaderValue) -> Result<Vec<usize>, CodecError> {
  header
    .as_seq()?
    .iter()
    .map(|element| {
      usize::try_from(element.as_int()?).map_err(|_| CodecError::malformed("negative propagated index"))
    })
    .collect()
}

/// Sequence rebuilt from a residual, with placeholder slots called out.
#[derive(Debug)]
pub(crate) struct Scattered {
  /// The reconstructed elements.
  pub items:        Vec<Value>,
  /// Slots still occupied by an unresolved placeholder.
  pub placeholders: Vec<(usize, Arc<Placeholder>)>,
}

/// Scatters deserialized children back into the residual sequence.
pub(crate) fn scatter(
  residual: &[HeaderValue],
  indices: &[usize],
  children: &[Value],
) -> Result<Scattered, CodecError> {
  if indices.len() != children.len() {
    return Err(CodecError::malformed("propagated index count does not match subcomponents"));
  }
  let mut items = residual.iter().map(HeaderValue::to_value).collect::<Result<Vec<_>, _>>()?;
  let mut placeholders = Vec::new();
  for (slot, child) in indices.iter().zip(children) {
    let Some(target) = items.get_mut(*slot) else {
      return Err(CodecError::malformed("propagated index beyond residual length"));
    };
    *target = child.clone();
    if let Value::Placeholder(placeholder) = child {
      placeholders.push((*slot, placeholder.clone()));
    }
  }
  Ok(Scattered { items, placeholders })
}
