//! Wire-facing header model.


/// Header tree node carrying the common prefix and codec tail.
pub mod header_node;
/// Transport-encodable header primitive.
pub mod header_value;
/// Top-level serialized output.
pub mod serialized_graph;

pub use header_node::HeaderNode;
pub use header_value::HeaderValue;
pub use serialized_graph::SerializedGraph;
