/// Marker trait for reducer-owned state.
///
/// `Default` is the state before anything happened; `PartialEq` lets tests
/// compare whole states.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
