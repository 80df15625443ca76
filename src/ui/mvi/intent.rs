/// Marker trait for things that can change UI state: key presses,
/// identity provider events, worker results.
pub trait Intent: Send + 'static {}
