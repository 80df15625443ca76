use super::intent::Intent;
use super::state::UiState;

/// `(State, Intent) -> State` with no side effects.
///
/// Anything that needs the network is sent as a command by the caller after
/// the reduction.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
