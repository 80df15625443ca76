use crate::auth::AuthEvent;
use crate::ui::mvi::Reducer;
use crate::ui::session::intent::SessionIntent;
use crate::ui::session::state::SessionState;

pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        let generation = state.generation();
        match intent {
            // The user itself arrives later through `Resolved`; keep showing
            // whoever we had until then.
            SessionIntent::Auth(AuthEvent::SignedIn) => match state {
                SessionState::SignedIn { user, .. } => SessionState::SignedIn {
                    user,
                    generation: generation + 1,
                },
                SessionState::SignedOut { .. } => SessionState::SignedOut {
                    generation: generation + 1,
                },
            },
            SessionIntent::Auth(AuthEvent::SignedOut) => SessionState::SignedOut {
                generation: generation + 1,
            },
            SessionIntent::Resolved {
                generation: issued_at,
                ..
            } if issued_at != generation => state,
            SessionIntent::Resolved {
                user: Some(user), ..
            } => SessionState::SignedIn { user, generation },
            SessionIntent::Resolved { user: None, .. } => SessionState::SignedOut { generation },
            SessionIntent::ResolveFailed { .. } => state,
        }
    }
}
