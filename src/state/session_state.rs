/// The lifecycle of a coloring session.
///
/// The valid state transitions are:
/// ```text
/// ┌───────────────┐     ┌─────────┐  loaded / placeholder  ┌───────┐
/// │ Uninitialized ├─────► Loading ├────────────────────────► Ready │
/// └───────────────┘     └────▲────┘                        └─┬──▲──┘
///                            │        open another image     │  │
///                            └───────────────────────────────┘  │
///                                                               │
///                               ┌───────────┐   export requested │
///                               │ Exporting ◄───────────────────┘
///                               └─────┬─────┘   settled (ok or failed)
///                                     └──────────────────────► Ready
/// ```
///
/// Drawing and settings commands are only accepted in `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    /// Waiting for the outline image
    Loading,
    Ready,
    /// An export snapshot is being encoded; further exports are rejected
    Exporting,
}

impl SessionState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: SessionState) -> bool {
        matches!(
            (self, new_state),
            (SessionState::Uninitialized, SessionState::Loading)
                | (SessionState::Loading, SessionState::Ready)
                | (SessionState::Ready, SessionState::Loading)
                | (SessionState::Ready, SessionState::Exporting)
                | (SessionState::Exporting, SessionState::Ready)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "Uninitialized",
            SessionState::Loading => "Loading",
            SessionState::Ready => "Ready",
            SessionState::Exporting => "Exporting",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_exporting(&self) -> bool {
        matches!(self, SessionState::Exporting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        use SessionState::*;
        assert!(Uninitialized.can_transition_to(Loading));
        assert!(Loading.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Exporting));
        assert!(Exporting.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Loading));
    }

    #[test]
    fn test_invalid_transitions() {
        use SessionState::*;
        assert!(!Uninitialized.can_transition_to(Ready));
        assert!(!Uninitialized.can_transition_to(Exporting));
        assert!(!Loading.can_transition_to(Exporting));
        assert!(!Exporting.can_transition_to(Exporting));
        assert!(!Exporting.can_transition_to(Loading));
        assert!(!Ready.can_transition_to(Ready));
    }
}
