/// Lifecycle of a create/delete request as seen by the view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum MutationState {
    #[default]
    Idle,
    Pending,
    Failed(String),
}

impl MutationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn error(&self) -> Option<String> {
        match self {
            Self::Failed(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}
