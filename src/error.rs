use thiserror::Error;

/// Why a session operation refused its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum InputProblem {
    #[strum(serialize = "draft is empty")]
    EmptyDraft,
    #[strum(serialize = "no reference text is selected")]
    NoActiveText,
    #[strum(serialize = "a reference text is already selected")]
    TextAlreadySelected,
}

#[derive(Debug, Error)]
pub enum DictationError {
    #[error("invalid input: {0}")]
    InvalidInput(InputProblem),

    /// The draft was edited after it had been checked.
    #[error("draft is locked until the session is reset")]
    InvariantViolation,

    /// A reference text with no words; scoring it would divide by zero.
    #[error("reference text has no words")]
    DegenerateReferenceText,

    #[error("reference text id {id} appears more than once in the catalog")]
    DuplicateTextId { id: u32 },

    #[error("catalog contains no reference texts")]
    EmptyCatalog,

    #[error("no reference text with id {id}")]
    UnknownText { id: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
