use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("unknown timeline {0:?} (expected bst, rbt, heaptree or heaparray)")]
    UnknownTimeline(String),

    #[error("heap type must be \"min\" or \"max\", got {0:?}")]
    UnknownHeapType(String),

    #[error("{structure} invariant violated: {detail}")]
    Invariant {
        structure: &'static str,
        detail: String,
    },
}

impl TreeError {
    pub(crate) fn invariant(structure: &'static str, detail: impl Into<String>) -> Self {
        TreeError::Invariant {
            structure,
            detail: detail.into(),
        }
    }
}
