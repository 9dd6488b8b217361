use fairsim_core::CoreError;
use fairsim_tree::TreeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("timeline check failed after tick {tick}: {source}")]
    Invariant {
        tick: u64,
        #[source]
        source: TreeError,
    },

    #[error(transparent)]
    Config(#[from] CoreError),
}
