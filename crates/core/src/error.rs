use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("a search query is required for this topic")]
    QueryRequired,
    #[error("snapshot contains no results")]
    EmptySnapshot,
}
