use thiserror::Error;

pub type GrResult<T> = Result<T, GrError>;

/// Precondition failures shared by every crate in the workspace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrError {
    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },
}
