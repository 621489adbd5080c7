use crate::{GrError, GrResult};

/// Number of spacetime dimensions handled by the workspace.
pub const DIM: usize = 4;

/// Reject a coordinate index outside `0..DIM`.
///
/// Out-of-range indices are caller bugs; they are reported instead of
/// clamped or wrapped.
#[inline]
pub fn check_index(what: &'static str, index: usize) -> GrResult<usize> {
    if index < DIM {
        Ok(index)
    } else {
        Err(GrError::IndexOob {
            what,
            index,
            len: DIM,
        })
    }
}

/// Check all three indices of a Christoffel coefficient Γ^i_{kl}.
pub fn check_triple(i: usize, k: usize, l: usize) -> GrResult<(usize, usize, usize)> {
    Ok((
        check_index("upper index", i)?,
        check_index("first lower index", k)?,
        check_index("second lower index", l)?,
    ))
}

/// Every (i, k, l) triple in canonical nested order.
pub fn index_triples() -> impl Iterator<Item = (usize, usize, usize)> + Clone {
    (0..DIM).flat_map(|i| (0..DIM).flat_map(move |k| (0..DIM).map(move |l| (i, k, l))))
}
