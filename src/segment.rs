//! Maximal runs of marked states in a decoded path.

/// A closed interval `[start, end]` of path positions, every one of
/// them marked, extendable in neither direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

/// Scan `path` for maximal runs of elements satisfying `is_marked`.
///
/// Which states count as marked is entirely the caller's business; the
/// scan only sees the predicate. Segments come back in left-to-right
/// order, never overlap, and jointly cover exactly the marked
/// positions. A run still open at the end of the path is closed on the
/// last position. No marked position at all yields an empty list,
/// which is a normal outcome and not a failure.
pub fn marked_segments<S, F>(path: &[S], is_marked: F) -> Vec<Segment>
where
    F: Fn(&S) -> bool,
{
    let mut segments = Vec::new();
    let mut open: Option<usize> = None;
    for (i, state) in path.iter().enumerate() {
        match (is_marked(state), open) {
            (true, None) => open = Some(i),
            (false, Some(start)) => {
                segments.push(Segment { start, end: i - 1 });
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        segments.push(Segment {
            start,
            end: path.len() - 1,
        });
    }
    segments
}
