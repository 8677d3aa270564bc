use crate::{ClusterError, ClusterResult};

/// Parses an inclusive `start-end` range expression.
///
/// Whitespace around either bound is ignored, so `" 1 - 100 "` and `"1-100"`
/// are equivalent. Only the syntax is checked: bounds are not validated
/// against the number of virtual nodes, and swapped bounds parse fine.
pub fn parse_range(expr: &str) -> ClusterResult<(i64, i64)> {
    let invalid = || ClusterError::InvalidInput(expr.to_string());

    let mut parts = expr.split('-');
    let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let start = start.trim().parse().map_err(|_| invalid())?;
    let end = end.trim().parse().map_err(|_| invalid())?;
    Ok((start, end))
}
