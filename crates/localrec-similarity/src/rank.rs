use std::cmp::Ordering;

/// Indices of `row` ordered by descending score, skipping `exclude`, cut to
/// `top_k`. Equal scores keep ascending index order.
pub fn rank_row(row: &[f32], exclude: usize, top_k: usize) -> Vec<usize> {
    if top_k == 0 {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..row.len()).filter(|&i| i != exclude).collect();
    // sort_by is stable, so ties stay in catalog order
    order.sort_by(|&a, &b| row[b].partial_cmp(&row[a]).unwrap_or(Ordering::Equal));
    order.truncate(top_k);
    order
}
