/// Sorts `items` by descending `key` and keeps the first `limit`.
///
/// The sort is stable: equal keys keep their encounter order. Keys are compared with
/// `f64::total_cmp`, so a NaN key still yields a total order.
pub fn rank_descending<T, F>(mut items: Vec<T>, key: F, limit: usize) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
    items.truncate(limit);
    items
}
