//! Ward grouping that preserves first-appearance order.

use rustc_hash::FxHashMap;

/// Items grouped under one ward
#[derive(Debug)]
pub struct WardGroup<'a, T> {
    pub ward: &'a str,
    pub members: Vec<&'a T>,
}

/// Group items by ward, listing wards in order of first appearance
pub fn group_by_ward<'a, T, F>(items: &'a [T], ward_of: F) -> Vec<WardGroup<'a, T>>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut index: FxHashMap<&'a str, usize> = FxHashMap::default();
    let mut groups: Vec<WardGroup<'a, T>> = Vec::new();

    for item in items {
        let ward = ward_of(item);
        let slot = *index.entry(ward).or_insert_with(|| {
            groups.push(WardGroup {
                ward,
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(item);
    }

    groups
}

/// Distinct ward labels in order of first appearance
pub fn ward_order<'a, T, F>(items: &'a [T], ward_of: F) -> Vec<&'a str>
where
    F: Fn(&'a T) -> &'a str,
{
    group_by_ward(items, ward_of)
        .into_iter()
        .map(|group| group.ward)
        .collect()
}
