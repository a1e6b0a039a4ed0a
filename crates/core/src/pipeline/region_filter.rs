use crate::shared::region::Region;

/// Drops regions narrower or shorter than `min_size`.
///
/// Overlapping regions are all kept: each one is a face the locator
/// reported. Detection order is preserved.
pub fn filter_regions(regions: &[Region], min_size: u32) -> Vec<Region> {
    let min = min_size as i64;
    regions
        .iter()
        .filter(|r| r.width as i64 >= min && r.height as i64 >= min)
        .copied()
        .collect()
}
