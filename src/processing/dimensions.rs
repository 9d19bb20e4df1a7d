/// Computes the size an image should have so that neither side exceeds
/// `max_size`, keeping the aspect ratio.
///
/// Images that already fit are returned unchanged. Otherwise the larger side
/// becomes exactly `max_size` and the other side is scaled by the same ratio,
/// truncated, and never allowed to drop below 1. Square images take the
/// height branch, which gives the same result as the width branch.
pub fn target_dimensions(width: u32, height: u32, max_size: u32) -> (u32, u32) {
    if width <= max_size && height <= max_size {
        return (width, height);
    }

    if width > height {
        (max_size, scale_side(height, max_size, width))
    } else {
        (scale_side(width, max_size, height), max_size)
    }
}

// side * numerator / denominator, truncated, floor 1.
fn scale_side(side: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = u64::from(side) * u64::from(numerator) / u64::from(denominator);
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}
