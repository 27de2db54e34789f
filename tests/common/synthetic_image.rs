/// Constant image of the given level.
pub fn constant_u8(width: usize, height: usize, level: u8) -> Vec<u8> {
    vec![level; width * height]
}

/// 3x3 image with a single interior maximum of level 9 on a 0 floor.
pub fn single_peak3() -> Vec<u8> {
    vec![0, 0, 0, 0, 9, 0, 0, 0, 0]
}

/// 4x4 image with two diagonal peaks of level 8 joined by a bilinear
/// saddle of level 5 in the square between them.
#[rustfmt::skip]
pub fn saddle_pair4() -> Vec<u8> {
    vec![
        2, 2, 2, 2,
        2, 8, 2, 2,
        2, 2, 8, 2,
        2, 2, 2, 2,
    ]
}

/// 5x5 image with a regional-maximum ring of level 8 around a one-pixel
/// minimum of level 2, on a 0 floor.
#[rustfmt::skip]
pub fn ring_with_hole5() -> Vec<u8> {
    vec![
        0, 0, 0, 0, 0,
        0, 8, 8, 8, 0,
        0, 8, 2, 8, 0,
        0, 8, 8, 8, 0,
        0, 0, 0, 0, 0,
    ]
}

/// Monotone horizontal ramp: every plateau is a column touching the
/// border.
pub fn ramp(width: usize, height: usize) -> Vec<u8> {
    let mut img = Vec::with_capacity(width * height);
    for _ in 0..height {
        for x in 0..width {
            img.push(x as u8);
        }
    }
    img
}

/// Deterministic textured image with interior structure.
pub fn textured(width: usize, height: usize) -> Vec<u8> {
    let mut img = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let v = (x * 37 + y * 91 + (x * y) % 23) % 251;
            img.push(v as u8);
        }
    }
    img
}
