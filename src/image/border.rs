//! Border seeding for level-line extraction.
//!
//! Replacing the one-pixel frame with its median level guarantees that no
//! regional extremum touches the image border, which the extraction driver
//! relies on. The median is the lower median of the frame histogram.

/// Accumulate the histogram of the border pixels of a `w × h` buffer.
fn border_histogram(data: &[u8], w: usize, h: usize) -> [usize; 256] {
    let mut histo = [0usize; 256];
    for &v in &data[..w] {
        histo[v as usize] += 1;
    }
    for y in 1..h.saturating_sub(1) {
        histo[data[y * w] as usize] += 1;
        histo[data[y * w + w - 1] as usize] += 1;
    }
    if h > 1 {
        for &v in &data[(h - 1) * w..] {
            histo[v as usize] += 1;
        }
    }
    histo
}

/// Overwrite the one-pixel border frame with `v`.
fn put_border(data: &mut [u8], w: usize, h: usize, v: u8) {
    data[..w].fill(v);
    for y in 1..h.saturating_sub(1) {
        data[y * w] = v;
        data[y * w + w - 1] = v;
    }
    if h > 1 {
        data[(h - 1) * w..].fill(v);
    }
}

/// Set all border pixels of the image to their median level; returns it.
pub fn fill_border_median(data: &mut [u8], w: usize, h: usize) -> u8 {
    let histo = border_histogram(data, w, h);
    let limit = w + h - 2; // half the number of border pixels
    let mut sum = 0usize;
    let mut level = 0usize;
    loop {
        sum += histo[level];
        if sum >= limit {
            break;
        }
        level += 1;
    }
    put_border(data, w, h, level as u8);
    level as u8
}

#[cfg(test)]
mod tests {
    use super::fill_border_median;

    #[test]
    fn median_of_uniform_border() {
        let mut data = vec![7u8; 9];
        data[4] = 200;
        let m = fill_border_median(&mut data, 3, 3);
        assert_eq!(m, 7);
        assert_eq!(data[4], 200, "interior must be untouched");
    }

    #[test]
    fn border_is_overwritten() {
        // 4x3 image, border values 0..9, interior 42.
        let mut data = vec![0u8, 1, 2, 3, 4, 42, 42, 5, 6, 7, 8, 9];
        let m = fill_border_median(&mut data, 4, 3);
        for (i, &v) in data.iter().enumerate() {
            if i == 5 || i == 6 {
                assert_eq!(v, 42);
            } else {
                assert_eq!(v, m);
            }
        }
    }
}
