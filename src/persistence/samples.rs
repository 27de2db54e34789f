use crate::geometry::saddle_value;
use crate::image::ImageF32;

/// Value stored for a dual pixel without a bilinear saddle. Virtual
/// samples carrying it never enter the merge forest.
pub(super) const SENTINEL: f32 = -1.0;

/// Flat id space over the `2·w·h` samples of an image: real pixel
/// samples first (scan order), then one virtual sample per dual pixel,
/// addressed by its top-left corner.
#[derive(Clone, Copy, Debug)]
pub(super) struct SampleSpace {
    pub w: usize,
    pub h: usize,
}

impl SampleSpace {
    #[inline]
    pub fn real_count(self) -> usize {
        self.w * self.h
    }

    #[inline]
    pub fn len(self) -> usize {
        2 * self.real_count()
    }

    #[inline]
    pub fn is_real(self, id: usize) -> bool {
        id < self.real_count()
    }

    #[inline]
    pub fn coords(self, id: usize) -> (usize, usize) {
        let i = if self.is_real(id) {
            id
        } else {
            id - self.real_count()
        };
        (i % self.w, i / self.w)
    }

    #[inline]
    pub fn real_id(self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn virtual_id(self, x: usize, y: usize) -> usize {
        self.real_count() + y * self.w + x
    }
}

/// Fill the virtual-sample grid: the saddle level of each dual pixel, or
/// the sentinel where the square carries none.
pub(super) fn fill_virtual_samples(im: &ImageF32, out: &mut [f32]) {
    for y in 0..im.h {
        for x in 0..im.w {
            let mut v = SENTINEL;
            if x + 1 < im.w && y + 1 < im.h {
                if let Some(s) = saddle_value(
                    im.get(x, y),
                    im.get(x + 1, y),
                    im.get(x, y + 1),
                    im.get(x + 1, y + 1),
                ) {
                    v = s;
                }
            }
            out[y * im.w + x] = v;
        }
    }
}

/// Sample ids sorted by value; ties fall back on the id itself, which
/// orders real before virtual and by (y, x) within each kind.
pub(super) fn sorted_order(values: &[f32]) -> Vec<u32> {
    let mut order: Vec<u32> = (0..values.len() as u32).collect();
    order.sort_by(|&p, &q| {
        values[p as usize]
            .total_cmp(&values[q as usize])
            .then(p.cmp(&q))
    });
    order
}
