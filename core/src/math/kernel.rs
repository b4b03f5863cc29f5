use crate::prelude::MAX_SIGMA;
use ndarray::{Array2, Axis};

/// Kernel half-width as a multiple of sigma.
pub const TRUNCATE: f64 = 4.0;

/// Normalised 1-D Gaussian weights of length `2 * radius + 1`.
///
/// The radius never exceeds the one for [`MAX_SIGMA`]; larger deviations are
/// truncated to that window.
pub fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (TRUNCATE * sigma.min(MAX_SIGMA) + 0.5) as usize;
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let offset = i as f64 - radius as f64;
            (-(offset * offset) / denom).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();
    weights.iter_mut().for_each(|w| *w /= total);
    weights
}

/// Folds an out-of-range index back into `0..len` by mirroring about the
/// array edges, repeating the edge sample (`d c b a | a b c d | d c b a`).
pub fn reflect_index(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let wrapped = index.rem_euclid(period);
    if wrapped < len as isize {
        wrapped as usize
    } else {
        (period - 1 - wrapped) as usize
    }
}

/// Correlates every lane of `input` along `axis` with `weights`.
pub fn correlate_axis(input: &Array2<f64>, weights: &[f64], axis: Axis) -> Array2<f64> {
    let mut output = Array2::<f64>::zeros(input.raw_dim());
    let len = input.len_of(axis);
    if len == 0 {
        return output;
    }
    let radius = (weights.len() / 2) as isize;
    let mut lane_buf = vec![0.0; len];

    for (src, mut dst) in input.lanes(axis).into_iter().zip(output.lanes_mut(axis)) {
        lane_buf.iter_mut().zip(src.iter()).for_each(|(b, &v)| *b = v);
        if lane_buf.iter().all(|&v| v == 0.0) {
            continue;
        }
        for (i, out) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &w) in weights.iter().enumerate() {
                let j = i as isize + k as isize - radius;
                acc += w * lane_buf[reflect_index(j, len)];
            }
            *out = acc;
        }
    }
    output
}
