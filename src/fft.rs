/*
 * // Copyright (c) Radzivon Bartoshyk 2/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
//! 2D real FFT engine for the spatial filtering stage. The 2D transform is
//! built from two separable 1D passes: a real-to-complex pass along the
//! padded row axis (`Rf`), then a complex-to-complex pass along the padded
//! column axis (`Cf`). Boundary padding is periodic tiling of the original
//! image, as in the reference pipeline this engine replaces.
use crate::err::PipelineError;
use crate::image::Image;
use realfft::RealFftPlanner;
use realfft::num_complex::Complex32;
use rustfft::FftPlanner;
use std::sync::Arc;

/// Integers whose largest prime factor is `<= 7`, the sizes FFTW-style
/// mixed-radix planners handle efficiently. Biased toward powers of two.
const GOOD_FFT_SIZES: [usize; 167] = [
    32, 35, 36, 40, 42, 45, 48, 49, 50, 54, 56, 60, 64, 70, 72, 75, 80, 81, 84, 90, 96, 98, 100,
    105, 108, 112, 120, 125, 126, 128, 135, 140, 144, 147, 150, 160, 162, 168, 175, 180, 189, 192,
    196, 200, 210, 216, 224, 225, 240, 243, 245, 250, 252, 256, 270, 280, 288, 294, 300, 315, 320,
    324, 336, 343, 350, 360, 375, 378, 384, 392, 400, 405, 420, 432, 441, 448, 450, 480, 486, 490,
    500, 504, 512, 525, 540, 560, 567, 576, 588, 600, 625, 630, 640, 648, 672, 675, 686, 700, 720,
    729, 735, 750, 756, 768, 784, 800, 810, 840, 864, 875, 882, 896, 900, 945, 960, 972, 980,
    1000, 1008, 1024, 1029, 1050, 1080, 1120, 1125, 1134, 1152, 1176, 1200, 1215, 1225, 1250, 1260,
    1280, 1296, 1323, 1344, 1350, 1372, 1400, 1440, 1458, 1470, 1500, 1512, 1536, 1568, 1575, 1600,
    1620, 1680, 1701, 1715, 1728, 1750, 1764, 1792, 1800, 1875, 1890, 1920, 1944, 1960, 2000, 2016,
    2025, 2048,
];

/// Smallest table entry `>= n`. If `n` exceeds the table's range, the
/// largest entry is returned (images larger than 2048 padded-per-axis are
/// outside the envelope this table was built for).
pub fn good_fft_size(n: usize) -> usize {
    if n <= GOOD_FFT_SIZES[0] {
        return GOOD_FFT_SIZES[0];
    }
    for i in 1..GOOD_FFT_SIZES.len() {
        if n < GOOD_FFT_SIZES[i] && n > GOOD_FFT_SIZES[i - 1] {
            return GOOD_FFT_SIZES[i];
        }
        if n == GOOD_FFT_SIZES[i - 1] {
            return GOOD_FFT_SIZES[i - 1];
        }
    }
    *GOOD_FFT_SIZES.last().unwrap()
}

/// `dim + floor(0.05*dim)`, rounded up to the next good FFT size.
pub fn padded_size(dim: usize) -> usize {
    let padded = dim + ((0.05 * dim as f64) as usize);
    good_fft_size(padded)
}

/// Width of one row-spectrum: the half-spectrum of a real-to-complex FFT
/// over `rf` samples.
pub(crate) fn row_bins(rf: usize) -> usize {
    rf / 2 + 1
}

/// A plan for the padded transform size `(rf, cf)`. Scratch state (the
/// realfft and rustfft planners) is owned here and dropped with the plan;
/// nothing outlives the scope that created it.
pub struct FftPlan {
    rf: usize,
    cf: usize,
    real_planner_fwd: Arc<dyn realfft::RealToComplex<f32>>,
    real_planner_inv: Arc<dyn realfft::ComplexToReal<f32>>,
    complex_fwd: Arc<dyn rustfft::Fft<f32>>,
    complex_inv: Arc<dyn rustfft::Fft<f32>>,
}

/// One channel's padded complex spectrum, `cf` columns of `row_bins(rf)`
/// complex bins each, column-major (column index is the outer stride).
#[derive(Clone)]
pub struct Spectrum {
    pub data: Vec<Complex32>,
    pub rf: usize,
    pub cf: usize,
}

impl Spectrum {
    fn bins(&self) -> usize {
        row_bins(self.rf)
    }
}

impl FftPlan {
    pub fn new(rf: usize, cf: usize) -> Result<Self, PipelineError> {
        if rf == 0 || cf == 0 {
            return Err(PipelineError::PlanCreationFailed { rows: rf, cols: cf });
        }
        let mut real_planner = RealFftPlanner::<f32>::new();
        let real_planner_fwd = real_planner.plan_fft_forward(rf);
        let real_planner_inv = real_planner.plan_fft_inverse(rf);
        let mut complex_planner = FftPlanner::<f32>::new();
        let complex_fwd = complex_planner.plan_fft_forward(cf);
        let complex_inv = complex_planner.plan_fft_inverse(cf);
        Ok(Self {
            rf,
            cf,
            real_planner_fwd,
            real_planner_inv,
            complex_fwd,
            complex_inv,
        })
    }

    /// Forward 2D real FFT of one channel. `plane` is read with periodic
    /// wraparound into the padded `(rf, cf)` extent: source pixel for
    /// padded position `(row, col)` is `plane[row % height, col % width]`.
    pub fn forward(&self, plane: &[f32], width: usize, height: usize) -> Spectrum {
        let bins = row_bins(self.rf);
        let mut spectrum = vec![Complex32::new(0.0, 0.0); self.cf * bins];

        let mut row_buf = vec![0f32; self.rf];
        let mut row_spec = self.real_planner_fwd.make_output_vec();
        for col in 0..self.cf {
            let src_col = col % width;
            for (row, slot) in row_buf.iter_mut().enumerate() {
                let src_row = row % height;
                *slot = plane[src_row * width + src_col];
            }
            self.real_planner_fwd
                .process(&mut row_buf, &mut row_spec)
                .expect("real FFT forward");
            spectrum[col * bins..(col + 1) * bins].copy_from_slice(&row_spec);
        }

        let mut col_buf = vec![Complex32::new(0.0, 0.0); self.cf];
        for bin in 0..bins {
            for col in 0..self.cf {
                col_buf[col] = spectrum[col * bins + bin];
            }
            self.complex_fwd.process(&mut col_buf);
            for col in 0..self.cf {
                spectrum[col * bins + bin] = col_buf[col];
            }
        }

        Spectrum {
            data: spectrum,
            rf: self.rf,
            cf: self.cf,
        }
    }

    /// Inverse 2D real FFT. Writes only the top-left `width x height`
    /// region into `plane`; normalises by the padded transform size
    /// `rf * cf`, not the unpadded pixel count.
    pub fn inverse(&self, spectrum: &Spectrum, plane: &mut [f32], width: usize, height: usize) {
        let bins = spectrum.bins();
        let mut working = spectrum.data.clone();

        let mut col_buf = vec![Complex32::new(0.0, 0.0); self.cf];
        for bin in 0..bins {
            for col in 0..self.cf {
                col_buf[col] = working[col * bins + bin];
            }
            self.complex_inv.process(&mut col_buf);
            for col in 0..self.cf {
                working[col * bins + bin] = col_buf[col];
            }
        }

        let norm = 1.0 / (self.rf * self.cf) as f32;
        let mut row_spec = self.real_planner_inv.make_input_vec();
        let mut row_buf = self.real_planner_inv.make_output_vec();
        for col in 0..self.cf {
            row_spec.copy_from_slice(&working[col * bins..(col + 1) * bins]);
            self.real_planner_inv
                .process(&mut row_spec, &mut row_buf)
                .expect("real FFT inverse");
            if col < width {
                for row in 0..height.min(self.rf) {
                    plane[row * width + col] = row_buf[row] * norm;
                }
            }
        }
    }
}

/// Multiply every complex bin `(i, j)` of `spectrum` by `row_spec[i]` and
/// then by `col_spec[j]`, using a temporary complex value for the
/// intermediate product so the row-multiplied result isn't read back out
/// of an already-overwritten in-place buffer.
pub(crate) fn multiply_separable(spectrum: &mut Spectrum, row_spec: &[Complex32], col_spec: &[Complex32]) {
    let bins = spectrum.bins();
    debug_assert_eq!(row_spec.len(), bins);
    debug_assert_eq!(col_spec.len(), spectrum.cf);
    for col in 0..spectrum.cf {
        for bin in 0..bins {
            let idx = col * bins + bin;
            let intermediate = spectrum.data[idx] * row_spec[bin];
            spectrum.data[idx] = intermediate * col_spec[col];
        }
    }
}

/// Run the forward/inverse round trip and the separable spectrum multiply
/// for all three planes of `image` at once.
pub fn filter_image(
    plan: &FftPlan,
    image: &mut Image,
    row_specs: &[Vec<Complex32>; 3],
    col_specs: &[Vec<Complex32>; 3],
) {
    let (width, height) = (image.width(), image.height());
    let planes = [
        image.red().to_vec(),
        image.green().to_vec(),
        image.blue().to_vec(),
    ];
    let mut outputs = [
        vec![0f32; width * height],
        vec![0f32; width * height],
        vec![0f32; width * height],
    ];

    for c in 0..3 {
        let mut spectrum = plan.forward(&planes[c], width, height);
        multiply_separable(&mut spectrum, &row_specs[c], &col_specs[c]);
        plan.inverse(&spectrum, &mut outputs[c], width, height);
    }

    let (r, g, b) = image.planes_mut();
    r.copy_from_slice(&outputs[0]);
    g.copy_from_slice(&outputs[1]);
    b.copy_from_slice(&outputs[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_fft_size_matches_table_entries() {
        assert_eq!(good_fft_size(1), 32);
        assert_eq!(good_fft_size(32), 32);
        assert_eq!(good_fft_size(33), 35);
        assert_eq!(good_fft_size(2048), 2048);
    }

    #[test]
    fn padded_size_rounds_up() {
        assert_eq!(padded_size(100), good_fft_size(105));
    }

    #[test]
    fn forward_inverse_round_trip_recovers_impulse() {
        let plan = FftPlan::new(64, 64).unwrap();
        let width = 8usize;
        let height = 8usize;
        let mut plane = vec![0f32; width * height];
        plane[0] = 1.0;
        let spectrum = plan.forward(&plane, width, height);
        let mut out = vec![0f32; width * height];
        plan.inverse(&spectrum, &mut out, width, height);
        assert!((out[0] - 1.0).abs() < 1e-3, "out[0]={}", out[0]);
    }
}
