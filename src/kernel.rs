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
//! Separable sum-of-Gaussians spatial filter kernels, one per opponent
//! channel, pre-transformed to frequency space for use against an image
//! spectrum produced by [`crate::fft`].
use realfft::RealFftPlanner;
use realfft::num_complex::Complex32;
use rustfft::FftPlanner;

/// Weights and standard deviations (in pixels) for up to three 1D Gaussians
/// summed to build one channel's row or column kernel.
#[derive(Copy, Clone, Debug)]
pub struct GaussianSum {
    pub weights: [f32; 3],
    pub sds: [f32; 3],
}

impl GaussianSum {
    /// Scale every standard deviation by `factor` (used to convert
    /// pixel-space sigmas into samples-per-degree units).
    pub fn scaled(&self, factor: f32) -> Self {
        GaussianSum {
            weights: self.weights,
            sds: self.sds.map(|sd| sd * factor),
        }
    }
}

/// Build the real, space-domain kernel of length `len`: a sum of up to
/// three Gaussians centred at `len/2 + 0.5`, each weight normalised by
/// `sqrt(4*pi)*sigma` so user weights describe the peak of a unit-area
/// Gaussian, then the whole kernel rescaled so its signed sum is `scale`.
/// A zero sigma is replaced by `0.001` to avoid division by zero.
pub fn build_1d_kernel(len: usize, gaussians: &GaussianSum, scale: f32) -> Vec<f32> {
    const UNIT_AREA_NORM: f32 = 3.544907701811; // sqrt(4*pi)
    let center = len as f32 / 2.0 + 0.5;

    let sds: [f32; 3] = gaussians.sds.map(|sd| if sd == 0.0 { 0.001 } else { sd });

    let mut kernel = vec![0f32; len];
    for (i, slot) in kernel.iter_mut().enumerate() {
        let d = (center - (i as f32 - center).abs()).powi(2);
        let mut acc = 0f32;
        for g in 0..3 {
            let w = gaussians.weights[g] / (UNIT_AREA_NORM * sds[g]);
            acc += w * (-d / (2.0 * sds[g] * sds[g])).exp();
        }
        *slot = acc;
    }

    let total: f32 = kernel.iter().sum();
    if total != 0.0 {
        let rescale = scale / total.abs();
        for v in kernel.iter_mut() {
            *v *= rescale;
        }
    }

    kernel
}

/// The row kernel's forward real-to-complex FFT, half spectrum of length
/// `rf/2+1`.
pub fn row_kernel_spectrum(rf: usize, gaussians: &GaussianSum, scale: f32) -> Vec<Complex32> {
    let mut kernel = build_1d_kernel(rf, gaussians, scale);
    let mut planner = RealFftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(rf);
    let mut spectrum = fft.make_output_vec();
    fft.process(&mut kernel, &mut spectrum)
        .expect("row kernel FFT");
    spectrum
}

/// The column kernel's forward complex-to-complex FFT over `cf` full
/// frequency bins (not halved: the column axis is transformed as a
/// general complex sequence against the image's already-complex row
/// spectrum, so the kernel needs the full, conjugate-symmetric spectrum
/// rather than the half-spectrum a direct real FFT would give).
pub fn column_kernel_spectrum(cf: usize, gaussians: &GaussianSum, scale: f32) -> Vec<Complex32> {
    let kernel = build_1d_kernel(cf, gaussians, scale);
    let mut buf: Vec<Complex32> = kernel.into_iter().map(|v| Complex32::new(v, 0.0)).collect();
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(cf);
    fft.process(&mut buf);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sigma_does_not_panic() {
        let g = GaussianSum {
            weights: [1.0, 0.0, 0.0],
            sds: [0.0, 0.0, 0.0],
        };
        let k = build_1d_kernel(16, &g, 1.0);
        assert_eq!(k.len(), 16);
        assert!(k.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn rescaled_kernel_sums_to_scale() {
        let g = GaussianSum {
            weights: [1.0, 0.5, 0.2],
            sds: [1.0, 2.0, 3.0],
        };
        let k = build_1d_kernel(32, &g, 2.5);
        let sum: f32 = k.iter().sum();
        assert!((sum.abs() - 2.5).abs() < 1e-2, "sum={sum}");
    }

    #[test]
    fn row_spectrum_has_half_length() {
        let g = GaussianSum {
            weights: [1.0, 0.0, 0.0],
            sds: [1.0, 1.0, 1.0],
        };
        let spec = row_kernel_spectrum(64, &g, 1.0);
        assert_eq!(spec.len(), 33);
    }

    #[test]
    fn column_spectrum_has_full_length() {
        let g = GaussianSum {
            weights: [1.0, 0.0, 0.0],
            sds: [1.0, 1.0, 1.0],
        };
        let spec = column_kernel_spectrum(64, &g, 1.0);
        assert_eq!(spec.len(), 64);
    }
}
