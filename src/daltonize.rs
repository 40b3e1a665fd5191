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
//! Builds the Daltonize pre-correction matrix: a 4x4 affine transform in
//! opponent space, derived from image statistics, conjugated back into RGB.
use crate::image::{ColorSpace, Image};
use crate::matrix::Matrix4f;

/// Knobs controlling the daltonize transform. `lum_scale` and `s_scale` are
/// the raw user values, expected in `[0, 1]`. `lm_stretch` must already be
/// rescaled by the caller from the raw `[0, 1]` knob to `2*raw + 1`, so that
/// a raw value of `0` (no stretch) yields a stretch factor of exactly `1`.
#[derive(Copy, Clone, Debug)]
pub struct DaltonizeParams {
    pub lm_stretch: f32,
    pub lum_scale: f32,
    pub s_scale: f32,
}

/// Per-plane mean and population variance, via the naive two-pass estimator.
fn mean_variance(plane: &[f32]) -> (f32, f32) {
    let n = plane.len() as f32;
    let mean = plane.iter().sum::<f32>() / n;
    let var = plane.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / n;
    (mean, var)
}

/// Compute the 4x4 RGB-space daltonize transform for an image currently
/// tagged [`ColorSpace::Opp`]. Apply the result via
/// [`crate::ops::change_color_space_4`].
pub fn build(
    image: &Image,
    params: DaltonizeParams,
    rgb_to_opp: &crate::matrix::Matrix3f,
    opp_to_rgb: &crate::matrix::Matrix3f,
) -> [f32; 16] {
    debug_assert_eq!(image.space(), ColorSpace::Opp);

    let (mean0, var0) = mean_variance(image.red());
    let (mean1, _var1) = mean_variance(image.green());
    let (_mean2, var2) = mean_variance(image.blue());

    let amount_to_lm = -params.lum_scale * 50.0 / (var0 + 1.0);
    let amount_to_s = -params.s_scale * 20.0 / (var2 + 1.0);

    let mut stretch = Matrix4f::IDENTITY;
    stretch.v[1] = [
        amount_to_lm,
        (params.lm_stretch - 1.0) / 4.0 + 1.0,
        amount_to_s,
        0.0,
    ];

    let mut mean = Matrix4f::IDENTITY;
    mean.v[3][1] = -mean1;

    let mut mean_inv = Matrix4f::IDENTITY;
    mean_inv.v[3][1] = mean1;

    let opp_transform = mean_inv.mat_mul(stretch).mat_mul(mean);

    let rgb_to_opp_4 = rgb_to_opp.to_affine();
    let opp_to_rgb_4 = opp_to_rgb.to_affine();

    let rgb_transform = rgb_to_opp_4.mat_mul(opp_transform).mat_mul(opp_to_rgb_4);
    rgb_transform.to_pre_multiply_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DisplayProfile;
    use crate::rgb::Rgb;

    #[test]
    fn zero_knobs_are_near_identity() {
        let profile = DisplayProfile::crt();
        let mut img = Image::new(4, 4);
        for row in 0..4 {
            for col in 0..4 {
                img.set(row, col, Rgb::new(10.0 + row as f32, 20.0, 200.0));
            }
        }
        img.set_space(ColorSpace::Opp);
        let params = DaltonizeParams {
            lm_stretch: 1.0, // rescaled from raw 0.0 via 2*0+1
            lum_scale: 0.0,
            s_scale: 0.0,
        };
        let m = build(&img, params, &profile.rgb_to_opp, &profile.opp_to_rgb);
        let identity = Matrix4f::IDENTITY.to_pre_multiply_array();
        for i in 0..16 {
            assert!((m[i] - identity[i]).abs() < 1e-2, "index {i}: {} vs {}", m[i], identity[i]);
        }
    }
}
