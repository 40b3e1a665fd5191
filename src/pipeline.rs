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
//! Assembles the display profile, colour-space, dichromacy and spatial
//! filtering stages into the two end-to-end operations the front end
//! exposes: simulating a dichromat's view, and pre-correcting an image so
//! a dichromat can better discriminate it.
use crate::brettel::{self, ViewerType};
use crate::err::PipelineError;
use crate::daltonize::{self, DaltonizeParams};
use crate::fft::{self, FftPlan};
use crate::image::{ColorSpace, Image};
use crate::kernel::GaussianSum;
use crate::ops;
use crate::profile::{DisplayProfile, LMS_TO_OPP};
use log::debug;
use std::f32::consts::PI;

/// Per-channel sum-of-three-Gaussians weights, standard deviations (in
/// pixels, before the samples-per-degree scaling) and an overall scale,
/// laid out `[ch0_g0, ch0_g1, ch0_g2, ch1_g0, ...]`.
#[derive(Copy, Clone, Debug)]
pub struct KernelSpec {
    pub weights: [f32; 9],
    pub sds: [f32; 9],
    pub scales: [f32; 3],
}

impl KernelSpec {
    fn gaussian_sum(&self, channel: usize) -> GaussianSum {
        let base = channel * 3;
        GaussianSum {
            weights: [
                self.weights[base],
                self.weights[base + 1],
                self.weights[base + 2],
            ],
            sds: [self.sds[base], self.sds[base + 1], self.sds[base + 2]],
        }
    }
}

/// Default kernel parameters used when the front end doesn't override them.
pub const DEFAULT_KERNEL_WEIGHTS: [f32; 9] = [
    0.9207, 0.105, -0.108, 0.5310, 0.33, 0.0, 0.4877, 0.3711, 0.0,
];
pub const DEFAULT_KERNEL_SDS: [f32; 9] = [
    0.01, 0.05, 1.5, 0.015, 0.18, 0.5, 0.02, 0.14, 0.0,
];
pub const DEFAULT_KERNEL_SCALES: [f32; 3] = [1.0, 1.0, 1.0];

/// Parameters for [`simulate`].
pub struct SimulateParams<'a> {
    pub width: usize,
    pub height: usize,
    pub view_dist: f32,
    pub dpi: f32,
    pub sensor_type: ViewerType,
    pub sim_disp: &'a str,
    pub view_disp: &'a str,
    pub kernel: KernelSpec,
}

/// Parameters for [`correct`].
pub struct CorrectParams<'a> {
    pub width: usize,
    pub height: usize,
    pub sim_disp: &'a str,
    pub view_disp: &'a str,
    pub daltonize: DaltonizeParams,
}

/// Move `image` (currently tagged [`ColorSpace::Rgb`]) into [`ColorSpace::Lms`]
/// via `profile`'s forward matrix.
fn to_lms(image: &mut Image, profile: &DisplayProfile) {
    ops::change_color_space_3(image, &profile.rgb_to_lms);
    image.set_space(ColorSpace::Lms);
}

/// Move `image` into [`ColorSpace::Opp`] from whatever space it currently
/// holds (`Rgb` or `Lms`).
fn to_opp(image: &mut Image, profile: &DisplayProfile) {
    match image.space() {
        ColorSpace::Rgb => ops::change_color_space_3(image, &profile.rgb_to_opp),
        ColorSpace::Lms => ops::change_color_space_3(image, &LMS_TO_OPP),
        ColorSpace::Opp => return,
    }
    image.set_space(ColorSpace::Opp);
}

/// Move `image` back to [`ColorSpace::Rgb`] using the matrix appropriate to
/// its current tag. A no-op if already RGB.
fn to_rgb(image: &mut Image, profile: &DisplayProfile) {
    match image.space() {
        ColorSpace::Rgb => {}
        ColorSpace::Lms => {
            ops::change_color_space_3(image, &profile.lms_to_rgb);
            image.set_space(ColorSpace::Rgb);
        }
        ColorSpace::Opp => {
            ops::change_color_space_3(image, &profile.opp_to_rgb);
            image.set_space(ColorSpace::Rgb);
        }
    }
}

/// Simulate how `bytes` (interleaved 8-bit `RGBRGB…`, `width*height*3` long)
/// would appear to a viewer with the given dichromacy, optionally also
/// modelling the spatial contrast sensitivity of the human eye at a given
/// viewing distance and display resolution.
pub fn simulate(bytes: &[u8], params: &SimulateParams) -> Result<Vec<u8>, PipelineError> {
    let sim_profile = DisplayProfile::from_name(params.sim_disp)?;
    let view_profile = DisplayProfile::from_name(params.view_disp)?;

    let lut_max = (sim_profile.lut_len() - 1) as f32;
    let mut image = Image::with_max_val(params.width, params.height, lut_max);
    image.assign_bytes(bytes, 255.0 / lut_max);

    ops::apply_lut(
        &mut image,
        &sim_profile.gamma[0],
        &sim_profile.gamma[1],
        &sim_profile.gamma[2],
    );

    let has_spatial_filter = params.view_dist > 0.0 && params.dpi > 0.0;
    let displays_differ = !params.sim_disp.eq_ignore_ascii_case(params.view_disp);

    if params.sensor_type != ViewerType::Normal {
        to_lms(&mut image, &sim_profile);
        brettel::brettel_transform(&mut image, params.sensor_type, &sim_profile.rgb_to_lms);
    } else if displays_differ && !has_spatial_filter {
        to_lms(&mut image, &sim_profile);
    }

    if has_spatial_filter {
        let samp_per_deg = params.view_dist * (PI / 180.0) * params.dpi;
        debug!("spatial filter: {samp_per_deg} samples/degree");
        to_opp(&mut image, &sim_profile);

        let rf = fft::padded_size(image.height());
        let cf = fft::padded_size(image.width());
        let plan = FftPlan::new(rf, cf)?;

        let mut row_specs = [Vec::new(), Vec::new(), Vec::new()];
        let mut col_specs = [Vec::new(), Vec::new(), Vec::new()];
        for c in 0..3 {
            let gaussians = params.kernel.gaussian_sum(c).scaled(samp_per_deg);
            row_specs[c] = crate::kernel::row_kernel_spectrum(rf, &gaussians, params.kernel.scales[c]);
            col_specs[c] = crate::kernel::column_kernel_spectrum(cf, &gaussians, params.kernel.scales[c]);
        }

        fft::filter_image(&plan, &mut image, &row_specs, &col_specs);
    }

    to_rgb(&mut image, &view_profile);
    ops::clip_range(&mut image);
    ops::apply_lut(
        &mut image,
        &view_profile.inv_gamma[0],
        &view_profile.inv_gamma[1],
        &view_profile.inv_gamma[2],
    );

    let view_lut_max = (view_profile.lut_len() - 1) as f32;
    let mut out = vec![0u8; bytes.len()];
    image.extract_bytes(&mut out, 255.0 / view_lut_max);
    Ok(out)
}

/// Pre-correct `bytes` (interleaved 8-bit `RGBRGB…`) so that a dichromatic
/// viewer can better discriminate colours the daltonize transform injects
/// from the L-M axis onto the L+M and S axes.
pub fn correct(bytes: &[u8], params: &CorrectParams) -> Result<Vec<u8>, PipelineError> {
    let sim_profile = DisplayProfile::from_name(params.sim_disp)?;
    let view_profile = DisplayProfile::from_name(params.view_disp)?;

    let lut_max = (sim_profile.lut_len() - 1) as f32;
    let mut image = Image::with_max_val(params.width, params.height, lut_max);
    image.assign_bytes(bytes, 255.0 / lut_max);

    ops::apply_lut(
        &mut image,
        &sim_profile.gamma[0],
        &sim_profile.gamma[1],
        &sim_profile.gamma[2],
    );

    to_opp(&mut image, &sim_profile);
    let matrix = daltonize::build(
        &image,
        params.daltonize,
        &sim_profile.rgb_to_opp,
        &sim_profile.opp_to_rgb,
    );
    ops::change_color_space_4(&mut image, &matrix);

    to_rgb(&mut image, &view_profile);
    ops::clip_range(&mut image);
    ops::apply_lut(
        &mut image,
        &view_profile.inv_gamma[0],
        &view_profile.inv_gamma[1],
        &view_profile.inv_gamma[2],
    );

    let view_lut_max = (view_profile.lut_len() - 1) as f32;
    let mut out = vec![0u8; bytes.len()];
    image.extract_bytes(&mut out, 255.0 / view_lut_max);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_kernel() -> KernelSpec {
        KernelSpec {
            weights: DEFAULT_KERNEL_WEIGHTS,
            sds: DEFAULT_KERNEL_SDS,
            scales: DEFAULT_KERNEL_SCALES,
        }
    }

    #[test]
    fn identity_scenario_round_trips_solid_red() {
        let bytes = vec![255u8, 0, 0, 255, 0, 0, 255, 0, 0, 255, 0, 0];
        let params = SimulateParams {
            width: 2,
            height: 2,
            view_dist: 0.0,
            dpi: 0.0,
            sensor_type: ViewerType::Normal,
            sim_disp: "CRT",
            view_disp: "CRT",
            kernel: default_kernel(),
        };
        let out = simulate(&bytes, &params).unwrap();
        for chunk in out.chunks_exact(3) {
            assert_eq!(chunk, &[255, 0, 0]);
        }
    }

    #[test]
    fn protanope_red_is_pulled_away_from_pure_red() {
        let bytes = vec![255u8, 0, 0];
        let params = SimulateParams {
            width: 1,
            height: 1,
            view_dist: 0.0,
            dpi: 0.0,
            sensor_type: ViewerType::Protanope,
            sim_disp: "CRT",
            view_disp: "CRT",
            kernel: default_kernel(),
        };
        let out = simulate(&bytes, &params).unwrap();
        assert!(out[0] < 255);
    }

    #[test]
    fn daltonize_zero_knobs_is_near_identity() {
        let bytes = vec![10u8, 20, 200, 30, 40, 210];
        let params = CorrectParams {
            width: 2,
            height: 1,
            sim_disp: "CRT",
            view_disp: "CRT",
            daltonize: DaltonizeParams {
                lm_stretch: 1.0,
                lum_scale: 0.0,
                s_scale: 0.0,
            },
        };
        let out = correct(&bytes, &params).unwrap();
        for (a, b) in bytes.iter().zip(out.iter()) {
            assert!((*a as i16 - *b as i16).abs() <= 1, "{a} vs {b}");
        }
    }

    #[test]
    fn unknown_device_is_rejected() {
        let bytes = vec![0u8; 3];
        let params = SimulateParams {
            width: 1,
            height: 1,
            view_dist: 0.0,
            dpi: 0.0,
            sensor_type: ViewerType::Normal,
            sim_disp: "Plasma",
            view_disp: "CRT",
            kernel: default_kernel(),
        };
        let err = simulate(&bytes, &params).unwrap_err();
        assert_eq!(err, PipelineError::UnknownDevice("Plasma".to_string()));
    }
}
