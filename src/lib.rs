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
#![allow(clippy::manual_clamp, clippy::excessive_precision)]
#![deny(unreachable_pub)]
mod brettel;
mod daltonize;
mod err;
mod fft;
mod image;
mod kernel;
mod matrix;
mod mlaf;
mod ops;
mod pipeline;
mod profile;
mod rgb;

pub use brettel::{ViewerType, brettel_transform};
pub use daltonize::{DaltonizeParams, build as build_daltonize_matrix};
pub use err::PipelineError;
pub use fft::{FftPlan, Spectrum, filter_image, good_fft_size, padded_size};
pub use image::{ColorSpace, Image};
pub use kernel::{GaussianSum, build_1d_kernel, column_kernel_spectrum, row_kernel_spectrum};
pub use matrix::{Matrix3f, Matrix4f, Vector3, Vector3f};
pub use ops::{apply_lut, change_color_space_3, change_color_space_4, clip_range, scale_range};
pub use pipeline::{
    CorrectParams, DEFAULT_KERNEL_SCALES, DEFAULT_KERNEL_SDS, DEFAULT_KERNEL_WEIGHTS, KernelSpec,
    SimulateParams, correct, simulate,
};
pub use profile::{DisplayProfile, LMS_TO_OPP, OPP_TO_LMS};
pub use rgb::Rgb;
