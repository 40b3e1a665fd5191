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
use crate::err::PipelineError;
use crate::matrix::Matrix3f;
use log::debug;
use std::fs;
use std::path::Path;

/// `LMS→OPP`, fixed regardless of device.
pub const LMS_TO_OPP: Matrix3f = Matrix3f {
    v: [
        [0.5, 0.5, 0.0],
        [-0.669, 0.742, -0.027],
        [-0.212, -0.354, 0.911],
    ],
};

/// `OPP→LMS`, fixed regardless of device.
pub const OPP_TO_LMS: Matrix3f = Matrix3f {
    v: [
        [1.04, -0.7108, -0.0211],
        [0.96, 0.7108, 0.0211],
        [0.6151, 0.1108, 1.101],
    ],
};

const CRT_RGB_TO_LMS: Matrix3f = Matrix3f {
    v: [
        [0.05059983, 0.08585369, 0.00952420],
        [0.01893033, 0.08925308, 0.01370054],
        [0.00292202, 0.00975732, 0.07145979],
    ],
};

const CRT_LMS_TO_RGB: Matrix3f = Matrix3f {
    v: [
        [30.830854, -29.832659, 1.610474],
        [-6.481468, 17.715578, -2.532642],
        [-0.375690, -1.199062, 14.273846],
    ],
};

const CRT_GAMMA: (f64, f64, f64) = (2.1, 2.0, 2.1);

const DEFAULT_LUT_LEN: usize = 256;

/// A device-specific colour profile: matrices between RGB, LMS and an
/// opponent space, plus per-channel gamma and inverse-gamma lookup tables.
///
/// Immutable once constructed; a profile is cheap to clone and safe to share
/// across concurrent pipeline invocations.
#[derive(Clone, Debug)]
pub struct DisplayProfile {
    pub rgb_to_lms: Matrix3f,
    pub lms_to_rgb: Matrix3f,
    pub rgb_to_opp: Matrix3f,
    pub opp_to_rgb: Matrix3f,
    pub gamma: [Vec<f32>; 3],
    pub inv_gamma: [Vec<f32>; 3],
}

impl DisplayProfile {
    /// Length `N` of the gamma / inverse-gamma lookup tables.
    pub fn lut_len(&self) -> usize {
        self.gamma[0].len()
    }

    /// Construct the profile for a named device. `"CRT"` is a literal,
    /// analytic built-in; anything else is loaded as a binary profile file
    /// of the same name (optionally with a `.profile` suffix appended).
    pub fn from_name(name: &str) -> Result<Self, PipelineError> {
        if name.eq_ignore_ascii_case("CRT") {
            debug!("loading built-in CRT display profile");
            return Ok(Self::crt());
        }
        let path = Path::new(name);
        if path.is_file() {
            return Self::from_file(path);
        }
        let with_suffix = format!("{name}.profile");
        if Path::new(&with_suffix).is_file() {
            return Self::from_file(&with_suffix);
        }
        Err(PipelineError::UnknownDevice(name.to_string()))
    }

    /// The built-in CRT device: literal matrices and analytic gamma 2.1/2.0/2.1.
    pub fn crt() -> Self {
        let (gamma, inv_gamma) = compute_gamma(DEFAULT_LUT_LEN, CRT_GAMMA.0, CRT_GAMMA.1, CRT_GAMMA.2);
        Self::new(CRT_RGB_TO_LMS, CRT_LMS_TO_RGB, gamma, inv_gamma)
    }

    fn new(
        rgb_to_lms: Matrix3f,
        lms_to_rgb: Matrix3f,
        gamma: [Vec<f32>; 3],
        inv_gamma: [Vec<f32>; 3],
    ) -> Self {
        let rgb_to_opp = LMS_TO_OPP.mat_mul(rgb_to_lms);
        let opp_to_rgb = lms_to_rgb.mat_mul(OPP_TO_LMS);
        Self {
            rgb_to_lms,
            lms_to_rgb,
            rgb_to_opp,
            opp_to_rgb,
            gamma,
            inv_gamma,
        }
    }

    /// Load a binary device profile: 9 floats RGB→LMS, 9 floats LMS→RGB,
    /// 1 float N (rounded to the LUT length), then six runs of N floats —
    /// gammaR, gammaG, gammaB, invGammaR, invGammaG, invGammaB — all
    /// little-endian 32-bit.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|e| PipelineError::BadProfileFile(format!("{}: {e}", path.display())))?;

        let mut floats = bytes.chunks_exact(4).map(|c| {
            let arr: [u8; 4] = c.try_into().unwrap();
            f32::from_le_bytes(arr)
        });

        let read_matrix = |floats: &mut dyn Iterator<Item = f32>| -> Result<Matrix3f, PipelineError> {
            let mut v = [[0f32; 3]; 3];
            for row in v.iter_mut() {
                for cell in row.iter_mut() {
                    *cell = floats
                        .next()
                        .ok_or_else(|| PipelineError::BadProfileFile("truncated matrix".into()))?;
                }
            }
            Ok(Matrix3f { v })
        };

        let rgb_to_lms = read_matrix(&mut floats)?;
        let lms_to_rgb = read_matrix(&mut floats)?;

        let n_raw = floats
            .next()
            .ok_or_else(|| PipelineError::BadProfileFile("missing LUT length".into()))?;
        let n = n_raw.round() as usize;
        if n == 0 {
            return Err(PipelineError::BadProfileFile("zero-length LUT".into()));
        }

        let mut read_run = |floats: &mut dyn Iterator<Item = f32>| -> Result<Vec<f32>, PipelineError> {
            let run: Vec<f32> = floats.by_ref().take(n).collect();
            if run.len() != n {
                return Err(PipelineError::BadProfileFile("truncated LUT run".into()));
            }
            Ok(run)
        };

        let gamma_r = read_run(&mut floats)?;
        let gamma_g = read_run(&mut floats)?;
        let gamma_b = read_run(&mut floats)?;
        let inv_gamma_r = read_run(&mut floats)?;
        let inv_gamma_g = read_run(&mut floats)?;
        let inv_gamma_b = read_run(&mut floats)?;

        Ok(Self::new(
            rgb_to_lms,
            lms_to_rgb,
            [gamma_r, gamma_g, gamma_b],
            [inv_gamma_r, inv_gamma_g, inv_gamma_b],
        ))
    }

    /// Regenerate the gamma / inverse-gamma LUTs for this profile in place.
    pub fn compute_gamma(&mut self, n: usize, gr: f64, gg: f64, gb: f64) {
        let (gamma, inv_gamma) = compute_gamma(n, gr, gg, gb);
        self.gamma = gamma;
        self.inv_gamma = inv_gamma;
    }
}

/// `gamma[i] = (i/(N-1))^γ · (N-1)`, `invGamma[i] = (i/(N-1))^(1/γ) · (N-1)`.
///
/// The `N-1` scale keeps the LUT's output co-domain equal to its input
/// domain, so chained LUT applications (forward then inverse) stay in range.
fn compute_gamma(n: usize, gr: f64, gg: f64, gb: f64) -> ([Vec<f32>; 3], [Vec<f32>; 3]) {
    let scale = (n - 1) as f64;
    let mut build = |gamma: f64| -> (Vec<f32>, Vec<f32>) {
        let mut fwd = Vec::with_capacity(n);
        let mut inv = Vec::with_capacity(n);
        for i in 0..n {
            let val = i as f64 / scale;
            fwd.push((val.powf(gamma) * scale) as f32);
            inv.push((val.powf(1.0 / gamma) * scale) as f32);
        }
        (fwd, inv)
    };
    let (fr, ir) = build(gr);
    let (fg, ig) = build(gg);
    let (fb, ib) = build(gb);
    ([fr, fg, fb], [ir, ig, ib])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crt_round_trips_rgb_lms() {
        let profile = DisplayProfile::crt();
        let identity = profile.rgb_to_lms.mat_mul(profile.lms_to_rgb);
        assert!(identity.test_equality(Matrix3f::IDENTITY));
    }

    #[test]
    fn gamma_round_trips_within_one_lsb() {
        let (gamma, inv_gamma) = compute_gamma(256, 2.2, 2.2, 2.2);
        for i in 0..256usize {
            let g = gamma[0][i].round().clamp(0.0, 255.0) as usize;
            let back = inv_gamma[0][g].round();
            assert!((back - i as f32).abs() <= 1.0, "i={i} back={back}");
        }
    }

    #[test]
    fn unknown_device_errors() {
        let err = DisplayProfile::from_name("Plasma").unwrap_err();
        assert_eq!(err, PipelineError::UnknownDevice("Plasma".to_string()));
    }
}
