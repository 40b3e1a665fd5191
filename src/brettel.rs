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
//! Brettel/Vienot/Mollon (JOSA 14/10, 1997) dichromacy simulation: a
//! piecewise-linear projection in LMS space onto the half-plane a
//! dichromat's two remaining cone classes can represent.
use crate::image::{ColorSpace, Image};
use crate::matrix::Matrix3f;

/// The kind of dichromacy to simulate, or `Normal` for a no-op pass-through.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewerType {
    Normal,
    Deuteranope,
    Protanope,
    Tritanope,
}

impl ViewerType {
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s {
            "n" | "normal" => Some(ViewerType::Normal),
            "d" | "deuteranope" => Some(ViewerType::Deuteranope),
            "p" | "protanope" => Some(ViewerType::Protanope),
            "t" | "tritanope" => Some(ViewerType::Tritanope),
            _ => None,
        }
    }
}

// Anchor LMS values at four spectral loci, per Brettel et al. 1997.
const ANCHOR_475: [f32; 3] = [0.08008, 0.1284, 0.9856];
const ANCHOR_485: [f32; 3] = [0.1579, 0.2237, 0.7325];
const ANCHOR_575: [f32; 3] = [0.5897, 0.3636, 0.001079];
const ANCHOR_660: [f32; 3] = [0.0914, 0.007009, 0.0];

#[inline]
fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Apply the dichromacy projection in place. `image` must already be tagged
/// [`ColorSpace::Lms`]; `rgb_to_lms` is the originating profile's matrix,
/// used to recover the equal-energy neutral point. `ViewerType::Normal` is
/// the exact identity.
pub fn brettel_transform(image: &mut Image, viewer: ViewerType, rgb_to_lms: &Matrix3f) {
    if viewer == ViewerType::Normal {
        return;
    }
    debug_assert_eq!(image.space(), ColorSpace::Lms);

    // Row sums of RGB->LMS: the LMS response to equal-energy white (1,1,1).
    let anchor_e = [
        rgb_to_lms.v[0][0] + rgb_to_lms.v[0][1] + rgb_to_lms.v[0][2],
        rgb_to_lms.v[1][0] + rgb_to_lms.v[1][1] + rgb_to_lms.v[1][2],
        rgb_to_lms.v[2][0] + rgb_to_lms.v[2][1] + rgb_to_lms.v[2][2],
    ];

    let (wing_a, wing_b) = match viewer {
        ViewerType::Deuteranope | ViewerType::Protanope => (ANCHOR_575, ANCHOR_475),
        ViewerType::Tritanope => (ANCHOR_485, ANCHOR_660),
        ViewerType::Normal => unreachable!(),
    };
    let plane1 = cross(anchor_e, wing_a);
    let plane2 = cross(anchor_e, wing_b);
    let (a1, b1, c1) = (plane1[0], plane1[1], plane1[2]);
    let (a2, b2, c2) = (plane2[0], plane2[1], plane2[2]);

    let (planes, image_mut) = (image.len(), image);
    let (r, g, b) = image_mut.planes_mut();
    for i in 0..planes {
        let (l, m, s) = (r[i], g[i], b[i]);
        match viewer {
            ViewerType::Deuteranope => {
                let ratio = s / l;
                let inflection = anchor_e[2] / anchor_e[0];
                let (a, bb, c) = if ratio < inflection {
                    (a1, b1, c1)
                } else {
                    (a2, b2, c2)
                };
                g[i] = -(a * l + c * s) / bb;
            }
            ViewerType::Protanope => {
                let ratio = s / m;
                let inflection = anchor_e[2] / anchor_e[1];
                let (a, bb, c) = if ratio < inflection {
                    (a1, b1, c1)
                } else {
                    (a2, b2, c2)
                };
                r[i] = -(bb * m + c * s) / a;
            }
            ViewerType::Tritanope => {
                let ratio = m / l;
                let inflection = anchor_e[1] / anchor_e[0];
                let (a, bb, c) = if ratio < inflection {
                    (a1, b1, c1)
                } else {
                    (a2, b2, c2)
                };
                b[i] = -(a * l + bb * m) / c;
            }
            ViewerType::Normal => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DisplayProfile;
    use crate::rgb::Rgb;

    #[test]
    fn normal_viewer_is_identity() {
        let profile = DisplayProfile::crt();
        let mut img = Image::new(1, 1);
        img.set(0, 0, Rgb::new(0.3, 0.2, 0.9));
        img.set_space(ColorSpace::Lms);
        let before = img.get(0, 0).unwrap();
        brettel_transform(&mut img, ViewerType::Normal, &profile.rgb_to_lms);
        assert_eq!(img.get(0, 0).unwrap(), before);
    }

    #[test]
    fn deuteranope_leaves_neutral_grey_unchanged() {
        let profile = DisplayProfile::crt();
        let neutral = profile.rgb_to_lms.mul_vector(crate::matrix::Vector3f {
            v: [1.0, 1.0, 1.0],
        });
        let mut img = Image::new(1, 1);
        img.set(0, 0, Rgb::new(neutral.v[0], neutral.v[1], neutral.v[2]));
        img.set_space(ColorSpace::Lms);
        brettel_transform(&mut img, ViewerType::Deuteranope, &profile.rgb_to_lms);
        let after = img.get(0, 0).unwrap();
        assert!((after.g - neutral.v[1]).abs() < 1e-3);
    }
}
