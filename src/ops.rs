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
//! Per-pixel operators shared by the simulate and correct pipelines. All
//! operate in place over an [`Image`]'s three planes.
use crate::image::Image;
use crate::matrix::Matrix3f;

/// Replace each channel value with `table[round(value)]`. Callers must
/// ensure every channel value already lies in `[0, table.len()-1]`; no
/// index clamping is performed here.
pub fn apply_lut(image: &mut Image, table_r: &[f32], table_g: &[f32], table_b: &[f32]) {
    let (r, g, b) = image.planes_mut();
    for v in r.iter_mut() {
        *v = table_r[(*v + 0.5) as usize];
    }
    for v in g.iter_mut() {
        *v = table_g[(*v + 0.5) as usize];
    }
    for v in b.iter_mut() {
        *v = table_b[(*v + 0.5) as usize];
    }
}

/// Post-multiply 3x3 colour rotation: `r' = r·M[0]+g·M[1]+b·M[2]`, and
/// likewise for `g'`, `b'` from rows 1 and 2 of `m`.
pub fn change_color_space_3(image: &mut Image, m: &Matrix3f) {
    let (r, g, b) = image.planes_mut();
    for i in 0..r.len() {
        let (rv, gv, bv) = (r[i], g[i], b[i]);
        r[i] = rv * m.v[0][0] + gv * m.v[0][1] + bv * m.v[0][2];
        g[i] = rv * m.v[1][0] + gv * m.v[1][1] + bv * m.v[1][2];
        b[i] = rv * m.v[2][0] + gv * m.v[2][1] + bv * m.v[2][2];
    }
}

/// Pre-multiply 4x4 affine transform, `m` flattened column-major so that
/// `m[0..4)` is the row dotted against `r`: `r' = r·m[0]+g·m[4]+b·m[8]+m[12]`.
pub fn change_color_space_4(image: &mut Image, m: &[f32; 16]) {
    let (r, g, b) = image.planes_mut();
    for i in 0..r.len() {
        let (rv, gv, bv) = (r[i], g[i], b[i]);
        r[i] = rv * m[0] + gv * m[4] + bv * m[8] + m[12];
        g[i] = rv * m[1] + gv * m[5] + bv * m[9] + m[13];
        b[i] = rv * m[2] + gv * m[6] + bv * m[10] + m[14];
    }
}

/// Clamp every channel into `[0, max_val]`. Idempotent.
pub fn clip_range(image: &mut Image) {
    let max_val = image.max_val();
    let (r, g, b) = image.planes_mut();
    for v in r.iter_mut().chain(g.iter_mut()).chain(b.iter_mut()) {
        *v = v.clamp(0.0, max_val);
    }
}

/// Per pixel: if any channel exceeds `max_val`, scale all three by
/// `max_val / largest_offender` (preserves hue, reduces luminance). If any
/// channel is negative, translate all three by subtracting the
/// most-negative value (preserves hue without touching the others' sign).
pub fn scale_range(image: &mut Image) {
    let max_val = image.max_val();
    let (r, g, b) = image.planes_mut();
    for i in 0..r.len() {
        let (mut rv, mut gv, mut bv) = (r[i], g[i], b[i]);

        let largest = rv.max(gv).max(bv);
        if largest > max_val {
            let scale = max_val / largest;
            rv *= scale;
            gv *= scale;
            bv *= scale;
        }

        let smallest = rv.min(gv).min(bv);
        if smallest < 0.0 {
            rv -= smallest;
            gv -= smallest;
            bv -= smallest;
        }

        r[i] = rv;
        g[i] = gv;
        b[i] = bv;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rgb::Rgb;

    #[test]
    fn clip_range_is_idempotent() {
        let mut img = Image::new(1, 1);
        img.set(0, 0, Rgb::new(-10.0, 300.0, 128.0));
        clip_range(&mut img);
        let once = img.get(0, 0).unwrap();
        clip_range(&mut img);
        let twice = img.get(0, 0).unwrap();
        assert_eq!(once, twice);
        assert!(once.r >= 0.0 && once.r <= 255.0);
        assert!(once.g >= 0.0 && once.g <= 255.0);
    }

    #[test]
    fn identity_matrix_is_a_no_op() {
        let mut img = Image::new(1, 1);
        img.set(0, 0, Rgb::new(10.0, 20.0, 30.0));
        change_color_space_3(&mut img, &Matrix3f::IDENTITY);
        let px = img.get(0, 0).unwrap();
        assert_eq!(px, Rgb::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn scale_range_preserves_hue_on_overflow() {
        let mut img = Image::new(1, 1);
        img.set(0, 0, Rgb::new(300.0, 150.0, 0.0));
        scale_range(&mut img);
        let px = img.get(0, 0).unwrap();
        assert!((px.r - 255.0).abs() < 1e-3);
        assert!((px.g - 127.5).abs() < 1e-3);
    }
}
