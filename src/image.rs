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
use crate::rgb::Rgb;

/// The colour space the three planes of an [`Image`] currently hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorSpace {
    Rgb,
    Lms,
    Opp,
}

/// Three equal-length planes of 32-bit floats, row-major, one per colour
/// component, plus a value ceiling and a tag naming the space the plane
/// values currently live in.
///
/// An `Image` owns its planes outright; there is no shared backing buffer
/// with offset pointers into it, so dropping an `Image` frees all three at
/// once with nothing left dangling.
#[derive(Clone, Debug)]
pub struct Image {
    width: usize,
    height: usize,
    max_val: f32,
    space: ColorSpace,
    red: Vec<f32>,
    green: Vec<f32>,
    blue: Vec<f32>,
}

impl Image {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_max_val(width, height, 255.0)
    }

    pub fn with_max_val(width: usize, height: usize, max_val: f32) -> Self {
        let n = width * height;
        Self {
            width,
            height,
            max_val,
            space: ColorSpace::Rgb,
            red: vec![0.0; n],
            green: vec![0.0; n],
            blue: vec![0.0; n],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_val(&self) -> f32 {
        self.max_val
    }

    pub fn space(&self) -> ColorSpace {
        self.space
    }

    pub fn set_space(&mut self, space: ColorSpace) {
        self.space = space;
    }

    pub fn red(&self) -> &[f32] {
        &self.red
    }

    pub fn green(&self) -> &[f32] {
        &self.green
    }

    pub fn blue(&self) -> &[f32] {
        &self.blue
    }

    pub fn planes_mut(&mut self) -> (&mut [f32], &mut [f32], &mut [f32]) {
        (&mut self.red, &mut self.green, &mut self.blue)
    }

    /// Bounds-checked read of one pixel's three components.
    pub fn get(&self, row: usize, col: usize) -> Option<Rgb<f32>> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let idx = row * self.width + col;
        Some(Rgb::new(self.red[idx], self.green[idx], self.blue[idx]))
    }

    /// Bounds-checked write of one pixel's three components.
    pub fn set(&mut self, row: usize, col: usize, value: Rgb<f32>) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        let idx = row * self.width + col;
        self.red[idx] = value.r;
        self.green[idx] = value.g;
        self.blue[idx] = value.b;
        true
    }

    /// Interpret `src` as interleaved `RGBRGB…` 8-bit bytes of length
    /// `width*height*3` and store each channel as a float, divided by
    /// `scale` (pass `1.0` for no scaling).
    pub fn assign_bytes(&mut self, src: &[u8], scale: f32) {
        debug_assert_eq!(src.len(), self.len() * 3);
        for (i, chunk) in src.chunks_exact(3).enumerate() {
            self.red[i] = chunk[0] as f32 / scale;
            self.green[i] = chunk[1] as f32 / scale;
            self.blue[i] = chunk[2] as f32 / scale;
        }
        self.space = ColorSpace::Rgb;
    }

    /// Inverse of [`Image::assign_bytes`]: `dst[3i+c] = round(plane[c][i] * scale)`
    /// clamped to `[0, 255]`. Values are expected to already lie in range by
    /// virtue of a prior [`crate::ops::clip_range`] call.
    pub fn extract_bytes(&self, dst: &mut [u8], scale: f32) {
        debug_assert_eq!(dst.len(), self.len() * 3);
        for i in 0..self.len() {
            let r = (self.red[i] * scale + 0.5).floor().clamp(0.0, 255.0) as u8;
            let g = (self.green[i] * scale + 0.5).floor().clamp(0.0, 255.0) as u8;
            let b = (self.blue[i] * scale + 0.5).floor().clamp(0.0, 255.0) as u8;
            dst[i * 3] = r;
            dst[i * 3 + 1] = g;
            dst[i * 3 + 2] = b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_then_extract_round_trips() {
        let mut img = Image::new(2, 2);
        let src = [10u8, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120];
        img.assign_bytes(&src, 1.0);
        let mut dst = vec![0u8; src.len()];
        img.extract_bytes(&mut dst, 1.0);
        assert_eq!(src.to_vec(), dst);
    }

    #[test]
    fn out_of_bounds_access_returns_none() {
        let img = Image::new(2, 2);
        assert!(img.get(5, 5).is_none());
    }
}
