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
//! Command-line front end: reads bytes off standard input in one of three
//! wire formats, runs the simulate or correct pipeline, writes the result
//! back out in the same format. File I/O and byte marshalling live here;
//! the library never touches stdio.
use anyhow::{Context, Result, bail};
use clap::Parser;
use dichroma::{
    CorrectParams, DEFAULT_KERNEL_SCALES, DEFAULT_KERNEL_SDS, DEFAULT_KERNEL_WEIGHTS,
    DaltonizeParams, KernelSpec, SimulateParams, ViewerType, correct, simulate,
};
use std::io::{Read, Write};
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum WireFormat {
    /// Raw interleaved W*H*3 bytes.
    #[value(name = "raw")]
    Raw,
    /// Two hex digits per byte, no separators.
    #[value(name = "hex")]
    Hex,
    /// Three space-separated hex bytes per line, one pixel per line.
    #[value(name = "table")]
    Table,
}

/// Simulate dichromacy or pre-correct an image read from standard input.
#[derive(Parser, Debug)]
#[command(name = "dichroma", version, about)]
struct Args {
    /// Print progress to standard error.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Apply the daltonize pre-correction instead of simulating a viewer.
    #[arg(short = 'a', long)]
    apply: bool,

    /// L-M stretch knob in [0,1], rescaled internally to 2*s+1.
    #[arg(short = 's', long, default_value_t = 0.0)]
    lm_stretch: f32,

    /// Luminance-axis injection knob in [0,1].
    #[arg(short = 'l', long, default_value_t = 0.0)]
    lum_scale: f32,

    /// S-axis injection knob in [0,1].
    #[arg(short = 'y', long, default_value_t = 0.0)]
    s_scale: f32,

    /// Input/output wire format.
    #[arg(short = 'f', long, value_enum, default_value_t = WireFormat::Raw)]
    format: WireFormat,

    /// Image dimensions "W,H".
    #[arg(short = 'm', long, value_delimiter = ',', num_args = 2)]
    dims: Vec<usize>,

    /// Dichromacy type to simulate: normal|deuteranope|protanope|tritanope.
    #[arg(short = 't', long, default_value = "normal")]
    sensor_type: String,

    /// Simulated display device ("CRT" or a profile file path).
    #[arg(short = 'S', long, default_value = "CRT")]
    sim_disp: String,

    /// Viewer's display device ("CRT" or a profile file path).
    #[arg(short = 'V', long, default_value = "CRT")]
    view_disp: String,

    /// Viewing distance in inches; <= 0 disables the spatial filter.
    #[arg(short = 'd', long, default_value_t = 0.0)]
    view_dist: f32,

    /// Display resolution in dots per inch; <= 0 disables the spatial filter.
    #[arg(short = 'r', long, default_value_t = 0.0)]
    dpi: f32,

    /// Nine Gaussian weights, three per opponent channel: "w0,...,w8".
    #[arg(short = 'W', long, value_delimiter = ',', num_args = 9)]
    kernel_weights: Vec<f32>,

    /// Nine Gaussian standard deviations, three per channel: "s0,...,s8".
    #[arg(short = 'D', long, value_delimiter = ',', num_args = 9)]
    kernel_sds: Vec<f32>,

    /// Per-channel kernel scale: "cLum,cLM,cS".
    #[arg(short = 'C', long, value_delimiter = ',', num_args = 3)]
    kernel_scales: Vec<f32>,
}

fn read_input(format: WireFormat, width: usize, height: usize) -> Result<Vec<u8>> {
    let expected = width * height * 3;
    let mut raw_in = String::new();
    match format {
        WireFormat::Raw => {
            let mut buf = Vec::with_capacity(expected);
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("reading raw bytes from stdin")?;
            Ok(buf)
        }
        WireFormat::Hex => {
            std::io::stdin()
                .read_to_string(&mut raw_in)
                .context("reading hex from stdin")?;
            decode_hex(raw_in.trim())
        }
        WireFormat::Table => {
            std::io::stdin()
                .read_to_string(&mut raw_in)
                .context("reading colour table from stdin")?;
            let mut out = Vec::with_capacity(expected);
            for line in raw_in.lines() {
                for field in line.split_whitespace() {
                    out.push(
                        u8::from_str_radix(field, 16)
                            .with_context(|| format!("invalid colour-table byte {field:?}"))?,
                    );
                }
            }
            Ok(out)
        }
    }
}

fn decode_hex(s: &str) -> Result<Vec<u8>> {
    if s.len() % 2 != 0 {
        bail!("hex input has an odd number of digits");
    }
    let mut out = Vec::with_capacity(s.len() / 2);
    let bytes = s.as_bytes();
    for chunk in bytes.chunks_exact(2) {
        let hi = (chunk[0] as char).to_digit(16).context("invalid hex digit")?;
        let lo = (chunk[1] as char).to_digit(16).context("invalid hex digit")?;
        out.push(((hi << 4) | lo) as u8);
    }
    Ok(out)
}

fn write_output(format: WireFormat, width: usize, bytes: &[u8]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    match format {
        WireFormat::Raw => {
            lock.write_all(bytes).context("writing raw bytes to stdout")?;
        }
        WireFormat::Hex => {
            let mut s = String::with_capacity(bytes.len() * 2);
            for b in bytes {
                s.push_str(&format!("{b:02x}"));
            }
            writeln!(lock, "{s}")?;
        }
        WireFormat::Table => {
            for row in bytes.chunks(width * 3) {
                let line: Vec<String> = row.iter().map(|b| format!("{b:02x}")).collect();
                writeln!(lock, "{}", line.join(" "))?;
            }
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    if args.verbose {
        unsafe {
            std::env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::try_init().ok();

    let (width, height) = match args.dims.as_slice() {
        [w, h] => (*w, *h),
        _ => bail!("-m W,H is required"),
    };

    let sensor_type = ViewerType::from_str_loose(&args.sensor_type)
        .with_context(|| format!("unrecognised dichromacy type {:?}", args.sensor_type))?;

    let kernel = KernelSpec {
        weights: args
            .kernel_weights
            .try_into()
            .unwrap_or(DEFAULT_KERNEL_WEIGHTS),
        sds: args.kernel_sds.try_into().unwrap_or(DEFAULT_KERNEL_SDS),
        scales: args
            .kernel_scales
            .try_into()
            .unwrap_or(DEFAULT_KERNEL_SCALES),
    };

    let input = read_input(args.format, width, height)?;
    if input.len() != width * height * 3 {
        bail!(
            "expected {} bytes for a {width}x{height} image, got {}",
            width * height * 3,
            input.len()
        );
    }

    let output = if args.apply {
        correct(
            &input,
            &CorrectParams {
                width,
                height,
                sim_disp: &args.sim_disp,
                view_disp: &args.view_disp,
                daltonize: DaltonizeParams {
                    lm_stretch: 2.0 * args.lm_stretch + 1.0,
                    lum_scale: args.lum_scale,
                    s_scale: args.s_scale,
                },
            },
        )
    } else {
        simulate(
            &input,
            &SimulateParams {
                width,
                height,
                view_dist: args.view_dist,
                dpi: args.dpi,
                sensor_type,
                sim_disp: &args.sim_disp,
                view_disp: &args.view_disp,
                kernel,
            },
        )
    }
    .context("pipeline failed")?;

    write_output(args.format, width, &output)
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dichroma: {e:#}");
            ExitCode::FAILURE
        }
    }
}
