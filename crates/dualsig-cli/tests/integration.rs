//! Integration tests for dualsig-cli.
//!
//! Tests invoke the built binary against WAV fixtures written to a temporary
//! directory. Every invocation passes `--config` so the user's own defaults
//! file never leaks into the results.

use dualsig_core::Signal;
use dualsig_io::{read_wav, write_wav};
use ndarray::Array2;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to get the path to the `dualsig` binary built by cargo.
fn dualsig_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dualsig"))
}

struct Fixture {
    dir: TempDir,
    config: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("defaults.toml");
        std::fs::write(
            &config,
            "sample_rate = 8000\nfreq_min = 100.0\nfreq_max = 3000.0\ncomment = \"cli test\"\n",
        )
        .unwrap();
        Self { dir, config }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, signal: &Signal) -> PathBuf {
        let path = self.path(name);
        write_wav(&path, signal, 32).unwrap();
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        dualsig_bin()
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .output()
            .expect("failed to run dualsig")
    }
}

fn impulse(len: usize, at: usize, gain: f64) -> Signal {
    let mut v = vec![0.0; len];
    v[at] = gain;
    Signal::from_mono(v, 8000).unwrap()
}

fn samples(path: &Path) -> Vec<f64> {
    read_wav(path).unwrap().time_samples().iter().copied().collect()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// `dualsig info`
// ---------------------------------------------------------------------------

#[test]
fn cli_info_shows_header_and_summary() {
    let fx = Fixture::new();
    let file = fx.write("ir.wav", &impulse(512, 0, 1.0));

    let output = fx.run(&["info", file.to_str().unwrap()]);
    assert!(output.status.success(), "dualsig info failed: {output:?}");

    let out = stdout(&output);
    assert!(out.contains("IEEE Float 32-bit"), "got: {out}");
    assert!(out.contains("Sample Rate: 8000 Hz"), "got: {out}");
    assert!(out.contains("Samples:     512"), "got: {out}");
    assert!(out.contains("FFT Degree:  9.00"), "got: {out}");
    assert!(out.contains("Comment:     cli test"), "got: {out}");
}

#[test]
fn cli_info_missing_file_fails() {
    let fx = Fixture::new();
    let output = fx.run(&["info", fx.path("absent.wav").to_str().unwrap()]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `dualsig divide`
// ---------------------------------------------------------------------------

#[test]
fn cli_divide_recovers_impulse_response() {
    let fx = Fixture::new();
    let excitation = fx.write("exc.wav", &impulse(256, 0, 1.0));
    let response = fx.write("resp.wav", &impulse(256, 5, 0.5));
    let out = fx.path("h.wav");
    let frd = fx.path("h.frd");

    let output = fx.run(&[
        "divide",
        response.to_str().unwrap(),
        excitation.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--frd",
        frd.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "dualsig divide failed: {output:?}");
    assert!(stdout(&output).contains("1 channel(s), 256 bins"));

    let h = samples(&out);
    assert!((h[5] - 0.5).abs() < 1e-6);
    assert!(h[0].abs() < 1e-6);

    let text = std::fs::read_to_string(&frd).unwrap();
    let data_lines = text.lines().filter(|l| !l.starts_with('*')).count();
    assert_eq!(data_lines, 129);
}

#[test]
fn cli_divide_smoothed_band_report() {
    let fx = Fixture::new();
    // 80 samples at 8 kHz: 100 Hz bins, tone on bin 1
    let tone: Vec<f64> = (0..80)
        .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 80.0).cos())
        .collect();
    let response = fx.write("tone.wav", &Signal::from_mono(tone, 8000).unwrap());
    let excitation = fx.write("exc.wav", &impulse(80, 0, 1.0));
    let out = fx.path("h.wav");

    let divide_args = |extra: &[&str]| {
        let mut args = vec![
            "divide",
            response.to_str().unwrap(),
            excitation.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ];
        args.extend_from_slice(extra);
        fx.run(&args)
    };

    let raw = divide_args(&[]);
    assert!(raw.status.success(), "dualsig divide failed: {raw:?}");
    assert!(stdout(&raw).contains("|H(100 Hz)| = 32.04 dB"), "got: {}", stdout(&raw));

    // The 40x peak is shared with its two empty neighbours
    let smoothed = divide_args(&["--smooth", "3"]);
    assert!(smoothed.status.success(), "dualsig divide failed: {smoothed:?}");
    let text = stdout(&smoothed);
    assert!(text.contains("smoothed over 3 bins"), "got: {text}");
    assert!(text.contains("|H(100 Hz)| = 22.50 dB"), "got: {text}");
}

#[test]
fn cli_divide_bad_channel_fails() {
    let fx = Fixture::new();
    let a = fx.write("a.wav", &impulse(64, 0, 1.0));
    let out = fx.path("h.wav");

    let output = fx.run(&[
        "divide",
        a.to_str().unwrap(),
        a.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--channel",
        "3",
    ]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `dualsig add` / `dualsig sub`
// ---------------------------------------------------------------------------

#[test]
fn cli_add_two_files() {
    let fx = Fixture::new();
    let a = fx.write("a.wav", &impulse(32, 0, 0.25));
    let b = fx.write("b.wav", &impulse(32, 1, 0.5));
    let out = fx.path("sum.wav");

    let output = fx.run(&[
        "add",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "dualsig add failed: {output:?}");

    let sum = samples(&out);
    assert!((sum[0] - 0.25).abs() < 1e-6);
    assert!((sum[1] - 0.5).abs() < 1e-6);
}

#[test]
fn cli_sub_constant() {
    let fx = Fixture::new();
    let a = fx.write("a.wav", &impulse(16, 2, 0.75));
    let out = fx.path("diff.wav");

    let output = fx.run(&[
        "sub",
        a.to_str().unwrap(),
        "0.25",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "dualsig sub failed: {output:?}");

    let diff = samples(&out);
    assert!((diff[0] + 0.25).abs() < 1e-6);
    assert!((diff[2] - 0.5).abs() < 1e-6);
}

#[test]
fn cli_add_length_mismatch_fails() {
    let fx = Fixture::new();
    let a = fx.write("a.wav", &impulse(32, 0, 1.0));
    let b = fx.write("b.wav", &impulse(16, 0, 1.0));

    let output = fx.run(&[
        "add",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "-o",
        fx.path("sum.wav").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("32") && stderr.contains("16"), "got: {stderr}");
}

// ---------------------------------------------------------------------------
// `dualsig mean`
// ---------------------------------------------------------------------------

#[test]
fn cli_mean_averages_channels() {
    let fx = Fixture::new();
    let data = Array2::from_shape_fn((8, 2), |(_, c)| if c == 0 { 0.2 } else { 0.6 });
    let stereo = fx.write("stereo.wav", &Signal::from_time(data, 8000).unwrap());
    let out = fx.path("mono.wav");

    let output = fx.run(&["mean", stereo.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert!(output.status.success(), "dualsig mean failed: {output:?}");

    let mono = read_wav(&out).unwrap();
    assert_eq!(mono.num_channels(), 1);
    for s in mono.time_samples().iter() {
        assert!((s - 0.4).abs() < 1e-6);
    }
}

// ---------------------------------------------------------------------------
// `dualsig defaults`
// ---------------------------------------------------------------------------

#[test]
fn cli_defaults_prints_effective_values() {
    let fx = Fixture::new();
    let output = fx.run(&["defaults"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("sample_rate = 8000"), "got: {out}");
    assert!(out.contains("defaults.toml"), "got: {out}");
}

#[test]
fn cli_defaults_init_refuses_overwrite() {
    let fx = Fixture::new();
    let output = fx.run(&["defaults", "--init"]);
    assert!(!output.status.success());

    let output = fx.run(&["defaults", "--init", "--force"]);
    assert!(output.status.success());
    let text = std::fs::read_to_string(&fx.config).unwrap();
    assert!(text.contains("sample_rate = 44100"), "got: {text}");
}

#[test]
fn cli_invalid_config_fails() {
    let fx = Fixture::new();
    std::fs::write(&fx.config, "freq_min = 5000.0\nfreq_max = 100.0\n").unwrap();
    let a = fx.write("a.wav", &impulse(8, 0, 1.0));

    let output = fx.run(&["info", a.to_str().unwrap()]);
    assert!(!output.status.success());
}
