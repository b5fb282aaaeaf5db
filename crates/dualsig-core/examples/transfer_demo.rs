//! Transfer function demo: divide a response by its excitation.
//!
//! Run with: cargo run -p dualsig-core --example transfer_demo

use dualsig_core::{Signal, magnitude_at};
use ndarray::Array2;
use std::f64::consts::PI;

fn main() {
    let sample_rate = 48000;
    let n = 4800;

    // --- Excitation: sum of tones on exact bins ---
    println!("=== Excitation ===\n");
    let tones = [100.0, 1000.0, 5000.0];
    let excitation: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64 / f64::from(sample_rate);
            tones.iter().map(|f| (2.0 * PI * f * t).sin()).sum::<f64>() / 3.0
        })
        .collect();
    let x = Signal::from_mono(excitation.clone(), sample_rate)
        .expect("excitation")
        .with_comment("three-tone excitation");
    println!("{x}\n");

    // --- Two "microphones": one flat at -6 dB, one delayed by 10 samples ---
    println!("=== Recording (2 channels) ===\n");
    let recording = Array2::from_shape_fn((n, 2), |(i, c)| match c {
        0 => 0.5 * excitation[i],
        _ => excitation[(i + n - 10) % n],
    });
    let y = Signal::from_time(recording, sample_rate).expect("recording");
    println!("{y}\n");

    // --- Transfer function, one per channel ---
    println!("=== Transfer Function ===\n");
    let h = (&y / &x).expect("division");
    println!("Channels: {}", h.num_channels());

    for channel in 0..h.num_channels() {
        println!("\nChannel {channel}:");
        for f in tones {
            let db = magnitude_at(&h, channel, f).expect("channel");
            let k = (f * n as f64 / f64::from(sample_rate)) as usize;
            let phase = h.freq_channel(channel).expect("channel")[k].arg();
            println!("  {:>7.1} Hz  {:>7.2} dB  {:>7.3} rad", f, db, phase);
        }
    }
}
