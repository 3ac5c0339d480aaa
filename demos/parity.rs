/// Odd/even classifier over 16-bit integers.
///
/// Trains a 16 → 20 → 1 network once over 0..1000 labelled alternately
/// even/odd, then classifies numbers typed on stdin until a non-number.
///
/// Run with:
///   cargo run --example parity --release
use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::info;
use sigmoid_nn::{train_network, Network, Sgd};

/// Big-endian 16-bit encoding, one 0/1 input per bit.
fn num_to_bits(x: u16) -> Vec<f64> {
    (0..16).rev().map(|bit| f64::from((x >> bit) & 1)).collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let inputs: Vec<Vec<f64>> = (0..1000u16).map(num_to_bits).collect();
    let expected: Vec<Vec<f64>> = (0..1000u16)
        .map(|i| vec![if i % 2 == 0 { 1.0 } else { 0.0 }])
        .collect();

    let mut network = Network::new(&[16, 20, 1])?;
    let loss = train_network(&mut network, &inputs, &expected, &Sgd::new(3.0)?)?;
    info!("trained on {} examples, mean loss {loss:.4}", inputs.len());

    println!("Enter a number between 0 and 65535 to test whether it is even or odd, or type anything else to exit.");
    io::stdout().flush()?;
    for line in io::stdin().lock().lines() {
        let Ok(n) = line?.trim().parse::<u16>() else {
            break;
        };
        let result = network.forward(&num_to_bits(n))?[0];
        println!("{}", if result > 0.5 { "Even" } else { "Odd" });
    }
    println!();
    Ok(())
}
