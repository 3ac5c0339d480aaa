/// Handwritten digit lookup with a previously trained 784 → … → 10 network.
///
/// Reads image paths from stdin; each must be a 28×28 image. Pixels are
/// converted to grayscale and inverted so dark ink maps to 1.0.
///
/// Run with:
///   cargo run --example digits -- digits.nn
use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use image::GenericImageView;
use log::warn;
use sigmoid_nn::Network;

const SIDE: u32 = 28;

fn image_to_input(path: &str) -> Result<Vec<f64>> {
    let img = image::open(path).with_context(|| format!("opening {path}"))?;
    if (img.width(), img.height()) != (SIDE, SIDE) {
        bail!("image is {}x{}, expected {SIDE}x{SIDE}", img.width(), img.height());
    }
    let gray = img.to_luma8();
    Ok(gray.pixels().map(|p| (255.0 - p.0[0] as f64) / 255.0).collect())
}

/// The digit whose output alone rounds to 1, if any.
fn one_hot_digit(outputs: &[f64]) -> Option<usize> {
    let mut hot = outputs.iter().enumerate().filter(|(_, v)| v.round() == 1.0);
    match (hot.next(), hot.next()) {
        (Some((digit, _)), None) => Some(digit),
        _ => None,
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let model = std::env::args().nth(1).unwrap_or_else(|| "digits.nn".to_owned());
    let network = Network::load(&model).with_context(|| format!("loading {model}"))?;

    println!("Enter the name of a 28x28 image file to determine which digit is drawn, or type 'exit' to exit.");
    for line in io::stdin().lock().lines() {
        let line = line?;
        let path = line.trim();
        if path == "exit" {
            break;
        }
        let outputs = match image_to_input(path).and_then(|x| Ok(network.forward(&x)?)) {
            Ok(outputs) => outputs,
            Err(e) => {
                warn!("{e:#}");
                println!("Invalid file, please try again.");
                continue;
            }
        };
        match one_hot_digit(&outputs) {
            Some(digit) => println!("The image contains the digit {digit}."),
            None => println!("The image contains an unknown digit."),
        }
    }
    println!();
    Ok(())
}
