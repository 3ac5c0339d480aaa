use anyhow::Result;
use log::info;
use sigmoid_nn::{codec, train_network, Network, Sgd};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut network = Network::seeded(&[2, 2, 1], 2024)?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let optimizer = Sgd::new(0.5)?;
    let epochs = 10000;

    for epoch in 0..epochs {
        let loss = train_network(&mut network, &inputs, &expected_outputs, &optimizer)?;
        if epoch % 1000 == 0 {
            info!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    // Reload from the text format; outputs must not move.
    let saved = codec::encode(&network)?;
    let reloaded = codec::decode(&saved)?;
    println!("Saved parameters:\n{saved}");

    for input in &inputs {
        let out = network.forward(input)?[0];
        let reloaded_out = reloaded.forward(input)?[0];
        anyhow::ensure!(out == reloaded_out, "reloaded network disagrees on {input:?}");
        println!("Input: {:?} -> Output: {:.4}", input, out);
    }
    Ok(())
}
