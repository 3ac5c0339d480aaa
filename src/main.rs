use anyhow::{bail, Context, Result};
use log::info;

use sigmoid_nn::{train_loop, Network, NetworkSpec, Sgd, TrainConfig, TrainingSet};

const USAGE: &str = "\
usage:
  sigmoid-nn init <out> <size>... [--seed N]
  sigmoid-nn init <out> --spec <spec.json>
  sigmoid-nn train <model> <data> --lr <rate> [--epochs N] [--config <train.json>] [--out <path>]
  sigmoid-nn predict <model> <value>...";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(std::env::args().skip(1).collect()) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Vec<String>) -> Result<()> {
    let Some((command, rest)) = args.split_first() else {
        bail!("{USAGE}");
    };
    let mut opts = Options::parse(rest)?;

    match command.as_str() {
        "init" => init(&mut opts),
        "train" => train(&mut opts),
        "predict" => predict(&mut opts),
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => bail!("unknown command {other:?}\n{USAGE}"),
    }
}

fn init(opts: &mut Options) -> Result<()> {
    let out = opts.positional(0, "output path")?;
    let spec = match opts.take("--spec") {
        Some(path) => NetworkSpec::load_json(&path)?,
        None => {
            let sizes = opts.positionals[1..]
                .iter()
                .map(|s| s.parse::<usize>().with_context(|| format!("layer size {s:?}")))
                .collect::<Result<Vec<_>>>()?;
            let seed = opts
                .take("--seed")
                .map(|s| s.parse::<u64>().with_context(|| format!("seed {s:?}")))
                .transpose()?;
            NetworkSpec { layer_sizes: sizes, seed }
        }
    };

    let network = spec.build()?;
    network.save(&out).with_context(|| format!("writing {out}"))?;
    info!("wrote {:?} network to {out}", network.layer_sizes());
    Ok(())
}

fn train(opts: &mut Options) -> Result<()> {
    let model = opts.positional(0, "model path")?;
    let data = opts.positional(1, "training data path")?;
    let lr: f64 = opts
        .take("--lr")
        .context("--lr is required")?
        .parse()
        .context("--lr")?;

    let mut config = match opts.take("--config") {
        Some(path) => TrainConfig::load_json(&path)?,
        None => TrainConfig::default(),
    };
    if let Some(epochs) = opts.take("--epochs") {
        config.epochs = epochs.parse().context("--epochs")?;
    }
    let out = opts.take("--out").unwrap_or_else(|| model.clone());

    let mut network = Network::load(&model).with_context(|| format!("loading {model}"))?;
    let set = TrainingSet::load(&data).with_context(|| format!("reading {data}"))?;
    let optimizer = Sgd::new(lr)?;

    let history = train_loop(&mut network, &set.inputs, &set.expected, &optimizer, &config)?;
    network.save(&out).with_context(|| format!("writing {out}"))?;
    if let Some(last) = history.last() {
        info!("trained {} epochs on {} examples, final loss {:.6}", last.epoch, set.len(), last.train_loss);
    }
    Ok(())
}

fn predict(opts: &mut Options) -> Result<()> {
    let model = opts.positional(0, "model path")?;
    let inputs = opts.positionals[1..]
        .iter()
        .map(|s| s.parse::<f64>().with_context(|| format!("input value {s:?}")))
        .collect::<Result<Vec<_>>>()?;

    let network = Network::load(&model).with_context(|| format!("loading {model}"))?;
    let outputs = network.forward(&inputs)?;
    let rendered: Vec<String> = outputs.iter().map(|v| format!("{v:.6}")).collect();
    println!("{}", rendered.join(" "));
    Ok(())
}

/// `--flag value` pairs plus positional arguments, in order.
struct Options {
    positionals: Vec<String>,
    flags: Vec<(String, String)>,
}

impl Options {
    fn parse(args: &[String]) -> Result<Options> {
        let mut positionals = Vec::new();
        let mut flags = Vec::new();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            // Negative numbers are values, not flags.
            if arg.starts_with("--") {
                let value = iter.next().with_context(|| format!("{arg} needs a value"))?;
                flags.push((arg.clone(), value.clone()));
            } else {
                positionals.push(arg.clone());
            }
        }
        Ok(Options { positionals, flags })
    }

    fn take(&mut self, flag: &str) -> Option<String> {
        let idx = self.flags.iter().position(|(name, _)| name == flag)?;
        Some(self.flags.remove(idx).1)
    }

    fn positional(&self, idx: usize, what: &str) -> Result<String> {
        match self.positionals.get(idx) {
            Some(v) => Ok(v.clone()),
            None => bail!("missing {what}\n{USAGE}"),
        }
    }
}
