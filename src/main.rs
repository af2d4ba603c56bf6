use anyhow::{Context, Result};
use backprop_net::{normalize_samples, train_loop, Network, NetworkSpec, Sample, TrainConfig, WeightInit};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Train a one-hidden-layer network on 2D labelled points.
#[derive(Parser, Debug)]
#[command(name = "backprop-net", version)]
struct Args {
    /// Network description (JSON) to start from instead of a fresh network.
    #[arg(long)]
    config: Option<String>,

    /// Samples as a JSON array of {"input": [x, y], "target": [...]}.
    /// Inputs are rescaled into [0, 1] before training.
    #[arg(long)]
    data: Option<String>,

    #[arg(long, default_value_t = 4)]
    hidden: usize,

    #[arg(long, default_value_t = 1000)]
    epochs: usize,

    /// Overrides the learning rate of the network or config.
    #[arg(long)]
    learn_rate: Option<f64>,

    /// Seed for weight initialization and shuffling.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    shuffle: bool,

    /// Write the trained network (with its flat weight vector) here.
    #[arg(long)]
    save: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut samples = match &args.data {
        Some(path) => load_samples(path)?,
        None => two_blobs(),
    };
    let bounds = normalize_samples(&mut samples).context("cannot normalize dataset")?;
    info!(samples = samples.len(), ?bounds, "dataset ready");

    let mut network = match &args.config {
        Some(path) => NetworkSpec::load_json(path)
            .with_context(|| format!("cannot load network config {path}"))?
            .build_with_rng(&mut rng)?,
        None => {
            let outputs = samples[0].target.len();
            Network::with_init([2, args.hidden, outputs], &["x", "y"], WeightInit::Uniform, &mut rng)?
        }
    };
    if let Some(learn_rate) = args.learn_rate {
        network.set_learn_rate(learn_rate);
    }

    let mut config = TrainConfig::new(args.epochs);
    config.shuffle = args.shuffle;
    let history = train_loop(&mut network, &samples, &config, &mut rng)?;

    if let Some(first) = history.first() {
        info!(initial_loss = first.train_loss, "first epoch");
    }
    for sample in &samples {
        let output = network.get_output(&sample.input)?;
        println!("{:?} -> {:.4?} (target {:?})", sample.input, output, sample.target);
    }

    if let Some(path) = &args.save {
        network.to_spec("backprop-net").save_json(path)
            .with_context(|| format!("cannot save network to {path}"))?;
        info!(path = %path, "saved network");
    }
    Ok(())
}

fn load_samples(path: &str) -> Result<Vec<Sample>> {
    let file = std::fs::File::open(path).with_context(|| format!("cannot open {path}"))?;
    let samples: Vec<Sample> = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("cannot parse samples in {path}"))?;
    anyhow::ensure!(
        samples.iter().all(|s| s.input.len() == 2),
        "every sample in {path} needs a 2D input"
    );
    Ok(samples)
}

/// Two well separated clusters, one-hot labelled.
fn two_blobs() -> Vec<Sample> {
    let left = [(1.0, 2.0), (1.5, 1.0), (2.0, 2.5), (1.2, 3.0), (2.4, 1.8)];
    let right = [(6.0, 7.5), (7.0, 6.5), (6.5, 8.0), (5.5, 6.8), (7.2, 7.9)];
    left.iter().map(|&(x, y)| Sample::labelled(vec![x, y], 0, 2))
        .chain(right.iter().map(|&(x, y)| Sample::labelled(vec![x, y], 1, 2)))
        .collect()
}
