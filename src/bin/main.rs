//! RKNN Command Line Interface
//!
//! Runs a k-NN classification described by a JSON request: options,
//! training data and query points.
//!
//! ```json
//! {
//!   "options": { "numNeighbours": 3 },
//!   "train": { "X": [[0.0, 0.0], [5.0, 5.0]], "y": ["low", "high"] },
//!   "query": [[4.5, 4.0]]
//! }
//! ```

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use rknn::core::{KnnError, Result};
use rknn::{Datapoint, KnnConfig, KNN};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "rknn")]
#[command(about = "A Rust implementation of k-nearest-neighbours classification")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "RKNN Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the query points of a request
    Classify(ClassifyArgs),
    /// List the nearest training points of every query
    Neighbours(NeighboursArgs),
}

#[derive(Args)]
struct ClassifyArgs {
    /// Request file (JSON), or "-" for stdin
    #[arg(short, long)]
    request: PathBuf,

    /// Output file for the classified points (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the number of neighbours from the request options
    #[arg(short = 'k', long)]
    num_neighbours: Option<usize>,
}

#[derive(Args)]
struct NeighboursArgs {
    /// Request file (JSON), or "-" for stdin
    #[arg(short, long)]
    request: PathBuf,

    /// Override the number of neighbours from the request options
    #[arg(short = 'k', long)]
    num_neighbours: Option<usize>,
}

/// Class label as it appears in JSON: an integer, a float or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
enum Label {
    Int(i64),
    Float(FloatLabel),
    Text(String),
}

/// Float label compared by bit pattern, with `-0.0` folded into `0.0`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
struct FloatLabel(f64);

impl FloatLabel {
    fn bits(self) -> u64 {
        if self.0 == 0.0 {
            0.0f64.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for FloatLabel {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for FloatLabel {}

impl Hash for FloatLabel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Request {
    #[serde(default)]
    options: KnnConfig,
    train: TrainingData,
    query: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TrainingData {
    #[serde(rename = "X")]
    x: Vec<Vec<f64>>,
    y: Vec<Label>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Classify(args) => classify_command(args),
        Commands::Neighbours(args) => neighbours_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn classify_command(args: ClassifyArgs) -> Result<()> {
    let request = load_request(&args.request)?;
    let config = resolve_config(request.options, args.num_neighbours)?;

    let mut knn = KNN::from_config(config)?;
    knn.train(&request.train.x, &request.train.y)?;
    info!(
        "Trained on {} samples, k = {}",
        knn.n_samples(),
        knn.num_neighbours()
    );

    let mut points: Vec<Datapoint<Label>> =
        request.query.into_iter().map(Datapoint::new).collect();
    knn.classify_datapoints(&mut points)?;
    info!("Classified {} query points", points.len());

    match args.output {
        Some(output_path) => {
            let file = File::create(&output_path).map_err(KnnError::IoError)?;
            write_json(BufWriter::new(file), &points)?;
            info!("Predictions saved to: {output_path:?}");
        }
        None => write_json(io::stdout().lock(), &points)?,
    }

    Ok(())
}

fn neighbours_command(args: NeighboursArgs) -> Result<()> {
    let request = load_request(&args.request)?;
    let config = resolve_config(request.options, args.num_neighbours)?;

    let mut knn = KNN::from_config(config)?;
    knn.train(&request.train.x, &request.train.y)?;

    println!("# Nearest neighbours for {} queries", request.query.len());
    println!("# Format: query_index training_index distance label");

    for (i, query) in request.query.iter().enumerate() {
        let neighbours = knn.kneighbors(query).map_err(|e| match e {
            KnnError::DimensionMismatch {
                expected, actual, ..
            } => KnnError::DimensionMismatch {
                index: i,
                expected,
                actual,
            },
            other => other,
        })?;

        for neighbour in neighbours {
            println!(
                "{} {} {:.6} {}",
                i,
                neighbour.index,
                neighbour.distance,
                format_label(&request.train.y[neighbour.index])
            );
        }
    }

    Ok(())
}

fn resolve_config(options: KnnConfig, num_neighbours: Option<usize>) -> Result<KnnConfig> {
    let config = match num_neighbours {
        Some(k) => KnnConfig { num_neighbours: k },
        None => options,
    };
    config.validate()?;
    Ok(config)
}

fn load_request(path: &Path) -> Result<Request> {
    let mut contents = String::new();
    if path == Path::new("-") {
        info!("Reading request from stdin");
        io::stdin()
            .read_to_string(&mut contents)
            .map_err(KnnError::IoError)?;
    } else {
        info!("Reading request from: {path:?}");
        let file = File::open(path).map_err(KnnError::IoError)?;
        BufReader::new(file)
            .read_to_string(&mut contents)
            .map_err(KnnError::IoError)?;
    }

    serde_json::from_str(&contents)
        .map_err(|e| KnnError::ParseError(format!("Invalid request: {e}")))
}

fn write_json<W: Write>(mut writer: W, points: &[Datapoint<Label>]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, points)
        .map_err(|e| KnnError::ParseError(e.to_string()))?;
    writeln!(writer).map_err(KnnError::IoError)?;
    writer.flush().map_err(KnnError::IoError)
}

fn format_label(label: &Label) -> String {
    match label {
        Label::Int(n) => n.to_string(),
        Label::Float(f) => f.0.to_string(),
        Label::Text(s) => s.clone(),
    }
}
