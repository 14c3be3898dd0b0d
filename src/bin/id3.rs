use clap::Parser;
use id3_tree::data::Dataset;
use id3_tree::metrics::confusion::ClassificationMetrics;
use id3_tree::trees::{Id3Classifier, Id3Params};
use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Train an ID3 decision tree on a delimited file and label new records with it.
#[derive(Parser, Debug)]
#[command(name = "id3")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "ID3 decision tree classifier for categorical data", long_about = None)]
struct Cli {
    /// Training data; the first row holds the attribute names
    train: PathBuf,

    /// Records to label, with the same attributes as the training data
    predict: Option<PathBuf>,

    /// Goal attribute (defaults to the last column)
    #[arg(long)]
    goal: Option<String>,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Entropy under which a node counts as pure
    #[arg(long)]
    epsilon: Option<f64>,

    /// Hold out this fraction of the training data and label it instead of a prediction file
    #[arg(long, conflicts_with = "predict")]
    holdout: Option<f64>,

    /// Seed for the holdout shuffle
    #[arg(long, requires = "holdout")]
    seed: Option<u64>,

    /// Compare predictions with the goal values already present in the labeled file
    #[arg(long)]
    score: bool,

    /// Log every tree building decision
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "id3=debug,id3_tree=debug" } else { "id3=info,id3_tree=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn load(path: &Path, delimiter: u8, goal: Option<&str>) -> Result<Dataset, Box<dyn Error>> {
    let mut dataset = Dataset::from_path(path, delimiter)?;
    if let Some(goal) = goal {
        dataset.set_goal_attribute(goal)?;
    }
    info!(path = %path.display(), records = dataset.len(), "loaded dataset");
    Ok(dataset)
}

/// Share of the labeled data left for training once `holdout` is set aside.
fn train_size(holdout: f64) -> Result<f64, Box<dyn Error>> {
    if !(0.0..1.0).contains(&holdout) {
        return Err(format!("--holdout must be at least 0.0 and below 1.0, got {}", holdout).into());
    }
    Ok(1.0 - holdout)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !cli.delimiter.is_ascii() {
        return Err("The delimiter must be a single ASCII character.".into());
    }
    let delimiter = cli.delimiter as u8;

    let mut params = Id3Params::new();
    if let Some(epsilon) = cli.epsilon {
        params.set_epsilon(epsilon)?;
    }

    let mut training = load(&cli.train, delimiter, cli.goal.as_deref())?;
    let mut target = match (&cli.predict, cli.holdout) {
        (Some(path), _) => Some(load(path, delimiter, None)?),
        (None, Some(fraction)) => {
            let (train, test) = training.train_test_split(train_size(fraction)?, cli.seed)?;
            info!(train = train.len(), test = test.len(), "split off holdout");
            training = train;
            Some(test)
        }
        (None, None) => None,
    };

    let mut classifier = Id3Classifier::with_params(params);
    info!("{}", classifier.fit(&training)?);
    println!("\nThe ID3 tree:");
    print!("{}", classifier.render()?);

    if let Some(target) = target.as_mut() {
        let goal = training.goal_attribute();
        let truth = match target.attribute_index(goal) {
            Ok(index) if cli.score => Some(target.column(index)?),
            _ => None,
        };

        classifier.predict(target)?;
        println!("\nPredictions:");
        target.write_csv(io::stdout(), delimiter)?;

        if let Some(truth) = truth {
            let predicted = target.column(target.goal_index())?;
            println!("\nAccuracy: {}%", classifier.accuracy(&truth, &predicted)? * 100.0);
        }
    }
    Ok(())
}
