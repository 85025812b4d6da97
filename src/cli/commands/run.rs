//! Run command - Drive trips with one policy and report performance

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    analysis::RunSummary,
    app::{App, ExperimentConfig, PolicyKind},
    cli::output::{print_config, print_section, print_summary},
    pipeline::{JsonlObserver, MetricsObserver, ProgressObserver},
};

#[derive(Parser, Debug)]
#[command(about = "Drive trips on the reference grid", allow_negative_numbers = true)]
pub struct RunArgs {
    /// Policy driving the cab (`q-learning` or `random`)
    #[arg(long, short = 'p')]
    pub policy: Option<String>,

    /// Number of trips
    #[arg(long, short = 'n')]
    pub trials: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON experiment configuration; flags override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Learning rate α
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor γ
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Value of unseen state-action pairs
    #[arg(long)]
    pub q_init: Option<f64>,

    /// Exploration rate during the training phase
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Exploration rate once training trips are over
    #[arg(long)]
    pub eval_epsilon: Option<f64>,

    /// Number of trips in the training phase
    #[arg(long)]
    pub training_trips: Option<usize>,

    /// Let trips run past the deadline (up to the hard limit)
    #[arg(long)]
    pub no_deadline: bool,

    /// Pause between ticks in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Optional file for JSONL tick records
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Merge the configuration file (if any) with command-line overrides
pub fn resolve_config(args: &RunArgs) -> Result<ExperimentConfig> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ExperimentConfig::default(),
    };

    if let Some(policy) = &args.policy {
        config.agent.policy = policy.parse::<PolicyKind>()?;
    }
    if let Some(trials) = args.trials {
        config.run.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.run.seed = Some(seed);
    }
    if let Some(alpha) = args.alpha {
        config.agent.learning_rate = alpha;
    }
    if let Some(gamma) = args.gamma {
        config.agent.discount_factor = gamma;
    }
    if let Some(q_init) = args.q_init {
        config.agent.q_init = q_init;
    }
    if let Some(epsilon) = args.epsilon {
        config.agent.exploration.training = epsilon;
    }
    if let Some(epsilon) = args.eval_epsilon {
        config.agent.exploration.evaluation = epsilon;
    }
    if let Some(trips) = args.training_trips {
        config.agent.exploration.training_trips = trips;
    }
    if args.no_deadline {
        config.world.enforce_deadline = false;
    }
    if let Some(delay) = args.delay_ms {
        config.run.update_delay_ms = delay;
    }

    config.validate()?;
    Ok(config)
}

/// Build everything from `args`, drive the trips and return the summary
pub fn run_experiment(args: &RunArgs) -> Result<RunSummary> {
    let config = resolve_config(args)?;
    let app = match config.run.seed {
        Some(seed) => App::new().with_default_seed(seed),
        None => App::new(),
    };

    let mut controller = app.create_controller(&config.agent)?;
    let (mut world, mut planner) = app.create_world(&config.world)?;

    let mut pipeline = app
        .create_pipeline(&config)
        .with_observer(Box::new(MetricsObserver::new()));
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("creating observation file {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    print_config(&config);
    let summary = pipeline.run(&mut world, &mut planner, &mut controller)?;

    if let Some(path) = &args.summary {
        summary
            .save(path)
            .with_context(|| format!("writing summary to {}", path.display()))?;
    }
    Ok(summary)
}

pub fn execute(args: RunArgs) -> Result<()> {
    let summary = run_experiment(&args)?;

    print_section("Stats");
    print_summary(&summary);
    if let Some(path) = &args.summary {
        println!("\nSummary written to: {}", path.display());
    }
    Ok(())
}
