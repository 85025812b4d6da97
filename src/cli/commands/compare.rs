//! Compare command - Random baseline against Q-learning on the same trips

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::to_writer_pretty;

use crate::{
    app::{App, ExperimentConfig, PolicyKind},
    cli::output::{print_section, print_summary},
    pipeline::{ComparisonFramework, ComparisonResult, Policy},
};

#[derive(Parser, Debug)]
#[command(about = "Compare the random baseline with Q-learning")]
pub struct CompareArgs {
    /// Number of trips per policy
    #[arg(long, short = 'n')]
    pub trials: Option<usize>,

    /// Random seed shared by every policy's world
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON experiment configuration for the Q-learning policy and world
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Optional path for writing the comparison as JSON
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn compare_policies(args: &CompareArgs) -> Result<ComparisonResult> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ExperimentConfig::default(),
    };
    if let Some(trials) = args.trials {
        config.run.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.run.seed = Some(seed);
    }

    let app = match config.run.seed {
        Some(seed) => App::new().with_default_seed(seed),
        None => App::new(),
    };

    let mut baseline = config.agent.clone();
    baseline.policy = PolicyKind::Random;
    let mut learner = config.agent.clone();
    learner.policy = PolicyKind::QLearning;

    let policies: Vec<Box<dyn Policy>> = vec![
        app.create_policy(&baseline)?,
        app.create_policy(&learner)?,
    ];

    let framework = ComparisonFramework::new(policies, config.world.clone(), config.run.clone());
    Ok(framework.compare()?)
}

pub fn execute(args: CompareArgs) -> Result<()> {
    let result = compare_policies(&args)?;

    print_section("Comparison");
    println!("World seed: {}", result.world_seed);
    for summary in &result.summaries {
        print_summary(summary);
    }
    if let Some(best) = result.best() {
        println!("\nBest policy: {} ({:.2}%)", best.policy, best.success_percentage);
    }

    if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("creating comparison file {}", path.display()))?;
        to_writer_pretty(file, &result)?;
        println!("\nResults exported to: {}", path.display());
    }
    Ok(())
}
