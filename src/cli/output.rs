//! Console formatting for CLI reports

use crate::{analysis::RunSummary, app::ExperimentConfig};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:24} {}", format!("{}:", key), value);
}

/// Print the settings a run is about to use
pub fn print_config(config: &ExperimentConfig) {
    print_subsection("Configuration");
    print_kv("Policy", &config.agent.policy.to_string());
    print_kv("Learning rate", &config.agent.learning_rate.to_string());
    print_kv("Discount factor", &config.agent.discount_factor.to_string());
    print_kv("Default value", &config.agent.q_init.to_string());
    print_kv(
        "Epsilon (training)",
        &format!(
            "{} for {} trips",
            config.agent.exploration.training, config.agent.exploration.training_trips
        ),
    );
    print_kv(
        "Epsilon (evaluation)",
        &config.agent.exploration.evaluation.to_string(),
    );
    print_kv(
        "Grid",
        &format!("{}x{}", config.world.columns, config.world.rows),
    );
    print_kv("Trials", &config.run.trials.to_string());
    print_kv(
        "Seed",
        &config
            .run
            .seed
            .map_or_else(|| "random".to_string(), |seed| seed.to_string()),
    );
}

/// Print the end-of-run statistics
pub fn print_summary(summary: &RunSummary) {
    print_subsection(&format!("{} statistics", summary.policy));
    print_kv(
        "Success rate",
        &format!(
            "{:.2}% ({}/{})",
            summary.success_percentage, summary.successes, summary.trips
        ),
    );
    print_kv("Positive reward", &format!("{:.2}", summary.positive_reward));
    print_kv("Negative reward", &format!("{:.2}", summary.negative_reward));
    print_kv("Net reward", &format!("{:.2}", summary.net_reward));
    match summary.average_remaining_time {
        Some(average) => print_kv("Avg remaining time", &format!("{average:.4}")),
        None => print_kv("Avg remaining time", "no successful trips"),
    }
    if let Some(dist) = &summary.remaining_time {
        print_kv(
            "Remaining time range",
            &format!("{}..={} (median {})", dist.min, dist.max, dist.median),
        );
    }
    if let Some(entries) = summary.table_entries {
        print_kv("Value table entries", &entries.to_string());
    }
}
