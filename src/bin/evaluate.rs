use roadtrip_planner::config::PlannerConfig;
use roadtrip_planner::evaluation::{
    compare, default_scenarios, format_comparison_report, format_report, load_baseline,
    route_66_catalog, run_scenario, save_baseline, Baseline, EvalScenario,
};
use roadtrip_planner::TripPlanner;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BASELINE_PATH: &str = "evaluation/baseline.json";
const DEFAULT_REGRESSION_THRESHOLD: f32 = 0.15;

fn print_help() {
    eprintln!(
        "\
Usage: evaluate [OPTIONS]

Options:
  --scenario=FILTER     Only run scenarios whose name contains FILTER
  --runs=N              Plans per scenario, compared for determinism (default: 2)
  --json                Output results as JSON
  --save-baseline       Save results as baseline to evaluation/baseline.json
  --check               Compare results against saved baseline (exit 1 on regression)
  --regression-threshold=F
                        Regression threshold as fraction (default: 0.15 = 15%)
  --help                Show this help message

Planner tuning is read from PLANNER_* environment variables (or .env)."
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (less verbose for eval)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roadtrip_planner=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI args
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    let scenario_filter = args.iter().find_map(|a| a.strip_prefix("--scenario="));
    let runs: usize = args
        .iter()
        .find_map(|a| a.strip_prefix("--runs="))
        .and_then(|s| s.parse().ok())
        .unwrap_or(2);
    let json_output = args.iter().any(|a| a == "--json");
    let save_baseline_flag = args.iter().any(|a| a == "--save-baseline");
    let check_flag = args.iter().any(|a| a == "--check");
    let regression_threshold: f32 = args
        .iter()
        .find_map(|a| a.strip_prefix("--regression-threshold="))
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_REGRESSION_THRESHOLD);

    let config = PlannerConfig::from_env().map_err(|e| format!("Config error: {}", e))?;
    let planner = TripPlanner::new(config);
    let catalog = route_66_catalog();

    // Select scenarios
    let all_scenarios = default_scenarios();
    let scenarios: Vec<&EvalScenario> = if let Some(filter) = scenario_filter {
        all_scenarios
            .iter()
            .filter(|s| s.name.contains(filter))
            .collect()
    } else {
        all_scenarios.iter().collect()
    };

    if scenarios.is_empty() {
        eprintln!("No scenarios matched filter. Available:");
        for s in &all_scenarios {
            eprintln!("  {}", s.name);
        }
        std::process::exit(1);
    }

    eprintln!(
        "Running {} scenarios x {} runs each over {} catalog entries...",
        scenarios.len(),
        runs,
        catalog.len()
    );

    let results: Vec<_> = scenarios
        .iter()
        .map(|scenario| {
            eprintln!("  {}", scenario.name);
            let result = run_scenario(&planner, &catalog, scenario, runs);
            if let Some(ref e) = result.error {
                eprintln!("    Failed: {}", e);
            }
            result
        })
        .collect();

    // Handle --save-baseline
    if save_baseline_flag {
        let baseline = Baseline::from_results(&results);
        let path = PathBuf::from(DEFAULT_BASELINE_PATH);
        save_baseline(&baseline, &path)?;
        eprintln!("Baseline saved to {}", path.display());
    }

    // Handle --check
    if check_flag {
        let path = PathBuf::from(DEFAULT_BASELINE_PATH);
        let baseline = load_baseline(&path)?;
        let report = compare(&baseline, &results, regression_threshold);

        if json_output {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", format_comparison_report(&report));
        }

        let nondeterministic = results.iter().filter(|r| !r.deterministic).count();
        if nondeterministic > 0 {
            eprintln!("{} scenario(s) produced differing plans across runs", nondeterministic);
        }

        if report.total_regressions > 0 || nondeterministic > 0 {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Standard output
    if json_output {
        let json_results: Vec<serde_json::Value> = results
            .iter()
            .map(|r| {
                let mut obj = serde_json::json!({
                    "scenario": r.scenario.name,
                    "runs": r.runs,
                    "deterministic": r.deterministic,
                });
                if let Some(ref m) = r.metrics {
                    obj["metrics"] = serde_json::to_value(m).unwrap_or_default();
                }
                if let Some(ref e) = r.error {
                    obj["error"] = serde_json::json!(e);
                }
                obj
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_results)?);
    } else {
        println!("{}", format_report(&results));
    }

    Ok(())
}
