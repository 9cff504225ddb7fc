use serde::{Deserialize, Serialize};
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::evaluation::{PlanMetrics, ScenarioResult};

const BASELINE_VERSION: u32 = 1;

// ── Types ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Baseline {
    pub version: u32,
    pub timestamp: String,
    pub scenarios: Vec<BaselineScenario>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineScenario {
    pub name: String,
    pub metrics: Option<BaselineMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineMetrics {
    pub total_days: u32,
    pub compliance_rate: f32,
    pub longest_day_hours: f32,
    pub synthetic_stops: usize,
    pub warnings: usize,
}

impl From<&PlanMetrics> for BaselineMetrics {
    fn from(m: &PlanMetrics) -> Self {
        BaselineMetrics {
            total_days: m.total_days,
            compliance_rate: m.compliance_rate,
            longest_day_hours: m.longest_day_hours,
            synthetic_stops: m.synthetic_stops,
            warnings: m.warnings,
        }
    }
}

// ── Comparison types ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub baseline_timestamp: String,
    pub threshold: f32,
    pub scenario_comparisons: Vec<ScenarioComparison>,
    pub total_regressions: usize,
    pub new_scenarios: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub name: String,
    pub metric_comparisons: Vec<MetricComparison>,
    pub regressions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricComparison {
    pub name: String,
    pub current: f32,
    pub baseline: f32,
    pub change_pct: f32,
    pub regressed: bool,
}

// ── Build baseline from results ─────────────────────────────

impl Baseline {
    pub fn from_results(results: &[ScenarioResult]) -> Self {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string());

        let scenarios = results
            .iter()
            .map(|r| BaselineScenario {
                name: r.scenario.name.clone(),
                metrics: r.metrics.as_ref().map(BaselineMetrics::from),
            })
            .collect();

        Baseline {
            version: BASELINE_VERSION,
            timestamp,
            scenarios,
        }
    }
}

// ── Save / Load ─────────────────────────────────────────────

pub fn save_baseline(baseline: &Baseline, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {e}"))?;
    }
    let json =
        serde_json::to_string_pretty(baseline).map_err(|e| format!("Serialize error: {e}"))?;
    std::fs::write(path, json).map_err(|e| format!("Write error: {e}"))?;
    Ok(())
}

pub fn load_baseline(path: &Path) -> Result<Baseline, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read baseline at {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse baseline: {e}"))
}

// ── Comparison logic ────────────────────────────────────────

/// Compare current evaluation results against a saved baseline.
/// `threshold` is a fraction (e.g. 0.15 = 15%).
pub fn compare(baseline: &Baseline, results: &[ScenarioResult], threshold: f32) -> ComparisonReport {
    let baseline_map: std::collections::HashMap<&str, &BaselineScenario> = baseline
        .scenarios
        .iter()
        .map(|s| (s.name.as_str(), s))
        .collect();

    let mut scenario_comparisons = Vec::new();
    let mut total_regressions = 0;
    let mut new_scenarios = Vec::new();

    for result in results {
        let name = &result.scenario.name;
        let Some(base_scenario) = baseline_map.get(name.as_str()) else {
            new_scenarios.push(name.clone());
            continue;
        };

        let mut metric_comparisons = Vec::new();

        match (&result.metrics, &base_scenario.metrics) {
            (Some(cur), Some(base)) => {
                metric_comparisons.push(compare_metric(
                    "compliance_rate",
                    cur.compliance_rate,
                    base.compliance_rate,
                    threshold,
                    true,
                ));
                // Lower-is-better metrics
                metric_comparisons.push(compare_metric(
                    "longest_day_hours",
                    cur.longest_day_hours,
                    base.longest_day_hours,
                    threshold,
                    false,
                ));
                metric_comparisons.push(compare_metric(
                    "total_days",
                    cur.total_days as f32,
                    base.total_days as f32,
                    threshold,
                    false,
                ));
                metric_comparisons.push(compare_metric(
                    "synthetic_stops",
                    cur.synthetic_stops as f32,
                    base.synthetic_stops as f32,
                    threshold,
                    false,
                ));
                metric_comparisons.push(compare_metric(
                    "warnings",
                    cur.warnings as f32,
                    base.warnings as f32,
                    threshold,
                    false,
                ));
            }
            // Planned before, fails now
            (None, Some(_)) => metric_comparisons.push(MetricComparison {
                name: "planned".to_string(),
                current: 0.0,
                baseline: 1.0,
                change_pct: -1.0,
                regressed: true,
            }),
            _ => {}
        }

        let regressions = metric_comparisons.iter().filter(|m| m.regressed).count();
        total_regressions += regressions;

        scenario_comparisons.push(ScenarioComparison {
            name: name.clone(),
            metric_comparisons,
            regressions,
        });
    }

    ComparisonReport {
        baseline_timestamp: baseline.timestamp.clone(),
        threshold,
        scenario_comparisons,
        total_regressions,
        new_scenarios,
    }
}

fn compare_metric(
    name: &str,
    current: f32,
    baseline: f32,
    threshold: f32,
    higher_is_better: bool,
) -> MetricComparison {
    let change_pct = if baseline.abs() < f32::EPSILON {
        0.0
    } else {
        (current - baseline) / baseline
    };

    let regressed = if baseline.abs() < f32::EPSILON {
        // Lower-is-better counts that were zero regress as soon as they appear
        !higher_is_better && current > 0.0
    } else if higher_is_better {
        current < baseline * (1.0 - threshold)
    } else {
        current > baseline * (1.0 + threshold)
    };

    MetricComparison {
        name: name.to_string(),
        current,
        baseline,
        change_pct,
        regressed,
    }
}

// ── Display formatting ──────────────────────────────────────

pub fn format_comparison_report(report: &ComparisonReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Checking against baseline (saved {})...\n",
        report.baseline_timestamp
    ));
    out.push_str(&format!(
        "Regression threshold: {:.0}%\n",
        report.threshold * 100.0
    ));

    for sc in &report.scenario_comparisons {
        out.push_str(&format!("\nScenario: {}\n", sc.name));

        for mc in &sc.metric_comparisons {
            let icon = if mc.regressed { "x" } else { "ok" };
            let change_str = if mc.baseline.abs() < f32::EPSILON {
                "  (baseline=0)".to_string()
            } else {
                format!(
                    " (baseline: {:.2}, {:+.1}%)",
                    mc.baseline,
                    mc.change_pct * 100.0
                )
            };
            let regression_marker = if mc.regressed { " <- REGRESSION" } else { "" };
            out.push_str(&format!(
                "  [{icon}] {:<22} {:.2}{change_str}{regression_marker}\n",
                mc.name, mc.current,
            ));
        }
    }

    if !report.new_scenarios.is_empty() {
        out.push_str("\nNew scenarios (no baseline):\n");
        for name in &report.new_scenarios {
            out.push_str(&format!("  - {name}\n"));
        }
    }

    let scenario_count = report.scenario_comparisons.len() + report.new_scenarios.len();
    if report.total_regressions > 0 {
        out.push_str(&format!(
            "\nRESULT: {} regression(s) detected across {} scenarios\n",
            report.total_regressions, scenario_count,
        ));
    } else {
        out.push_str(&format!(
            "\nRESULT: No regressions detected across {} scenarios\n",
            scenario_count,
        ));
    }

    out
}

// ── Tests ───────────────────────────────────────────────────
