pub mod baseline;
pub mod scenarios;

use serde::{Deserialize, Serialize};

use crate::models::{EndpointRef, PlanOutcome, StyleConfig, TripRequest};
use crate::services::catalog::Catalog;
use crate::services::trip_planner::TripPlanner;

pub use baseline::{
    compare, format_comparison_report, load_baseline, save_baseline, Baseline, ComparisonReport,
};
pub use scenarios::{default_scenarios, route_66_catalog, route_66_entries};

/// A planning scenario for evaluation. Endpoints are catalog ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalScenario {
    pub name: String,
    pub start: String,
    pub end: String,
    pub requested_days: u32,
    pub style: StyleConfig,
}

impl EvalScenario {
    pub fn request(&self) -> TripRequest {
        TripRequest::new(
            EndpointRef::Id(self.start.clone()),
            EndpointRef::Id(self.end.clone()),
            self.requested_days,
            self.style.clone(),
        )
    }
}

/// Plan quality figures for one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMetrics {
    pub total_days: u32,
    pub total_miles: f32,
    /// Fraction of days within the daily limit
    pub compliance_rate: f32,
    pub longest_day_hours: f32,
    pub segments_split: usize,
    pub synthetic_stops: usize,
    pub warnings: usize,
}

impl PlanMetrics {
    pub fn from_outcome(outcome: &PlanOutcome) -> Self {
        let plan = &outcome.plan;
        let days = plan.segments.len();
        let compliant = plan.segments.iter().filter(|s| s.is_compliant).count();
        let longest_day_hours = plan
            .segments
            .iter()
            .map(|s| s.drive_time_hours.as_hours())
            .fold(0.0_f64, f64::max);

        PlanMetrics {
            total_days: plan.total_days,
            total_miles: plan.total_distance_miles.as_miles() as f32,
            compliance_rate: if days == 0 {
                0.0
            } else {
                compliant as f32 / days as f32
            },
            longest_day_hours: longest_day_hours as f32,
            segments_split: outcome.diagnostics.segments_split,
            synthetic_stops: outcome.diagnostics.synthetic_waypoints_inserted,
            warnings: outcome.diagnostics.warnings.len(),
        }
    }
}

/// Result for a single scenario across N runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: EvalScenario,
    pub runs: usize,
    /// Every run rendered byte-identical JSON
    pub deterministic: bool,
    pub metrics: Option<PlanMetrics>,
    pub error: Option<String>,
}

/// Plan once and render the outcome as compact JSON
fn render_run(
    planner: &TripPlanner,
    catalog: &Catalog,
    request: &TripRequest,
) -> crate::Result<(PlanOutcome, String)> {
    let outcome = planner.plan(request, catalog)?;
    let json = serde_json::to_string(&outcome)?;
    Ok((outcome, json))
}

/// Plan a scenario `runs` times and check the runs agree
pub fn run_scenario(
    planner: &TripPlanner,
    catalog: &Catalog,
    scenario: &EvalScenario,
    runs: usize,
) -> ScenarioResult {
    let request = scenario.request();
    let runs = runs.max(1);
    let mut rendered: Vec<String> = Vec::with_capacity(runs);
    let mut metrics = None;

    for _ in 0..runs {
        match render_run(planner, catalog, &request) {
            Ok((outcome, json)) => {
                metrics = Some(PlanMetrics::from_outcome(&outcome));
                rendered.push(json);
            }
            Err(e) => {
                tracing::warn!(scenario = %scenario.name, error = %e, "Scenario failed");
                return ScenarioResult {
                    scenario: scenario.clone(),
                    runs,
                    deterministic: true,
                    metrics: None,
                    error: Some(e.to_string()),
                };
            }
        }
    }

    ScenarioResult {
        scenario: scenario.clone(),
        runs,
        deterministic: rendered.windows(2).all(|w| w[0] == w[1]),
        metrics,
        error: None,
    }
}

/// Format a single scenario result for display
pub fn format_scenario_result(result: &ScenarioResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{} ({} to {}, {} days requested, style {} {:.1}h {}, {} runs)\n",
        result.scenario.name,
        result.scenario.start,
        result.scenario.end,
        result.scenario.requested_days,
        result.scenario.style.style_name,
        result.scenario.style.max_daily_drive_hours,
        result.scenario.style.enforcement_level,
        result.runs,
    ));

    if let Some(ref m) = result.metrics {
        out.push_str(&format!("  days:             {}\n", m.total_days));
        out.push_str(&format!("  total_miles:      {:.0}\n", m.total_miles));
        out.push_str(&format!(
            "  compliance:       {:.0}%\n",
            m.compliance_rate * 100.0
        ));
        out.push_str(&format!("  longest_day:      {:.2}h\n", m.longest_day_hours));
        out.push_str(&format!("  segments_split:   {}\n", m.segments_split));
        out.push_str(&format!("  synthetic_stops:  {}\n", m.synthetic_stops));
        out.push_str(&format!("  warnings:         {}\n", m.warnings));
    } else if let Some(ref e) = result.error {
        out.push_str(&format!("  failed: {}\n", e));
    }

    out.push_str(&format!(
        "  deterministic:    {}\n",
        if result.deterministic { "yes" } else { "NO" }
    ));

    out
}

/// Format the full evaluation report
pub fn format_report(results: &[ScenarioResult]) -> String {
    let mut report = String::from("=== Trip Plan Evaluation Report ===\n");

    for result in results {
        report.push_str(&format_scenario_result(result));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(name: &str) -> EvalScenario {
        default_scenarios()
            .into_iter()
            .find(|s| s.name == name)
            .unwrap()
    }

    #[test]
    fn test_single_day_scenario_is_fully_compliant() {
        let result = run_scenario(
            &TripPlanner::default(),
            &route_66_catalog(),
            &find("chicago_st_louis_1d_leisurely"),
            2,
        );

        assert!(result.error.is_none());
        assert!(result.deterministic);
        let metrics = result.metrics.unwrap();
        assert_eq!(metrics.total_days, 1);
        assert_eq!(metrics.compliance_rate, 1.0);
        assert!(metrics.longest_day_hours <= 6.0);
    }

    #[test]
    fn test_every_default_scenario_plans() {
        let planner = TripPlanner::default();
        let catalog = route_66_catalog();
        for scenario in default_scenarios() {
            let result = run_scenario(&planner, &catalog, &scenario, 2);
            assert!(result.error.is_none(), "{}: {:?}", scenario.name, result.error);
            assert!(result.deterministic, "{} not deterministic", scenario.name);
        }
    }

    #[test]
    fn test_render_run_produces_plan_json() {
        let scenario = find("chicago_st_louis_1d_leisurely");
        let (outcome, json) = render_run(
            &TripPlanner::default(),
            &route_66_catalog(),
            &scenario.request(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["plan"]["total_days"], outcome.plan.total_days);
        assert_eq!(value["plan"]["segments"][0]["start_waypoint"]["id"], "chicago");
    }

    #[test]
    fn test_failed_scenario_reports_error() {
        let mut scenario = find("chicago_st_louis_1d_leisurely");
        scenario.end = "route-67".to_string();

        let result = run_scenario(&TripPlanner::default(), &route_66_catalog(), &scenario, 3);
        assert!(result.metrics.is_none());
        assert!(result.error.unwrap().contains("route-67"));
    }

    #[test]
    fn test_report_lists_each_scenario() {
        let planner = TripPlanner::default();
        let catalog = route_66_catalog();
        let results: Vec<ScenarioResult> = default_scenarios()
            .iter()
            .take(2)
            .map(|s| run_scenario(&planner, &catalog, s, 1))
            .collect();

        let report = format_report(&results);
        assert!(report.contains("chicago_st_louis_1d_leisurely"));
        assert!(report.contains("full_route_14d_leisurely"));
        assert!(report.contains("compliance:"));
    }
}
