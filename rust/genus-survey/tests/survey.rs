//! End-to-end survey runs: sweep, summary, JSON dump.

use genus_survey::config::SurveyConfig;
use genus_survey::report::write_json;
use genus_survey::run_survey;

#[test]
fn test_quick_survey_covers_range() {
    let config = SurveyConfig::quick();
    let survey = run_survey(&config);
    assert_eq!(survey.run.outcomes.len(), 21);
    assert_eq!(survey.run.skipped().count(), 0);
    assert_eq!(survey.summary.evaluated, 21);

    let total = survey.summary.total.as_ref().unwrap();
    // Genus 0 total is 4 + 630.
    assert!((total.descriptive.min - 634.0).abs() < 1e-9);
    let ci = total.bootstrap.as_ref().unwrap();
    assert!(ci.low <= total.descriptive.mean && total.descriptive.mean <= ci.high);
}

#[test]
fn test_parallel_survey_is_identical() {
    let config = SurveyConfig {
        max_genus: 60,
        bootstrap_resamples: 300,
        ..SurveyConfig::default()
    };
    let seq = run_survey(&config);
    let par = run_survey(&SurveyConfig { parallel: true, ..config });
    assert_eq!(seq.run, par.run);
    assert_eq!(seq.summary, par.summary);
}

#[test]
fn test_survey_past_overflow_reports_skips() {
    let config = SurveyConfig {
        min_genus: 150,
        max_genus: 180,
        bootstrap_resamples: 100,
        ..SurveyConfig::default()
    };
    let survey = run_survey(&config);
    let skipped: Vec<u32> = survey.run.skipped().map(|(g, _)| g.get()).collect();
    assert_eq!(skipped, (169..=180).collect::<Vec<_>>());
    assert_eq!(survey.summary.evaluated, 19);
    let total = survey.summary.total.as_ref().unwrap();
    assert!(total.descriptive.max.is_finite());
}

#[test]
fn test_write_json_round_trips_through_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("survey.json");
    let path = path.to_str().unwrap();

    let config = SurveyConfig {
        min_genus: 167,
        max_genus: 170,
        bootstrap_resamples: 10,
        ..SurveyConfig::default()
    };
    let survey = run_survey(&config);
    write_json(&survey, path).unwrap();

    let text = std::fs::read_to_string(path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let outcomes = value["run"]["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[0]["status"], "evaluated");
    assert_eq!(outcomes[0]["genus"], 167);
    assert_eq!(outcomes[2]["status"], "skipped");
    assert_eq!(outcomes[2]["error"]["Overflow"]["quantity"], "sft_invariants");
    assert_eq!(value["summary"]["evaluated"], 2);
}
