use std::fs;
use std::path::Path;

use bmcstat_core::model::Solver;
use bmcstat_core::report::summary::Summary;
use bmcstat_core::{run_report, ReportConfig, StatsError};
use tempfile::TempDir;

const AI4BMC_CSV: &str = "\
job_name,result,seahorn_total_time,bmc_solve_time,bmc_circuit_size,bmc_dag_size,pp_crab_time,pp_crab_range_time,opsem_crab_time,opsem_crab_range_time,pp.isderef.solve,pp.isderef.not.solve,opsem.isderef.solve,opsem.isderef.not.solve,pp_loc,opsem_loc
swap,TRUE,2.0,1.0,120,300,0.5,0.5,0.0,0.0,8,2,1,1,40,90
hash_string,TRUE,100.0,60.0,900,2000,10.0,0.0,20.0,0.0,1,9,1,3,55,140
trivial,TRUE,1.0,0.5,10,20,0.0,0.0,0.0,0.0,0,0,0,0,5,5
loop,,,,,,1.0,0.0,1.0,0.0,2,2,1,1,30,60
stable,TRUE,19.0,12.0,200,400,1.0,0.0,0.0,0.0,4,0,nan,nan,20,40
";

const SEABMC_CSV: &str = "\
job_name,result,seahorn_total_time,bmc_solve_time,bmc_circuit_size,bmc_dag_size
swap,TRUE,10.0,8.0,150,350
hash_string,TRUE,20.0,15.0,800,1900
trivial,TRUE,1.0,0.5,10,20
loop,TRUE,800.0,790.0,5000,9000
stable,TRUE,22.0,14.0,210,410
only_bmc,FALSE,3.0,1.0,10,10
";

fn write_fixtures(data_dir: &Path) {
    fs::create_dir_all(data_dir).unwrap();
    for solver in ["Z3", "Yices2"] {
        fs::write(data_dir.join(format!("AI4BMC_{solver}.csv")), AI4BMC_CSV).unwrap();
        fs::write(data_dir.join(format!("SEABMC_{solver}.csv")), SEABMC_CSV).unwrap();
    }
}

fn config(root: &TempDir) -> ReportConfig {
    let data_dir = root.path().join("data");
    write_fixtures(&data_dir);
    ReportConfig {
        data_dir,
        result_dir: root.path().join("paper_results"),
        ..ReportConfig::default()
    }
}

#[test]
fn test_report_counts_and_artifacts() {
    let root = TempDir::new().unwrap();
    let cfg = config(&root);

    let report = run_report(&cfg).unwrap();
    let text = &report.text;

    assert!(text.contains("Note that the timeout threshold is 900 seconds."));
    assert!(text.contains("-- Reading the result of AI4BMC from AI4BMC_Z3.csv"));
    assert!(text.contains("-- The number of cases with no dereference checks: 1."));
    assert!(text.contains("-- Total cases: 4"));
    assert!(text.contains("--- Each pipeline may have different timeout cases."));
    assert!(text.contains("\tAI4BMC timeout cases: [\"loop\"]"));
    assert!(text.contains("- With Z3, total cases: 3"));
    assert!(text.contains("-- There are 1 cases with no significant timing changes"));
    assert!(text.contains("--- Speed up other cases: 1"));
    assert!(text.contains("--- Overall, the average time spend on AbsInt time is 1.00 seconds."));
    assert!(text.contains("--- Slow down other cases: 1"));
    assert!(text.contains("spent less than AI4BMC spent: 1"));
    assert!(text.contains("- The number of cases that AbsInt hard to prove: 1"));
    // tables and the legend are details-only
    assert!(!text.contains("Explanation of columns"));
    assert!(!text.contains(&"-".repeat(34)));

    assert!(report.warnings.is_empty());
    assert!(cfg.plot_path().exists());
    assert!(!cfg.explanation_path().exists());

    let summary = Summary::load(cfg.summary_path()).unwrap();
    let z3 = summary.solver(Solver::Z3).unwrap();
    assert_eq!(z3.excluded, 1);
    assert_eq!(z3.joined, 4);
    assert_eq!(z3.timeouts, vec!["loop".to_string()]);
    assert!(!z3.same_timeouts);
    assert_eq!(z3.buckets.cases, 3);
    assert_eq!(z3.buckets.stable, 1);
    assert_eq!(z3.buckets.speedups, 1);
    assert_eq!(z3.buckets.slowdowns_other, 1);
    assert_eq!(z3.buckets.edge_cases, 1);
    assert_eq!(z3.buckets.slow_light_absint.count, 1);

    let precision = z3.precision.as_ref().unwrap();
    assert_eq!(precision.pre_majority, 2);
    assert_eq!(precision.pre_full, 1);
    assert_eq!(precision.post_majority, 0);
    assert_eq!(precision.hard, 1);

    let yices = summary.solver(Solver::Yices2).unwrap();
    assert!(yices.precision.is_none());
}

#[test]
fn test_details_mode_prints_tables_and_writes_explanation() {
    let root = TempDir::new().unwrap();
    let cfg = config(&root).with_details(true);

    let report = run_report(&cfg).unwrap();
    assert!(report.text.contains("Explanation of columns shown in the tables:"));
    assert!(report.text.contains("Speed up%"));
    assert!(report.text.contains("hash_string"));
    assert!(cfg.explanation_path().exists());
    assert_eq!(report.artifacts.len(), 3);
}

#[test]
fn test_missing_table_is_fatal() {
    let root = TempDir::new().unwrap();
    let cfg = config(&root);
    fs::remove_file(cfg.data_dir.join("SEABMC_Yices2.csv")).unwrap();

    let err = run_report(&cfg).unwrap_err();
    assert!(matches!(err, StatsError::ResourceNotFound { ref resource, .. } if resource == "SEABMC_Yices2"));
}

#[test]
fn test_unwritable_results_do_not_abort() {
    let root = TempDir::new().unwrap();
    let mut cfg = config(&root);
    let blocker = root.path().join("blocked");
    fs::write(&blocker, "not a directory").unwrap();
    cfg.result_dir = blocker;

    let report = run_report(&cfg).unwrap();
    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings.iter().all(StatsError::is_recoverable));
    assert!(report.artifacts.is_empty());
    assert!(report.text.contains("-- Skipped: failed to write"));
    assert!(report.text.contains("PRECISION: ABSINT Solving Rate"));
}

#[test]
fn test_bad_number_is_a_coercion_error() {
    let root = TempDir::new().unwrap();
    let cfg = config(&root);
    let broken = SEABMC_CSV.replace("swap,TRUE,10.0", "swap,TRUE,ten");
    fs::write(cfg.data_dir.join("SEABMC_Z3.csv"), broken).unwrap();

    let err = run_report(&cfg).unwrap_err();
    assert!(err.to_string().contains("seahorn_total_time"));
    assert!(!err.is_recoverable());
}
