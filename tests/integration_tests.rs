//! Integration tests for housing-ols.

use approx::assert_relative_eq;
use housing_ols::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const HEADER: &str = "neighborhood,crim,zn,indus,chas,nox,rooms,age,dis,rad,tax,ptratio,lstat,mv";

/// Rows where mv = 2 * rooms - 4 exactly, and crim varies independently.
fn linear_rows() -> Vec<String> {
    (0..20)
        .map(|i| {
            let rooms = 4.0 + i as f64 * 0.25;
            let crim = ((i * 7) % 11) as f64 * 0.1;
            let mv = 2.0 * rooms - 4.0;
            format!(
                "Town{},{},0,2.5,0,0.5,{},60,4,1,300,16,8,{}",
                i, crim, rooms, mv
            )
        })
        .collect()
}

fn write_csv(lines: &[String], newline: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let mut content = String::from(HEADER);
    for line in lines {
        content.push_str(newline);
        content.push_str(line);
    }
    content.push_str(newline);
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn config_for(path: &Path, iterations: usize, verbose: bool, mode: ExecutionMode) -> RunConfig {
    RunConfig {
        data_path: path.to_path_buf(),
        iterations,
        verbose,
        mode,
        ..RunConfig::default()
    }
}

#[test]
fn test_load_columns_from_file() {
    let file = write_csv(&linear_rows(), "\n");
    let columns = load_columns(file.path(), Feature::Crim, Feature::Rooms, Feature::Mv).unwrap();

    assert_eq!(columns.len(), 20);
    assert_eq!(columns.predictor_a().len(), 20);
    assert_eq!(columns.predictor_b().len(), 20);
    assert_eq!(columns.predictor_b()[0], 4.0);
    assert_eq!(columns.response()[0], 4.0);
    assert_eq!(columns.response()[19], 2.0 * 8.75 - 4.0);
}

#[test]
fn test_mixed_line_endings_load_identically() {
    let rows = linear_rows();
    let lf = Dataset::from_path(write_csv(&rows, "\n").path()).unwrap();
    let cr = Dataset::from_path(write_csv(&rows, "\r").path()).unwrap();
    let crlf = Dataset::from_path(write_csv(&rows, "\r\n").path()).unwrap();

    assert_eq!(lf, cr);
    assert_eq!(lf, crlf);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_columns(
        "/definitely/not/here.csv",
        Feature::Crim,
        Feature::Rooms,
        Feature::Mv,
    )
    .unwrap_err();
    assert!(matches!(err, OlsError::IoError(_)));
    assert!(err.is_load_error());
}

#[test]
fn test_bad_row_anywhere_fails_whole_load() {
    let mut rows = linear_rows();
    rows[15] = "Town15,0.1,0,2.5,0,0.5,n/a,60,4,1,300,16,8,20".to_string();
    let file = write_csv(&rows, "\n");

    let err = Dataset::from_path(file.path()).unwrap_err();
    match err {
        OlsError::ParseError { line, .. } => assert_eq!(line, 17),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_pipeline_fits_known_line() {
    let file = write_csv(&linear_rows(), "\n");
    let columns = load_columns(file.path(), Feature::Crim, Feature::Rooms, Feature::Mv).unwrap();

    let result = perform_iteration(1, &columns);
    assert_eq!(result.predictor_b.x_name, "Rooms");
    assert_relative_eq!(result.predictor_b.intercept, -4.0, epsilon = 1e-9);
    assert_relative_eq!(result.predictor_b.slope, 2.0, epsilon = 1e-9);
    assert_relative_eq!(result.predictor_b.r_squared, 1.0, epsilon = 1e-9);

    assert_eq!(result.predictor_a.x_name, "Crim");
    assert!(result.predictor_a.r_squared >= 0.0);
    assert!(result.predictor_a.r_squared < 1.0);
}

#[test]
fn test_sequential_and_parallel_agree() {
    let file = write_csv(&linear_rows(), "\n");
    let columns = load_columns(file.path(), Feature::Crim, Feature::Rooms, Feature::Mv).unwrap();

    let (seq, _) = IterationRunner::new(ExecutionMode::Sequential)
        .run_to_channel(64, &columns)
        .unwrap();
    let (par, _) = IterationRunner::new(ExecutionMode::Parallel)
        .run_to_channel(64, &columns)
        .unwrap();

    let seq: Vec<_> = seq.iter().collect();
    let mut par: Vec<_> = par.iter().collect();
    par.sort_by_key(|r| r.iteration);

    assert_eq!(seq, par);
    assert_eq!(
        seq.iter().map(|r| r.iteration).collect::<Vec<_>>(),
        (1..=64).collect::<Vec<_>>()
    );
}

#[test]
fn test_run_pipeline_verbose_output() {
    let file = write_csv(&linear_rows(), "\n");
    let config = config_for(file.path(), 3, true, ExecutionMode::Sequential);

    let mut output = Vec::new();
    let report = run_pipeline(&config, &mut output).unwrap();
    assert_eq!(report.rows, 20);
    assert_eq!(report.consumed, 3);
    assert_eq!(report.run.iterations, 3);

    let output = String::from_utf8(output).unwrap();
    assert_eq!(output.matches("Iteration ").count(), 3);
    assert!(output.contains("Rooms vs Median Value: -4.00 + 2.00 * Rooms , R-squared: "));
    assert!(output.ends_with("Finished all iterations\n"));
}

#[test]
fn test_run_pipeline_zero_iterations() {
    let file = write_csv(&linear_rows(), "\n");
    let config = config_for(file.path(), 0, true, ExecutionMode::Parallel);

    let mut output = Vec::new();
    let report = run_pipeline(&config, &mut output).unwrap();
    assert_eq!(report.consumed, 0);
    assert_eq!(String::from_utf8(output).unwrap(), "Finished all iterations\n");
}

#[test]
fn test_run_pipeline_load_failure_produces_no_output() {
    let mut rows = linear_rows();
    rows.push("Broken,1,2,3".to_string());
    let file = write_csv(&rows, "\n");
    let config = config_for(file.path(), 5, true, ExecutionMode::Sequential);

    let mut output = Vec::new();
    let err = run_pipeline(&config, &mut output).unwrap_err();
    assert!(matches!(err, OlsError::ParseError { .. }));
    assert!(output.is_empty());
}

#[test]
fn test_constant_feature_yields_sentinels() {
    // chas is 0 in every row, so regressing on it is undefined.
    let file = write_csv(&linear_rows(), "\n");
    let columns = load_columns(file.path(), Feature::Chas, Feature::Rooms, Feature::Mv).unwrap();

    let result = perform_iteration(1, &columns);
    assert!(result.predictor_a.slope.is_nan());
    assert!(result.predictor_a.intercept.is_nan());
    assert!(result.predictor_a.r_squared.is_nan());
    assert!(!result.predictor_b.is_degenerate());
}
