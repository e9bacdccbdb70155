use super::{
    AppConfig, DEFAULT_ENDPOINT, DEFAULT_FLUSH_MAX_MS, DEFAULT_FLUSH_MIN_MS, DEFAULT_SEGMENT_MS,
    DEFAULT_UPLOAD_SAMPLE_RATE,
};
use clap::Parser;
use std::time::Duration;

fn parse(args: &[&str]) -> AppConfig {
    let mut full = vec!["soundwatch"];
    full.extend_from_slice(args);
    AppConfig::parse_from(full)
}

#[test]
fn defaults_match_the_documented_cadence() {
    let config = parse(&[]);
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.segment_ms, DEFAULT_SEGMENT_MS);
    assert_eq!(config.flush_min_ms, DEFAULT_FLUSH_MIN_MS);
    assert_eq!(config.flush_max_ms, DEFAULT_FLUSH_MAX_MS);
    assert_eq!(config.upload_sample_rate, DEFAULT_UPLOAD_SAMPLE_RATE);
    assert!(!config.list_input_devices);
    assert!(config.input_device.is_none());
}

#[test]
fn defaults_pass_validation() {
    parse(&[]).validate().expect("defaults should be valid");
}

#[test]
fn zero_segment_duration_is_rejected() {
    let config = parse(&["--segment-ms", "0"]);
    let err = config.validate().expect_err("zero segment must fail");
    assert!(err.to_string().contains("--segment-ms"));
}

#[test]
fn inverted_flush_bounds_are_rejected() {
    let config = parse(&["--flush-min-ms", "9000", "--flush-max-ms", "4000"]);
    let err = config.validate().expect_err("inverted bounds must fail");
    assert!(err.to_string().contains("--flush-max-ms"));
}

#[test]
fn equal_flush_bounds_are_accepted() {
    let config = parse(&["--flush-min-ms", "7000", "--flush-max-ms", "7000"]);
    config.validate().expect("a fixed flush interval is fine");
}

#[test]
fn non_http_endpoint_is_rejected() {
    let config = parse(&["--endpoint", "ftp://example.com/predict"]);
    let err = config.validate().expect_err("non-http endpoint must fail");
    assert!(err.to_string().contains("--endpoint"));
}

#[test]
fn out_of_range_sample_rate_is_rejected() {
    let config = parse(&["--upload-sample-rate", "100"]);
    assert!(config.validate().is_err());
}

#[test]
fn session_config_mirrors_the_cli_durations() {
    let config = parse(&[
        "--segment-ms",
        "3000",
        "--flush-min-ms",
        "4000",
        "--flush-max-ms",
        "8000",
        "--log-timings",
    ]);
    let session = config.session_config();
    assert_eq!(session.segment, Duration::from_millis(3_000));
    assert_eq!(session.flush_min, Duration::from_millis(4_000));
    assert_eq!(session.flush_max, Duration::from_millis(8_000));
    assert_eq!(session.upload_rate, DEFAULT_UPLOAD_SAMPLE_RATE);
    assert!(session.log_timings);
}
