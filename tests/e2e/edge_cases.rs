use super::*;

// nothing listens on the discard port, so any request would fail loudly
const UNREACHABLE: &str = "http://127.0.0.1:9";

#[test]
fn scan_rejects_invalid_target_before_any_request() {
    let ctx = TestContext::new();

    for target in ["not a url", "", "example.com"] {
        let result = ctx.run_scanboard(&["--api-url", UNREACHABLE, "scan", target]);

        assert_failure(&result);
        assert_stderr_contains(&result, "Please enter a valid URL");
    }
}

#[test]
fn scan_rejects_out_of_range_level() {
    let ctx = TestContext::new();
    let result = ctx.run_scanboard(&[
        "--api-url",
        UNREACHABLE,
        "scan",
        "https://example.com",
        "--level",
        "4",
    ]);

    assert_failure(&result);
    assert_stderr_contains(&result, "1..=3");
}

#[test]
fn scan_reports_unreachable_service() {
    let ctx = TestContext::new();
    let result = ctx.run_scanboard(&["--api-url", UNREACHABLE, "scan", "https://example.com"]);

    assert_failure(&result);
}

#[test]
fn broken_config_file_is_reported() {
    let ctx = TestContext::new();
    ctx.write_file("scanboard.toml", "[service\nbase_url = ");

    let result = ctx.run_scanboard(&["scan", "https://example.com"]);

    assert_failure(&result);
    assert_stderr_contains(&result, "invalid config file");
}

#[test]
fn inverted_progress_bounds_are_rejected() {
    let ctx = TestContext::new();
    ctx.write_file("scanboard.toml", "[progress]\nmin_step = 9\nmax_step = 2\n");

    let result = ctx.run_scanboard(&["scan", "https://example.com"]);

    assert_failure(&result);
    assert_stderr_contains(&result, "min_step");
}

#[test]
fn chat_marks_transport_errors_in_the_reply() {
    let ctx = TestContext::new();
    let result = ctx.run_scanboard(&["--api-url", UNREACHABLE, "chat", "hello"]);

    assert_success(&result);
    assert_output_contains(&result, "⚠️");
}
