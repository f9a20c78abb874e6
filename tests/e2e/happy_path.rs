use super::*;

const SCAN_RESPONSE: &str = r#"{
    "target": "https://shop.example.com",
    "level": 2,
    "summary": {"Critical": 1, "High": 0, "Medium": 1, "Low": 0},
    "vulnerabilities": [
        {
            "name": "SQL Injection",
            "risk": "High",
            "urls": ["https://shop.example.com/item?id=1"],
            "params": ["id"],
            "solution": "Use parameterized queries.",
            "extra_suggestion": "Use parameterized queries/ORM. Never concatenate user input into SQL."
        },
        {
            "name": "Content Security Policy (CSP) Header Not Set",
            "risk": "Medium",
            "urls": ["https://shop.example.com/"]
        }
    ],
    "ai_summary": "Fix the SQL injection first.",
    "timestamp": "2025-03-01 09:30:00 UTC"
}"#;

#[test]
fn scan_prints_normalized_result_as_json() {
    let ctx = TestContext::new();
    let service = FakeService::json(200, SCAN_RESPONSE);

    let result = ctx.run_scanboard(&[
        "--api-url",
        &service.url,
        "scan",
        "https://shop.example.com",
        "--level",
        "2",
        "--json",
    ]);

    assert_success(&result);

    let request = service.request();
    assert!(request.starts_with("POST /api/scan"), "got request: {request}");
    assert!(request.contains(r#""url":"https://shop.example.com""#));
    assert!(request.contains(r#""level":2"#));

    let parsed: serde_json::Value =
        serde_json::from_str(&result.stdout).expect("stdout should be JSON");

    assert_eq!(parsed["target"], "https://shop.example.com");
    assert_eq!(parsed["summary"]["Critical"], 1);
    assert_eq!(parsed["summary"]["Low"], 0);
    assert_eq!(parsed["vulnerabilities"].as_array().map(Vec::len), Some(2));
    assert_eq!(parsed["vulnerabilities"][1]["params"], serde_json::json!([]));
    assert_eq!(parsed["ai_summary"], "Fix the SQL injection first.");
}

#[test]
fn scan_renders_findings_as_text() {
    let ctx = TestContext::new();
    let service = FakeService::json(200, SCAN_RESPONSE);

    let result = ctx.run_scanboard(&["--api-url", &service.url, "scan", "https://shop.example.com"]);

    assert_success(&result);
    assert_output_contains(&result, "SQL Injection");
    assert_output_contains(&result, "Fix the SQL injection first.");
}

#[test]
fn scan_surfaces_service_error() {
    let ctx = TestContext::new();
    let service = FakeService::json(500, r#"{"error": "ZAP is not running"}"#);

    let result = ctx.run_scanboard(&["--api-url", &service.url, "scan", "https://example.com"]);

    assert_failure(&result);
    assert_stderr_contains(&result, "ZAP is not running");
}

#[test]
fn scan_surfaces_invalid_response() {
    let ctx = TestContext::new();
    let service = FakeService::respond_once(200, "text/html", b"<html>oops</html>");

    let result = ctx.run_scanboard(&["--api-url", &service.url, "scan", "https://example.com"]);

    assert_failure(&result);
    assert_stderr_contains(&result, "Invalid server response");
}

#[test]
fn chat_prints_the_reply() {
    let ctx = TestContext::new();
    let service = FakeService::json(200, r#"{"reply": "Enable HttpOnly on cookies."}"#);

    let result = ctx.run_scanboard(&[
        "--api-url",
        &service.url,
        "chat",
        "how do I secure cookies?",
        "--with-scan",
    ]);

    assert_success(&result);
    assert_output_contains(&result, "Enable HttpOnly on cookies.");

    let request = service.request();
    assert!(request.starts_with("POST /api/chat"));
    assert!(request.contains(r#""include_scan":true"#));
}

#[test]
fn report_is_written_to_disk() {
    let ctx = TestContext::new();
    let service = FakeService::respond_once(200, "application/pdf", b"%PDF-1.4 fake report");

    let result = ctx.run_scanboard(&["--api-url", &service.url, "report", "--out", "out/report.pdf"]);

    assert_success(&result);
    ctx.assert_file_exists("out/report.pdf");

    let request = service.request();
    assert!(request.starts_with("GET /api/report/pdf"));
}
