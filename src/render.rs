use termimad::MadSkin;

use crate::model::{ChatTurn, ScanResult, Sender, SEVERITIES};

pub fn render_result_markdown(result: &ScanResult) -> String {
    let mut markdown = format!(
        "# Scan report\n\n**Target:** {}  \n**Level:** {}\n",
        result.target, result.level
    );

    if let Some(timestamp) = &result.timestamp {
        markdown.push_str(&format!("**Generated:** {}\n", timestamp));
    }

    // counts come from the service's own scoring and may bucket a finding
    // differently than its risk label
    markdown.push_str("\n## Service summary\n\n|Severity|Count|\n|:-|-:|\n");
    for severity in SEVERITIES {
        markdown.push_str(&format!("|{}|{}|\n", severity, result.count(*severity)));
    }

    markdown.push_str("\n## Vulnerabilities\n\n");
    markdown.push_str(&render_findings_markdown(result));

    if let Some(ai_summary) = &result.ai_summary {
        markdown.push_str("\n\n## AI summary\n\n");
        markdown.push_str(ai_summary);
    }

    markdown.push('\n');
    markdown
}

// findings are grouped by severity, in display order, keeping the service's
// order inside each group
fn render_findings_markdown(result: &ScanResult) -> String {
    if result.vulnerabilities.is_empty() {
        return "- *(none)*".to_string();
    }

    SEVERITIES
        .iter()
        .flat_map(|severity| {
            result
                .vulnerabilities
                .iter()
                .filter(move |finding| finding.risk == *severity)
        })
        .map(|finding| {
            let mut markdown = format!("- **{}** (`{}`)", finding.name, finding.risk);

            if !finding.description.is_empty() {
                markdown.push_str(&format!("\n  - Description: {}", finding.description));
            }

            if !finding.urls.is_empty() {
                markdown.push_str(&format!("\n  - URLs: {}", finding.urls.join(", ")));
            }

            if !finding.params.is_empty() {
                markdown.push_str(&format!("\n  - Params: {}", finding.params.join(", ")));
            }

            if !finding.solution.is_empty() {
                markdown.push_str(&format!("\n  - Solution: {}", finding.solution));
            }

            if let Some(suggestion) = &finding.extra_suggestion {
                markdown.push_str(&format!("\n  - Suggestion: {}", suggestion));
            }

            markdown
        })
        .collect::<Vec<String>>()
        .join("\n")
}

pub fn render_turn_markdown(turn: &ChatTurn) -> String {
    match turn.sender {
        Sender::User => format!("**you:** {}", turn.text),
        Sender::Assistant => format!("**assistant:** {}", turn.text),
    }
}

pub fn print_markdown(markdown: &str) {
    let skin = MadSkin::default();
    skin.print_text(markdown);
}
