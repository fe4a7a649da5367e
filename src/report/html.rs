//! Branded HTML report generation.
//!
//! Produces a self-contained page with an embedded stylesheet: a cover
//! followed by a detail page, laid out to print cleanly to PDF.

use crate::models::{Metrics, Report, StrengthTally};
use crate::report::framing::{
    confidence_status, facilitator_status, hands_on_status, insight_line, low_sample_note,
    pace_status, Status,
};

/// Render a report as a standalone HTML document.
pub fn generate_html_report(report: &Report) -> String {
    let metadata = &report.metadata;

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Workshop Report - {title}</title>
    <style>{css}</style>
</head>
<body>
    {cover}
    <div class="page-break"></div>
    <div class="container">
        {overview}
        {metrics}
        {facilitator}
        {pacing}
        {hands_on}
        {strengths}
        {testimonials}
        {action_items}
        {recommendations}
        {footer}
    </div>
</body>
</html>"#,
        title = html_escape(&metadata.workshop),
        css = inline_css(),
        cover = render_cover(report),
        overview = render_overview(report),
        metrics = render_metrics_grid(&report.metrics),
        facilitator = render_facilitator(&report.metrics),
        pacing = render_pacing(&report.metrics),
        hands_on = render_hands_on(&report.metrics),
        strengths = render_strengths(&report.strengths),
        testimonials = render_quotes("💬 What Builders Loved", "quote", &report.testimonials),
        action_items = render_quotes(
            "🎯 What Builders Will Try",
            "action",
            &report.action_items
        ),
        recommendations = render_recommendations(report),
        footer = render_footer(report),
    )
}

fn render_cover(report: &Report) -> String {
    let metadata = &report.metadata;
    let background = metadata
        .background
        .as_ref()
        .map(|b| format!("<p><strong>Background:</strong> {}</p>", html_escape(b)))
        .unwrap_or_default();

    format!(
        r#"<div class="cover">
        <div class="brand">📊 Workshop Pulse Analysis</div>
        <h1>{workshop}</h1>
        <div class="meta">
            <p><strong>Generated:</strong> {generated}</p>
            <p><strong>Total Responses:</strong> {total}</p>
            {background}
        </div>
    </div>"#,
        workshop = html_escape(&metadata.workshop),
        generated = metadata.generated_at.format("%B %d, %Y"),
        total = metadata.total_responses,
        background = background,
    )
}

fn render_overview(report: &Report) -> String {
    let note = low_sample_note(report.metrics.total)
        .map(|n| format!(r#"<p class="note">{}</p>"#, html_escape(&n)))
        .unwrap_or_default();

    format!(
        r#"<div class="section hero">
            <h2>📊 Performance Overview</h2>
            <div class="health">{score:.0}<span>/100</span></div>
            <p class="recommendation-text">{recommendation}</p>
            <p class="insights">{insights}</p>
            {note}
        </div>"#,
        score = report.assessment.health_score,
        recommendation = html_escape(report.assessment.recommendation.text()),
        insights = html_escape(&insight_line(&report.assessment)),
        note = note,
    )
}

fn render_metric_box(label: &str, value: &str, subtitle: &str, status: &Status) -> String {
    format!(
        r#"<div class="metric-box {class}">
                <div class="metric-label">{label}</div>
                <div class="metric-value">{value}</div>
                <div class="metric-subtitle">{subtitle}</div>
                <div class="metric-status">{status}</div>
            </div>"#,
        class = status.tone.class(),
        label = label,
        value = value,
        subtitle = subtitle,
        status = html_escape(status.label),
    )
}

fn render_metrics_grid(metrics: &Metrics) -> String {
    let boxes = [
        render_metric_box(
            "Confidence Score",
            &format!("{:.1}", metrics.confidence),
            "out of 5.0",
            &confidence_status(metrics),
        ),
        render_metric_box(
            "Facilitator Rating",
            &format!("{:.0}%", metrics.excellent_pct),
            "rated excellent",
            &facilitator_status(metrics),
        ),
        render_metric_box(
            "Perfect Pacing",
            &format!("{:.0}%", metrics.pace_just),
            "just right pace",
            &pace_status(metrics),
        ),
        render_metric_box(
            "Hands-on Completion",
            &format!("{:.0}%", metrics.hands_completion),
            "completed deliverables",
            &hands_on_status(metrics),
        ),
    ];

    format!(r#"<div class="metrics">{}</div>"#, boxes.join("\n"))
}

fn render_table(rows: &[(&str, usize, f64)]) -> String {
    let mut table = String::from(
        "<table>\n<tr><th>Feedback</th><th>Count</th><th>Percentage</th></tr>\n",
    );
    for (label, count, pct) in rows {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.0}%</td></tr>\n",
            label, count, pct
        ));
    }
    table.push_str("</table>");
    table
}

fn render_status(status: &Status) -> String {
    format!(
        r#"<p class="status {}">{} <strong>{}</strong> - {}</p>"#,
        status.tone.class(),
        status.tone.emoji(),
        html_escape(status.label),
        html_escape(&status.detail)
    )
}

fn render_facilitator(metrics: &Metrics) -> String {
    let counts = &metrics.counts;
    format!(
        r#"<div class="section">
            <h3>👩‍🏫 Facilitator Quality</h3>
            {table}
            {status}
        </div>"#,
        table = render_table(&[
            ("🌟 Excellent", counts.excellent, metrics.excellent_pct),
            (
                "✅ Good or higher",
                counts.excellent + counts.good,
                metrics.good_pct
            ),
        ]),
        status = render_status(&facilitator_status(metrics)),
    )
}

fn render_pacing(metrics: &Metrics) -> String {
    let counts = &metrics.counts;
    format!(
        r#"<div class="section">
            <h3>⏱️ Pacing Analysis</h3>
            {table}
            {status}
        </div>"#,
        table = render_table(&[
            ("Just Right ✅", counts.pace_just, metrics.pace_just),
            ("Too Fast 🚀", counts.pace_fast, metrics.pace_fast),
            ("Too Slow 🐢", counts.pace_slow, metrics.pace_slow),
        ]),
        status = render_status(&pace_status(metrics)),
    )
}

fn render_hands_on(metrics: &Metrics) -> String {
    let counts = &metrics.counts;
    format!(
        r#"<div class="section">
            <h3>🛠️ Hands-On Engagement</h3>
            <p>Completion Rate: <strong>{completion:.0}%</strong></p>
            <ul>
                <li>✅ Created deliverables: {created} builders ({created_pct:.0}%)</li>
                <li>🔄 Started but need to finish: {followed} builders ({followed_pct:.0}%)</li>
            </ul>
            {status}
        </div>"#,
        completion = metrics.hands_completion,
        created = counts.hands_created,
        created_pct = metrics.hands_created,
        followed = counts.hands_followed,
        followed_pct = metrics.hands_followed,
        status = render_status(&hands_on_status(metrics)),
    )
}

fn render_strengths(strengths: &[StrengthTally]) -> String {
    if strengths.is_empty() {
        return String::new();
    }

    let items: String = strengths
        .iter()
        .map(|t| {
            format!(
                "<li><strong>{}</strong> - {} mentions ({:.0}%)</li>\n",
                html_escape(&t.strength),
                t.count,
                t.pct
            )
        })
        .collect();

    format!(
        r#"<div class="section">
            <h3>💪 Facilitator Strengths</h3>
            <ol>
{items}            </ol>
        </div>"#,
        items = items,
    )
}

fn render_quotes(heading: &str, class: &str, quotes: &[String]) -> String {
    let body: String = if quotes.is_empty() {
        r#"<p class="empty">No responses yet.</p>"#.to_string()
    } else {
        quotes
            .iter()
            .map(|q| format!("<div class=\"{}\">\"{}\"</div>\n", class, html_escape(q)))
            .collect()
    };

    format!(
        r#"<div class="section">
            <h3>{heading}</h3>
            {body}
        </div>"#,
        heading = heading,
        body = body,
    )
}

fn render_recommendations(report: &Report) -> String {
    let insights: String = report
        .assessment
        .insights
        .iter()
        .map(|i| format!("<li>{}</li>\n", html_escape(i)))
        .collect();

    format!(
        r#"<div class="section">
            <h3>📈 Recommended Next Step</h3>
            <div class="recommendation">{recommendation}</div>
            <ul>
{insights}            </ul>
        </div>"#,
        recommendation = html_escape(report.assessment.recommendation.text()),
        insights = insights,
    )
}

fn render_footer(report: &Report) -> String {
    format!(
        r#"<div class="footer">
            <p><strong>Workshop Pulse Facilitator Report</strong></p>
            <p>Generated {generated} from {source}</p>
        </div>"#,
        generated = report.metadata.generated_at.format("%B %d, %Y at %I:%M %p"),
        source = html_escape(&report.metadata.source),
    )
}

fn inline_css() -> &'static str {
    r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; color: #2b2b2b; background: #f1eae7; margin: 0; }
.container { max-width: 860px; margin: 0 auto; background: #fff; padding: 40px; }
.cover { max-width: 860px; margin: 0 auto; min-height: 90vh; display: flex; flex-direction: column; justify-content: center; padding: 40px; background: #473dc6; color: #fff; box-sizing: border-box; }
.cover h1 { font-size: 36px; margin: 20px 0; }
.brand { font-size: 14px; letter-spacing: 2px; text-transform: uppercase; color: #cfe6ff; }
.meta p { margin: 4px 0; }
.page-break { page-break-after: always; }
.section { margin-bottom: 32px; }
.section h3 { color: #150e60; border-bottom: 2px solid #caa3d6; padding-bottom: 6px; }
.hero { background: #cfe6ff; padding: 24px; border-radius: 8px; }
.health { font-size: 48px; font-weight: 700; color: #473dc6; }
.health span { font-size: 18px; color: #150e60; }
.insights, .note { font-size: 13px; }
.metrics { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; margin-bottom: 32px; }
.metric-box { border: 1px solid #caa3d6; border-radius: 8px; padding: 12px; text-align: center; }
.metric-label { font-size: 12px; text-transform: uppercase; }
.metric-value { font-size: 28px; font-weight: 700; color: #473dc6; }
.metric-subtitle, .metric-status { font-size: 11px; }
.good .metric-status, .status.good { color: #1f7a3a; }
.warn .metric-status, .status.warn { color: #a86500; }
.alert .metric-status, .status.alert { color: #b3261e; }
table { width: 100%; border-collapse: collapse; font-size: 13px; }
th, td { text-align: left; padding: 6px 8px; border-bottom: 1px solid #f1eae7; }
th { background: #473dc6; color: #fff; }
.quote { background: #f1eae7; border-left: 4px solid #caa3d6; padding: 10px 14px; margin: 8px 0; font-style: italic; }
.action, .recommendation { background: #cfe6ff; padding: 10px 14px; margin: 8px 0; border-radius: 4px; }
.footer { text-align: center; font-size: 11px; color: #fff; background: #150e60; padding: 20px; margin-top: 40px; }
@media print { body { background: #fff; } .container, .cover { max-width: none; } }
"#
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
