//! Interactive terminal dashboard.
//!
//! All view state lives in [`DashboardSession`]; rendering is a pure
//! function of the session and the loaded responses, and the command
//! loop only reads a line, updates the session and renders again.

use crate::analysis::{
    compute_health_and_recommendation, compute_metrics, extract_quotes, KeywordFilter,
    QuestionField,
};
use crate::cli::Theme;
use crate::config::DashboardConfig;
use crate::models::{Metrics, PaceBucket, Response, ResponseSet};
use crate::report::framing::{
    confidence_status, dominant_pace, facilitator_status, hands_on_status, insight_line,
    low_sample_note, Status, Tone,
};
use crate::survey::{backgrounds, select, workshops, FilterOutcome, Selection};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::io::{BufRead, Write};
use tracing::debug;

const BAR_WIDTH: usize = 20;

/// Which body the dashboard shows under the metric cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Quotes, suggestions and commitments.
    #[default]
    Summary,
    /// Confidence and facilitator distributions.
    Detail,
}

impl View {
    pub fn toggled(self) -> Self {
        match self {
            View::Summary => View::Detail,
            View::Detail => View::Summary,
        }
    }
}

/// Per-session dashboard state.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSession {
    pub theme: Theme,
    pub selection: Selection,
    pub view: View,
}

impl DashboardSession {
    /// Start on the first workshop (sorted), all backgrounds.
    pub fn new(theme: Theme, responses: &[Response]) -> Self {
        let selection = workshops(responses)
            .into_iter()
            .next()
            .map(Selection::workshop)
            .unwrap_or_default();

        Self {
            theme,
            selection,
            view: View::default(),
        }
    }

    /// Apply a command. Returns an error message for out-of-range choices.
    pub fn apply(&mut self, command: &Command, responses: &[Response]) -> Result<(), String> {
        match command {
            Command::Workshop(n) => {
                let options = workshops(responses);
                let name = n
                    .checked_sub(1)
                    .and_then(|i| options.get(i))
                    .ok_or_else(|| format!("No workshop number {}", n))?;
                // Background options depend on the workshop
                self.selection = Selection::workshop(name.clone());
            }
            Command::Background(n) => {
                let options = self.background_options(responses);
                let choice = options
                    .get(*n)
                    .ok_or_else(|| format!("No background number {}", n))?;
                self.selection.background = if *n == 0 {
                    None
                } else {
                    Some(choice.clone())
                };
            }
            Command::ToggleView => self.view = self.view.toggled(),
            Command::ToggleTheme => self.theme = self.theme.toggled(),
            Command::Help | Command::Quit => {}
        }
        debug!("Dashboard session: {:?}", self);
        Ok(())
    }

    /// "All backgrounds" followed by the sorted backgrounds of the
    /// selected workshop.
    pub fn background_options(&self, responses: &[Response]) -> Vec<String> {
        let in_workshop: Vec<Response> = match self.selection.workshop {
            Some(ref workshop) => responses
                .iter()
                .filter(|r| &r.session == workshop)
                .cloned()
                .collect(),
            None => responses.to_vec(),
        };

        let mut options = vec!["All backgrounds".to_string()];
        options.extend(backgrounds(&in_workshop));
        options
    }
}

/// A line typed at the dashboard prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Select workshop by its 1-based menu number.
    Workshop(usize),
    /// Select background by its menu number, 0 for all.
    Background(usize),
    ToggleView,
    ToggleTheme,
    Help,
    Quit,
}

/// Parse a prompt line; `None` for anything unrecognized.
pub fn parse_command(input: &str) -> Option<Command> {
    let mut parts = input.split_whitespace();
    let head = parts.next()?.to_lowercase();
    let arg = parts.next().map(str::parse::<usize>);

    match (head.as_str(), arg) {
        ("w", Some(Ok(n))) => Some(Command::Workshop(n)),
        ("b", Some(Ok(n))) => Some(Command::Background(n)),
        ("v", None) => Some(Command::ToggleView),
        ("t", None) => Some(Command::ToggleTheme),
        ("h" | "?", None) => Some(Command::Help),
        ("q", None) => Some(Command::Quit),
        _ => None,
    }
}

/// Responses the dashboard works on, plus a notice when they are not the
/// requested source.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub responses: Vec<Response>,
    pub source: String,
    pub notice: Option<String>,
}

struct Palette {
    heading: &'static str,
    accent: &'static str,
    muted: &'static str,
    reset: &'static str,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                heading: "\x1b[1;96m",
                accent: "\x1b[95m",
                muted: "\x1b[37m",
                reset: "\x1b[0m",
            },
            Theme::Light => Self {
                heading: "\x1b[1;34m",
                accent: "\x1b[35m",
                muted: "\x1b[90m",
                reset: "\x1b[0m",
            },
        }
    }

    fn tone(&self, tone: Tone) -> &'static str {
        match tone {
            Tone::Good => "\x1b[32m",
            Tone::Warn => "\x1b[33m",
            Tone::Alert => "\x1b[31m",
        }
    }
}

fn bar(pct: f64) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Render the full dashboard for the current session.
pub fn render(
    session: &DashboardSession,
    data: &DashboardData,
    config: &DashboardConfig,
    now: DateTime<Local>,
) -> String {
    let p = Palette::for_theme(session.theme);
    let mut out = String::new();

    out.push_str(&format!(
        "{}✨ Workshop Pulse Dashboard{}\n",
        p.heading, p.reset
    ));
    out.push_str(&format!(
        "{}Source: {}{}\n",
        p.muted, data.source, p.reset
    ));
    if let Some(ref notice) = data.notice {
        out.push_str(&format!("{}⚠️  {}{}\n", p.tone(Tone::Warn), notice, p.reset));
    }
    out.push('\n');

    out.push_str(&render_selectors(session, &data.responses, &p));

    let set = match select(&data.responses, &session.selection) {
        FilterOutcome::Matched(set) => set,
        other => {
            let message = other
                .empty_message()
                .unwrap_or_else(|| "No responses".to_string());
            out.push_str(&format!("\n{}{}{}\n", p.tone(Tone::Warn), message, p.reset));
            return out;
        }
    };

    let metrics = compute_metrics(&set);
    out.push_str(&render_hero(&set, &metrics, now, &p));
    out.push_str(&format!("\n{}📊 Core Metric Analysis{}\n", p.heading, p.reset));
    out.push_str(&render_cards(&metrics, &p));

    out.push('\n');
    match session.view {
        View::Summary => out.push_str(&render_summary(&set, config, &p)),
        View::Detail => out.push_str(&render_detail(&set, &p)),
    }

    out
}

fn render_selectors(session: &DashboardSession, responses: &[Response], p: &Palette) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}🎯 Workshops{}\n", p.heading, p.reset));
    for (i, name) in workshops(responses).iter().enumerate() {
        let marker = if session.selection.workshop.as_ref() == Some(name) {
            "▶"
        } else {
            " "
        };
        out.push_str(&format!("  {} {}. {}\n", marker, i + 1, name));
    }

    let current = session.selection.background.as_deref().unwrap_or("All backgrounds");
    let options = session.background_options(responses);
    out.push_str(&format!("{}Backgrounds:{}", p.muted, p.reset));
    for (i, name) in options.iter().enumerate() {
        let label = if name == current {
            format!(" [{}. {}]", i, name)
        } else {
            format!(" {}. {}", i, name)
        };
        out.push_str(&label);
    }
    out.push('\n');

    out
}

fn render_hero(set: &ResponseSet, metrics: &Metrics, now: DateTime<Local>, p: &Palette) -> String {
    let assessment = compute_health_and_recommendation(metrics);
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}{}{}\n",
        p.heading,
        set.scope.workshop_label(),
        p.reset
    ));
    out.push_str(&format!(
        "Overall Health  {}{:.0}/100{}\n",
        p.accent, assessment.health_score, p.reset
    ));
    out.push_str(&format!("{}\n", insight_line(&assessment)));
    out.push_str(&format!(
        "🎯 Next Action Focus: {}{}{}\n",
        p.accent, assessment.recommendation, p.reset
    ));
    out.push_str(&format!(
        "{}{} responses · Generated {}{}\n",
        p.muted,
        metrics.total,
        now.format("%B %d, %Y at %I:%M %p"),
        p.reset
    ));

    out
}

fn status_line(status: &Status, p: &Palette) -> String {
    format!("{}{}{}", p.tone(status.tone), status.label, p.reset)
}

fn render_cards(metrics: &Metrics, p: &Palette) -> String {
    let mut out = String::new();

    // Confidence
    let confidence = confidence_status(metrics);
    let confidence_sub = match low_sample_note(metrics.total) {
        Some(_) => format!(
            "{}❗ LOW SAMPLE ({} responses){}",
            p.muted, metrics.total, p.reset
        ),
        None => status_line(&confidence, p),
    };
    out.push_str(&format!(
        "\nConfidence Gains     {:.1}/5.0  {}\n  {}  target 3.5\n",
        metrics.confidence,
        confidence_sub,
        bar(metrics.confidence / 5.0 * 100.0)
    ));

    // Facilitator
    let facilitator = facilitator_status(metrics);
    out.push_str(&format!(
        "\nFacilitator Rating   {:.0}% excellent  {}\n  {}  {}\n",
        metrics.excellent_pct,
        status_line(&facilitator, p),
        bar(metrics.excellent_pct),
        facilitator.detail
    ));

    // Pacing
    let (pace_pct, pace_tone) = match dominant_pace(metrics) {
        PaceBucket::Just => (metrics.pace_just, Tone::Good),
        PaceBucket::Fast => (metrics.pace_fast, Tone::Warn),
        PaceBucket::Slow => (metrics.pace_slow, Tone::Warn),
    };
    out.push_str(&format!(
        "\nWorkshop Pacing      {}{:.0}% {}{}\n  ✓ Just Right: {:.0}%  ⚡ Too Fast: {:.0}%  🐢 Too Slow: {:.0}%\n",
        p.tone(pace_tone),
        pace_pct,
        dominant_pace(metrics),
        p.reset,
        metrics.pace_just,
        metrics.pace_fast,
        metrics.pace_slow
    ));

    // Hands-on
    let hands_on = hands_on_status(metrics);
    out.push_str(&format!(
        "\nHands-On Engagement  {:.0}% created deliverable  {} ({:.0}% total completion)\n  Created: {:.0}%  Followed: {:.0}%\n",
        metrics.hands_created,
        status_line(&hands_on, p),
        metrics.hands_completion,
        metrics.hands_created,
        metrics.hands_followed
    ));

    out
}

fn render_quote_list(title: &str, quotes: &[String], empty: &str, p: &Palette) -> String {
    let mut out = format!("{}{}{}\n", p.heading, title, p.reset);
    if quotes.is_empty() {
        out.push_str(&format!("  {}{}{}\n", p.muted, empty, p.reset));
    }
    for quote in quotes {
        out.push_str(&format!("  \"{}\"\n", quote));
    }
    out
}

fn render_summary(set: &ResponseSet, config: &DashboardConfig, p: &Palette) -> String {
    let praise = extract_quotes(
        set,
        QuestionField::Feedback,
        config.quotes,
        Some(&KeywordFilter::praise()),
    );
    let suggestions = extract_quotes(
        set,
        QuestionField::Feedback,
        config.quotes,
        Some(&KeywordFilter::suggestions()),
    );
    let actions = extract_quotes(set, QuestionField::Commitment, config.action_items, None);

    let mut out = String::new();
    out.push_str(&render_quote_list(
        "💚 What builders loved",
        &praise,
        "No explicit positive feedback found.",
        p,
    ));
    out.push_str(&render_quote_list(
        "🚧 Constructive Suggestions",
        &suggestions,
        "No explicit suggestions for improvement found.",
        p,
    ));
    out.push_str(&render_quote_list(
        "🚀 Commitment to Action",
        &actions,
        "No actionable commitments recorded yet.",
        p,
    ));
    out
}

/// Value counts ordered by count, highest first; ties keep first-seen order.
fn value_counts<I: IntoIterator<Item = String>>(values: I) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    counts
}

fn render_detail(set: &ResponseSet, p: &Palette) -> String {
    let mut out = format!("{}📈 Detailed Response Distributions{}\n", p.heading, p.reset);
    let total = set.len() as f64;

    out.push_str("Confidence Level (1-5)\n");
    let confidence = value_counts(
        set.iter()
            .filter_map(|r| r.confidence)
            .map(|c| format!("{}", c)),
    );
    for (value, count) in &confidence {
        out.push_str(&format!(
            "  {:>4}  {}  {}\n",
            value,
            bar(*count as f64 * 100.0 / total),
            count
        ));
    }

    out.push_str("Facilitator Rating\n");
    let ratings = value_counts(set.iter().map(|r| r.facilitator.to_string()));
    for (rating, count) in &ratings {
        out.push_str(&format!("  {:<18} {}\n", rating, count));
    }

    out
}

fn help_text() -> &'static str {
    "Commands: w <n> workshop · b <n> background (0 = all) · v toggle view · t toggle theme · h help · q quit"
}

/// Run the dashboard loop until `q` or end of input.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    data: &DashboardData,
    mut session: DashboardSession,
    config: &DashboardConfig,
) -> Result<DashboardSession> {
    writeln!(output, "{}", render(&session, data, config, Local::now()))?;
    writeln!(output, "{}", help_text())?;

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Help) => writeln!(output, "{}", help_text())?,
            Some(command) => match session.apply(&command, &data.responses) {
                Ok(()) => writeln!(output, "{}", render(&session, data, config, Local::now()))?,
                Err(message) => writeln!(output, "{}", message)?,
            },
            None if line.trim().is_empty() => {}
            None => writeln!(output, "Unknown command. {}", help_text())?,
        }
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::{ingest, source::sample_table};
    use chrono::TimeZone;

    fn sample_data() -> DashboardData {
        DashboardData {
            responses: ingest(&sample_table()).unwrap(),
            source: "built-in sample data".to_string(),
            notice: None,
        }
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 14, 9, 30, 0).single().unwrap()
    }

    #[test]
    fn test_session_starts_on_first_sorted_workshop() {
        let data = sample_data();
        let session = DashboardSession::new(Theme::Dark, &data.responses);
        assert_eq!(
            session.selection.workshop.as_deref(),
            Some("Advanced Python")
        );
        assert_eq!(session.view, View::Summary);
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("w 2"), Some(Command::Workshop(2)));
        assert_eq!(parse_command(" B 0 "), Some(Command::Background(0)));
        assert_eq!(parse_command("v"), Some(Command::ToggleView));
        assert_eq!(parse_command("t"), Some(Command::ToggleTheme));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("w"), None);
        assert_eq!(parse_command("w two"), None);
        assert_eq!(parse_command("x"), None);
    }

    #[test]
    fn test_apply_commands() {
        let data = sample_data();
        let mut session = DashboardSession::new(Theme::Dark, &data.responses);

        session.apply(&Command::Workshop(2), &data.responses).unwrap();
        assert_eq!(
            session.selection.workshop.as_deref(),
            Some("Data Viz Fundamentals")
        );

        let options = session.background_options(&data.responses);
        assert_eq!(options, vec!["All backgrounds", "Beginner", "Intermediate"]);

        session.apply(&Command::Background(2), &data.responses).unwrap();
        assert_eq!(session.selection.background.as_deref(), Some("Intermediate"));

        session.apply(&Command::Background(0), &data.responses).unwrap();
        assert!(session.selection.background.is_none());

        assert!(session.apply(&Command::Workshop(9), &data.responses).is_err());
        assert!(session.apply(&Command::Workshop(0), &data.responses).is_err());

        session.apply(&Command::ToggleTheme, &data.responses).unwrap();
        session.apply(&Command::ToggleView, &data.responses).unwrap();
        assert_eq!(session.theme, Theme::Light);
        assert_eq!(session.view, View::Detail);
    }

    #[test]
    fn test_render_summary_view() {
        let data = sample_data();
        let session = DashboardSession::new(Theme::Dark, &data.responses);
        let out = render(&session, &data, &DashboardConfig::default(), now());

        assert!(out.contains("Workshop Pulse Dashboard"));
        assert!(out.contains("2 responses · Generated January 14, 2025 at 09:30 AM"));
        assert!(out.contains("Overall Health"));
        assert!(out.contains("LOW SAMPLE (2 responses)"));
        assert!(out.contains("What builders loved"));
        assert!(out.contains("\"Pacing was spot-on. Solid content.\""));
        assert!(out.contains("\"Too fast for me, slow down!\""));
        assert!(out.contains("\"Build a new dashboard with Streamlit.\""));
    }

    #[test]
    fn test_render_detail_view() {
        let data = sample_data();
        let mut session = DashboardSession::new(Theme::Light, &data.responses);
        session.view = View::Detail;
        let out = render(&session, &data, &DashboardConfig::default(), now());

        assert!(out.contains("Detailed Response Distributions"));
        assert!(out.contains("Confidence Level (1-5)"));
        assert!(out.contains("Facilitator Rating"));
        assert!(!out.contains("What builders loved"));
    }

    #[test]
    fn test_render_empty_background() {
        let data = sample_data();
        let mut session = DashboardSession::new(Theme::Dark, &data.responses);
        session.selection.background = Some("Intermediate".to_string());
        let out = render(&session, &data, &DashboardConfig::default(), now());

        assert!(out.contains("No responses for Advanced Python with the background: Intermediate"));
        assert!(!out.contains("Overall Health"));
    }

    #[test]
    fn test_render_shows_notice() {
        let mut data = sample_data();
        data.notice = Some("Could not load survey data, showing sample data".to_string());
        let session = DashboardSession::new(Theme::Dark, &data.responses);
        let out = render(&session, &data, &DashboardConfig::default(), now());
        assert!(out.contains("showing sample data"));
    }

    #[test]
    fn test_value_counts_order() {
        let counts = value_counts(
            ["5", "4", "5", "3", "4", "5"]
                .iter()
                .map(|s| s.to_string()),
        );
        assert_eq!(
            counts,
            vec![
                ("5".to_string(), 3),
                ("4".to_string(), 2),
                ("3".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_run_loop() {
        let data = sample_data();
        let session = DashboardSession::new(Theme::Dark, &data.responses);
        let input = std::io::Cursor::new("w 2\nt\nbogus\nw 7\nq\n");
        let mut output = Vec::new();

        let session = run(
            input,
            &mut output,
            &data,
            session,
            &DashboardConfig::default(),
        )
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            session.selection.workshop.as_deref(),
            Some("Data Viz Fundamentals")
        );
        assert_eq!(session.theme, Theme::Light);
        assert!(text.contains("Unknown command."));
        assert!(text.contains("No workshop number 7"));
    }
}
