//! Results presenter.
//!
//! Turns submission states into terminal text. Holds no decision logic: the
//! sentiment variant, entity grouping and failure notices all come from the
//! models and services.

use std::fmt::Display;

use console::Style;

use crate::config::{DisplayConfig, ThemeMode};
use crate::error::AnalysisError;
use crate::models::{AnalysisInput, AnalysisResult, SentimentLabel, SentimentResult};
use crate::services::submission::SubmissionState;

const BAR_WIDTH: usize = 24;

/// Kind of a one-line status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Info,
    Warn,
    Error,
}

impl Status {
    fn glyph(self) -> &'static str {
        match self {
            Status::Success => "✓",
            Status::Info => "→",
            Status::Warn => "!",
            Status::Error => "✗",
        }
    }
}

/// Styles for one theme.
struct Palette {
    heading: Style,
    category: Style,
    muted: Style,
    positive: Style,
    negative: Style,
    neutral: Style,
    mixed: Style,
    error: Style,
}

impl Palette {
    fn for_theme(theme: ThemeMode) -> Self {
        match theme {
            ThemeMode::Light => Self {
                heading: Style::new().blue().bold(),
                category: Style::new().magenta().bold(),
                muted: Style::new().dim(),
                positive: Style::new().green(),
                negative: Style::new().red(),
                neutral: Style::new().black().bright(),
                mixed: Style::new().yellow(),
                error: Style::new().red().bold(),
            },
            ThemeMode::Dark => Self {
                heading: Style::new().cyan().bold(),
                category: Style::new().magenta().bright().bold(),
                muted: Style::new().white().dim(),
                positive: Style::new().green().bright(),
                negative: Style::new().red().bright(),
                neutral: Style::new().white(),
                mixed: Style::new().yellow().bright(),
                error: Style::new().red().bright().bold(),
            },
        }
    }
}

/// Renders states and results for the terminal.
pub struct Presenter {
    palette: Palette,
    color: bool,
    show_character_count: bool,
}

impl Presenter {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            palette: Palette::for_theme(display.theme),
            color: display.color,
            show_character_count: display.show_character_count,
        }
    }

    fn paint<D: Display>(&self, style: &Style, text: D) -> String {
        style.apply_to(text).force_styling(self.color).to_string()
    }

    pub fn heading(&self, title: &str) -> String {
        self.paint(&self.palette.heading, title)
    }

    /// Themed status glyph, e.g. `✓` in the success colour.
    pub fn glyph(&self, status: Status) -> String {
        let style = match status {
            Status::Success => &self.palette.positive,
            Status::Info => &self.palette.heading,
            Status::Warn => &self.palette.mixed,
            Status::Error => &self.palette.error,
        };
        self.paint(style, status.glyph())
    }

    /// `<glyph> <message>` on one line.
    pub fn status_line<D: Display>(&self, status: Status, message: D) -> String {
        format!("{} {}", self.glyph(status), message)
    }

    /// Indented secondary line under a status line.
    pub fn detail_line<D: Display>(&self, message: D) -> String {
        format!(
            "  {} {}",
            self.paint(&self.palette.muted, "→"),
            self.paint(&self.palette.muted, message)
        )
    }

    /// Highlight a value such as a path or endpoint.
    pub fn highlight<D: Display>(&self, text: D) -> String {
        self.paint(&self.palette.category, text)
    }

    /// Render whatever state the controller is in.
    pub fn render_state(&self, state: &SubmissionState) -> String {
        match state {
            SubmissionState::Idle => String::new(),
            SubmissionState::Loading => self.paint(&self.palette.muted, "Processing..."),
            SubmissionState::Succeeded(result) => self.render_result(result),
            SubmissionState::Failed(err) => self.render_failure(err),
        }
    }

    /// Character count line for text submissions.
    pub fn render_input_notice(&self, input: &AnalysisInput) -> Option<String> {
        if !self.show_character_count {
            return None;
        }
        input
            .character_count()
            .map(|count| self.paint(&self.palette.muted, format!("Characters: {}", count)))
    }

    pub fn render_result(&self, result: &AnalysisResult) -> String {
        [
            self.render_summary(result),
            self.render_entities(result),
            self.render_sentiment(result.sentiment()),
        ]
        .join("\n\n")
    }

    pub fn render_failure(&self, err: &AnalysisError) -> String {
        format!(
            "{}\n  {}",
            self.status_line(Status::Error, err.user_message()),
            self.paint(&self.palette.muted, err)
        )
    }

    fn render_summary(&self, result: &AnalysisResult) -> String {
        format!("{}\n{}", self.heading("Summary"), result.summary())
    }

    fn render_entities(&self, result: &AnalysisResult) -> String {
        let groups = result.entity_groups();
        let mut out = self.heading("Entities");

        if groups.is_empty() {
            out.push('\n');
            out.push_str(&self.paint(&self.palette.muted, "No entities found."));
            return out;
        }

        for group in groups {
            out.push_str(&format!(
                "\n  {} {}",
                self.paint(&self.palette.category, &group.category),
                self.paint(&self.palette.muted, format!("({})", group.members.len()))
            ));
            out.push_str(&format!("\n    {}", group.members.join(", ")));
        }
        out
    }

    fn render_sentiment(&self, sentiment: &SentimentResult) -> String {
        let mut out = self.heading("Sentiment Analysis");

        match *sentiment {
            SentimentResult::Distribution {
                positive,
                neutral,
                negative,
                compound,
            } => {
                let overall = sentiment.overall_label();
                out.push_str(&format!(
                    "\n  {} {}",
                    self.label(overall),
                    self.paint(&self.palette.muted, format!("(compound {:+.2})", compound))
                ));
                out.push_str(&self.bar_line("Positive", positive, &self.palette.positive));
                out.push_str(&self.bar_line("Neutral", neutral, &self.palette.neutral));
                out.push_str(&self.bar_line("Negative", negative, &self.palette.negative));
            }
            SentimentResult::Classification {
                label: SentimentLabel::Error,
                ..
            } => {
                out.push_str("\n  ");
                out.push_str(&self.status_line(
                    Status::Warn,
                    "The service could not analyze sentiment for this document.",
                ));
            }
            SentimentResult::Classification { label, confidence } => {
                out.push_str(&format!(
                    "\n  {} {}",
                    self.label(label),
                    self.paint(
                        &self.palette.muted,
                        format!("(confidence {:.1}%)", confidence * 100.0)
                    )
                ));
            }
        }
        out
    }

    fn label(&self, label: SentimentLabel) -> String {
        let (glyph, style) = match label {
            SentimentLabel::Positive => ("▲", &self.palette.positive),
            SentimentLabel::Negative => ("▼", &self.palette.negative),
            SentimentLabel::Neutral => ("●", &self.palette.neutral),
            SentimentLabel::Mixed => ("◆", &self.palette.mixed),
            SentimentLabel::Error => ("!", &self.palette.error),
        };
        self.paint(style, format!("{} {}", glyph, label))
    }

    fn bar_line(&self, name: &str, value: f64, style: &Style) -> String {
        let filled = ((value * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
        format!(
            "\n  {:<9} {} {:>5.1}%",
            name,
            self.paint(style, bar),
            value * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::error::{NormalizationError, TransportError};
    use crate::models::Entity;

    fn plain() -> Presenter {
        Presenter::new(&DisplayConfig {
            color: false,
            ..DisplayConfig::default()
        })
    }

    fn result(sentiment: SentimentResult, entities: Vec<Entity>) -> AnalysisResult {
        AnalysisResult::new("Budget memo.".to_string(), entities, sentiment)
    }

    #[test]
    fn test_render_grouped_entities() {
        let out = plain().render_result(&result(
            SentimentResult::classification(SentimentLabel::Positive, 0.92),
            vec![
                Entity::new("Paris", "LOC"),
                Entity::new("Alice", "PER"),
                Entity::new("Lyon", "LOC"),
            ],
        ));

        assert!(out.contains("Summary\nBudget memo."));
        assert!(out.contains("LOC (2)\n    Paris, Lyon"));
        assert!(out.contains("PER (1)\n    Alice"));
        assert!(out.find("LOC").unwrap() < out.find("PER").unwrap());
        assert!(out.contains("▲ POSITIVE (confidence 92.0%)"));
    }

    #[test]
    fn test_render_no_entities() {
        let out = plain().render_result(&result(
            SentimentResult::classification(SentimentLabel::Neutral, 0.5),
            Vec::new(),
        ));
        assert!(out.contains("No entities found."));
    }

    #[test]
    fn test_render_error_sentiment_keeps_rest() {
        let out = plain().render_state(&SubmissionState::Succeeded(Arc::new(result(
            SentimentResult::classification(SentimentLabel::Error, 0.0),
            vec![Entity::new("ACME", "ORG")],
        ))));

        assert!(out.contains("Budget memo."));
        assert!(out.contains("ACME"));
        assert!(out.contains("could not analyze sentiment"));
        assert!(!out.contains("confidence"));
    }

    #[test]
    fn test_render_distribution() {
        let out = plain().render_result(&result(
            SentimentResult::distribution(0.5, 0.25, 0.25, 0.6),
            Vec::new(),
        ));

        assert!(out.contains("▲ POSITIVE (compound +0.60)"));
        assert!(out.contains(&format!("Positive  {}{}  50.0%", "█".repeat(12), "░".repeat(12))));
        assert!(out.contains(" 25.0%"));
    }

    #[test]
    fn test_render_failures_are_distinct() {
        let presenter = plain();
        let transport = presenter.render_state(&SubmissionState::Failed(
            TransportError::Connection("refused".into()).into(),
        ));
        let normalization = presenter.render_state(&SubmissionState::Failed(
            NormalizationError::MissingSummary.into(),
        ));

        assert!(transport.contains("Error processing request."));
        assert!(normalization.contains("could not be interpreted"));
        assert!(normalization.contains("missing summary"));
    }

    #[test]
    fn test_idle_and_loading() {
        let presenter = plain();
        assert_eq!(presenter.render_state(&SubmissionState::Idle), "");
        assert_eq!(presenter.render_state(&SubmissionState::Loading), "Processing...");
    }

    #[test]
    fn test_status_lines_follow_color_setting() {
        let presenter = plain();
        assert_eq!(presenter.status_line(Status::Success, "Saved"), "✓ Saved");
        assert_eq!(presenter.status_line(Status::Error, "down"), "✗ down");
        assert_eq!(presenter.detail_line("refused"), "  → refused");

        let colored = Presenter::new(&DisplayConfig {
            color: true,
            ..DisplayConfig::default()
        });
        let line = colored.status_line(Status::Warn, "careful");
        assert!(line.contains('\u{1b}'));
        assert!(line.ends_with(" careful"));
    }

    #[test]
    fn test_themes_style_glyphs_differently() {
        let light = Presenter::new(&DisplayConfig {
            theme: ThemeMode::Light,
            color: true,
            ..DisplayConfig::default()
        });
        let dark = Presenter::new(&DisplayConfig {
            theme: ThemeMode::Dark,
            color: true,
            ..DisplayConfig::default()
        });
        assert_ne!(light.glyph(Status::Info), dark.glyph(Status::Info));
    }

    #[test]
    fn test_character_count_notice() {
        let presenter = plain();
        assert_eq!(
            presenter.render_input_notice(&AnalysisInput::text("hello")),
            Some("Characters: 5".to_string())
        );
        assert_eq!(
            presenter.render_input_notice(&AnalysisInput::file("a.pdf", vec![0])),
            None
        );

        let hidden = Presenter::new(&DisplayConfig {
            color: false,
            show_character_count: false,
            ..DisplayConfig::default()
        });
        assert_eq!(hidden.render_input_notice(&AnalysisInput::text("hello")), None);
    }
}
