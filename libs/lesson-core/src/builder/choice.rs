//! Multiple choice lessons.
//!
//! Options:
//! - `on_wrong: advance | retry`: move on after a wrong pick (default), or stay
//!   on the item until it is answered correctly.
//! - `listen: true`: the item's `S:` text has to be played before choosing.

use super::{option_or, LessonBuilder, Scoring};
use crate::error::BuildError;
use crate::host::LessonHost;
use crate::types::{LessonDescriptor, LessonItem, LessonSource, Severity};
use crate::view::{Frame, LessonView, Surface, BACK_COMMAND};
use std::time::Duration;

const PLAY_COMMAND: &str = "play";

pub struct ChoiceBuilder;

impl LessonBuilder for ChoiceBuilder {
    fn name(&self) -> &'static str {
        "choice"
    }

    fn build(
        &self,
        surface: &Surface,
        _host: &dyn LessonHost,
        descriptor: &LessonDescriptor,
        source: &LessonSource,
    ) -> Result<Box<dyn LessonView>, BuildError> {
        if source.items.is_empty() {
            return Err(BuildError::NoItems);
        }
        for (index, item) in source.items.iter().enumerate() {
            if item.choices.is_empty() {
                return Err(BuildError::MissingChoices { index });
            }
            if !item.choices.contains(&item.answer) {
                return Err(BuildError::AnswerNotInChoices {
                    index,
                    answer: item.answer.clone(),
                });
            }
        }

        let retry_on_wrong = match source.option("on_wrong").unwrap_or("advance") {
            "advance" => false,
            "retry" => true,
            other => {
                return Err(BuildError::InvalidOption {
                    key: "on_wrong".to_string(),
                    value: other.to_string(),
                })
            }
        };

        Ok(Box::new(ChoiceView {
            descriptor: descriptor.clone(),
            items: source.items.clone(),
            scoring: Scoring::from_source(source)?,
            retry_on_wrong,
            listen: option_or(source, "listen", false)?,
            width: surface.width,
            index: 0,
            score: 0,
            played: false,
            missed_current: false,
            feedback: None,
        }))
    }
}

struct ChoiceView {
    descriptor: LessonDescriptor,
    items: Vec<LessonItem>,
    scoring: Scoring,
    retry_on_wrong: bool,
    listen: bool,
    width: usize,
    index: usize,
    score: usize,
    played: bool,
    missed_current: bool,
    /// Last feedback line and whether it was good news.
    feedback: Option<(String, bool)>,
}

impl ChoiceView {
    fn current(&self) -> Option<&LessonItem> {
        self.items.get(self.index)
    }

    /// Resolve input as a 1-based number or the text of a choice.
    fn pick(item: &LessonItem, input: &str) -> Option<usize> {
        if let Ok(n) = input.parse::<usize>() {
            return (1..=item.choices.len()).contains(&n).then(|| n - 1);
        }
        item.choices
            .iter()
            .position(|c| c.eq_ignore_ascii_case(input))
    }

    fn choose(&mut self, picked: usize, host: &mut dyn LessonHost) {
        let Some(item) = self.current() else { return };
        let correct = item.choices[picked] == item.answer;
        let answer = item.answer.clone();

        if correct {
            if !self.missed_current {
                self.score += 1;
            }
            self.feedback = Some(("✅ Correct!".to_string(), true));
            host.notify("Correct!", Severity::Success, Duration::from_millis(1000));
            self.advance(host);
        } else if self.retry_on_wrong {
            self.missed_current = true;
            self.feedback = Some(("❌ Try again.".to_string(), false));
            host.notify("Try again.", Severity::Warn, Duration::from_millis(1100));
        } else {
            self.feedback = Some((format!("❌ Correct answer: {answer}"), false));
            host.notify("Try the next one!", Severity::Warn, Duration::from_millis(1300));
            self.advance(host);
        }
    }

    fn advance(&mut self, host: &mut dyn LessonHost) {
        self.index += 1;
        self.played = false;
        self.missed_current = false;

        if self.index >= self.items.len() {
            let total = self.items.len();
            host.complete_lesson(
                &self.descriptor,
                self.scoring.reward(self.score),
                &self.scoring.message(self.score, total),
            );
        }
    }
}

impl LessonView for ChoiceView {
    fn title(&self) -> &str {
        &self.descriptor.title
    }

    fn render(&self, host: &dyn LessonHost) -> Frame {
        let t = host.theme();
        let mut frame = Frame::new();

        frame.bold(format!("{} {}", self.descriptor.icon, self.descriptor.title), t.text);
        frame.text("─".repeat(self.width), t.border);

        let Some(item) = self.current() else {
            frame.text("Lesson complete.", t.green);
            return frame;
        };

        frame.text(
            format!(
                "Question {}/{} · Score {}",
                self.index + 1,
                self.items.len(),
                self.score
            ),
            t.muted,
        );
        if let Some(prompt) = &item.prompt {
            frame.text(prompt.clone(), t.muted);
        }

        if self.listen {
            match (&item.audio, self.played) {
                (Some(audio), true) => frame.bold(format!("“{audio}”"), t.text),
                _ => frame.text(format!("▶ type `{PLAY_COMMAND}` to listen"), t.blue),
            }
        } else {
            for line in item.question.lines() {
                frame.bold(line.to_string(), t.text);
            }
        }

        frame.blank();
        for (i, choice) in item.choices.iter().enumerate() {
            frame.text(format!("  {}. {}", i + 1, choice), t.text);
        }

        if let Some((text, good)) = &self.feedback {
            frame.blank();
            frame.bold(text.clone(), if *good { t.green } else { t.red });
        }

        frame.blank();
        frame.text(format!("Type a number, or `{BACK_COMMAND}` to leave."), t.muted);
        frame
    }

    fn handle(&mut self, input: &str, host: &mut dyn LessonHost) {
        let input = input.trim();
        if input.eq_ignore_ascii_case(BACK_COMMAND) {
            host.go_back();
            return;
        }

        let Some(item) = self.current() else { return };

        if self.listen && input.eq_ignore_ascii_case(PLAY_COMMAND) {
            self.played = true;
            host.notify(
                "Now choose the matching text.",
                Severity::Info,
                Duration::from_millis(1200),
            );
            return;
        }

        let Some(picked) = Self::pick(item, input) else {
            let hint = format!("Pick 1-{}.", item.choices.len());
            host.notify(&hint, Severity::Warn, Duration::from_millis(1200));
            return;
        };

        if self.listen && !self.played {
            host.notify(
                &format!("Type `{PLAY_COMMAND}` first."),
                Severity::Warn,
                Duration::from_millis(1200),
            );
            return;
        }

        self.choose(picked, host);
    }
}
