//! Fill-in-the-blank lessons with typed answers.

use super::{option_or, LessonBuilder, Scoring};
use crate::error::BuildError;
use crate::host::LessonHost;
use crate::matching::{check_answer, DEFAULT_FUZZY_THRESHOLD};
use crate::types::{LessonDescriptor, LessonItem, LessonSource, MatchingMode, Severity};
use crate::view::{Frame, LessonView, Surface, BACK_COMMAND};
use std::time::Duration;

pub struct TypedBuilder;

impl LessonBuilder for TypedBuilder {
    fn name(&self) -> &'static str {
        "typed"
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

        let matching = match source.option("matching") {
            None => MatchingMode::default(),
            Some(raw) => MatchingMode::parse(raw).ok_or_else(|| BuildError::InvalidOption {
                key: "matching".to_string(),
                value: raw.to_string(),
            })?,
        };

        Ok(Box::new(TypedView {
            descriptor: descriptor.clone(),
            items: source.items.clone(),
            scoring: Scoring::from_source(source)?,
            matching,
            fuzzy_threshold: option_or(source, "fuzzy_threshold", DEFAULT_FUZZY_THRESHOLD)?,
            width: surface.width,
            index: 0,
            score: 0,
            feedback: None,
        }))
    }
}

struct TypedView {
    descriptor: LessonDescriptor,
    items: Vec<LessonItem>,
    scoring: Scoring,
    matching: MatchingMode,
    fuzzy_threshold: f64,
    width: usize,
    index: usize,
    score: usize,
    feedback: Option<(String, bool)>,
}

impl LessonView for TypedView {
    fn title(&self) -> &str {
        &self.descriptor.title
    }

    fn render(&self, host: &dyn LessonHost) -> Frame {
        let t = host.theme();
        let mut frame = Frame::new();

        frame.bold(format!("{} {}", self.descriptor.icon, self.descriptor.title), t.text);
        frame.text("─".repeat(self.width), t.border);

        match self.items.get(self.index) {
            Some(item) => {
                frame.text(
                    format!("Sentence {}/{}", self.index + 1, self.items.len()),
                    t.muted,
                );
                frame.text(
                    item.prompt.clone().unwrap_or_else(|| "Fill in the missing word:".to_string()),
                    t.muted,
                );
                frame.bold(item.question.clone(), t.text);
            }
            None => frame.text("Lesson complete.", t.green),
        }

        if let Some((text, good)) = &self.feedback {
            frame.blank();
            frame.bold(text.clone(), if *good { t.green } else { t.red });
        }

        frame.blank();
        frame.text(format!("Type your answer, or `{BACK_COMMAND}` to leave."), t.muted);
        frame
    }

    fn handle(&mut self, input: &str, host: &mut dyn LessonHost) {
        let input = input.trim();
        if input.eq_ignore_ascii_case(BACK_COMMAND) {
            host.go_back();
            return;
        }
        if input.is_empty() {
            host.notify("Type an answer first.", Severity::Info, Duration::from_millis(1200));
            return;
        }
        let Some(item) = self.items.get(self.index) else { return };

        let check = check_answer(input, &item.answer, self.matching, self.fuzzy_threshold);
        if check.is_correct {
            self.score += 1;
            self.feedback = Some(("✅ Correct!".to_string(), true));
            host.notify("Correct!", Severity::Success, Duration::from_millis(1000));
        } else {
            self.feedback = Some((format!("❌ Correct answer: {}", check.expected), false));
            host.notify("Close — keep going!", Severity::Warn, Duration::from_millis(1200));
        }

        self.index += 1;
        if self.index >= self.items.len() {
            host.complete_lesson(
                &self.descriptor,
                self.scoring.reward(self.score),
                &self.scoring.message(self.score, self.items.len()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::RecordingHost;
    use crate::parser::parse;
    use crate::types::{LessonMeta, Reward};

    const PLANS: &str = "---\nbuilder: typed\ngems: 18\ngems_per_point: 4\nxp: 15\nxp_per_point: 5\nmessage: Finished! {score}/{total} correct\n---\nQ: I ___ going to the park.\nA: am\nQ: We ___ pizza tonight.\nA: are";

    fn build(content: &str) -> Result<Box<dyn LessonView>, BuildError> {
        let host = RecordingHost::default();
        let source = parse(content).unwrap();
        let descriptor = LessonMeta::default().normalize("plans");
        TypedBuilder.build(&Surface::default(), &host, &descriptor, &source)
    }

    #[test]
    fn answers_are_case_insensitive_by_default() {
        let mut view = build(PLANS).unwrap();
        let mut host = RecordingHost::default();
        view.handle("AM", &mut host);
        view.handle("is", &mut host);

        assert_eq!(host.completions.len(), 1);
        assert_eq!(host.completions[0].1, Reward::new(22, 20));
        assert_eq!(host.completions[0].2, "Finished! 1/2 correct");
    }

    #[test]
    fn wrong_answer_shows_expected() {
        let mut view = build(PLANS).unwrap();
        let mut host = RecordingHost::default();
        view.handle("were", &mut host);
        assert!(view.render(&host).plain().contains("Correct answer: am"));
        assert_eq!(host.last_notice(), Some("Close — keep going!"));
    }

    #[test]
    fn blank_input_does_not_advance() {
        let mut view = build(PLANS).unwrap();
        let mut host = RecordingHost::default();
        view.handle("   ", &mut host);
        assert!(view.render(&host).plain().contains("Sentence 1/2"));
    }

    #[test]
    fn unknown_matching_mode_is_a_build_error() {
        let content = PLANS.replace("builder: typed", "builder: typed\nmatching: loose");
        assert!(matches!(build(&content), Err(BuildError::InvalidOption { .. })));
    }
}
