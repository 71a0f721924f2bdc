//! Matching lessons: pair every `Q:` with its `A:`.
//!
//! Left entries are picked by number, right entries by letter; `2b` picks both
//! at once. Both columns are shuffled unless the header says `shuffle: false`.

use super::{option_or, LessonBuilder, Scoring};
use crate::error::BuildError;
use crate::host::LessonHost;
use crate::types::{LessonDescriptor, LessonSource, Severity};
use crate::view::{Frame, LessonView, Surface, BACK_COMMAND};
use rand::seq::SliceRandom;
use std::time::Duration;

const MAX_PAIRS: usize = 26;

pub struct PairsBuilder;

impl LessonBuilder for PairsBuilder {
    fn name(&self) -> &'static str {
        "match"
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
        if source.items.len() > MAX_PAIRS {
            return Err(BuildError::InvalidOption {
                key: "items".to_string(),
                value: format!("{} pairs, at most {MAX_PAIRS}", source.items.len()),
            });
        }

        let pairs: Vec<(String, String)> = source
            .items
            .iter()
            .map(|item| (item.question.clone(), item.answer.clone()))
            .collect();

        let mut left: Vec<usize> = (0..pairs.len()).collect();
        let mut right = left.clone();
        if option_or(source, "shuffle", true)? {
            let mut rng = rand::thread_rng();
            left.shuffle(&mut rng);
            right.shuffle(&mut rng);
        }

        Ok(Box::new(PairsView {
            descriptor: descriptor.clone(),
            scoring: Scoring::from_source(source)?,
            width: surface.width,
            matched: vec![false; pairs.len()],
            pairs,
            left,
            right,
            selected: None,
            feedback: None,
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

struct PairsView {
    descriptor: LessonDescriptor,
    scoring: Scoring,
    width: usize,
    pairs: Vec<(String, String)>,
    /// Pair index shown at each left row.
    left: Vec<usize>,
    /// Pair index shown at each right row.
    right: Vec<usize>,
    /// Indexed by pair.
    matched: Vec<bool>,
    selected: Option<(Side, usize)>,
    feedback: Option<(String, bool)>,
}

impl PairsView {
    fn score(&self) -> usize {
        self.matched.iter().filter(|m| **m).count()
    }

    /// Parse `3`, `c` or `3c` into row selections.
    fn parse_picks(input: &str) -> Option<Vec<(Side, usize)>> {
        let input = input.to_ascii_lowercase();
        let digits: String = input.chars().take_while(char::is_ascii_digit).collect();
        let rest = input[digits.len()..].trim();

        let mut picks = Vec::new();
        if !digits.is_empty() {
            let n: usize = digits.parse().ok()?;
            picks.push((Side::Left, n.checked_sub(1)?));
        }
        match rest.chars().collect::<Vec<_>>().as_slice() {
            [] => {}
            [c] if c.is_ascii_lowercase() => picks.push((Side::Right, (*c as u8 - b'a') as usize)),
            _ => return None,
        }
        (!picks.is_empty()).then_some(picks)
    }

    fn pair_at(&self, side: Side, row: usize) -> Option<usize> {
        match side {
            Side::Left => self.left.get(row).copied(),
            Side::Right => self.right.get(row).copied(),
        }
    }

    fn click(&mut self, side: Side, row: usize, host: &mut dyn LessonHost) {
        let Some(pair) = self.pair_at(side, row) else {
            host.notify("No such entry.", Severity::Warn, Duration::from_millis(1100));
            return;
        };
        if self.matched[pair] {
            return;
        }

        let first = match self.selected {
            Some((selected_side, selected_row)) if selected_side != side => (selected_side, selected_row),
            _ => {
                self.selected = Some((side, row));
                self.feedback = Some(("Pick the match.".to_string(), true));
                return;
            }
        };
        self.selected = None;

        let first_pair = self.pair_at(first.0, first.1);
        if first_pair == Some(pair) {
            self.matched[pair] = true;
            self.feedback = Some(("✅ Match!".to_string(), true));
            host.notify("Match!", Severity::Success, Duration::from_millis(1100));

            if self.matched.iter().all(|m| *m) {
                let score = self.score();
                host.complete_lesson(
                    &self.descriptor,
                    self.scoring.reward(score),
                    &self.scoring.message(score, self.pairs.len()),
                );
            }
        } else {
            self.feedback = Some(("❌ Not a match.".to_string(), false));
            host.notify("Not a match.", Severity::Warn, Duration::from_millis(1100));
        }
    }
}

impl LessonView for PairsView {
    fn title(&self) -> &str {
        &self.descriptor.title
    }

    fn render(&self, host: &dyn LessonHost) -> Frame {
        let t = host.theme();
        let mut frame = Frame::new();

        frame.bold(format!("{} {}", self.descriptor.icon, self.descriptor.title), t.text);
        frame.text("─".repeat(self.width), t.border);
        frame.text("Pick one on the left, then its match on the right.", t.muted);
        frame.blank();

        let column = self.width / 2;
        for (row, (l, r)) in self.left.iter().zip(&self.right).enumerate() {
            let marker = |side: Side| match self.selected {
                Some(sel) if sel == (side, row) => '>',
                _ => ' ',
            };
            let left = format!("{}{:>2}. {}", marker(Side::Left), row + 1, self.pairs[*l].0);
            let right = format!("{}{}. {}", marker(Side::Right), (b'a' + row as u8) as char, self.pairs[*r].1);
            let done = self.matched[*l] && self.matched[*r];
            frame.text(
                format!("{left:<column$}{right}"),
                if done { t.disabled } else { t.text },
            );
        }

        if let Some((text, good)) = &self.feedback {
            frame.blank();
            frame.bold(text.clone(), if *good { t.muted } else { t.red });
        }

        frame.blank();
        frame.text(format!("Type e.g. `1b`, or `{BACK_COMMAND}` to leave."), t.muted);
        frame
    }

    fn handle(&mut self, input: &str, host: &mut dyn LessonHost) {
        let input = input.trim();
        if input.eq_ignore_ascii_case(BACK_COMMAND) {
            host.go_back();
            return;
        }

        let Some(picks) = Self::parse_picks(input) else {
            host.notify("Type a number and/or a letter.", Severity::Warn, Duration::from_millis(1200));
            return;
        };
        for (side, row) in picks {
            self.click(side, row, host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::RecordingHost;
    use crate::parser::parse;
    use crate::types::{LessonMeta, Reward};

    const FOOD: &str = "---\nbuilder: match\nshuffle: false\ngems: 30\nxp: 25\nmessage: All matched!\n---\nQ: The bill, please.\nA: Ask to pay\nQ: Can I have water?\nA: Request a drink";

    fn build(content: &str) -> (Box<dyn LessonView>, RecordingHost) {
        let host = RecordingHost::default();
        let source = parse(content).unwrap();
        let descriptor = LessonMeta::default().normalize("food");
        let view = PairsBuilder
            .build(&Surface::default(), &host, &descriptor, &source)
            .unwrap();
        (view, host)
    }

    #[test]
    fn parse_picks_accepts_numbers_and_letters() {
        assert_eq!(PairsView::parse_picks("2"), Some(vec![(Side::Left, 1)]));
        assert_eq!(PairsView::parse_picks("B"), Some(vec![(Side::Right, 1)]));
        assert_eq!(
            PairsView::parse_picks("1a"),
            Some(vec![(Side::Left, 0), (Side::Right, 0)])
        );
        assert_eq!(PairsView::parse_picks("0"), None);
        assert_eq!(PairsView::parse_picks("hello"), None);
    }

    #[test]
    fn matching_all_pairs_completes() {
        let (mut view, mut host) = build(FOOD);
        view.handle("1a", &mut host);
        assert_eq!(host.last_notice(), Some("Match!"));
        view.handle("b", &mut host);
        view.handle("2", &mut host);

        assert_eq!(host.completions.len(), 1);
        assert_eq!(host.completions[0].1, Reward::new(30, 25));
        assert_eq!(host.completions[0].2, "All matched!");
    }

    #[test]
    fn wrong_pair_is_reported() {
        let (mut view, mut host) = build(FOOD);
        view.handle("1b", &mut host);
        assert_eq!(host.last_notice(), Some("Not a match."));
        assert!(host.completions.is_empty());
    }

    #[test]
    fn same_side_switches_selection() {
        let (mut view, mut host) = build(FOOD);
        view.handle("1", &mut host);
        view.handle("2", &mut host);
        view.handle("b", &mut host);
        assert_eq!(host.last_notice(), Some("Match!"));
    }

    #[test]
    fn shuffled_lesson_still_holds_every_pair() {
        let content = FOOD.replace("shuffle: false", "shuffle: true");
        let (view, host) = build(&content);
        let text = view.render(&host).plain();
        assert!(text.contains("The bill, please."));
        assert!(text.contains("Request a drink"));
    }
}
