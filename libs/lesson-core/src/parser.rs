//! Parser for lesson files.
//!
//! # Format
//! ```markdown
//! ---
//! id: l01_greetings_mcq
//! title: Greetings
//! category: learn
//! order: 1
//! builder: choice
//! ---
//! P: Pick the best English greeting:
//! Q: Hello!
//! C: Goodbye! | Hello! | Please.
//! A: Hello!
//! ```
//!
//! The header between the `---` lines is the lesson's metadata record. A file
//! without a header parses, but has no metadata and is rejected by the registry.

use crate::error::{ParseError, Result};
use crate::types::{LessonItem, LessonMeta, LessonSource};

const HEADER_FENCE: &str = "---";

/// Parse lesson file content.
pub fn parse(content: &str) -> Result<LessonSource> {
    let lines: Vec<&str> = content.lines().collect();
    let mut source = LessonSource::default();

    let body_start = match lines.iter().position(|l| !l.trim().is_empty()) {
        Some(first) if lines[first].trim() == HEADER_FENCE => {
            let close = lines[first + 1..]
                .iter()
                .position(|l| l.trim() == HEADER_FENCE)
                .map(|offset| first + 1 + offset)
                .ok_or(ParseError::UnterminatedHeader { line: first + 1 })?;

            let mut meta = LessonMeta::default();
            for (idx, line) in lines.iter().enumerate().take(close).skip(first + 1) {
                apply_header_line(&mut source, &mut meta, line, idx + 1)?;
            }
            source.meta = Some(meta);
            close + 1
        }
        _ => 0,
    };

    let mut parser = Parser::new();
    for (idx, line) in lines.iter().enumerate().skip(body_start) {
        parser.process_line(line, idx + 1)?;
    }
    source.items = parser.finalize()?;

    Ok(source)
}

fn apply_header_line(
    source: &mut LessonSource,
    meta: &mut LessonMeta,
    line: &str,
    line_num: usize,
) -> Result<()> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(());
    }

    let (key, value) = trimmed
        .split_once(':')
        .ok_or(ParseError::MalformedHeader { line: line_num })?;
    let key = key.trim().to_lowercase();
    let value = value.trim().to_string();

    match key.as_str() {
        "id" => meta.id = Some(value),
        "title" => meta.title = Some(value),
        "subtitle" => meta.subtitle = Some(value),
        "icon" | "emoji" => meta.icon = Some(value),
        "category" | "kind" => meta.category = Some(value),
        "order" => {
            let order = value.parse::<i64>().map_err(|_| ParseError::InvalidOrder {
                line: line_num,
                value: value.clone(),
            })?;
            meta.order = Some(order);
        }
        "builder" => source.builder = Some(value),
        _ => {
            source.options.insert(key, value);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Prompt,
    Question,
    Choices,
    Answer,
    Audio,
}

struct ItemBuilder {
    prompt: Option<String>,
    question: Option<String>,
    choices: Option<String>,
    answer: Option<String>,
    audio: Option<String>,
    start_line: usize,
}

impl ItemBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            prompt: None,
            question: None,
            choices: None,
            answer: None,
            audio: None,
            start_line,
        }
    }

    fn build(self) -> Result<LessonItem> {
        let question = self.question.ok_or(ParseError::MissingQuestion {
            line: self.start_line,
        })?;
        let answer = self.answer.ok_or(ParseError::MissingAnswer {
            line: self.start_line,
        })?;

        let choices = self
            .choices
            .map(|raw| {
                raw.split(['|', '\n'])
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(LessonItem {
            prompt: self.prompt.map(|p| p.trim().to_string()),
            question: question.trim().to_string(),
            choices,
            answer: answer.trim().to_string(),
            audio: self.audio.map(|a| a.trim().to_string()),
            line_number: self.start_line,
        })
    }
}

struct Parser {
    items: Vec<LessonItem>,
    current: Option<ItemBuilder>,
    current_field: Option<Field>,
    buffer: Vec<String>,
}

impl Parser {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            current_field: None,
            buffer: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Field(Field::Prompt, text) => self.start_field(Field::Prompt, text, line_num, true)?,
            LineType::Field(Field::Question, text) => self.start_field(Field::Question, text, line_num, true)?,
            LineType::Field(field, text) => self.start_field(field, text, line_num, false)?,
            LineType::Text(text) => self.buffer.push(text.to_string()),
            LineType::Empty => self.buffer.push(String::new()),
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        let prefixes = [
            ("P:", Field::Prompt),
            ("Q:", Field::Question),
            ("C:", Field::Choices),
            ("A:", Field::Answer),
            ("S:", Field::Audio),
        ];
        for (prefix, field) in prefixes {
            if let Some(rest) = trimmed.strip_prefix(prefix) {
                return LineType::Field(field, rest.trim());
            }
        }

        if trimmed.is_empty() {
            LineType::Empty
        } else {
            LineType::Text(line)
        }
    }

    /// `P:` and `Q:` open a new item once the current one has its question.
    fn start_field(&mut self, field: Field, text: &str, line_num: usize, opens_item: bool) -> Result<()> {
        self.flush_buffer();

        let has_question = self
            .current
            .as_ref()
            .map(|item| item.question.is_some())
            .unwrap_or(false);
        if opens_item && has_question {
            self.finish_item()?;
        }
        if self.current.is_none() {
            self.current = Some(ItemBuilder::new(line_num));
        }

        self.current_field = Some(field);
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let content = self.buffer.join("\n");
        self.buffer.clear();

        if let Some(ref mut item) = self.current {
            let slot = match self.current_field {
                Some(Field::Prompt) => &mut item.prompt,
                Some(Field::Question) => &mut item.question,
                Some(Field::Choices) => &mut item.choices,
                Some(Field::Answer) => &mut item.answer,
                Some(Field::Audio) => &mut item.audio,
                None => return,
            };
            *slot = Some(content);
        }
    }

    fn finish_item(&mut self) -> Result<()> {
        if let Some(item) = self.current.take() {
            self.items.push(item.build()?);
        }
        self.current_field = None;
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<LessonItem>> {
        self.flush_buffer();
        self.finish_item()?;
        Ok(self.items)
    }
}

enum LineType<'a> {
    Field(Field, &'a str),
    Text(&'a str),
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GREETINGS: &str = "---\nid: l01\ntitle: Greetings\nemoji: 👋\nkind: learn\norder: 1\nbuilder: choice\ngems: 20\n---\nP: Pick one:\nQ: Hello!\nC: Goodbye! | Hello! | Please.\nA: Hello!\n\nP: Pick another:\nQ: Good morning!\nC: Good morning! | Good night!\nA: Good morning!";

    #[test]
    fn parse_header_and_items() {
        let source = parse(GREETINGS).unwrap();
        let meta = source.meta.clone().unwrap();
        assert_eq!(meta.id.as_deref(), Some("l01"));
        assert_eq!(meta.icon.as_deref(), Some("👋"));
        assert_eq!(meta.category.as_deref(), Some("learn"));
        assert_eq!(meta.order, Some(1));
        assert_eq!(source.builder.as_deref(), Some("choice"));
        assert_eq!(source.option("gems"), Some("20"));

        assert_eq!(source.items.len(), 2);
        assert_eq!(source.items[0].prompt.as_deref(), Some("Pick one:"));
        assert_eq!(source.items[0].choices, vec!["Goodbye!", "Hello!", "Please."]);
        assert_eq!(source.items[1].answer, "Good morning!");
    }

    #[test]
    fn consecutive_questions_start_new_items() {
        let source = parse("---\n---\nQ: one\nA: 1\nQ: two\nA: 2").unwrap();
        assert_eq!(source.items.len(), 2);
        assert_eq!(source.items[1].question, "two");
    }

    #[test]
    fn multiline_question_is_kept() {
        let source = parse("---\n---\nP: Story\nQ: Alex walks in.\nAlex smiles.\nA: yes").unwrap();
        assert_eq!(source.items[0].question, "Alex walks in.\nAlex smiles.");
    }

    #[test]
    fn file_without_header_has_no_meta() {
        let source = parse("Q: Hello\nA: Hi").unwrap();
        assert!(source.meta.is_none());
        assert!(source.builder.is_none());
        assert_eq!(source.items.len(), 1);
    }

    #[test]
    fn empty_header_yields_empty_meta() {
        let source = parse("---\n---\n").unwrap();
        assert_eq!(source.meta, Some(LessonMeta::default()));
        assert!(source.items.is_empty());
    }

    #[test]
    fn reject_unterminated_header() {
        let result = parse("---\ntitle: Broken\n");
        assert!(matches!(result, Err(ParseError::UnterminatedHeader { line: 1 })));
    }

    #[test]
    fn reject_malformed_header_line() {
        let result = parse("---\njust words\n---\n");
        assert!(matches!(result, Err(ParseError::MalformedHeader { line: 2 })));
    }

    #[test]
    fn reject_non_numeric_order() {
        let result = parse("---\norder: first\n---\n");
        assert!(matches!(result, Err(ParseError::InvalidOrder { .. })));
    }

    #[test]
    fn reject_missing_answer() {
        let result = parse("---\n---\nQ: Question only");
        assert!(matches!(result, Err(ParseError::MissingAnswer { .. })));
    }

    #[test]
    fn reject_missing_question() {
        let result = parse("---\n---\nA: Answer only");
        assert!(matches!(result, Err(ParseError::MissingQuestion { .. })));
    }
}
