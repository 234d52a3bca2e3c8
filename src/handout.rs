use std::collections::BTreeMap;

use anyhow::Context;
use regex::Regex;
use serde::Serialize;

use crate::annotate::{annotate, passage_mode, PassageMode};
use crate::exam::{ExamItem, Question};
use crate::segment::{normalize_passage, split_paragraphs};

#[derive(Serialize, Debug)]
#[serde(untagged)]
enum Frontmatter<'a> {
    Title(&'a str),
    Subtitle(Option<&'a str>),
    Slug(&'a str),
    Order(usize),
    Mode(&'a str),
    Answers(&'a str),
}

/// Answer row for the handout footer, e.g. `(19) 3  (20) 1`.
pub fn answer_row(questions: &[Question]) -> String {
    questions
        .iter()
        .map(|q| format!("({}) {}", q.number, q.correct_answer))
        .collect::<Vec<String>>()
        .join("  ")
}

/// Output slug for an item, preferring the english title. Items whose
/// titles slug to nothing get a positional name; the slugger's counter
/// keeps repeated titles distinct.
pub fn item_slug(slugger: &mut github_slugger::Slugger, item: &ExamItem, order: usize) -> String {
    let source = item.english_title.as_deref().unwrap_or_else(|| item.label());
    let slug = slugger.slug(source);
    if slug.is_empty() {
        slugger.slug(&format!("item-{}", order))
    } else {
        slug
    }
}

/// Serialize one item as a printable markdown handout: YAML frontmatter,
/// the passage with blank slots bold-emphasized, the question table, and
/// the answer footer.
pub fn serialize_handout(item: &ExamItem, slug: &str, order: usize) -> anyhow::Result<String> {
    let sentences = annotate(item);
    let mode = match passage_mode(&sentences) {
        PassageMode::Conversational => "conversation",
        PassageMode::Narrative => "passage",
    };
    let answers = answer_row(&item.questions);

    let mut fm: BTreeMap<&str, Frontmatter> = BTreeMap::new();
    fm.insert("title", Frontmatter::Title(item.label()));
    fm.insert("subtitle", Frontmatter::Subtitle(item.english_title.as_deref()));
    fm.insert("slug", Frontmatter::Slug(slug));
    fm.insert("order", Frontmatter::Order(order));
    fm.insert("mode", Frontmatter::Mode(mode));
    fm.insert("answers", Frontmatter::Answers(&answers));

    let mut body = String::with_capacity(item.passage.len() + 400 * item.questions.len());

    for paragraph in split_paragraphs(&normalize_passage(&item.passage)) {
        body.push_str(&bold_slots(paragraph.trim()));
        body.push_str("\n\n");
    }

    for question in &item.questions {
        body.push_str(&format!("**({})**\n\n", question.number));
        for choice in &question.choices {
            body.push_str(&format!("{}. {}\n", choice.index, choice.text));
        }
        body.push('\n');
    }

    body.push_str(&format!("【正解】 {}\n", answers));

    Ok(format!(
        r#"---
{}---

{}"#,
        serde_yaml_ng::to_string(&fm).context(format!("failed to serialize handout for {}", slug))?,
        body
    ))
}

/// Emphasize blank-slot markers so gaps stand out on paper.
fn bold_slots(text: &str) -> String {
    let slot = Regex::new(r"\(\s*\d+\s*\)").unwrap();
    slot.replace_all(text, "**$0**").to_string()
}
