use std::collections::BTreeMap;

use regex::Regex;

use crate::exam::ExamItem;
use crate::segment::{normalize_passage, split_paragraphs};

/// The single question a sentence is associated with for grouping and the
/// detail panel, or `Other` when it has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelatedQuestion {
    Question(u32),
    Other,
}

impl RelatedQuestion {
    pub fn number(&self) -> Option<u32> {
        match self {
            RelatedQuestion::Question(n) => Some(*n),
            RelatedQuestion::Other => None,
        }
    }
}

/// Per-sentence record derived from an [`ExamItem`]; the source item is
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedSentence {
    pub id: u32,
    /// english text with the leading bullet/dash run stripped
    pub display_english: String,
    pub japanese: Option<String>,
    pub notes: Option<String>,
    pub main_verb: Option<String>,
    pub is_paragraph_end: bool,
    pub related: RelatedQuestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassageMode {
    Conversational,
    Narrative,
}

/// Derive the annotated sentence list for an item, in source order.
///
/// An authored `isParagraphEnd` flag wins; otherwise a sentence ends a
/// paragraph when some paragraph's normalized text ends with the
/// sentence's normalized text. Normalized forms shorter than six
/// characters never match, so trivially short sentences don't claim
/// paragraph ends they don't own.
pub fn annotate(item: &ExamItem) -> Vec<AnnotatedSentence> {
    let paragraphs: Vec<String> = split_paragraphs(&normalize_passage(&item.passage))
        .iter()
        .map(|p| normalize(p))
        .collect();

    item.sentences
        .iter()
        .map(|sent| {
            let is_paragraph_end = match sent.is_paragraph_end {
                Some(explicit) => explicit,
                None => {
                    let sent_norm = normalize(&sent.english);
                    sent_norm.len() > 5 && paragraphs.iter().any(|p| p.ends_with(&sent_norm))
                }
            };

            let related = sent
                .related_questions
                .first()
                .copied()
                .or(sent.related_q)
                .map_or(RelatedQuestion::Other, RelatedQuestion::Question);

            AnnotatedSentence {
                id: sent.id,
                display_english: strip_lead_markers(&sent.english),
                japanese: sent.japanese.clone(),
                notes: sent.notes.clone(),
                main_verb: sent.main_verb.clone(),
                is_paragraph_end,
                related,
            }
        })
        .collect()
}

/// Whole-item classification: conversational when any sentence opens with
/// a speaker label like `A:` or `B:`.
pub fn passage_mode(sentences: &[AnnotatedSentence]) -> PassageMode {
    let speaker = Regex::new(r"^[AB]:").unwrap();
    if sentences.iter().any(|s| speaker.is_match(&s.display_english)) {
        PassageMode::Conversational
    } else {
        PassageMode::Narrative
    }
}

/// Stable partition of sentences by related question. Within each group
/// the original sentence order is preserved; group keys come out in
/// ascending question-number order, with the unassociated sentences held
/// separately.
#[derive(Debug, Default)]
pub struct GroupedSentences {
    groups: BTreeMap<u32, Vec<usize>>,
    other: Vec<usize>,
}

impl GroupedSentences {
    pub fn question_numbers(&self) -> Vec<u32> {
        self.groups.keys().copied().collect()
    }

    pub fn group(&self, number: u32) -> &[usize] {
        self.groups.get(&number).map_or(&[], Vec::as_slice)
    }

    pub fn other(&self) -> &[usize] {
        &self.other
    }
}

pub fn group_by_question(sentences: &[AnnotatedSentence]) -> GroupedSentences {
    let mut grouped = GroupedSentences::default();
    for (idx, sent) in sentences.iter().enumerate() {
        match sent.related {
            RelatedQuestion::Question(n) => grouped.groups.entry(n).or_default().push(idx),
            RelatedQuestion::Other => grouped.other.push(idx),
        }
    }
    grouped
}

/// Group sentences into rendered paragraphs: scan in order, close a
/// paragraph at each paragraph-end sentence, and keep whatever trails the
/// last close as a final paragraph.
pub fn assemble_paragraphs(sentences: &[AnnotatedSentence]) -> Vec<&[AnnotatedSentence]> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    for (idx, sent) in sentences.iter().enumerate() {
        if sent.is_paragraph_end {
            paragraphs.push(&sentences[start..=idx]);
            start = idx + 1;
        }
    }
    if start < sentences.len() {
        paragraphs.push(&sentences[start..]);
    }
    paragraphs
}

/// Strip the leading run of list markers some source lines carry
/// (dashes, bullets, middle dots, whitespace, full-width spaces).
pub fn strip_lead_markers(text: &str) -> String {
    let markers = Regex::new(r"^[-・●\s\u{3000}]+").unwrap();
    markers.replace(text, "").trim().to_string()
}

/// Comparison form for paragraph reconciliation: latin letters and digits
/// only, lower-cased.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
