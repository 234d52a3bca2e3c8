use crate::annotate::{
    annotate, assemble_paragraphs, group_by_question, passage_mode, PassageMode,
};
use crate::exam::{ExamItem, Question};
use crate::highlight::{render_sentence, Segment};
use crate::segment::normalize_passage;

/// Inputs the presentation layer controls. The render pipeline is a pure
/// function of the item and these options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// sentence to mark active; the first sentence when `None`
    pub active_sentence: Option<u32>,
    /// whether blank slots show the correct answer text
    pub reveal: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            active_sentence: None,
            reveal: false,
        }
    }
}

/// Everything the presentation layer needs to draw one item. Paragraph
/// blocks are produced the same way for both passage modes; `mode` is a
/// layout hint only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderData {
    pub heading: String,
    /// the japanese title, shown under an english heading
    pub sub_heading: Option<String>,
    pub mode: PassageMode,
    /// question numbers ascending, for the navigation row
    pub question_numbers: Vec<u32>,
    pub paragraphs: Vec<Vec<SentenceView>>,
    /// raw passage to show when the item has no sentence list
    pub raw_passage: Option<String>,
    pub active: Option<ActivePanel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceView {
    pub id: u32,
    pub is_active: bool,
    pub segments: Vec<Segment>,
}

/// Detail panel for the active sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePanel {
    pub japanese: Option<String>,
    pub notes: Vec<String>,
    pub question: Option<QuestionPanel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPanel {
    pub number: u32,
    pub choices: Vec<ChoiceView>,
    pub explanation: Option<String>,
    pub nuance_explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub index: u32,
    pub text: String,
    pub correct: bool,
}

pub fn render_item(item: &ExamItem, options: &RenderOptions) -> RenderData {
    let heading = item.heading().to_string();
    let sub_heading = match (&item.english_title, item.title.is_empty()) {
        (Some(_), false) => Some(item.title.clone()),
        _ => None,
    };

    let sentences = annotate(item);
    if sentences.is_empty() {
        return RenderData {
            heading,
            sub_heading,
            mode: PassageMode::Narrative,
            question_numbers: Vec::new(),
            paragraphs: Vec::new(),
            raw_passage: Some(item.passage.clone()),
            active: None,
        };
    }

    let active_id = options
        .active_sentence
        .or_else(|| sentences.first().map(|s| s.id));

    let paragraphs = assemble_paragraphs(&sentences)
        .iter()
        .map(|paragraph| {
            paragraph
                .iter()
                .map(|sent| {
                    let is_active = active_id == Some(sent.id);
                    SentenceView {
                        id: sent.id,
                        is_active,
                        segments: render_sentence(
                            &sent.display_english,
                            sent.main_verb.as_deref(),
                            is_active,
                            options.reveal,
                            &item.questions,
                        ),
                    }
                })
                .collect()
        })
        .collect();

    let active = active_id
        .and_then(|id| sentences.iter().find(|s| s.id == id))
        .map(|sent| ActivePanel {
            japanese: sent.japanese.clone(),
            notes: sent
                .notes
                .as_deref()
                .map(split_notes)
                .unwrap_or_default(),
            question: sent
                .related
                .number()
                .and_then(|n| item.question(n))
                .map(question_panel),
        });

    RenderData {
        heading,
        sub_heading,
        mode: passage_mode(&sentences),
        question_numbers: group_by_question(&sentences).question_numbers(),
        paragraphs,
        raw_passage: None,
        active,
    }
}

fn split_notes(notes: &str) -> Vec<String> {
    notes
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn question_panel(question: &Question) -> QuestionPanel {
    QuestionPanel {
        number: question.number,
        choices: question
            .choices
            .iter()
            .map(|c| ChoiceView {
                index: c.index,
                text: c.text.clone(),
                correct: c.index == question.correct_answer,
            })
            .collect(),
        // explanations share the passage's literal-newline convention;
        // their arrow markers are an authoring convention passed through
        explanation: question.explanation.as_deref().map(normalize_passage),
        nuance_explanation: question.nuance_explanation.as_deref().map(normalize_passage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::{Choice, Sentence};

    fn fixture() -> ExamItem {
        ExamItem {
            title: "2023年度 第1回 英検2級 大問2A".to_string(),
            english_title: Some("The Cat Study".to_string()),
            filename: None,
            passage: "The cat ( 1 ) on the mat. It was warm.".to_string(),
            sentences: vec![
                Sentence {
                    id: 10,
                    english: "The cat ( 1 ) on the mat.".to_string(),
                    japanese: Some("猫はマットの上に座った。".to_string()),
                    notes: Some("sit - sat - sat\n\nwarm: 暖かい".to_string()),
                    main_verb: Some("sat".to_string()),
                    related_questions: vec![1],
                    related_q: None,
                    is_paragraph_end: None,
                },
                Sentence {
                    id: 11,
                    english: "It was warm.".to_string(),
                    japanese: None,
                    notes: None,
                    main_verb: None,
                    related_questions: Vec::new(),
                    related_q: None,
                    is_paragraph_end: Some(true),
                },
            ],
            questions: vec![Question {
                number: 1,
                choices: vec![
                    Choice {
                        index: 1,
                        text: "sat".to_string(),
                    },
                    Choice {
                        index: 2,
                        text: "ran".to_string(),
                    },
                ],
                correct_answer: 1,
                explanation: Some("文脈から着席。\\n→ 正解は 1".to_string()),
                nuance_explanation: None,
            }],
        }
    }

    #[test]
    fn headings_and_navigation() {
        let data = render_item(&fixture(), &RenderOptions::default());
        assert_eq!(data.heading, "The Cat Study");
        assert_eq!(data.sub_heading.as_deref(), Some("2023年度 第1回 英検2級 大問2A"));
        assert_eq!(data.question_numbers, vec![1]);
        assert_eq!(data.mode, PassageMode::Narrative);
        assert!(data.raw_passage.is_none());
    }

    #[test]
    fn first_sentence_is_active_by_default() {
        let data = render_item(&fixture(), &RenderOptions::default());
        let first = &data.paragraphs[0][0];
        assert!(first.is_active);
        assert!(!data.paragraphs[0][1].is_active);

        // active sentence's verb is emphasized, blank slot stays literal
        assert!(first.segments.contains(&Segment::Blank("( 1 )".to_string())));
    }

    #[test]
    fn reveal_substitutes_answers_in_paragraph_blocks() {
        let options = RenderOptions {
            active_sentence: Some(11),
            reveal: true,
        };
        let data = render_item(&fixture(), &options);
        let first = &data.paragraphs[0][0];
        assert!(first.segments.contains(&Segment::Answer {
            number: 1,
            text: "sat".to_string()
        }));
        assert!(data.paragraphs[0][1].is_active);
    }

    #[test]
    fn active_panel_carries_translation_notes_and_question() {
        let data = render_item(&fixture(), &RenderOptions::default());
        let panel = data.active.unwrap();
        assert_eq!(panel.japanese.as_deref(), Some("猫はマットの上に座った。"));
        assert_eq!(panel.notes, vec!["sit - sat - sat", "warm: 暖かい"]);

        let question = panel.question.unwrap();
        assert_eq!(question.number, 1);
        assert!(question.choices.iter().any(|c| c.correct && c.text == "sat"));
        // literal \n normalized, arrow marker untouched
        assert_eq!(question.explanation.as_deref(), Some("文脈から着席。\n→ 正解は 1"));
    }

    #[test]
    fn unknown_active_sentence_degrades_to_no_panel() {
        let options = RenderOptions {
            active_sentence: Some(999),
            reveal: false,
        };
        let data = render_item(&fixture(), &options);
        assert!(data.active.is_none());
        assert!(data
            .paragraphs
            .iter()
            .flatten()
            .all(|view| !view.is_active));
    }

    #[test]
    fn item_without_sentences_falls_back_to_raw_passage() {
        let mut item = fixture();
        item.sentences.clear();
        let data = render_item(&item, &RenderOptions::default());
        assert!(data.paragraphs.is_empty());
        assert_eq!(
            data.raw_passage.as_deref(),
            Some("The cat ( 1 ) on the mat. It was warm.")
        );
        assert!(data.active.is_none());
    }

    #[test]
    fn render_is_deterministic() {
        let item = fixture();
        let options = RenderOptions {
            active_sentence: Some(10),
            reveal: true,
        };
        assert_eq!(render_item(&item, &options), render_item(&item, &options));
    }
}
