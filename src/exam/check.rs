use std::collections::HashSet;

use regex::Regex;
use serde::Serialize;

use super::item::ExamItem;
use crate::segment::normalize_passage;

/// Integrity report over a loaded content collection. Findings are
/// per-item strings plus aggregate counts, ready to serialize or print.
#[derive(Debug, Serialize)]
pub struct ContentReport {
    pub total_items: usize,
    pub total_questions: usize,
    pub issue_count: usize,
    pub items: Vec<ItemReport>,
}

#[derive(Debug, Serialize)]
pub struct ItemReport {
    pub title: String,
    pub issues: Vec<String>,
}

pub fn check_items(items: &[ExamItem]) -> ContentReport {
    let slot = Regex::new(r"\(\s*(\d+)\s*\)").unwrap();

    let mut reports = Vec::with_capacity(items.len());
    let mut issue_count = 0;
    let mut total_questions = 0;

    for item in items {
        let mut issues = Vec::new();
        total_questions += item.questions.len();

        let question_numbers: HashSet<u32> = item.questions.iter().map(|q| q.number).collect();

        let mut seen_ids = HashSet::new();
        for sentence in &item.sentences {
            if !seen_ids.insert(sentence.id) {
                issues.push(format!("duplicate sentence id {}", sentence.id));
            }

            let related = sentence.related_questions.first().copied().or(sentence.related_q);
            if let Some(number) = related {
                if !question_numbers.contains(&number) {
                    issues.push(format!(
                        "sentence {} references missing question {}",
                        sentence.id, number
                    ));
                }
            }
        }

        for question in &item.questions {
            if question.correct_choice().is_none() {
                issues.push(format!(
                    "question {} has no choice matching correct answer {}",
                    question.number, question.correct_answer
                ));
            }
        }

        let mut slot_numbers = HashSet::new();
        for caps in slot.captures_iter(&normalize_passage(&item.passage)) {
            if let Ok(number) = caps[1].parse::<u32>() {
                slot_numbers.insert(number);
                if !question_numbers.contains(&number) {
                    issues.push(format!("passage slot ({}) has no matching question", number));
                }
            }
        }
        for question in &item.questions {
            if !slot_numbers.contains(&question.number) {
                issues.push(format!(
                    "question {} has no slot in the passage",
                    question.number
                ));
            }
        }

        issue_count += issues.len();
        reports.push(ItemReport {
            title: item.label().to_string(),
            issues,
        });
    }

    ContentReport {
        total_items: items.len(),
        total_questions,
        issue_count,
        items: reports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::{Choice, Question, Sentence};

    fn sentence(id: u32, related_q: Option<u32>) -> Sentence {
        Sentence {
            id,
            english: "text".to_string(),
            japanese: None,
            notes: None,
            main_verb: None,
            related_questions: Vec::new(),
            related_q,
            is_paragraph_end: None,
        }
    }

    fn question(number: u32, correct: u32) -> Question {
        Question {
            number,
            choices: vec![
                Choice { index: 1, text: "a".to_string() },
                Choice { index: 2, text: "b".to_string() },
            ],
            correct_answer: correct,
            explanation: None,
            nuance_explanation: None,
        }
    }

    fn item(passage: &str, sentences: Vec<Sentence>, questions: Vec<Question>) -> ExamItem {
        ExamItem {
            title: "test item".to_string(),
            english_title: None,
            filename: None,
            passage: passage.to_string(),
            sentences,
            questions,
        }
    }

    #[test]
    fn clean_content_reports_nothing() {
        let items = vec![item(
            "The cat ( 1 ) sat.",
            vec![sentence(1, Some(1))],
            vec![question(1, 2)],
        )];
        let report = check_items(&items);
        assert_eq!(report.total_items, 1);
        assert_eq!(report.total_questions, 1);
        assert_eq!(report.issue_count, 0);
        assert!(report.items[0].issues.is_empty());
    }

    #[test]
    fn duplicate_sentence_ids_are_reported() {
        let items = vec![item(
            "",
            vec![sentence(7, None), sentence(7, None)],
            Vec::new(),
        )];
        let report = check_items(&items);
        assert_eq!(report.items[0].issues, vec!["duplicate sentence id 7"]);
    }

    #[test]
    fn dangling_question_references_are_reported() {
        let items = vec![item("(1)", vec![sentence(1, Some(9))], vec![question(1, 1)])];
        let report = check_items(&items);
        assert_eq!(
            report.items[0].issues,
            vec!["sentence 1 references missing question 9"]
        );
    }

    #[test]
    fn unanswerable_questions_are_reported() {
        let items = vec![item("(3)", Vec::new(), vec![question(3, 5)])];
        let report = check_items(&items);
        assert_eq!(
            report.items[0].issues,
            vec!["question 3 has no choice matching correct answer 5"]
        );
    }

    #[test]
    fn passage_slots_are_cross_checked_against_questions() {
        let items = vec![item(
            "Gap ( 4 ) and gap \\n( 5 ) here.",
            Vec::new(),
            vec![question(4, 1), question(6, 1)],
        )];
        let report = check_items(&items);
        assert_eq!(
            report.items[0].issues,
            vec![
                "passage slot (5) has no matching question",
                "question 6 has no slot in the passage",
            ]
        );
        assert_eq!(report.issue_count, 2);
    }
}
