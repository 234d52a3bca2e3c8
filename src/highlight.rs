use regex::Regex;

use crate::exam::Question;

/// One run of a rendered sentence. Blank slots keep their literal token
/// until reveal mode substitutes the correct choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// plain text
    Text(String),
    /// emphasized main-verb span
    Verb(String),
    /// unresolved blank slot, emphasis styling only
    Blank(String),
    /// blank slot substituted with the correct choice text
    Answer { number: u32, text: String },
}

/// Tokenize one sentence into display segments.
///
/// Blank slots are parenthesized question numbers like `( 12 )`. With
/// reveal mode on, a slot whose question and correct choice both resolve
/// is substituted; every other slot stays a literal [`Segment::Blank`].
/// Main-verb emphasis applies only to plain runs of the active sentence,
/// matching the authored verb forms whole-word and case-insensitively.
/// Missing or malformed data never fails, it just leaves text unstyled.
pub fn render_sentence(
    text: &str,
    main_verb: Option<&str>,
    is_active: bool,
    reveal: bool,
    questions: &[Question],
) -> Vec<Segment> {
    let slot = Regex::new(r"\(\s*(\d+)\s*\)").unwrap();
    let verb = if is_active {
        main_verb.and_then(verb_pattern)
    } else {
        None
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for caps in slot.captures_iter(text) {
        let m = caps.get(0).unwrap();
        push_plain(&mut segments, &text[last..m.start()], verb.as_ref());
        segments.push(resolve_slot(m.as_str(), &caps[1], reveal, questions));
        last = m.end();
    }
    push_plain(&mut segments, &text[last..], verb.as_ref());

    segments
}

fn resolve_slot(token: &str, digits: &str, reveal: bool, questions: &[Question]) -> Segment {
    if reveal {
        let answer = digits
            .parse::<u32>()
            .ok()
            .and_then(|n| questions.iter().find(|q| q.number == n))
            .and_then(|q| {
                q.correct_choice().map(|c| Segment::Answer {
                    number: q.number,
                    text: c.text.clone(),
                })
            });
        if let Some(answer) = answer {
            return answer;
        }
    }
    Segment::Blank(token.to_string())
}

fn push_plain(segments: &mut Vec<Segment>, text: &str, verb: Option<&Regex>) {
    if text.is_empty() {
        return;
    }
    let Some(verb) = verb else {
        segments.push(Segment::Text(text.to_string()));
        return;
    };

    let mut last = 0;
    for m in verb.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::Text(text[last..m.start()].to_string()));
        }
        segments.push(Segment::Verb(m.as_str().to_string()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::Text(text[last..].to_string()));
    }
}

/// Whole-word alternation over the comma-delimited verb forms. Authored
/// text is escaped, so the pattern only fails on an empty verb list.
fn verb_pattern(main_verb: &str) -> Option<Regex> {
    let verbs: Vec<String> = main_verb
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(regex::escape)
        .collect();
    if verbs.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?i)\b(?:{})\b", verbs.join("|"))).ok()
}
