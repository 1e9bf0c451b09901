//! Multiple-choice prompt rendering.
//!
//! Every rendered prompt ends with [`ANSWER_INSTRUCTION`], which asks the model
//! for a single option letter.

use crate::dataset::QuestionItem;
use crate::scoring::Letter;

/// Fixed trailer appended to every question.
pub const ANSWER_INSTRUCTION: &str =
    "Answer with the single letter of the correct option (A, B, C, or D).\nAnswer:";

/// Render a single question with labeled options and the answer instruction.
pub fn render_question(item: &QuestionItem) -> String {
    let mut prompt = format!("Question: {}\nOptions:\n", item.question);
    for (letter, option) in Letter::ALL.iter().zip(item.options.iter()) {
        prompt.push_str(&format!("{}. {}\n", letter, option));
    }
    prompt.push_str(ANSWER_INSTRUCTION);
    prompt
}

/// Render `target` preceded by up to `shot_count` solved exemplars.
///
/// Exemplars are taken from the front of `exemplars` in order. Each is rendered
/// as its question followed by its correct letter and a blank line. With zero
/// shots, or an empty pool, the result equals `render_question(target)`.
pub fn render_few_shot(
    exemplars: &[QuestionItem],
    target: &QuestionItem,
    shot_count: usize,
) -> String {
    let shots = shot_count.min(exemplars.len());
    let mut parts = Vec::with_capacity(shots * 2 + 1);
    for example in &exemplars[..shots] {
        parts.push(render_question(example));
        parts.push(format!("{}\n", example.correct_letter()));
    }
    parts.push(render_question(target));
    parts.join("\n")
}
