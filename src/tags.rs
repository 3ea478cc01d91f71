//! Derives the `question_tag` relation from the question set.

use crate::models::{Question, QuestionTag};

/// Flatten each question's tag list into one row per (question, tag) pair.
///
/// Questions are visited in input order and tags in their original order, so
/// the output is deterministic for a given input.
pub fn extract_question_tags(questions: &[Question]) -> Vec<QuestionTag> {
    questions
        .iter()
        .flat_map(|q| {
            q.tags.iter().map(|tag| QuestionTag {
                question_id: q.question_id,
                tag: tag.clone(),
            })
        })
        .collect()
}
