use serde::Serialize;

use super::content::{Question, QuizOption};
use super::emotion::{EmotionDelta, EmotionProfile};
use super::error::{GameError, Result};

/// Snapshot of one completed question. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
    pub deltas: Vec<EmotionDelta>,
}

/// Append-only record of answers in completion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnswerLog {
    records: Vec<AnswerRecord>,
}

impl AnswerLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent `n` answers, oldest first.
    pub fn latest(&self, n: usize) -> &[AnswerRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    fn push(&mut self, record: AnswerRecord) {
        self.records.push(record);
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}

/// What happened after a successful [`QuizEngine::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome<'a> {
    NextQuestion { index: usize, question: &'a Question },
    Complete,
}

/// Walks the question list: one pending selection per question, no skips,
/// no repeats.
#[derive(Debug, Clone, Default)]
pub struct QuizEngine {
    index: usize,
    pending: Option<usize>,
}

impl QuizEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    pub fn is_complete(&self, questions: &[Question]) -> bool {
        self.index >= questions.len()
    }

    pub fn current<'a>(&self, questions: &'a [Question]) -> Option<&'a Question> {
        questions.get(self.index)
    }

    /// Mark `option` as the pending answer for the current question.
    ///
    /// Re-selecting overwrites the previous choice and never advances.
    pub fn select_answer<'a>(
        &mut self,
        questions: &'a [Question],
        option: usize,
    ) -> Result<&'a QuizOption> {
        let available = self.current(questions).map_or(0, |q| q.options.len());
        let chosen = self
            .current(questions)
            .and_then(|q| q.options.get(option))
            .ok_or(GameError::InvalidSelection { index: option, available })?;

        self.pending = Some(option);
        Ok(chosen)
    }

    /// Commit the pending selection: score it, log it, move on.
    pub fn advance<'a>(
        &mut self,
        questions: &'a [Question],
        profile: &mut EmotionProfile,
        log: &mut AnswerLog,
    ) -> Result<AdvanceOutcome<'a>> {
        let pending = self.pending.ok_or(GameError::BlockedAdvance)?;
        let question = self.current(questions).ok_or(GameError::BlockedAdvance)?;
        let option = question
            .options
            .get(pending)
            .ok_or(GameError::InvalidSelection {
                index: pending,
                available: question.options.len(),
            })?;

        profile.apply_deltas(&option.emotions);
        log.push(AnswerRecord {
            question: question.prompt.clone(),
            answer: option.label.clone(),
            deltas: option.emotions.clone(),
        });

        self.pending = None;
        self.index += 1;

        Ok(match questions.get(self.index) {
            Some(question) => AdvanceOutcome::NextQuestion {
                index: self.index,
                question,
            },
            None => AdvanceOutcome::Complete,
        })
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::Content;
    use crate::core::emotion::EmotionKind;

    fn bundled() -> Content {
        Content::from_json(include_str!("../../data/data.json")).unwrap()
    }

    #[test]
    fn test_advance_without_selection_is_blocked() {
        let content = Content::fallback();
        let mut quiz = QuizEngine::new();
        let mut profile = EmotionProfile::new();
        let mut log = AnswerLog::new();

        let err = quiz
            .advance(content.questions(), &mut profile, &mut log)
            .unwrap_err();
        assert!(matches!(err, GameError::BlockedAdvance));
        assert_eq!(quiz.index(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_out_of_range_selection_rejected() {
        let content = Content::fallback();
        let mut quiz = QuizEngine::new();
        quiz.select_answer(content.questions(), 1).unwrap();

        let err = quiz.select_answer(content.questions(), 4).unwrap_err();
        assert!(matches!(err, GameError::InvalidSelection { index: 4, available: 4 }));
        // Earlier pending choice survives the rejected one.
        assert_eq!(quiz.pending(), Some(1));
    }

    #[test]
    fn test_reselect_overwrites_without_advancing() {
        let content = Content::fallback();
        let mut quiz = QuizEngine::new();
        quiz.select_answer(content.questions(), 0).unwrap();
        let option = quiz.select_answer(content.questions(), 3).unwrap();

        assert_eq!(option.label, "Say you look cute in it");
        assert_eq!(quiz.pending(), Some(3));
        assert_eq!(quiz.index(), 0);
    }

    #[test]
    fn test_single_question_completes() {
        let content = Content::fallback();
        let mut quiz = QuizEngine::new();
        let mut profile = EmotionProfile::new();
        let mut log = AnswerLog::new();

        quiz.select_answer(content.questions(), 3).unwrap();
        let outcome = quiz
            .advance(content.questions(), &mut profile, &mut log)
            .unwrap();

        assert_eq!(outcome, AdvanceOutcome::Complete);
        assert_eq!(profile.get(EmotionKind::Romantic), 4);
        assert_eq!(profile.get(EmotionKind::Playful), 2);
        assert_eq!(profile.total(), 6);
        assert_eq!(log.len(), 1);
        assert_eq!(log.records()[0].answer, "Say you look cute in it");
        assert!(quiz.is_complete(content.questions()));
    }

    #[test]
    fn test_full_run_totals_match_applied_weights() {
        let content = bundled();
        let questions = content.questions();
        let mut quiz = QuizEngine::new();
        let mut profile = EmotionProfile::new();
        let mut log = AnswerLog::new();
        let mut expected = 0;

        for (i, question) in questions.iter().enumerate() {
            let choice = i % question.options.len();
            expected += question.options[choice].total_weight();
            quiz.select_answer(questions, choice).unwrap();
            match quiz.advance(questions, &mut profile, &mut log).unwrap() {
                AdvanceOutcome::NextQuestion { index, question } => {
                    assert_eq!(index, i + 1);
                    assert_eq!(question.prompt, questions[i + 1].prompt);
                }
                AdvanceOutcome::Complete => assert_eq!(i, questions.len() - 1),
            }
        }

        assert_eq!(profile.total(), expected);
        assert_eq!(log.len(), questions.len());
        for (record, question) in log.records().iter().zip(questions) {
            assert_eq!(record.question, question.prompt);
        }
    }

    #[test]
    fn test_no_answers_after_completion() {
        let content = Content::fallback();
        let mut quiz = QuizEngine::new();
        let mut profile = EmotionProfile::new();
        let mut log = AnswerLog::new();
        quiz.select_answer(content.questions(), 0).unwrap();
        quiz.advance(content.questions(), &mut profile, &mut log).unwrap();

        assert!(matches!(
            quiz.select_answer(content.questions(), 0),
            Err(GameError::InvalidSelection { available: 0, .. })
        ));
        assert!(matches!(
            quiz.advance(content.questions(), &mut profile, &mut log),
            Err(GameError::BlockedAdvance)
        ));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_latest_answers() {
        let content = bundled();
        let questions = content.questions();
        let mut quiz = QuizEngine::new();
        let mut profile = EmotionProfile::new();
        let mut log = AnswerLog::new();
        for _ in questions {
            quiz.select_answer(questions, 0).unwrap();
            quiz.advance(questions, &mut profile, &mut log).unwrap();
        }

        let latest = log.latest(3);
        assert_eq!(latest.len(), 3);
        assert_eq!(latest[2].question, questions[questions.len() - 1].prompt);
        assert_eq!(AnswerLog::new().latest(3).len(), 0);
    }
}
