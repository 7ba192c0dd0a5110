pub mod bank;
pub mod format;

use rand::seq::SliceRandom;
use teloxide::types::ChatId;

use crate::error::BotError;
use crate::session::Sessions;

/// Inline buttons wider than this get their label wrapped onto extra lines.
pub const MAX_BUTTON_WIDTH: usize = 40;

/// One entry of the bank document. Field names follow the stored JSON.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    /// The correct option, identified by its leading character token.
    pub correct: String,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Feedback {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

impl Question {
    pub fn new(text: String, options: Vec<String>, correct: String, feedback: Feedback) -> Self {
        Self {
            text,
            options,
            correct,
            feedback,
        }
    }

    /// Index of the correct option. The bank stores `correct` as a leading
    /// token (e.g. "a"), so the match is on the first character; the first
    /// option with that token wins.
    pub fn correct_index(&self) -> Option<usize> {
        let token = self.correct.chars().next()?;
        self.options
            .iter()
            .position(|option| option.chars().next() == Some(token))
    }
}

/// A question rendered for delivery: prompt plus one selectable choice per
/// option. The choice token travels through the callback round trip and
/// comes back to [`QuizEngine::evaluate`].
#[derive(Debug, Clone)]
pub struct Presented {
    pub prompt: String,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone)]
pub struct Choice {
    pub label: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Correct,
    Incorrect(Feedback),
    NoPendingQuestion,
}

pub struct QuizEngine {
    sessions: Sessions,
}

impl QuizEngine {
    pub fn new(sessions: Sessions) -> Self {
        Self { sessions }
    }

    /// Picks one question at random, records it as the chat's pending
    /// question (replacing any previous one) and returns it ready to render.
    /// Tokens are option indexes, so two options sharing a first letter stay
    /// distinguishable on the way back.
    pub fn present(&self, chat: ChatId, questions: &[Question]) -> Result<Presented, BotError> {
        let question = questions
            .choose(&mut rand::thread_rng())
            .ok_or(BotError::NoQuestions)?;

        self.sessions.set_pending(chat, question.clone());

        let choices = format::format_options(&question.options, MAX_BUTTON_WIDTH)
            .into_iter()
            .enumerate()
            .map(|(index, label)| Choice {
                label,
                token: index.to_string(),
            })
            .collect();

        Ok(Presented {
            prompt: question.text.clone(),
            choices,
        })
    }

    /// Scores a button press against the chat's pending question. The
    /// pending question is left in place: pressing another button before the
    /// next question re-evaluates against the same question.
    pub fn evaluate(&self, chat: ChatId, token: &str) -> Outcome {
        let question = match self.sessions.pending(chat) {
            Some(question) => question,
            None => return Outcome::NoPendingQuestion,
        };

        let selected = token.parse::<usize>().ok();
        if selected.is_some() && selected == question.correct_index() {
            Outcome::Correct
        } else {
            Outcome::Incorrect(question.feedback)
        }
    }
}
