use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::InputFile;
use url::Url;

use super::AppState;
use crate::error::HandlerResult;
use crate::quiz::{Feedback, Outcome};

const CORRECT_TEXT: &str = "¡Correcto! Lo estas haciendo bien 🥳🥳";
const NO_PENDING_TEXT: &str = "Error: No se encontró la pregunta actual.";
const NO_IMAGE_TEXT: &str = "No hay imagen que mostrar.";
const NO_VIDEO_TEXT: &str = "No se pudo cargar el video.";

/// A button press on a question message. The pressed message is edited in
/// place so the inline keyboard disappears with the verdict.
pub async fn handle_callback(bot: Bot, state: Arc<AppState>, query: CallbackQuery) -> HandlerResult {
    bot.answer_callback_query(query.id.clone()).await?;

    let message = match query.message {
        Some(message) => message,
        None => return Ok(()),
    };
    let token = match query.data {
        Some(token) => token,
        None => return Ok(()),
    };
    let chat = message.chat.id;

    match state.engine.evaluate(chat, &token) {
        Outcome::Correct => {
            bot.edit_message_text(chat, message.id, CORRECT_TEXT).await?;
        }
        Outcome::Incorrect(feedback) => {
            bot.edit_message_text(chat, message.id, format!("Incorrecto. {}", feedback.text))
                .await?;
            send_feedback_media(&bot, chat, &feedback).await;
        }
        Outcome::NoPendingQuestion => {
            log::error!("callback from chat {chat} with no pending question");
            bot.edit_message_text(chat, message.id, NO_PENDING_TEXT)
                .await?;
        }
    }
    Ok(())
}

/// Image and video are attempted independently; a failure on either is
/// logged and degraded to a fallback text without failing the evaluation.
async fn send_feedback_media(bot: &Bot, chat: ChatId, feedback: &Feedback) {
    if let Some(image) = &feedback.image {
        let failure = match image.parse::<Url>() {
            Ok(url) => bot
                .send_photo(chat, InputFile::url(url))
                .await
                .err()
                .map(|e| e.to_string()),
            Err(e) => Some(e.to_string()),
        };
        if let Some(e) = failure {
            log::error!("failed to send feedback image to chat {chat}: {e}");
            let _ = bot.send_message(chat, NO_IMAGE_TEXT).await;
        }
    }

    if let Some(video) = &feedback.video {
        // Telegram only fetches videos from https URLs.
        let failure = if video.starts_with("https://") {
            match video.parse::<Url>() {
                Ok(url) => bot
                    .send_video(chat, InputFile::url(url))
                    .await
                    .err()
                    .map(|e| e.to_string()),
                Err(e) => Some(e.to_string()),
            }
        } else {
            Some(format!("not an https url: {video}"))
        };
        if let Some(e) = failure {
            log::error!("failed to send feedback video to chat {chat}: {e}");
            let _ = bot.send_message(chat, NO_VIDEO_TEXT).await;
        }
    }
}
