pub mod callbacks;
pub mod commands;
pub mod handlers;

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::config::Config;
use crate::error::BotError;
use crate::quiz::bank::QuestionBank;
use crate::quiz::QuizEngine;
use crate::registry::Registry;
use crate::session::Sessions;

pub const MENU_PROMPT: &str = "Elige una opción:";
pub const PASSWORD_PROMPT: &str = "Por favor, ingrese la contraseña para continuar:";
pub const WRONG_PASSWORD_TEXT: &str = "🔒 Contraseña incorrecta. Inténtalo de nuevo.";

pub const INFO_BUTTON: &str = "Información";
pub const START_BUTTON: &str = "Iniciar";
pub const INSTRUCTIONS_BUTTON: &str = "Instrucciones";

/// Shared application state, accessible from all handlers. Built once in
/// `main` and injected through `dptree::deps!`.
pub struct AppState {
    pub config: Config,
    pub registry: Arc<dyn Registry>,
    pub bank: QuestionBank,
    pub sessions: Sessions,
    pub engine: QuizEngine,
}

impl AppState {
    /// The registry is authoritative; the session flag only short-circuits
    /// the lookup once a chat is known to be registered.
    pub async fn is_authenticated(&self, chat: ChatId) -> bool {
        if self.sessions.is_authenticated(chat) {
            return true;
        }
        match self.registry.contains(chat).await {
            Ok(true) => {
                self.sessions.mark_authenticated(chat);
                true
            }
            Ok(false) => false,
            Err(e) => {
                log::error!("registry lookup failed for chat {chat}: {e}");
                false
            }
        }
    }

    /// Checks a password attempt. A correct password registers the chat
    /// durably and marks the session; a wrong one changes nothing.
    pub async fn submit_password(&self, chat: ChatId, text: &str) -> Result<bool, BotError> {
        if text != self.config.password {
            return Ok(false);
        }
        self.registry.register(chat).await?;
        self.sessions.mark_authenticated(chat);
        Ok(true)
    }
}

/// Build the teloxide update handler tree: commands first, then answer
/// button presses, then free text.
pub fn build_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    let command_handler = Update::filter_message()
        .filter_command::<commands::Command>()
        .endpoint(commands::handle_command);

    let callback_handler = Update::filter_callback_query().endpoint(callbacks::handle_callback);

    let message_handler = Update::filter_message().endpoint(handlers::handle_message);

    dptree::entry()
        .branch(command_handler)
        .branch(callback_handler)
        .branch(message_handler)
}

pub async fn show_menu(bot: &Bot, chat: ChatId) -> Result<(), teloxide::RequestError> {
    let keyboard = KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(INFO_BUTTON),
        KeyboardButton::new(START_BUTTON),
        KeyboardButton::new(INSTRUCTIONS_BUTTON),
    ]])
    .resize_keyboard(true)
    .one_time_keyboard(true);

    bot.send_message(chat, MENU_PROMPT)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

/// Loads the bank, presents a fresh question to the chat and sends it with
/// one inline button per option.
pub async fn send_question(bot: &Bot, state: &AppState, chat: ChatId) -> Result<(), BotError> {
    let questions = state.bank.load().await;
    let presented = state.engine.present(chat, &questions)?;

    let keyboard = InlineKeyboardMarkup::new(
        presented
            .choices
            .iter()
            .map(|choice| {
                vec![InlineKeyboardButton::callback(
                    choice.label.clone(),
                    choice.token.clone(),
                )]
            }),
    );

    bot.send_message(chat, presented.prompt)
        .reply_markup(keyboard)
        .await?;
    log::info!("question sent to chat {chat}");
    Ok(())
}
