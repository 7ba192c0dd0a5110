use std::sync::Arc;

use teloxide::prelude::*;

use super::{
    send_question, show_menu, AppState, INFO_BUTTON, INSTRUCTIONS_BUTTON, START_BUTTON,
    WRONG_PASSWORD_TEXT,
};
use crate::error::HandlerResult;

const INFO_TEXT: &str = "¡Hola! Soy Javi, tu asistente de aprendizaje. 🧑‍🏫📚\n\n\
    Mi propósito es ayudarte a optimizar y perfeccionar los procedimientos que aplicas en tu trabajo, en el área de motos \
    a través de preguntas y respuestas. 📈💡\n\n\
    Fue creado para que aprendas de forma interactiva y con cariño del área de aprendizaje Suburbia y \
    diseño de experiencias. 🤖❤️\n\n\
    Creador: Este bot ha sido desarrollado con cariño y dedicación por Alan Gomez, para facilitar tu \
    aprendizaje continuo y mejorar tus habilidades. 🐶🏆🧑‍💻";

const INSTRUCTIONS_TEXT: &str = "Instrucciones para usar el bot Javi:\n\n\
    1. Menú principal:\n\
    \x20  - Información: Obtén información sobre el bot.\n\
    \x20  - Iniciar: Recibe una nueva pregunta de aprendizaje.\n\
    \x20  - Instrucciones: Consulta cómo usar el bot.\n\n\
    2. Funcionamiento:\n\
    \x20  - Recibirás preguntas periódicamente a las 9 AM, 12 PM, 3 PM y 6 PM.\n\
    \x20  - Puedes solicitar una nueva pregunta en cualquier momento seleccionando 'Iniciar' en el menú.\n\
    \x20  - No se responderán mensajes de texto fuera de las opciones proporcionadas.\n\n\
    3. Retroalimentación:\n\
    \x20  - Si tu respuesta es incorrecta, recibirás material de repaso como infografías, audios, videos y descripciones.\n\
    \x20  - No te preocupes por equivocarte, ¡aprendemos de nuestros errores!\n\n\
    ¡Encantado de ayudarte a aprender y mejorar! 🐶🏆🧑‍💻";

/// Menu vocabulary. Anything the chat types outside of it falls back to
/// re-showing the menu rather than an error.
#[derive(Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Info,
    StartQuiz,
    Instructions,
    Other,
}

impl MenuChoice {
    pub fn parse(text: &str) -> Self {
        match text {
            INFO_BUTTON => MenuChoice::Info,
            START_BUTTON => MenuChoice::StartQuiz,
            INSTRUCTIONS_BUTTON => MenuChoice::Instructions,
            _ => MenuChoice::Other,
        }
    }
}

pub async fn handle_message(bot: Bot, state: Arc<AppState>, msg: Message) -> HandlerResult {
    let chat = msg.chat.id;
    let text = match msg.text() {
        Some(text) => text,
        None => return Ok(()),
    };

    if !state.is_authenticated(chat).await {
        if state.submit_password(chat, text).await? {
            show_menu(&bot, chat).await?;
        } else {
            bot.send_message(chat, WRONG_PASSWORD_TEXT).await?;
        }
        return Ok(());
    }

    match MenuChoice::parse(text) {
        MenuChoice::Info => {
            bot.send_message(chat, INFO_TEXT).await?;
        }
        MenuChoice::StartQuiz => {
            // On an empty bank the user simply gets no question; the cause
            // is in the log.
            if let Err(e) = send_question(&bot, &state, chat).await {
                log::error!("could not send a question to chat {chat}: {e}");
            }
        }
        MenuChoice::Instructions => {
            bot.send_message(chat, INSTRUCTIONS_TEXT).await?;
        }
        MenuChoice::Other => {
            show_menu(&bot, chat).await?;
        }
    }
    Ok(())
}
