use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use super::{show_menu, AppState, PASSWORD_PROMPT};
use crate::error::HandlerResult;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    Start,
    Help,
}

const HELP_TEXT: &str = "¡Hola! Soy Javi, tu asistente de aprendizaje interactivo. 🧑‍🏫📚\n\n\
    Aquí tienes una guía rápida sobre cómo utilizarme:\n\n\
    /start - Inicia la interacción con el bot y te despliega el siguiente menú.\n\
    Información - Te daré una breve descripción sobre mí.\n\
    Iniciar - Envía una nueva pregunta para que la respondas.\n\
    Instrucciones - Consulta cómo usar el bot y los tiempos establecidos para recibir preguntas.\n\n\
    Recuerda que este bot está diseñado para que respondas preguntas y recibas retroalimentación inmediata. \
    No responderé a mensajes de texto fuera de las opciones proporcionadas. 📈💡\n\n\
    ¡Encantado de ayudarte a aprender y mejorar! 🐶🏆🧑‍💻";

pub async fn handle_command(
    bot: Bot,
    state: Arc<AppState>,
    msg: Message,
    cmd: Command,
) -> HandlerResult {
    let chat = msg.chat.id;
    match cmd {
        Command::Start => {
            log::info!("/start from chat {chat}");
            if state.is_authenticated(chat).await {
                show_menu(&bot, chat).await?;
            } else {
                bot.send_message(chat, PASSWORD_PROMPT).await?;
            }
        }
        Command::Help => {
            bot.send_message(chat, HELP_TEXT).await?;
        }
    }
    Ok(())
}
