mod bot;
mod config;
mod error;
mod quiz;
mod registry;
mod scheduler;
mod session;

use std::sync::Arc;

use dotenv::dotenv;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;

use bot::AppState;
use config::Config;
use quiz::bank::QuestionBank;
use quiz::QuizEngine;
use registry::DocumentRegistry;
use session::Sessions;

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting quiz bot...");

    // Missing configuration is fatal here and nowhere else.
    let config = Config::from_env().expect("configuration is incomplete");
    let bot = Bot::new(config.token.clone());

    let http = reqwest::Client::new();
    let sessions = Sessions::default();
    let state = Arc::new(AppState {
        registry: Arc::new(DocumentRegistry::new(
            http.clone(),
            config.registry_endpoint.clone(),
            config.registry_key.clone(),
        )),
        bank: QuestionBank::new(http, config.bank_url.clone()),
        engine: QuizEngine::new(sessions.clone()),
        sessions,
        config,
    });

    scheduler::spawn(bot.clone(), state.clone());

    let mut dispatcher = Dispatcher::builder(bot.clone(), bot::build_handler())
        .dependencies(dptree::deps![state.clone()])
        .enable_ctrlc_handler()
        .build();

    match state.config.webhook_url.clone() {
        Some(url) => {
            log::info!("listening for webhook updates on port {}", state.config.port);
            let addr = ([0, 0, 0, 0], state.config.port).into();
            let listener = webhooks::axum(bot, webhooks::Options::new(addr, url))
                .await
                .expect("failed to register the webhook");
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        // Long polling for local runs, without a public URL.
        None => dispatcher.dispatch().await,
    }
}
