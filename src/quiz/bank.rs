//! The question bank lives as one JSON document in blob storage and is
//! re-fetched for every presentation, so edits to the document show up
//! without a restart.

use super::Question;

pub struct QuestionBank {
    http: reqwest::Client,
    url: String,
}

impl QuestionBank {
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }

    /// Fetches and parses the bank document. Any failure degrades to an
    /// empty set; the caller decides whether that aborts the operation.
    pub async fn load(&self) -> Vec<Question> {
        match self.fetch().await {
            Ok(questions) => {
                log::info!("loaded {} questions from the bank", questions.len());
                questions
            }
            Err(e) => {
                log::error!("failed to load the question bank: {e}");
                Vec::new()
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Question>, Box<dyn std::error::Error + Send + Sync>> {
        let body = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANK_DOC: &str = r#"
    [
        {
            "question": "¿Qué revisas primero en la recepción de una moto?",
            "options": ["a) Niveles de aceite", "b) Presión de llantas"],
            "correct": "a",
            "feedback": {
                "text": "Repasa la lista de recepción.",
                "image": "https://storage.example/infografia.png"
            }
        },
        {
            "question": "¿Cada cuánto se calibra la herramienta?",
            "options": ["a) Cada mes", "b) Cada semana", "c) Cada año"],
            "correct": "b",
            "feedback": { "text": "La calibración es semanal." }
        }
    ]
    "#;

    #[test]
    fn parses_the_bank_document_field_names() {
        let questions: Vec<Question> = serde_json::from_str(BANK_DOC).unwrap();
        assert_eq!(questions.len(), 2);

        let first = &questions[0];
        assert!(first.text.starts_with("¿Qué revisas"));
        assert_eq!(first.options.len(), 2);
        assert_eq!(first.correct, "a");
        assert_eq!(
            first.feedback.image.as_deref(),
            Some("https://storage.example/infografia.png")
        );
        assert!(first.feedback.video.is_none());

        // Media fields are optional per question.
        assert!(questions[1].feedback.image.is_none());
    }

    #[test]
    fn rejects_a_malformed_document() {
        let result: Result<Vec<Question>, _> = serde_json::from_str("{\"not\": \"an array\"}");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_entries_missing_required_fields() {
        let doc = r#"[{"question": "sin opciones", "correct": "a"}]"#;
        let result: Result<Vec<Question>, _> = serde_json::from_str(doc);
        assert!(result.is_err());
    }
}
