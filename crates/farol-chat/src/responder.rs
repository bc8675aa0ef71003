//! Chat session and response generation
//!
//! A session is bound to one dataset snapshot. Sends are serialized by the
//! processing gate: a second submission while one is in flight is rejected,
//! never queued. The simulated processing delay is a plain timer; dropping
//! the in-flight future leaves the gate closed, matching the UI behavior of
//! a disabled send control.

use std::time::Duration;

use farol_core::{Conversation, Dataset, Message, OnboardingContext};
use farol_data::SchemaProfile;
use farol_insight::{format_count, format_plain, summary_stats, ColumnAggregate};
use thiserror::Error;
use tokio::time::sleep;
use tracing::debug;

use crate::rules::{match_topic, Topic};

/// Default simulated processing delay
pub const RESPONSE_DELAY: Duration = Duration::from_millis(1500);

/// Column names listed inside an answer before truncating with "..."
const LIST_PREVIEW: usize = 5;

/// Rejections surfaced by the send gate
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    /// A previous message is still being processed
    #[error("uma mensagem já está sendo processada")]
    Busy,

    /// Blank input is not accepted
    #[error("a mensagem está vazia")]
    EmptyMessage,

    /// `respond` was called with no submitted message pending
    #[error("nenhuma mensagem pendente")]
    NoPendingMessage,
}

/// Responder lifecycle; `Responded` collapses into the returned message
/// and an immediate transition back to idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Processing,
}

/// One chat session over a dataset snapshot
pub struct ChatSession {
    dataset: Dataset,
    onboarding: Option<OnboardingContext>,
    conversation: Conversation,
    state: ChatState,
    pending: Option<String>,
    response_delay: Duration,
}

impl ChatSession {
    /// Start a session, seeding the conversation with the greeting
    pub fn new(dataset: Dataset, onboarding: Option<OnboardingContext>) -> Self {
        let greeting = format!(
            "Olá! Sou o Agente 360, seu assistente de análise de dados. \
             Analisei seu arquivo CSV com {} registros e {} colunas. \
             Como posso ajudá-lo hoje?",
            dataset.record_count(),
            dataset.column_count()
        );

        let mut conversation = Conversation::new();
        conversation.push(Message::assistant(greeting));

        Self {
            dataset,
            onboarding,
            conversation,
            state: ChatState::Idle,
            pending: None,
            response_delay: RESPONSE_DELAY,
        }
    }

    /// Override the simulated processing delay
    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Accept a user message and close the gate.
    ///
    /// Appends exactly one user message on success; while the gate is
    /// closed further submissions are rejected, not queued.
    pub fn submit(&mut self, input: &str) -> Result<(), ChatError> {
        if self.state == ChatState::Processing {
            return Err(ChatError::Busy);
        }
        let text = input.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.conversation.push(Message::user(text));
        self.pending = Some(text.to_string());
        self.state = ChatState::Processing;
        Ok(())
    }

    /// Produce the assistant reply for the pending message after the
    /// simulated delay, reopening the gate
    pub async fn respond(&mut self) -> Result<&Message, ChatError> {
        let question = self.pending.take().ok_or(ChatError::NoPendingMessage)?;

        sleep(self.response_delay).await;

        let reply = self.answer(&question);
        self.state = ChatState::Idle;
        debug!(topic = ?match_topic(&question), "answered chat message");
        Ok(self.conversation.push(Message::assistant(reply)))
    }

    /// Submit and respond in one call
    pub async fn send(&mut self, input: &str) -> Result<&Message, ChatError> {
        self.submit(input)?;
        self.respond().await
    }

    fn answer(&self, question: &str) -> String {
        let profile = SchemaProfile::detect(&self.dataset);

        match match_topic(question) {
            Some(Topic::RecordCount) => format!(
                "Seu arquivo contém **{}** registros no total.",
                format_count(self.dataset.record_count())
            ),
            Some(Topic::ColumnCount) => format!(
                "Seu dataset possui **{}** colunas: {}",
                self.dataset.column_count(),
                preview_list(self.dataset.columns())
            ),
            Some(Topic::NumericColumnCount) => format!(
                "Identifiquei **{}** colunas numéricas: {}",
                profile.numeric_columns.len(),
                preview_list(&profile.numeric_columns)
            ),
            Some(Topic::Average) => self.first_numeric_answer(&profile, |column, stats| {
                format!("A média da coluna **{column}** é **{:.2}**", stats.avg())
            }, "Não encontrei colunas numéricas para calcular a média."),
            Some(Topic::Maximum) => self.first_numeric_answer(&profile, |column, stats| {
                format!(
                    "O valor máximo na coluna **{column}** é **{}**",
                    format_plain(stats.max)
                )
            }, "Não encontrei colunas numéricas para identificar o valor máximo."),
            Some(Topic::Minimum) => self.first_numeric_answer(&profile, |column, stats| {
                format!(
                    "O valor mínimo na coluna **{column}** é **{}**",
                    format_plain(stats.min)
                )
            }, "Não encontrei colunas numéricas para identificar o valor mínimo."),
            Some(Topic::Trend) => "Com base na análise dos dados, identifiquei alguns padrões \
                interessantes. Recomendo focar nas colunas numéricas para identificar \
                tendências. Você pode visualizar os gráficos acima para uma análise mais \
                detalhada."
                .to_string(),
            Some(Topic::Help) => "Posso ajudá-lo com:\n\n\
                • Informações sobre o total de registros\n\
                • Detalhes sobre as colunas\n\
                • Cálculos estatísticos (média, máximo, mínimo)\n\
                • Identificação de padrões e tendências\n\
                • Análises específicas sobre seus dados\n\n\
                Faça uma pergunta sobre seus dados!"
                .to_string(),
            None => self.fallback(),
        }
    }

    /// Every numeric answer operates on the first numeric column only
    fn first_numeric_answer<F>(&self, profile: &SchemaProfile, build: F, missing: &str) -> String
    where
        F: Fn(&str, &ColumnAggregate) -> String,
    {
        match profile.first_numeric() {
            Some(column) => {
                let stats = summary_stats(&self.dataset, &profile.numeric_columns);
                build(column, &stats[column])
            }
            None => missing.to_string(),
        }
    }

    fn fallback(&self) -> String {
        if let Some(context) = &self.onboarding {
            return format!(
                "Com base nas informações do seu onboarding ({}), posso ajudar a analisar \
                 seus dados de {}. Seus objetivos incluem: {}. Que tipo de análise você \
                 gostaria de fazer?",
                context.industry,
                context.data_source,
                context.goals.join(", ")
            );
        }

        "Entendi sua pergunta. Com base nos dados carregados, posso ajudá-lo a entender \
         melhor seus dados. Tente perguntar sobre:\n\n\
         • Estatísticas gerais\n\
         • Valores específicos\n\
         • Padrões e tendências\n\
         • Comparações entre colunas\n\n\
         Como posso ajudar mais especificamente?"
            .to_string()
    }
}

fn preview_list(names: &[String]) -> String {
    let preview: Vec<&str> = names
        .iter()
        .take(LIST_PREVIEW)
        .map(|name| name.as_str())
        .collect();
    let ellipsis = if names.len() > LIST_PREVIEW { "..." } else { "" };
    format!("{}{}", preview.join(", "), ellipsis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use farol_core::Role;

    fn sales_session() -> ChatSession {
        let dataset = Dataset::from_rows(
            vec!["Produto".to_string(), "Vendas".to_string()],
            vec![
                vec!["A".to_string(), "100".to_string()],
                vec!["B".to_string(), "200".to_string()],
                vec!["C".to_string(), "300".to_string()],
            ],
        )
        .unwrap();
        ChatSession::new(dataset, None).with_response_delay(Duration::ZERO)
    }

    #[test]
    fn test_greeting_is_seeded() {
        let session = sales_session();
        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::Assistant);
        assert!(messages[0].content.contains("3 registros"));
        assert!(messages[0].content.contains("2 colunas"));
    }

    #[tokio::test]
    async fn test_record_count_answer() {
        let mut session = sales_session();
        let reply = session.send("qual o total de registros?").await.unwrap();
        assert!(reply.content.contains("3"));
    }

    #[tokio::test]
    async fn test_average_uses_first_numeric_column() {
        let mut session = sales_session();
        let reply = session.send("qual a média?").await.unwrap();
        assert!(reply.content.contains("Vendas"));
        assert!(reply.content.contains("200.00"));
    }

    #[tokio::test]
    async fn test_maximum_and_minimum_answers() {
        let mut session = sales_session();
        let reply = session.send("qual o maior valor?").await.unwrap();
        assert!(reply.content.contains("300"));

        let reply = session.send("e o mínimo?").await.unwrap();
        assert!(reply.content.contains("100"));
    }

    #[tokio::test]
    async fn test_no_numeric_columns_answer() {
        let dataset = Dataset::from_rows(
            vec!["Nome".to_string()],
            vec![vec!["Ana".to_string()]],
        )
        .unwrap();
        let mut session = ChatSession::new(dataset, None).with_response_delay(Duration::ZERO);

        let reply = session.send("qual a média?").await.unwrap();
        assert!(reply.content.contains("Não encontrei colunas numéricas"));
    }

    #[test]
    fn test_gate_rejects_while_processing() {
        let mut session = sales_session();
        session.submit("primeira pergunta").unwrap();
        assert_eq!(session.state(), ChatState::Processing);
        assert_eq!(session.submit("segunda"), Err(ChatError::Busy));
        // The rejected message was not queued
        assert_eq!(session.conversation().len(), 2);
    }

    #[tokio::test]
    async fn test_gate_reopens_after_response() {
        let mut session = sales_session();
        session.send("quantos registros?").await.unwrap();
        assert_eq!(session.state(), ChatState::Idle);
        assert!(session.send("ajuda").await.is_ok());
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected() {
        let mut session = sales_session();
        assert!(matches!(
            session.send("   ").await,
            Err(ChatError::EmptyMessage)
        ));
        assert_eq!(session.conversation().len(), 1);
    }

    #[tokio::test]
    async fn test_messages_append_in_submission_order() {
        let mut session = sales_session();
        session.send("quantos registros?").await.unwrap();
        session.send("ajuda").await.unwrap();

        let roles: Vec<Role> = session
            .conversation()
            .messages()
            .iter()
            .map(|message| message.role)
            .collect();
        assert_eq!(
            roles,
            vec![
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
            ]
        );
    }

    #[tokio::test]
    async fn test_fallback_uses_onboarding_context() {
        let dataset = Dataset::from_rows(
            vec!["Vendas".to_string()],
            vec![vec!["10".to_string()]],
        )
        .unwrap();
        let context = OnboardingContext {
            industry: "Varejo".to_string(),
            data_source: "ERP".to_string(),
            goals: vec!["Aumentar vendas".to_string()],
        };
        let mut session =
            ChatSession::new(dataset, Some(context)).with_response_delay(Duration::ZERO);

        let reply = session.send("bom dia").await.unwrap();
        assert!(reply.content.contains("Varejo"));
        assert!(reply.content.contains("ERP"));
        assert!(reply.content.contains("Aumentar vendas"));
    }

    #[tokio::test]
    async fn test_help_lists_capabilities() {
        let mut session = sales_session();
        let reply = session.send("ajuda").await.unwrap();
        assert!(reply.content.contains("Posso ajudá-lo com"));
        assert!(reply.content.contains("média, máximo, mínimo"));
    }
}
