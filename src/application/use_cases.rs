//! Application use cases for scraping and session history
//!
//! The surface a desktop front end invokes: running scrapes, persisting
//! results, and the history/search queries behind the session panels.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::application::dto::{ScrapeRunSummary, SessionDto, SessionItemDto};
use crate::domain::entities::{ScrapeMode, ScrapeResult};
use crate::domain::repositories::SessionRepository;
use crate::scraping::ScrapeOrchestrator;

/// Use cases for driving scrape runs and persisting their results.
pub struct ScrapeUseCases {
    orchestrator: ScrapeOrchestrator,
    session_repo: Arc<dyn SessionRepository>,
}

impl ScrapeUseCases {
    pub fn new(orchestrator: ScrapeOrchestrator, session_repo: Arc<dyn SessionRepository>) -> Self {
        Self {
            orchestrator,
            session_repo,
        }
    }

    /// Run one scrape under the given mode. Persisting the result stays the
    /// caller's decision.
    pub async fn run_scrape(&self, mode: ScrapeMode) -> Result<ScrapeResult> {
        Ok(self.orchestrator.run(mode).await)
    }

    /// Persist a finished result as a new session.
    pub async fn store_result(&self, result: &ScrapeResult) -> Result<i64> {
        self.session_repo.save_session(result).await
    }

    /// Run one scrape and persist it in the same call.
    pub async fn run_and_store(&self, mode: ScrapeMode) -> Result<ScrapeRunSummary> {
        let result = self.orchestrator.run(mode).await;
        let session_id = self.session_repo.save_session(&result).await?;

        info!(session_id, items = result.len(), ?mode, "Scrape run stored");
        Ok(ScrapeRunSummary {
            session_id,
            items_count: result.len(),
        })
    }
}

/// Read-side use cases behind the session history and search panels.
pub struct SessionQueryUseCases {
    session_repo: Arc<dyn SessionRepository>,
}

impl SessionQueryUseCases {
    pub fn new(session_repo: Arc<dyn SessionRepository>) -> Self {
        Self { session_repo }
    }

    pub async fn list_sessions(&self) -> Result<Vec<SessionDto>> {
        Ok(self
            .session_repo
            .list_sessions()
            .await?
            .into_iter()
            .map(SessionDto::from)
            .collect())
    }

    /// Sessions whose timestamp contains the term, case-insensitively.
    pub async fn search_sessions(&self, term: &str) -> Result<Vec<SessionDto>> {
        let needle = term.to_lowercase();
        Ok(self
            .session_repo
            .list_sessions()
            .await?
            .into_iter()
            .filter(|session| session.timestamp.to_lowercase().contains(&needle))
            .map(SessionDto::from)
            .collect())
    }

    pub async fn session_items(&self, session_id: i64) -> Result<Vec<SessionItemDto>> {
        Ok(self
            .session_repo
            .list_items(session_id)
            .await?
            .into_iter()
            .map(SessionItemDto::from)
            .collect())
    }

    /// Items of one session whose model name contains the term,
    /// case-insensitively.
    pub async fn search_items_by_model(
        &self,
        session_id: i64,
        term: &str,
    ) -> Result<Vec<SessionItemDto>> {
        let needle = term.to_lowercase();
        Ok(self
            .session_repo
            .list_items(session_id)
            .await?
            .into_iter()
            .filter(|item| item.model_name.to_lowercase().contains(&needle))
            .map(SessionItemDto::from)
            .collect())
    }

    /// Items of one session whose price text, reduced to its digits, equals
    /// the queried value. Parsing free-form query text into a number is the
    /// UI's job; this API takes the already-validated value.
    pub async fn search_items_by_price(
        &self,
        session_id: i64,
        price: u64,
    ) -> Result<Vec<SessionItemDto>> {
        Ok(self
            .session_repo
            .list_items(session_id)
            .await?
            .into_iter()
            .filter(|item| extract_digits(&item.price_text) == price)
            .map(SessionItemDto::from)
            .collect())
    }

    /// Delete all sessions and items.
    pub async fn clear_storage(&self) -> Result<()> {
        self.session_repo.clear().await
    }
}

/// Concatenate every ASCII digit in the text into one number; 0 when the text
/// carries no digits. Mirrors how prices are matched in the history UI, where
/// price text may contain spaces and currency symbols.
fn extract_digits(text: &str) -> u64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Session, SessionItem};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[test]
    fn digit_extraction_ignores_formatting() {
        assert_eq!(extract_digits("1 250 BYN"), 1250);
        assert_eq!(extract_digits("990"), 990);
        assert_eq!(extract_digits("от 2,5 тыс."), 25);
        assert_eq!(extract_digits("no digits"), 0);
        assert_eq!(extract_digits(""), 0);
    }

    /// In-memory repository standing in for the SQLite store.
    #[derive(Default)]
    struct MemorySessionRepository {
        sessions: Mutex<Vec<Session>>,
        items: Mutex<Vec<SessionItem>>,
    }

    impl MemorySessionRepository {
        fn seeded() -> Self {
            let repo = Self::default();
            {
                let mut sessions = repo.sessions.lock().unwrap();
                sessions.push(Session {
                    id: 1,
                    timestamp: "2026-08-01 10:00:00".to_string(),
                    items_count: 2,
                });
                sessions.push(Session {
                    id: 2,
                    timestamp: "2026-08-02 18:30:00".to_string(),
                    items_count: 1,
                });
            }
            {
                let mut items = repo.items.lock().unwrap();
                items.push(SessionItem {
                    model_name: " Stels Navigator".to_string(),
                    price_text: "1 250 BYN".to_string(),
                    session_id: 1,
                });
                items.push(SessionItem {
                    model_name: " Aist Slide".to_string(),
                    price_text: "990 BYN".to_string(),
                    session_id: 1,
                });
                items.push(SessionItem {
                    model_name: " Stern Motion".to_string(),
                    price_text: "1250".to_string(),
                    session_id: 2,
                });
            }
            repo
        }
    }

    #[async_trait]
    impl SessionRepository for MemorySessionRepository {
        async fn save_session(&self, result: &ScrapeResult) -> Result<i64> {
            let mut sessions = self.sessions.lock().unwrap();
            let id = sessions.len() as i64 + 1;
            sessions.push(Session {
                id,
                timestamp: "2026-08-04 12:00:00".to_string(),
                items_count: result.len() as i64,
            });

            let mut items = self.items.lock().unwrap();
            for (model_name, price_text) in result.iter() {
                items.push(SessionItem {
                    model_name: model_name.clone(),
                    price_text: price_text.clone(),
                    session_id: id,
                });
            }
            Ok(id)
        }

        async fn list_sessions(&self) -> Result<Vec<Session>> {
            Ok(self.sessions.lock().unwrap().clone())
        }

        async fn list_items(&self, session_id: i64) -> Result<Vec<SessionItem>> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|item| item.session_id == session_id)
                .cloned()
                .collect())
        }

        async fn clear(&self) -> Result<()> {
            self.sessions.lock().unwrap().clear();
            self.items.lock().unwrap().clear();
            Ok(())
        }
    }

    fn queries() -> SessionQueryUseCases {
        SessionQueryUseCases::new(Arc::new(MemorySessionRepository::seeded()))
    }

    #[tokio::test]
    async fn session_search_matches_timestamp_substring() -> Result<()> {
        let queries = queries();

        let hits = queries.search_sessions("08-02").await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].session_id, 2);

        assert_eq!(queries.search_sessions("2026").await?.len(), 2);
        assert!(queries.search_sessions("1999").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn model_search_is_scoped_to_the_session() -> Result<()> {
        let queries = queries();

        let hits = queries.search_items_by_model(1, "stels").await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].model_name, " Stels Navigator");

        // Session 2 has no Stels items even though session 1 does
        assert!(queries.search_items_by_model(2, "stels").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn price_search_matches_digits_regardless_of_formatting() -> Result<()> {
        let queries = queries();

        // "1 250 BYN" in session 1 and "1250" in session 2 both reduce to 1250
        let session_one = queries.search_items_by_price(1, 1250).await?;
        assert_eq!(session_one.len(), 1);
        assert_eq!(session_one[0].model_name, " Stels Navigator");

        let session_two = queries.search_items_by_price(2, 1250).await?;
        assert_eq!(session_two.len(), 1);

        assert!(queries.search_items_by_price(1, 42).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn clear_storage_empties_history() -> Result<()> {
        let queries = queries();
        queries.clear_storage().await?;
        assert!(queries.list_sessions().await?.is_empty());
        Ok(())
    }
}
