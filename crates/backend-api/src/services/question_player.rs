use crate::requests::QuestionQuery;
use common::HttpTransport;
use common::data::{QuestionBatch, QuestionDict};
use common::error::Result;
use dashmap::DashMap;
use faststr::FastStr;
use std::sync::Arc;
use storage::{KVCache, MemoryCache, RemoteResourceAccessor};
use tracing::debug;

/// Pages through the questions of a set of skills for the quiz player.
#[derive(Clone)]
pub struct QuestionPlayerBackendApi<T, C = MemoryCache<QuestionBatch>> {
    transport: T,
    accessor:  RemoteResourceAccessor<QuestionBatch, C>,
    // next_start_cursor of the last page served, per skill id list
    cursors:   Arc<DashMap<FastStr, FastStr>>,
}

impl<T: HttpTransport> QuestionPlayerBackendApi<T> {
    pub fn new(transport: T) -> Self {
        Self::with_cache(transport, MemoryCache::new())
    }
}

impl<T, C> QuestionPlayerBackendApi<T, C>
where
    T: HttpTransport,
    C: KVCache<QuestionBatch>,
{
    pub fn with_cache(transport: T, cache: C) -> Self {
        Self {
            transport,
            accessor: RemoteResourceAccessor::new(cache),
            cursors: Arc::new(DashMap::new()),
        }
    }

    /// Fetches the next page of questions, always from the backend.
    ///
    /// Without an explicit `start_cursor` the page continues where the last
    /// one for the same skills ended, starting from the beginning the first
    /// time.
    pub async fn fetch_questions(
        &self,
        skill_ids: &str,
        question_count: &str,
        start_cursor: Option<&str>,
    ) -> Result<Vec<QuestionDict>> {
        let mut query = QuestionQuery::new(skill_ids, question_count)?;
        let start_cursor = match start_cursor {
            Some(cursor) => Some(FastStr::new(cursor)),
            None => self
                .cursors
                .get(query.skill_ids.as_str())
                .map(|cursor| cursor.value().clone()),
        };
        if let Some(cursor) = start_cursor {
            query = query.with_start_cursor(cursor);
        }

        let batch = self
            .accessor
            .fetch_resource(&query.cache_key(), || self.request_batch(&query))
            .await?;
        self.remember_cursor(&query.skill_ids, batch.next_start_cursor.as_ref());
        Ok(batch.question_dicts)
    }

    /// Like `fetch_questions`, but a page already seen for exactly these
    /// parameters is served from the cache. Remembered cursors are neither
    /// used nor updated.
    pub async fn load_questions(
        &self,
        skill_ids: &str,
        question_count: &str,
        start_cursor: Option<&str>,
    ) -> Result<Vec<QuestionDict>> {
        let query = QuestionQuery::new(skill_ids, question_count)?
            .with_start_cursor(FastStr::new(start_cursor.unwrap_or_default()));
        let batch = self
            .accessor
            .load_resource(&query.cache_key(), || self.request_batch(&query))
            .await?;
        Ok(batch.question_dicts)
    }

    pub fn is_cached(&self, query: &QuestionQuery) -> bool {
        self.accessor.is_cached(&query.cache_key())
    }

    pub fn reset_cursor(&self, skill_ids: &str) {
        self.cursors.remove(skill_ids);
    }

    async fn request_batch(&self, query: &QuestionQuery) -> Result<QuestionBatch> {
        let res = self.transport.send(query.to_request()).await?;
        res.into_result()
    }

    fn remember_cursor(&self, skill_ids: &FastStr, next: Option<&FastStr>) {
        match next.filter(|cursor| !cursor.is_empty()) {
            Some(cursor) => {
                debug!(skill_ids = %skill_ids, cursor = %cursor, "remembering question cursor");
                self.cursors.insert(skill_ids.clone(), cursor.clone());
            }
            None => {
                self.cursors.remove(skill_ids);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use common::error::Error;
    use serde_json::{Value, json};

    fn sample_data_results(next_start_cursor: Option<&str>) -> Value {
        json!({
            "question_dicts": [{
                "id": "0",
                "question_state_data": {
                    "content": { "html": "Question 1" },
                    "content_ids_to_audio_translations": {},
                    "interaction": {
                        "answer_groups": [],
                        "confirmed_unclassified_answers": [],
                        "customization_args": {},
                        "default_outcome": {
                            "dest": null,
                            "feedback": { "html": "Correct Answer" },
                            "param_changes": [],
                            "labelled_as_correct": true
                        },
                        "hints": [{ "hint_content": { "html": "Hint 1" } }],
                        "solution": {
                            "correct_answer": "This is the correct answer",
                            "answer_is_exclusive": false,
                            "explanation": { "html": "Solution explanation" }
                        },
                        "id": "TextInput"
                    },
                    "param_changes": []
                },
                "language_code": "en",
                "version": 1
            }],
            "next_start_cursor": next_start_cursor
        })
    }

    fn question_dicts(value: &Value) -> Vec<QuestionDict> {
        serde_json::from_value(value["question_dicts"].clone()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_questions() {
        let transport = MockTransport::default();
        let sample = sample_data_results(None);
        transport.respond_json(200, &sample);
        let api = QuestionPlayerBackendApi::new(transport.clone());

        let questions = api.fetch_questions("1", "1", None).await.unwrap();
        assert_eq!(questions, question_dicts(&sample));
        assert_eq!(
            transport.last_request().path_and_query(),
            "/question_player_handler?skill_ids=1&question_count=1&start_cursor="
        );
    }

    #[tokio::test]
    async fn test_fetch_questions_continues_from_cursor() {
        let transport = MockTransport::default();
        let with_cursor = sample_data_results(Some("1"));
        let without_cursor = sample_data_results(None);
        transport
            .respond_json(200, &with_cursor)
            .respond_json(200, &without_cursor)
            .respond_json(200, &without_cursor);
        let api = QuestionPlayerBackendApi::new(transport.clone());

        let questions = api.fetch_questions("1", "1", None).await.unwrap();
        assert_eq!(questions, question_dicts(&with_cursor));

        api.fetch_questions("1", "1", None).await.unwrap();
        api.fetch_questions("1", "1", None).await.unwrap();

        let sent: Vec<_> = transport
            .requests()
            .iter()
            .map(|r| r.path_and_query())
            .collect();
        assert_eq!(
            sent,
            [
                "/question_player_handler?skill_ids=1&question_count=1&start_cursor=",
                "/question_player_handler?skill_ids=1&question_count=1&start_cursor=1",
                "/question_player_handler?skill_ids=1&question_count=1&start_cursor=",
            ]
        );
    }

    #[tokio::test]
    async fn test_explicit_cursor_and_reset() {
        let transport = MockTransport::default();
        let sample = sample_data_results(Some("next"));
        transport
            .respond_json(200, &sample)
            .respond_json(200, &sample)
            .respond_json(200, &sample);
        let api = QuestionPlayerBackendApi::new(transport.clone());

        api.fetch_questions("1", "1", Some("1")).await.unwrap();
        assert_eq!(
            transport.last_request().path_and_query(),
            "/question_player_handler?skill_ids=1&question_count=1&start_cursor=1"
        );

        // other skills keep their own position
        api.fetch_questions("2", "1", None).await.unwrap();
        assert!(transport.last_request().path_and_query().ends_with("start_cursor="));

        api.reset_cursor("1");
        api.fetch_questions("1", "1", None).await.unwrap();
        assert!(transport.last_request().path_and_query().ends_with("start_cursor="));
    }

    #[tokio::test]
    async fn test_backend_failure() {
        let transport = MockTransport::default();
        transport.respond_text(500, "Error loading questions.");
        let api = QuestionPlayerBackendApi::new(transport.clone());

        let err = api.fetch_questions("1", "1", None).await.unwrap_err();
        assert_eq!(err, Error::Backend("Error loading questions.".into(), 500));
        assert_eq!(err.to_string(), "Error loading questions.");
    }

    #[tokio::test]
    async fn test_invalid_parameters_never_reach_backend() {
        let transport = MockTransport::default();
        let api = QuestionPlayerBackendApi::new(transport.clone());

        let cases = [
            ("1", "abc", "Question count has to be a number"),
            ("1", "-1", "Question count has to be positive"),
            ("", "1", "Skill ids value is expected but is missing"),
            ("1,2,abc", "1", "Skill ids should be comma separated numbers"),
        ];
        for (skill_ids, count, message) in cases {
            let err = api.fetch_questions(skill_ids, count, None).await.unwrap_err();
            assert_eq!(err, Error::validation(message));
            let err = api.load_questions(skill_ids, count, None).await.unwrap_err();
            assert_eq!(err.to_string(), message);
        }
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_load_questions_is_cached_per_page() {
        let transport = MockTransport::default();
        let sample = sample_data_results(Some("2"));
        transport
            .respond_json(200, &sample)
            .respond_json(200, &sample);
        let api = QuestionPlayerBackendApi::new(transport.clone());
        let query = QuestionQuery::new("1,2", "3").unwrap();

        assert!(!api.is_cached(&query));
        let first = api.load_questions("1,2", "3", None).await.unwrap();
        assert!(api.is_cached(&query));
        let again = api.load_questions("1,2", "3", None).await.unwrap();
        assert_eq!(first, again);
        assert_eq!(transport.request_count(), 1);

        api.load_questions("1,2", "3", Some("2")).await.unwrap();
        assert_eq!(transport.request_count(), 2);
        assert_eq!(
            transport.last_request().path_and_query(),
            "/question_player_handler?skill_ids=1,2&question_count=3&start_cursor=2"
        );
    }
}
