//! End-to-end flows through the core components with in-memory collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sur_core::editor::LyricsEditor;
use sur_core::generation::{EndpointError, GenerationClient, SamplingConfig, TextGenerator};
use sur_core::session::{HISTORY_KEY, KeyValueStore, MemoryStore, SessionStatus, SessionStore};
use sur_core::song::{Genre, Mood, SongLength, SongRequest};

struct ScriptedGenerator {
    responses: Mutex<Vec<Result<String, EndpointError>>>,
}

impl ScriptedGenerator {
    fn new(responses: Vec<Result<String, EndpointError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _config: &SamplingConfig,
    ) -> Result<String, EndpointError> {
        self.responses.lock().unwrap().remove(0)
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

async fn run(store: &mut SessionStore, client: &GenerationClient, request: &SongRequest) {
    store.submit(request).unwrap();
    let result = client.generate(request).await;
    store.on_generation_result(result);
}

#[tokio::test]
async fn test_rain_scenario() {
    let storage = Arc::new(MemoryStore::new());
    let mut store = SessionStore::new(storage.clone());
    let client = GenerationClient::new(Arc::new(ScriptedGenerator::new(vec![Ok(
        "Barasha\n[Chorus]\n...".to_string(),
    )])));
    let request = SongRequest::new("rain", Mood::Sad, Genre::Ollywood, SongLength::Short).unwrap();

    run(&mut store, &client, &request).await;

    let current = store.current_song().unwrap();
    assert_eq!(current.title, "Barasha");
    assert_eq!(current.metadata, request);
    assert_eq!(store.history().len(), 1);
    assert_eq!(store.history()[0].id, current.id);
    assert_eq!(store.status(), SessionStatus::Ready);

    let raw = storage.load(HISTORY_KEY).unwrap().unwrap();
    assert!(raw.contains("\"createdAt\""));
    assert!(raw.contains("\"mood\":\"Sad / Heartbroken\""));
}

#[tokio::test]
async fn test_failure_then_retry() {
    let mut store = SessionStore::new(Arc::new(MemoryStore::new()));
    let client = GenerationClient::new(Arc::new(ScriptedGenerator::new(vec![
        Err(EndpointError::service(Some(403), "PERMISSION_DENIED")),
        Ok("Jhia\nlines".to_string()),
    ])));
    let request =
        SongRequest::new("girl", Mood::Romantic, Genre::Sambalpuri, SongLength::Long).unwrap();

    run(&mut store, &client, &request).await;
    assert_eq!(store.status(), SessionStatus::Error);
    assert!(store.error().unwrap().starts_with("API Permission Denied"));
    assert!(store.history().is_empty());

    run(&mut store, &client, &request).await;
    assert_eq!(store.status(), SessionStatus::Ready);
    assert_eq!(store.current_song().unwrap().title, "Jhia");
}

#[tokio::test]
async fn test_edit_persists_across_reload() {
    let storage = Arc::new(MemoryStore::new());
    let mut store = SessionStore::new(storage.clone());
    let client = GenerationClient::new(Arc::new(ScriptedGenerator::new(vec![Ok(
        "Nadi\nmo nadi kula".to_string(),
    )])));
    let request =
        SongRequest::new("river", Mood::Happy, Genre::Classic, SongLength::Medium).unwrap();
    run(&mut store, &client, &request).await;

    let mut editor = LyricsEditor::new();
    editor.sync(store.current_song());
    assert!(editor.begin(store.current_song()));
    assert_eq!(editor.find_replace_all("nadi", "sagara"), 1);
    assert!(editor.save(&mut store));

    let reloaded = SessionStore::new(storage);
    assert_eq!(reloaded.history().len(), 1);
    assert_eq!(reloaded.history()[0].lyrics, "Nadi\nmo sagara kula");
    assert!(reloaded.current_song().is_none());
}
