mod logging;
mod render;
mod repl;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sur_application::SessionUseCase;
use sur_core::config::SecretService;
use sur_core::generation::{GenerationClient, TextGenerator};
use sur_core::session::SessionStore;
use sur_core::song::{Genre, Mood, SongLength, SongRequest};
use sur_infrastructure::{ConfigService, JsonFileStore, SecretServiceImpl, SurPaths};
use sur_interaction::GeminiApiAgent;

#[derive(Parser)]
#[command(name = "sur", about = "Odia song lyrics writer", version)]
struct Cli {
    /// Directory holding config/ and data/ (defaults to the platform dirs)
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one song, print it and exit
    Generate {
        #[arg(long)]
        topic: String,

        #[arg(long, default_value = "Romantic")]
        mood: Mood,

        #[arg(long, default_value = "Ollywood")]
        genre: Genre,

        /// Short, Medium, Long or Extended; unknown values fall back to Short
        #[arg(long, default_value = "Medium")]
        length: String,

        /// Also write the lyrics to a text file in this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = SurPaths::new(cli.base_dir.as_deref())?;
    let _guard = logging::init(&paths.logs_dir())?;
    tracing::info!("Starting sur {}", env!("CARGO_PKG_VERSION"));

    let usecase = build_usecase(&paths).await?;

    match cli.command {
        Some(Commands::Generate {
            topic,
            mood,
            genre,
            length,
            export,
        }) => {
            let request =
                SongRequest::new(topic, mood, genre, SongLength::parse_lenient(&length))?;
            let song = usecase.generate(request).await?;
            render::print_song(&song, &song.lyrics, false);

            if let Some(directory) = export {
                let path = usecase.export(Some(&directory)).await?;
                render::print_info(&format!("Wrote {}", path.display()));
            }
            Ok(())
        }
        None => repl::run(usecase).await,
    }
}

async fn build_usecase(paths: &SurPaths) -> Result<SessionUseCase> {
    let config = ConfigService::new(paths).get_config();

    let secret_service = SecretServiceImpl::new(paths);
    secret_service.ensure_secret_file()?;
    let secrets = secret_service.load_secrets().await?;

    let agent = GeminiApiAgent::from_config(&secrets, &config.generation)?;
    if !agent.has_api_key() {
        render::print_error(&format!(
            "No Gemini API key. Set GEMINI_API_KEY or gemini.api_key in {}",
            secret_service.path().display()
        ));
    }
    tracing::info!("Using model {}", agent.model_name());

    let client = GenerationClient::new(Arc::new(agent)).with_sampling(config.generation.sampling());
    let store = SessionStore::new(Arc::new(JsonFileStore::new(paths.data_dir())));
    let export_dir = config
        .export
        .directory
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(SessionUseCase::new(store, client, export_dir))
}
