//! Interactive REPL.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use strum::IntoEnumIterator;
use sur_application::SessionUseCase;
use sur_core::song::{Genre, Mood, SongLength, SongRequest};

use crate::render;

const COMMANDS: &[&str] = &[
    "/new", "/history", "/open", "/delete", "/clear", "/show", "/edit", "/replace", "/append",
    "/save", "/cancel", "/export", "/dismiss", "/moods", "/genres", "/lengths", "/help", "/quit",
];

const HELP: &str = "\
/new                       write a new song
/history                   list saved songs
/open N                    show song N from /history
/delete N                  delete song N from /history
/clear                     delete all saved songs
/show                      show the current song
/edit                      start editing the current song
/replace FIND => REPLACE   replace every FIND in the lyrics
/append TEXT               add a line to the lyrics
/save                      keep your edits
/cancel                    discard your edits
/export [DIR]              write the lyrics to a text file
/dismiss                   hide the last error
/moods /genres /lengths    list the choices
/quit                      exit";

/// A parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    History,
    Open(usize),
    Delete(usize),
    Clear,
    Show,
    Edit,
    Replace { find: String, replace: String },
    Append(String),
    Save,
    Cancel,
    Export(Option<PathBuf>),
    Dismiss,
    Moods,
    Genres,
    Lengths,
    Help,
    Quit,
    /// Known command with bad arguments; carries the usage line.
    Usage(&'static str),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match name {
            "/new" => Self::New,
            "/history" => Self::History,
            "/open" => parse_index(arg).map_or(Self::Usage("/open N"), Self::Open),
            "/delete" => parse_index(arg).map_or(Self::Usage("/delete N"), Self::Delete),
            "/clear" => Self::Clear,
            "/show" => Self::Show,
            "/edit" => Self::Edit,
            "/replace" => match arg.split_once("=>") {
                Some((find, replace)) => Self::Replace {
                    find: find.trim().to_string(),
                    replace: replace.trim().to_string(),
                },
                None => Self::Usage("/replace FIND => REPLACE"),
            },
            "/append" if !arg.is_empty() => Self::Append(arg.to_string()),
            "/append" => Self::Usage("/append TEXT"),
            "/save" => Self::Save,
            "/cancel" => Self::Cancel,
            "/export" if arg.is_empty() => Self::Export(None),
            "/export" => Self::Export(Some(PathBuf::from(arg))),
            "/dismiss" => Self::Dismiss,
            "/moods" => Self::Moods,
            "/genres" => Self::Genres,
            "/lengths" => Self::Lengths,
            "/help" => Self::Help,
            "/quit" | "/exit" | "quit" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// 1-based index.
fn parse_index(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok().filter(|n| *n >= 1)
}

/// Resolves a menu answer: empty picks `default`, a number picks by 1-based
/// position, anything else is parsed as a name or label.
pub fn choose<T>(answer: &str, default: T) -> Option<T>
where
    T: IntoEnumIterator + FromStr,
{
    let answer = answer.trim();
    if answer.is_empty() {
        return Some(default);
    }
    if let Ok(position) = answer.parse::<usize>() {
        return position.checked_sub(1).and_then(|index| T::iter().nth(index));
    }
    answer.parse().ok()
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

type LineEditor = Editor<CliHelper, DefaultHistory>;

/// Runs the REPL until `/quit` or end of input.
pub async fn run(usecase: SessionUseCase) -> Result<()> {
    let mut rl: LineEditor = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Sur: Odia Lyrics Writer ===".bright_magenta().bold());
    println!("{}", "Type /new to write a song, /help for commands.".bright_black());
    println!();

    let history = usecase.snapshot().await.history;
    if !history.is_empty() {
        render::print_info(&format!("{} saved song(s). Use /history to browse.", history.len()));
    }

    loop {
        let readline = rl.readline("sur> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = Command::parse(trimmed);
                if command == Command::Quit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                handle(&usecase, &mut rl, command).await;
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                render::print_error(&format!("Error: {:?}", err));
                break;
            }
        }
    }

    Ok(())
}

async fn handle(usecase: &SessionUseCase, rl: &mut LineEditor, command: Command) {
    match command {
        Command::New => new_song(usecase, rl).await,
        Command::History => {
            let state = usecase.snapshot().await;
            let current_id = state.current_song.as_ref().map(|s| s.id.as_str());
            render::print_history(&state.history, current_id);
        }
        Command::Open(index) => match history_id(usecase, index).await {
            Some(id) => {
                usecase.select(&id).await;
                show(usecase).await;
            }
            None => render::print_error(&format!("No song #{index} in history")),
        },
        Command::Delete(index) => match history_id(usecase, index).await {
            Some(id) => {
                usecase.delete(&id).await;
                render::print_info(&format!("Deleted song #{index}"));
            }
            None => render::print_error(&format!("No song #{index} in history")),
        },
        Command::Clear => {
            let answer = rl.readline("Delete all saved songs? [y/N] ").unwrap_or_default();
            if answer.trim().eq_ignore_ascii_case("y") {
                usecase.clear_history().await;
                render::print_info("History cleared");
            }
        }
        Command::Show => show(usecase).await,
        Command::Edit => match usecase.begin_edit().await {
            Ok(()) => render::print_info(
                "Editing. Use /replace, /append, then /save or /cancel.",
            ),
            Err(e) => render::print_error(&e.to_string()),
        },
        Command::Replace { find, replace } => match usecase.replace_all(&find, &replace).await {
            Ok(count) => render::print_info(&format!("Replaced {count} occurrence(s)")),
            Err(e) => render::print_error(&e.to_string()),
        },
        Command::Append(text) => {
            let buffer = usecase.editor().await.buffer().to_string();
            let appended = if buffer.is_empty() {
                text
            } else {
                format!("{buffer}\n{text}")
            };
            if let Err(e) = usecase.set_buffer(appended).await {
                render::print_error(&e.to_string());
            }
        }
        Command::Save => match usecase.save_edit().await {
            Ok(song) => render::print_info(&format!("Saved \"{}\"", song.title)),
            Err(e) => render::print_error(&e.to_string()),
        },
        Command::Cancel => {
            usecase.cancel_edit().await;
            render::print_info("Edits discarded");
        }
        Command::Export(directory) => match usecase.export(directory.as_deref()).await {
            Ok(path) => render::print_info(&format!("Wrote {}", path.display())),
            Err(e) => render::print_error(&e.to_string()),
        },
        Command::Dismiss => usecase.dismiss_error().await,
        Command::Moods => render::print_choices::<Mood>("Moods:"),
        Command::Genres => render::print_choices::<Genre>("Genres:"),
        Command::Lengths => render::print_choices::<SongLength>("Lengths:"),
        Command::Help => println!("{}", HELP),
        Command::Usage(usage) => render::print_error(&format!("Usage: {usage}")),
        Command::Unknown(name) => {
            render::print_error(&format!("Unknown command {name}. Type /help."))
        }
        Command::Quit => {}
    }
}

async fn new_song(usecase: &SessionUseCase, rl: &mut LineEditor) {
    let Some(request) = ask_request(rl) else {
        render::print_info("Cancelled");
        return;
    };

    render::print_info("Writing lyrics...");
    match usecase.generate(request).await {
        Ok(_) => show(usecase).await,
        Err(e) => render::print_error(&e.to_string()),
    }
}

/// Prompts for the request fields. `None` if the user gives up.
fn ask_request(rl: &mut LineEditor) -> Option<SongRequest> {
    let topic = rl.readline("Topic: ").ok()?;
    if topic.trim().is_empty() {
        return None;
    }
    let mood = ask_choice(rl, "Mood", Mood::default())?;
    let genre = ask_choice(rl, "Genre", Genre::default())?;
    let length = ask_choice(rl, "Length", SongLength::Medium)?;

    SongRequest::new(topic.trim(), mood, genre, length).ok()
}

fn ask_choice<T>(rl: &mut LineEditor, label: &str, default: T) -> Option<T>
where
    T: IntoEnumIterator + FromStr + Display + Copy,
{
    loop {
        let answer = rl.readline(&format!("{label} [{default}]: ")).ok()?;
        match choose(&answer, default) {
            Some(value) => return Some(value),
            None => render::print_error(&format!(
                "Unknown {}. Enter a number or a name from /{}s.",
                label.to_lowercase(),
                label.to_lowercase()
            )),
        }
    }
}

async fn history_id(usecase: &SessionUseCase, index: usize) -> Option<String> {
    usecase
        .snapshot()
        .await
        .history
        .get(index - 1)
        .map(|song| song.id.clone())
}

async fn show(usecase: &SessionUseCase) {
    let state = usecase.snapshot().await;
    if state.is_loading {
        render::print_info("Writing lyrics...");
    }
    if let Some(error) = &state.error {
        render::print_error(error);
    }
    match &state.current_song {
        Some(song) => {
            let editor = usecase.editor().await;
            render::print_song(song, editor.buffer(), editor.is_editing());
        }
        None => render::print_info("No song on display. Use /new or /open N."),
    }
}
