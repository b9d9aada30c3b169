//! Terminal output.

use std::fmt::Display;

use colored::Colorize;
use strum::IntoEnumIterator;
use sur_core::song::GeneratedSong;

/// Prints a song card: title, request tags, then lyrics.
pub fn print_song(song: &GeneratedSong, lyrics: &str, editing: bool) {
    println!();
    println!("{}", song.title.bright_magenta().bold());
    println!(
        "{}",
        format!(
            "{} | {} | {}",
            song.metadata.genre, song.metadata.mood, song.metadata.length
        )
        .bright_black()
    );
    if editing {
        println!("{}", "(editing: /save to keep, /cancel to discard)".yellow());
    }
    println!();
    print_lyrics(lyrics);
    println!();
}

/// Prints lyrics with section labels highlighted.
pub fn print_lyrics(lyrics: &str) {
    for line in lyrics.lines() {
        let trimmed = line.trim();
        if is_section_label(trimmed) {
            println!("{}", line.bright_cyan().bold());
        } else {
            println!("{}", line);
        }
    }
}

/// `[Chorus]`, `**[Verse 1]:**` and the like.
fn is_section_label(line: &str) -> bool {
    let stripped = line.trim_matches(|c| c == '*' || c == ':');
    stripped.starts_with('[') && stripped.ends_with(']')
}

/// Prints numbered history entries, marking the one on display.
pub fn print_history(history: &[GeneratedSong], current_id: Option<&str>) {
    if history.is_empty() {
        println!("{}", "No songs yet. Use /new to write one.".bright_black());
        return;
    }
    for (index, song) in history.iter().enumerate() {
        let marker = if Some(song.id.as_str()) == current_id {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:>2}. {}  {}",
            marker.bright_green(),
            index + 1,
            song.title.bold(),
            format!("{} · {}", song.metadata.mood, format_created_at(song)).bright_black()
        );
    }
}

/// Prints every variant of an enum with its 1-based index.
pub fn print_choices<T: IntoEnumIterator + Display>(heading: &str) {
    println!("{}", heading.bright_yellow());
    for (index, value) in T::iter().enumerate() {
        println!("  {:>2}. {}", index + 1, value);
    }
}

pub fn print_error(message: &str) {
    eprintln!("{}", message.red());
}

pub fn print_info(message: &str) {
    println!("{}", message.bright_black());
}

/// Creation time as `YYYY-MM-DD HH:MM` UTC.
fn format_created_at(song: &GeneratedSong) -> String {
    song.created_at_utc()
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
