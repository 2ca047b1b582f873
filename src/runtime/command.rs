use std::str::FromStr;

use cadence::player::AudioQuality;
use thiserror::Error;

/// One line of console input.
///
/// Track numbers are 1-based and refer to the most recently listed tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home,
    Trending,
    Search(String),
    Album(String),
    Artist(String),
    Chill,
    Focus,
    Radio,
    Play(usize),
    Enqueue(usize),
    Next,
    Prev,
    Pause,
    Finish,
    Seek(u64),
    Shuffle,
    Repeat,
    Queue,
    Unqueue(usize),
    Clear,
    Like(usize),
    Liked,
    History,
    PlaylistNew(String),
    PlaylistAdd { playlist_id: String, track: usize },
    PlaylistShow(String),
    Playlists,
    Quality(AudioQuality),
    Crossfade(u8),
    Ai,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
home | trending | search <q> | album <id> | artist <id> | chill | focus | radio
play <n> | enqueue <n> | next | prev | pause | finish | seek <ms>
shuffle | repeat | queue | unqueue <n> | clear
like <n> | liked | history
playlist new <name> | playlist add <id> <n> | playlist show <id> | playlists
quality <low|medium|high|lossless> | crossfade <s> | ai | status | quit";

fn track_number(arg: Option<&str>, usage: &'static str) -> Result<usize, ParseError> {
    match arg.and_then(|s| s.parse::<usize>().ok()) {
        Some(n) if n >= 1 => Ok(n - 1),
        _ => Err(ParseError::Usage(usage)),
    }
}

fn rest(arg: &str, usage: &'static str) -> Result<String, ParseError> {
    let arg = arg.trim();
    if arg.is_empty() {
        Err(ParseError::Usage(usage))
    } else {
        Ok(arg.to_string())
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, tail) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let mut args = tail.split_whitespace();

        let cmd = match word.to_ascii_lowercase().as_str() {
            "" => return Err(ParseError::Empty),
            "home" => Command::Home,
            "trending" => Command::Trending,
            "search" | "s" => Command::Search(rest(tail, "search <query>")?),
            "album" => Command::Album(rest(tail, "album <id>")?),
            "artist" => Command::Artist(rest(tail, "artist <id>")?),
            "chill" => Command::Chill,
            "focus" => Command::Focus,
            "radio" => Command::Radio,
            "play" | "p" => Command::Play(track_number(args.next(), "play <n>")?),
            "enqueue" => Command::Enqueue(track_number(args.next(), "enqueue <n>")?),
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Prev,
            "pause" | "resume" => Command::Pause,
            "finish" => Command::Finish,
            "seek" => Command::Seek(
                args.next()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ParseError::Usage("seek <ms>"))?,
            ),
            "shuffle" => Command::Shuffle,
            "repeat" => Command::Repeat,
            "queue" | "q" => Command::Queue,
            "unqueue" => Command::Unqueue(track_number(args.next(), "unqueue <n>")?),
            "clear" => Command::Clear,
            "like" => Command::Like(track_number(args.next(), "like <n>")?),
            "liked" => Command::Liked,
            "history" => Command::History,
            "playlist" => {
                const USAGE: &str = "playlist new <name> | playlist add <id> <n> | playlist show <id>";
                let (sub, sub_tail) = tail
                    .trim()
                    .split_once(char::is_whitespace)
                    .unwrap_or((tail.trim(), ""));
                match sub {
                    "new" => Command::PlaylistNew(rest(sub_tail, USAGE)?),
                    "add" => {
                        let mut parts = sub_tail.split_whitespace();
                        let playlist_id = parts.next().ok_or(ParseError::Usage(USAGE))?.to_string();
                        let track = track_number(parts.next(), USAGE)?;
                        Command::PlaylistAdd { playlist_id, track }
                    }
                    "show" => Command::PlaylistShow(rest(sub_tail, USAGE)?),
                    _ => return Err(ParseError::Usage(USAGE)),
                }
            }
            "playlists" => Command::Playlists,
            "quality" => Command::Quality(
                args.next()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ParseError::Usage("quality <low|medium|high|lossless>"))?,
            ),
            "crossfade" => Command::Crossfade(
                args.next()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ParseError::Usage("crossfade <seconds>"))?,
            ),
            "ai" => Command::Ai,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(cmd)
    }
}
