use std::fmt::Write as _;

use cadence::app::App;
use cadence::catalog::{Album, Artist, Catalog, Track};
use cadence::player::{PlaybackState, PlayerStatus, RepeatMode};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use super::command::{Command, HELP, ParseError};

/// State the console keeps between commands.
#[derive(Default)]
pub struct Session {
    /// Tracks from the last listing; `<n>` arguments index into this.
    listed: Vec<Track>,
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run<C: Catalog>(app: &App<C>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = Session::default();

    println!("{HELP}");
    while let Some(line) = lines.next_line().await? {
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(cmd) => {
                debug!(?cmd, "command");
                let out = session.execute(app, cmd).await;
                if !out.is_empty() {
                    println!("{out}");
                }
            }
            Err(ParseError::Empty) => {}
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}

impl Session {
    fn pick(&self, n: usize) -> Option<Track> {
        self.listed.get(n).cloned()
    }

    fn list(&mut self, title: &str, tracks: Vec<Track>) -> String {
        let out = render_tracks(title, &tracks);
        self.listed = tracks;
        out
    }

    /// Run one command against `app` and return what to print.
    pub async fn execute<C: Catalog>(&mut self, app: &App<C>, cmd: Command) -> String {
        let engine = app.engine();
        let library = app.library();

        match cmd {
            Command::Home => {
                let feed = app.home_feed().await;
                let mut out = self.list("Trending", feed.trending);
                out.push('\n');
                out.push_str(&render_albums("New releases", &feed.new_releases));
                out.push('\n');
                out.push_str(&render_artists("Top artists", &feed.top_artists));
                out
            }
            Command::Trending => {
                let tracks = library.annotate_likes(library.get_trending_tracks(50).await);
                self.list("Trending", tracks)
            }
            Command::Search(query) => {
                let results = app.search(&query).await;
                if results.is_empty() {
                    self.listed.clear();
                    return format!("no results for `{query}`");
                }
                let mut out = self.list("Tracks", results.tracks);
                out.push('\n');
                out.push_str(&render_albums("Albums", &results.albums));
                out.push('\n');
                out.push_str(&render_artists("Artists", &results.artists));
                out
            }
            Command::Album(id) => {
                let tracks = library.annotate_likes(library.get_album_details(&id).await);
                self.list("Album", tracks)
            }
            Command::Artist(id) => {
                let (tracks, albums) =
                    tokio::join!(library.get_artist_tracks(&id), library.get_artist_albums(&id));
                let mut out = self.list("Popular", library.annotate_likes(tracks));
                out.push('\n');
                out.push_str(&render_albums("Albums", &albums));
                out
            }
            Command::Chill => {
                let tracks = library.annotate_likes(library.get_chill_mixes().await);
                self.list("Chill", tracks)
            }
            Command::Focus => {
                let tracks = library.annotate_likes(library.get_focus_mixes().await);
                self.list("Focus", tracks)
            }
            Command::Radio => match engine.snapshot().current_track {
                Some(seed) => {
                    let tracks = library.annotate_likes(library.get_recommendations(&seed).await);
                    self.list(&format!("Radio from {}", seed.display()), tracks)
                }
                None => "nothing is playing".to_string(),
            },
            Command::Play(n) => {
                if self.listed.is_empty() {
                    return "nothing listed to play".to_string();
                }
                match app.play_from(self.listed.clone(), n) {
                    Ok(()) => render_status(&engine.snapshot()),
                    Err(e) => e.to_string(),
                }
            }
            Command::Enqueue(n) => match self.pick(n) {
                Some(t) => {
                    let line = format!("queued {}", t.display());
                    engine.add_to_queue(t);
                    line
                }
                None => no_such_track(n),
            },
            Command::Next => {
                app.advance();
                render_status(&engine.snapshot())
            }
            Command::Prev => {
                app.previous();
                render_status(&engine.snapshot())
            }
            Command::Pause => {
                engine.toggle_play_pause();
                render_status(&engine.snapshot())
            }
            Command::Finish => {
                app.finish_track();
                render_status(&engine.snapshot())
            }
            Command::Seek(ms) => {
                engine.seek_to(ms);
                render_status(&engine.snapshot())
            }
            Command::Shuffle => {
                engine.toggle_shuffle();
                render_status(&engine.snapshot())
            }
            Command::Repeat => {
                engine.cycle_repeat_mode();
                render_status(&engine.snapshot())
            }
            Command::Queue => {
                let state = engine.snapshot();
                let current = state.current_index();
                let mut out = String::from("Queue:");
                for (i, t) in state.queue.iter().enumerate() {
                    let marker = if Some(i) == current { '>' } else { ' ' };
                    let _ = write!(out, "\n{marker}{:>3}. {} ({})", i + 1, t.display(), t.duration_formatted());
                }
                if state.queue.is_empty() {
                    out.push_str(" (empty)");
                }
                self.listed = state.queue;
                out
            }
            Command::Unqueue(n) => match engine.remove_from_queue(n) {
                Ok(t) => format!("removed {}", t.display()),
                Err(e) => e.to_string(),
            },
            Command::Clear => {
                engine.clear_queue();
                render_status(&engine.snapshot())
            }
            Command::Like(n) => match self.pick(n) {
                Some(t) => {
                    library.toggle_like(&t);
                    let verb = if library.is_liked(&t.id) { "liked" } else { "unliked" };
                    format!("{verb} {}", t.display())
                }
                None => no_such_track(n),
            },
            Command::Liked => {
                let tracks = library.liked_tracks();
                self.list("Liked", tracks)
            }
            Command::History => {
                let tracks = library.annotate_likes(library.recently_played());
                self.list("Recently played", tracks)
            }
            Command::PlaylistNew(name) => {
                let playlist = library.create_playlist(&name, "");
                format!("created playlist {} `{}`", playlist.id, playlist.name)
            }
            Command::PlaylistAdd { playlist_id, track } => {
                let Some(t) = self.pick(track) else {
                    return no_such_track(track);
                };
                let Some(playlist) = library.playlist(&playlist_id) else {
                    return format!("no playlist with id {playlist_id}");
                };
                if playlist.contains(&t.id) {
                    return format!("{} is already in {}", t.display(), playlist.name);
                }
                library.add_track_to_playlist(&playlist_id, &t);
                format!("added {} to {playlist_id}", t.display())
            }
            Command::PlaylistShow(id) => match library.playlist(&id) {
                Some(p) => {
                    let title = format!("{} ({})", p.name, p.total_duration_formatted());
                    self.list(&title, library.annotate_likes(p.tracks))
                }
                None => format!("no playlist with id {id}"),
            },
            Command::Playlists => {
                let playlists = library.playlists();
                if playlists.is_empty() {
                    return "no playlists".to_string();
                }
                let mut out = String::from("Playlists:");
                for p in playlists {
                    let _ = write!(
                        out,
                        "\n  {}  {} ({} tracks, {})",
                        p.id,
                        p.name,
                        p.track_count(),
                        p.total_duration_formatted()
                    );
                }
                out
            }
            Command::Quality(q) => {
                engine.set_audio_quality(q);
                render_status(&engine.snapshot())
            }
            Command::Crossfade(s) => {
                engine.set_crossfade_duration(s);
                render_status(&engine.snapshot())
            }
            Command::Ai => {
                engine.toggle_ai_mode();
                render_status(&engine.snapshot())
            }
            Command::Status => render_status(&engine.snapshot()),
            Command::Help => HELP.to_string(),
            Command::Quit => {
                warn!("quit reached the dispatcher");
                String::new()
            }
        }
    }
}

fn no_such_track(n: usize) -> String {
    format!("no track #{} in the last listing", n + 1)
}

pub fn format_ms(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn render_tracks(title: &str, tracks: &[Track]) -> String {
    let mut out = format!("{title}:");
    if tracks.is_empty() {
        out.push_str(" (none)");
    }
    for (i, t) in tracks.iter().enumerate() {
        let like = if t.is_liked { '*' } else { ' ' };
        let _ = write!(out, "\n{like}{:>3}. {} ({})", i + 1, t.display(), t.duration_formatted());
    }
    out
}

fn render_albums(title: &str, albums: &[Album]) -> String {
    let mut out = format!("{title}:");
    if albums.is_empty() {
        out.push_str(" (none)");
    }
    for a in albums {
        let _ = write!(out, "\n  [{}] {} by {}", a.id, a.name, a.artist_name);
    }
    out
}

fn render_artists(title: &str, artists: &[Artist]) -> String {
    let mut out = format!("{title}:");
    if artists.is_empty() {
        out.push_str(" (none)");
    }
    for a in artists {
        let _ = write!(out, "\n  [{}] {}", a.id, a.name);
    }
    out
}

pub fn render_status(state: &PlaybackState) -> String {
    let head = match (state.status(), &state.current_track) {
        (PlayerStatus::Idle, _) | (_, None) => "Idle".to_string(),
        (status, Some(t)) => format!(
            "{:?}: {} [{}/{}]",
            status,
            t.display(),
            format_ms(state.current_position_ms),
            t.duration_formatted()
        ),
    };
    let repeat = match state.repeat_mode {
        RepeatMode::Off => "off",
        RepeatMode::One => "one",
        RepeatMode::All => "all",
    };
    format!(
        "{head} | queue {} | shuffle {} | repeat {repeat} | quality {:?} | crossfade {}s | ai {}",
        state.queue.len(),
        on_off(state.is_shuffle_enabled),
        state.audio_quality,
        state.crossfade_seconds,
        on_off(state.is_ai_mode_enabled),
    )
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
