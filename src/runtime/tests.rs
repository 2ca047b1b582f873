use cadence::app::App;
use cadence::catalog::{Album, AlbumQuery, Artist, ArtistQuery, Catalog, Track, TrackQuery};
use cadence::config::Settings;
use cadence::player::{AudioQuality, PlaybackState, PlayerStatus};
use clap::Parser;

use super::command::{Command, ParseError};
use super::event_loop::{Session, format_ms, render_status, render_tracks};
use super::logging::filter_directive;
use crate::Args;

/// Serves the same tracks for every track query.
struct StaticCatalog(Vec<Track>);

impl Catalog for StaticCatalog {
    async fn tracks(&self, _query: &TrackQuery) -> cadence::Result<Vec<Track>> {
        Ok(self.0.clone())
    }

    async fn albums(&self, _query: &AlbumQuery) -> cadence::Result<Vec<Album>> {
        Ok(Vec::new())
    }

    async fn artists(&self, _query: &ArtistQuery) -> cadence::Result<Vec<Artist>> {
        Ok(Vec::new())
    }

    async fn album_tracks(&self, _album_id: &str) -> cadence::Result<Vec<Track>> {
        Ok(self.0.clone())
    }

    async fn artist_tracks(&self, _artist_id: &str, _limit: u32) -> cadence::Result<Vec<Track>> {
        Ok(self.0.clone())
    }

    async fn artist_albums(&self, _artist_id: &str) -> cadence::Result<Vec<Album>> {
        Ok(Vec::new())
    }
}

fn track(id: &str, name: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artist_name: "Band".to_string(),
        duration_seconds: 125,
        ..Default::default()
    }
}

fn app() -> App<StaticCatalog> {
    App::new(
        &Settings::default(),
        StaticCatalog(vec![track("1", "Alpha"), track("2", "Beta")]),
    )
}

#[test]
fn parses_track_numbers_as_one_based() {
    assert_eq!("play 1".parse::<Command>(), Ok(Command::Play(0)));
    assert_eq!("like 3".parse::<Command>(), Ok(Command::Like(2)));
    assert_eq!(
        "play 0".parse::<Command>(),
        Err(ParseError::Usage("play <n>"))
    );
    assert!("play x".parse::<Command>().is_err());
}

#[test]
fn parses_free_text_and_playlist_commands() {
    assert_eq!(
        "search  daft punk ".parse::<Command>(),
        Ok(Command::Search("daft punk".to_string()))
    );
    assert_eq!(
        "playlist new Road trip".parse::<Command>(),
        Ok(Command::PlaylistNew("Road trip".to_string()))
    );
    assert_eq!(
        "playlist add abc 2".parse::<Command>(),
        Ok(Command::PlaylistAdd {
            playlist_id: "abc".to_string(),
            track: 1
        })
    );
    assert!("playlist add abc".parse::<Command>().is_err());
    assert!("search".parse::<Command>().is_err());
}

#[test]
fn parses_settings_commands() {
    assert_eq!(
        "quality LOSSLESS".parse::<Command>(),
        Ok(Command::Quality(AudioQuality::Lossless))
    );
    assert_eq!("crossfade 7".parse::<Command>(), Ok(Command::Crossfade(7)));
    assert_eq!("seek 90000".parse::<Command>(), Ok(Command::Seek(90_000)));
    assert!("quality ultra".parse::<Command>().is_err());
}

#[test]
fn rejects_empty_and_unknown_input() {
    assert_eq!("   ".parse::<Command>(), Err(ParseError::Empty));
    assert_eq!(
        "dance".parse::<Command>(),
        Err(ParseError::Unknown("dance".to_string()))
    );
    assert_eq!("EXIT".parse::<Command>(), Ok(Command::Quit));
}

#[test]
fn cli_filter_beats_env_beats_config() {
    assert_eq!(
        filter_directive(Some("cadence=trace"), Some("warn"), "cadence=info"),
        "cadence=trace"
    );
    assert_eq!(filter_directive(None, Some("warn"), "cadence=info"), "warn");
    assert_eq!(filter_directive(None, Some("  "), "cadence=info"), "cadence=info");
    assert_eq!(filter_directive(None, None, "cadence=info"), "cadence=info");
}

#[test]
fn args_parse_flags() {
    let args = Args::try_parse_from(["cadence", "--log", "debug", "--print-config"]).unwrap();
    assert_eq!(args.log.as_deref(), Some("debug"));
    assert!(args.print_config);
}

#[test]
fn formats_positions_and_status() {
    assert_eq!(format_ms(0), "0:00");
    assert_eq!(format_ms(65_400), "1:05");

    let idle = render_status(&PlaybackState::default());
    assert!(idle.starts_with("Idle"));
    assert!(idle.contains("repeat off"));

    let state = PlaybackState {
        current_track: Some(track("1", "Alpha")),
        is_playing: true,
        current_position_ms: 61_000,
        ..Default::default()
    };
    assert!(render_status(&state).starts_with("Playing: Band - Alpha [1:01/2:05]"));
}

#[test]
fn renders_numbered_tracks_with_like_marker() {
    let mut liked = track("1", "Alpha");
    liked.is_liked = true;
    let out = render_tracks("Liked", &[liked, track("2", "Beta")]);
    assert_eq!(out, "Liked:\n*  1. Band - Alpha (2:05)\n   2. Band - Beta (2:05)");
    assert_eq!(render_tracks("Empty", &[]), "Empty: (none)");
}

#[tokio::test]
async fn listing_then_play_starts_the_picked_track() {
    let app = app();
    let mut session = Session::default();

    session.execute(&app, Command::Trending).await;
    session.execute(&app, Command::Play(1)).await;

    let state = app.engine().snapshot();
    assert_eq!(state.status(), PlayerStatus::Playing);
    assert_eq!(state.current_track.map(|t| t.id).as_deref(), Some("2"));
    assert_eq!(state.queue.len(), 2);
    assert_eq!(app.library().recently_played().len(), 1);
}

#[tokio::test]
async fn play_without_listing_is_refused() {
    let app = app();
    let mut session = Session::default();
    let out = session.execute(&app, Command::Play(0)).await;
    assert_eq!(out, "nothing listed to play");
    assert_eq!(app.engine().snapshot().status(), PlayerStatus::Idle);
}

#[tokio::test]
async fn like_and_playlist_commands_update_the_library() {
    let app = app();
    let mut session = Session::default();
    session.execute(&app, Command::Trending).await;

    let out = session.execute(&app, Command::Like(0)).await;
    assert_eq!(out, "liked Band - Alpha");
    assert!(app.library().is_liked("1"));

    let out = session
        .execute(&app, Command::PlaylistNew("Mix".to_string()))
        .await;
    let id = app.library().playlists()[0].id.clone();
    assert!(out.contains(&id));

    // `Liked` replaces the listing, so track 1 is now the liked one.
    session.execute(&app, Command::Liked).await;
    session
        .execute(
            &app,
            Command::PlaylistAdd {
                playlist_id: id.clone(),
                track: 0,
            },
        )
        .await;
    assert_eq!(app.library().playlist(&id).unwrap().track_count(), 1);

    let out = session
        .execute(
            &app,
            Command::PlaylistAdd {
                playlist_id: id.clone(),
                track: 0,
            },
        )
        .await;
    assert_eq!(out, "Band - Alpha is already in Mix");
    assert_eq!(app.library().playlist(&id).unwrap().track_count(), 1);

    let out = session
        .execute(
            &app,
            Command::PlaylistAdd {
                playlist_id: "missing".to_string(),
                track: 0,
            },
        )
        .await;
    assert_eq!(out, "no playlist with id missing");
}

#[tokio::test]
async fn unqueue_out_of_range_reports_the_error() {
    let app = app();
    let mut session = Session::default();
    let out = session.execute(&app, Command::Unqueue(4)).await;
    assert!(out.contains("out of range"));
}
