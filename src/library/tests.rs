use super::store::recommendation_tags;
use super::*;
use crate::catalog::fake::{Call, FakeCatalog, track};
use crate::catalog::{AlbumQuery, Order, TrackQuery};

fn store() -> LibraryStore<FakeCatalog> {
    LibraryStore::new(FakeCatalog::default())
}

#[test]
fn toggle_like_twice_restores_state() {
    let store = store();
    let t = track("1", "Alpha");
    assert!(!store.is_liked("1"));

    store.toggle_like(&t);
    assert!(store.is_liked("1"));
    assert!(store.liked_tracks()[0].is_liked);

    store.toggle_like(&t);
    assert!(!store.is_liked("1"));
    assert!(store.liked_tracks().is_empty());
}

#[test]
fn liked_tracks_are_newest_first() {
    let store = store();
    store.toggle_like(&track("1", "Alpha"));
    store.toggle_like(&track("2", "Beta"));
    let ids: Vec<String> = store.liked_tracks().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["2", "1"]);
}

#[test]
fn annotate_likes_follows_liked_list_not_stale_flags() {
    let store = store();
    let mut stale = track("1", "Alpha");
    stale.is_liked = true;
    store.toggle_like(&track("2", "Beta"));

    let annotated = store.annotate_likes(vec![stale, track("2", "Beta")]);
    assert!(!annotated[0].is_liked);
    assert!(annotated[1].is_liked);
}

#[test]
fn recently_played_dedupes_and_moves_to_front() {
    let store = store();
    store.add_to_recently_played(&track("1", "Alpha"));
    store.add_to_recently_played(&track("2", "Beta"));
    store.add_to_recently_played(&track("1", "Alpha"));

    let ids: Vec<String> = store.recently_played().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn recently_played_is_bounded() {
    let store = store();
    for i in 0..(RECENTLY_PLAYED_LIMIT + 10) {
        store.add_to_recently_played(&track(&i.to_string(), "T"));
        // Replaying the previous one must not create a duplicate.
        if i > 0 {
            store.add_to_recently_played(&track(&(i - 1).to_string(), "T"));
        }
    }
    let history = store.recently_played();
    assert_eq!(history.len(), RECENTLY_PLAYED_LIMIT);

    let mut ids: Vec<&str> = history.iter().map(|t| t.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), RECENTLY_PLAYED_LIMIT);
}

#[test]
fn custom_history_limit_is_respected() {
    let store = LibraryStore::with_history_limit(FakeCatalog::default(), 2);
    store.add_to_recently_played(&track("1", "A"));
    store.add_to_recently_played(&track("2", "B"));
    store.add_to_recently_played(&track("3", "C"));
    let ids: Vec<String> = store.recently_played().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["3", "2"]);
}

#[test]
fn history_limit_above_cap_is_clamped() {
    let store = LibraryStore::with_history_limit(FakeCatalog::default(), 80);
    for i in 0..80 {
        store.add_to_recently_played(&track(&i.to_string(), "T"));
    }
    assert_eq!(store.recently_played().len(), RECENTLY_PLAYED_LIMIT);
    assert_eq!(store.recently_played()[0].id, "79");
}

#[test]
fn playlist_rejects_duplicate_tracks() {
    let store = store();
    let p = store.create_playlist("Road Trip", "");
    let t1 = track("1", "Alpha");

    store.add_track_to_playlist(&p.id, &t1);
    store.add_track_to_playlist(&p.id, &t1);

    let p = store.playlist(&p.id).unwrap();
    assert_eq!(p.track_count(), 1);
    assert_eq!(p.tracks[0].id, "1");
}

#[test]
fn playlists_are_newest_first_with_unique_ids() {
    let store = store();
    let a = store.create_playlist("A", "first");
    let b = store.create_playlist("B", "second");
    assert_ne!(a.id, b.id);

    let names: Vec<String> = store.playlists().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["B", "A"]);
    assert_eq!(store.playlist(&a.id).unwrap().description, "first");
}

/// Let the wall clock move so `updated_at` comparisons can be strict.
fn tick() {
    std::thread::sleep(std::time::Duration::from_millis(5));
}

#[test]
fn playlist_mutations_bump_updated_at() {
    let store = store();
    let p = store.create_playlist("Mix", "");
    assert_eq!(p.created_at, p.updated_at);

    tick();
    store.add_track_to_playlist(&p.id, &track("1", "Alpha"));
    let after_add = store.playlist(&p.id).unwrap();
    assert!(after_add.updated_at > p.updated_at);
    assert_eq!(after_add.created_at, p.created_at);

    tick();
    store.rename_playlist(&p.id, "Renamed");
    let renamed = store.playlist(&p.id).unwrap();
    assert_eq!(renamed.name, "Renamed");
    assert!(renamed.updated_at > after_add.updated_at);

    tick();
    store.remove_track_from_playlist(&p.id, "1");
    let emptied = store.playlist(&p.id).unwrap();
    assert_eq!(emptied.track_count(), 0);
    assert!(emptied.updated_at > renamed.updated_at);
}

#[test]
fn unknown_playlist_operations_are_noops() {
    let store = store();
    let p = store.create_playlist("Keep", "");
    let mut rx = store.subscribe_playlists();

    store.add_track_to_playlist("missing", &track("1", "Alpha"));
    store.remove_track_from_playlist("missing", "1");
    store.rename_playlist("missing", "x");
    store.delete_playlist("missing");
    assert!(!rx.has_changed().unwrap());

    store.delete_playlist(&p.id);
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_empty());
}

#[test]
fn playlist_duration_formatting() {
    let mut p = Playlist::new("Long", "");
    let mut t = track("1", "Alpha");
    t.duration_seconds = 3_900;
    p.tracks.push(t);
    assert_eq!(p.total_duration_seconds(), 3_900);
    assert_eq!(p.total_duration_formatted(), "1 hr 5 min");

    p.tracks[0].duration_seconds = 59 * 60 + 59;
    assert_eq!(p.total_duration_formatted(), "59 min");
}

#[test]
fn recommendation_tags_take_first_three_non_blank() {
    let mut seed = track("1", "Alpha");
    seed.tags = vec!["rock".into(), " ".into(), "indie".into(), "pop".into(), "jazz".into()];
    assert_eq!(recommendation_tags(&seed), vec!["rock", "indie", "pop"]);
}

#[tokio::test]
async fn recommendations_use_seed_tags() {
    let store = store();
    let mut seed = track("1", "Alpha");
    seed.tags = vec!["rock".into(), "indie".into(), "pop".into(), "jazz".into()];

    store.get_recommendations(&seed).await;
    assert_eq!(
        store.catalog().calls(),
        vec![Call::Tracks(
            TrackQuery::default().limit(30).tags(["rock", "indie", "pop"])
        )]
    );
}

#[tokio::test]
async fn recommendations_without_tags_fall_back_to_popular() {
    let store = store();
    store.get_recommendations(&track("1", "Alpha")).await;
    assert_eq!(
        store.catalog().calls(),
        vec![Call::Tracks(
            TrackQuery::default().limit(30).order(Order::PopularityWeek)
        )]
    );
}

#[tokio::test]
async fn catalog_queries_use_fixed_parameters() {
    let store = store();
    store.get_trending_tracks(50).await;
    store.get_new_releases(30).await;
    store.get_album_details("a1").await;
    store.get_artist_tracks("ar1").await;
    store.get_artist_albums("ar1").await;
    store.get_chill_mixes().await;
    store.get_focus_mixes().await;
    store.search_albums("moon").await;

    let calls = store.catalog().calls();
    assert_eq!(calls[0], Call::Tracks(TrackQuery::default().limit(50)));
    assert_eq!(calls[1], Call::Albums(AlbumQuery::default().limit(30)));
    assert_eq!(calls[2], Call::AlbumTracks("a1".into()));
    assert_eq!(calls[3], Call::ArtistTracks("ar1".into(), 50));
    assert_eq!(calls[4], Call::ArtistAlbums("ar1".into()));
    assert_eq!(
        calls[5],
        Call::Tracks(TrackQuery::default().tags(["chillout", "ambient", "lounge"]))
    );
    assert_eq!(
        calls[6],
        Call::Tracks(TrackQuery::default().tags(["classical", "instrumental", "piano"]))
    );
    assert_eq!(calls[7], Call::Albums(AlbumQuery::default().search("moon")));
}

#[tokio::test]
async fn catalog_results_pass_through_verbatim() {
    let tracks = vec![track("1", "Alpha"), track("2", "Beta")];
    let store = LibraryStore::new(FakeCatalog::with_tracks(tracks.clone()));
    assert_eq!(store.search_tracks("a").await, tracks);
}

#[tokio::test]
async fn catalog_failures_degrade_to_empty() {
    let store = LibraryStore::new(FakeCatalog::failing());
    assert!(store.get_trending_tracks(50).await.is_empty());
    assert!(store.search_artists("x").await.is_empty());
    assert!(store.get_top_artists(30).await.is_empty());
    assert!(store.get_recommendations(&track("1", "Alpha")).await.is_empty());
}
