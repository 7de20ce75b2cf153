mod common;

use common::*;
use stagebook_db::query;
use stagebook_db::BookingError;

#[tokio::test]
async fn test_venue_areas_group_each_pair_once() {
    let db = test_db().await;
    let hop = add_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let dueling = add_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;
    let park = add_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let artist = add_artist(&db, "Guns N Petals").await;

    add_show(&db, park.id, artist.id, days_from_now(3)).await;
    add_show(&db, park.id, artist.id, days_from_now(10)).await;
    add_show(&db, hop.id, artist.id, days_from_now(-3)).await;

    let areas = query::venue_areas(&db, now()).await.unwrap();
    assert_eq!(areas.len(), 2);

    // Ordered by state
    assert_eq!((areas[0].city.as_str(), areas[0].state.as_str()), ("San Francisco", "CA"));
    assert_eq!((areas[1].city.as_str(), areas[1].state.as_str()), ("New York", "NY"));

    let sf: Vec<(i32, u64)> = areas[0]
        .venues
        .iter()
        .map(|v| (v.id, v.num_upcoming_shows))
        .collect();
    assert_eq!(sf, vec![(hop.id, 0), (park.id, 2)]);
    assert_eq!(areas[1].venues.len(), 1);
    assert_eq!(areas[1].venues[0].id, dueling.id);

    let total: usize = areas.iter().map(|a| a.venues.len()).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn test_venue_areas_same_city_different_state_are_separate() {
    let db = test_db().await;
    add_venue(&db, "Portland Hall", "Portland", "OR").await;
    add_venue(&db, "Portland Barn", "Portland", "ME").await;

    let areas = query::venue_areas(&db, now()).await.unwrap();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0].state, "ME");
    assert_eq!(areas[1].state, "OR");
}

#[tokio::test]
async fn test_venue_areas_empty() {
    let db = test_db().await;
    assert!(query::venue_areas(&db, now()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_venues_by_substring() {
    let db = test_db().await;
    let hop = add_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let park = add_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;

    let results = query::search_venues(&db, "Hop", now()).await.unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].id, hop.id);

    let results = query::search_venues(&db, "Music", now()).await.unwrap();
    assert_eq!(results.count, 2);
    let ids: Vec<i32> = results.data.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![hop.id, park.id]);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let db = test_db().await;
    add_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    add_venue(&db, "Hopscotch Club", "Austin", "TX").await;
    add_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;

    let lower = query::search_venues(&db, "hop", now()).await.unwrap();
    let upper = query::search_venues(&db, "HOP", now()).await.unwrap();
    assert_eq!(lower, upper);
    assert_eq!(lower.count, 2);
}

#[tokio::test]
async fn test_search_keeps_surrounding_whitespace() {
    let db = test_db().await;
    add_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let park = add_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let hop = add_venue(&db, "Hopscotch Club", "Austin", "TX").await;

    let trailing = query::search_venues(&db, "Music ", now()).await.unwrap();
    assert_eq!(trailing.count, 1);
    assert_eq!(trailing.data[0].id, park.id);

    let leading = query::search_venues(&db, " hop", now()).await.unwrap();
    assert_eq!(leading.count, 1);
    assert_eq!(leading.data[0].name, "The Musical Hop");
    assert!(leading.data.iter().all(|v| v.id != hop.id));
}

#[tokio::test]
async fn test_search_folds_term_like_the_column() {
    let db = test_db().await;
    let cafe = add_venue(&db, "Café Ünion", "Montréal", "QC").await;

    // Non-ASCII letters matched in their stored case
    let exact = query::search_venues(&db, "Ünion", now()).await.unwrap();
    assert_eq!(exact.count, 1);
    assert_eq!(exact.data[0].id, cafe.id);

    let mixed = query::search_venues(&db, "CAFé", now()).await.unwrap();
    assert_eq!(mixed.count, 1);
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let db = test_db().await;
    add_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    add_venue(&db, "100% Live", "Austin", "TX").await;

    let percent = query::search_venues(&db, "%", now()).await.unwrap();
    assert_eq!(percent.count, 1);
    assert_eq!(percent.data[0].name, "100% Live");

    let underscore = query::search_venues(&db, "_", now()).await.unwrap();
    assert_eq!(underscore.count, 0);
}

#[tokio::test]
async fn test_search_artists_reports_upcoming_counts() {
    let db = test_db().await;
    let venue = add_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let petals = add_artist(&db, "Guns N Petals").await;
    let matt = add_artist(&db, "Matt Quevado").await;
    let sax = add_artist(&db, "The Wild Sax Band").await;

    add_show(&db, venue.id, sax.id, days_from_now(1)).await;
    add_show(&db, venue.id, sax.id, days_from_now(2)).await;
    add_show(&db, venue.id, sax.id, days_from_now(-2)).await;

    let results = query::search_artists(&db, "A", now()).await.unwrap();
    assert_eq!(results.count, 3);
    let rows: Vec<(i32, u64)> = results
        .data
        .iter()
        .map(|a| (a.id, a.num_upcoming_shows))
        .collect();
    assert_eq!(rows, vec![(petals.id, 0), (matt.id, 0), (sax.id, 2)]);

    let band = query::search_artists(&db, "band", now()).await.unwrap();
    assert_eq!(band.count, 1);
    assert_eq!(band.data[0].name, "The Wild Sax Band");
}

#[tokio::test]
async fn test_venue_detail_partitions_shows() {
    let db = test_db().await;
    let venue = add_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let petals = add_artist(&db, "Guns N Petals").await;
    let sax = add_artist(&db, "The Wild Sax Band").await;

    add_show(&db, venue.id, sax.id, days_from_now(5)).await;
    add_show(&db, venue.id, petals.id, days_from_now(1)).await;
    add_show(&db, venue.id, petals.id, days_from_now(-1)).await;
    add_show(&db, venue.id, sax.id, now()).await;

    let detail = query::venue_detail(&db, venue.id, now()).await.unwrap();
    assert_eq!(detail.venue.name, "The Musical Hop");

    assert_eq!(detail.upcoming_shows_count, 2);
    assert_eq!(detail.upcoming_shows[0].artist_id, petals.id);
    assert_eq!(detail.upcoming_shows[0].start_time, days_from_now(1));
    assert_eq!(detail.upcoming_shows[1].artist_id, sax.id);
    assert_eq!(detail.upcoming_shows[1].artist_name, "The Wild Sax Band");

    assert_eq!(detail.past_shows_count, 1);
    assert_eq!(detail.past_shows[0].artist_id, petals.id);
    assert_eq!(detail.past_shows[0].artist_image_link, petals.image_link);
}

#[tokio::test]
async fn test_show_starting_now_is_in_neither_partition() {
    let db = test_db().await;
    let venue = add_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = add_artist(&db, "Matt Quevado").await;
    add_show(&db, venue.id, artist.id, now()).await;

    let detail = query::artist_detail(&db, artist.id, now()).await.unwrap();
    assert_eq!(detail.past_shows_count, 0);
    assert_eq!(detail.upcoming_shows_count, 0);

    let results = query::search_artists(&db, "Matt", now()).await.unwrap();
    assert_eq!(results.data[0].num_upcoming_shows, 0);
}

#[tokio::test]
async fn test_artist_detail_with_show_yesterday() {
    let db = test_db().await;
    let venue = add_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let sax = add_artist(&db, "The Wild Sax Band").await;
    add_show(&db, venue.id, sax.id, days_from_now(-1)).await;

    let detail = query::artist_detail(&db, sax.id, now()).await.unwrap();
    assert_eq!(detail.past_shows_count, 1);
    assert_eq!(detail.upcoming_shows_count, 0);
    assert_eq!(detail.past_shows[0].venue_id, venue.id);
    assert_eq!(detail.past_shows[0].venue_name, "Park Square Live Music & Coffee");
}

#[tokio::test]
async fn test_detail_on_empty_table_is_not_found() {
    let db = test_db().await;
    let err = query::venue_detail(&db, 1, now()).await.unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));

    let err = query::artist_detail(&db, 1, now()).await.unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));
}

#[tokio::test]
async fn test_detail_for_missing_id_is_not_found() {
    let db = test_db().await;
    let venue = add_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

    let err = query::venue_detail(&db, venue.id + 100, now()).await.unwrap_err();
    assert!(matches!(err, BookingError::NotFound(ref what) if what.contains("venue")));
}

#[tokio::test]
async fn test_show_list_is_ordered_and_enriched() {
    let db = test_db().await;
    let hop = add_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let park = add_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let petals = add_artist(&db, "Guns N Petals").await;
    let sax = add_artist(&db, "The Wild Sax Band").await;

    add_show(&db, park.id, sax.id, days_from_now(7)).await;
    add_show(&db, hop.id, petals.id, days_from_now(-30)).await;
    add_show(&db, park.id, petals.id, days_from_now(1)).await;

    let shows = query::show_list(&db).await.unwrap();
    assert_eq!(shows.len(), 3);

    let times: Vec<_> = shows.iter().map(|s| s.start_time).collect();
    assert_eq!(
        times,
        vec![days_from_now(-30), days_from_now(1), days_from_now(7)]
    );
    assert_eq!(shows[0].venue_name, "The Musical Hop");
    assert_eq!(shows[0].artist_name, "Guns N Petals");
    assert_eq!(shows[2].artist_id, sax.id);
    assert_eq!(shows[2].artist_image_link, sax.image_link);
}

#[tokio::test]
async fn test_artist_list_is_flat_and_sorted() {
    let db = test_db().await;
    add_artist(&db, "The Wild Sax Band").await;
    add_artist(&db, "Guns N Petals").await;
    add_artist(&db, "Matt Quevado").await;

    let names: Vec<String> = query::artist_list(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Guns N Petals", "Matt Quevado", "The Wild Sax Band"]);
}
