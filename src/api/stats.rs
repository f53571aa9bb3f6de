use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};

use crate::{
    fetch::{FetchOutcome, fetch_with_refresh},
    judge,
    server::AppState,
    session,
    spotify::resources::DEFAULT_LIMIT,
    types::{TimeRange, TopArtists, TopTracks, UserProfile},
};

use super::{escape, redirect};

pub async fn profile(headers: HeaderMap, Extension(state): Extension<Arc<AppState>>) -> Response {
    let sid = session::session_id_from_headers(&headers, &state.secret_key);
    let st = Arc::clone(&state);
    let outcome = fetch_with_refresh(&state.auth, state.sessions.as_ref(), sid.as_deref(), {
        move |token| {
            let st = Arc::clone(&st);
            async move { st.resources.get_profile(&token).await }
        }
    })
    .await;

    match outcome {
        FetchOutcome::Fetched(user) => Html(render_profile(&user)).into_response(),
        FetchOutcome::LoginRequired => redirect("/login"),
    }
}

pub async fn top_tracks(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    let sid = session::session_id_from_headers(&headers, &state.secret_key);
    let time_range = TimeRange::parse(params.get("time_range").map(String::as_str));
    let st = Arc::clone(&state);
    let outcome = fetch_with_refresh(&state.auth, state.sessions.as_ref(), sid.as_deref(), {
        move |token| {
            let st = Arc::clone(&st);
            async move { st.resources.get_top_tracks(&token, DEFAULT_LIMIT, time_range).await }
        }
    })
    .await;

    match outcome {
        FetchOutcome::Fetched(tracks) => Html(render_tracks(&tracks, time_range)).into_response(),
        FetchOutcome::LoginRequired => redirect("/login"),
    }
}

pub async fn top_artists(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    let sid = session::session_id_from_headers(&headers, &state.secret_key);
    let time_range = TimeRange::parse(params.get("time_range").map(String::as_str));
    let st = Arc::clone(&state);
    let outcome = fetch_with_refresh(&state.auth, state.sessions.as_ref(), sid.as_deref(), {
        move |token| {
            let st = Arc::clone(&st);
            async move { st.resources.get_top_artists(&token, DEFAULT_LIMIT, time_range).await }
        }
    })
    .await;

    match outcome {
        FetchOutcome::Fetched(artists) => {
            Html(render_artists(&artists, time_range)).into_response()
        }
        FetchOutcome::LoginRequired => redirect("/login"),
    }
}

/// Top tracks plus generated taste commentary. Generator failures fall back
/// to a fixed message; they never fail the page.
pub async fn judgment(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    let sid = session::session_id_from_headers(&headers, &state.secret_key);
    let time_range = TimeRange::parse(params.get("time_range").map(String::as_str));
    let st = Arc::clone(&state);
    let outcome = fetch_with_refresh(&state.auth, state.sessions.as_ref(), sid.as_deref(), {
        move |token| {
            let st = Arc::clone(&st);
            async move { st.resources.get_top_tracks(&token, DEFAULT_LIMIT, time_range).await }
        }
    })
    .await;

    let tracks = match outcome {
        FetchOutcome::Fetched(tracks) => tracks,
        FetchOutcome::LoginRequired => return redirect("/login"),
    };

    let track_list = judge::format_track_list(&tracks.items);
    let commentary = judge::commentary_for(state.commentator.as_deref(), &track_list).await;

    Html(render_judgment(&commentary, &track_list, time_range)).into_response()
}

fn page(title: &str, body: String) -> String {
    format!(
        "<html><head><title>{title}</title></head><body>\
         <h2>{title}</h2>{body}\
         <p><a href=\"/profile\">Profile</a> | <a href=\"/top-tracks\">Top tracks</a> | \
         <a href=\"/top-artists\">Top artists</a> | <a href=\"/judgment\">Judgment</a> | \
         <a href=\"/logout\">Log out</a></p>\
         </body></html>"
    )
}

fn render_profile(user: &UserProfile) -> String {
    let name = user.display_name.as_deref().unwrap_or(&user.id);
    let mut body = format!("<p>Logged in as <b>{}</b></p><ul>", escape(name));
    if let Some(email) = &user.email {
        body.push_str(&format!("<li>Email: {}</li>", escape(email)));
    }
    if let Some(country) = &user.country {
        body.push_str(&format!("<li>Country: {}</li>", escape(country)));
    }
    if let Some(product) = &user.product {
        body.push_str(&format!("<li>Subscription: {}</li>", escape(product)));
    }
    if let Some(followers) = &user.followers {
        body.push_str(&format!("<li>Followers: {}</li>", followers.total));
    }
    body.push_str("</ul>");
    page("Your profile", body)
}

fn render_tracks(tracks: &TopTracks, time_range: TimeRange) -> String {
    let mut body = format!("<p>Time range: {time_range}</p><ol>");
    for track in &tracks.items {
        let artists = track
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        body.push_str(&format!(
            "<li>{} by {}</li>",
            escape(&track.name),
            escape(&artists)
        ));
    }
    body.push_str("</ol>");
    page("Your top tracks", body)
}

fn render_artists(artists: &TopArtists, time_range: TimeRange) -> String {
    let mut body = format!("<p>Time range: {time_range}</p><ol>");
    for artist in &artists.items {
        if artist.genres.is_empty() {
            body.push_str(&format!("<li>{}</li>", escape(&artist.name)));
        } else {
            body.push_str(&format!(
                "<li>{} ({})</li>",
                escape(&artist.name),
                escape(&artist.genres.join(", "))
            ));
        }
    }
    body.push_str("</ol>");
    page("Your top artists", body)
}

fn render_judgment(commentary: &str, track_list: &str, time_range: TimeRange) -> String {
    let mut body = format!(
        "<p>Time range: {time_range}</p><blockquote>{}</blockquote><pre>{}</pre>",
        escape(commentary),
        escape(track_list)
    );
    body.push_str("<p>The court has spoken.</p>");
    page("The verdict", body)
}
