//! Session-id encoding.
//!
//! The session id handed to the client is `route_id ++ raw_session_id`. The
//! route id identifies the host that issued the session, so later traffic for
//! the session can be demultiplexed back to that host without any session
//! table here. Unambiguous splitting relies on every route id in the topology
//! having the same width, which config validation enforces at load time.

/// Prefix the issuing host's route id onto the backend's raw session id.
pub fn encode(route_id: &str, raw_session_id: &str) -> String {
    format!("{route_id}{raw_session_id}")
}

/// Split a session id back into (route_id, raw_session_id).
///
/// Returns `None` when the id is shorter than the route-id width or the
/// split would not land on a character boundary.
pub fn decode(session_id: &str, route_id_width: usize) -> Option<(&str, &str)> {
    match session_id.char_indices().nth(route_id_width) {
        Some((i, _)) => Some(session_id.split_at(i)),
        // The raw id may legitimately be empty.
        None if session_id.chars().count() == route_id_width => Some((session_id, "")),
        None => None,
    }
}
