/// Data structures shared between the auth core and the API surface.
///
/// Entity persistence beyond the user record (trips, destinations,
/// countries) lives with the external data layer, not here.

pub mod user;
