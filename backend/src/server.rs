use rocket::{catchers, routes, Build, Rocket};
use rocket::figment::Figment;
use crate::{
    catchers::{bad_request, internal_error, not_found},
    cors::CORS,
    routes::*,
    stats::{RequestStats, ServiceStats},
};

pub fn build(figment: Figment, state: AppState) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(CORS)
        .attach(RequestStats)
        .manage(state)
        .manage(ServiceStats::new())
        .mount(
            "/",
            routes![
                list_voters,
                health,
                get_voter,
                add_voter,
                update_voter,
                delete_all_voters,
                delete_voter,
                get_voter_polls,
                get_voter_poll,
                add_voter_poll,
                update_voter_poll,
                all_options
            ],
        )
        .register(
            "/",
            catchers![bad_request, not_found, internal_error],
        )
}
