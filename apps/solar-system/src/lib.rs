pub mod bodies;
pub mod game;
pub mod orbit;
pub mod scene;
pub mod sim;
pub mod starfield;

pub use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");
