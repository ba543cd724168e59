pub mod cost;
pub mod model;
pub mod params;
pub mod portfolio;
pub mod scenario;
pub mod stage;
pub mod staff;
