mod card;
mod reconstruct;
mod stats;
mod types;

pub use card::BalloonCard;
pub use reconstruct::{build_trajectories, build_trajectory};
pub use stats::FlightStats;
pub use types::{PathPoint, Trajectory};
