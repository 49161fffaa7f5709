pub mod balloons;
pub mod error;
pub mod radius;
pub mod view;
