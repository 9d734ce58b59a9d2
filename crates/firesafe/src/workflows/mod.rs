pub mod booking;
pub mod buildings;
pub mod inspection;
