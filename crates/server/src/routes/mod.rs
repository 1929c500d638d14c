pub mod health;
pub mod openings;
pub mod practice;
