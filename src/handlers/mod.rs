pub mod dashboard;
pub mod db_admin;
pub mod health;
pub mod smoking;
pub mod workouts;
