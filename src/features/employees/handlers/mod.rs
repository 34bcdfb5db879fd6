pub mod employee_handler;

pub use employee_handler::{__path_update_location, update_location};
