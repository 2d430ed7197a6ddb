pub mod deadline;
pub mod errors;
pub mod list;
pub mod user;
