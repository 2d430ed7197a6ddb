pub mod movies;
pub mod repositories;
