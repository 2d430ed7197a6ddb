pub mod kinopoisk;

pub use kinopoisk::KinopoiskClient;
