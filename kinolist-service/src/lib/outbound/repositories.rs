pub mod list;
pub mod user;

pub use list::PostgresListRepository;
pub use user::PostgresUserRepository;
