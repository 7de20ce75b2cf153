pub mod artist;
pub mod genres;
pub mod show;
pub mod venue;

pub use genres::Genres;
