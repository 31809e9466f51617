pub mod artist;
pub mod booking;
pub mod studio;
