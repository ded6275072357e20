pub mod catalog;
pub mod openweather;
pub mod seed;
pub mod weather;
