pub mod province;
pub mod region;
pub mod scraped_data;
