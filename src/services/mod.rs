pub mod assistant;
pub mod booking;
pub mod calendar;
pub mod composer;
pub mod time_resolver;
pub mod validation;
