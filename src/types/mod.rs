pub mod day_of_year;
pub mod envelope;
pub mod location;
pub mod query;
pub mod variable;
pub mod year_series;
