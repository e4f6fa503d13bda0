pub mod aired;

pub use aired::parse_aired_date;
