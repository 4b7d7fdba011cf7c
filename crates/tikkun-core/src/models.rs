pub mod aggregation;
pub mod change;
pub mod classification;
pub mod correction;
pub mod location;
pub mod suggestion;
