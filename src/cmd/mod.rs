pub mod awards;
pub mod check;
pub mod winner;
