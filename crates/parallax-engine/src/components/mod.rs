pub mod orbit;
pub mod star;
