pub mod env;
pub mod fs;
