pub mod checks;
pub mod constants;
pub mod error;
pub mod installer;
pub mod privilege;
pub mod report;
pub mod source;
pub mod types;
pub mod utils;
