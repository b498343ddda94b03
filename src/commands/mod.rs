pub mod import;
pub mod types;

pub use import::ImportCommand;
pub use types::TypesCommand;
