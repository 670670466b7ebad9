mod info;
mod tabulate;

pub use info::info;
pub use tabulate::tabulate;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
