mod args;
mod handlers;

pub use args::Cli;
pub use handlers::run;
