mod env;
mod parsed_args;
mod parser;


pub(crate) use env::resolve_tools;
pub use parsed_args::ParsedArgs;
pub use parser::parse_args;
