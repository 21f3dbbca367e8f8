mod common;

mod files_from;
mod help;
mod progress;
mod run;
