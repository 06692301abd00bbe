pub(crate) mod bootstrap;
mod capture;
pub(crate) mod loop_runner;
mod story;
