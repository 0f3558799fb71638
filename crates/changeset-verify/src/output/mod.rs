mod annotation;
mod console;

pub(crate) use annotation::error_annotation;
pub(crate) use console::ConsoleReporter;
