// CLI module - one entry point per subcommand
pub mod list;
pub mod rename;
pub mod store;
pub mod view;

#[cfg(test)]
mod list_tests;
