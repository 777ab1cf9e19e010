mod common;
mod registry;
mod store;
