// this_file: crates/typecast-cli/src/commands/mod.rs

pub mod info;
pub mod layout;
