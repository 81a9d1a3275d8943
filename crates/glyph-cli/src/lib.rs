pub mod commands;
pub mod record_source;
pub mod trace_init;
