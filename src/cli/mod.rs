//! Interactive shell: output styling, the input seam, the donation entry
//! flow, and the command loop.

pub mod entry_flow;
pub mod io;
pub mod output;
pub mod shell;

pub use shell::{run_cli, CliError};
