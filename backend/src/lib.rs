extern crate env_logger;
extern crate link_board_frontend;
extern crate log;
extern crate serde_json;

pub mod board;
pub mod config;
pub mod connection;
pub mod link_board;
pub mod store;

use std::io::Write;

/// One line per record. Safe to call more than once; later calls are ignored.
pub fn init_logger() {
    let _ = env_logger::builder()
        .format(|buf, record| writeln!(buf, "{:<5} {}", record.level(), record.args()))
        .try_init();
}
