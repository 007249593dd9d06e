extern crate link_board_backend;
extern crate tokio;

use link_board_backend::config::Config;
use link_board_backend::connection::{self, HandlerError};
use link_board_backend::link_board::LinkBoard;

#[tokio::main]
async fn main() -> Result<(), HandlerError> {
    link_board_backend::init_logger();

    let config = Config::from_env()?;
    let board = LinkBoard::new(config.open_store()?);

    connection::establish(config.addr, board).await
}
