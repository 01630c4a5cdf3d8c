pub mod chess_com;
pub mod config;
pub mod data;
pub mod error;
pub mod normalize;
pub mod output;
pub mod pgn;
pub mod process_archive;
pub mod util;
