pub mod action;
pub mod game_loop;
pub mod player;
pub mod world;
