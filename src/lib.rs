pub mod error;
pub mod game;
pub mod io;
pub mod model;
pub mod solver;
