mod game_state;

pub use game_state::{GameAction, GameState};
