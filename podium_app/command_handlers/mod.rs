mod create_player;
mod update_score;

pub use create_player::CreatePlayerCommandHandler;
pub use update_score::UpdateScoreCommandHandler;
