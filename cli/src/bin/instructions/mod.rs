mod process_create_reward_set;
mod process_get_proof;
mod process_verify;

pub use process_create_reward_set::process_create_reward_set;
pub use process_get_proof::process_get_proof;
pub use process_verify::process_verify;
