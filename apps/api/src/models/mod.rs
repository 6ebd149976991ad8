pub mod job;
pub mod skill;
pub mod user;

pub use job::{Job, RequiredSkill};
pub use skill::Skill;
pub use user::{UserDocument, UserResponse};
