pub mod attempts;
pub mod rounds;

pub use attempts::Entity as Attempts;
pub use attempts::Model as AttemptRecord;
pub use rounds::Entity as Rounds;
pub use rounds::Model as RoundRecord;
pub use rounds::RoundState;
