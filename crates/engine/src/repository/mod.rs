pub mod drafts;
pub mod predictions;
pub mod season;

pub use drafts::DraftStore;
pub use predictions::{LockAck, PredictionStore};
pub use season::SeasonStore;
