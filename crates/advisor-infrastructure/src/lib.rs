pub mod credentials;
pub mod paths;
pub mod storage;

pub use crate::credentials::{
    API_KEY_ENV, ApiKey, DotenvOutcome, MODEL_NAME_ENV, load_dotenv, load_dotenv_from,
    model_override,
};
pub use crate::paths::AdvisorPaths;
pub use crate::storage::ConfigStorage;
