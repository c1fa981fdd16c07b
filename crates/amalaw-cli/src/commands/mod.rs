//! Command implementations.

pub mod finetune;
pub mod scrape;

pub use self::finetune::execute_finetune;
pub use self::scrape::execute_scrape;
