pub mod account_repo;
pub mod attempt_repo;
pub mod catalog_repo;
pub mod pool;
pub mod question_repo;
pub mod test_repo;
