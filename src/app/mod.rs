//! Application layer: dataset selection and registry seeding.

pub mod seeder;
pub mod selector;

pub use seeder::{ContractSeeder, DataSeeder, prepare_registry};
pub use selector::{data, init, select, select_by_value};
