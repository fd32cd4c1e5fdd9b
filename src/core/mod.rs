pub mod constants;
pub mod errors;
pub mod estimator;
pub mod models;
pub mod resolver;
pub mod rules;
pub mod services;
pub mod settlement;
