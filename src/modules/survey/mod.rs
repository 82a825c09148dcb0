pub mod controller;
pub mod crud;
pub mod error;
pub mod extract;
pub mod generation;
pub mod model;
pub mod routes;
pub mod schema;
