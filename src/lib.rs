pub mod audit;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod export;
pub mod geofence;
pub mod handlers;
pub mod models;
pub mod realtime;
pub mod signature;
pub mod templates_structs;
