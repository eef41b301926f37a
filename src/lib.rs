#![doc = "The `taskhive` library crate."]
#![doc = ""]
#![doc = "Contains the domain models, authentication machinery, the task and session"]
#![doc = "services with their ownership and validation rules, routing configuration,"]
#![doc = "and error handling. The binary (`main.rs`) wires these into a running"]
#![doc = "actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod service;
pub mod store;
