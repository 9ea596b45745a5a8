#![allow(dead_code)]

pub mod env;
pub mod graphql_server;
