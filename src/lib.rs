#[allow(non_snake_case)]
pub mod Balancer;
#[allow(non_snake_case)]
pub mod Examples;
pub mod cli;
pub mod settings;
