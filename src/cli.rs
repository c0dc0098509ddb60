/// Interactive terminal menu around the balancing engine.
pub mod cli_main;
/// Help texts (english and russian) shown by the menu.
pub mod balancer_help;
