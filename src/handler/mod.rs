pub mod interaction_handler;
