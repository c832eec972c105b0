pub mod dialogue_controller;
