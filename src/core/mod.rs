pub mod content;
pub mod providers;
pub mod services;
pub mod tools;
pub mod workflow;
