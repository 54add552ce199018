pub mod analyzers;
pub mod config;
pub mod fetch;
pub mod forecast;
pub mod history;
pub mod output;
pub mod random;
pub mod refresh;
pub mod signals;
