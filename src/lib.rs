pub mod app;

pub use app::PrigorodApp;
