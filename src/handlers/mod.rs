pub mod helpers;
pub mod middleware;
pub mod instances;
pub mod create;

pub use middleware::{console_middleware, ConsoleId, CONSOLE_COOKIE};
