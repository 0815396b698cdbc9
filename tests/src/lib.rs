mod exec_log;
pub use exec_log::{ExecLog, Executed};

mod logging_driver;
pub use logging_driver::LoggingDriver;

mod setup;
pub use setup::{books, setup, users, Test};

pub use std_util::*;
