pub mod retry;

pub use retry::{wait_for, Backoff, IsTransient};
