pub(crate) mod hooks;
pub mod ui;
