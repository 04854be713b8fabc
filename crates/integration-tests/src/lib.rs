//! Cross-crate test suites for the Rusty-Stay workspace live under
//! `tests/`; this crate intentionally exports nothing.
