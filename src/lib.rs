//! Workspace root. All functionality lives in the member crates under
//! `crates/`; see `hearth-shell` for the host entry points.
