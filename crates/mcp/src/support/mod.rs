#![forbid(unsafe_code)]

mod args;
mod jsonrpc;
mod runtime;
mod time;

pub(crate) use args::*;
pub(crate) use jsonrpc::*;
pub(crate) use runtime::*;
pub(crate) use time::*;
