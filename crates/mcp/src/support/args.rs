#![forbid(unsafe_code)]

mod strings;

pub(crate) use strings::*;
