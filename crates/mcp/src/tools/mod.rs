#![forbid(unsafe_code)]

mod create_job;
mod definitions;
mod dispatch;
mod status;

pub(crate) use definitions::{
    CREATE_JOB_TOOL, STATUS_TOOL, server_descriptor, tool_definitions,
};
pub(crate) use dispatch::dispatch_tool;
