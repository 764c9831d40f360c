#![forbid(unsafe_code)]

use crate::RpcError;
use serde_json::{Map, Value};

pub(crate) fn require_string<'a>(
    args: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, RpcError> {
    match args.get(key) {
        None | Some(Value::Null) => Err(RpcError::MissingArgument(key)),
        Some(Value::String(v)) => Ok(v.as_str()),
        Some(_) => Err(RpcError::invalid(key, "must be a string")),
    }
}

pub(crate) fn optional_string<'a>(
    args: &'a Map<String, Value>,
    key: &'static str,
) -> Result<Option<&'a str>, RpcError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(v)) => Ok(Some(v.as_str())),
        Some(_) => Err(RpcError::invalid(key, "must be a string")),
    }
}

/// Like [`optional_string`], but blank strings count as absent.
pub(crate) fn optional_nonblank_string<'a>(
    args: &'a Map<String, Value>,
    key: &'static str,
) -> Result<Option<&'a str>, RpcError> {
    Ok(optional_string(args, key)?.filter(|v| !v.trim().is_empty()))
}
