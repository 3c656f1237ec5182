use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

/// Deserialize an already-parsed (possibly jq-filtered) value, with JSON-path
/// context in error messages.
pub fn from_value_with_path<T: DeserializeOwned>(value: Value, origin: &str) -> Result<T> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| decode_error(origin, err))
}

fn decode_error<E: std::fmt::Display>(origin: &str, err: serde_path_to_error::Error<E>) -> Error {
    Error::Decode {
        origin: origin.to_string(),
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    }
}
