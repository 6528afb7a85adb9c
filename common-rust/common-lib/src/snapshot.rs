//! Versioned JSON snapshots, used for state persisted between runs.

use serde::{de, Serialize};

pub const SERIALIZATION_VERSION_V1: u8 = 1u8;

pub fn serialize<T>(value: &T) -> Result<Vec<u8>, String>
where
    T: ?Sized + Serialize,
{
    let data = serde_json::to_vec_pretty(value).map_err(|err| err.to_string())?;

    let mut result = vec![SERIALIZATION_VERSION_V1];
    result.extend(data);

    Ok(result)
}

pub fn deserialize<'a, T>(bytes: &'a [u8]) -> Result<T, String>
where
    T: de::Deserialize<'a>,
{
    let Some((version, data)) = bytes.split_first() else {
        return Err("Empty snapshot".to_string());
    };

    match *version {
        SERIALIZATION_VERSION_V1 => {
            let value: T = serde_json::from_slice(data).map_err(|err| err.to_string())?;

            Ok(value)
        }
        _ => Err("Unsupported serialization version".to_string()),
    }
}
