// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Rejects blank service ids at parse time.

use serde::Deserialize;

use crate::types::ServiceId;

pub fn deserialize_service_id<'de, D>(deserializer: D) -> Result<ServiceId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let id = ServiceId::deserialize(deserializer)?;
    if id.is_blank() {
        return Err(serde::de::Error::custom("service_id cannot be empty"));
    }
    Ok(id)
}

pub fn deserialize_service_id_option<'de, D>(deserializer: D) -> Result<Option<ServiceId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<ServiceId>::deserialize(deserializer)? {
        Some(id) if id.is_blank() => Err(serde::de::Error::custom(
            "destination service_id cannot be empty",
        )),
        other => Ok(other),
    }
}
