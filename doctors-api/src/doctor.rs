use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::TimeOfDay;

/// Identifier of a persisted doctor.
///
/// Always positive: the API uses `0`/absent to mean "not created yet", which
/// is modelled as `Option<DoctorId>::None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorId(i64);

impl DoctorId {
    /// Returns `None` for `0` and negative values.
    pub fn from_raw(id: i64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DoctorId> for i64 {
    fn from(id: DoctorId) -> Self {
        id.0
    }
}

/// A doctor as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRecord {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<DoctorId>,
    pub name: String,
    #[serde(deserialize_with = "deserialize_phone")]
    pub phone: String,
    pub check_in: TimeOfDay,
    pub check_out: TimeOfDay,
}

/// The writable fields of a doctor, sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorPayload {
    pub name: String,
    pub phone: String,
    pub check_in: TimeOfDay,
    pub check_out: TimeOfDay,
}

impl DoctorPayload {
    pub fn into_record(self, id: Option<DoctorId>) -> DoctorRecord {
        DoctorRecord {
            id,
            name: self.name,
            phone: self.phone,
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }
}

/// Body of `POST /doctors` and `PUT /doctors/{id}`.
#[derive(Debug, Serialize)]
pub struct SaveDoctorRequest<'a> {
    pub data: &'a DoctorPayload,
}

/// Generic reply shape of the API. `status` is the server's own success
/// flag and is independent from the HTTP status code.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: bool,
    pub response: T,
}

impl<T> ApiEnvelope<T> {
    pub fn into_result(self) -> Option<T> {
        self.status.then_some(self.response)
    }
}

fn deserialize_optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DoctorId>, D::Error> {
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(DoctorId::from_raw))
}

/// Phones are numeric strings, but some backends store them as numbers.
fn deserialize_phone<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Phone {
        Text(String),
        Number(u64),
    }

    match Phone::deserialize(deserializer) {
        Ok(Phone::Text(s)) => Ok(s),
        Ok(Phone::Number(n)) => Ok(n.to_string()),
        Err(_) => Err(de::Error::custom("phone must be a string or a number")),
    }
}
