use serde::{Deserialize, Deserializer};

/// One registered API project as reported by `GET /rest/apigateway/apis`.
///
/// Missing or `null` fields fall back to their defaults so that one odd entry
/// does not hide the rest of the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiDescriptor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "apiName", default, deserialize_with = "null_as_default")]
    pub api_name: String,
    #[serde(rename = "apiVersion", default, deserialize_with = "null_as_default")]
    pub api_version: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub api_type: String,
    #[serde(rename = "isActive", default, deserialize_with = "null_as_default")]
    pub is_active: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiWrapper {
    pub api: ApiDescriptor,
}

/// Snapshot of the gateway inventory at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiCollection {
    #[serde(rename = "apiResponse")]
    pub api_response: Vec<ApiWrapper>,
}

impl ApiCollection {
    pub fn descriptors(&self) -> impl Iterator<Item = &ApiDescriptor> {
        self.api_response.iter().map(|wrapper| &wrapper.api)
    }

    pub fn len(&self) -> usize {
        self.api_response.len()
    }

    pub fn is_empty(&self) -> bool {
        self.api_response.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    pub name: String,
    pub version: String,
}

impl LookupKey {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn matches(&self, api: &ApiDescriptor) -> bool {
        self.name == api.api_name && self.version == api.api_version
    }
}
