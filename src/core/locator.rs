use crate::core::{ApiCollection, ApiDescriptor, LookupKey};

/// First descriptor in collection order whose name and version both match.
pub fn find_api<'a>(collection: &'a ApiCollection, key: &LookupKey) -> Option<&'a ApiDescriptor> {
    collection.descriptors().find(|api| key.matches(api))
}
