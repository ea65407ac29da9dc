use alloc::collections::BTreeMap;
use alloc::string::String;

/// Destination for parsed entries. Inserting an existing key overwrites it.
pub trait PropertySink {
    fn insert_property(&mut self, key: String, value: String);
}

impl PropertySink for BTreeMap<String, String> {
    fn insert_property(&mut self, key: String, value: String) {
        self.insert(key, value);
    }
}

#[cfg(feature = "std")]
impl<S: std::hash::BuildHasher> PropertySink for std::collections::HashMap<String, String, S> {
    fn insert_property(&mut self, key: String, value: String) {
        self.insert(key, value);
    }
}

impl<T: PropertySink + ?Sized> PropertySink for &mut T {
    fn insert_property(&mut self, key: String, value: String) {
        (**self).insert_property(key, value);
    }
}
