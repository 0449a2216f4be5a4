/// A key-value pair stored in a map node. Only the key takes part in ordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }

    pub fn into_pair(self) -> (K, V) {
        let Entry { key, value } = self;
        (key, value)
    }
}
