/// Query parameters of a single bucket listing request
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder)]
#[builder(on(String, into))]
pub struct ListOptions {
    #[builder(default)]
    pub prefix: String,
    pub delimiter: Option<String>,
    pub marker: Option<String>,
    pub max_keys: Option<u32>,
}

/// One page of a bucket listing, as the provider returns it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListBucketResult {
    pub name: String,
    pub prefix: String,
    pub marker: String,
    pub next_marker: Option<String>,
    pub is_truncated: bool,
    pub contents: Vec<ListedObject>,
    pub common_prefixes: Vec<CommonPrefix>,
}

impl ListBucketResult {
    /// Where the next page starts, if there is one.
    ///
    /// Without a `NextMarker` the page ends at the greater of its last key
    /// and its last common prefix, both being returned in ascending order.
    pub fn continuation_marker(&self) -> Option<String> {
        if !self.is_truncated {
            return None;
        }
        if let Some(marker) = self.next_marker.as_ref().filter(|m| !m.is_empty()) {
            return Some(marker.clone());
        }
        let last_key = self.contents.last().map(|object| object.key.as_str());
        let last_prefix = self.common_prefixes.last().map(|p| p.prefix.as_str());
        last_key.max(last_prefix).map(str::to_string)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListedObject {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonPrefix {
    pub prefix: String,
}
