/// One CSV data line, keyed by header column in header order. Cell values are
/// kept as strings to match the source encoding; no numeric or boolean
/// coercion happens anywhere in the pipeline.
///
/// `serde_json::Map` preserves insertion order via the `preserve_order`
/// feature, so serialized rows list their keys in header order.
pub type DatasetRow = serde_json::Map<String, serde_json::Value>;
