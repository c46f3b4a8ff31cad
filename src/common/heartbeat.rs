use serde::Deserialize;
use serde_json::Value;

/// Zone name reported for the compute node itself rather than a guest.
pub const GLOBAL_ZONE: &str = "global";

/// One heartbeat event from a compute node: the node uuid plus one status
/// tuple per machine running there. Tuples arrive as heterogeneous JSON
/// arrays, e.g. `[0, "global", "running", "/", "", "liveimg", "shared", "0"]`.
#[derive(Debug, Deserialize)]
pub struct HeartbeatEvent {
    pub server_uuid: String,
    pub heartbeats: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeartbeatTuple {
    pub uuid: String,
    pub status: String,
}

impl HeartbeatTuple {
    /// Extract the machine uuid (index 1) and status (index 2) from a raw
    /// tuple. Returns None when either field is missing or not a string.
    pub fn parse(raw: &Value) -> Option<Self> {
        let fields = raw.as_array()?;
        let uuid = fields.get(1)?.as_str()?;
        let status = fields.get(2)?.as_str()?;
        Some(Self {
            uuid: uuid.to_string(),
            status: status.to_string(),
        })
    }

    /// The global zone is the host itself, not a guest machine, and is
    /// never reconciled into the directory.
    pub fn is_global(&self) -> bool {
        self.uuid == GLOBAL_ZONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_extracts_uuid_and_status() {
        let raw = json!([3, "c1", "running", "/", "", "liveimg", "shared", "0"]);
        let tuple = HeartbeatTuple::parse(&raw).unwrap();
        assert_eq!(tuple.uuid, "c1");
        assert_eq!(tuple.status, "running");
        assert!(!tuple.is_global());
    }

    #[test]
    fn parse_flags_the_global_zone() {
        let raw = json!([0, "global", "running"]);
        assert!(HeartbeatTuple::parse(&raw).unwrap().is_global());
    }

    #[test]
    fn parse_rejects_short_or_non_string_tuples() {
        assert!(HeartbeatTuple::parse(&json!([0])).is_none());
        assert!(HeartbeatTuple::parse(&json!([0, "c1"])).is_none());
        assert!(HeartbeatTuple::parse(&json!([0, 42, "running"])).is_none());
        assert!(HeartbeatTuple::parse(&json!({"uuid": "c1"})).is_none());
    }
}
