//! Construction of the `Response` envelope shared by both RPCs.
//!
//! The envelope carries a success flag, the consignment just created, and
//! the full listing. Each call fills in only the part it owns; the rest keeps
//! its protobuf default.

use consignment_core::proto::{Consignment, Response};

/// Envelope for a successful `CreateConsignment`.
///
/// `created` is always `true` here. A `false` value is reserved for a future
/// validation path that refuses a record without failing the call.
pub fn created(consignment: Consignment) -> Response {
    Response {
        created: true,
        consignment: Some(consignment),
        consignments: Vec::new(),
    }
}

/// Envelope for `GetConsignments`, carrying the listing verbatim.
pub fn listing(consignments: Vec<Consignment>) -> Response {
    Response {
        created: false,
        consignment: None,
        consignments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consignment(id: &str) -> Consignment {
        Consignment {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn created_sets_flag_and_attaches_record() {
        let resp = created(consignment("C1"));
        assert!(resp.created);
        assert_eq!(resp.consignment.map(|c| c.id).as_deref(), Some("C1"));
        assert!(resp.consignments.is_empty());
    }

    #[test]
    fn listing_carries_only_the_sequence() {
        let resp = listing(vec![consignment("C1"), consignment("C2")]);
        assert!(!resp.created);
        assert!(resp.consignment.is_none());
        let ids: Vec<_> = resp.consignments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["C1", "C2"]);
    }
}
