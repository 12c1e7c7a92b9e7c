//! Ordering of transport protocols in merged output.
//!
//! Well-known protocols sort by their IANA protocol number instead of their
//! name, so `tcp` (6) comes before `udp` (17) and `sctp` (132) comes last.
//! The number is zero-padded to three digits and compared as text, which lets
//! unknown protocols fall back to their literal name in the same ordering.

/// Registered protocol numbers, zero-padded for lexical comparison.
const PROTOCOL_NUMBERS: &[(&str, &str)] = &[
    ("tcp", "006"),
    ("udp", "017"),
    ("dccp", "033"),
    ("sctp", "132"),
];

/// Returns the sort rank of `protocol`.
///
/// Lookup is case-sensitive: `TCP` is not `tcp` and ranks by its literal text.
pub fn rank(protocol: &str) -> &str {
    PROTOCOL_NUMBERS
        .iter()
        .find(|(name, _)| *name == protocol)
        .map_or(protocol, |&(_, number)| number)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_protocols_rank_by_number() {
        assert_eq!(rank("tcp"), "006");
        assert_eq!(rank("udp"), "017");
        assert_eq!(rank("dccp"), "033");
        assert_eq!(rank("sctp"), "132");

        assert!(rank("tcp") < rank("udp"));
        assert!(rank("dccp") < rank("sctp"));
    }

    #[test]
    fn unknown_protocols_rank_by_name() {
        assert_eq!(rank("ddp"), "ddp");
        assert_eq!(rank("TCP"), "TCP");

        // Digits sort before letters, so every registered protocol comes first.
        assert!(rank("sctp") < rank("ddp"));
    }

    #[test]
    fn unknown_rank_borrows_the_name() {
        let protocol = String::from("ddp");
        assert!(std::ptr::eq(rank(&protocol), protocol.as_str()));
    }
}
