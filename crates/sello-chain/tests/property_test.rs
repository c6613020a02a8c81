//! Property-based tests for the pure chain helpers.

use alloy::primitives::Address;
use alloy::sol_types::SolValue;
use proptest::prelude::*;
use sello_chain::{encode_attendance_data, namehash, parse_address};
use sello_core::AttendanceRecord;

proptest! {
    /// Checksummed rendering of any address parses back to itself.
    #[test]
    fn checksummed_addresses_parse_to_themselves(bytes in any::<[u8; 20]>()) {
        let address = Address::from(bytes);
        prop_assert_eq!(parse_address(&address.to_string()), Some(address));
    }

    /// Lowercase hex bypasses the checksum and still parses.
    #[test]
    fn lowercase_addresses_bypass_the_checksum(bytes in any::<[u8; 20]>()) {
        let address = Address::from(bytes);
        let lower = format!("0x{}", alloy::primitives::hex::encode(bytes));
        prop_assert_eq!(parse_address(&lower), Some(address));
    }

    /// Surrounding whitespace never changes the parse result.
    #[test]
    fn whitespace_around_addresses_is_ignored(bytes in any::<[u8; 20]>()) {
        let address = Address::from(bytes);
        let padded = format!("  {address}  ");
        prop_assert_eq!(parse_address(&padded), Some(address));
    }

    /// Label order matters for the namehash fold.
    #[test]
    fn namehash_distinguishes_label_order(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        prop_assume!(a != b);
        prop_assert_ne!(namehash(&format!("{a}.{b}")), namehash(&format!("{b}.{a}")));
    }

    /// Any record survives an encode and parameter-decode round trip.
    #[test]
    fn attendance_encoding_round_trips(
        event_id in "[ -~]{0,48}",
        event_title in "[ -~]{0,48}",
        date in any::<u64>(),
        location in "[ -~]{0,48}",
        organizer in "[ -~]{0,48}",
        bytes in any::<[u8; 20]>(),
        attended in any::<bool>(),
    ) {
        type Schema = (String, String, u64, String, String, Address, bool);

        let record = AttendanceRecord {
            event_id,
            event_title,
            date,
            location,
            organizer,
            attester: Address::from(bytes),
            attended,
        };
        let encoded = encode_attendance_data(&record);
        let decoded = Schema::abi_decode_params(&encoded).expect("decodes");

        prop_assert_eq!(decoded.0, record.event_id);
        prop_assert_eq!(decoded.1, record.event_title);
        prop_assert_eq!(decoded.2, record.date);
        prop_assert_eq!(decoded.3, record.location);
        prop_assert_eq!(decoded.4, record.organizer);
        prop_assert_eq!(decoded.5, record.attester);
        prop_assert_eq!(decoded.6, record.attended);
    }
}
