use super::*;
use ecash_primitives::chronik::{BlockMetadata, Tx, TxInput, TxOutput};
use ecash_primitives::{CashAddress, ScriptBuf};
use hex_literal::hex;

const ALICE: [u8; 20] = [0x11; 20];
const BOB: [u8; 20] = [0x22; 20];

fn alias_output(alias: &[u8]) -> TxOutput {
    let mut script = hex!("6a042e786563").to_vec();
    script.push(alias.len() as u8);
    script.extend_from_slice(alias);
    TxOutput {
        value: 0,
        output_script: ScriptBuf::from_bytes(script),
        token: None,
    }
}

fn fee_output(sats: u64) -> TxOutput {
    TxOutput {
        value: sats,
        output_script: AliasConstants::mainnet().registration_output_script(),
        token: None,
    }
}

fn change_output(sats: u64, hash: [u8; 20]) -> TxOutput {
    TxOutput {
        value: sats,
        output_script: CashAddress::p2pkh(hash).output_script(),
        token: None,
    }
}

fn tx(txid: &str, registrant: &ScriptBuf, outputs: Vec<TxOutput>, height: Option<u32>) -> Tx {
    Tx {
        txid: txid.to_string(),
        inputs: vec![TxInput {
            output_script: Some(registrant.clone()),
            value: 10_000,
        }],
        outputs,
        block: height.map(|height| BlockMetadata {
            height,
            hash: None,
            timestamp: None,
        }),
    }
}

/// A registration of `alias` paying exactly the mainnet fee.
fn registration(txid: &str, alias: &str, registrant: [u8; 20], height: Option<u32>) -> Tx {
    let fee = AliasConstants::mainnet()
        .registration_fee(alias.len())
        .unwrap();
    tx(
        txid,
        &CashAddress::p2pkh(registrant).output_script(),
        vec![
            alias_output(alias.as_bytes()),
            fee_output(fee),
            change_output(5_000, registrant),
        ],
        height,
    )
}

fn alias_tx(txid: &str, alias: &str, registrant: [u8; 20], blockheight: u32) -> AliasTx {
    AliasTx {
        address: CashAddress::p2pkh(registrant),
        alias: alias.to_string(),
        txid: txid.to_string(),
        blockheight,
    }
}

fn user_registrations(registered: &[AliasTx]) -> Vec<&AliasTx> {
    registered
        .iter()
        .filter(|alias_tx| alias_tx.txid != RESERVED_TXID)
        .collect()
}

#[test]
fn test_parse_valid_registration() {
    let constants = AliasConstants::mainnet();
    let parsed = parse_alias_tx(&registration("aa", "alex", ALICE, Some(785_000)), &constants);
    assert_eq!(parsed, Some(alias_tx("aa", "alex", ALICE, 785_000)));
}

#[test]
fn test_parse_registration_from_indexer_json() {
    let json = r#"{
        "txid": "ec92610fc41df2387e7febbb358b138a802ac26023f30b2442aa01ca733fff7d",
        "inputs": [
            { "outputScript": "76a914111111111111111111111111111111111111111188ac", "value": "2000" }
        ],
        "outputs": [
            { "value": "0", "outputScript": "6a042e78656304616c6578" },
            { "value": "555", "outputScript": "76a914638568e36d0b5d7d49a6e99854caa27d9772b09388ac" },
            { "value": "1000", "outputScript": "76a914111111111111111111111111111111111111111188ac" }
        ],
        "block": { "height": 787674 }
    }"#;
    let tx: Tx = serde_json::from_str(json).unwrap();

    let alias_tx = try_parse_alias_tx(&tx, &AliasConstants::mainnet()).unwrap();
    assert_eq!(alias_tx.alias, "alex");
    assert_eq!(
        alias_tx.address.to_string(),
        "ecash:qqg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyquz9y96w"
    );
    assert_eq!(alias_tx.blockheight, 787_674);
}

#[test]
fn test_unconfirmed_registration_gets_sentinel_height() {
    let constants = AliasConstants::mainnet();
    let parsed = parse_alias_tx(&registration("aa", "alex", ALICE, None), &constants).unwrap();
    assert_eq!(parsed.blockheight, UNCONFIRMED_BLOCKHEIGHT);
    assert!(!parsed.is_confirmed());
}

#[test]
fn test_uppercase_alias_is_rejected() {
    let constants = AliasConstants::mainnet();
    let tx = registration("aa", "Alex", ALICE, Some(785_000));
    assert_eq!(parse_alias_tx(&tx, &constants), None);
    assert_eq!(
        try_parse_alias_tx(&tx, &constants),
        Err(InvalidAliasTx::InvalidCharacters("Alex".to_string()))
    );
}

#[test]
fn test_non_alphanumeric_and_invalid_utf8_aliases_are_rejected() {
    let constants = AliasConstants::mainnet();
    let registrant = CashAddress::p2pkh(ALICE).output_script();

    let tx_with_dash = tx(
        "aa",
        &registrant,
        vec![alias_output(b"al-ex"), fee_output(554)],
        Some(1),
    );
    assert!(matches!(
        try_parse_alias_tx(&tx_with_dash, &constants),
        Err(InvalidAliasTx::InvalidCharacters(_))
    ));

    let tx_with_bad_utf8 = tx(
        "bb",
        &registrant,
        vec![alias_output(&[0xff, 0xfe]), fee_output(557)],
        Some(1),
    );
    assert_eq!(
        try_parse_alias_tx(&tx_with_bad_utf8, &constants),
        Err(InvalidAliasTx::InvalidUtf8)
    );
}

#[test]
fn test_insufficient_fee_is_rejected() {
    let constants = AliasConstants::mainnet();
    let registrant = CashAddress::p2pkh(ALICE).output_script();

    let underpaid = tx(
        "aa",
        &registrant,
        vec![alias_output(b"a"), fee_output(557)],
        Some(1),
    );
    assert_eq!(
        try_parse_alias_tx(&underpaid, &constants),
        Err(InvalidAliasTx::InsufficientFee {
            paid: 557,
            required: 558
        })
    );

    // Payments to any other script are not fees.
    let paid_elsewhere = tx(
        "bb",
        &registrant,
        vec![alias_output(b"a"), change_output(10_000, BOB)],
        Some(1),
    );
    assert!(parse_alias_tx(&paid_elsewhere, &constants).is_none());
}

#[test]
fn test_fee_split_across_outputs_is_accumulated() {
    let constants = AliasConstants::mainnet();
    let registrant = CashAddress::p2pkh(ALICE).output_script();
    let tx = tx(
        "aa",
        &registrant,
        vec![alias_output(b"a"), fee_output(300), fee_output(258)],
        Some(1),
    );
    assert_eq!(parse_alias_tx(&tx, &constants).unwrap().alias, "a");
}

#[test]
fn test_p2sh_input_is_not_supported() {
    let constants = AliasConstants::mainnet();
    let tx = tx(
        "aa",
        &CashAddress::p2sh(ALICE).output_script(),
        vec![alias_output(b"alex"), fee_output(555)],
        Some(1),
    );
    assert_eq!(
        try_parse_alias_tx(&tx, &constants),
        Err(InvalidAliasTx::NonP2pkhInput)
    );
}

#[test]
fn test_non_alias_transactions_are_rejected() {
    let constants = AliasConstants::mainnet();
    let registrant = CashAddress::p2pkh(ALICE).output_script();

    let plain_payment = tx("aa", &registrant, vec![change_output(1_000, BOB)], Some(1));
    assert_eq!(
        try_parse_alias_tx(&plain_payment, &constants),
        Err(InvalidAliasTx::NoAlias)
    );

    // Any zero-value output with another prefix disqualifies the tx.
    let other_op_return = TxOutput {
        value: 0,
        output_script: ScriptBuf::from_bytes(hex!("6a04534c500001").to_vec()),
        token: None,
    };
    let mixed = tx(
        "bb",
        &registrant,
        vec![alias_output(b"alex"), other_op_return, fee_output(555)],
        Some(1),
    );
    assert_eq!(
        try_parse_alias_tx(&mixed, &constants),
        Err(InvalidAliasTx::InvalidPrefix)
    );

    let no_inputs = Tx {
        txid: "cc".to_string(),
        inputs: vec![],
        outputs: vec![alias_output(b"alex"), fee_output(555)],
        block: None,
    };
    assert_eq!(
        try_parse_alias_tx(&no_inputs, &constants),
        Err(InvalidAliasTx::NoInputs)
    );
}

#[test]
fn test_length_checks() {
    let constants = AliasConstants::mainnet();
    let registrant = CashAddress::p2pkh(ALICE).output_script();

    let mut script = hex!("6a042e786563").to_vec();
    script.push(5);
    script.extend_from_slice(b"alex");
    let mismatched = tx(
        "aa",
        &registrant,
        vec![
            TxOutput {
                value: 0,
                output_script: ScriptBuf::from_bytes(script),
                token: None,
            },
            fee_output(555),
        ],
        Some(1),
    );
    assert_eq!(
        try_parse_alias_tx(&mismatched, &constants),
        Err(InvalidAliasTx::LengthMismatch {
            declared: 5,
            actual: 4
        })
    );

    let too_long = "a".repeat(22);
    let too_long_tx = tx(
        "bb",
        &registrant,
        vec![alias_output(too_long.as_bytes()), fee_output(10_000)],
        Some(1),
    );
    assert_eq!(
        try_parse_alias_tx(&too_long_tx, &constants),
        Err(InvalidAliasTx::TooLong {
            length: 22,
            max_length: 21
        })
    );

    let max_length = "a".repeat(21);
    let max_length_tx = tx(
        "cc",
        &registrant,
        vec![alias_output(max_length.as_bytes()), fee_output(551)],
        Some(1),
    );
    assert!(parse_alias_tx(&max_length_tx, &constants).is_some());

    let truncated = tx(
        "dd",
        &registrant,
        vec![
            TxOutput {
                value: 0,
                output_script: ScriptBuf::from_bytes(hex!("6a042e786563").to_vec()),
                token: None,
            },
            fee_output(555),
        ],
        Some(1),
    );
    assert_eq!(
        try_parse_alias_tx(&truncated, &constants),
        Err(InvalidAliasTx::MissingAliasPush)
    );
}

#[test]
fn test_get_alias_txs_skips_invalid_and_preserves_order() {
    let constants = AliasConstants::mainnet();
    let history = vec![
        registration("cc", "zed", BOB, Some(3)),
        registration("aa", "BAD", ALICE, Some(1)),
        registration("bb", "alex", ALICE, Some(2)),
    ];
    let alias_txs = get_alias_txs(&history, &constants);
    assert_eq!(
        alias_txs,
        vec![
            alias_tx("cc", "zed", BOB, 3),
            alias_tx("bb", "alex", ALICE, 2)
        ]
    );
}

#[test]
fn test_sort_by_txid_and_blockheight() {
    let sorted = sort_alias_txs_by_txid_and_blockheight(vec![
        alias_tx("dd", "a", ALICE, 10),
        alias_tx("cc", "b", ALICE, UNCONFIRMED_BLOCKHEIGHT),
        alias_tx("bb", "c", ALICE, 10),
        alias_tx("aa", "d", ALICE, 12),
        alias_tx("ab", "e", ALICE, 9),
    ]);
    let txids = sorted
        .iter()
        .map(|alias_tx| alias_tx.txid.as_str())
        .collect::<Vec<_>>();
    assert_eq!(txids, ["ab", "bb", "dd", "aa", "cc"]);
}

#[test]
fn test_earlier_block_wins() {
    let constants = AliasConstants::mainnet();
    let registered = get_valid_alias_registrations(
        vec![
            alias_tx("00", "alex", BOB, 800_001),
            alias_tx("ff", "alex", ALICE, 800_000),
        ],
        &constants,
    );
    assert_eq!(
        user_registrations(&registered),
        vec![&alias_tx("ff", "alex", ALICE, 800_000)]
    );
}

#[test]
fn test_same_block_smaller_txid_wins() {
    let constants = AliasConstants::mainnet();
    let registered = get_valid_alias_registrations(
        vec![
            alias_tx("b0", "alex", ALICE, 800_000),
            alias_tx("a0", "alex", BOB, 800_000),
        ],
        &constants,
    );
    assert_eq!(
        user_registrations(&registered),
        vec![&alias_tx("a0", "alex", BOB, 800_000)]
    );
}

#[test]
fn test_reserved_aliases_are_never_assignable() {
    let constants = AliasConstants::mainnet();
    let registered = get_valid_alias_registrations(
        vec![
            alias_tx("aa", "ecash", ALICE, 2),
            alias_tx("bb", "cashtab", BOB, 1),
        ],
        &constants,
    );
    assert!(user_registrations(&registered).is_empty());

    // Reserved aliases are seeded in configuration order.
    assert_eq!(registered.len(), constants.reserved_aliases.len());
    assert_eq!(registered[0].alias, constants.reserved_aliases[0]);
    assert_eq!(registered[0].address, constants.registration_address());
    assert_eq!(registered[0].blockheight, RESERVED_BLOCKHEIGHT);
}

#[test]
fn test_reserved_aliases_are_case_insensitive() {
    let mut constants = AliasConstants::mainnet();
    constants.reserved_aliases = vec!["Foo".to_string(), "foo".to_string()];

    let resolution = resolve_aliases(vec![alias_tx("aa", "foo", ALICE, 5)], &constants);
    assert_eq!(resolution.registered.len(), 1);
    assert_eq!(resolution.registered[0].alias, "foo");
    assert_eq!(resolution.registered[0].txid, RESERVED_TXID);
}

#[test]
fn test_unconfirmed_claims_are_pending() {
    let constants = AliasConstants::mainnet();
    let resolution = resolve_aliases(
        vec![
            alias_tx("01", "alex", BOB, UNCONFIRMED_BLOCKHEIGHT),
            alias_tx("02", "alex", ALICE, 800_000),
            alias_tx("03", "zed", BOB, UNCONFIRMED_BLOCKHEIGHT),
            alias_tx("00", "zed", ALICE, UNCONFIRMED_BLOCKHEIGHT),
        ],
        &constants,
    );
    assert_eq!(
        user_registrations(&resolution.registered),
        vec![&alias_tx("02", "alex", ALICE, 800_000)]
    );
    assert_eq!(
        resolution.pending,
        vec![alias_tx("00", "zed", ALICE, UNCONFIRMED_BLOCKHEIGHT)]
    );
}

#[test]
fn test_resolution_ignores_input_order() {
    let constants = AliasConstants::mainnet();
    let alias_txs = vec![
        alias_tx("c1", "alpha", ALICE, 3),
        alias_tx("a1", "alpha", BOB, 3),
        alias_tx("b2", "beta", BOB, 1),
        alias_tx("b1", "beta", ALICE, 2),
        alias_tx("d1", "gamma", ALICE, 4),
    ];
    let mut reversed = alias_txs.clone();
    reversed.reverse();

    let forward = get_valid_alias_registrations(alias_txs, &constants);
    let backward = get_valid_alias_registrations(reversed, &constants);
    assert_eq!(forward, backward);
    assert_eq!(
        user_registrations(&forward),
        vec![
            &alias_tx("b2", "beta", BOB, 1),
            &alias_tx("a1", "alpha", BOB, 3),
            &alias_tx("d1", "gamma", ALICE, 4),
        ]
    );
}

#[test]
fn test_registry_lookups() {
    let history = vec![
        registration("aa", "alex", ALICE, Some(10)),
        registration("bb", "alex", BOB, Some(11)),
        registration("cc", "bob", BOB, Some(12)),
        registration("dd", "carol", ALICE, Some(13)),
        registration("ee", "dave", BOB, None),
        registration("ff", "xec", BOB, Some(9)),
    ];
    let registry = AliasRegistry::from_history(&history, AliasConstants::mainnet());

    assert_eq!(registry.alias_info("ALEX").unwrap().txid, "aa");
    assert!(registry.alias_info("dave").is_none());
    assert_eq!(registry.pending_alias_info("dave").unwrap().txid, "ee");

    let alice_aliases = registry
        .aliases_for_address(&CashAddress::p2pkh(ALICE))
        .into_iter()
        .map(|alias_tx| alias_tx.alias.as_str())
        .collect::<Vec<_>>();
    assert_eq!(alice_aliases, ["alex", "carol"]);
    assert!(registry.aliases_for_address(&CashAddress::p2sh(ALICE)).is_empty());

    // Lookups match the address kind and hash, whatever the prefix.
    let etoken_alice = CashAddress::p2pkh(ALICE).with_prefix("etoken");
    let etoken_aliases = registry
        .aliases_for_address(&etoken_alice)
        .into_iter()
        .map(|alias_tx| alias_tx.alias.as_str())
        .collect::<Vec<_>>();
    assert_eq!(etoken_aliases, ["alex", "carol"]);

    assert_eq!(registry.availability("xec"), AliasAvailability::Reserved);
    assert!(matches!(
        registry.availability("bob"),
        AliasAvailability::Registered(AliasTx { ref txid, .. }) if txid == "cc"
    ));
    assert!(matches!(
        registry.availability("dave"),
        AliasAvailability::Pending(_)
    ));
    assert_eq!(
        registry.availability("erin"),
        AliasAvailability::Available { fee_sats: 555 }
    );
    assert_eq!(registry.availability("bad-name"), AliasAvailability::Invalid);
    assert_eq!(
        registry.availability(&"z".repeat(22)),
        AliasAvailability::Invalid
    );
}
