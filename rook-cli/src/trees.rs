//! Property-tree builders for structured command results.

use bitcoin::Transaction;
use rook::PropertyTree;
use rook_btc::{BitcoinUri, StealthAddress, Wrapped};

/// Checksum, payload, and version of wrapped data.
#[must_use]
pub fn wrapper_tree(wrapped: &Wrapped) -> PropertyTree {
    PropertyTree::node().with(
        "wrapper",
        PropertyTree::node()
            .with_value("checksum", wrapped.checksum())
            .with_value("payload", hex::encode(wrapped.payload()))
            .with_value("version", wrapped.version()),
    )
}

/// Full structure of a decoded transaction.
#[must_use]
pub fn transaction_tree(tx: &Transaction) -> PropertyTree {
    let mut inputs = PropertyTree::node();
    for input in &tx.input {
        inputs.push(
            "input",
            PropertyTree::node()
                .with(
                    "previous_output",
                    PropertyTree::node()
                        .with_value("hash", input.previous_output.txid)
                        .with_value("index", input.previous_output.vout),
                )
                .with_value("script", hex::encode(input.script_sig.as_bytes()))
                .with_value("sequence", input.sequence.0),
        );
    }

    let mut outputs = PropertyTree::node();
    for output in &tx.output {
        let mut node = PropertyTree::node()
            .with_value("value", output.value.to_sat())
            .with_value("script", hex::encode(output.script_pubkey.as_bytes()));
        if let Ok(address) =
            bitcoin::Address::from_script(&output.script_pubkey, bitcoin::Network::Bitcoin)
        {
            node.push("address", PropertyTree::scalar(address));
        }
        outputs.push("output", node);
    }

    PropertyTree::node().with(
        "transaction",
        PropertyTree::node()
            .with_value("hash", tx.compute_txid())
            .with_value("version", tx.version.0)
            .with_value("lock_time", tx.lock_time.to_consensus_u32())
            .with("inputs", inputs)
            .with("outputs", outputs),
    )
}

/// Scan key, spend keys, threshold, and network of a stealth address.
#[must_use]
pub fn stealth_tree(address: &StealthAddress) -> PropertyTree {
    let mut spend = PropertyTree::node();
    for key in address.spend() {
        spend.push("public_key", PropertyTree::scalar(key));
    }
    PropertyTree::node().with(
        "stealth_address",
        PropertyTree::node()
            .with_value("encoded", address)
            .with_value("network", address.network())
            .with_value("scan_public_key", address.scan())
            .with("spend_public_keys", spend)
            .with_value("signatures", address.signatures()),
    )
}

/// Address part and parameters of a payment URI.
#[must_use]
pub fn uri_tree(uri: &BitcoinUri) -> PropertyTree {
    let mut node = PropertyTree::node();
    if let Some(address) = uri.address() {
        node.push("address", PropertyTree::scalar(address));
    }
    if let Some(amount) = uri.amount() {
        node.push("amount", PropertyTree::scalar(amount.as_sat()));
    }
    if let Some(label) = uri.label() {
        node.push("label", PropertyTree::scalar(label));
    }
    if let Some(message) = uri.message() {
        node.push("message", PropertyTree::scalar(message));
    }
    if let Some(request) = uri.request() {
        node.push("r", PropertyTree::scalar(request));
    }
    PropertyTree::node().with("uri", node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rook::{render, OutputFormat};

    #[test]
    fn test_wrapper_tree_fields() {
        let wrapped =
            Wrapped::decode_base58check("1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs").unwrap();
        let tree = wrapper_tree(&wrapped);
        let wrapper = tree.get("wrapper").unwrap();
        assert_eq!(
            wrapper.get("payload").and_then(PropertyTree::as_scalar),
            Some("f54a5851e9372b87810a8e60cdd2e7cfd80b6e31")
        );
        assert_eq!(
            wrapper.get("version").and_then(PropertyTree::as_scalar),
            Some("0")
        );
    }

    #[test]
    fn test_uri_tree_omits_unset_parameters() {
        let uri: BitcoinUri = "bitcoin:113Pfw4sFqN1T5kXUnKbqZHMJHN9oyjtgD"
            .parse()
            .unwrap();
        let tree = uri_tree(&uri);
        let node = tree.get("uri").unwrap();
        assert!(node.get("address").is_some());
        assert!(node.get("amount").is_none());
        assert_eq!(
            render(&tree, OutputFormat::Native),
            "113Pfw4sFqN1T5kXUnKbqZHMJHN9oyjtgD"
        );
    }
}
