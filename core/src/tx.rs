// Copyright (c) 2024-2025 The Ethvault Developers

//! EIP-1559 transaction decoding and ERC-20 transfer classification
//!
//! Decodes the type-2 envelope (`0x02 || rlp([chainId, nonce,
//! maxPriorityFeePerGas, maxFeePerGas, gasLimit, to, value, data,
//! accessList, ...])`) into labeled field ranges for display. Only the
//! first eight fields are walked individually; anything after `data`
//! (access list, signature values) is kept as one trailing raw range
//! rather than silently dropped.
//!
//! A `data` field that is byte-for-byte an ERC-20
//! `transfer(address,uint256)` call is reclassified into its recipient and
//! amount; any other calldata stays raw. That fallback is a display
//! concern, not an error.

use crate::engine::Error;
use crate::rlp::{self, RlpError, Span};

/// EIP-2718 type byte for EIP-1559 transactions
pub const EIP1559_TX_TYPE: u8 = 0x02;

/// 4-byte selector for ERC-20 `transfer(address,uint256)`
pub const ERC20_TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

/// ABI length of an ERC-20 transfer call: selector plus two 32-byte words
pub const ERC20_TRANSFER_CALL_LEN: usize = 68;

/// Number of individually decoded fields
pub const FIELD_COUNT: usize = 8;

/// Display labels for the decoded fields, in wire order
pub const FIELD_LABELS: [&str; FIELD_COUNT] = [
    "chainId",
    "nonce",
    "maxPriorityFeePerGas",
    "maxFeePerGas",
    "gasLimit",
    "to",
    "value",
    "data",
];

/// Classification of the transaction `data` field
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Classification {
    /// Opaque calldata, rendered raw
    RawTransaction,

    /// ERC-20 `transfer(address,uint256)` call
    Erc20Transfer {
        /// 20-byte recipient address (ABI left-padding stripped)
        to: Span,
        /// 32-byte big-endian token amount
        amount: Span,
    },
}

/// Decoded EIP-1559 transaction: ordered field ranges into the original
/// message buffer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DecodedTransaction {
    fields: [Span; FIELD_COUNT],
    trailing: Option<Span>,
    classification: Classification,
}

impl DecodedTransaction {
    /// Decode a type-2 transaction envelope.
    ///
    /// Fails atomically: any field that does not parse aborts the whole
    /// decode and no partial transaction is returned.
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn decode(tx: &[u8]) -> Result<Self, Error> {
        match tx.first() {
            Some(&EIP1559_TX_TYPE) => (),
            _ => return Err(Error::NotType2Tx),
        }

        // The remainder must be a single RLP list fitting the buffer
        let header = rlp::read_header(&tx[1..]).map_err(|e| match e {
            RlpError::Truncated => Error::RlpListParse,
            RlpError::Oversize => Error::RlpListLength,
        })?;
        if !header.list {
            return Err(Error::RlpListParse);
        }

        let list_end = 1 + header.header_len + header.payload_len;
        let mut pos = 1 + header.header_len;

        // Eight ordered fields, chainId through data
        let mut fields = [Span::default(); FIELD_COUNT];
        for field in fields.iter_mut() {
            let (item, next) = rlp::read_item(tx, pos).map_err(|_| Error::RlpFieldParse)?;
            if next > list_end {
                return Err(Error::RlpFieldParse);
            }
            *field = item;
            pos = next;
        }

        // Leftovers (access list, signature values) kept as one raw range
        let trailing = (pos < tx.len()).then(|| Span {
            offset: pos,
            len: tx.len() - pos,
        });

        let classification = classify_data(tx, &fields[FIELD_COUNT - 1]);

        Ok(Self {
            fields,
            trailing,
            classification,
        })
    }

    /// Labeled field ranges in wire order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Span)> + '_ {
        FIELD_LABELS.iter().copied().zip(self.fields.iter().copied())
    }

    /// Range of the `n`th decoded field
    pub fn field(&self, n: usize) -> Option<Span> {
        self.fields.get(n).copied()
    }

    /// Raw range following the eighth field, if any
    pub fn trailing(&self) -> Option<Span> {
        self.trailing
    }

    /// Classification of the `data` field
    pub fn classification(&self) -> Classification {
        self.classification
    }
}

/// Classify the `data` field, reinterpreting an exact ERC-20 transfer call
/// into its recipient and amount ranges.
fn classify_data(tx: &[u8], data: &Span) -> Classification {
    if data.len != ERC20_TRANSFER_CALL_LEN {
        return Classification::RawTransaction;
    }

    let bytes = data.bytes(tx);
    if bytes[..4] != ERC20_TRANSFER_SELECTOR {
        return Classification::RawTransaction;
    }

    // The address argument is left-padded to a 32-byte ABI word, the 12
    // pad bytes are dropped
    Classification::Erc20Transfer {
        to: Span {
            offset: data.offset + 16,
            len: 20,
        },
        amount: Span {
            offset: data.offset + 36,
            len: 32,
        },
    }
}
