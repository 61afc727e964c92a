//! Transfers accompanying an action call and the roles they play.

use bincode::{Decode, Encode};
#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::error::GroupError;
use crate::identity::{Address, AssetId};

/// What a transfer moves.
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(tag = "type", rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, Encode, Decode, PartialEq, Eq)]
pub enum TransferKind {
    /// Native value, in micro-units.
    Payment { amount: u64 },
    /// Units of a ledger asset.
    AssetTransfer { asset_id: AssetId, amount: u64 },
}

/// A single proposed movement of value or asset.
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Encode, Decode, PartialEq, Eq)]
pub struct Transfer {
    pub sender: Address,
    pub receiver: Address,
    #[cfg_attr(feature = "json", serde(flatten))]
    pub kind: TransferKind,
}

impl Transfer {
    pub fn payment(sender: Address, receiver: Address, amount: u64) -> Self {
        Self {
            sender,
            receiver,
            kind: TransferKind::Payment { amount },
        }
    }

    pub fn asset(sender: Address, receiver: Address, asset_id: AssetId, amount: u64) -> Self {
        Self {
            sender,
            receiver,
            kind: TransferKind::AssetTransfer { asset_id, amount },
        }
    }
}

/// Payment leg of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentTransfer {
    pub sender: Address,
    pub receiver: Address,
    pub amount: u64,
}

/// Asset leg of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetTransfer {
    pub sender: Address,
    pub receiver: Address,
    pub asset_id: AssetId,
    pub amount: u64,
}

/// The transfers of a purchase, recognized by kind.
///
/// The group must be exactly `[payment, asset transfer]` in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyGroup {
    pub payment: PaymentTransfer,
    pub asset: AssetTransfer,
}

impl BuyGroup {
    pub const LEN: usize = 2;

    pub fn from_transfers(transfers: &[Transfer]) -> Result<Self, GroupError> {
        let [first, second] = transfers else {
            return Err(GroupError::TransferCount {
                expected: Self::LEN,
                found: transfers.len(),
            });
        };

        let payment = match first.kind {
            TransferKind::Payment { amount } => PaymentTransfer {
                sender: first.sender,
                receiver: first.receiver,
                amount,
            },
            TransferKind::AssetTransfer { .. } => {
                return Err(GroupError::UnexpectedKind {
                    index: 0,
                    expected: "payment",
                })
            }
        };

        let asset = match second.kind {
            TransferKind::AssetTransfer { asset_id, amount } => AssetTransfer {
                sender: second.sender,
                receiver: second.receiver,
                asset_id,
                amount,
            },
            TransferKind::Payment { .. } => {
                return Err(GroupError::UnexpectedKind {
                    index: 1,
                    expected: "asset transfer",
                })
            }
        };

        Ok(Self { payment, asset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Address = Address([1; 32]);
    const B: Address = Address([2; 32]);

    #[test]
    fn recognizes_roles() {
        let group = BuyGroup::from_transfers(&[
            Transfer::payment(A, B, 10),
            Transfer::asset(B, A, 7, 1),
        ])
        .unwrap();
        assert_eq!(group.payment.amount, 10);
        assert_eq!(group.asset.asset_id, 7);
        assert_eq!(group.asset.receiver, A);
    }

    #[test]
    fn rejects_wrong_shape() {
        assert_eq!(
            BuyGroup::from_transfers(&[Transfer::payment(A, B, 10)]),
            Err(GroupError::TransferCount {
                expected: 2,
                found: 1
            })
        );

        // swapped order
        assert_eq!(
            BuyGroup::from_transfers(&[Transfer::asset(B, A, 7, 1), Transfer::payment(A, B, 10)]),
            Err(GroupError::UnexpectedKind {
                index: 0,
                expected: "payment"
            })
        );

        assert_eq!(
            BuyGroup::from_transfers(&[Transfer::payment(A, B, 10), Transfer::payment(A, B, 10)]),
            Err(GroupError::UnexpectedKind {
                index: 1,
                expected: "asset transfer"
            })
        );
    }
}
