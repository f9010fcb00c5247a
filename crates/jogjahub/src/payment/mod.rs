//! Simulated QRIS checkout.
//!
//! Nothing is settled: the prompt shows the price with a decorative code and a
//! reference number, and confirming always succeeds.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::marketplace::domain::{
    Listing, ListingId, PaymentMethod, Transaction, TransactionStatus,
};

pub const GRID_SIZE: usize = 8;
pub const SUCCESS_MESSAGE: &str = "Pembayaran Berhasil! Tiket/Bukti telah dikirim ke WA Anda.";

const REFERENCE_PREFIX: &str = "JH-";

/// Open checkout dialog for a single listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPrompt {
    pub listing_id: ListingId,
    pub listing_name: String,
    pub location: String,
    pub amount: u64,
    pub reference: String,
    /// Filled cells of the stand-in QR code, row-major.
    pub grid: [[bool; GRID_SIZE]; GRID_SIZE],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub message: String,
    pub transaction: Transaction,
}

impl PaymentPrompt {
    pub fn open<R: Rng>(listing: &Listing, rng: &mut R) -> Self {
        let reference = format!("{REFERENCE_PREFIX}{}", rng.gen_range(10_000..=99_999));
        let mut grid = [[false; GRID_SIZE]; GRID_SIZE];
        for row in grid.iter_mut() {
            for cell in row.iter_mut() {
                *cell = rng.gen_bool(0.5);
            }
        }

        Self {
            listing_id: listing.id.clone(),
            listing_name: listing.name.clone(),
            location: listing.location.clone(),
            amount: listing.price,
            reference,
            grid,
        }
    }

    /// Declares the payment successful and records it as a paid QRIS transaction.
    pub fn confirm(self, client_id: &str, now: DateTime<Utc>) -> PaymentReceipt {
        let digits = self.reference.trim_start_matches(REFERENCE_PREFIX);
        let transaction = Transaction {
            id: format!("trx-{digits}"),
            client_id: client_id.to_string(),
            listing_id: self.listing_id,
            transaction_no: self.reference,
            location: self.location,
            time: now,
            amount: self.amount,
            status: TransactionStatus::Paid,
            payment_method: Some(PaymentMethod::Qris),
        };

        info!(
            transaction_no = %transaction.transaction_no,
            listing_id = %transaction.listing_id,
            amount = transaction.amount,
            "simulated payment confirmed"
        );

        PaymentReceipt {
            message: SUCCESS_MESSAGE.to_string(),
            transaction,
        }
    }

    pub fn filled_cells(&self) -> usize {
        self.grid.iter().flatten().filter(|cell| **cell).count()
    }
}
