//! Platform fee taken from payments routed to connected accounts.

use encore_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Default percentage fee, 3.5%.
pub const DEFAULT_PLATFORM_FEE_BASIS_POINTS: u32 = 350;

/// Default fixed fee, $0.30.
pub const DEFAULT_PLATFORM_FEE_FIXED_CENTS: i64 = 30;

const BASIS_POINTS_PER_UNIT: i64 = 10_000;

/// Percentage plus fixed fee charged on each payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFeeSchedule {
    percentage_basis_points: u32,
    fixed_cents: i64,
}

impl PlatformFeeSchedule {
    /// Creates a fee schedule.
    ///
    /// The percentage may not exceed 100% and the fixed part may not be negative.
    pub fn new(percentage_basis_points: u32, fixed_cents: i64) -> AppResult<Self> {
        if i64::from(percentage_basis_points) > BASIS_POINTS_PER_UNIT {
            return Err(AppError::Validation(format!(
                "platform fee percentage must not exceed 100%, got {percentage_basis_points} basis points"
            )));
        }

        if fixed_cents < 0 {
            return Err(AppError::Validation(format!(
                "platform fixed fee must not be negative, got {fixed_cents} cents"
            )));
        }

        Ok(Self {
            percentage_basis_points,
            fixed_cents,
        })
    }

    /// Percentage part in basis points.
    #[must_use]
    pub fn percentage_basis_points(&self) -> u32 {
        self.percentage_basis_points
    }

    /// Fixed part in cents.
    #[must_use]
    pub fn fixed_cents(&self) -> i64 {
        self.fixed_cents
    }

    /// Splits a payment into the platform fee and the tenant payout.
    ///
    /// The percentage part is rounded half up to the cent. The fee never
    /// exceeds the payment amount.
    pub fn fee_for(&self, amount_cents: i64) -> AppResult<PlatformFee> {
        ensure_non_negative(amount_cents)?;

        let scaled = i128::from(amount_cents) * i128::from(self.percentage_basis_points);
        let half = i128::from(BASIS_POINTS_PER_UNIT / 2);
        let percentage_cents = (scaled + half) / i128::from(BASIS_POINTS_PER_UNIT);
        let uncapped = percentage_cents + i128::from(self.fixed_cents);
        let fee_cents = i64::try_from(uncapped.min(i128::from(amount_cents)))
            .map_err(|error| AppError::Internal(format!("platform fee overflow: {error}")))?;

        Ok(PlatformFee {
            amount_cents,
            fee_cents,
            payout_cents: amount_cents - fee_cents,
            percentage_basis_points: self.percentage_basis_points,
            fixed_cents: self.fixed_cents,
        })
    }
}

impl Default for PlatformFeeSchedule {
    fn default() -> Self {
        Self {
            percentage_basis_points: DEFAULT_PLATFORM_FEE_BASIS_POINTS,
            fixed_cents: DEFAULT_PLATFORM_FEE_FIXED_CENTS,
        }
    }
}

/// Fee breakdown for one payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFee {
    /// Gross payment in cents.
    pub amount_cents: i64,
    /// Platform share in cents.
    pub fee_cents: i64,
    /// Tenant share in cents.
    pub payout_cents: i64,
    /// Percentage part of the schedule applied.
    pub percentage_basis_points: u32,
    /// Fixed part of the schedule applied.
    pub fixed_cents: i64,
}

impl PlatformFee {
    /// Breakdown for payments that stay on the platform account.
    pub fn waived(amount_cents: i64) -> AppResult<Self> {
        ensure_non_negative(amount_cents)?;

        Ok(Self {
            amount_cents,
            fee_cents: 0,
            payout_cents: amount_cents,
            percentage_basis_points: 0,
            fixed_cents: 0,
        })
    }
}

fn ensure_non_negative(amount_cents: i64) -> AppResult<()> {
    if amount_cents < 0 {
        return Err(AppError::Validation(format!(
            "payment amount must not be negative, got {amount_cents} cents"
        )));
    }

    Ok(())
}
